//! Session backend double that counts every acquired and released foreign resource.
//!
//! Stored values are trimmed on write, so tests can tell a value re-read from the backend apart
//! from the value that was passed in.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use micro_session::{Release, SessionContext, SessionHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Context,
    Session,
    Text,
}

#[derive(Debug, Default)]
pub struct Ledger {
    acquired: HashMap<Resource, usize>,
    released: HashMap<Resource, usize>,
    release_order: Vec<Resource>,
    store_calls: usize,
    creates: usize,
    sessions: HashMap<String, HashMap<String, String>>,
}

pub type SharedLedger = Rc<RefCell<Ledger>>;

pub fn ledger() -> SharedLedger {
    Rc::new(RefCell::new(Ledger::default()))
}

impl Ledger {
    pub fn acquired(&self, resource: Resource) -> usize {
        self.acquired.get(&resource).copied().unwrap_or(0)
    }

    pub fn released(&self, resource: Resource) -> usize {
        self.released.get(&resource).copied().unwrap_or(0)
    }

    pub fn outstanding(&self, resource: Resource) -> usize {
        self.acquired(resource) - self.released(resource)
    }

    pub fn release_order(&self) -> &[Resource] {
        &self.release_order
    }

    /// Calls to get/set/remove item on any session.
    pub fn store_calls(&self) -> usize {
        self.store_calls
    }

    /// Calls to `create_session` on any context.
    pub fn creates(&self) -> usize {
        self.creates
    }

    /// Puts an item into the backend directly, as another request would.
    pub fn seed(&mut self, session_id: &str, key: &str, value: &str) {
        self.sessions.entry(session_id.to_string()).or_default().insert(key.to_string(), value.to_string());
    }

    pub fn stored(&self, session_id: &str, key: &str) -> Option<&str> {
        self.sessions.get(session_id)?.get(key).map(String::as_str)
    }

    fn acquire(&mut self, resource: Resource) {
        *self.acquired.entry(resource).or_default() += 1;
    }

    fn release(&mut self, resource: Resource) {
        *self.released.entry(resource).or_default() += 1;
        self.release_order.push(resource);
    }
}

pub struct CountingContext {
    ledger: SharedLedger,
}

impl CountingContext {
    pub fn new(ledger: &SharedLedger) -> Self {
        ledger.borrow_mut().acquire(Resource::Context);
        Self { ledger: ledger.clone() }
    }
}

impl Release for CountingContext {
    fn release(self) {
        self.ledger.borrow_mut().release(Resource::Context);
    }
}

impl SessionContext for CountingContext {
    type Session = CountingSession;

    fn session_by_id(&self, id: &str) -> CountingSession {
        CountingSession::open(&self.ledger, id.to_string())
    }

    fn create_session(&self) -> CountingSession {
        let id = {
            let mut ledger = self.ledger.borrow_mut();
            ledger.creates += 1;
            let id = format!("sid-{}", ledger.sessions.len() + 1);
            ledger.sessions.insert(id.clone(), HashMap::new());
            id
        };
        CountingSession::open(&self.ledger, id)
    }
}

pub struct CountingSession {
    id: String,
    ledger: SharedLedger,
}

impl CountingSession {
    fn open(ledger: &SharedLedger, id: String) -> Self {
        ledger.borrow_mut().acquire(Resource::Session);
        Self { id, ledger: ledger.clone() }
    }

    fn text(&self, text: String) -> CountingText {
        self.ledger.borrow_mut().acquire(Resource::Text);
        CountingText { text, ledger: self.ledger.clone() }
    }
}

impl Release for CountingSession {
    fn release(self) {
        self.ledger.borrow_mut().release(Resource::Session);
    }
}

impl SessionHandle for CountingSession {
    type Text = CountingText;

    fn id(&self) -> CountingText {
        self.text(self.id.clone())
    }

    fn get_item(&self, key: &str) -> Option<CountingText> {
        let value = {
            let mut ledger = self.ledger.borrow_mut();
            ledger.store_calls += 1;
            ledger.stored(&self.id, key).map(str::to_string)
        };
        value.map(|value| self.text(value))
    }

    fn set_item(&self, key: &str, value: &str) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.store_calls += 1;
        ledger.seed(&self.id, key, value.trim());
    }

    fn remove_item(&self, key: &str) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.store_calls += 1;
        if let Some(items) = ledger.sessions.get_mut(&self.id) {
            items.remove(key);
        }
    }
}

pub struct CountingText {
    text: String,
    ledger: SharedLedger,
}

impl AsRef<str> for CountingText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Release for CountingText {
    fn release(self) {
        self.ledger.borrow_mut().release(Resource::Text);
    }
}
