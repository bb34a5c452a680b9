//! Walks two requests through one in-memory session backend.
//!
//! The subscriber prints everything down to TRACE, so session lifecycle and cache decisions are
//! visible next to the example's own output.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bytes::Bytes;
use micro_request::Request;
use micro_session::{Release, SessionContext, SessionHandle};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

type Sessions = Rc<RefCell<HashMap<String, HashMap<String, String>>>>;

struct MemoryContext {
    sessions: Sessions,
}

struct MemorySession {
    id: String,
    sessions: Sessions,
}

impl Release for MemoryContext {
    fn release(self) {
        info!("context released");
    }
}

impl Release for MemorySession {
    fn release(self) {
        info!(session = %self.id, "session handle released");
    }
}

impl SessionContext for MemoryContext {
    type Session = MemorySession;

    fn session_by_id(&self, id: &str) -> MemorySession {
        MemorySession { id: id.to_string(), sessions: self.sessions.clone() }
    }

    fn create_session(&self) -> MemorySession {
        let mut sessions = self.sessions.borrow_mut();
        let id = format!("session-{}", sessions.len() + 1);
        sessions.insert(id.clone(), HashMap::new());
        MemorySession { id, sessions: self.sessions.clone() }
    }
}

impl SessionHandle for MemorySession {
    type Text = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.sessions.borrow().get(&self.id)?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.sessions.borrow_mut().entry(self.id.clone()).or_default().insert(key.to_string(), value.trim().to_string());
    }

    fn remove_item(&self, key: &str) {
        if let Some(items) = self.sessions.borrow_mut().get_mut(&self.id) {
            items.remove(key);
        }
    }
}

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let sessions = Sessions::default();

    let login = http::Request::builder()
        .method("POST")
        .uri("/login")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Bytes::from_static(b"user=alice"))
        .expect("valid request");

    let session_id = {
        let mut request = Request::from_http(login).expect("text headers");
        request.set_remote_addr("127.0.0.1:52311");
        request.set_context(MemoryContext { sessions: sessions.clone() });

        request.create_session();
        request.set_session_item("user", " alice ");

        info!(user = ?request.session_item("user"), "logged in");
        request.session_id().map(str::to_string).expect("session was created")
    };

    let cart = http::Request::builder()
        .uri("/cart")
        .header("Cookie", format!("sid={session_id}; theme=dark"))
        .body(Bytes::new())
        .expect("valid request");

    let mut request = Request::from_http(cart).expect("text headers");
    request.set_context(MemoryContext { sessions });

    if let Some(sid) = request.cookie("sid").map(str::to_string) {
        request.load_session(&sid);
    }

    let mut cursor = request.create_cursor();
    while let Ok(Some(name)) = request.cursor_next(&mut cursor) {
        info!(header = name, "request header");
    }

    let user = request.session_item("user").map(str::to_string);
    let cart = request.session_item("cart").map(str::to_string);
    info!(?user, ?cart, "second request");
    request.remove_session_item("user");
    info!(user = ?request.session_item("user"), "after logout");
}
