mod common;

use common::{CountingContext, ledger};
use micro_request::{AbsentItemPolicy, Request};

#[test]
fn create_session_twice_creates_once() {
    let ledger = ledger();
    let mut request = Request::with_context(CountingContext::new(&ledger));

    assert!(request.create_session());
    assert!(!request.create_session());

    assert_eq!(ledger.borrow().creates(), 1);
    assert_eq!(request.session_id(), Some("sid-1"));
}

#[test]
fn session_less_items_never_touch_the_store() {
    let ledger = ledger();
    let mut request = Request::with_context(CountingContext::new(&ledger));

    assert_eq!(request.session_item("cart"), None);
    request.set_session_item("cart", "1");
    request.remove_session_item("cart");

    assert_eq!(request.session_id(), None);
    assert_eq!(ledger.borrow().store_calls(), 0);
}

#[test]
fn write_through_rereads_the_stored_value() {
    let ledger = ledger();
    let mut request = Request::with_context(CountingContext::new(&ledger));
    request.create_session();

    request.set_session_item("user", "  alice  ");

    assert_eq!(ledger.borrow().stored("sid-1", "user"), Some("alice"));
    assert_eq!(request.session_item("user"), Some("alice"));
    // set + re-read, then the read above is a cache hit
    assert_eq!(ledger.borrow().store_calls(), 2);
}

#[test]
fn removal_requeries_and_reflects_absence() {
    let ledger = ledger();
    ledger.borrow_mut().seed("sid-9", "cart", "3 items");

    let mut request = Request::with_context(CountingContext::new(&ledger));
    assert!(request.load_session("sid-9"));
    assert_eq!(request.session_item("cart"), Some("3 items"));

    request.remove_session_item("cart");
    let calls = ledger.borrow().store_calls();

    assert_eq!(request.session_item("cart"), None);
    assert_eq!(ledger.borrow().store_calls(), calls + 1);
    assert_eq!(ledger.borrow().stored("sid-9", "cart"), None);
}

#[test]
fn requery_policy_sees_items_written_elsewhere() {
    let ledger = ledger();
    let mut request = Request::with_context(CountingContext::new(&ledger));
    request.load_session("sid-3");

    assert_eq!(request.session_item("flash"), None);
    ledger.borrow_mut().seed("sid-3", "flash", "saved");
    assert_eq!(request.session_item("flash"), Some("saved"));
}

#[test]
fn remember_policy_trusts_cached_absence() {
    let ledger = ledger();
    let mut request = Request::builder()
        .context(CountingContext::new(&ledger))
        .absent_items(AbsentItemPolicy::Remember)
        .build();
    request.load_session("sid-3");

    assert_eq!(request.session_item("flash"), None);
    ledger.borrow_mut().seed("sid-3", "flash", "saved");
    assert_eq!(request.session_item("flash"), None);
    assert_eq!(ledger.borrow().store_calls(), 1);

    request.set_session_item("flash", "mine ");
    assert_eq!(request.session_item("flash"), Some("mine"));
}

#[test]
fn load_with_unknown_id_keeps_the_handle() {
    let ledger = ledger();
    let mut request = Request::with_context(CountingContext::new(&ledger));

    assert!(request.load_session("no-such-session"));
    assert!(request.has_session());
    assert_eq!(request.session_id(), Some("no-such-session"));
    assert_eq!(request.session_item("anything"), None);
}

#[test]
fn cached_values_stay_stable_across_reads() {
    let ledger = ledger();
    ledger.borrow_mut().seed("sid-5", "theme", "dark");

    let mut request = Request::with_context(CountingContext::new(&ledger));
    request.load_session("sid-5");

    let first = request.session_item("theme").map(str::to_string);
    ledger.borrow_mut().seed("sid-5", "theme", "light");
    let second = request.session_item("theme").map(str::to_string);

    assert_eq!(first.as_deref(), Some("dark"));
    assert_eq!(second, first);
}
