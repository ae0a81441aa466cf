//! End-to-end navigation checks against a file-backed session.
//!
//! Each test writes the session the way a login would, then drives the
//! `Navigator` through the real route table and records the notices shown.

use serde_json::json;
use std::cell::RefCell;
use std::fs;
use std::sync::Arc;

use myerp_client::auth::session::{StaffUser, TOKEN_KEY, USER_KEY};
use myerp_client::auth::SessionStore;
use myerp_client::router::{self, NavigationDecision, Navigator, Notice, LOGIN, MAIN};
use myerp_client::storage::{FileStore, KeyValueStore};

fn file_session(dir: &tempfile::TempDir) -> Arc<SessionStore<FileStore>> {
    Arc::new(SessionStore::new(FileStore::new(dir.path().join("session.json"))))
}

fn staff(value: serde_json::Value) -> StaffUser {
    serde_json::from_value(value).expect("valid staff user")
}

fn denied() -> NavigationDecision {
    NavigationDecision::Redirect { to: MAIN, notice: Notice::NotAuthorized }
}

fn to_login() -> NavigationDecision {
    NavigationDecision::Redirect { to: LOGIN, notice: Notice::LoginRequired }
}

#[test]
fn test_anonymous_user_is_sent_to_login_with_notice() {
    let dir = tempfile::tempdir().unwrap();
    let session = file_session(&dir);
    let seen = RefCell::new(Vec::new());
    let nav = Navigator::new(session, |n: Notice| seen.borrow_mut().push(n));

    assert_eq!(nav.navigate(MAIN).unwrap(), to_login());
    assert_eq!(nav.navigate("client_list").unwrap(), to_login());
    assert!(nav.navigate(LOGIN).unwrap().is_allowed());

    assert_eq!(*seen.borrow(), vec![Notice::LoginRequired, Notice::LoginRequired]);
}

#[test]
fn test_storekeeper_limited_to_receiving_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let session = file_session(&dir);
    session
        .set_session(&staff(json!({"uid": "k1", "is_storekeeper": true})), "tok")
        .unwrap();
    let seen = RefCell::new(Vec::new());
    let nav = Navigator::new(session, |n: Notice| seen.borrow_mut().push(n));

    assert!(nav.navigate("inventory_receive").unwrap().is_allowed());
    assert!(nav.navigate("inventory_receive_list").unwrap().is_allowed());
    assert!(nav.navigate_path("/inventory/receive/detail?id=4").unwrap().is_allowed());

    assert_eq!(nav.navigate("inventory_list").unwrap(), denied());
    assert_eq!(nav.navigate("inventory_purchase").unwrap(), denied());
    assert_eq!(nav.navigate("order_list").unwrap(), denied());

    assert!(nav.navigate("client_list").unwrap().is_allowed());
    assert_eq!(seen.borrow().len(), 3);
    assert!(seen.borrow().iter().all(|n| *n == Notice::NotAuthorized));
}

#[test]
fn test_manager_reaches_orders_but_not_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let session = file_session(&dir);
    session
        .set_session(&staff(json!({"is_boss": false, "is_manager": true})), "tok")
        .unwrap();
    let nav = Navigator::new(session, |_: Notice| {});

    assert!(nav.navigate("order_list").unwrap().is_allowed());
    assert!(nav.navigate("brand_category").unwrap().is_allowed());
    assert_eq!(nav.navigate("staff_list").unwrap(), denied());
    assert_eq!(nav.navigate("inventory_receive").unwrap(), denied());
}

#[test]
fn test_boss_reaches_every_route() {
    let dir = tempfile::tempdir().unwrap();
    let session = file_session(&dir);
    session.set_session(&staff(json!({"is_boss": true})), "tok").unwrap();
    let seen = RefCell::new(Vec::new());
    let nav = Navigator::new(session, |n: Notice| seen.borrow_mut().push(n));

    for route in router::ROUTES {
        assert!(nav.check(route).is_allowed(), "boss denied {}", route.name);
    }
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_regular_staff_denied_every_role_gated_route() {
    let dir = tempfile::tempdir().unwrap();
    let session = file_session(&dir);
    session.set_session(&staff(json!({"name": "小王"})), "tok").unwrap();
    let nav = Navigator::new(session, |_: Notice| {});

    for route in router::ROUTES {
        let decision = nav.check(route);
        assert_eq!(decision.is_allowed(), route.roles.is_none(), "route {}", route.name);
    }
}

#[test]
fn test_corrupt_session_file_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, "{\"JWT_TOKEN_FROM_MYERP_TOK").unwrap();

    let session = Arc::new(SessionStore::new(FileStore::new(&path)));
    assert!(!session.is_authenticated());
    let nav = Navigator::new(session.clone(), |_: Notice| {});
    assert_eq!(nav.navigate(MAIN).unwrap(), to_login());

    // The next login replaces the corrupt file.
    session.set_session(&staff(json!({"is_boss": true})), "tok").unwrap();
    assert!(nav.navigate("inventory_log").unwrap().is_allowed());
}

#[test]
fn test_truncated_user_record_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let session = file_session(&dir);
    session.store().set_item(USER_KEY, "{\"is_boss\": tru").unwrap();
    session.store().set_item(TOKEN_KEY, "tok").unwrap();

    assert_eq!(session.user(), None);
    assert!(!session.is_authenticated());
    let nav = Navigator::new(session, |_: Notice| {});
    assert_eq!(nav.navigate("staff_list").unwrap(), to_login());
}

#[test]
fn test_logout_in_one_handle_is_seen_by_another() {
    let dir = tempfile::tempdir().unwrap();
    let a = file_session(&dir);
    let b = file_session(&dir);

    a.set_session(&staff(json!({"is_manager": true})), "tok").unwrap();
    assert!(b.is_manager());

    b.clear_session().unwrap();
    assert!(!a.is_authenticated());
    let nav = Navigator::new(a, |_: Notice| {});
    assert_eq!(nav.navigate("order_list").unwrap(), to_login());
}
