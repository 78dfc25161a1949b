//! Login, navigation and logout across several roles

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use std::rc::Rc;
use waitline_core::{
    AuthConfig, CredentialBundle, CredentialStore, GuardState, MemoryStorage, NavigationGuard,
    Role, RoleRegistry, RouteTable,
};

fn live_token(subject: &str) -> String {
    let exp = Utc::now().timestamp() + 3600;
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{subject}","exp":{exp}}}"#));
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig")
}

#[test]
fn test_login_navigate_logout() {
    let storage = MemoryStorage::new();
    let store = CredentialStore::new(
        Rc::new(storage.clone()),
        Rc::new(RoleRegistry::default()),
    );
    let guard = NavigationGuard::new(store.clone(), Rc::new(RouteTable::standard()));

    assert_eq!(guard.check("/admin/1").destination(), "/admin-login");

    store
        .set(
            &Role::ADMIN,
            &CredentialBundle::new(live_token("admin-1")).with_extra("adminInfo", r#"{"name":"A"}"#),
        )
        .unwrap();
    assert!(guard.check("/admin/1").is_allowed());
    // Another role's credential does not open staff views.
    assert_eq!(guard.check("/staff/1").destination(), "/staff-login");

    store.clear(&Role::ADMIN).unwrap();
    assert!(storage.snapshot().is_empty());
    assert_eq!(guard.check("/admin/1").destination(), "/admin-login");
}

#[test]
fn test_configured_store_role_is_isolated() {
    let config = AuthConfig::from_json(
        r#"{
            "roles": [
                {"name": "staff", "token_key": "staffToken",
                 "api_prefixes": ["/api/staff"], "login_path": "/staff-login"},
                {"name": "store", "token_key": "storeToken",
                 "aux_keys": ["storeId", "storeName"],
                 "api_prefixes": ["/api/store"], "login_path": "/login"}
            ]
        }"#,
    )
    .unwrap();
    let registry = RoleRegistry::from_config(&config).unwrap();
    assert_eq!(registry.classify_request("/api/store/5"), Some(&Role::STORE));

    let routes = RouteTable::standard()
        .route("/store/:storeId", Some(Role::STORE), waitline_core::View::Staff);
    let storage = MemoryStorage::new();
    let store = CredentialStore::new(Rc::new(storage.clone()), Rc::new(registry));
    let guard = NavigationGuard::new(store.clone(), Rc::new(routes));

    store
        .set(&Role::STAFF, &CredentialBundle::new(live_token("staff-1")))
        .unwrap();

    let attempt = guard.check("/store/5");
    assert_eq!(
        attempt.state,
        GuardState::Redirected {
            role: Role::STORE,
            to: "/login".to_string()
        }
    );
    assert!(storage.contains_key("staffToken"));
}
