//! Integration tests for the authorized API client

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::rc::Rc;
use waitline_core::{
    CredentialBundle, CredentialStore, MemoryNavigator, MemoryStorage, NavigationGuard, Navigator,
    Role, RoleRegistry, RouteTable,
};
use waitline_http::{AuthorizedClient, ClientError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    client: AuthorizedClient,
    store: CredentialStore,
    storage: MemoryStorage,
    navigator: MemoryNavigator,
    routes: Rc<RouteTable>,
}

impl Harness {
    async fn start(location: &str) -> Self {
        let server = MockServer::start().await;
        let storage = MemoryStorage::new();
        let store = CredentialStore::new(
            Rc::new(storage.clone()),
            Rc::new(RoleRegistry::default()),
        );
        let navigator = MemoryNavigator::new(location);
        let routes = Rc::new(RouteTable::standard());

        let client = AuthorizedClient::builder()
            .base_url(server.uri())
            .credentials(store.clone())
            .routes(routes.clone())
            .navigator(Rc::new(navigator.clone()))
            .build()
            .unwrap();

        Self {
            server,
            client,
            store,
            storage,
            navigator,
            routes,
        }
    }

    async fn authorization_headers(&self) -> Vec<Option<String>> {
        self.server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| {
                r.headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            })
            .collect()
    }
}

fn token(exp_offset: i64) -> String {
    let exp = Utc::now().timestamp() + exp_offset;
    let payload = URL_SAFE_NO_PAD.encode(json!({ "sub": "op-1", "exp": exp }).to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.c2ln")
}

#[derive(Debug, Deserialize, PartialEq)]
struct Queue {
    waiting: u32,
}

#[tokio::test]
async fn test_builder_requires_base_url() {
    let result = AuthorizedClient::builder()
        .credentials(CredentialStore::new(
            Rc::new(MemoryStorage::new()),
            Rc::new(RoleRegistry::default()),
        ))
        .navigator(Rc::new(MemoryNavigator::default()))
        .build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_builder_requires_credentials() {
    let result = AuthorizedClient::builder()
        .base_url("http://localhost:3000/")
        .navigator(Rc::new(MemoryNavigator::default()))
        .build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_each_role_gets_its_own_token() {
    let h = Harness::start("/").await;
    let admin = token(3600);
    let staff = token(7200);
    h.store.set(&Role::ADMIN, &CredentialBundle::new(&admin)).unwrap();
    h.store.set(&Role::STAFF, &CredentialBundle::new(&staff)).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/admin/x"))
        .and(header("authorization", format!("Bearer {admin}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"waiting": 1})))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/staff/y"))
        .and(header("authorization", format!("Bearer {staff}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"waiting": 2})))
        .expect(1)
        .mount(&h.server)
        .await;

    let q: Queue = h.client.execute(h.client.get("/api/admin/x")).await.unwrap();
    assert_eq!(q, Queue { waiting: 1 });
    let q: Queue = h.client.execute(h.client.get("/api/staff/y")).await.unwrap();
    assert_eq!(q, Queue { waiting: 2 });
}

#[tokio::test]
async fn test_admin_token_never_leaks_to_staff_calls() {
    let h = Harness::start("/").await;
    h.store
        .set(&Role::ADMIN, &CredentialBundle::new(token(3600)))
        .unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"waiting": 0})))
        .mount(&h.server)
        .await;

    let _: Queue = h.client.execute(h.client.get("/api/staff/y")).await.unwrap();
    let _: Queue = h
        .client
        .execute(h.client.get("/api/staff/y").header("Authorization", "Bearer leftover"))
        .await
        .unwrap();
    let _: Queue = h.client.execute(h.client.get("/api/public/z")).await.unwrap();

    assert_eq!(h.authorization_headers().await, vec![None, None, None]);
}

#[tokio::test]
async fn test_unauthorized_purges_role_and_redirects() {
    let h = Harness::start("/staff/42").await;
    h.store
        .set(
            &Role::ADMIN,
            &CredentialBundle::new(token(3600)).with_extra("adminInfo", r#"{"name":"Root"}"#),
        )
        .unwrap();
    h.store
        .set(
            &Role::STAFF,
            &CredentialBundle::new(token(3600))
                .with_extra("storeId", "42")
                .with_extra("storeName", "Main Street"),
        )
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/api/staff/x"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token revoked"))
        .mount(&h.server)
        .await;

    let err = h
        .client
        .send(h.client.post("/api/staff/x").json(&json!({"ticket": 3})))
        .await
        .unwrap_err();

    match &err {
        ClientError::Unauthorized { role, message } => {
            assert_eq!(role.as_ref(), Some(&Role::STAFF));
            assert_eq!(message, "token revoked");
        }
        other => panic!("expected unauthorized, got {other:?}"),
    }

    for key in ["staffToken", "storeId", "storeName"] {
        assert!(!h.storage.contains_key(key), "{key} should be cleared");
    }
    assert!(h.storage.contains_key("adminToken"));
    assert!(h.storage.contains_key("adminInfo"));
    assert_eq!(h.navigator.current_path(), "/staff-login");
}

#[tokio::test]
async fn test_other_failures_leave_credentials() {
    let h = Harness::start("/admin/1").await;
    h.store
        .set(&Role::ADMIN, &CredentialBundle::new(token(3600)))
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/admin/forbidden"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/public/z"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    let err = h
        .client
        .send(h.client.get("/api/admin/forbidden"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    let err = h.client.send(h.client.get("/api/public/z")).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { role: None, .. }));

    assert!(h.storage.contains_key("adminToken"));
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn test_staff_session_end_to_end() {
    let h = Harness::start("/").await;
    let guard = NavigationGuard::new(h.store.clone(), h.routes.clone());

    h.store
        .set(
            &Role::STAFF,
            &CredentialBundle::new(token(3600)).with_extra("storeId", "7"),
        )
        .unwrap();

    let attempt = guard.check("/staff/7");
    assert!(attempt.is_allowed());
    h.navigator.navigate(attempt.destination());

    Mock::given(method("GET"))
        .and(path("/api/staff/ping"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    let err = h.client.send(h.client.get("/api/staff/ping")).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(h.store.get(&Role::STAFF).unwrap().is_none());
    assert_eq!(h.navigator.current_path(), "/staff-login");

    let retry = guard.check("/staff/7");
    assert!(!retry.is_allowed());
    assert_eq!(retry.destination(), "/staff-login");
}

#[tokio::test]
async fn test_query_and_json_are_forwarded() {
    let h = Harness::start("/").await;
    h.store
        .set(&Role::STAFF, &CredentialBundle::new("opaque"))
        .unwrap();

    Mock::given(method("PUT"))
        .and(path("/api/store/3/call"))
        .and(wiremock::matchers::query_param("next", "true"))
        .and(wiremock::matchers::body_json(json!({"ticket": 12})))
        .and(header("authorization", "Bearer opaque"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"waiting": 4})))
        .expect(1)
        .mount(&h.server)
        .await;

    let q: Queue = h
        .client
        .execute(
            h.client
                .put("/api/store/3/call")
                .query(&[("next", "true")])
                .json(&json!({"ticket": 12})),
        )
        .await
        .unwrap();
    assert_eq!(q.waiting, 4);
}
