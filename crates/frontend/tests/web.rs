#![cfg(target_arch = "wasm32")]

use std::rc::Rc;
use std::time::Duration;
use waitline_core::{
    AuthConfig, CredentialBundle, CredentialStore, KeyValueStorage, MemoryStorage, Navigator,
    Role, RoleRegistry, RouteTable,
};
use waitline_frontend::{
    BrowserStorage, GuardedRouter, HashNavigator, RouteView, Session, SessionHandle,
};
use wasm_bindgen_test::*;
use yew::prelude::*;

wasm_bindgen_test_configure!(run_in_browser);

fn local_store() -> (BrowserStorage, CredentialStore) {
    let storage = BrowserStorage::local().expect("localStorage available");
    let store = CredentialStore::new(
        Rc::new(storage.clone()),
        Rc::new(RoleRegistry::default()),
    );
    store.clear(&Role::ADMIN).unwrap();
    store.clear(&Role::STAFF).unwrap();
    (storage, store)
}

#[wasm_bindgen_test]
fn browser_storage_round_trips_keys() {
    let (storage, _) = local_store();
    storage.set_item("waitline-test", "1").unwrap();
    assert_eq!(storage.get_item("waitline-test").unwrap().as_deref(), Some("1"));
    storage.remove_item("waitline-test").unwrap();
    assert_eq!(storage.get_item("waitline-test").unwrap(), None);
}

#[wasm_bindgen_test]
fn staff_bundle_lands_in_local_storage() {
    let (storage, store) = local_store();
    let bundle = CredentialBundle::new("staff.jwt.token")
        .with_extra("storeId", "7")
        .with_extra("storeName", "Main St");
    store.set(&Role::STAFF, &bundle).unwrap();

    assert_eq!(
        storage.get_item("staffToken").unwrap().as_deref(),
        Some("staff.jwt.token")
    );
    assert_eq!(storage.get_item("storeId").unwrap().as_deref(), Some("7"));

    store.clear(&Role::STAFF).unwrap();
    assert_eq!(storage.get_item("staffToken").unwrap(), None);
    assert_eq!(storage.get_item("storeName").unwrap(), None);
}

#[wasm_bindgen_test]
fn hash_navigator_moves_location() {
    let navigator = HashNavigator;
    navigator.navigate("/staff-login");
    assert_eq!(navigator.current_path(), "/staff-login");
}

#[derive(Properties, PartialEq)]
struct HarnessProps {
    session: SessionHandle,
}

#[function_component(Harness)]
fn harness(props: &HarnessProps) -> Html {
    let render = Callback::from(|route: RouteView| {
        html! {
            <p id="view">{ format!("{:?}:{}", route.view, route.param("storeId").unwrap_or("-")) }</p>
        }
    });
    html! {
        <GuardedRouter session={props.session.clone()} {render} />
    }
}

async fn mount_at(path: &str) -> web_sys::Element {
    HashNavigator.navigate(path);

    let session = Session::new(
        &AuthConfig::default(),
        Rc::new(MemoryStorage::new()),
        Rc::new(HashNavigator),
        Rc::new(RouteTable::standard()),
        "http://localhost",
    )
    .unwrap();

    let document = web_sys::window().unwrap().document().unwrap();
    let root = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&root).unwrap();
    yew::Renderer::<Harness>::with_root_and_props(
        root.clone(),
        HarnessProps {
            session: SessionHandle::new(session),
        },
    )
    .render();

    yew::platform::time::sleep(Duration::from_millis(50)).await;
    root
}

#[wasm_bindgen_test]
async fn guarded_router_redirects_without_credential() {
    let root = mount_at("/staff/7").await;

    assert_eq!(HashNavigator.current_path(), "/staff-login");
    let html = root.inner_html();
    assert!(html.contains("StaffLogin:-"), "{html}");
    assert!(!html.contains("Staff:7"), "{html}");
}

#[wasm_bindgen_test]
async fn guarded_router_renders_public_view() {
    let root = mount_at("/join/5").await;

    assert_eq!(HashNavigator.current_path(), "/join/5");
    assert!(root.inner_html().contains("Join:5"));
}
