use waitline_core::{AuthConfig, View};
use waitline_frontend::{GuardedRouter, RouteView, Session, SessionHandle, logging};
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let session = use_memo((), |_| Session::browser(&AuthConfig::default()).map(SessionHandle::new));

    match session.as_ref() {
        Ok(session) => html! {
            <GuardedRouter
                session={session.clone()}
                render={Callback::from(render_view)}
                not_found={html! { <main class="not-found">{ "Page not found" }</main> }}
            />
        },
        Err(e) => {
            tracing::error!(error = %e, "Failed to start session");
            html! { <main class="error">{ e.to_string() }</main> }
        }
    }
}

fn render_view(route: RouteView) -> Html {
    let title = match route.view {
        View::Join => "Join queue",
        View::Login => "Sign in",
        View::AdminLogin => "Admin sign in",
        View::StaffLogin => "Staff sign in",
        View::Admin => "Admin dashboard",
        View::Staff => "Staff console",
    };
    html! {
        <main data-path={route.path.clone()}>
            <h1>{ title }</h1>
            if let Some(store_id) = route.param("storeId") {
                <p class="store">{ store_id.to_string() }</p>
            }
        </main>
    }
}

fn main() {
    logging::init();
    yew::Renderer::<App>::new().render();
}
