//! Hash router that runs the navigation guard before rendering a view

use crate::session::{SessionHandle, use_session};
use std::collections::BTreeMap;
use waitline_core::{GuardState, NavigationAttempt, View};
use yew::prelude::*;
use yew_router::prelude::*;
use yew_router::AnyRoute;

/// A view the guard let through, with its captured path parameters
#[derive(Clone, Debug, PartialEq)]
pub struct RouteView {
    pub view: View,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl RouteView {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[derive(Properties, PartialEq)]
pub struct GuardedRouterProps {
    pub session: SessionHandle,
    /// Renders an allowed view
    pub render: Callback<RouteView, Html>,
    /// Shown for paths no route declares
    #[prop_or_default]
    pub not_found: Html,
}

/// Session provider plus guarded hash routing
#[function_component(GuardedRouter)]
pub fn guarded_router(props: &GuardedRouterProps) -> Html {
    html! {
        <ContextProvider<SessionHandle> context={props.session.clone()}>
            <HashRouter>
                <GuardedSwitch render={props.render.clone()} not_found={props.not_found.clone()} />
            </HashRouter>
        </ContextProvider<SessionHandle>>
    }
}

#[derive(Properties, PartialEq)]
struct GuardedSwitchProps {
    render: Callback<RouteView, Html>,
    not_found: Html,
}

#[function_component(GuardedSwitch)]
fn guarded_switch(props: &GuardedSwitchProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let path = use_location()
        .map(|l| l.path().to_string())
        .unwrap_or_else(|| "/".to_string());

    let attempt = match &session {
        Some(session) => session.guard().check(&path),
        None => {
            tracing::error!("GuardedSwitch rendered without a session");
            NavigationAttempt::new(path.clone())
        }
    };

    // The redirect supersedes whatever navigation brought us here.
    use_effect_with(attempt.clone(), move |attempt| {
        if let GuardState::Redirected { to, .. } = &attempt.state {
            if let Some(navigator) = navigator {
                navigator.replace(&AnyRoute::new(to.clone()));
            }
        }
    });

    if !attempt.is_allowed() {
        return html! {};
    }

    let Some(session) = session else {
        return html! {};
    };
    match session.guard().routes().resolve(&path) {
        Some(matched) => props.render.emit(RouteView {
            view: *matched.view,
            path,
            params: matched.params,
        }),
        None => props.not_found.clone(),
    }
}
