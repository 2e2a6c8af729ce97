//! Browser-backed collaborators.
//!
//! Everything here writes through to a signal so the UI re-renders, and on `wasm32` also to the
//! window: history entries, the document head and new browsing contexts. Off `wasm32` the
//! window side is absent and the signals alone carry the state.

use checkout::prelude::{
    Cart, CartStore, LinkOpener, Navigator, Notification, Notifier, OpenLinkError, PageMeta, Route,
};
use leptos::prelude::*;
use url::Url;

use crate::toast::Toast;

/// Cart owned by a signal.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SignalCartStore {
    cart: RwSignal<Cart>,
}

impl SignalCartStore {
    pub(crate) fn new(cart: RwSignal<Cart>) -> Self {
        Self { cart }
    }
}

impl CartStore for SignalCartStore {
    fn snapshot(&self) -> Cart {
        self.cart.get_untracked()
    }

    fn clear(&mut self) {
        self.cart.update(Cart::clear);
    }
}

/// Router state: the current route plus the routes visited before it.
///
/// With nothing visited in this session, "back" goes to `fallback` instead of leaving the site.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SignalNavigator {
    route: RwSignal<Route>,
    visited: RwSignal<Vec<Route>>,
    fallback: RwSignal<Route>,
}

impl SignalNavigator {
    pub(crate) fn new(
        route: RwSignal<Route>,
        visited: RwSignal<Vec<Route>>,
        fallback: RwSignal<Route>,
    ) -> Self {
        Self {
            route,
            visited,
            fallback,
        }
    }
}

impl Navigator for SignalNavigator {
    fn back(&self) {
        let Some(previous) = self.visited.try_update(Vec::pop).flatten() else {
            self.go_to(&self.fallback.get_untracked());

            return;
        };

        // The popstate listener picks up the route when the browser handled it.
        if history_back() {
            return;
        }

        self.route.set(previous);
    }

    fn go_to(&self, route: &Route) {
        let current = self.route.get_untracked();

        if &current == route {
            return;
        }

        push_history(route);
        self.visited.update(|visited| visited.push(current));
        self.route.set(route.clone());
    }
}

/// Toast region state.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ToastNotifier {
    toast: RwSignal<Option<Toast>>,
}

impl ToastNotifier {
    pub(crate) fn new(toast: RwSignal<Option<Toast>>) -> Self {
        Self { toast }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        let shown = Toast::new(notification);
        let id = shown.id;

        self.toast.set(Some(shown));
        schedule_expiry(self.toast, id);
    }
}

#[cfg(target_arch = "wasm32")]
fn schedule_expiry(toast: RwSignal<Option<Toast>>, id: u64) {
    set_timeout(
        move || crate::toast::expire(toast, id),
        crate::toast::TOAST_LIFETIME,
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn schedule_expiry(_toast: RwSignal<Option<Toast>>, _id: u64) {}

/// Opens links in a new browsing context.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct WindowLinkOpener;

#[cfg(target_arch = "wasm32")]
impl LinkOpener for WindowLinkOpener {
    fn open(&self, url: &Url) -> Result<(), OpenLinkError> {
        let window =
            web_sys::window().ok_or_else(|| OpenLinkError::Unavailable("no window".to_string()))?;

        match window.open_with_url_and_target(url.as_str(), "_blank") {
            Ok(Some(_opened)) => Ok(()),
            Ok(None) => Err(OpenLinkError::Blocked),
            Err(error) => Err(OpenLinkError::Unavailable(format!("{error:?}"))),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl LinkOpener for WindowLinkOpener {
    fn open(&self, _url: &Url) -> Result<(), OpenLinkError> {
        Err(OpenLinkError::Unavailable("no window".to_string()))
    }
}

/// The route the page was loaded at.
#[cfg(target_arch = "wasm32")]
pub(crate) fn initial_route() -> Option<Route> {
    current_path().map(Route::new)
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn initial_route() -> Option<Route> {
    None
}

#[cfg(target_arch = "wasm32")]
fn current_path() -> Option<String> {
    web_sys::window().and_then(|window| window.location().pathname().ok())
}

#[cfg(target_arch = "wasm32")]
fn push_history(route: &Route) {
    let pushed = web_sys::window()
        .and_then(|window| window.history().ok())
        .map(|history| {
            history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(route.as_str()))
        });

    if let Some(Err(error)) = pushed {
        leptos::logging::warn!("failed to push {route} onto history: {error:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn push_history(_route: &Route) {}

#[cfg(target_arch = "wasm32")]
fn history_back() -> bool {
    web_sys::window()
        .and_then(|window| window.history().ok())
        .is_some_and(|history| history.back().is_ok())
}

#[cfg(not(target_arch = "wasm32"))]
fn history_back() -> bool {
    false
}

/// Keep `route` in step with the browser's back and forward buttons.
#[cfg(target_arch = "wasm32")]
pub(crate) fn install_popstate_listener(route: RwSignal<Route>) {
    use wasm_bindgen::{JsCast, closure::Closure};

    let Some(window) = web_sys::window() else {
        return;
    };

    let on_popstate = Closure::<dyn FnMut()>::new(move || {
        if let Some(path) = current_path() {
            route.set(Route::new(path));
        }
    });

    if let Err(error) =
        window.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
    {
        leptos::logging::warn!("failed to listen for popstate: {error:?}");

        return;
    }

    // Lives as long as the page.
    on_popstate.forget();
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn install_popstate_listener(_route: RwSignal<Route>) {}

/// Write the title and meta description into the document head.
#[cfg(target_arch = "wasm32")]
pub(crate) fn apply_page_meta(meta: &PageMeta) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    document.set_title(&meta.title);

    let description = match document.query_selector("meta[name=\"description\"]") {
        Ok(Some(element)) => Some(element),
        Ok(None) => create_description_meta(&document),
        Err(error) => {
            leptos::logging::warn!("failed to query meta description: {error:?}");

            None
        }
    };

    if let Some(element) = description
        && let Err(error) = element.set_attribute("content", &meta.description)
    {
        leptos::logging::warn!("failed to set meta description: {error:?}");
    }
}

#[cfg(target_arch = "wasm32")]
fn create_description_meta(document: &web_sys::Document) -> Option<web_sys::Element> {
    let element = document.create_element("meta").ok()?;
    element.set_attribute("name", "description").ok()?;
    document.head()?.append_child(&element).ok()?;

    Some(element)
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn apply_page_meta(_meta: &PageMeta) {}

/// Title and meta description the document was served with.
#[cfg(target_arch = "wasm32")]
pub(crate) fn served_page_meta() -> Option<PageMeta> {
    let document = web_sys::window().and_then(|window| window.document())?;

    let description = document
        .query_selector("meta[name=\"description\"]")
        .ok()
        .flatten()
        .and_then(|element| element.get_attribute("content"))
        .unwrap_or_default();

    Some(PageMeta {
        title: document.title(),
        description,
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn served_page_meta() -> Option<PageMeta> {
    None
}
