//! Leptos Checkout Application

use std::sync::Arc;

use checkout::prelude::{Cart, CartItem, CheckoutConfig, ItemsFixture, Navigator, PageMeta, Route};
use leptos::prelude::*;
use rusty_money::iso::Currency;

use crate::{
    browser::{SignalCartStore, SignalNavigator, ToastNotifier},
    toast::Toast,
};

mod browser;
mod catalog;
mod page;
mod toast;

const CHECKOUT_FIXTURE_YAML: &str = include_str!("../../../fixtures/checkout/demo.yml");
const CATALOG_FIXTURE_YAML: &str = include_str!("../../../fixtures/catalog/demo.yml");

/// Path the checkout page is served at.
const CHECKOUT_ROUTE: &str = "/checkout";

/// Parsed application fixtures used by the UI.
#[derive(Debug)]
struct AppData {
    /// Store and checkout settings.
    config: Arc<CheckoutConfig>,

    /// Products offered on the catalog page.
    catalog: Arc<Vec<CartItem>>,
}

impl AppData {
    fn load() -> Result<Self, String> {
        let config = CheckoutConfig::from_yaml(CHECKOUT_FIXTURE_YAML)
            .map_err(|error| format!("Failed to load checkout config: {error}"))?;

        let catalog = ItemsFixture::from_yaml(CATALOG_FIXTURE_YAML)
            .and_then(|fixture| fixture.into_cart(config.currency))
            .map_err(|error| format!("Failed to load catalog: {error}"))?;

        Ok(Self {
            catalog: Arc::new(catalog.items().to_vec()),
            config: Arc::new(config),
        })
    }
}

/// App-wide reactive state.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Shell {
    /// Cart contents.
    pub(crate) cart: RwSignal<Cart>,

    /// Route currently shown.
    pub(crate) route: RwSignal<Route>,

    /// Routes visited before the current one.
    pub(crate) visited: RwSignal<Vec<Route>>,

    /// Where "back" leads when nothing was visited before.
    pub(crate) catalog: RwSignal<Route>,

    /// Toast currently shown.
    pub(crate) toast: RwSignal<Option<Toast>>,
}

impl Shell {
    pub(crate) fn new(currency: &'static Currency, route: Route, catalog: Route) -> Self {
        Self {
            cart: RwSignal::new(Cart::new(currency)),
            route: RwSignal::new(route),
            visited: RwSignal::new(Vec::new()),
            catalog: RwSignal::new(catalog),
            toast: RwSignal::new(None),
        }
    }

    pub(crate) fn store(self) -> SignalCartStore {
        SignalCartStore::new(self.cart)
    }

    pub(crate) fn navigator(self) -> SignalNavigator {
        SignalNavigator::new(self.route, self.visited, self.catalog)
    }

    pub(crate) fn notifier(self) -> ToastNotifier {
        ToastNotifier::new(self.toast)
    }
}

fn cart_label(unit_count: u64) -> String {
    format!("Cart ({unit_count})")
}

/// Head metadata for the route being shown.
fn route_meta<'a>(
    on_checkout: bool,
    checkout: &'a PageMeta,
    elsewhere: &'a PageMeta,
) -> &'a PageMeta {
    if on_checkout { checkout } else { elsewhere }
}

/// Main app shell.
#[component]
fn App() -> impl IntoView {
    match AppData::load() {
        Ok(app_data) => {
            let initial_route =
                browser::initial_route().unwrap_or_else(|| app_data.config.home.clone());
            let shell = Shell::new(
                app_data.config.currency,
                initial_route,
                app_data.config.catalog.clone(),
            );

            browser::install_popstate_listener(shell.route);

            let on_checkout =
                Memo::new(move |_| shell.route.with(|route| route.as_str() == CHECKOUT_ROUTE));

            let served_meta = browser::served_page_meta().unwrap_or_else(|| PageMeta {
                title: app_data.config.store_name.clone(),
                description: String::new(),
            });
            let checkout_meta = app_data.config.page.clone();
            Effect::new(move |_| {
                browser::apply_page_meta(route_meta(
                    on_checkout.get(),
                    &checkout_meta,
                    &served_meta,
                ));
            });
            let checkout_route = Route::new(CHECKOUT_ROUTE);
            let config = Arc::clone(&app_data.config);
            let catalog = Arc::clone(&app_data.catalog);

            view! {
                <main class="min-h-screen bg-slate-50 px-4 py-6 text-slate-900">
                    <header class="mx-auto mb-6 flex max-w-5xl items-center justify-between">
                        <h1 class="text-2xl font-semibold tracking-tight">
                            {app_data.config.store_name.clone()}
                        </h1>
                        <button
                            type="button"
                            class="cart-link"
                            on:click=move |_| shell.navigator().go_to(&checkout_route)
                        >
                            {move || cart_label(shell.cart.with(Cart::unit_count))}
                        </button>
                    </header>
                    {move || {
                        if on_checkout.get() {
                            view! {
                                <page::CheckoutRoute config=Arc::clone(&config) shell=shell />
                            }
                                .into_any()
                        } else {
                            view! {
                                <catalog::CatalogPanel items=Arc::clone(&catalog) cart=shell.cart />
                            }
                                .into_any()
                        }
                    }}
                    <toast::ToastRegion toast=shell.toast />
                </main>
            }
            .into_any()
        }
        Err(error_message) => view! {
            <main class="min-h-screen bg-slate-50 px-4 py-6 text-slate-900">
                <div class="mx-auto mb-6 max-w-5xl">
                    <h1 class="text-2xl font-semibold tracking-tight">"Checkout"</h1>
                </div>
                <div class="mx-auto max-w-3xl rounded-lg border border-red-200 bg-red-50 p-4">
                    <p class="text-sm text-red-700">{error_message}</p>
                </div>
            </main>
        }
        .into_any(),
    }
}

/// Main entry point
fn main() {
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(App);
}
