//! Checkout route: empty-cart guard, contact form and order summary.

use std::sync::Arc;

use checkout::prelude::{CheckoutConfig, CheckoutPage, CheckoutView, Navigator, Route};
use leptos::prelude::*;

use crate::Shell;

mod form;
mod summary;

#[component]
fn EmptyCart(catalog: Route, shell: Shell) -> impl IntoView {
    view! {
        <section class="checkout-empty">
            <h2 class="panel-title">"Your cart is empty"</h2>
            <p>"Add some products before checking out."</p>
            <button
                type="button"
                class="button-primary"
                on:click=move |_| shell.navigator().go_to(&catalog)
            >
                "Browse products"
            </button>
        </section>
    }
}

/// The checkout page, opened on a snapshot of the cart taken when the route is entered.
#[component]
pub fn CheckoutRoute(
    /// Store and checkout settings.
    config: Arc<CheckoutConfig>,

    /// App-wide state.
    shell: Shell,
) -> impl IntoView {
    match CheckoutPage::open(config, &shell.store()) {
        Ok(CheckoutView::EmptyCart { catalog }) => {
            view! { <EmptyCart catalog=catalog shell=shell /> }.into_any()
        }
        Ok(CheckoutView::Ready(page)) => {
            let pane = page.pane().clone();
            let page = Arc::new(page);

            view! {
                <div class="mx-auto grid max-w-5xl grid-cols-1 gap-6 md:grid-cols-2">
                    <form::ContactFormPanel page=page shell=shell />
                    <summary::SummaryPanel pane=pane />
                </div>
            }
            .into_any()
        }
        Err(error) => view! {
            <div class="mx-auto max-w-3xl rounded-lg border border-red-200 bg-red-50 p-4">
                <p class="text-sm text-red-700">{error.to_string()}</p>
            </div>
        }
        .into_any(),
    }
}
