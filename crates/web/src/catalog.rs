use std::sync::Arc;

use checkout::prelude::{Cart, CartError, CartItem, format_price};
use leptos::prelude::*;

/// Add one catalog item to the cart, merging with an existing line.
fn add_to_cart(cart: RwSignal<Cart>, item: &CartItem) -> Result<(), CartError> {
    cart.try_update(|cart| cart.add(item.clone()))
        .unwrap_or(Ok(()))
}

#[component]
fn CatalogRow(item: CartItem, cart: RwSignal<Cart>) -> impl IntoView {
    let name = item.name().to_string();
    let image = item.image().to_string();
    let price = format_price(item.unit_price());
    let add_button_label = format!("Add {name} ({price}) to cart");

    view! {
        <li class="catalog-row">
            <img class="catalog-image" src=image alt=name.clone() />
            <span class="catalog-name">{name}</span>
            <span class="catalog-price">{price}</span>
            <button
                type="button"
                class="catalog-add"
                aria-label=add_button_label
                on:click=move |_| {
                    if let Err(error) = add_to_cart(cart, &item) {
                        leptos::logging::warn!("failed to add item to cart: {error}");
                    }
                }
            >
                "Add to cart"
            </button>
        </li>
    }
}

/// Product list with add-to-cart buttons.
#[component]
pub fn CatalogPanel(
    /// Products, in display order.
    items: Arc<Vec<CartItem>>,

    /// Cart the buttons add to.
    cart: RwSignal<Cart>,
) -> impl IntoView {
    view! {
        <section class="catalog-panel">
            <h2 class="panel-title">"Products"</h2>
            <ul class="catalog-list">
                {items
                    .iter()
                    .cloned()
                    .map(|item| view! { <CatalogRow item=item cart=cart /> })
                    .collect_view()}
            </ul>
        </section>
    }
}
