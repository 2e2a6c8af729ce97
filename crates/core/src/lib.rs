//! Checkout
//!
//! Checkout is the order hand-off stage of a storefront: it snapshots the cart, validates the
//! buyer's contact and delivery details, composes a plain-text order summary and dispatches it
//! through a messaging deep link.

pub mod cart;
pub mod collaborators;
pub mod config;
pub mod contact;
pub mod deep_link;
pub mod fixtures;
pub mod items;
pub mod page;
pub mod prelude;
pub mod pricing;
pub mod summary;
pub mod validation;
