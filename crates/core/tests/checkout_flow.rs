//! Integration tests for the checkout hand-off.
//!
//! The collaborators are mocked so the order of side effects can be asserted: the link is opened
//! first, then the buyer is notified, then the cart is cleared exactly once, then the router goes
//! home.

use std::{num::NonZeroU32, sync::Arc};

use mockall::{Sequence, predicate::eq};
use rusty_money::{Money, iso};
use testresult::TestResult;

use checkout::{
    collaborators::{MockCartStore, MockLinkOpener, MockNavigator, MockNotifier},
    prelude::*,
};

fn config() -> TestResult<Arc<CheckoutConfig>> {
    Ok(Arc::new(CheckoutConfig::from_yaml(include_str!(
        "../../../fixtures/checkout/demo.yml"
    ))?))
}

fn cart() -> TestResult<Cart> {
    Ok(ItemsFixture::from_yaml(include_str!("../../../fixtures/cart/demo.yml"))?.into_cart(iso::INR)?)
}

fn form() -> ContactForm {
    ContactForm {
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        address: "12 Lake Road, Koregaon Park".to_string(),
        city: "Pune".to_string(),
        pincode: "411001".to_string(),
        message: String::new(),
    }
}

fn ready(config: Arc<CheckoutConfig>, store: &dyn CartStore) -> TestResult<CheckoutPage> {
    match CheckoutPage::open(config, store)? {
        CheckoutView::Ready(page) => Ok(page),
        CheckoutView::EmptyCart { .. } => Err("expected a checkout form".into()),
    }
}

#[test]
fn submit_runs_side_effects_in_order() -> TestResult {
    let config = config()?;
    let snapshot = cart()?;
    let mut seq = Sequence::new();

    let mut store = MockCartStore::new();
    store.expect_snapshot().once().return_const(snapshot);

    let page = ready(Arc::clone(&config), &store)?;

    let mut links = MockLinkOpener::new();
    links
        .expect_open()
        .once()
        .in_sequence(&mut seq)
        .withf(|url| url.as_str().starts_with("https://wa.me/919876543210?text="))
        .returning(|_| Ok(()));

    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .once()
        .in_sequence(&mut seq)
        .withf(|toast| toast.kind == NotificationKind::Success && toast.title == "Order sent!")
        .return_const(());

    store.expect_clear().once().in_sequence(&mut seq).return_const(());

    let mut navigator = MockNavigator::new();
    navigator
        .expect_go_to()
        .once()
        .in_sequence(&mut seq)
        .with(eq(config.home.clone()))
        .return_const(());
    navigator.expect_back().never();

    let submitted = page.submit(
        &form(),
        Collaborators {
            cart: &mut store,
            navigator: &navigator,
            notifier: &notifier,
            links: &links,
        },
    )?;

    assert!(
        submitted
            .summary
            .as_str()
            .starts_with("*New Order from Loom & Thread*")
    );

    Ok(())
}

#[test]
fn invalid_submit_touches_nothing() -> TestResult {
    let mut store = MockCartStore::new();
    store.expect_snapshot().once().return_const(cart()?);
    store.expect_clear().never();

    let page = ready(config()?, &store)?;

    let mut links = MockLinkOpener::new();
    links.expect_open().never();

    let mut notifier = MockNotifier::new();
    notifier.expect_notify().never();

    let mut navigator = MockNavigator::new();
    navigator.expect_go_to().never();
    navigator.expect_back().never();

    let mut bad = form();
    bad.address = "Short".to_string();
    bad.email = "not-an-email".to_string();

    let result = page.submit(
        &bad,
        Collaborators {
            cart: &mut store,
            navigator: &navigator,
            notifier: &notifier,
            links: &links,
        },
    );

    let Err(CheckoutError::Validation(errors)) = result else {
        return Err("expected validation errors".into());
    };

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.first(Field::Email), Some("Invalid email address"));
    assert_eq!(
        errors.first(Field::Address),
        Some("Please enter a complete address")
    );

    Ok(())
}

#[test]
fn blocked_link_skips_clear_and_redirect() -> TestResult {
    let mut store = MockCartStore::new();
    store.expect_snapshot().once().return_const(cart()?);
    store.expect_clear().never();

    let page = ready(config()?, &store)?;

    let mut links = MockLinkOpener::new();
    links
        .expect_open()
        .once()
        .returning(|_| Err(OpenLinkError::Blocked));

    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .once()
        .withf(|toast| toast.kind == NotificationKind::Error)
        .return_const(());

    let mut navigator = MockNavigator::new();
    navigator.expect_go_to().never();

    let result = page.submit(
        &form(),
        Collaborators {
            cart: &mut store,
            navigator: &navigator,
            notifier: &notifier,
            links: &links,
        },
    );

    assert_eq!(
        result,
        Err(CheckoutError::LinkNotOpened(OpenLinkError::Blocked))
    );

    Ok(())
}

#[test]
fn empty_cart_never_offers_a_form() -> TestResult {
    let mut store = MockCartStore::new();
    store
        .expect_snapshot()
        .once()
        .return_const(Cart::new(iso::INR));

    let view = CheckoutPage::open(config()?, &store)?;

    assert!(matches!(
        view,
        CheckoutView::EmptyCart { catalog } if catalog == Route::new("/products")
    ));

    Ok(())
}

#[test]
fn summary_lists_every_item_once_in_cart_order() -> TestResult {
    let config = config()?;
    let mut store = MemoryCartStore::new(cart()?);
    let page = ready(Arc::clone(&config), &store)?;
    let navigator = MemoryNavigator::new(Route::new("/checkout"));

    let mut links = MockLinkOpener::new();
    links.expect_open().returning(|_| Ok(()));

    let mut notifier = MockNotifier::new();
    notifier.expect_notify().return_const(());

    let submitted = page.submit(
        &form(),
        Collaborators {
            cart: &mut store,
            navigator: &navigator,
            notifier: &notifier,
            links: &links,
        },
    )?;

    let text = submitted.summary.as_str();
    let mut previous = 0;

    for line in &page.pane().lines {
        let entry = format!("{} x {} - {}", line.name, line.quantity, line.line_total);

        assert_eq!(text.matches(&entry).count(), 1, "{entry}");

        let position = text.find(&entry).ok_or("entry missing")?;
        assert!(position > previous, "{entry} out of order");
        previous = position;
    }

    assert!(text.ends_with(&format!("*Total: {}*", page.pane().total)));
    assert!(!text.contains("Additional Notes"));
    assert!(store.snapshot().is_empty());
    assert_eq!(navigator.current(), Some(config.home.clone()));

    Ok(())
}

#[test]
fn pane_total_matches_price_times_quantity() -> TestResult {
    let three = NonZeroU32::new(3).ok_or("three")?;
    let seven = NonZeroU32::new(7).ok_or("seven")?;

    let items = vec![
        CartItem::new("a", "A", Money::from_minor(12_345, iso::INR), three, ""),
        CartItem::new("b", "B", Money::from_minor(99_999, iso::INR), seven, ""),
        CartItem::new("c", "C", Money::from_minor(50, iso::INR), NonZeroU32::MIN, ""),
    ];

    let expected: i64 = items
        .iter()
        .map(|item| item.unit_price().to_minor_units() * i64::from(item.quantity().get()))
        .sum();

    let store = MemoryCartStore::new(Cart::with_items(items, iso::INR)?);
    let page = ready(config()?, &store)?;

    assert_eq!(
        page.pane().total,
        format_price(&Money::from_minor(expected, iso::INR))
    );
    assert_eq!(page.cart().total()?.to_minor_units(), expected);

    Ok(())
}
