//! Cart state shared between a header badge and a drawer.
//!
//! Run with `RUST_LOG=mango_store=trace` to see every delivery.

use std::cell::Cell;
use std::rc::Rc;

use mango_store::{Store, StoreError, Subscriber};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone, Debug)]
struct LineItem {
    title: String,
    quantity: u32,
}

#[derive(Clone, Debug, Default)]
struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    fn count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

struct CartBadge {
    rendered: Cell<u32>,
}

impl Subscriber for CartBadge {
    fn name(&self) -> String {
        "cart-badge".to_string()
    }
}

struct CartDrawer {
    open: Cell<bool>,
}

impl Subscriber for CartDrawer {
    fn name(&self) -> String {
        "cart-drawer".to_string()
    }
}

fn main() -> Result<(), StoreError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();

    println!("=== Cart Badge ===\n");

    let cart = Store::with_label("cart", Cart::default());
    let badge = Rc::new(CartBadge {
        rendered: Cell::new(0),
    });
    let drawer = Rc::new(CartDrawer {
        open: Cell::new(false),
    });

    cart.subscribe(
        |badge: &CartBadge, cart: &Cart| {
            badge.rendered.set(cart.count());
            println!("badge: {} item(s)", cart.count());
        },
        &badge,
    )?;
    cart.subscribe(
        |drawer: &CartDrawer, cart: &Cart| {
            drawer.open.set(!cart.items.is_empty());
            let titles: Vec<_> = cart.items.iter().map(|item| item.title.as_str()).collect();
            println!("drawer open: {} {:?}", drawer.open.get(), titles);
        },
        &drawer,
    )?;

    println!("Adding a product...");
    cart.update(|cart| {
        cart.items.push(LineItem {
            title: "Linen shirt".to_string(),
            quantity: 2,
        });
    })?;

    println!("\nClearing the cart...");
    cart.value().set(Cart::default())?;

    println!("\nFinal state: {:#?}", cart.get());
    println!("Badge shows {}", badge.rendered.get());
    Ok(())
}
