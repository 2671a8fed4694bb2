//! Storefront Checkout Example
//!
//! Walks the seeded storefront end to end: signs in as the default customer,
//! fills a cart from the catalog, prices a discount code, and places an
//! order.

use anyhow::Result;

use vitrine_app::{context::AppContext, domain::identity::models::Address};

pub fn main() -> Result<()> {
    let app = AppContext::in_memory()?;

    let user = app.identity.login("customer@example.com", "password")?;
    println!("signed in as {} {}", user.first_name, user.last_name);

    let products = app.catalog.list_products()?;

    println!("\ncatalog:");
    for product in &products {
        println!("  {:>10}  {}", product.price, product.name);
    }

    app.carts.add_to_cart(&products[0], 1)?;
    app.carts.add_to_cart(&products[1], 2)?;

    let total = app.carts.total_price()?;
    let items = app.carts.total_items()?;

    println!("\ncart: {items} items, total {total}");
    println!(
        "with WELCOME10: {}",
        app.catalog.apply_discount("WELCOME10", total)
    );

    let order_uuid = app.carts.create_order(
        Address {
            street: "1 Jewelers Row".to_string(),
            city: "Philadelphia".to_string(),
            state: "PA".to_string(),
            zip_code: "19107".to_string(),
            country: "US".to_string(),
        },
        "card",
    )?;

    println!("\nplaced order {order_uuid}");

    for order in app.carts.user_orders()? {
        println!(
            "order {}: {} items, total {}, status {}",
            order.uuid,
            order.items.len(),
            order.total,
            order.status.to_str(),
        );
    }

    Ok(())
}
