//! Cart commands.

use anyhow::{bail, Result};
use serde::Serialize;
use storefront_cache::Storage;
use storefront_commerce::cart::{CartAggregator, CartLine};
use storefront_commerce::catalog::{Product, DEFAULT_COLOR};
use storefront_commerce::ids::{LineId, ProductId};
use storefront_commerce::selection::Selection;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CartCommand::Show) | None => show_cart(ctx),
        Some(CartCommand::Add { id, color, size }) => {
            add_item(&id, color.as_deref(), size.as_deref(), ctx)
        }
        Some(CartCommand::Update { line, quantity }) => update_line(&line, quantity, ctx),
        Some(CartCommand::Remove { line }) => remove_line(&line, ctx),
        Some(CartCommand::Clear) => clear_cart(ctx),
    }
}

/// Build the selection for `product` from the command line flags.
///
/// Products without color options take the default color when none is
/// given. A color the product does not offer is rejected here; a missing
/// color or size is left for selection validation to report.
fn selection_for(product: &Product, color: Option<&str>, size: Option<&str>) -> Result<Selection> {
    let color = match color {
        Some(c) => c,
        None if !product.has_variants() => DEFAULT_COLOR,
        None => "",
    };

    if !color.is_empty() && product.sizes_for(color).is_none() {
        bail!(
            "{} is not available in {} (choose from: {})",
            product.name,
            color,
            product.colors().join(", ")
        );
    }

    let mut selection = Selection::new();
    selection.select_color(color);
    if let Some(size) = size {
        selection.select_size(size);
    }
    Ok(selection)
}

fn add_item(id: &str, color: Option<&str>, size: Option<&str>, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.get(&ProductId::new(id))?;
    let mut selection = selection_for(product, color, size)?;

    let mut session = ctx.session()?;
    let line_id = session.add_selection(product, &mut selection)?;
    let cart = session.cart();

    if ctx.output.is_json() {
        ctx.output.json(&cart.get_line(&line_id));
        return Ok(());
    }

    if let Some(line) = cart.get_line(&line_id) {
        ctx.output.success(&format!(
            "Added {} ({}, {}) to cart, quantity {}",
            line.name, line.color, line.size, line.quantity
        ));
    }
    ctx.output.kv("Line", line_id.as_str());
    ctx.output.kv("Cart total", &format!("${}", cart.total_price()));
    Ok(())
}

fn update_line(line: &str, quantity: i64, ctx: &Context) -> Result<()> {
    if quantity < 1 {
        bail!("Quantity must be at least 1; use `storefront cart remove {}` to drop the line", line);
    }

    let mut session = ctx.session()?;
    let line_id = LineId::new(line);
    if !session.cart_mut().update_quantity(&line_id, quantity) {
        bail!("Cart line '{}' not found", line);
    }

    ctx.output.success(&format!("Set {} to quantity {}", line_id, quantity));
    summarize(session.cart(), ctx);
    Ok(())
}

fn remove_line(line: &str, ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    let line_id = LineId::new(line);
    if !session.cart_mut().remove_from_cart(&line_id) {
        bail!("Cart line '{}' not found", line);
    }

    ctx.output.success(&format!("Removed {}", line_id));
    summarize(session.cart(), ctx);
    Ok(())
}

fn clear_cart(ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    session.cart_mut().clear_cart();
    ctx.output.success("Cart cleared");
    summarize(session.cart(), ctx);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView<'a> {
    lines: &'a [CartLine],
    total_items: i64,
    total_price: String,
}

impl<'a> CartView<'a> {
    fn of<S: Storage>(cart: &'a CartAggregator<S>) -> Self {
        let totals = cart.totals();
        Self {
            lines: cart.lines(),
            total_items: totals.items,
            total_price: totals.price_string(),
        }
    }
}

fn summarize<S: Storage>(cart: &CartAggregator<S>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&CartView::of(cart));
        return;
    }
    ctx.output.kv("Items", &cart.total_items().to_string());
    ctx.output.kv("Total", &format!("${}", cart.total_price()));
}

fn show_cart(ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    let cart = session.cart();

    if ctx.output.is_json() {
        ctx.output.json(&CartView::of(cart));
        return Ok(());
    }

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        ctx.output.info("Run `storefront cart add <id> --color <color> --size <size>` to add a product.");
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({})", session.id()));
    let widths = [22, 24, 8, 9, 4, 10, 10];
    ctx.output.table_row(
        &["LINE", "PRODUCT", "COLOR", "SIZE", "QTY", "PRICE", "TOTAL"],
        &widths,
    );

    for line in cart.lines() {
        let name = truncate(&line.name, widths[1]);
        let quantity = line.quantity.to_string();
        let price = line.price.display();
        let total = line.line_total().display();
        ctx.output.table_row(
            &[
                line.id.as_str(),
                &name,
                &line.color,
                &line.size,
                &quantity,
                &price,
                &total,
            ],
            &widths,
        );
        ctx.output.debug(&format!(
            "{} added {}",
            line.id,
            line.added_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    ctx.output.info("");
    summarize(cart, ctx);
    Ok(())
}
