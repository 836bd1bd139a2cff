//! Product catalog commands.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::catalog::{Catalog, Product};
use storefront_commerce::ids::ProductId;
use storefront_commerce::recent::RecentlyViewedEntry;

use super::{ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::{format_sizes, truncate};

/// Run the products command.
pub fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    match args.command {
        Some(ProductsCommand::List) | None => list_products(&catalog, ctx),
        Some(ProductsCommand::Show { id }) => show_product(&catalog, &id, ctx),
    }
}

fn list_products(catalog: &Catalog, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&catalog.list());
        return Ok(());
    }

    if catalog.is_empty() {
        ctx.output.info("The catalog is empty.");
        return Ok(());
    }

    ctx.output.header("Products");
    let widths = [4, 24, 10, 12];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "CATEGORY"], &widths);

    for product in catalog.list() {
        let name = truncate(&product.name, widths[1]);
        let price = product.price.display();
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &name,
                &price,
                product.category.as_deref().unwrap_or("-"),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} product(s)", catalog.len()));
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductView<'a> {
    product: &'a Product,
    recently_viewed: Vec<RecentlyViewedEntry>,
}

fn show_product(catalog: &Catalog, id: &str, ctx: &Context) -> Result<()> {
    let id = ProductId::new(id);
    let session = ctx.session()?;
    let product = session.view_product(catalog, &id)?;
    let recently_viewed = session.recently_viewed().list_excluding(&id);

    if ctx.output.is_json() {
        ctx.output.json(&ProductView {
            product,
            recently_viewed,
        });
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Price", &product.price.display());
    if let Some(category) = &product.category {
        ctx.output.kv("Category", category);
    }
    if !product.description.is_empty() {
        ctx.output.kv("Description", &product.description);
    }

    ctx.output.header("Options");
    for color in product.colors() {
        let sizes = product.sizes_for(color).unwrap_or(&[]);
        ctx.output.list_item(&format!("{}: {}", color, format_sizes(sizes)));
        if let Some(image) = product.image_for(color) {
            ctx.output.debug(&format!("{} image: {}", color, image));
        }
    }

    if !recently_viewed.is_empty() {
        ctx.output.header("Recently viewed");
        super::recent::print_entries(&ctx.output, &recently_viewed);
    }

    Ok(())
}
