//! Recently viewed products.

use anyhow::Result;
use storefront_commerce::ids::ProductId;
use storefront_commerce::recent::RecentlyViewedEntry;

use super::RecentArgs;
use crate::context::Context;
use crate::output::Output;

/// Run the recent command.
pub fn run(args: RecentArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    let recent = session.recently_viewed();
    let entries = match &args.exclude {
        Some(id) => recent.list_excluding(&ProductId::new(id)),
        None => recent.list(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&entries);
        return Ok(());
    }

    if entries.is_empty() {
        ctx.output.info("Nothing viewed yet.");
        ctx.output.info("Run `storefront products show <id>` to view a product.");
        return Ok(());
    }

    ctx.output.header("Recently viewed");
    print_entries(&ctx.output, &entries);
    Ok(())
}

/// One line per entry: name, price and id.
pub fn print_entries(output: &Output, entries: &[RecentlyViewedEntry]) {
    for entry in entries {
        output.list_item(&format!(
            "{} {} (#{})",
            entry.name,
            entry.price.display(),
            entry.id
        ));
    }
}
