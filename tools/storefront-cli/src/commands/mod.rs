//! CLI command implementations.

pub mod cart;
pub mod products;
pub mod recent;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: Option<ProductsCommand>,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List all products.
    List,
    /// Show a product's details and record the view.
    Show {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines and totals.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product ID.
        id: String,
        /// Color (may be omitted for products without color options).
        #[arg(long)]
        color: Option<String>,
        /// Size (may be omitted when the color has no sizes).
        #[arg(long)]
        size: Option<String>,
    },
    /// Set the quantity of a cart line.
    Update {
        /// Cart line ID, as shown by `cart show`.
        line: String,
        /// New quantity (at least 1).
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a cart line.
    Remove {
        /// Cart line ID.
        line: String,
    },
    /// Remove every line.
    Clear,
}

/// Arguments for the recent command.
#[derive(Args)]
pub struct RecentArgs {
    /// Leave this product out of the list.
    #[arg(short, long)]
    pub exclude: Option<String>,
}
