//! HTTP boundary for the storefront catalog.
//!
//! Exposes the product list and product detail as JSON over plain
//! [`http`] types, so any server can mount [`ProductRoutes`]:
//!
//! ```rust
//! use storefront_api::ProductRoutes;
//! use storefront_commerce::catalog::Catalog;
//!
//! let routes = ProductRoutes::new(Catalog::seed());
//! let request = http::Request::get("/products/1").body(()).unwrap();
//! let response = routes.handle(&request);
//! assert_eq!(response.status(), http::StatusCode::OK);
//! ```

mod error;
mod policy;
mod routes;

pub use error::ApiError;
pub use policy::{CachePolicy, Revalidate};
pub use routes::ProductRoutes;
