//! API error types.

use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Errors a product route can answer with.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The path matched a product route but no product has that id.
    #[error("Product not found")]
    ProductNotFound,

    /// No route matches the path.
    #[error("Not found")]
    RouteNotFound,

    /// The route exists but does not accept the method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The response body could not be produced.
    #[error("Internal server error")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ProductNotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body, e.g. `{"error":"Product not found"}`.
    pub fn body(&self) -> String {
        let message = self.to_string();
        serde_json::to_string(&ErrorBody { error: &message })
            .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", message))
    }
}
