//! Product list and detail routes.

use std::sync::Arc;

use http::header::{HeaderValue, ALLOW, CACHE_CONTROL, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use storefront_commerce::catalog::Catalog;
use storefront_commerce::ids::ProductId;
use tracing::{debug, warn};

use crate::{ApiError, CachePolicy};

/// Which product route a path selects.
#[derive(Debug, PartialEq, Eq)]
enum Route<'a> {
    List,
    Detail(&'a str),
}

impl<'a> Route<'a> {
    fn parse(path: &'a str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        let rest = path.strip_prefix("/products")?;
        if rest.is_empty() {
            return Some(Self::List);
        }
        match rest.strip_prefix('/') {
            Some(id) if !id.is_empty() && !id.contains('/') => Some(Self::Detail(id)),
            _ => None,
        }
    }
}

/// Serves `GET /products` and `GET /products/{id}` from a catalog.
#[derive(Debug, Clone)]
pub struct ProductRoutes {
    catalog: Arc<Catalog>,
    policy: CachePolicy,
}

impl ProductRoutes {
    /// Serve `catalog` with [`CachePolicy::catalog`].
    pub fn new(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self {
            catalog: catalog.into(),
            policy: CachePolicy::catalog(),
        }
    }

    /// Use a different cache policy for successful responses.
    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Answer a request. Every response is JSON, errors included.
    pub fn handle<B>(&self, request: &Request<B>) -> Response<String> {
        let path = request.uri().path();
        let response = match self.dispatch(request.method(), path) {
            Ok(body) => self.ok(body),
            Err(e) => {
                if let ApiError::Serialize(inner) = &e {
                    warn!(path, error = %inner, "failed to serialize response");
                }
                error_response(&e)
            }
        };

        debug!(method = %request.method(), path, status = response.status().as_u16(), "handled request");
        response
    }

    fn dispatch(&self, method: &Method, path: &str) -> Result<String, ApiError> {
        let route = Route::parse(path).ok_or(ApiError::RouteNotFound)?;
        if *method != Method::GET {
            return Err(ApiError::MethodNotAllowed);
        }

        match route {
            Route::List => Ok(serde_json::to_string(self.catalog.list())?),
            Route::Detail(id) => {
                let product = self
                    .catalog
                    .find_by_id(&ProductId::new(id))
                    .ok_or(ApiError::ProductNotFound)?;
                Ok(serde_json::to_string(product)?)
            }
        }
    }

    fn ok(&self, body: String) -> Response<String> {
        let mut response = Response::new(body);
        response.headers_mut().insert(CONTENT_TYPE, json_content_type());
        match HeaderValue::from_str(&self.policy.cache_control_header()) {
            Ok(value) => {
                response.headers_mut().insert(CACHE_CONTROL, value);
            }
            Err(e) => warn!(error = %e, "invalid cache-control value"),
        }
        response
    }
}

fn json_content_type() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

fn error_response(error: &ApiError) -> Response<String> {
    let mut response = Response::new(error.body());
    *response.status_mut() = error.status();
    response.headers_mut().insert(CONTENT_TYPE, json_content_type());
    if error.status() == StatusCode::METHOD_NOT_ALLOWED {
        response
            .headers_mut()
            .insert(ALLOW, HeaderValue::from_static("GET"));
    }
    response
}
