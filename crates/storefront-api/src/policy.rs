//! Cache-Control policies for catalog responses.

use std::time::Duration;

/// How long a stale response may be served while it is refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revalidate {
    /// Bare `stale-while-revalidate`, leaving the window to the CDN.
    Unbounded,
    /// `stale-while-revalidate=<secs>`.
    Window(Duration),
}

/// Shared-cache policy for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// `s-maxage`; `None` disables caching.
    pub shared_max_age: Option<Duration>,
    pub stale_while_revalidate: Option<Revalidate>,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::catalog()
    }
}

impl CachePolicy {
    /// No caching.
    pub fn none() -> Self {
        Self {
            shared_max_age: None,
            stale_while_revalidate: None,
        }
    }

    /// Cacheable by shared caches (CDN) for `ttl`.
    pub fn shared(ttl: Duration) -> Self {
        Self {
            shared_max_age: Some(ttl),
            stale_while_revalidate: None,
        }
    }

    /// Catalog data: five minutes at the CDN, then served stale while
    /// revalidating.
    pub fn catalog() -> Self {
        Self::shared(Duration::from_secs(300)).with_swr(Revalidate::Unbounded)
    }

    /// Set the stale-while-revalidate behavior.
    pub fn with_swr(mut self, revalidate: Revalidate) -> Self {
        self.stale_while_revalidate = Some(revalidate);
        self
    }

    /// Generate the Cache-Control header value.
    pub fn cache_control_header(&self) -> String {
        let Some(ttl) = self.shared_max_age else {
            return "no-store".to_string();
        };

        let mut parts = vec![format!("s-maxage={}", ttl.as_secs())];
        match self.stale_while_revalidate {
            Some(Revalidate::Unbounded) => parts.push("stale-while-revalidate".to_string()),
            Some(Revalidate::Window(window)) => {
                parts.push(format!("stale-while-revalidate={}", window.as_secs()))
            }
            None => {}
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_policy_header() {
        assert_eq!(
            CachePolicy::catalog().cache_control_header(),
            "s-maxage=300, stale-while-revalidate"
        );
    }

    #[test]
    fn test_swr_window() {
        let policy = CachePolicy::shared(Duration::from_secs(60))
            .with_swr(Revalidate::Window(Duration::from_secs(30)));
        assert_eq!(
            policy.cache_control_header(),
            "s-maxage=60, stale-while-revalidate=30"
        );
    }

    #[test]
    fn test_no_cache() {
        assert_eq!(CachePolicy::none().cache_control_header(), "no-store");
        assert_eq!(
            CachePolicy::shared(Duration::from_secs(10)).cache_control_header(),
            "s-maxage=10"
        );
    }
}
