//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use storefront_cache::{FileStore, SessionId};
use storefront_commerce::catalog::Catalog;
use storefront_commerce::StorefrontSession;
use tracing::debug;

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// The configured catalog, or the built-in sample catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        let Some(path) = &self.config.catalog.path else {
            return Ok(Catalog::seed());
        };

        let path = self.resolve_path(path);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        Catalog::from_json(&content)
            .with_context(|| format!("Invalid catalog: {}", path.display()))
    }

    /// Open the configured session against the state file.
    pub fn session(&self) -> Result<StorefrontSession<FileStore>> {
        let path = self.resolve_path(&self.config.storage.path);
        let store = FileStore::open(&path).with_context(|| {
            format!(
                "Failed to open state file {} (delete it to start over)",
                path.display()
            )
        })?;

        let id = SessionId::new(self.config.session.id.as_str());
        debug!(session = %id, state = %path.display(), "opening session");
        Ok(StorefrontSession::start(Arc::new(store), id)
            .with_recent_capacity(self.config.recently_viewed.capacity))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn context_in(cwd: &Path, config: CliConfig) -> Context {
        Context {
            config,
            output: Output::new(false, true),
            cwd: cwd.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("storefront.toml"), "[session]\nid = \"parent\"\n").unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = Context::find_config(&nested).unwrap();
        assert_eq!(config.session.id, "parent");
    }

    #[test]
    fn test_resolve_path() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), CliConfig::default());
        assert_eq!(
            ctx.resolve_path(Path::new("state.json")),
            dir.path().join("state.json")
        );
        assert_eq!(ctx.resolve_path(Path::new("/tmp/x")), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("products.json"),
            r#"[{"id": 1, "name": "Mug", "price": "12.50"}]"#,
        )
        .unwrap();

        let mut config = CliConfig::default();
        config.catalog.path = Some(PathBuf::from("products.json"));
        let ctx = context_in(dir.path(), config);

        let catalog = ctx.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.list()[0].price.display(), "$12.50");
    }

    #[test]
    fn test_session_persists_in_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), CliConfig::default());
        let catalog = ctx.catalog().unwrap();
        let backpack = catalog.list()[5].clone();

        let mut session = ctx.session().unwrap();
        session.cart_mut().add_to_cart(&backpack, "Gray", "");
        session.end();

        assert!(dir.path().join(".storefront").join("state.json").exists());
        assert_eq!(ctx.session().unwrap().cart().total_items(), 1);
    }
}
