use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::MenuCatalog, protocol::MENU_DOCUMENT_PATH};
use tracing::{debug, info};
use url::Url;

use crate::error::CatalogFetchError;

/// Where the menu document comes from. The catalog is fetched exactly once per load.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<MenuCatalog, CatalogFetchError>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    http: Client,
    menu_url: Url,
}

impl HttpCatalogSource {
    pub fn new(server_url: &str) -> Result<Self, CatalogFetchError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, CatalogFetchError> {
        let base = Url::parse(server_url)?;
        let menu_url = base.join(MENU_DOCUMENT_PATH)?;
        Ok(Self { http, menu_url })
    }

    pub fn menu_url(&self) -> &Url {
        &self.menu_url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> Result<MenuCatalog, CatalogFetchError> {
        debug!(url = %self.menu_url, "fetching menu document");
        let body = self
            .http
            .get(self.menu_url.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let catalog = MenuCatalog::from_json_slice(&body)?;
        info!(
            url = %self.menu_url,
            categories = catalog.categories().len(),
            items = catalog.item_count(),
            "menu loaded"
        );
        Ok(catalog)
    }

    fn describe(&self) -> String {
        self.menu_url.to_string()
    }
}

/// Reads a menu document from disk; used for offline validation.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_catalog(&self) -> Result<MenuCatalog, CatalogFetchError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| CatalogFetchError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(MenuCatalog::from_json_slice(&raw)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
