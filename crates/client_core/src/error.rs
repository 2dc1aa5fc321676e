use shared::error::CatalogParseError;
use thiserror::Error;

/// Message shown in the category area when the catalog cannot be loaded.
pub const CATALOG_UNAVAILABLE_MESSAGE: &str = "Failed to load menu. Please try again later.";
pub const MODEL_UNAVAILABLE_MESSAGE: &str = "Sorry, the 3D model for this item is not available.";
pub const VIEWER_LOAD_FAILED_MESSAGE: &str = "Sorry, the 3D model could not be loaded.";
pub const AR_SESSION_FAILED_MESSAGE: &str = "Sorry, AR could not be started on this device.";
pub const IOS_AR_UNAVAILABLE_MESSAGE: &str =
    "AR is not available for this item on this device. Showing the 3D preview instead.";

#[derive(Debug, Error)]
pub enum CatalogFetchError {
    #[error("invalid menu url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("menu request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("menu request returned HTTP {status}")]
    Status { status: u16 },
    #[error("failed to read menu document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Malformed(#[from] CatalogParseError),
}

impl From<reqwest::Error> for CatalogFetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => CatalogFetchError::Status {
                status: status.as_u16(),
            },
            None => CatalogFetchError::Network(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArError {
    #[error("menu item '{item}' has no glb model")]
    MissingModel { item: String },
    #[error("viewer failed to load {src}: {message}")]
    ViewerLoad { src: String, message: String },
    #[error("AR session failed to start")]
    SessionFailed,
}

impl ArError {
    /// Text surfaced to the customer through the page alert.
    pub fn user_message(&self) -> &'static str {
        match self {
            ArError::MissingModel { .. } => MODEL_UNAVAILABLE_MESSAGE,
            ArError::ViewerLoad { .. } => VIEWER_LOAD_FAILED_MESSAGE,
            ArError::SessionFailed => AR_SESSION_FAILED_MESSAGE,
        }
    }
}

/// Item data bound to a card could not be decoded back into a menu item.
#[derive(Debug, Error)]
#[error("malformed item data on card: {0}")]
pub struct MalformedItemData(#[from] pub serde_json::Error);
