use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogParseError {
    #[error("menu document is not valid JSON for a catalog: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogParseError {
    /// Line and column of the offending token, when serde reported one.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            CatalogParseError::Json(err) if err.line() > 0 => Some((err.line(), err.column())),
            CatalogParseError::Json(_) => None,
        }
    }
}
