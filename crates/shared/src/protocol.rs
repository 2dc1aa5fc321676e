use serde::{Deserialize, Serialize};

pub const MENU_DOCUMENT_PATH: &str = "/menu.json";
pub const HEALTH_PATH: &str = "/health";
pub const INDEX_DOCUMENT: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
