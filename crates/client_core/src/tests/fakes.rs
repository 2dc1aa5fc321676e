use async_trait::async_trait;
use shared::domain::{MenuCatalog, MenuItem, ModelAssets};

use crate::{
    ar::{ArPresenter, ModelViewer, ViewerSources},
    error::CatalogFetchError,
    loader::CatalogSource,
};

#[derive(Debug, Default)]
pub struct RecordingViewer {
    pub sources: Option<ViewerSources>,
    pub set_calls: Vec<ViewerSources>,
    pub clear_calls: usize,
    pub ar_capable: bool,
    pub activations: usize,
}

impl RecordingViewer {
    pub fn ar_capable() -> Self {
        Self {
            ar_capable: true,
            ..Self::default()
        }
    }

    pub fn src(&self) -> Option<&str> {
        self.sources.as_ref().map(|s| s.src.as_str())
    }
}

impl ModelViewer for RecordingViewer {
    fn set_sources(&mut self, sources: &ViewerSources) {
        self.sources = Some(sources.clone());
        self.set_calls.push(sources.clone());
    }

    fn clear_sources(&mut self) {
        self.sources = None;
        self.clear_calls += 1;
    }

    fn can_activate_ar(&self) -> bool {
        self.ar_capable
    }

    fn activate_ar(&mut self) {
        self.activations += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub overlay_visible: bool,
    pub loading_visible: bool,
    pub loading_changes: Vec<bool>,
    pub alerts: Vec<String>,
}

impl ArPresenter for RecordingPresenter {
    fn show_overlay(&mut self) {
        self.overlay_visible = true;
    }

    fn hide_overlay(&mut self) {
        self.overlay_visible = false;
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.loading_visible = visible;
        self.loading_changes.push(visible);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

pub struct FixedCatalog(pub Option<MenuCatalog>);

#[async_trait]
impl CatalogSource for FixedCatalog {
    async fn fetch_catalog(&self) -> Result<MenuCatalog, CatalogFetchError> {
        self.0
            .clone()
            .ok_or(CatalogFetchError::Status { status: 500 })
    }

    fn describe(&self) -> String {
        "fixed".to_string()
    }
}

pub fn item(name: &str, glb: Option<&str>, usdz: Option<&str>) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        desc: format!("{name} description"),
        price: 9.5,
        currency: "USD".to_string(),
        thumbnail: Some(format!("/img/{name}.jpg")),
        model: Some(ModelAssets {
            glb: glb.map(str::to_string),
            usdz: usdz.map(str::to_string),
        }),
    }
}

pub fn sample_catalog() -> MenuCatalog {
    MenuCatalog::from_json_str(
        r#"{
            "Starters": [
                { "name": "Bruschetta", "desc": "Tomato and basil", "price": 6.5, "currency": "USD",
                  "thumbnail": "/img/bruschetta.jpg",
                  "model": { "glb": "/models/bruschetta.glb", "usdz": "/models/bruschetta.usdz" } },
                { "name": "Olives", "desc": "Marinated", "price": 4, "currency": "USD" }
            ],
            "Mains": [
                { "name": "Burger", "desc": "Beef patty", "price": 12, "currency": "USD",
                  "thumbnail": "/img/burger.jpg",
                  "model": { "glb": "/models/burger.glb", "usdz": "/models/burger.usdz" } }
            ],
            "Desserts": []
        }"#,
    )
    .expect("sample catalog")
}
