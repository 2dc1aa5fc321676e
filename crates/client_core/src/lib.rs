//! Headless core of the AR menu viewer.
//!
//! The page itself (DOM, `<model-viewer>`, resource hints) sits behind the
//! traits in [`ar`] and [`preload`]; [`MenuApp`] owns the application state
//! and wires the loader, the views and the AR launcher together.

use std::sync::Arc;

use shared::domain::MenuCatalog;
use tracing::{debug, error, warn};

pub mod ar;
pub mod error;
pub mod grid;
pub mod loader;
pub mod platform;
pub mod preload;
pub mod view;

pub use ar::{
    ArLauncher, ArPhase, ArPresenter, ArSessionState, ArStatus, ModelViewer, SessionId,
    ViewerEvent, ViewerSources,
};
pub use error::{ArError, CatalogFetchError, MalformedItemData, CATALOG_UNAVAILABLE_MESSAGE};
pub use grid::{Card, CardImage, GridView};
pub use loader::{CatalogSource, FileCatalogSource, HttpCatalogSource};
pub use platform::Platform;
pub use preload::{HintRegistry, HttpWarmupHints, ModelPreloader, PreloadKind, ResourceHints};
pub use view::{ViewController, ViewState};

/// Catalog lifecycle: loaded once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    #[default]
    Unloaded,
    Loaded(Arc<MenuCatalog>),
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryButton {
    pub name: String,
    pub item_count: usize,
}

/// Contents of the category navigation area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryNav {
    Loading,
    Buttons(Vec<CategoryButton>),
    Error { message: &'static str },
}

impl CategoryNav {
    pub fn buttons(&self) -> &[CategoryButton] {
        match self {
            CategoryNav::Buttons(buttons) => buttons,
            CategoryNav::Loading | CategoryNav::Error { .. } => &[],
        }
    }
}

/// Result of pressing "View in AR" on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArClick {
    Launched(SessionId),
    Rejected(ArError),
    /// No card at that position, or its bound data was unreadable.
    Ignored,
}

pub struct MenuApp<V, P, H> {
    catalog: CatalogState,
    view: ViewController,
    launcher: ArLauncher<V, P>,
    preloader: ModelPreloader<H>,
}

impl<V: ModelViewer, P: ArPresenter, H: ResourceHints> MenuApp<V, P, H> {
    pub fn new(launcher: ArLauncher<V, P>, preloader: ModelPreloader<H>) -> Self {
        Self {
            catalog: CatalogState::Unloaded,
            view: ViewController::new(),
            launcher,
            preloader,
        }
    }

    /// Fetches the menu once. Failures leave the app usable but empty.
    ///
    /// A repeated call acts as a page reload: the welcome view is restored and
    /// any AR session from the previous catalog is closed before fetching.
    pub async fn load(&mut self, source: &dyn CatalogSource) -> CategoryNav {
        self.view.back();
        self.launcher.close();
        self.catalog = CatalogState::Unloaded;
        self.catalog = match source.fetch_catalog().await {
            Ok(catalog) => CatalogState::Loaded(Arc::new(catalog)),
            Err(err) => {
                error!(source = %source.describe(), error = %err, "failed to load menu");
                CatalogState::Failed {
                    message: err.to_string(),
                }
            }
        };
        self.category_nav()
    }

    pub fn catalog_state(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn catalog(&self) -> Option<&Arc<MenuCatalog>> {
        match &self.catalog {
            CatalogState::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn category_nav(&self) -> CategoryNav {
        match &self.catalog {
            CatalogState::Unloaded => CategoryNav::Loading,
            CatalogState::Failed { .. } => CategoryNav::Error {
                message: CATALOG_UNAVAILABLE_MESSAGE,
            },
            CatalogState::Loaded(catalog) => CategoryNav::Buttons(
                catalog
                    .categories()
                    .iter()
                    .map(|category| CategoryButton {
                        name: category.name.clone(),
                        item_count: category.items.len(),
                    })
                    .collect(),
            ),
        }
    }

    pub fn view_state(&self) -> &ViewState {
        self.view.state()
    }

    pub fn grid(&self) -> Option<&GridView> {
        self.view.grid()
    }

    /// Switches to the menu view for `category`; `None` until a catalog is loaded.
    pub fn select_category(&mut self, category: &str) -> Option<&GridView> {
        let CatalogState::Loaded(catalog) = &self.catalog else {
            warn!(%category, "category selected before menu was loaded");
            return None;
        };
        Some(
            self.view
                .select_category(catalog, category, &mut self.preloader),
        )
    }

    pub fn back(&mut self) -> bool {
        self.view.back()
    }

    pub fn click_ar(&mut self, card_index: usize) -> ArClick {
        let Some(data) = self
            .view
            .grid()
            .and_then(|grid| grid.card(card_index))
            .map(|card| card.item_data.clone())
        else {
            debug!(card_index, "AR click outside of rendered cards");
            return ArClick::Ignored;
        };
        self.click_ar_with_data(&data)
    }

    /// Launches AR from the raw item data bound to a card.
    pub fn click_ar_with_data(&mut self, item_data: &str) -> ArClick {
        let item = match grid::decode_item_data(item_data) {
            Ok(item) => item,
            Err(err) => {
                error!(error = %err, "failed to parse item data");
                return ArClick::Ignored;
            }
        };
        match self.launcher.launch(item) {
            Ok(id) => ArClick::Launched(id),
            Err(err) => ArClick::Rejected(err),
        }
    }

    pub fn handle_viewer_event(&mut self, event: ViewerEvent) {
        self.launcher.handle_event(event);
    }

    pub fn cancel_ar(&mut self) -> bool {
        self.launcher.cancel()
    }

    pub fn close_ar(&mut self) -> bool {
        self.launcher.close()
    }

    pub fn launcher(&self) -> &ArLauncher<V, P> {
        &self.launcher
    }

    pub fn preloader(&self) -> &ModelPreloader<H> {
        &self.preloader
    }
}

#[cfg(test)]
#[path = "tests/fakes.rs"]
pub(crate) mod fakes;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
