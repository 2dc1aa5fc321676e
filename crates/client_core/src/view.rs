use shared::domain::MenuCatalog;
use tracing::{debug, info};

use crate::{
    grid::{render_grid, GridView},
    preload::{ModelPreloader, ResourceHints},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Category selection.
    #[default]
    Welcome,
    Menu { category: String },
}

#[derive(Debug, Default)]
pub struct ViewController {
    state: ViewState,
    grid: Option<GridView>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Grid of the category on screen; `None` on the welcome view.
    pub fn grid(&self) -> Option<&GridView> {
        self.grid.as_ref()
    }

    pub fn select_category<H: ResourceHints>(
        &mut self,
        catalog: &MenuCatalog,
        category: &str,
        preloader: &mut ModelPreloader<H>,
    ) -> &GridView {
        let items = catalog.items(category);
        if let Some(items) = items {
            preloader.preload_first(items);
        }

        let grid = render_grid(items);
        info!(
            %category,
            cards = grid.cards().len(),
            "showing menu view"
        );
        self.state = ViewState::Menu {
            category: category.to_string(),
        };
        self.grid.insert(grid)
    }

    pub fn back(&mut self) -> bool {
        if self.state == ViewState::Welcome {
            return false;
        }
        debug!("returning to welcome view");
        self.state = ViewState::Welcome;
        self.grid = None;
        true
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
