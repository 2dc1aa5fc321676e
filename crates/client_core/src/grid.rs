//! Turns a category's items into display cards.

use shared::domain::MenuItem;
use tracing::warn;

use crate::error::MalformedItemData;

pub const NO_ITEMS_MESSAGE: &str = "No items available in this category.";
pub const AR_ACTION_LABEL: &str = "View in AR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardImage {
    Thumbnail { src: String, alt: String },
    /// Broken or missing thumbnail; the rest of the card still renders.
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub price_label: String,
    pub image: CardImage,
    pub action_label: &'static str,
    /// Serialized source item, read back when the AR action is clicked.
    pub item_data: String,
}

impl Card {
    pub fn decode_item(&self) -> Result<MenuItem, MalformedItemData> {
        decode_item_data(&self.item_data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridView {
    Cards(Vec<Card>),
    NoItems { message: &'static str },
}

impl GridView {
    pub fn cards(&self) -> &[Card] {
        match self {
            GridView::Cards(cards) => cards,
            GridView::NoItems { .. } => &[],
        }
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards().get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }
}

pub fn render_grid(items: Option<&[MenuItem]>) -> GridView {
    let items = match items {
        Some(items) if !items.is_empty() => items,
        _ => {
            return GridView::NoItems {
                message: NO_ITEMS_MESSAGE,
            }
        }
    };

    GridView::Cards(items.iter().map(render_card).collect())
}

fn render_card(item: &MenuItem) -> Card {
    // An empty payload still renders the card; the click is rejected as malformed later.
    let item_data = serde_json::to_string(item).unwrap_or_else(|error| {
        warn!(item = %item.name, %error, "failed to bind item data to card");
        String::new()
    });

    let image = match item.thumbnail() {
        Some(src) => CardImage::Thumbnail {
            src: src.to_string(),
            alt: item.name.clone(),
        },
        None => CardImage::Hidden,
    };

    Card {
        title: item.name.clone(),
        description: item.desc.clone(),
        price_label: item.price_label(),
        image,
        action_label: AR_ACTION_LABEL,
        item_data,
    }
}

pub fn decode_item_data(data: &str) -> Result<MenuItem, MalformedItemData> {
    Ok(serde_json::from_str(data)?)
}

#[cfg(test)]
#[path = "tests/grid_tests.rs"]
mod tests;
