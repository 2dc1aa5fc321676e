use std::fmt;

use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::CatalogParseError;

/// Category name used when a document ships the legacy flat item array.
pub const LEGACY_CATEGORY: &str = "Menu";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAssets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usdz: Option<String>,
}

impl ModelAssets {
    pub fn glb(&self) -> Option<&str> {
        non_empty(self.glb.as_deref())
    }

    pub fn usdz(&self) -> Option<&str> {
        non_empty(self.usdz.as_deref())
    }
}

/// One dish. Items have no id; they are addressed by position in their category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub price: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelAssets>,
}

impl MenuItem {
    pub fn glb(&self) -> Option<&str> {
        self.model.as_ref().and_then(ModelAssets::glb)
    }

    pub fn usdz(&self) -> Option<&str> {
        self.model.as_ref().and_then(ModelAssets::usdz)
    }

    pub fn thumbnail(&self) -> Option<&str> {
        non_empty(self.thumbnail.as_deref())
    }

    pub fn price_label(&self) -> String {
        let currency = self.currency.trim();
        if currency.is_empty() {
            format!("{:.2}", self.price)
        } else {
            format!("{currency} {:.2}", self.price)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub items: Vec<MenuItem>,
}

/// Categories in document order. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuCatalog {
    categories: Vec<Category>,
}

impl MenuCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CatalogParseError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogParseError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }

    pub fn items(&self, category: &str) -> Option<&[MenuItem]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.items.as_slice())
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Serialize for MenuCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MenuCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CatalogVisitor)
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = MenuCatalog;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of category name to menu items, or an array of menu items")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut categories: Vec<Category> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, items)) = map.next_entry::<String, Option<Vec<MenuItem>>>()? {
            let items = items.unwrap_or_default();
            // JSON objects may repeat a key; the last occurrence wins, as in JSON.parse.
            if let Some(existing) = categories.iter_mut().find(|c| c.name == name) {
                existing.items = items;
            } else {
                categories.push(Category { name, items });
            }
        }
        Ok(MenuCatalog { categories })
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<MenuItem>()? {
            items.push(item);
        }
        Ok(MenuCatalog {
            categories: vec![Category {
                name: LEGACY_CATEGORY.to_string(),
                items,
            }],
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
