//! Menu DTOs
//!
//! Menu → categories → items → modifiers. Prices are integer cents.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    #[serde(default)]
    pub category_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: i64,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
}

fn default_true() -> bool {
    true
}

impl Menu {
    /// Categories sorted by position, items within each sorted too
    pub fn sorted(mut self) -> Self {
        self.categories.sort_by_key(|c| c.position);
        for category in &mut self.categories {
            category.items.sort_by_key(|i| i.position);
        }
        self
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn unavailable_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .filter(|i| !i.is_available)
            .count()
    }

    pub fn find_item(&self, item_id: &str) -> Option<&MenuItem> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|i| i.id == item_id)
    }
}

impl MenuCategory {
    /// Items whose name or description contains `query`
    pub fn search<'a>(&'a self, query: &str) -> Vec<&'a MenuItem> {
        let query = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|i| {
                query.is_empty()
                    || i.name.to_lowercase().contains(&query)
                    || i.description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&query))
                        .unwrap_or(false)
            })
            .collect()
    }
}

/// Payload for creating or updating a menu item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItemInput {
    pub category_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: i64,
    pub is_available: bool,
    pub dietary_tags: Vec<String>,
}

/// Payload for creating or updating a category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Known dietary tags offered by the item editor
pub const DIETARY_TAGS: &[&str] = &[
    "vegetarian",
    "vegan",
    "gluten-free",
    "dairy-free",
    "nut-free",
    "spicy",
    "halal",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_json() -> &'static str {
        r#"{
            "id": "m1",
            "categories": [
                {"id": "c2", "name": "Drinks", "position": 2, "items": [
                    {"id": "i3", "name": "Cola", "price": 250, "is_available": false}
                ]},
                {"id": "c1", "name": "Mains", "position": 1, "items": [
                    {"id": "i2", "name": "Pasta", "description": "Fresh basil", "price": 1400, "position": 2},
                    {"id": "i1", "name": "Burger", "price": 1200, "position": 1, "dietary_tags": ["spicy"]}
                ]}
            ]
        }"#
    }

    #[test]
    fn test_menu_sorting_and_counts() {
        let menu: Menu = serde_json::from_str(menu_json()).unwrap();
        let menu = menu.sorted();
        assert_eq!(menu.categories[0].name, "Mains");
        assert_eq!(menu.categories[0].items[0].name, "Burger");
        assert_eq!(menu.item_count(), 3);
        assert_eq!(menu.unavailable_count(), 1);
        assert!(menu.find_item("i2").is_some());
    }

    #[test]
    fn test_category_search() {
        let menu: Menu = serde_json::from_str(menu_json()).unwrap();
        let mains = menu.sorted().categories.remove(0);
        assert_eq!(mains.search("basil").len(), 1);
        assert_eq!(mains.search("").len(), 2);
    }
}
