//! Series and Item models
//!
//! A series is a themed set of collectible items sold as randomized draws.
//! Both types are read-only reference data from the client's perspective.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::response::Pagination;

/// Item rarity tier, ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimal series reference embedded in other payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub id: String,
    pub name: String,
}

/// Collectible item within a series
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub rarity: Rarity,
    /// Drop probability in percent, scoped to the owning series
    #[serde(default)]
    pub drop_rate: Option<Decimal>,
    /// Present when the item is returned outside its series context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<SeriesSummary>,
}

/// Blind box series
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    /// Points cost per draw
    pub price: Decimal,
    #[serde(default)]
    pub popularity: i64,
    /// Item breakdown, populated by the detail endpoint
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default)]
    pub is_new: bool,
}

/// Paginated series listing payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesList {
    pub series: Vec<Series>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Series listing / search query parameters
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeriesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SeriesQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn search(keyword: impl Into<String>, category: Option<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            category,
            ..Self::default()
        }
    }
}
