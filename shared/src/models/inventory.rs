//! Inventory models
//!
//! An inventory entry is the user's owned-count record for one item. Entries
//! are created server-side as a draw side effect; the client only flips the
//! favorite/display toggles.

use serde::{Deserialize, Serialize};

use crate::models::series::{Item, Rarity};
use crate::response::Pagination;

/// Owned-item record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    pub id: String,
    pub item: Item,
    /// Count of duplicates owned
    pub quantity: u32,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_displayed: bool,
    #[serde(default)]
    pub acquired_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Paginated inventory payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryList {
    pub items: Vec<InventoryEntry>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Inventory listing filters
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites_only: Option<bool>,
}

/// Rarity-bucketed counts for a set of inventory entries.
///
/// Computed client-side by folding over the loaded page, so the numbers are
/// scoped to that page, not the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RarityStats {
    pub total: u32,
    pub common: u32,
    pub rare: u32,
    pub epic: u32,
    pub legendary: u32,
}

impl RarityStats {
    /// Fold entries into bucketed counts. Each entry counts once, regardless
    /// of its duplicate quantity.
    pub fn tally(entries: &[InventoryEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, entry| {
            acc.total += 1;
            match entry.item.rarity {
                Rarity::Common => acc.common += 1,
                Rarity::Rare => acc.rare += 1,
                Rarity::Epic => acc.epic += 1,
                Rarity::Legendary => acc.legendary += 1,
            }
            acc
        })
    }

    pub fn count_for(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, rarity: Rarity) -> InventoryEntry {
        InventoryEntry {
            id: id.to_string(),
            item: Item {
                id: format!("item-{id}"),
                name: format!("Item {id}"),
                description: None,
                image: None,
                rarity,
                drop_rate: None,
                series: None,
            },
            quantity: 1,
            is_favorite: false,
            is_displayed: false,
            acquired_at: None,
        }
    }

    #[test]
    fn tally_buckets_by_rarity() {
        let entries = vec![
            entry("a", Rarity::Common),
            entry("b", Rarity::Rare),
            entry("c", Rarity::Rare),
            entry("d", Rarity::Legendary),
        ];
        let stats = RarityStats::tally(&entries);
        assert_eq!(
            stats,
            RarityStats {
                total: 4,
                common: 1,
                rare: 2,
                epic: 0,
                legendary: 1,
            }
        );
    }

    #[test]
    fn tally_of_empty_page_is_zero() {
        assert_eq!(RarityStats::tally(&[]), RarityStats::default());
    }
}
