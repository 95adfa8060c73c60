use crate::model::ItemId;
use std::collections::HashMap;

/// Stock levels for the items currently offered on the page.
///
/// Stands in for the "units remaining" values the storefront renders next to each
/// product. The cart consumes these numbers but does not own them: whoever renders
/// search results is expected to push fresh levels in via
/// [`CartClient::update_inventory`](crate::clients::CartClient::update_inventory).
///
/// An item with no recorded level has a ceiling of zero, so it can never be
/// incremented past its first unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventorySnapshot {
    levels: HashMap<ItemId, u32>,
}

impl InventorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with_level(mut self, item_id: impl Into<ItemId>, available: u32) -> Self {
        self.set(item_id.into(), available);
        self
    }

    pub fn set(&mut self, item_id: ItemId, available: u32) {
        self.levels.insert(item_id, available);
    }

    /// Units available for `item_id`; missing data reads as zero.
    pub fn ceiling(&self, item_id: &ItemId) -> u32 {
        self.levels.get(item_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.levels.contains_key(item_id)
    }

    /// Overlays `other` on top of this snapshot. Levels in `other` win.
    pub fn merge(&mut self, other: InventorySnapshot) {
        self.levels.extend(other.levels);
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl FromIterator<(ItemId, u32)> for InventorySnapshot {
    fn from_iter<I: IntoIterator<Item = (ItemId, u32)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}

impl Extend<(ItemId, u32)> for InventorySnapshot {
    fn extend<I: IntoIterator<Item = (ItemId, u32)>>(&mut self, iter: I) {
        self.levels.extend(iter);
    }
}
