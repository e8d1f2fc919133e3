//! # Derived View Model
//!
//! Pure functions from the item collection and the active filter to what the catalog
//! shows: the filtered list and the dashboard aggregates. Nothing is cached; recompute
//! whenever the collection or the filter changes.

use crate::model::{InventoryItem, Section, VehicleType};

/// Active catalog filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub vehicle_type: VehicleType,
    /// `None` shows every section.
    pub section: Option<Section>,
    /// Case-insensitive substring of name or description; empty matches everything.
    pub query: String,
}

impl ViewFilter {
    pub fn new(vehicle_type: VehicleType) -> Self {
        Self {
            vehicle_type,
            ..Self::default()
        }
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        if item.vehicle_type != self.vehicle_type {
            return false;
        }
        if self.section.is_some_and(|s| s != item.section) {
            return false;
        }
        let query = self.query.to_lowercase();
        query.is_empty()
            || item.name.to_lowercase().contains(&query)
            || item.description.to_lowercase().contains(&query)
    }
}

/// Aggregates over the items of the active vehicle type.
///
/// Section and search filters do not apply here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StockSummary {
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    pub total_value: f64,
    pub total_quantity: u64,
}

/// Everything the catalog renders for one filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryView {
    pub filtered_items: Vec<InventoryItem>,
    pub summary: StockSummary,
}

pub fn filtered_items(items: &[InventoryItem], filter: &ViewFilter) -> Vec<InventoryItem> {
    items.iter().filter(|i| filter.matches(i)).cloned().collect()
}

pub fn summarize(items: &[InventoryItem], vehicle_type: VehicleType) -> StockSummary {
    items
        .iter()
        .filter(|i| i.vehicle_type == vehicle_type)
        .fold(StockSummary::default(), |mut acc, item| {
            if item.is_low_stock() {
                acc.low_stock_count += 1;
            }
            if item.is_out_of_stock() {
                acc.out_of_stock_count += 1;
            }
            acc.total_value += item.stock_value();
            acc.total_quantity += u64::from(item.quantity);
            acc
        })
}

pub fn derive(items: &[InventoryItem], filter: &ViewFilter) -> InventoryView {
    InventoryView {
        filtered_items: filtered_items(items, filter),
        summary: summarize(items, filter.vehicle_type),
    }
}
