//! Catalog filter state behind the vehicle tabs, the diagram and the search box.

use inventory_core::{Section, VehicleType, ViewFilter};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    inner: ViewFilter,
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.inner.vehicle_type
    }

    pub fn section(&self) -> Option<Section> {
        self.inner.section
    }

    pub fn query(&self) -> &str {
        &self.inner.query
    }

    /// Switches tabs. The section belongs to the old diagram, so it is cleared.
    pub fn set_vehicle_type(&mut self, vehicle_type: VehicleType) {
        if self.inner.vehicle_type != vehicle_type {
            self.inner.vehicle_type = vehicle_type;
            self.inner.section = None;
        }
    }

    /// Diagram click: selects `section`, or deselects it when already selected.
    pub fn toggle_section(&mut self, section: Section) {
        self.inner.section = match self.inner.section {
            Some(current) if current == section => None,
            _ => Some(section),
        };
    }

    pub fn clear_section(&mut self) {
        self.inner.section = None;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.inner.query = query.into();
    }

    pub fn as_view_filter(&self) -> &ViewFilter {
        &self.inner
    }
}
