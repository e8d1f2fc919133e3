//! # Inventory Data Model
//!
//! [`InventoryItem`] is the only persistent entity. Vehicle type and part section are
//! closed sets, so they are plain enums with exhaustive matching; their serde names are
//! the exact strings the remote store exchanges.
//!
//! - [`ItemDraft`]: an item without an identity (add flow input).
//! - [`ItemPatch`]: a sparse update; absent fields are not serialized.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Kind of vehicle a part belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Bicycle,
    Motorbike,
}

impl VehicleType {
    pub const ALL: [VehicleType; 2] = [VehicleType::Bicycle, VehicleType::Motorbike];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Bicycle => "bicycle",
            VehicleType::Motorbike => "motorbike",
        }
    }

    /// Localized display label.
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Bicycle => "စက်ဘီး",
            VehicleType::Motorbike => "ဆိုင်ကယ်",
        }
    }
}

impl Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Part category, matching the regions of the vehicle diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Handlebars, stem, brakes, shifters.
    Cockpit,
    /// Frame, saddle, seatpost, fork.
    Frame,
    /// Chain, pedals, derailleur, crankset, engine.
    Drivetrain,
    /// Tires, rims, spokes, hubs.
    Wheels,
    /// Lights, locks and the rest.
    Accessories,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Cockpit,
        Section::Frame,
        Section::Drivetrain,
        Section::Wheels,
        Section::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Cockpit => "Cockpit",
            Section::Frame => "Frame",
            Section::Drivetrain => "Drivetrain",
            Section::Wheels => "Wheels",
            Section::Accessories => "Accessories",
        }
    }

    /// Localized display label used on cards, the form and the catalog header.
    pub fn label(&self) -> &'static str {
        match self {
            Section::Wheels => "ဘီးများ",
            Section::Frame => "ကိုယ်ထည်",
            Section::Drivetrain => "အင်ဂျင်/မောင်းနှင်",
            Section::Cockpit => "လက်ကိုင်",
            Section::Accessories => "အပိုပစ္စည်း",
        }
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stock classification derived from quantity and threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    OutOfStock,
    Low,
    Healthy,
}

/// A vehicle part held in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub section: Section,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub min_stock_threshold: u32,
}

impl InventoryItem {
    /// Attaches an identity to a draft.
    pub fn from_draft(id: impl Into<String>, draft: ItemDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            vehicle_type: draft.vehicle_type,
            section: draft.section,
            price: draft.price,
            quantity: draft.quantity,
            description: draft.description,
            image: draft.image,
            min_stock_threshold: draft.min_stock_threshold,
        }
    }

    /// `0 < quantity <= threshold` is low, `0` is out of stock.
    pub fn stock_level(&self) -> StockLevel {
        if self.quantity == 0 {
            StockLevel::OutOfStock
        } else if self.quantity <= self.min_stock_threshold {
            StockLevel::Low
        } else {
            StockLevel::Healthy
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_level() == StockLevel::Low
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock_level() == StockLevel::OutOfStock
    }

    /// `price * quantity`.
    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Applies the fields present in `patch`.
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(vehicle_type) = patch.vehicle_type {
            self.vehicle_type = vehicle_type;
        }
        if let Some(section) = patch.section {
            self.section = section;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(threshold) = patch.min_stock_threshold {
            self.min_stock_threshold = threshold;
        }
    }
}

/// Payload of the add flow: everything but the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub section: Section,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub min_stock_threshold: u32,
}

/// Sparse update sent with PATCH.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<VehicleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock_threshold: Option<u32>,
}

impl ItemPatch {
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }
}
