//! Add/edit form model.
//!
//! Numeric fields are held as text in localized digits, exactly as typed. They are
//! decoded only on submit, and decoding never fails: unreadable input becomes `0`.

use crate::assistant::AiSuggestion;
use inventory_core::numeral;
use inventory_core::{InventoryItem, ItemDraft, Section, VehicleType};

const DEFAULT_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Item name is required")]
    MissingName,
}

/// What submitting the form produces.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    Add(ItemDraft),
    Edit(InventoryItem),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemForm {
    /// Id of the item being edited; `None` in add mode.
    editing: Option<String>,
    image: Option<String>,
    pub name: String,
    pub vehicle_type: VehicleType,
    pub section: Section,
    pub price: String,
    pub quantity: String,
    pub min_stock_threshold: String,
    pub description: String,
}

impl ItemForm {
    /// Empty add form: bicycle, accessories, threshold `၃`.
    pub fn for_add() -> Self {
        Self {
            editing: None,
            image: None,
            name: String::new(),
            vehicle_type: VehicleType::Bicycle,
            section: Section::Accessories,
            price: String::new(),
            quantity: String::new(),
            min_stock_threshold: numeral::encode(DEFAULT_THRESHOLD),
            description: String::new(),
        }
    }

    /// Form prefilled from `item`, numbers in localized digits.
    pub fn for_edit(item: &InventoryItem) -> Self {
        Self {
            editing: Some(item.id.clone()),
            image: item.image.clone(),
            name: item.name.clone(),
            vehicle_type: item.vehicle_type,
            section: item.section,
            price: numeral::encode(item.price),
            quantity: numeral::encode(item.quantity),
            min_stock_threshold: numeral::encode(item.min_stock_threshold),
            description: item.description.clone(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// Replaces the description with the suggestion, specs appended on their own line.
    pub fn apply_suggestion(&mut self, suggestion: &AiSuggestion) {
        let mut description = suggestion.suggested_description.clone();
        if !suggestion.technical_specs.is_empty() {
            description.push_str("\nSpecs: ");
            description.push_str(&suggestion.technical_specs.join(", "));
        }
        self.description = description;
    }

    pub fn submit(&self) -> Result<FormSubmission, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let draft = ItemDraft {
            name: name.to_string(),
            vehicle_type: self.vehicle_type,
            section: self.section,
            price: numeral::decode(&self.price),
            quantity: to_count(numeral::decode(&self.quantity)),
            description: self.description.clone(),
            image: self.image.clone(),
            min_stock_threshold: to_count(numeral::decode(&self.min_stock_threshold)),
        };
        Ok(match &self.editing {
            Some(id) => FormSubmission::Edit(InventoryItem::from_draft(id.clone(), draft)),
            None => FormSubmission::Add(draft),
        })
    }
}

impl Default for ItemForm {
    fn default() -> Self {
        Self::for_add()
    }
}

// Saturating float-to-int cast: negatives become 0, fractions truncate.
fn to_count(value: f64) -> u32 {
    value.trunc() as u32
}
