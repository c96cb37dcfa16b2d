// 📥 Entry Payloads - loosely-typed JSON → validated Entry
//
// Request bodies arrive as arbitrary JSON. Parsing happens in two steps so the
// registry can check for a duplicate name before looking at the rest:
//
//   1. EntryHeader::from_value   name + type present, name normalizes
//   2. EntryHeader::into_entry   type-specific fields (cookTime / requiredItems)

use crate::entry::{Entry, EntryKind, Ingredient, Recipe};
use crate::error::{CookbookError, Result};
use crate::normalize::normalize;
use serde_json::{Map, Value};

/// The fields every insert request must carry
#[derive(Debug, Clone)]
pub struct EntryHeader<'a> {
    /// Canonical name
    pub name: String,

    /// Raw `type` discriminant, checked in `into_entry`
    kind: &'a Value,

    body: &'a Map<String, Value>,
}

impl<'a> EntryHeader<'a> {
    pub fn from_value(payload: &'a Value) -> Result<Self> {
        let body = payload
            .as_object()
            .ok_or_else(|| CookbookError::invalid_field("entry", "must be a JSON object"))?;

        let raw_name = body.get("name").ok_or(CookbookError::MissingField("name"))?;
        let kind = body.get("type").ok_or(CookbookError::MissingField("type"))?;

        let raw_name = raw_name
            .as_str()
            .ok_or_else(|| CookbookError::invalid_field("name", "must be a string"))?;
        let name = normalize(raw_name).ok_or_else(|| CookbookError::MalformedName(raw_name.to_string()))?;

        Ok(EntryHeader { name, kind, body })
    }

    /// Validate the type-specific fields and build the entry
    pub fn into_entry(self) -> Result<Entry> {
        let kind = self
            .kind
            .as_str()
            .and_then(EntryKind::parse)
            .ok_or_else(|| CookbookError::UnknownType(self.kind.to_string()))?;

        match kind {
            EntryKind::Ingredient => {
                let cook_time = self.body.get("cookTime").ok_or(CookbookError::MissingField("cookTime"))?;
                let cook_time = integer("cookTime", cook_time)?;
                Ingredient::new(&self.name, cook_time).map(Entry::from)
            }
            EntryKind::Recipe => {
                let items = self
                    .body
                    .get("requiredItems")
                    .ok_or(CookbookError::MissingField("requiredItems"))?
                    .as_array()
                    .ok_or_else(|| CookbookError::invalid_field("requiredItems", "must be an array"))?;

                let items = items.iter().map(required_item).collect::<Result<Vec<_>>>()?;
                Recipe::new(&self.name, items).map(Entry::from)
            }
        }
    }
}

/// Parse a complete insert request without consulting any registry
pub fn parse_entry(payload: &Value) -> Result<Entry> {
    EntryHeader::from_value(payload)?.into_entry()
}

fn required_item(item: &Value) -> Result<(&str, i64)> {
    let item = item
        .as_object()
        .ok_or_else(|| CookbookError::invalid_field("requiredItems", "items must be objects"))?;

    let name = item
        .get("name")
        .ok_or(CookbookError::MissingField("requiredItems.name"))?
        .as_str()
        .ok_or_else(|| CookbookError::invalid_field("requiredItems.name", "must be a string"))?;
    let quantity = item
        .get("quantity")
        .ok_or(CookbookError::MissingField("requiredItems.quantity"))?;

    Ok((name, integer("requiredItems.quantity", quantity)?))
}

/// Whole numbers only
fn integer(field: &'static str, value: &Value) -> Result<i64> {
    let Value::Number(number) = value else {
        return Err(CookbookError::invalid_field(field, format!("expected a number, got {value}")));
    };

    if let Some(n) = number.as_i64() {
        Ok(n)
    } else if number.is_u64() {
        Err(CookbookError::invalid_field(field, format!("{number} is out of range")))
    } else {
        Err(CookbookError::invalid_field(field, format!("expected an integer, got {number}")))
    }
}

// ============================================================================
// TESTS
// ============================================================================
