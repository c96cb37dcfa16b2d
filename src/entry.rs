// 🍳 Cookbook Entries - Ingredients and Recipes
//
// An entry is either an atomic ingredient (with a cook time) or a recipe made
// from quantities of other entries. Names are always stored canonicalized.

use crate::error::{CookbookError, Result};
use crate::normalize::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// ENTRY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Ingredient,
    Recipe,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Ingredient => "ingredient",
            EntryKind::Recipe => "recipe",
        }
    }

    /// Parse the `type` discriminant of an insert request
    pub fn parse(kind: &str) -> Option<EntryKind> {
        match kind {
            "ingredient" => Some(EntryKind::Ingredient),
            "recipe" => Some(EntryKind::Recipe),
            _ => None,
        }
    }
}

// ============================================================================
// INGREDIENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub cook_time: u64,
}

impl Ingredient {
    /// Create an ingredient, canonicalizing its name.
    ///
    /// `cook_time` is signed so callers holding raw input get
    /// `InvalidDuration` instead of a conversion error.
    pub fn new(name: &str, cook_time: i64) -> Result<Self> {
        let name = canonical(name)?;
        let cook_time =
            u64::try_from(cook_time).map_err(|_| CookbookError::InvalidDuration(cook_time.to_string()))?;

        Ok(Ingredient { name, cook_time })
    }
}

// ============================================================================
// RECIPE
// ============================================================================

/// One component of a recipe: `quantity` units of the entry called `name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredItem {
    pub name: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub required_items: Vec<RequiredItem>,
}

impl Recipe {
    /// Create a recipe from `(component name, quantity)` pairs.
    ///
    /// Component names are canonicalized; after that no two may collide.
    /// Components don't have to exist yet, they are only looked up when the
    /// recipe is summarized.
    pub fn new<S: AsRef<str>>(name: &str, items: impl IntoIterator<Item = (S, i64)>) -> Result<Self> {
        let name = canonical(name)?;

        let mut seen = HashSet::new();
        let mut required_items = Vec::new();

        for (raw, quantity) in items {
            let item_name = canonical(raw.as_ref())?;

            let quantity = match u64::try_from(quantity) {
                Ok(q) if q > 0 => q,
                _ => {
                    return Err(CookbookError::InvalidQuantity {
                        item: item_name,
                        value: quantity.to_string(),
                    })
                }
            };

            if !seen.insert(item_name.clone()) {
                return Err(CookbookError::DuplicateDependency(item_name));
            }

            required_items.push(RequiredItem {
                name: item_name,
                quantity,
            });
        }

        Ok(Recipe {
            name,
            required_items,
        })
    }
}

// ============================================================================
// ENTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Ingredient(Ingredient),
    Recipe(Recipe),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Ingredient(ingredient) => &ingredient.name,
            Entry::Recipe(recipe) => &recipe.name,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Ingredient(_) => EntryKind::Ingredient,
            Entry::Recipe(_) => EntryKind::Recipe,
        }
    }

    /// Check what `Ingredient::new` / `Recipe::new` would have enforced.
    ///
    /// The fields are public, so an entry built by hand (or deserialized) can
    /// carry raw names, zero quantities or repeated components.
    pub fn validate(&self) -> Result<()> {
        ensure_canonical(self.name())?;

        let Entry::Recipe(recipe) = self else {
            return Ok(());
        };

        let mut seen = HashSet::new();
        for item in &recipe.required_items {
            ensure_canonical(&item.name)?;

            if item.quantity == 0 {
                return Err(CookbookError::InvalidQuantity {
                    item: item.name.clone(),
                    value: item.quantity.to_string(),
                });
            }
            if !seen.insert(item.name.as_str()) {
                return Err(CookbookError::DuplicateDependency(item.name.clone()));
            }
        }

        Ok(())
    }
}

impl From<Ingredient> for Entry {
    fn from(ingredient: Ingredient) -> Self {
        Entry::Ingredient(ingredient)
    }
}

impl From<Recipe> for Entry {
    fn from(recipe: Recipe) -> Self {
        Entry::Recipe(recipe)
    }
}

fn canonical(raw: &str) -> Result<String> {
    normalize(raw).ok_or_else(|| CookbookError::MalformedName(raw.to_string()))
}

fn ensure_canonical(name: &str) -> Result<()> {
    match normalize(name) {
        Some(canonical) if canonical == name => Ok(()),
        _ => Err(CookbookError::MalformedName(name.to_string())),
    }
}

// ============================================================================
// TESTS
// ============================================================================
