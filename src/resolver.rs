// 🧮 Recipe Resolver - Flatten a recipe into ingredient totals
//
// Breadth-first multiplicative expansion: every recipe reference is replaced
// by its components, multiplying quantities along the way, until only
// ingredients remain. An entry reached along several paths is expanded once,
// after all of its paths have been summed. Totals are plain sums, so traversal
// order only affects the order in which ingredients are first seen (which is
// the output order).
//
// Example:
//   Skibidi Spaghetti = 3 Meatball + 1 Pasta + 2 Tomato
//   Meatball          = 2 Beef + 1 Egg
//   Pasta             = 3 Flour + 1 Egg
//   → Tomato 2, Beef 6, Egg 4, Flour 3

use crate::entry::{Entry, Recipe};
use crate::error::{CookbookError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientTotal {
    pub name: String,
    pub quantity: u64,
}

/// Everything needed to cook one unit of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub name: String,

    /// Sum of `quantity * cookTime` over all ingredients
    pub cook_time: u64,

    /// In the order each ingredient was first reached
    pub ingredients: Vec<IngredientTotal>,
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Summarize the recipe stored under the canonical name `target`.
///
/// Fails if the target is missing or is an ingredient, if any recipe it
/// (transitively) needs references an unknown entry, or if the dependency
/// graph loops back on itself. No partial summary is ever returned.
///
/// Work is linear in the number of entries reachable from `target`: each entry
/// is expanded once with its total multiplier, no matter how many paths lead
/// to it.
pub fn summarize(entries: &IndexMap<String, Entry>, target: &str) -> Result<Summary> {
    let entry = entries
        .get(target)
        .ok_or_else(|| CookbookError::NotFound(target.to_string()))?;

    let recipe = match entry {
        Entry::Recipe(recipe) => recipe,
        Entry::Ingredient(ingredient) => return Err(CookbookError::NotARecipe(ingredient.name.clone())),
    };

    let graph = Reachable::walk(entries, recipe)?;
    let totals = expand(entries, entry, graph)?;

    let mut cook_time: u64 = 0;
    let mut ingredients = Vec::with_capacity(totals.len());

    for (name, quantity) in totals {
        // Re-check: only ingredients carry a cook time
        let Some(Entry::Ingredient(ingredient)) = entries.get(&name) else {
            return Err(CookbookError::MissingDependency {
                recipe: recipe.name.clone(),
                dependency: name,
            });
        };

        cook_time = quantity
            .checked_mul(ingredient.cook_time)
            .and_then(|time| cook_time.checked_add(time))
            .ok_or_else(|| CookbookError::QuantityOverflow(recipe.name.clone()))?;

        ingredients.push(IngredientTotal { name, quantity });
    }

    Ok(Summary {
        name: recipe.name.clone(),
        cook_time,
        ingredients,
    })
}

/// The part of the cookbook a recipe depends on
struct Reachable<'a> {
    /// For every reachable entry, how many reachable recipes list it
    parents: HashMap<&'a str, usize>,

    /// Recipes in breadth-first discovery order, target first
    recipes: Vec<&'a Recipe>,

    /// Ingredients in breadth-first discovery order
    ingredients: Vec<&'a str>,
}

impl<'a> Reachable<'a> {
    /// Breadth-first walk visiting each entry once.
    ///
    /// A later path to an entry can only reach its descendants at the same
    /// depth or deeper, after the first path did, so `ingredients` matches the
    /// first-seen order of a walk that queues every path.
    fn walk(entries: &'a IndexMap<String, Entry>, target: &'a Recipe) -> Result<Self> {
        let mut parents: HashMap<&str, usize> = HashMap::from([(target.name.as_str(), 0)]);
        let mut recipes = vec![target];
        let mut ingredients = Vec::new();
        let mut queue: VecDeque<&Recipe> = VecDeque::from([target]);

        while let Some(recipe) = queue.pop_front() {
            for item in &recipe.required_items {
                let child = entries
                    .get(&item.name)
                    .ok_or_else(|| CookbookError::MissingDependency {
                        recipe: recipe.name.clone(),
                        dependency: item.name.clone(),
                    })?;

                let first_visit = !parents.contains_key(child.name());
                *parents.entry(child.name()).or_insert(0) += 1;
                if !first_visit {
                    continue;
                }

                match child {
                    Entry::Recipe(child) => {
                        recipes.push(child);
                        queue.push_back(child);
                    }
                    Entry::Ingredient(ingredient) => ingredients.push(ingredient.name.as_str()),
                }
            }
        }

        Ok(Reachable {
            parents,
            recipes,
            ingredients,
        })
    }
}

/// Multiply quantities down the graph into `ingredient → quantity`.
///
/// FIFO work queue of `(entry, multiplier)` seeded with `(target, 1)`. An
/// entry is queued only once every recipe that lists it has been expanded, so
/// its multiplier is already the sum over all paths. Entries on a cycle never
/// get there.
fn expand<'a>(
    entries: &'a IndexMap<String, Entry>,
    target: &'a Entry,
    graph: Reachable<'a>,
) -> Result<IndexMap<String, u64>> {
    let Reachable {
        mut parents,
        recipes,
        ingredients,
    } = graph;

    if parents.get(target.name()).is_some_and(|&count| count > 0) {
        return Err(CookbookError::CyclicDependency(target.name().to_string()));
    }

    // Output order is discovery order, whatever order totals complete in
    let mut totals: IndexMap<String, u64> = ingredients.iter().map(|name| (name.to_string(), 0)).collect();
    let mut pending: HashMap<&str, u64> = HashMap::new();
    let mut queue: VecDeque<(&Entry, u64)> = VecDeque::from([(target, 1)]);
    let mut expanded = 0;

    while let Some((entry, multiplier)) = queue.pop_front() {
        expanded += 1;

        let recipe = match entry {
            Entry::Ingredient(ingredient) => {
                totals.insert(ingredient.name.clone(), multiplier);
                continue;
            }
            Entry::Recipe(recipe) => recipe,
        };

        for item in &recipe.required_items {
            let child = entries
                .get(&item.name)
                .ok_or_else(|| CookbookError::MissingDependency {
                    recipe: recipe.name.clone(),
                    dependency: item.name.clone(),
                })?;

            let total = pending.entry(child.name()).or_insert(0);
            let sum = multiplier
                .checked_mul(item.quantity)
                .and_then(|quantity| total.checked_add(quantity))
                .ok_or_else(|| CookbookError::QuantityOverflow(item.name.clone()))?;
            *total = sum;

            let Some(remaining) = parents.get_mut(child.name()) else {
                continue;
            };
            *remaining -= 1;
            if *remaining == 0 {
                let total = pending.remove(child.name()).unwrap_or(0);
                queue.push_back((child, total));
            }
        }
    }

    if expanded < parents.len() {
        // Some recipe is still waiting on a parent that waits on it
        let stuck = recipes
            .iter()
            .find(|recipe| parents.get(recipe.name.as_str()).is_some_and(|&count| count > 0))
            .map_or_else(|| target.name().to_string(), |recipe| recipe.name.clone());
        return Err(CookbookError::CyclicDependency(stuck));
    }

    Ok(totals)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Ingredient;
    use crate::normalize::normalize;
    use proptest::prelude::*;
    use std::time::{Duration, Instant};

    fn ingredient(name: &str, cook_time: i64) -> Entry {
        Ingredient::new(name, cook_time).unwrap().into()
    }

    fn recipe(name: &str, items: &[(&str, i64)]) -> Entry {
        Recipe::new(name, items.iter().copied()).unwrap().into()
    }

    fn cookbook(entries: Vec<Entry>) -> IndexMap<String, Entry> {
        entries
            .into_iter()
            .map(|entry| (entry.name().to_string(), entry))
            .collect()
    }

    fn skibidi_cookbook() -> IndexMap<String, Entry> {
        cookbook(vec![
            ingredient("Beef", 5),
            ingredient("Egg", 3),
            ingredient("Flour", 0),
            ingredient("Tomato", 2),
            recipe("Meatball", &[("Beef", 2), ("Egg", 1)]),
            recipe("Pasta", &[("Flour", 3), ("Egg", 1)]),
            recipe("Skibidi Spaghetti", &[("Meatball", 3), ("Pasta", 1), ("Tomato", 2)]),
        ])
    }

    fn totals(summary: &Summary) -> Vec<(&str, u64)> {
        summary
            .ingredients
            .iter()
            .map(|total| (total.name.as_str(), total.quantity))
            .collect()
    }

    #[test]
    fn test_skibidi_spaghetti() {
        let summary = summarize(&skibidi_cookbook(), "Skibidi Spaghetti").unwrap();

        assert_eq!(summary.name, "Skibidi Spaghetti");
        assert_eq!(summary.cook_time, 46);
        assert_eq!(
            totals(&summary),
            vec![("Tomato", 2), ("Beef", 6), ("Egg", 4), ("Flour", 3)]
        );
    }

    #[test]
    fn test_summary_serialization() {
        let summary = summarize(&skibidi_cookbook(), "Meatball").unwrap();
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            serde_json::json!({
                "name": "Meatball",
                "cookTime": 13,
                "ingredients": [
                    {"name": "Beef", "quantity": 2},
                    {"name": "Egg", "quantity": 1}
                ]
            })
        );
    }

    #[test]
    fn test_unknown_target() {
        let err = summarize(&skibidi_cookbook(), "Nothing").unwrap_err();
        assert_eq!(err, CookbookError::NotFound("Nothing".to_string()));
    }

    #[test]
    fn test_ingredient_target() {
        let err = summarize(&skibidi_cookbook(), "Beef").unwrap_err();
        assert_eq!(err, CookbookError::NotARecipe("Beef".to_string()));
    }

    #[test]
    fn test_missing_dependency() {
        let entries = cookbook(vec![recipe("Cheese", &[("Not Real", 1)])]);

        let err = summarize(&entries, "Cheese").unwrap_err();
        assert_eq!(
            err,
            CookbookError::MissingDependency {
                recipe: "Cheese".to_string(),
                dependency: "Not Real".to_string(),
            }
        );
    }

    #[test]
    fn test_nested_missing_dependency() {
        let entries = cookbook(vec![
            ingredient("Egg", 1),
            recipe("Omelette", &[("Egg", 2), ("Cheese", 1)]),
            recipe("Cheese", &[("Milk", 4)]),
            recipe("Brunch", &[("Omelette", 1)]),
        ]);

        let err = summarize(&entries, "Brunch").unwrap_err();
        assert!(matches!(
            err,
            CookbookError::MissingDependency { ref dependency, .. } if dependency == "Milk"
        ));
    }

    #[test]
    fn test_forward_reference_resolves_once_added() {
        let mut entries = cookbook(vec![recipe("Skibidi", &[("Bruh", 1)])]);
        assert!(summarize(&entries, "Skibidi").is_err());

        let bruh = ingredient("Bruh", 2);
        entries.insert(bruh.name().to_string(), bruh);

        let summary = summarize(&entries, "Skibidi").unwrap();
        assert_eq!(summary.cook_time, 2);
        assert_eq!(totals(&summary), vec![("Bruh", 1)]);
    }

    #[test]
    fn test_empty_recipe() {
        let entries = cookbook(vec![recipe("Air", &[])]);

        let summary = summarize(&entries, "Air").unwrap();
        assert_eq!(summary.cook_time, 0);
        assert!(summary.ingredients.is_empty());
    }

    #[test]
    fn test_cycles_are_rejected() {
        // Direct
        let entries = cookbook(vec![recipe("Ouroboros", &[("Ouroboros", 1)])]);
        assert_eq!(
            summarize(&entries, "Ouroboros").unwrap_err(),
            CookbookError::CyclicDependency("Ouroboros".to_string())
        );

        // Transitive
        let entries = cookbook(vec![
            ingredient("Salt", 1),
            recipe("Chicken", &[("Egg", 1), ("Salt", 1)]),
            recipe("Egg", &[("Chicken", 1)]),
            recipe("Breakfast", &[("Salt", 1), ("Egg", 2)]),
        ]);
        assert!(matches!(
            summarize(&entries, "Breakfast"),
            Err(CookbookError::CyclicDependency(_))
        ));
    }

    #[test]
    fn test_shared_dependency_is_not_a_cycle() {
        let entries = cookbook(vec![
            ingredient("Butter", 1),
            recipe("Roux", &[("Butter", 1)]),
            recipe("Bechamel", &[("Roux", 1)]),
            recipe("Lasagne", &[("Roux", 2), ("Bechamel", 1)]),
        ]);

        let summary = summarize(&entries, "Lasagne").unwrap();
        assert_eq!(totals(&summary), vec![("Butter", 3)]);
        assert_eq!(summary.cook_time, 3);
    }

    #[test]
    fn test_quantity_overflow() {
        let big = i64::MAX;
        let entries = cookbook(vec![
            ingredient("Grain", 1),
            recipe("Sack", &[("Grain", big)]),
            recipe("Silo", &[("Sack", big)]),
        ]);

        assert!(matches!(
            summarize(&entries, "Silo"),
            Err(CookbookError::QuantityOverflow(_))
        ));
    }

    #[test]
    fn test_deep_chain_resolves() {
        // Link 0 needs link 1, ..., the last link needs Salt
        let depth = 100_000;
        let mut entries = vec![ingredient("Salt", 1)];
        for i in 0..depth {
            let next = if i + 1 == depth { "Salt".to_string() } else { link_name(i + 1) };
            entries.push(recipe(&link_name(i), &[(next.as_str(), 1)]));
        }
        let entries = cookbook(entries);

        let summary = summarize(&entries, &link_name(0)).unwrap();
        assert_eq!(totals(&summary), vec![("Salt", 1)]);
        assert_eq!(summary.cook_time, 1);
    }

    #[test]
    fn test_deep_chain_cycle() {
        // The last link points back at the first
        let depth = 50_000;
        let entries = cookbook(
            (0..depth)
                .map(|i| recipe(&link_name(i), &[(link_name((i + 1) % depth).as_str(), 1)]))
                .collect(),
        );

        assert_eq!(
            summarize(&entries, &link_name(0)).unwrap_err(),
            CookbookError::CyclicDependency(link_name(0))
        );
    }

    /// Level `i` needs Left `i` and Right `i`, both of which need level `i + 1`,
    /// so the number of paths to Salt doubles at every level.
    fn diamond_ladder(levels: usize) -> IndexMap<String, Entry> {
        let mut entries = vec![ingredient("Salt", 1)];
        for i in 0..levels {
            let below = if i + 1 == levels { "Salt".to_string() } else { numbered("Level", i + 1) };
            let left = numbered("Left", i);
            let right = numbered("Right", i);
            entries.push(recipe(&left, &[(below.as_str(), 1)]));
            entries.push(recipe(&right, &[(below.as_str(), 1)]));
            entries.push(recipe(&numbered("Level", i), &[(left.as_str(), 1), (right.as_str(), 1)]));
        }
        cookbook(entries)
    }

    #[test]
    fn test_shared_sub_recipes_are_expanded_once() {
        let entries = diamond_ladder(60);

        let started = Instant::now();
        let summary = summarize(&entries, &numbered("Level", 0)).unwrap();

        assert_eq!(totals(&summary), vec![("Salt", 1u64 << 60)]);
        assert_eq!(summary.cook_time, 1u64 << 60);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_shared_sub_recipes_overflow() {
        let entries = diamond_ladder(70);

        assert!(matches!(
            summarize(&entries, &numbered("Level", 0)),
            Err(CookbookError::QuantityOverflow(_))
        ));
    }

    /// Names must contain letters only, so encode numbers in base 26
    fn letters(mut n: usize) -> String {
        let mut out = Vec::new();
        loop {
            out.push(b'a' + (n % 26) as u8);
            n /= 26;
            if n == 0 {
                break;
            }
        }
        out.reverse();
        String::from_utf8(out).unwrap()
    }

    fn link_name(i: usize) -> String {
        numbered("Link", i)
    }

    fn numbered(prefix: &str, i: usize) -> String {
        normalize(&format!("{prefix} {}", letters(i))).unwrap()
    }

    proptest! {
        #[test]
        fn prop_totals_ignore_component_order(
            quantities in proptest::collection::vec(1i64..6, 5),
            order in Just(vec![0usize, 1, 2, 3, 4]).prop_shuffle(),
        ) {
            let names = ["Beef", "Egg", "Flour", "Tomato", "Meatball"];
            let items: Vec<(&str, i64)> = names.iter().copied().zip(quantities).collect();
            let shuffled: Vec<(&str, i64)> = order.iter().map(|&i| items[i]).collect();

            let base = vec![
                ingredient("Beef", 5),
                ingredient("Egg", 3),
                ingredient("Flour", 0),
                ingredient("Tomato", 2),
                recipe("Meatball", &[("Beef", 2), ("Egg", 1)]),
            ];

            let mut original = cookbook(base.clone());
            let dish = recipe("Dish", &items);
            original.insert(dish.name().to_string(), dish);

            let mut reordered = cookbook(base);
            let dish = recipe("Dish", &shuffled);
            reordered.insert(dish.name().to_string(), dish);

            let a = summarize(&original, "Dish").unwrap();
            let b = summarize(&reordered, "Dish").unwrap();

            let mut a_totals = totals(&a);
            let mut b_totals = totals(&b);
            a_totals.sort();
            b_totals.sort();

            prop_assert_eq!(a.cook_time, b.cook_time);
            prop_assert_eq!(a_totals, b_totals);
        }
    }
}
