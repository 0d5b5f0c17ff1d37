//! Turns Spoonacular responses into chat messages. Pure functions.

use crate::spoonacular::{RecipeMatch, WinePairing};

/// Canonical no-result message. Shared by both lookups so every dead end
/// reads the same to the user.
pub const NOT_FOUND: &str = "Could not find anything, try again with another search";

/// Format a recipe search result as one block per recipe, blocks separated
/// by a blank line. Empty input gets the canonical not-found message.
pub fn format_recipes(recipes: &[RecipeMatch]) -> String {
    if recipes.is_empty() {
        return NOT_FOUND.to_string();
    }

    let mut out = String::from("Neat! Look what I've found:\n\n");
    for recipe in recipes {
        out.push_str(&format!("Recipe Title: {}\n", recipe.title));
        out.push_str("Missed Ingredients:\n");
        for ingredient in &recipe.missed_ingredients {
            out.push_str(&format!("- {}\n", ingredient.name));
        }
        out.push_str("Used Ingredients:\n");
        for ingredient in &recipe.used_ingredients {
            out.push_str(&format!("- {}\n", ingredient.original));
        }
        out.push('\n');
    }

    out
}

/// Format a wine pairing: the pairing text verbatim, or the canonical
/// not-found message when the API reported failure or gave nothing.
pub fn format_pairing(pairing: &WinePairing) -> String {
    if pairing.is_not_found() {
        return NOT_FOUND.to_string();
    }
    pairing
        .pairing_text
        .clone()
        .unwrap_or_else(|| NOT_FOUND.to_string())
}
