//! Spoonacular API client for recipe and wine-pairing lookups.
//!
//! Both lookups fail open: a transport error or a body we cannot parse is
//! logged and mapped to an empty result, never surfaced to the user.

use serde::Deserialize;
use tracing::warn;

const RECIPES_URL: &str = "https://api.spoonacular.com/recipes/findByIngredients";
const WINE_PAIRING_URL: &str = "https://api.spoonacular.com/food/wine/pairing";

/// Maximum recipes requested per search.
const MAX_RECIPES: u32 = 3;
/// Spoonacular ranking mode 2 = minimize missing ingredients first.
const RANKING_MINIMIZE_MISSING: u32 = 2;

#[derive(Deserialize, Debug, Default)]
pub struct Ingredient {
    #[serde(default)]
    pub name: String,
    /// Full text as written in the recipe, e.g. "2 large eggs".
    #[serde(default)]
    pub original: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct RecipeMatch {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "missedIngredients")]
    pub missed_ingredients: Vec<Ingredient>,
    #[serde(default, rename = "usedIngredients")]
    pub used_ingredients: Vec<Ingredient>,
}

#[derive(Deserialize, Debug, Default)]
pub struct WinePairing {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "pairingText")]
    pub pairing_text: Option<String>,
}

impl WinePairing {
    /// True when the API reported failure or gave no pairing text.
    pub fn is_not_found(&self) -> bool {
        self.status.as_deref() == Some("failure")
            || self.pairing_text.as_deref().unwrap_or("").is_empty()
    }
}

pub struct SpoonacularClient {
    api_key: String,
    client: reqwest::Client,
}

impl SpoonacularClient {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { api_key, client }
    }

    /// Search recipes by a comma-separated ingredient list.
    /// Returns at most [`MAX_RECIPES`] matches; an empty list on any failure.
    pub async fn search_by_ingredients(&self, ingredients: &str) -> Vec<RecipeMatch> {
        let body = match self
            .get(RECIPES_URL, &[
                ("ingredients", ingredients),
                ("number", &MAX_RECIPES.to_string()),
                ("ranking", &RANKING_MINIMIZE_MISSING.to_string()),
            ])
            .await
        {
            Ok(body) => body,
            Err(e) => {
                warn!("Recipe search failed: {e}");
                return Vec::new();
            }
        };

        parse_recipes(&body)
    }

    /// Look up a wine pairing for a dish, ingredient, or cuisine.
    pub async fn wine_pairing(&self, food: &str) -> WinePairing {
        let body = match self.get(WINE_PAIRING_URL, &[("food", food)]).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Wine pairing lookup failed: {e}");
                return WinePairing::default();
            }
        };

        parse_pairing(&body)
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| format!("HTTP error: {e}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read response: {e}"))?;

        if !status.is_success() {
            return Err(format!("API error {status}: {body}"));
        }

        Ok(body)
    }
}

fn parse_recipes(body: &str) -> Vec<RecipeMatch> {
    match serde_json::from_str(body) {
        Ok(recipes) => recipes,
        Err(e) => {
            warn!("Unexpected recipe response shape: {e}");
            Vec::new()
        }
    }
}

fn parse_pairing(body: &str) -> WinePairing {
    match serde_json::from_str(body) {
        Ok(pairing) => pairing,
        Err(e) => {
            warn!("Unexpected pairing response shape: {e}");
            WinePairing::default()
        }
    }
}
