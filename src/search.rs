//! Search, enrich and filter.
//!
//! One find-by-ingredients call decides the result set. Each hit then gets
//! its own detail lookup. The lookups run concurrently and are awaited
//! together, and a failed lookup only downgrades its own recipe to the
//! basic record. The dietary filter runs last, over the merged records.

use futures::future::join_all;
use log::{error, info, warn};

use crate::dietary::DietaryRequest;
use crate::error::SearchError;
use crate::model::{Enrichment, Recipe};
use crate::providers::RecipeProvider;

/// A validated search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Forwarded upstream exactly as received
    pub ingredients: String,
    /// `None` when the caller sent no `dietary` parameter
    pub dietary: Option<DietaryRequest>,
}

impl SearchRequest {
    /// Validate raw query parameters.
    ///
    /// `ingredients` must contain at least one non-blank comma-separated token.
    /// A value made only of separators and whitespace, such as `" , "`, is
    /// rejected here as missing rather than forwarded to the provider.
    pub fn from_params(
        ingredients: Option<&str>,
        dietary: Option<&str>,
    ) -> Result<Self, SearchError> {
        let ingredients = ingredients
            .filter(|raw| raw.split(',').any(|token| !token.trim().is_empty()))
            .ok_or(SearchError::MissingIngredients)?;

        Ok(SearchRequest {
            ingredients: ingredients.to_string(),
            dietary: dietary.map(DietaryRequest::parse),
        })
    }
}

/// Run a full search against `provider`
pub async fn search_recipes(
    provider: &dyn RecipeProvider,
    request: &SearchRequest,
    limit: u32,
) -> Result<Vec<Recipe>, SearchError> {
    let basics = provider
        .find_by_ingredients(&request.ingredients, limit)
        .await
        .map_err(|e| {
            error!("Recipe search for '{}' failed: {}", request.ingredients, e);
            SearchError::UpstreamSearch(e)
        })?;

    info!(
        "{} returned {} recipes for '{}'",
        provider.provider_name(),
        basics.len(),
        request.ingredients
    );

    let recipes = enrich(provider, basics).await;

    let filtered = match &request.dietary {
        Some(dietary) => dietary.apply(recipes),
        None => recipes,
    };

    Ok(filtered)
}

/// Look up details for every recipe concurrently and merge them in.
///
/// The output has the same length and order as `basics`.
pub async fn enrich(provider: &dyn RecipeProvider, basics: Vec<Recipe>) -> Vec<Recipe> {
    let lookups = basics
        .iter()
        .map(|recipe| fetch_enrichment(provider, recipe.id()));
    let outcomes = join_all(lookups).await;

    basics
        .into_iter()
        .zip(outcomes)
        .map(|(basic, enrichment)| Recipe::from_parts(basic, enrichment))
        .collect()
}

async fn fetch_enrichment(provider: &dyn RecipeProvider, id: Option<u64>) -> Enrichment {
    let Some(id) = id else {
        warn!("Recipe without a usable id; keeping the basic record");
        return Enrichment::BasicOnly;
    };

    match provider.recipe_information(id).await {
        Ok(detail) => Enrichment::Detailed(detail),
        Err(e) => {
            warn!("Failed to get details for recipe {}: {}", id, e);
            Enrichment::BasicOnly
        }
    }
}
