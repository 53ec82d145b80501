mod spoonacular;

pub use spoonacular::SpoonacularProvider;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::SpoonacularConfig;
use crate::error::ProviderError;
use crate::model::{Recipe, RecipeDetail};

/// An upstream recipe database
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Get the provider name (e.g., "spoonacular")
    fn provider_name(&self) -> &str;

    /// Recipes using the given comma-separated ingredients, at most `limit`
    async fn find_by_ingredients(
        &self,
        ingredients: &str,
        limit: u32,
    ) -> Result<Vec<Recipe>, ProviderError>;

    /// Full information for one recipe
    async fn recipe_information(&self, id: u64) -> Result<RecipeDetail, ProviderError>;
}

/// Shared HTTP client for upstream calls; the timeout bounds every call
pub fn http_client(config: &SpoonacularConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(concat!("fridgefinds/", env!("CARGO_PKG_VERSION")))
        .build()
}
