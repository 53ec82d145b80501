use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::SpoonacularConfig;
use crate::error::ProviderError;
use crate::model::{Recipe, RecipeDetail};
use crate::providers::RecipeProvider;

pub struct SpoonacularProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SpoonacularProvider {
    /// Create a provider for one request, reusing the pooled client
    pub fn new(client: Client, config: &SpoonacularConfig, api_key: String) -> Self {
        SpoonacularProvider {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        SpoonacularProvider {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularProvider {
    fn provider_name(&self) -> &str {
        "spoonacular"
    }

    async fn find_by_ingredients(
        &self,
        ingredients: &str,
        limit: u32,
    ) -> Result<Vec<Recipe>, ProviderError> {
        debug!(
            "Searching {} for '{}' (limit {})",
            self.provider_name(),
            ingredients,
            limit
        );

        let number = limit.to_string();
        let response = self
            .client
            .get(format!("{}/recipes/findByIngredients", self.base_url))
            .query(&[
                ("ingredients", ingredients),
                ("number", number.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn recipe_information(&self, id: u64) -> Result<RecipeDetail, ProviderError> {
        debug!("Fetching information for recipe {}", id);

        let response = self
            .client
            .get(format!("{}/recipes/{}/information", self.base_url, id))
            .query(&[("apiKey", &self.api_key)])
            .send()
            .await?;

        Self::read_json(response).await
    }
}
