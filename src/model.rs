use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A recipe as returned to callers of the search endpoint.
///
/// The record is kept exactly as the provider sent it: whatever keys the
/// find-by-ingredients hit carried, with the detail lookup's keys laid over
/// them once it succeeds. Accessors read the handful of fields the search
/// and the front end care about and return `None` when a field is missing,
/// `null` or of an unexpected type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe {
    fields: Map<String, Value>,
}

/// Payload of the per-recipe information lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeDetail {
    fields: Map<String, Value>,
}

/// Outcome of enriching one recipe
#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment {
    /// The detail lookup succeeded
    Detailed(RecipeDetail),
    /// The lookup failed or was impossible; the basic record is kept as-is
    BasicOnly,
}

impl From<Map<String, Value>> for Recipe {
    fn from(fields: Map<String, Value>) -> Self {
        Recipe { fields }
    }
}

impl From<Map<String, Value>> for RecipeDetail {
    fn from(fields: Map<String, Value>) -> Self {
        RecipeDetail { fields }
    }
}

impl RecipeDetail {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Recipe {
    /// Build the final record from a basic recipe and its enrichment outcome
    pub fn from_parts(basic: Recipe, enrichment: Enrichment) -> Recipe {
        match enrichment {
            Enrichment::Detailed(detail) => basic.merge(detail),
            Enrichment::BasicOnly => basic,
        }
    }

    /// Shallow merge: every key present in `detail` replaces ours
    pub fn merge(mut self, detail: RecipeDetail) -> Recipe {
        self.fields.extend(detail.fields);
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Provider id, used for the detail lookup and for favorites
    pub fn id(&self) -> Option<u64> {
        self.get("id").and_then(Value::as_u64)
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn image(&self) -> Option<&str> {
        self.str_field("image")
    }

    pub fn summary(&self) -> Option<&str> {
        self.str_field("summary")
    }

    pub fn source_url(&self) -> Option<&str> {
        self.str_field("sourceUrl")
    }

    pub fn ready_in_minutes(&self) -> Option<u64> {
        self.get("readyInMinutes").and_then(Value::as_u64)
    }

    pub fn servings(&self) -> Option<u64> {
        self.get("servings").and_then(Value::as_u64)
    }

    /// A boolean attribute such as `vegan`; non-boolean values read as `None`
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn used_names(&self) -> Vec<&str> {
        self.ingredient_names("usedIngredients")
    }

    pub fn missed_names(&self) -> Vec<&str> {
        self.ingredient_names("missedIngredients")
    }

    fn ingredient_names(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("name").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn basic() -> Recipe {
        serde_json::from_value(json!({
            "id": 716429,
            "title": "Pasta with Garlic",
            "image": "https://img.spoonacular.com/recipes/716429-312x231.jpg",
            "imageType": "jpg",
            "usedIngredientCount": 1,
            "usedIngredients": [{"id": 11215, "name": "garlic", "amount": 2.0}],
            "missedIngredients": [{"name": "pasta"}],
            "likes": 3
        }))
        .unwrap()
    }

    #[test]
    fn test_basic_recipe_keeps_unknown_fields() {
        let recipe = basic();
        assert_eq!(recipe.id(), Some(716429));
        assert_eq!(recipe.used_names(), vec!["garlic"]);
        assert_eq!(recipe.missed_names(), vec!["pasta"]);
        assert_eq!(recipe.get("likes"), Some(&json!(3)));
        assert_eq!(recipe.get("usedIngredients").unwrap()[0]["amount"], json!(2.0));
    }

    #[test]
    fn test_basic_only_is_passed_through_unchanged() {
        let recipe = Recipe::from_parts(basic(), Enrichment::BasicOnly);
        let json = serde_json::to_value(&recipe).unwrap();

        for key in ["readyInMinutes", "servings", "vegan", "summary", "sourceUrl"] {
            assert!(json.get(key).is_none(), "{key} should be absent");
        }
        assert_eq!(json["title"], "Pasta with Garlic");
        assert_eq!(json["imageType"], "jpg");
    }

    #[test]
    fn test_null_and_missing_fields_are_tolerated() {
        let recipe: Recipe = serde_json::from_value(json!({
            "title": null,
            "usedIngredients": null,
            "missedIngredients": [{"name": null}, {"name": "salt"}],
            "servings": "four"
        }))
        .unwrap();

        assert_eq!(recipe.id(), None);
        assert_eq!(recipe.title(), None);
        assert!(recipe.used_names().is_empty());
        assert_eq!(recipe.missed_names(), vec!["salt"]);
        assert_eq!(recipe.servings(), None);

        // nothing is invented on the way out
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["usedIngredients"], Value::Null);
        assert!(json.get("image").is_none());
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_detail_overwrites_on_collision() {
        let detail: RecipeDetail = serde_json::from_value(json!({
            "id": 716429,
            "title": "Pasta with Garlic, Scallions and Cauliflower",
            "readyInMinutes": 45,
            "servings": 2,
            "vegetarian": true,
            "vegan": false,
            "glutenFree": false,
            "dairyFree": true,
            "summary": "<b>Tasty</b> pasta",
            "sourceUrl": "https://example.com/pasta",
            "imageType": "png",
            "extendedIngredients": []
        }))
        .unwrap();

        let recipe = Recipe::from_parts(basic(), Enrichment::Detailed(detail));
        assert_eq!(
            recipe.title(),
            Some("Pasta with Garlic, Scallions and Cauliflower")
        );
        assert_eq!(recipe.ready_in_minutes(), Some(45));
        assert_eq!(recipe.flag("vegan"), Some(false));
        assert_eq!(recipe.flag("dairyFree"), Some(true));
        // untouched basic fields survive
        assert_eq!(recipe.used_names(), vec!["garlic"]);
        assert!(recipe.image().is_some());
        assert_eq!(recipe.get("imageType"), Some(&json!("png")));
        assert!(recipe.fields().contains_key("extendedIngredients"));
    }

    #[test]
    fn test_detail_null_replaces_basic_value() {
        let detail: RecipeDetail = serde_json::from_value(json!({"image": null})).unwrap();
        let recipe = basic().merge(detail);

        assert_eq!(recipe.image(), None);
        assert_eq!(recipe.get("image"), Some(&Value::Null));
    }
}
