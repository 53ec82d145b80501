//! Ephemeral state of one search session.
//!
//! Every user action is a method that updates the session in place. Nothing
//! here performs I/O or outlives the process.

use crate::dietary::{DietaryFilter, DietaryFilters};
use crate::error::ClientError;
use crate::model::Recipe;

/// Offered for one-tap adding
pub const COMMON_INGREDIENTS: [&str; 21] = [
    "chicken", "beef", "pork", "fish", "eggs", "milk", "cheese", "butter", "onions", "garlic",
    "tomatoes", "potatoes", "carrots", "broccoli", "rice", "pasta", "bread", "flour",
    "olive oil", "salt", "pepper",
];

pub const NO_RESULTS_MESSAGE: &str = "No recipes found with your current ingredients and \
     dietary preferences. Try removing some filters or adding more ingredients.";

/// Unique, non-blank ingredients in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSet {
    items: Vec<String>,
}

impl IngredientSet {
    /// Add a trimmed ingredient. Returns false for blanks and duplicates.
    pub fn add(&mut self, raw: &str) -> bool {
        let ingredient = raw.trim();
        if ingredient.is_empty() || self.contains(ingredient) {
            return false;
        }

        self.items.push(ingredient.to_string());
        true
    }

    pub fn remove(&mut self, ingredient: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item != ingredient);
        self.items.len() != before
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.items.iter().any(|item| item == ingredient)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Comma-joined value for the `ingredients` parameter
    pub fn query(&self) -> String {
        self.items.join(",")
    }
}

/// Favorited recipes, unique by id.
///
/// A recipe without an id cannot be told apart from others and is never
/// stored.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    recipes: Vec<Recipe>,
}

impl Favorites {
    /// Add or remove `recipe`. Returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, recipe: &Recipe) -> bool {
        let Some(id) = recipe.id() else {
            return false;
        };

        if self.contains(id) {
            self.recipes.retain(|fav| fav.id() != Some(id));
            false
        } else {
            self.recipes.push(recipe.clone());
            true
        }
    }

    /// Mark `recipe` as a favorite, leaving an existing entry alone.
    /// Returns whether it is a favorite afterwards.
    pub fn add(&mut self, recipe: &Recipe) -> bool {
        match recipe.id() {
            Some(id) if self.contains(id) => true,
            Some(_) => {
                self.recipes.push(recipe.clone());
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.recipes.iter().any(|fav| fav.id() == Some(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Parameters of one proxy call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub ingredients: String,
    pub dietary: Option<String>,
}

/// Message shown above the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    NoResults,
    Error(String),
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Banner::NoResults => NO_RESULTS_MESSAGE,
            Banner::Error(message) => message,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    pub ingredients: IngredientSet,
    pub dietary: DietaryFilters,
    pub recipes: Vec<Recipe>,
    pub favorites: Favorites,
    pub selected: Option<Recipe>,
    pub loading: bool,
    pub banner: Option<Banner>,
}

impl SearchSession {
    pub fn add_ingredient(&mut self, raw: &str) -> bool {
        self.ingredients.add(raw)
    }

    pub fn remove_ingredient(&mut self, ingredient: &str) -> bool {
        self.ingredients.remove(ingredient)
    }

    /// Add one of [`COMMON_INGREDIENTS`] unless it is already present
    pub fn quick_add(&mut self, ingredient: &str) -> bool {
        COMMON_INGREDIENTS.contains(&ingredient) && self.ingredients.add(ingredient)
    }

    pub fn toggle_dietary(&mut self, filter: DietaryFilter) {
        self.dietary.toggle(filter);
    }

    pub fn toggle_favorite(&mut self, recipe: &Recipe) -> bool {
        self.favorites.toggle(recipe)
    }

    /// Favorite every current result whose id is listed. Repeated ids and
    /// results that are already favorites stay favorites.
    pub fn mark_favorites(&mut self, ids: &[u64]) {
        for recipe in &self.recipes {
            if recipe.id().is_some_and(|id| ids.contains(&id)) {
                self.favorites.add(recipe);
            }
        }
    }

    /// The current result with this id, if any
    pub fn find_recipe(&self, id: u64) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id() == Some(id))
    }

    pub fn select(&mut self, recipe: Recipe) {
        self.selected = Some(recipe);
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Start a search; `None` when there is nothing to search for
    pub fn begin_search(&mut self) -> Option<SearchQuery> {
        if self.ingredients.is_empty() {
            return None;
        }

        self.loading = true;
        self.banner = None;

        Some(SearchQuery {
            ingredients: self.ingredients.query(),
            dietary: self.dietary.query(),
        })
    }

    /// Store the outcome of the search started by [`Self::begin_search`]
    pub fn finish_search(&mut self, outcome: Result<Vec<Recipe>, ClientError>) {
        self.loading = false;

        match outcome {
            Ok(recipes) => {
                if recipes.is_empty() {
                    self.banner = Some(Banner::NoResults);
                }
                self.recipes = recipes;
            }
            Err(e) => {
                self.banner = Some(Banner::Error(format!("Failed to fetch recipes: {e}")));
                self.recipes.clear();
            }
        }
    }
}
