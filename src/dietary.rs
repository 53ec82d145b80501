use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::model::Recipe;

/// One of the four dietary attributes a recipe can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DietaryFilter {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
}

impl DietaryFilter {
    pub const ALL: [DietaryFilter; 4] = [
        DietaryFilter::Vegetarian,
        DietaryFilter::Vegan,
        DietaryFilter::GlutenFree,
        DietaryFilter::DairyFree,
    ];

    /// Name used on the wire (`dietary=vegan,glutenFree`)
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryFilter::Vegetarian => "vegetarian",
            DietaryFilter::Vegan => "vegan",
            DietaryFilter::GlutenFree => "glutenFree",
            DietaryFilter::DairyFree => "dairyFree",
        }
    }

    /// Human-readable label, e.g. "Gluten Free"
    pub fn label(&self) -> &'static str {
        match self {
            DietaryFilter::Vegetarian => "Vegetarian",
            DietaryFilter::Vegan => "Vegan",
            DietaryFilter::GlutenFree => "Gluten Free",
            DietaryFilter::DairyFree => "Dairy Free",
        }
    }

    /// The recipe's flag for this attribute, `None` when never looked up
    pub fn flag(&self, recipe: &Recipe) -> Option<bool> {
        recipe.flag(self.as_str())
    }

    /// Only an explicit `true` satisfies a filter
    pub fn is_satisfied_by(&self, recipe: &Recipe) -> bool {
        self.flag(recipe) == Some(true)
    }
}

impl fmt::Display for DietaryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietaryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DietaryFilter::ALL
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// The `dietary` query parameter after parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DietaryRequest {
    pub filters: Vec<DietaryFilter>,
    /// Names that matched no known filter; these never exclude a recipe
    pub unrecognized: Vec<String>,
}

impl DietaryRequest {
    /// Parse a comma-separated list.
    ///
    /// Tokens are compared exactly as sent, so `" glutenFree"` is an
    /// unrecognized name. Empty tokens are skipped.
    pub fn parse(raw: &str) -> Self {
        let mut request = DietaryRequest::default();

        for token in raw.split(',').filter(|t| !t.is_empty()) {
            match token.parse::<DietaryFilter>() {
                Ok(filter) => {
                    if !request.filters.contains(&filter) {
                        request.filters.push(filter);
                    }
                }
                Err(name) => {
                    warn!("Ignoring unrecognized dietary filter '{}'", name);
                    request.unrecognized.push(name);
                }
            }
        }

        request
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// True when every requested filter is exactly `true` on the recipe
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.filters.iter().all(|filter| filter.is_satisfied_by(recipe))
    }

    /// Drop every recipe that fails at least one requested filter
    pub fn apply(&self, recipes: Vec<Recipe>) -> Vec<Recipe> {
        if self.is_empty() {
            return recipes;
        }

        recipes.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// The four user-facing dietary toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DietaryFilters {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
}

impl DietaryFilters {
    fn slot(&mut self, filter: DietaryFilter) -> &mut bool {
        match filter {
            DietaryFilter::Vegetarian => &mut self.vegetarian,
            DietaryFilter::Vegan => &mut self.vegan,
            DietaryFilter::GlutenFree => &mut self.gluten_free,
            DietaryFilter::DairyFree => &mut self.dairy_free,
        }
    }

    pub fn is_set(&self, filter: DietaryFilter) -> bool {
        match filter {
            DietaryFilter::Vegetarian => self.vegetarian,
            DietaryFilter::Vegan => self.vegan,
            DietaryFilter::GlutenFree => self.gluten_free,
            DietaryFilter::DairyFree => self.dairy_free,
        }
    }

    pub fn set(&mut self, filter: DietaryFilter, enabled: bool) {
        *self.slot(filter) = enabled;
    }

    pub fn toggle(&mut self, filter: DietaryFilter) {
        let slot = self.slot(filter);
        *slot = !*slot;
    }

    /// Enabled filters in their canonical order
    pub fn active(&self) -> Vec<DietaryFilter> {
        DietaryFilter::ALL
            .into_iter()
            .filter(|f| self.is_set(*f))
            .collect()
    }

    /// Value for the `dietary` parameter, `None` when nothing is enabled
    pub fn query(&self) -> Option<String> {
        let active = self.active();
        if active.is_empty() {
            return None;
        }

        Some(
            active
                .iter()
                .map(DietaryFilter::as_str)
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recipe(flags: serde_json::Value) -> Recipe {
        let mut value = json!({"id": 1, "title": "Test"});
        value
            .as_object_mut()
            .unwrap()
            .extend(flags.as_object().unwrap().clone());
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_known_names() {
        let request = DietaryRequest::parse("vegan,glutenFree");
        assert_eq!(
            request.filters,
            vec![DietaryFilter::Vegan, DietaryFilter::GlutenFree]
        );
        assert!(request.unrecognized.is_empty());
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let request = DietaryRequest::parse("Vegan,keto");
        assert!(request.filters.is_empty());
        assert_eq!(request.unrecognized, vec!["Vegan", "keto"]);
    }

    #[test]
    fn test_parse_skips_empty_and_duplicate_tokens() {
        let request = DietaryRequest::parse("vegan,,vegan,");
        assert_eq!(request.filters, vec![DietaryFilter::Vegan]);
        assert!(request.unrecognized.is_empty());
    }

    #[test]
    fn test_parse_does_not_trim_tokens() {
        let request = DietaryRequest::parse("vegan, glutenFree");
        assert_eq!(request.filters, vec![DietaryFilter::Vegan]);
        assert_eq!(request.unrecognized, vec![" glutenFree"]);

        // the padded name filters nothing
        let recipe = recipe(json!({"vegan": true, "glutenFree": false}));
        assert!(request.matches(&recipe));
    }

    #[test]
    fn test_missing_flag_does_not_satisfy() {
        let request = DietaryRequest::parse("dairyFree");
        assert!(!request.matches(&recipe(json!({}))));
        assert!(!request.matches(&recipe(json!({"dairyFree": false}))));
        assert!(request.matches(&recipe(json!({"dairyFree": true}))));
    }

    #[test]
    fn test_unrecognized_names_never_exclude() {
        let request = DietaryRequest::parse("paleo");
        let kept = request.apply(vec![recipe(json!({})), recipe(json!({"vegan": false}))]);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_every_filter_must_hold() {
        let request = DietaryRequest::parse("vegan,glutenFree");
        let recipes = vec![
            recipe(json!({"vegan": true, "glutenFree": true})),
            recipe(json!({"vegan": true, "glutenFree": false})),
            recipe(json!({"vegan": true})),
        ];
        assert_eq!(request.apply(recipes).len(), 1);
    }

    #[test]
    fn test_toggles_build_query() {
        let mut filters = DietaryFilters::default();
        assert_eq!(filters.query(), None);

        filters.toggle(DietaryFilter::DairyFree);
        filters.set(DietaryFilter::Vegetarian, true);
        assert_eq!(filters.query().as_deref(), Some("vegetarian,dairyFree"));

        filters.toggle(DietaryFilter::DairyFree);
        assert_eq!(filters.active(), vec![DietaryFilter::Vegetarian]);
    }
}
