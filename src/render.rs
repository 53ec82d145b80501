use std::fmt;

use html_escape::decode_html_entities;
use scraper::Html;

use crate::dietary::DietaryFilter;
use crate::model::Recipe;
use crate::session::SearchSession;

pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1546549032-9571cd6b27df?w=300&h=200&fit=crop";

const DEFAULT_READY_MINUTES: u64 = 30;
const DEFAULT_SERVINGS: u64 = 4;

pub fn image_url(recipe: &Recipe) -> &str {
    recipe.image().unwrap_or(PLACEHOLDER_IMAGE)
}

/// The recipe's own page, or its Spoonacular page when the source is unknown
pub fn source_url(recipe: &Recipe) -> String {
    if let Some(url) = recipe.source_url() {
        return url.to_string();
    }

    let slug = recipe
        .title()
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    match recipe.id() {
        Some(id) => format!("https://spoonacular.com/recipes/{}-{}", slug, id),
        None => format!("https://spoonacular.com/recipes/{}", slug),
    }
}

/// Flatten an HTML summary to a single line of text
pub fn summary_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn title(recipe: &Recipe) -> String {
    decode_html_entities(recipe.title().unwrap_or_default()).into_owned()
}

fn badges(recipe: &Recipe) -> Vec<&'static str> {
    DietaryFilter::ALL
        .into_iter()
        .filter(|filter| filter.is_satisfied_by(recipe))
        .map(|filter| filter.label())
        .collect()
}

/// One entry of the results grid
pub struct RecipeCard<'a> {
    pub recipe: &'a Recipe,
    pub favorite: bool,
}

impl fmt::Display for RecipeCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recipe = self.recipe;
        let heart = if self.favorite { "♥" } else { "♡" };

        write!(f, "{} {}", heart, title(recipe))?;
        match recipe.id() {
            Some(id) => writeln!(f, " [#{}]", id)?,
            None => writeln!(f)?,
        }
        writeln!(
            f,
            "  {} min · {} servings",
            recipe.ready_in_minutes().unwrap_or(DEFAULT_READY_MINUTES),
            recipe.servings().unwrap_or(DEFAULT_SERVINGS)
        )?;

        let badges = badges(recipe);
        if !badges.is_empty() {
            writeln!(f, "  {}", badges.join(" | "))?;
        }
        let used = recipe.used_names();
        if !used.is_empty() {
            writeln!(f, "  ✓ You have: {}", used.join(", "))?;
        }
        let missed = recipe.missed_names();
        if !missed.is_empty() {
            writeln!(f, "  Missing: {}", missed.join(", "))?;
        }
        writeln!(f, "  {}", image_url(recipe))
    }
}

/// The expanded view of a selected recipe
pub struct RecipeDetailView<'a>(pub &'a Recipe);

impl fmt::Display for RecipeDetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recipe = self.0;

        writeln!(f, "{}", title(recipe))?;
        writeln!(f, "{}", image_url(recipe))?;
        writeln!(
            f,
            "Ready in {} minutes · Serves {}",
            recipe.ready_in_minutes().unwrap_or(DEFAULT_READY_MINUTES),
            recipe.servings().unwrap_or(DEFAULT_SERVINGS)
        )?;

        if let Some(summary) = recipe.summary() {
            writeln!(f, "\nAbout this recipe\n{}", summary_text(summary))?;
        }

        writeln!(f, "\nGet the full recipe and instructions:\n{}", source_url(recipe))
    }
}

/// Everything the terminal front end prints after a search
pub struct SessionView<'a>(pub &'a SearchSession);

impl fmt::Display for SessionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;

        if let Some(banner) = &session.banner {
            writeln!(f, "{}\n", banner.message())?;
        }

        for recipe in &session.recipes {
            let favorite = recipe.id().is_some_and(|id| session.favorites.contains(id));
            writeln!(f, "{}", RecipeCard { recipe, favorite })?;
        }

        if !session.favorites.is_empty() {
            writeln!(f, "Your Favorites")?;
            for recipe in session.favorites.iter() {
                writeln!(f, "  ♥ {} → {}", title(recipe), source_url(recipe))?;
            }
            writeln!(f)?;
        }

        if let Some(selected) = &session.selected {
            write!(f, "{}", RecipeDetailView(selected))?;
        }

        Ok(())
    }
}

pub fn recipe_card(recipe: &Recipe, favorite: bool) -> String {
    RecipeCard { recipe, favorite }.to_string()
}

pub fn recipe_detail(recipe: &Recipe) -> String {
    RecipeDetailView(recipe).to_string()
}

pub fn render_session(session: &SearchSession) -> String {
    SessionView(session).to_string()
}
