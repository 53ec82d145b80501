//! Recipe discovery for the ingredients you already have.
//!
//! The [`server`] module exposes a search proxy in front of the Spoonacular
//! API. One request finds recipes by ingredients, looks up details for each
//! hit concurrently and filters the merged records by dietary flags. The
//! [`session`], [`client`] and [`render`] modules make up a small terminal
//! front end for that proxy.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use fridgefinds::{client::ProxyClient, session::SearchSession};
//!
//! let mut session = SearchSession::default();
//! session.add_ingredient("chicken");
//! session.add_ingredient("rice");
//!
//! let client = ProxyClient::new("http://127.0.0.1:3000", None)?;
//! if let Some(query) = session.begin_search() {
//!     let outcome = client.search(&query).await;
//!     session.finish_search(outcome);
//! }
//! print!("{}", fridgefinds::render::render_session(&session));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dietary;
pub mod error;
pub mod model;
pub mod providers;
pub mod render;
pub mod search;
pub mod server;
pub mod session;

pub use config::Settings;
pub use dietary::{DietaryFilter, DietaryFilters, DietaryRequest};
pub use error::{ClientError, ProviderError, SearchError, StartupError};
pub use model::{Enrichment, Recipe, RecipeDetail};
pub use search::{search_recipes, SearchRequest};
