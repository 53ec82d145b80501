use std::error::Error;

use clap::{Parser, Subcommand};
use log::{debug, info};

use fridgefinds::client::ProxyClient;
use fridgefinds::dietary::DietaryFilter;
use fridgefinds::render::render_session;
use fridgefinds::session::SearchSession;
use fridgefinds::{server, Settings, StartupError};

#[derive(Parser)]
#[command(name = "fridgefinds", version, about = "Find recipes for what is in your fridge")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the recipe search proxy
    Serve {
        /// Address to bind (overrides configuration)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides configuration)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Search a running proxy and print the results
    Search {
        /// Ingredients on hand
        #[arg(required = true)]
        ingredients: Vec<String>,
        #[arg(long)]
        vegetarian: bool,
        #[arg(long)]
        vegan: bool,
        #[arg(long)]
        gluten_free: bool,
        #[arg(long)]
        dairy_free: bool,
        /// Base URL of the proxy
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        proxy_url: String,
        /// Mark a result as favorite by id (repeatable)
        #[arg(long = "favorite", value_name = "ID")]
        favorites: Vec<u64>,
        /// Show the full details of one result
        #[arg(long, value_name = "ID")]
        show: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => {
            let mut settings = Settings::load().map_err(StartupError::Config)?;
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            debug!("{:#?}", settings.server);

            info!("Starting FridgeFinds proxy");
            server::serve(settings).await?;
        }
        Command::Search {
            ingredients,
            vegetarian,
            vegan,
            gluten_free,
            dairy_free,
            proxy_url,
            favorites,
            show,
        } => {
            let mut session = SearchSession::default();
            for ingredient in &ingredients {
                session.add_ingredient(ingredient);
            }
            session.dietary.set(DietaryFilter::Vegetarian, vegetarian);
            session.dietary.set(DietaryFilter::Vegan, vegan);
            session.dietary.set(DietaryFilter::GlutenFree, gluten_free);
            session.dietary.set(DietaryFilter::DairyFree, dairy_free);

            let query = session
                .begin_search()
                .ok_or(fridgefinds::ClientError::NoIngredients)?;
            let client = ProxyClient::new(proxy_url, None)?;
            let outcome = client.search(&query).await;
            session.finish_search(outcome);

            session.mark_favorites(&favorites);
            if let Some(recipe) = show.and_then(|id| session.find_recipe(id).cloned()) {
                session.select(recipe);
            }

            print!("{}", render_session(&session));
        }
    }

    Ok(())
}
