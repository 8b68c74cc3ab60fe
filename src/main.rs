use clap::Parser;
use recipes::core::config::{self, Overrides};
use recipes::core::recipe::{SearchScope, SortKey};
use recipes::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "recipes", about = "Browse a recipe catalog from the terminal")]
struct Args {
    /// Recipe API base URL (overrides config and RECIPES_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Initial sort order of the list
    #[arg(short, long, value_enum)]
    sort: Option<SortKey>,

    /// Fields the search box matches against
    #[arg(long, value_enum)]
    scope: Option<SearchScope>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // A broken config file is reported after the logger is up
    let loaded = config::load_config();
    let resolved = config::resolve(
        loaded.as_ref().unwrap_or(&config::RecipesConfig::default()),
        &Overrides {
            base_url: args.base_url,
            sort_key: args.sort,
            scope: args.scope,
        },
    );

    // Initialize file logger - writes to recipes.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("recipes.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Err(e) = &loaded {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!(
        "Recipes starting up against {} ({}, {})",
        resolved.base_url,
        resolved.sort_key.label(),
        resolved.scope.label()
    );

    tui::run(resolved)
}
