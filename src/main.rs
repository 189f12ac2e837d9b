use tracing::{error, info};

use postboard::{Config, Database, Page, Post, PostStore};

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = postboard::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        postboard::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(&config).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(config: &Config) -> postboard::Result<()> {
    let db = Database::connect(&config.database).await?;
    let store = PostStore::with_paging(&db, config.paging.clone());

    info!("postboard store ready: {} posts", store.count().await?);

    let top = store.find_top_by_view_count(&store.first_page()).await?;
    if let Some(json) = render(&top) {
        println!("{json}");
    }

    db.close().await;
    Ok(())
}

/// Render a page as pretty JSON. A rendering failure is logged, not raised.
fn render(page: &Page<Post>) -> Option<String> {
    match serde_json::to_string_pretty(page) {
        Ok(json) => Some(json),
        Err(e) => {
            error!("cannot render posts: {e}");
            None
        }
    }
}
