use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use term_annotator::{DEFAULT_TARGET_LOCALE, Enricher, TermDictionary};
use term_annotator_web::{AppState, router};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const BUNDLED_DICTIONARY: &str = include_str!("../../dictionaries/android_kotlin_tr.json");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let dictionary = match env::var("TERM_DICTIONARY").ok().map(PathBuf::from) {
        Some(path) => {
            info!("Loading dictionary from {}", path.display());
            TermDictionary::from_file(&path)
        }
        None => {
            info!("TERM_DICTIONARY not set, using bundled dictionary");
            TermDictionary::from_json_str(BUNDLED_DICTIONARY)
        }
    }
    .map_err(|e| format!("Failed to load dictionary: {}", e))?;

    let locale = env::var("TERM_LOCALE").unwrap_or_else(|_| DEFAULT_TARGET_LOCALE.to_string());
    let mut enricher = Enricher::new(dictionary);
    enricher.with_locale(&locale)?;
    info!(
        "{} terms loaded, target locale '{}'",
        enricher.dictionary().len(),
        enricher.get_locale()
    );

    let state = AppState {
        enricher: Arc::new(enricher),
    };
    let app = router(state).layer(TraceLayer::new_for_http());

    let addr = env::var("TERM_ANNOTATOR_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
