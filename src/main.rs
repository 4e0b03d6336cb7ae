//! node-suggest: autocomplete and suggestions for content-repository nodes
//!
//! This is the main entry point for the application.

use anyhow::Result;
use node_suggest::{
    cache::MokaTemplateCache,
    config::{self, Settings},
    content::InMemoryContentRepository,
    metrics::SuggestMetrics,
    search::{ElasticSearchClient, SearchClient},
    suggest::{QueryTemplateBuilder, SuggestController},
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so the debug flag can pick the level
    let settings = config::load_settings()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_filter())),
        )
        .with_target(false)
        .init();

    info!("Starting node-suggest v{}", node_suggest::VERSION);

    let content = load_content(&settings)?;
    info!("Loaded {} content nodes", content.len());

    let client = match settings.elasticsearch {
        Some(ref es) => {
            let client = ElasticSearchClient::with_settings(es)?;
            info!("Elasticsearch client initialized for index {}", client.index());
            Some(Arc::new(client) as Arc<dyn SearchClient>)
        }
        None => None,
    };

    let cache = MokaTemplateCache::with_settings(&settings.cache);
    let templates = QueryTemplateBuilder::new(Arc::new(cache), Arc::new(content));
    let controller = SuggestController::new(client, templates, Arc::new(SuggestMetrics::new()))?;

    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    let state = AppState::new(controller);
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load the content repository named in the settings, or an empty one
fn load_content(settings: &Settings) -> Result<InMemoryContentRepository> {
    match settings.content.nodes_path {
        Some(ref path) => {
            info!("Loading content nodes from: {}", path.display());
            Ok(InMemoryContentRepository::from_file(path)?)
        }
        None => {
            warn!("No content nodes configured, every suggestion request will fail to build");
            Ok(InMemoryContentRepository::default())
        }
    }
}
