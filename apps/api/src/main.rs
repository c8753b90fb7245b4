mod auth;
mod config;
mod db;
mod document;
mod editor;
mod errors;
mod export;
mod generation;
mod llm_client;
mod models;
mod render;
mod resumes;
mod routes;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::JwtKeys;
use crate::config::Config;
use crate::db::create_pool;
use crate::editor::session::EditorRegistry;
use crate::export::S3PrintSurface;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::resumes::seed::seed_demo_resume;
use crate::resumes::store::{PgResumeStore, ResumeStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store: Arc<dyn ResumeStore> = Arc::new(PgResumeStore::new(db));

    if let Some(demo_user) = config.demo_user_id {
        seed_demo_resume(store.as_ref(), demo_user).await?;
    }

    // Initialize S3 / MinIO print surface
    let s3 = build_s3_client(&config).await;
    let print = Arc::new(S3PrintSurface::new(
        s3,
        config.s3_bucket.clone(),
        Duration::from_secs(config.export_url_ttl_secs),
    ));
    info!("S3 print surface initialized (bucket: {})", config.s3_bucket);

    // Initialize LLM client (optional)
    let generator: Option<Arc<dyn TextGenerator>> = match &config.groq_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(llm))
        }
        None => {
            warn!("GROQ_API_KEY not set, AI drafts are disabled");
            None
        }
    };

    let editors = EditorRegistry::default();
    editors.spawn_sweeper(Duration::from_secs(config.editor_idle_ttl_secs));
    info!(
        "Editor sessions expire after {}s idle",
        config.editor_idle_ttl_secs
    );

    let state = AppState {
        store,
        generator,
        print,
        editors,
        jwt: JwtKeys::from_config(&config),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "vitae-static",
    );

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    // MinIO serves buckets by path, not by virtual host.
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
