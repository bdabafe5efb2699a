use anyhow::{Context, Result};
use locale_routing::config::Config;
use locale_routing::i18n::{BundleValidator, DirectorySource, MessageLoader};
use locale_routing::web::{build_app, AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_routing=info".parse()?),
        )
        .init();

    info!("Starting locale routing server");

    // Load configuration from environment
    let config = Config::from_env()?;
    let registry = config.registry()?;
    info!(
        "Locales: {} (default {}, prefix {})",
        registry.locales().join(", "),
        registry.default_locale(),
        registry.prefix_policy().as_str()
    );

    // Every supported locale must have a bundle before we serve anything
    let loader = MessageLoader::new(DirectorySource::new(&config.messages_dir));
    loader
        .preload(&registry)
        .with_context(|| format!("Failed to load message bundles from {}", config.messages_dir))?;

    let reports = BundleValidator::validate_registry(&registry, &loader)?;
    for (locale, report) in &reports {
        if report.has_errors() {
            warn!("Bundle {} has {} consistency errors", locale, report.errors.len());
        }
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let app = build_app(AppState::new(config, registry, loader));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
