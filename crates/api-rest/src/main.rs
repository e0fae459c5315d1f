//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging: it serves the same
//! router as the workspace's main `spr-run` binary, but skips `.env`
//! loading and uses the `api_rest` log target.

use spr_core::{
    config::{resolve_media_dir, resolve_pose_catalog},
    ConditionCatalog, CoreConfig, PoseCatalog, RecommendationService,
};
use spr_media::MediaStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the SPR REST API server
///
/// # Environment Variables
/// - `SPR_ADDR`: server address (default: "0.0.0.0:3000")
/// - `SPR_POSE_CATALOG`: pose catalog CSV path (default: searched)
/// - `SPR_MEDIA_DIR`: media root directory (default: searched)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the pose catalog or media directory cannot be resolved or loaded, or
/// - the server address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SPR_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting SPR REST API on {}", addr);

    let catalog_override = std::env::var("SPR_POSE_CATALOG").ok().map(PathBuf::from);
    let media_override = std::env::var("SPR_MEDIA_DIR").ok().map(PathBuf::from);

    let cfg = CoreConfig::new(
        resolve_pose_catalog(catalog_override)?,
        resolve_media_dir(media_override)?,
    )?;

    let poses = PoseCatalog::load(cfg.pose_catalog_path())?;
    let media = MediaStore::open(cfg.media_dir())?;

    tracing::info!(
        poses = poses.len(),
        images = media.len(),
        "loaded catalogs"
    );

    let service = Arc::new(RecommendationService::new(
        ConditionCatalog::builtin(),
        poses,
        Some(media),
    ));

    let app = api_rest::router(service);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
