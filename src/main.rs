//! Main entry point for the SPR application.
//!
//! Resolves configuration from the environment, loads the pose catalog and
//! media index (failing loudly on structural problems), and serves the REST
//! API. The matching engine itself is stateless per request; everything
//! loaded here is immutable for the lifetime of the process.

use spr_core::{
    config::{resolve_media_dir, resolve_pose_catalog},
    ConditionCatalog, CoreConfig, PoseCatalog, RecommendationService,
};
use spr_media::MediaStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the SPR server
///
/// # Environment Variables
/// - `SPR_ADDR`: server address (default: "0.0.0.0:3000")
/// - `SPR_POSE_CATALOG`: pose catalog CSV path (default: `data/pose_catalog.csv`, searched)
/// - `SPR_MEDIA_DIR`: media root directory (default: `media/`, searched)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("spr_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SPR_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting SPR REST on {}", addr);

    let catalog_override = std::env::var("SPR_POSE_CATALOG").ok().map(PathBuf::from);
    let media_override = std::env::var("SPR_MEDIA_DIR").ok().map(PathBuf::from);

    let cfg = CoreConfig::new(
        resolve_pose_catalog(catalog_override)?,
        resolve_media_dir(media_override)?,
    )?;

    let conditions = ConditionCatalog::builtin();
    let poses = PoseCatalog::load(cfg.pose_catalog_path())?;
    let media = MediaStore::open(cfg.media_dir())?;

    tracing::info!(
        conditions = conditions.len(),
        poses = poses.len(),
        images = media.len(),
        "catalogs loaded"
    );

    let service = Arc::new(RecommendationService::new(conditions, poses, Some(media)));
    let app = api_rest::router(service);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
