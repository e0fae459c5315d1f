//! Constants used throughout the SPR core crate.
//!
//! This module contains all path and threshold constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Default relative path of the pose catalog file.
pub const DEFAULT_POSE_CATALOG_PATH: &str = "data/pose_catalog.csv";

/// Default relative path of the media directory (one subdirectory per pose).
pub const DEFAULT_MEDIA_DIR: &str = "media";

/// Required pose catalog column: pose display name.
pub const CATALOG_COLUMN_POSE: &str = "Pose";

/// Required pose catalog column: instructional steps.
pub const CATALOG_COLUMN_STEP: &str = "Step";

/// Required pose catalog column: video reference.
pub const CATALOG_COLUMN_VIDEO: &str = "Video";

/// Minimum normalized similarity for the fuzzy fallback matcher to accept a
/// candidate condition key (0–1 scale).
pub const FUZZY_SIMILARITY_THRESHOLD: f64 = 0.8;
