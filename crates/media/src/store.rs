//! Pose-keyed media store backed by a directory tree.
//!
//! # Storage Layout
//!
//! One subdirectory per pose key under a fixed root:
//!
//! ```text
//! media/                       # store root
//! ├── bridge_pose/
//! │   ├── bridge.jpg           # first image (lexicographically) is served
//! │   └── alternate.png
//! └── savasana/
//!     └── savasana.png
//! ```
//!
//! # Index
//!
//! The directory tree is scanned once when the store is opened and resolved
//! into an in-memory `pose key → image path` index. Request-time lookups are
//! a map probe plus one file read, keeping per-request I/O independent of
//! the filesystem shape. Changes to the tree after startup are not observed;
//! reopen the store to re-index.
//!
//! # Determinism
//!
//! Within a pose directory, the *lexicographically first* file with a
//! recognized image extension (case-insensitive `.jpg`, `.jpeg`, `.png`) is
//! chosen, so repeated runs against an unchanged tree always serve the same
//! image.

use crate::MediaError;
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use spr_types::PoseKey;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Image file extensions the store recognizes, matched case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// A pose's resolved image, as recorded by the startup scan.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MediaRecord {
    /// Absolute path of the image file.
    pub path: PathBuf,
    /// Size of the image file at index time.
    pub size_bytes: u64,
    /// UTC timestamp of the indexing scan.
    pub indexed_at: DateTime<Utc>,
}

/// An image payload ready for embedding in a response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MediaPayload {
    /// Best-effort detected MIME type (e.g. `image/png`). `None` when the
    /// bytes match no known signature.
    pub media_type: Option<String>,
    /// Base64-encoded image bytes.
    pub data: String,
}

/// Read-only store of pose images.
#[derive(Debug)]
pub struct MediaStore {
    root: PathBuf,
    index: HashMap<String, MediaRecord>,
}

impl MediaStore {
    /// Opens the store rooted at `root` and builds the pose → image index.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if the root does not exist, is not a directory,
    /// or cannot be scanned. Individual pose directories that cannot be read
    /// are logged and skipped; a pose directory with no image files simply
    /// produces no index entry.
    pub fn open(root: &Path) -> Result<Self, MediaError> {
        if !root.exists() {
            return Err(MediaError::InvalidRoot(format!(
                "directory does not exist: {}",
                root.display()
            )));
        }

        if !root.is_dir() {
            return Err(MediaError::InvalidRoot(format!(
                "path is not a directory: {}",
                root.display()
            )));
        }

        let root = root.canonicalize().map_err(|e| {
            MediaError::InvalidRoot(format!("cannot canonicalize {}: {}", root.display(), e))
        })?;

        let indexed_at = Utc::now();
        let mut index = HashMap::new();

        let mut pose_dirs: Vec<PathBuf> = fs::read_dir(&root)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        pose_dirs.sort_unstable();

        for dir in pose_dirs {
            let Some(pose) = dir.file_name().and_then(|os| os.to_str()) else {
                tracing::warn!(path = %dir.display(), "skipping non-UTF-8 media directory");
                continue;
            };

            match first_image_in(&dir) {
                Ok(Some(path)) => {
                    let size_bytes = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
                    index.insert(
                        pose.to_string(),
                        MediaRecord {
                            path,
                            size_bytes,
                            indexed_at,
                        },
                    );
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(pose, error = %e, "skipping unreadable media directory");
                }
            }
        }

        tracing::info!(
            root = %root.display(),
            poses = index.len(),
            "indexed media store"
        );

        Ok(Self { root, index })
    }

    /// Returns the root directory the store was opened at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the index holds an image for this pose.
    pub fn contains(&self, pose: &PoseKey) -> bool {
        self.index.contains_key(pose.as_str())
    }

    /// The index record for a pose, if any.
    pub fn record_for(&self, pose: &PoseKey) -> Option<&MediaRecord> {
        self.index.get(pose.as_str())
    }

    /// Reads and encodes the image for a pose.
    ///
    /// Returns `None` when the pose has no indexed image, or when the
    /// indexed file can no longer be read (logged, treated as a plain miss —
    /// a vanished file is never a transient failure to retry).
    pub fn payload_for(&self, pose: &PoseKey) -> Option<MediaPayload> {
        let record = self.index.get(pose.as_str())?;

        let bytes = match fs::read(&record.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    pose = %pose,
                    path = %record.path.display(),
                    error = %e,
                    "indexed media file is unreadable"
                );
                return None;
            }
        };

        let media_type = infer::get(&bytes).map(|kind| kind.mime_type().to_string());

        Some(MediaPayload {
            media_type,
            data: general_purpose::STANDARD.encode(&bytes),
        })
    }

    /// Number of poses with an indexed image.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Finds the lexicographically first image file in a directory.
fn first_image_in(dir: &Path) -> std::io::Result<Option<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_image_extension(path))
        .collect();
    files.sort_unstable();
    Ok(files.into_iter().next())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
