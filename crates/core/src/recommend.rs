//! Recommendation assembly: matched conditions joined to pose records and
//! media.
//!
//! The assembler never fails: a pose referenced by a condition entry but
//! absent from the pose catalog is logged and omitted, a pose with no image
//! keeps its steps and video, and an input that matches nothing produces an
//! empty result the caller must surface as an explicit "no recommendation
//! found" response.

use crate::conditions::ConditionCatalog;
use crate::matcher::{ConditionMatch, MatchKind, SymptomMatcher};
use crate::poses::{PoseCatalog, PoseRecord};
use spr_media::{MediaPayload, MediaStore};
use spr_types::PoseKey;

/// One recommended pose with its instructional content and optional image.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub pose: PoseKey,
    pub record: PoseRecord,
    pub image: Option<MediaPayload>,
}

/// All recommendations for one matched term.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationGroup {
    /// Display label: the condition identifier, or the literal input word
    /// for fuzzy matches.
    pub term: String,
    pub kind: MatchKind,
    pub recommendations: Vec<Recommendation>,
}

/// The top-level matching service: catalogs plus (optionally) a media store.
///
/// Both catalogs are established at startup and never mutated, so a shared
/// reference to this service may be used from any number of threads without
/// coordination.
#[derive(Debug)]
pub struct RecommendationService {
    conditions: ConditionCatalog,
    poses: PoseCatalog,
    media: Option<MediaStore>,
}

impl RecommendationService {
    /// Creates the service. Pass `None` for `media` to run without images
    /// (the CLI does this; the server always supplies a store).
    pub fn new(conditions: ConditionCatalog, poses: PoseCatalog, media: Option<MediaStore>) -> Self {
        conditions.warn_dangling_poses(|pose| poses.contains(pose));
        Self {
            conditions,
            poses,
            media,
        }
    }

    /// Matches one raw input and assembles full recommendation groups.
    ///
    /// An empty vector means no condition matched anywhere in the input.
    pub fn recommend(&self, input: &str) -> Vec<RecommendationGroup> {
        let matcher = SymptomMatcher::new(&self.conditions);
        matcher
            .match_input(input)
            .into_iter()
            .map(|m| self.assemble(m))
            .collect()
    }

    fn assemble(&self, matched: ConditionMatch) -> RecommendationGroup {
        let mut recommendations = Vec::with_capacity(matched.poses.len());

        for pose in matched.poses {
            let Some(record) = self.poses.get(&pose) else {
                tracing::warn!(term = %matched.term, pose = %pose, "pose has no catalog record");
                continue;
            };

            let image = self.media.as_ref().and_then(|m| m.payload_for(&pose));

            recommendations.push(Recommendation {
                pose,
                record: record.clone(),
                image,
            });
        }

        RecommendationGroup {
            term: matched.term,
            kind: matched.kind,
            recommendations,
        }
    }

    pub fn conditions(&self) -> &ConditionCatalog {
        &self.conditions
    }

    pub fn poses(&self) -> &PoseCatalog {
        &self.poses
    }

    pub fn media(&self) -> Option<&MediaStore> {
        self.media.as_ref()
    }
}
