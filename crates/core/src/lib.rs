//! # SPR Core
//!
//! Core matching logic for the SPR symptom-to-pose recommender.
//!
//! This crate contains the pure matching pipeline and its catalogs:
//! - Condition catalog (embedded, alias-aware) and pose catalog (CSV-loaded)
//! - Keyword extraction with stop-word filtering
//! - Phrase, single-term and fuzzy condition matching
//! - Recommendation assembly joining matches to pose records and media
//!
//! **No API concerns**: HTTP servers, request/response DTOs, and OpenAPI
//! documentation belong in `api-rest`.

#![warn(rust_2018_idioms)]

pub mod conditions;
pub mod config;
pub mod constants;
pub mod error;
pub mod matcher;
pub mod poses;
pub mod recommend;
pub mod text;

pub use conditions::{ConditionAlias, ConditionCatalog, ConditionEntry};
pub use config::CoreConfig;
pub use error::{EngineError, EngineResult};
pub use matcher::{ConditionMatch, MatchKind, SymptomMatcher};
pub use poses::{PoseCatalog, PoseRecord};
pub use recommend::{Recommendation, RecommendationGroup, RecommendationService};
pub use spr_types::{ConditionKey, KeyError, PoseKey};
