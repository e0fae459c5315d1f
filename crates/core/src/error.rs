//! Engine error taxonomy.
//!
//! Only *fatal* conditions become errors: a pose catalog that cannot be
//! loaded or is structurally wrong must abort startup loudly rather than let
//! the service run on partial data. Everything that can go wrong during a
//! single match request (a pose with no catalog record, a pose with no
//! image) is recovered by omission and logged, never surfaced here.

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read pose catalog: {0}")]
    CatalogRead(std::io::Error),
    #[error("failed to parse pose catalog: {0}")]
    CatalogParse(csv::Error),
    #[error("pose catalog is missing required column `{0}`")]
    CatalogMissingColumn(&'static str),
    #[error("pose catalog contains no usable rows")]
    CatalogEmpty,
    #[error("media store error: {0}")]
    Media(#[from] spr_media::MediaError),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
