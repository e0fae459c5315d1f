//! # API REST
//!
//! REST API implementation for SPR.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! The matching engine lives in `spr-core`; this crate only maps requests
//! onto it and core results back into wire types.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use spr_core::{MatchKind, RecommendationService};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    service: Arc<RecommendationService>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, recommend, list_conditions, list_poses),
    components(schemas(
        HealthRes,
        RecommendReq,
        RecommendRes,
        RecommendationGroupRes,
        PoseRecommendationRes,
        ImageRes,
        ConditionsRes,
        AliasRes,
        PosesRes,
    ))
)]
struct ApiDoc;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Recommendation request: one free-text symptom description.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecommendReq {
    pub symptoms: String,
}

/// Recommendation response.
///
/// `found` is `false` when no condition matched anywhere in the input; the
/// empty group list is then an explicit "no recommendation found" signal,
/// not a silent success.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecommendRes {
    pub found: bool,
    pub message: String,
    pub groups: Vec<RecommendationGroupRes>,
}

/// Recommendations for one matched term.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecommendationGroupRes {
    /// The condition identifier, or the literal input word for fuzzy matches.
    pub term: String,
    /// How the term was matched: `phrase`, `exact` or `fuzzy`.
    pub kind: String,
    pub recommendations: Vec<PoseRecommendationRes>,
}

/// One recommended pose.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PoseRecommendationRes {
    pub pose: String,
    pub steps: String,
    pub video: String,
    /// Embedded image payload; absent when the pose has no stored image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRes>,
}

/// Embedded base64 image payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImageRes {
    /// Best-effort detected MIME type.
    pub media_type: Option<String>,
    /// Base64-encoded image bytes.
    pub data: String,
}

/// Condition vocabulary response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConditionsRes {
    /// Canonical condition identifiers, in catalog declaration order.
    pub conditions: Vec<String>,
    /// Shortform aliases and the canonical identifier each resolves to.
    pub aliases: Vec<AliasRes>,
}

/// One shortform alias.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AliasRes {
    pub alias: String,
    pub canonical: String,
}

/// Pose vocabulary response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PosesRes {
    /// Pose identifiers, sorted.
    pub poses: Vec<String>,
}

/// Builds the REST router over a shared recommendation service.
pub fn router(service: Arc<RecommendationService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/recommend", post(recommend))
        .route("/conditions", get(list_conditions))
        .route("/poses", get(list_poses))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { service })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the SPR service. This endpoint is
/// used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "SPR is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/recommend",
    request_body = RecommendReq,
    responses(
        (status = 200, description = "Recommendations for the described symptoms", body = RecommendRes)
    )
)]
/// Match a symptom description to pose recommendations
///
/// Runs the full matching pipeline (phrase, single-term, fuzzy fallback)
/// over the supplied free text and returns one recommendation group per
/// matched term. An input that matches nothing — including an empty input —
/// yields a `found: false` response rather than an error.
#[axum::debug_handler]
async fn recommend(
    State(state): State<AppState>,
    Json(req): Json<RecommendReq>,
) -> Json<RecommendRes> {
    let groups = state.service.recommend(&req.symptoms);

    if groups.is_empty() {
        tracing::info!(input_len = req.symptoms.len(), "no recommendation found");
        return Json(RecommendRes {
            found: false,
            message: "no recommendation found".into(),
            groups: Vec::new(),
        });
    }

    let groups: Vec<RecommendationGroupRes> = groups
        .into_iter()
        .map(|group| RecommendationGroupRes {
            term: group.term,
            kind: match_kind_label(group.kind).into(),
            recommendations: group
                .recommendations
                .into_iter()
                .map(|rec| PoseRecommendationRes {
                    pose: rec.pose.as_str().to_string(),
                    steps: rec.record.steps,
                    video: rec.record.video,
                    image: rec.image.map(|img| ImageRes {
                        media_type: img.media_type,
                        data: img.data,
                    }),
                })
                .collect(),
        })
        .collect();

    Json(RecommendRes {
        found: true,
        message: "ok".into(),
        groups,
    })
}

#[utoipa::path(
    get,
    path = "/conditions",
    responses(
        (status = 200, description = "Known conditions and shortform aliases", body = ConditionsRes)
    )
)]
/// List the condition vocabulary
#[axum::debug_handler]
async fn list_conditions(State(state): State<AppState>) -> Json<ConditionsRes> {
    let catalog = state.service.conditions();
    Json(ConditionsRes {
        conditions: catalog
            .entries()
            .map(|e| e.key().as_str().to_string())
            .collect(),
        aliases: catalog
            .aliases()
            .map(|a| AliasRes {
                alias: a.key().as_str().to_string(),
                canonical: a.canonical().as_str().to_string(),
            })
            .collect(),
    })
}

#[utoipa::path(
    get,
    path = "/poses",
    responses(
        (status = 200, description = "Known pose identifiers", body = PosesRes)
    )
)]
/// List the pose vocabulary
#[axum::debug_handler]
async fn list_poses(State(state): State<AppState>) -> Json<PosesRes> {
    Json(PosesRes {
        poses: state
            .service
            .poses()
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

fn match_kind_label(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Phrase => "phrase",
        MatchKind::Exact => "exact",
        MatchKind::Fuzzy => "fuzzy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use spr_core::{ConditionCatalog, PoseCatalog};
    use spr_media::MediaStore;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn test_router() -> (TempDir, Router) {
        let temp = TempDir::new().unwrap();

        let catalog_path = temp.path().join("pose_catalog.csv");
        fs::write(
            &catalog_path,
            "Pose,Step,Video\n\
             Deep Breathing Exercises,Breathe slowly.,https://example.com/breathing\n\
             Cat-Cow Pose,Arch and round.,https://example.com/cat-cow\n\
             Bridge Pose,Lift your hips.,https://example.com/bridge\n\
             Knee To Chest,Pull a knee in.,https://example.com/knee\n\
             Downward Facing Dog Pose,Inverted V.,https://example.com/dog\n",
        )
        .unwrap();

        let media_dir = temp.path().join("media");
        let breathing = media_dir.join("deep_breathing_exercises");
        fs::create_dir_all(&breathing).unwrap();
        fs::write(breathing.join("breathing.png"), PNG_HEADER).unwrap();

        let poses = PoseCatalog::load(&catalog_path).unwrap();
        let media = MediaStore::open(&media_dir).unwrap();
        let service = Arc::new(RecommendationService::new(
            ConditionCatalog::builtin(),
            poses,
            Some(media),
        ));

        (temp, router(service))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(app: Router, uri: &str) -> T {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post_recommend(app: Router, symptoms: &str) -> RecommendRes {
        let body = serde_json::to_string(&RecommendReq {
            symptoms: symptoms.into(),
        })
        .unwrap();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/recommend")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_is_alive() {
        let (_temp, app) = test_router();
        let res: HealthRes = get_json(app, "/health").await;
        assert!(res.ok);
    }

    #[tokio::test]
    async fn recommend_returns_groups_with_media() {
        let (_temp, app) = test_router();
        let res = post_recommend(app, "I have asthma").await;

        assert!(res.found);
        assert_eq!(res.groups.len(), 1);
        assert_eq!(res.groups[0].term, "asthma");
        assert_eq!(res.groups[0].kind, "exact");

        let poses: Vec<&str> = res.groups[0]
            .recommendations
            .iter()
            .map(|r| r.pose.as_str())
            .collect();
        assert_eq!(
            poses,
            vec!["deep_breathing_exercises", "cat-cow_pose", "bridge_pose"]
        );

        let breathing = &res.groups[0].recommendations[0];
        let image = breathing.image.as_ref().unwrap();
        assert_eq!(image.media_type.as_deref(), Some("image/png"));

        // bridge_pose has a record but no media directory.
        assert!(res.groups[0].recommendations[2].image.is_none());
    }

    #[tokio::test]
    async fn recommend_reports_not_found_explicitly() {
        let (_temp, app) = test_router();
        let res = post_recommend(app, "nothing relevant here").await;

        assert!(!res.found);
        assert_eq!(res.message, "no recommendation found");
        assert!(res.groups.is_empty());
    }

    #[tokio::test]
    async fn recommend_handles_empty_input() {
        let (_temp, app) = test_router();
        let res = post_recommend(app, "").await;
        assert!(!res.found);
    }

    #[tokio::test]
    async fn conditions_endpoint_lists_vocabulary() {
        let (_temp, app) = test_router();
        let res: ConditionsRes = get_json(app, "/conditions").await;

        assert!(res.conditions.iter().any(|c| c == "back_pain"));
        assert!(res
            .aliases
            .iter()
            .any(|a| a.alias == "bp" && a.canonical == "back_pain"));
    }

    #[tokio::test]
    async fn poses_endpoint_lists_sorted_keys() {
        let (_temp, app) = test_router();
        let res: PosesRes = get_json(app, "/poses").await;

        let mut sorted = res.poses.clone();
        sorted.sort();
        assert_eq!(res.poses, sorted);
        assert!(res.poses.iter().any(|p| p == "bridge_pose"));
    }
}
