//! JSON shapes exchanged with the ripping backend.
//!
//! Field names follow the backend (`disc_type`, `results`, `timeout`); the
//! aliases accept the descriptive names some deployments use instead.

use serde::{Deserialize, Serialize};

use crate::decision::Decision;
use crate::disc::{DiscKind, MediaKind};
use crate::ids::DiscId;

/// Response of `GET /api/metadata/pending`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingStatusResponse {
    #[serde(default)]
    pub pending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disc_id: Option<DiscId>,
    #[serde(
        default,
        alias = "disc_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub disc_type: Option<DiscKind>,
    #[serde(
        default,
        alias = "media_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_type: Option<MediaKind>,
    #[serde(default, alias = "candidates", skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<RawCandidate>,
    #[serde(
        default,
        alias = "decision_budget_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<u32>,
}

impl PendingStatusResponse {
    /// Status reporting that nothing is waiting for a human.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// One search hit as the backend forwards it, mostly verbatim from TMDB.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    #[serde(
        default,
        alias = "display_title",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(
        default,
        alias = "synopsis",
        skip_serializing_if = "Option::is_none"
    )]
    pub overview: Option<String>,
    #[serde(
        default,
        alias = "poster_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
}

/// Body of `POST /api/metadata/select`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitDecisionRequest {
    pub disc_id: DiscId,
    #[serde(alias = "disc_kind")]
    pub disc_type: DiscKind,
    #[serde(alias = "index")]
    pub selection: Decision,
}

/// Acknowledgement returned by the select endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitDecisionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitDecisionResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Adds `http://` when the scheme is missing and trims trailing slashes, so
/// `nas.local:5000/` and `http://nas.local:5000` address the same endpoints.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_backend_pending_payload() {
        let status: PendingStatusResponse = serde_json::from_value(json!({
            "pending": true,
            "disc_id": "D1",
            "disc_type": "bd-video",
            "media_type": "tv",
            "results": [{"name": "Dark", "first_air_date": "2017-12-01"}],
            "timeout": 45
        }))
        .unwrap();

        assert!(status.pending);
        assert_eq!(status.disc_type, Some(DiscKind::BdVideo));
        assert_eq!(status.media_type, Some(MediaKind::Series));
        assert_eq!(status.results.len(), 1);
        assert_eq!(status.timeout, Some(45));
    }

    #[test]
    fn accepts_descriptive_aliases() {
        let status: PendingStatusResponse = serde_json::from_value(json!({
            "pending": true,
            "disc_id": "D2",
            "disc_kind": "dvd-video",
            "candidates": [{"display_title": "Heat", "synopsis": "Heist."}],
            "decision_budget_seconds": 30
        }))
        .unwrap();

        assert_eq!(status.disc_type, Some(DiscKind::DvdVideo));
        assert_eq!(status.results[0].title.as_deref(), Some("Heat"));
        assert_eq!(status.results[0].overview.as_deref(), Some("Heist."));
        assert_eq!(status.timeout, Some(30));
    }

    #[test]
    fn idle_status_is_just_pending_false() {
        let status: PendingStatusResponse =
            serde_json::from_value(json!({"pending": false})).unwrap();
        assert_eq!(status, PendingStatusResponse::idle());
        assert_eq!(
            serde_json::to_value(PendingStatusResponse::idle()).unwrap(),
            json!({"pending": false})
        );
    }

    #[test]
    fn submit_body_matches_backend_contract() {
        let chosen = SubmitDecisionRequest {
            disc_id: DiscId::new("D1").unwrap(),
            disc_type: DiscKind::BdVideo,
            selection: Decision::Chosen(1),
        };
        assert_eq!(
            serde_json::to_value(&chosen).unwrap(),
            json!({"disc_id": "D1", "disc_type": "bd-video", "selection": 1})
        );

        let skip = SubmitDecisionRequest {
            selection: Decision::Skip,
            ..chosen
        };
        assert_eq!(
            serde_json::to_value(&skip).unwrap(),
            json!({"disc_id": "D1", "disc_type": "bd-video", "selection": "skip"})
        );
    }

    #[test]
    fn submit_response_message_is_optional() {
        let ok: SubmitDecisionResponse =
            serde_json::from_value(json!({"success": true})).unwrap();
        assert_eq!(ok, SubmitDecisionResponse::accepted());
    }

    #[test]
    fn base_url_gains_scheme_and_loses_trailing_slash() {
        assert_eq!(normalize_base_url(" nas.local:5000/ "), "http://nas.local:5000");
        assert_eq!(normalize_base_url("https://ripper/"), "https://ripper");
        assert_eq!(normalize_base_url("http://ripper"), "http://ripper");
    }
}
