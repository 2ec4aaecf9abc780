//! POST /exa-search — web search proxy with optional contact extraction.
//!
//! Unlike case analysis there is no degraded mode here: a missing provider
//! key is a configuration error the caller needs to hear about, not an
//! empty result set.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};

use lexpert_exa::{extract_contact_info, SearchOptions, SearchResponse, SearchResult};

use super::AppState;
use crate::middleware::RequestId;

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(in crate::api) struct ExaSearchRequest {
    query: String,
    num_results: Option<u32>,
    use_autoprompt: Option<bool>,
    extract_contacts: Option<bool>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'static str>,
}

#[derive(Debug)]
pub(in crate::api) enum ExaSearchError {
    MissingQuery,
    MissingApiKey,
    Provider,
}

impl IntoResponse for ExaSearchError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ExaSearchError::MissingQuery => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Query is required",
                    details: None,
                },
            ),
            ExaSearchError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Exa API key not configured",
                    details: Some("Set EXA_API_KEY in the server environment and restart"),
                },
            ),
            ExaSearchError::Provider => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Web search request failed",
                    details: None,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

pub(in crate::api) async fn exa_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<ExaSearchRequest>,
) -> Result<Json<SearchResponse>, ExaSearchError> {
    if request.query.trim().is_empty() {
        return Err(ExaSearchError::MissingQuery);
    }

    let Some(exa) = state.exa.as_deref() else {
        tracing::error!(request_id = %req_id.0, "EXA_API_KEY not configured; cannot run web search");
        return Err(ExaSearchError::MissingApiKey);
    };

    let options = SearchOptions {
        num_results: request.num_results.unwrap_or(10),
        use_autoprompt: request.use_autoprompt.unwrap_or(true),
    };
    let extract_contacts = request.extract_contacts.unwrap_or(false);

    let mut response = exa.search(&request.query, options).await.map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "web search provider call failed");
        ExaSearchError::Provider
    })?;

    if extract_contacts {
        for result in &mut response.results {
            result.contact_info = Some(extract_contact_info(&combined_text(result)));
        }
    }

    tracing::info!(
        request_id = %req_id.0,
        query = %request.query,
        num_results = response.results.len(),
        contacts_extracted = extract_contacts,
        "web search completed"
    );

    Ok(Json(response))
}

/// Full text plus joined highlights, the haystack for contact extraction.
fn combined_text(result: &SearchResult) -> String {
    let text = result.text.as_deref().unwrap_or_default();
    let highlights = result
        .highlights
        .as_deref()
        .unwrap_or_default()
        .join(" ");
    format!("{text} {highlights}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{bare_state, mock_exa, test_app};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn post_exa_search(
        app: axum::Router,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/exa-search")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json = serde_json::from_slice(&bytes).expect("json parse");
        (status, json)
    }

    fn provider_response() -> serde_json::Value {
        serde_json::json!({
            "results": [
                {
                    "id": "r1",
                    "url": "https://smithforensics.com/about",
                    "title": "Smith Forensics",
                    "text": "Reach us at info@smithforensics.com or (415) 555-0132. \
                             Templates use docs@example.com.",
                    "highlights": ["Site: https://smithforensics.com/experts now online"],
                    "highlightScores": [0.91]
                },
                {
                    "id": "r2",
                    "url": "https://caselaw.example.net/article",
                    "title": "No contacts here"
                }
            ],
            "autopromptString": "forensic engineering firms"
        })
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn blank_query_is_rejected_before_any_provider_call(pool: sqlx::PgPool) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut state = bare_state(pool);
        state.exa = Some(mock_exa(&server.uri()));
        let app = test_app(state);

        let (status, json) = post_exa_search(app, serde_json::json!({"query": "  "})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Query is required");
        server.verify().await;
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn missing_api_key_is_a_named_configuration_error(pool: sqlx::PgPool) {
        let app = test_app(bare_state(pool));

        let (status, json) =
            post_exa_search(app, serde_json::json!({"query": "expert witnesses"})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].as_str().unwrap_or_default().contains("EXA")
            || json["error"].as_str().unwrap_or_default().contains("Exa"));
        assert!(!json["details"].as_str().unwrap_or_default().is_empty());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn contacts_are_attached_per_result_when_requested(pool: sqlx::PgPool) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_partial_json(serde_json::json!({
                "query": "forensic engineering firms",
                "numResults": 2,
                "useAutoprompt": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(provider_response()))
            .mount(&server)
            .await;

        let mut state = bare_state(pool);
        state.exa = Some(mock_exa(&server.uri()));
        let app = test_app(state);

        let (status, json) = post_exa_search(
            app,
            serde_json::json!({
                "query": "forensic engineering firms",
                "numResults": 2,
                "extractContacts": true
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["autopromptString"], "forensic engineering firms");

        let first = &json["results"][0]["contactInfo"];
        assert_eq!(first["emails"], serde_json::json!(["info@smithforensics.com"]));
        assert_eq!(first["phones"], serde_json::json!(["(415) 555-0132"]));
        // URL harvested from the highlights half of the combined text.
        assert_eq!(
            first["websites"],
            serde_json::json!(["https://smithforensics.com/experts"])
        );

        // A result with no text still gets the (empty) contactInfo object.
        let second = &json["results"][1]["contactInfo"];
        assert_eq!(second["emails"], serde_json::json!([]));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn contact_info_key_is_absent_when_extraction_not_requested(pool: sqlx::PgPool) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(provider_response()))
            .mount(&server)
            .await;

        let mut state = bare_state(pool);
        state.exa = Some(mock_exa(&server.uri()));
        let app = test_app(state);

        let (status, json) = post_exa_search(
            app,
            serde_json::json!({"query": "forensic engineering firms", "extractContacts": false}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        for result in json["results"].as_array().expect("results") {
            assert!(
                result.get("contactInfo").is_none(),
                "contactInfo must be absent, not empty: {result}"
            );
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn provider_failure_surfaces_as_500(pool: sqlx::PgPool) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut state = bare_state(pool);
        state.exa = Some(mock_exa(&server.uri()));
        let app = test_app(state);

        let (status, json) =
            post_exa_search(app, serde_json::json!({"query": "anything"})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!json["error"].as_str().unwrap_or_default().is_empty());
    }
}
