use crate::core::gallery::get_setups;
use crate::core::submission::{submit_setup, SubmissionOutcome};
use crate::core::{FormFields, RequestContext};
use crate::web::pages::{gallery_page, submit_page, SubmitView};
use crate::web::state::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use std::sync::Arc;

type RawForm = Result<Form<Vec<(String, String)>>, FormRejection>;

pub fn request_context(headers: &HeaderMap) -> RequestContext {
    RequestContext::from_header_pairs(
        headers
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|value| (name.as_str(), value))),
    )
}

/// Unreadable bodies are handled like any other unexpected failure.
async fn handle_submission(state: &AppState, form: RawForm) -> (FormFields, SubmissionOutcome) {
    match form {
        Ok(Form(pairs)) => {
            let fields: FormFields = pairs.into_iter().collect();
            let outcome = submit_setup(&fields, state.store.as_ref()).await;
            (fields, outcome)
        }
        Err(rejection) => {
            tracing::warn!("⚠️ Unreadable submission body: {}", rejection.body_text());
            (FormFields::new(), SubmissionOutcome::unexpected())
        }
    }
}

pub async fn gallery_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Html<String> {
    let result = get_setups(state.router.as_ref(), &request_context(&headers)).await;
    Html(gallery_page(&state.site, &result))
}

pub async fn setups_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let result = get_setups(state.router.as_ref(), &request_context(&headers)).await;
    let status = if result.is_error() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };

    (status, Json(result)).into_response()
}

pub async fn submit_form_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(submit_page(&state.site, &SubmitView::default()))
}

pub async fn submit_page_handler(State(state): State<Arc<AppState>>, form: RawForm) -> Html<String> {
    let (fields, outcome) = handle_submission(&state, form).await;

    Html(submit_page(
        &state.site,
        &SubmitView {
            values: Some(&fields),
            outcome: Some(&outcome),
        },
    ))
}

pub async fn submissions_handler(State(state): State<Arc<AppState>>, form: RawForm) -> Response {
    let (_, outcome) = handle_submission(&state, form).await;

    let status = match &outcome {
        SubmissionOutcome::Accepted(_) => StatusCode::OK,
        rejected if rejected.is_form_error() => StatusCode::INTERNAL_SERVER_ERROR,
        SubmissionOutcome::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };

    (status, Json(outcome)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_context_from_header_map() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        headers.insert("cookie", HeaderValue::from_static("session=1"));
        headers.insert("accept", HeaderValue::from_static("text/html"));

        let context = request_context(&headers);

        assert_eq!(context.auth_token.as_deref(), Some("abc"));
        assert_eq!(context.headers.len(), 2);
    }
}
