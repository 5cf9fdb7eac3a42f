use crate::error::Error;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub(crate) struct APIError(anyhow::Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let any_err = self.0;
        let status = match any_err.downcast_ref::<Error>() {
            Some(Error::InvalidLetters | Error::UnknownMetric(_) | Error::BadDateRange) => {
                StatusCode::BAD_REQUEST
            }
            Some(Error::QueryExtractorRejection(rejection)) => rejection_status(rejection),
            Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Extractor rejections arrive wrapped directly rather than
            // through the crate error enum.
            None => match any_err.downcast_ref::<QueryRejection>() {
                Some(rejection) => rejection_status(rejection),
                None => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };
        let body = Json(json!({
            "error": format!("{any_err}"),
        }));
        (status, body).into_response()
    }
}

fn rejection_status(rejection: &QueryRejection) -> StatusCode {
    match rejection {
        QueryRejection::FailedToDeserializeQueryString(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
