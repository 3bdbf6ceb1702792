//! Enhanced JSON extractor with improved error handling.
//!
//! This module provides [`Json`], an enhanced version of [`axum::Json`] with
//! better error messages and the platform's JSON error shape on rejection.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Enhanced JSON extractor with improved error handling.
///
/// Rejections carry the platform's [`ErrorResponse`] JSON body instead of
/// Axum's plain-text default.
///
/// [`ErrorResponse`]: crate::handler::ErrorResponse
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Creates a new [`Json`] wrapper around the provided value.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extractor = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await;
        extractor.map(|x| Self::new(x.0)).map_err(Into::into)
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ErrorKind::BadRequest
                .with_message("Invalid request data format.")
                .with_context(format!("JSON deserialization failed: {err}")),
            JsonRejection::JsonSyntaxError(err) => ErrorKind::BadRequest
                .with_message("Invalid JSON syntax in request body.")
                .with_context(format!("JSON parsing failed: {err}")),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Request must have Content-Type set to 'application/json'."),
            JsonRejection::BytesRejection(err) => ErrorKind::PayloadTooLarge
                .with_message("Request body could not be read.")
                .with_context(format!("bytes rejection: {err}")),
            other => ErrorKind::BadRequest
                .with_message("Malformed request body.")
                .with_context(format!("JSON rejection: {other}")),
        }
    }
}
