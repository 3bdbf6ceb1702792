//! Enhanced path extractor with improved error handling.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Enhanced path extractor with improved error handling.
///
/// Works exactly like [`axum::extract::Path`] but rejects with the platform's
/// JSON error shape and a context line naming what failed to parse.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    /// Creates a new [`Path`] wrapper around the provided value.
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

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extractor = <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        extractor.map(|x| Self::new(x.0)).map_err(Into::into)
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => ErrorKind::BadRequest
                .with_message("Invalid path parameter.")
                .with_context(format!("path deserialization failed: {err}")),
            PathRejection::MissingPathParams(err) => ErrorKind::MissingPathParam
                .with_context(format!("missing path params: {err}")),
            other => ErrorKind::BadRequest
                .with_message("Invalid request path.")
                .with_context(format!("path rejection: {other}")),
        }
    }
}
