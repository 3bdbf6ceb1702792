//! Validated JSON extractor with automatic validation.
//!
//! This module provides [`ValidateJson`], an enhanced JSON extractor that
//! combines deserialization with automatic validation using the `validator`
//! crate.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::Json;
use crate::handler::Error;

/// JSON extractor with automatic validation.
///
/// Deserializes the body like [`Json`] and then runs `validate()`. Works with
/// any type implementing both `serde::Deserialize` and `validator::Validate`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Creates a new instance of [`ValidateJson`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // First, deserialize the JSON
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;

        // Then validate the deserialized data
        data.validate()?;
        Ok(Self::new(data))
    }
}
