//! [`Error`], [`ErrorKind`] and [`Result`].

mod civic_error;
mod http_error;
mod llm_error;
mod pg_error;
mod validation;

pub use http_error::{Error, ErrorKind, Result};
