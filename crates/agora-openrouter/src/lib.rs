#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod analysis;
mod client;
mod completion;
mod config;
mod error;
mod prompt;

pub use crate::analysis::{
    AnalysisOutcome, AnalysisService, FeedbackCorpus, SentimentBreakdown, Theme,
    content_fingerprint,
};
pub use crate::client::LlmClient;
pub use crate::completion::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatUsage};
pub use crate::config::LlmConfig;
pub use crate::error::{Error, Result};

/// Tracing target for client-related operations.
pub const TRACING_TARGET_CLIENT: &str = "agora_openrouter::client";

/// Tracing target for the analysis service.
pub const TRACING_TARGET_ANALYSIS: &str = "agora_openrouter::analysis";
