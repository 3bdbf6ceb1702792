#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod detector;
mod error;
pub mod mapit;
pub mod matching;
pub mod parliament;
pub mod postcodes;

pub use crate::config::CivicConfig;
pub use crate::detector::{DetectedArea, DetectionOutcome, StakeholderDetector};
pub use crate::error::{Error, Result};
pub use crate::mapit::{AreaKind, MapItArea, MapItClient};
pub use crate::parliament::{MemberSummary, ParliamentClient};
pub use crate::postcodes::{PostcodeInfo, PostcodesClient};

/// Tracing target for postcode lookups.
pub const TRACING_TARGET_POSTCODES: &str = "agora_civic::postcodes";

/// Tracing target for Parliament Members API lookups.
pub const TRACING_TARGET_PARLIAMENT: &str = "agora_civic::parliament";

/// Tracing target for MapIt boundary lookups.
pub const TRACING_TARGET_MAPIT: &str = "agora_civic::mapit";

/// Tracing target for the detection chain.
pub const TRACING_TARGET_DETECTOR: &str = "agora_civic::detector";
