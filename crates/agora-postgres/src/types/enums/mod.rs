//! Database enumeration types for type-safe queries.
//!
//! This module provides strongly-typed enumerations that correspond to
//! PostgreSQL ENUM types defined in the database schema. Each enumeration
//! provides serialization support for APIs and database integration through
//! Diesel.

// Project-related enumerations
pub mod project_status;
pub mod project_visibility;

// Stakeholder-related enumerations
pub mod stakeholder_role;
pub mod stakeholder_source;

// Feedback-related enumerations
pub mod enquiry_source;
pub mod enquiry_status;
pub mod pin_kind;
pub mod pin_status;

// Mailing-list enumerations
pub mod subscriber_status;

pub use enquiry_source::EnquirySource;
pub use enquiry_status::EnquiryStatus;
pub use pin_kind::PinKind;
pub use pin_status::PinStatus;
pub use project_status::ProjectStatus;
pub use project_visibility::ProjectVisibility;
pub use stakeholder_role::StakeholderRole;
pub use stakeholder_source::StakeholderSource;
pub use subscriber_status::SubscriberStatus;
