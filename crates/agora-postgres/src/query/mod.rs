//! Database query repositories for all entities in the system.
//!
//! This module contains repository implementations that provide high-level
//! database operations for all entities, encapsulating common patterns
//! and providing type-safe interfaces.
//!
//! # Pagination
//!
//! All queries that may return large result sets use the [`Pagination`] struct
//! to provide consistent, bounded pagination across the system.

pub mod analysis_report;
pub mod councillor;
pub mod enquiry;
pub mod feedback_form;
pub mod project;
pub mod public_pin;
pub mod stakeholder;
pub mod subscriber;
pub mod tour;

pub use analysis_report::AnalysisReportRepository;
pub use councillor::CouncillorRepository;
pub use enquiry::EnquiryRepository;
pub use feedback_form::FeedbackFormRepository;
pub use project::{ProjectFeedbackCounts, ProjectRepository};
pub use public_pin::PublicPinRepository;
use serde::{Deserialize, Serialize};
pub use stakeholder::StakeholderRepository;
pub use subscriber::SubscriberRepository;
pub use tour::TourRepository;

/// Pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            // Ensure limit is between 1 and 1000
            limit: limit.clamp(1, 1000),
            // Ensure offset is non-negative
            offset: offset.max(0),
        }
    }

    /// Creates pagination from page number and page size.
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, 1000);
        Self::new(page_size, (page - 1) * page_size)
    }

    /// Gets the current page number (1-based).
    pub fn page_number(&self) -> i64 {
        (self.offset / self.limit) + 1
    }

    /// Gets the page size.
    pub fn page_size(&self) -> i64 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(50, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_clamps_limit() {
        let pagination = Pagination::new(5000, -3);
        assert_eq!(pagination.limit, 1000);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn test_pagination_from_page() {
        let pagination = Pagination::from_page(3, 25);
        assert_eq!(pagination.limit, 25);
        assert_eq!(pagination.offset, 50);
        assert_eq!(pagination.page_number(), 3);
    }
}
