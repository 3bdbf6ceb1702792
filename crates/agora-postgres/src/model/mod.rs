//! Database models for all entities in the system.
//!
//! This module contains Diesel model definitions for all database tables,
//! including structs for querying, inserting, and updating records.

mod analysis_report;
mod councillor;
mod enquiry;
mod feedback_form;
mod feedback_response;
mod project;
mod public_pin;
mod stakeholder;
mod subscriber;
mod tour;
mod tour_stop;

// Project models
pub use analysis_report::{AnalysisReport, NewAnalysisReport};
pub use councillor::{Councillor, NewCouncillor, UpdateCouncillor};
// Feedback models
pub use enquiry::{Enquiry, NewEnquiry, UpdateEnquiry};
pub use feedback_form::{FeedbackForm, NewFeedbackForm, UpdateFeedbackForm};
pub use feedback_response::{FeedbackResponse, NewFeedbackResponse};
pub use project::{NewProject, Project, UpdateProject};
pub use public_pin::{NewPublicPin, PublicPin, UpdatePublicPin};
// Stakeholder models
pub use stakeholder::{NewStakeholder, Stakeholder, UpdateStakeholder};
// Mailing-list models
pub use subscriber::{NewSubscriber, Subscriber, UpdateSubscriber};
// Tour models
pub use tour::{NewTour, Tour, UpdateTour};
pub use tour_stop::{NewTourStop, TourStop, UpdateTourStop};
