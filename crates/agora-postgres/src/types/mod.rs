//! Contains constraints, enumerations and other custom types.

mod constraints;
mod enums;

pub use constraints::{
    ConstraintCategory, ConstraintViolation, CouncillorConstraints, ProjectConstraints,
    PublicPinConstraints, SubscriberConstraints, TourStopConstraints,
};
pub use enums::{
    EnquirySource, EnquiryStatus, PinKind, PinStatus, ProjectStatus, ProjectVisibility,
    StakeholderRole, StakeholderSource, SubscriberStatus,
};
