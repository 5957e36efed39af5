//! Field mapper: the single boundary between record store storage names and
//! the external shape defined in `bidgate_core::entities`.
//!
//! Upstream records are decoded into private `Raw*` structs that spell out
//! every storage name (`_id`, `client_name`, `"Created Date"`, ...) and use the
//! lenient readers in [`flex`]. They are converted into core entities with
//! `From`, so no storage name can leak past this module. Writes go the other
//! way through [`ClientFields`].

mod client;
mod evidence;
pub mod flex;
mod project;
mod tender;

pub use client::ClientFields;
pub(crate) use client::RawClient;
pub(crate) use evidence::RawEvidence;
pub(crate) use project::{RawCaseStudy, RawProject};
pub(crate) use tender::{RawQuestion, RawTender};

/// Object type names in the record store.
pub mod types {
    pub const CLIENT: &str = "client";
    pub const TENDER: &str = "tender";
    pub const TENDER_QUESTION: &str = "tender_question";
    pub const EVIDENCE: &str = "evidence";
    pub const PROJECT: &str = "project";
    pub const PROJECT_CASE_STUDY: &str = "project_case_study";
}

/// Storage field names used in constraints and sorts.
pub mod fields {
    pub const CREATED_DATE: &str = "Created Date";
    pub const CLIENT: &str = "client";
    pub const TENDER: &str = "tender";
    pub const PROJECT: &str = "project";
    pub const INVITE_TOKEN: &str = "invite_token";
    pub const CLERK_USER_ID: &str = "clerk_user_id";
    pub const STRIPE_CUSTOMER_ID: &str = "stripe_customer_id";
    pub const QUESTION_NUMBER: &str = "question_number";
}
