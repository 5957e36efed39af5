//! Entity structs in the stable external shape served by the HTTP API.
//!
//! The record store owns every entity; these structs are what the field mapper
//! produces from upstream records. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`. Missing optional fields are omitted from
//! JSON rather than filled with placeholders.

mod client;
mod evidence;
mod project;
mod tender;

pub use client::Client;
pub use evidence::EvidenceRecord;
pub use project::{Project, ProjectCaseStudy};
pub use tender::{Tender, TenderQuestion};
