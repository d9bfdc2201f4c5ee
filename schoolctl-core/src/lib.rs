//! schoolctl-core: school records, validation rules, and listing filters
//!
//! Shared by the HTTP server (which enforces the server rules on insert)
//! and the CLI client (which runs the form rules before submitting and
//! filters the fetched listing in memory).

pub mod config;
pub mod error;
pub mod listing;
pub mod school;
pub mod validation;

pub use config::SchoolConfig;
pub use error::{CoreError, Result};
pub use listing::{unique_states, Listing, ListingFilter};
pub use school::{NewSchool, School, SchoolPayload};
pub use validation::{validate_form, FieldError, FormErrors, ValidationError};
