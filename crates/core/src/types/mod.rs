//! Core types for the site backend.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod role;
pub mod status;
pub mod validation;

pub use email::{Email, EmailError};
pub use id::InquiryId;
pub use role::{AdminRole, UnknownRole};
pub use status::{InquiryStatus, UnknownStatus};
pub use validation::ValidationError;
