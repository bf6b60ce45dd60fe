//! QWINNET Core - Shared domain types.
//!
//! This crate provides the types used by the site backend and its tooling:
//! - `server` - Public site API and administrator API
//! - `cli` - Migrations and credential provisioning
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP. Section schemas, their validation rules and the compiled-in
//! default content all live here so that every consumer agrees on them.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, IDs, roles and statuses
//! - [`sections`] - Editable site content sections and their defaults

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod sections;
pub mod types;

pub use sections::{
    CoverageSettings, GeneralSettings, Package, PackagesSettings, Section, SectionDefaults,
    SectionType, Testimonial, TestimonialsSettings, UnknownSectionType, WhyChooseItem,
    WhyChooseSettings,
};
pub use types::*;
