//! Business logic services.

pub mod auth;
pub mod inquiries;
pub mod settings;

pub use auth::AuthService;
pub use inquiries::{InquiryError, InquiryService};
pub use settings::{SettingsError, SettingsService};
