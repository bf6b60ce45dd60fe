//! Domain models for the server.

pub mod inquiry;

pub use inquiry::{
    CoverageInquiry, InquiryFilter, InquiryKind, NewCoverageInquiry, NewPackageInquiry,
    PackageInquiry,
};
