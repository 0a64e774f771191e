//! Index page mutation.
//!
//! Two page families share one document model ([`IndexDocument`]):
//! - the homepage (`index.html`): date sections titled `YYYY.MM.DD 전체 콘텐츠`
//!   plus the "Latest" hero pointer
//! - category archives (`{category}/index.html`): date sections titled
//!   `YYYY.MM.DD`, indented one level
//!
//! Mutations that cannot find their anchor return an [`IndexError`] instead
//! of leaving the page silently unchanged.

pub mod archive;
pub mod document;
pub mod home;

use thiserror::Error;

pub use archive::{ArchiveIndex, Placement};
pub use document::{IndexDocument, Section, SectionStyle};
pub use home::{HomeIndex, HomeUpdate};

/// Section convention of the homepage
pub const HOME_SECTIONS: SectionStyle = SectionStyle {
    indent: "",
    title_suffix: " 전체 콘텐츠",
};

/// Section convention of category archive pages
pub const ARCHIVE_SECTIONS: SectionStyle = SectionStyle {
    indent: "  ",
    title_suffix: "",
};

/// Conditions under which an index mutation could not be applied
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("No section for {date}")]
    SectionNotFound { date: String },

    #[error("Page has no date sections to anchor a new one")]
    NoSections,

    #[error("No \"Latest\" marker on the homepage")]
    LatestMarkerNotFound,

    #[error("No hero frame pointing at the {date} briefing")]
    HeroFrameNotFound { date: String },
}
