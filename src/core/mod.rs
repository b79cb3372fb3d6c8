//! Core business logic abstractions

pub mod config;
pub mod date;
pub mod filter;
pub mod ipo;
pub mod log;
pub mod mail;
pub mod monitor;
pub mod offer;
pub mod report;

// Re-export main types for cleaner imports
pub use filter::{MIN_OFFER_AMOUNT, filter_qualifying_ipos};
pub use ipo::{CalendarProvider, QualifyingIpo, RawIpoRecord};
pub use mail::Mailer;
pub use report::{Report, ReportFormatter};
