//! Reporting: turn collected statistics into ranked lists and text.
//!
//! The data pipeline is:
//! 1. Raw data ([`AggregateStats`](crate::data::AggregateStats))
//! 2. Rankings (sorted, truncated views borrowing the raw data)
//! 3. Text (the tree listing and the closing report)

pub mod ranking;
pub mod text;

pub use ranking::{
    latest_modified, ordered_languages, top_by_eloc, top_languages, LanguageRanking, Rankings,
};
pub use text::{format_modified, TextReport, TreePrinter, UNKNOWN_TIME};
