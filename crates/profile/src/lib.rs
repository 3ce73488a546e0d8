// ABOUTME: Main library entry point for the profile page extractor.
// ABOUTME: Re-exports the public API: ProfileExtractor, ParsedDocument, UserProfile, ExtractError, Options.

//! Extract structured user profiles from rendered profile pages.
//!
//! The crate locates each profile datum in an HTML tree, separates required
//! from optional fields, delegates the anime and manga statistics blocks to
//! scoped sub-extractors, and converts the free-text about section into
//! BBCode.
//!
//! # Example
//!
//! ```no_run
//! use mal_profile::{ParsedDocument, ProfileExtractor, ExtractError};
//!
//! fn main() -> Result<(), ExtractError> {
//!     let html = std::fs::read_to_string("profile.html").unwrap();
//!     let doc = ParsedDocument::parse(&html);
//!     let profile = ProfileExtractor::default().extract(&doc)?;
//!     println!("{}", profile.format_summary());
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod extractors;
pub mod formats;
pub mod options;
pub mod result;
pub mod text;

pub use crate::dom::{ParsedDocument, Region};
pub use crate::error::{ErrorCode, ExtractError};
pub use crate::extractors::profile::{parse_profile, username_from_url, ProfileExtractor};
pub use crate::extractors::select::{DocumentQuery, Locator};
pub use crate::extractors::stats::{AnimeStatsExtractor, MangaStatsExtractor, StatsExtractor};
pub use crate::options::{AboutFormat, ExtractorBuilder, Options};
pub use crate::result::{AnimeStats, MangaStats, UserProfile};
