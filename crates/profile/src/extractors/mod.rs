// ABOUTME: Field extraction for profile pages: locators, the query trait, and the extractors.
// ABOUTME: Includes the statistics sub-extractors and the top-level profile orchestrator.

//! Extraction module.
//!
//! Submodules:
//! - `compiled`: process-wide cache of compiled CSS selectors.
//! - `select`: `Locator` and the `DocumentQuery` capability trait.
//! - `stats`: anime and manga statistics sub-extractors.
//! - `profile`: the `ProfileExtractor` orchestrator.

pub mod compiled;
pub mod profile;
pub mod select;
pub mod stats;
