// ABOUTME: Sub-extractors for the anime and manga statistics blocks of a profile page.
// ABOUTME: Each is constructed with an explicitly scoped Region and exposes get_model().

//! Statistics block extraction.
//!
//! The profile page carries one `div.stats.anime` and one `div.stats.manga`
//! block with the same layout:
//!
//! ```html
//! <div class="stats anime">
//!   <div class="stat-score">
//!     <div><span>Days: </span>63.4</div>
//!     <div><span>Mean Score: </span>7.79</div>
//!   </div>
//!   <ul class="stats-status">
//!     <li><a class="circle watching">Watching</a><span>4</span></li>
//!   </ul>
//!   <ul class="stats-data">
//!     <li><span>Total Entries</span><span>1,234</span></li>
//!   </ul>
//! </div>
//! ```
//!
//! Every statistic is optional; a missing or unparsable value reads as zero.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::{ParsedDocument, Region};
use crate::extractors::select::{DocumentQuery, Locator};
use crate::result::{AnimeStats, MangaStats};

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d[\d,]*(?:\.\d+)?").unwrap());

/// First number in `text`, with thousands separators removed.
pub fn parse_number(text: &str) -> Option<f64> {
    NUMBER
        .find(text)
        .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
}

const DAYS: Locator = Locator::LabelParent {
    label: "span",
    text: "Days",
};
const MEAN_SCORE: Locator = Locator::LabelParent {
    label: "span",
    text: "Mean Score",
};
const COMPLETED: Locator = Locator::following("a", "Completed", "span");
const ON_HOLD: Locator = Locator::following("a", "On-Hold", "span");
const DROPPED: Locator = Locator::following("a", "Dropped", "span");
const TOTAL_ENTRIES: Locator = Locator::following("span", "Total Entries", "span");

/// A statistics block extractor bound to one region of the page.
pub trait StatsExtractor<'a>: Sized {
    type Model: Default;

    /// Container the extractor expects to be scoped to.
    const CONTAINER: Locator;

    fn new(region: Region<'a>) -> Self;

    fn get_model(&self) -> Self::Model;
}

/// Scope `doc` to the extractor's container and run it there.
///
/// Yields the default (all zero) model when the container is absent.
pub fn extract_scoped<'a, E: StatsExtractor<'a>>(doc: &'a ParsedDocument) -> E::Model {
    let container = E::CONTAINER;
    match doc.scope(&container) {
        Some(region) => {
            tracing::debug!(container = %container, "scoped statistics block");
            E::new(region).get_model()
        }
        None => {
            tracing::debug!(container = %container, "statistics block missing");
            E::Model::default()
        }
    }
}

fn float_at(region: &Region<'_>, locator: &Locator) -> f64 {
    region
        .optional_text(locator)
        .and_then(|t| parse_number(&t))
        .unwrap_or(0.0)
}

fn count_at(region: &Region<'_>, locator: &Locator) -> u32 {
    // float-to-int casts saturate, so negatives read as 0
    float_at(region, locator) as u32
}

pub struct AnimeStatsExtractor<'a> {
    region: Region<'a>,
}

impl<'a> StatsExtractor<'a> for AnimeStatsExtractor<'a> {
    type Model = AnimeStats;

    const CONTAINER: Locator = Locator::Css("div.stats.anime");

    fn new(region: Region<'a>) -> Self {
        Self { region }
    }

    fn get_model(&self) -> AnimeStats {
        let r = &self.region;
        AnimeStats {
            days_watched: float_at(r, &DAYS),
            mean_score: float_at(r, &MEAN_SCORE),
            watching: count_at(r, &Locator::following("a", "Watching", "span")),
            completed: count_at(r, &COMPLETED),
            on_hold: count_at(r, &ON_HOLD),
            dropped: count_at(r, &DROPPED),
            plan_to_watch: count_at(r, &Locator::following("a", "Plan to Watch", "span")),
            total_entries: count_at(r, &TOTAL_ENTRIES),
            rewatched: count_at(r, &Locator::following("span", "Rewatched", "span")),
            episodes_watched: count_at(r, &Locator::following("span", "Episodes", "span")),
        }
    }
}

pub struct MangaStatsExtractor<'a> {
    region: Region<'a>,
}

impl<'a> StatsExtractor<'a> for MangaStatsExtractor<'a> {
    type Model = MangaStats;

    const CONTAINER: Locator = Locator::Css("div.stats.manga");

    fn new(region: Region<'a>) -> Self {
        Self { region }
    }

    fn get_model(&self) -> MangaStats {
        let r = &self.region;
        MangaStats {
            days_read: float_at(r, &DAYS),
            mean_score: float_at(r, &MEAN_SCORE),
            reading: count_at(r, &Locator::following("a", "Reading", "span")),
            completed: count_at(r, &COMPLETED),
            on_hold: count_at(r, &ON_HOLD),
            dropped: count_at(r, &DROPPED),
            plan_to_read: count_at(r, &Locator::following("a", "Plan to Read", "span")),
            total_entries: count_at(r, &TOTAL_ENTRIES),
            reread: count_at(r, &Locator::following("span", "Reread", "span")),
            chapters_read: count_at(r, &Locator::following("span", "Chapters", "span")),
            volumes_read: count_at(r, &Locator::following("span", "Volumes", "span")),
        }
    }
}
