// ABOUTME: Top-level profile extractor applying the field rules and composing the statistics blocks.
// ABOUTME: Required fields fail the whole extraction with NotFound; optional fields become None.

//! Profile page extraction.
//!
//! | Field | Rule | Absent |
//! |---|---|---|
//! | profile_url | `og:url` meta content | error |
//! | username | trailing path segment of profile_url | error (via profile_url) |
//! | image_url | `div.user-image > img` src | error |
//! | join_date, last_online | span after the "Joined"/"Last Online" label | error |
//! | gender, birthday, location | span after the label | `None` |
//! | about | about container, converted to the configured format | `None` |
//! | anime_stats, manga_stats | scoped statistics blocks | all zero |

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::ParsedDocument;
use crate::error::Result;
use crate::extractors::compiled::precompile_selectors;
use crate::extractors::select::{DocumentQuery, Locator};
use crate::extractors::stats::{extract_scoped, AnimeStatsExtractor, MangaStatsExtractor};
use crate::formats::render_about;
use crate::options::{ExtractorBuilder, Options};
use crate::result::{AnimeStats, MangaStats, UserProfile};

const PROFILE_URL: Locator = Locator::Css(r#"meta[property="og:url"]"#);
const IMAGE: Locator = Locator::Css("div.user-image > img");
const JOINED: Locator = Locator::following("span", "Joined", "span");
const LAST_ONLINE: Locator = Locator::following("span", "Last Online", "span");
const GENDER: Locator = Locator::following("span", "Gender", "span");
const BIRTHDAY: Locator = Locator::following("span", "Birthday", "span");
const LOCATION: Locator = Locator::following("span", "Location", "span");

/// Tried in order. The parser always inserts `tbody`, so the legacy table
/// layout is addressed through it.
const ABOUT: [Locator; 2] = [
    Locator::Css("div.profile-about-user.js-truncate-inner > table > tbody > tr > td > div"),
    Locator::Css("div.profile-about-user.js-truncate-inner"),
];

const FIELD_SELECTORS: [&str; 6] = [
    r#"meta[property="og:url"]"#,
    "div.user-image > img",
    "div.profile-about-user.js-truncate-inner > table > tbody > tr > td > div",
    "div.profile-about-user.js-truncate-inner",
    "div.stats.anime",
    "div.stats.manga",
];

static USERNAME: Lazy<Regex> = Lazy::new(|| Regex::new(r".*/([A-Za-z0-9_]+)$").unwrap());

/// Derive the username from a profile URL.
///
/// Takes the trailing run of word characters after the last `/`. When the
/// URL does not end that way (e.g. a trailing slash or a `-` in the last
/// segment) the input is returned unchanged.
pub fn username_from_url(profile_url: &str) -> String {
    USERNAME.replace(profile_url, "$1").into_owned()
}

fn tag<T>(field: &'static str, res: Result<T>) -> Result<T> {
    if let Err(ref err) = res {
        tracing::debug!(field, error = %err, "required field missing");
    }
    res.map_err(|e| e.with_field(field))
}

/// Extracts a [`UserProfile`] from a parsed profile page.
#[derive(Debug, Clone)]
pub struct ProfileExtractor {
    opts: Options,
}

impl Default for ProfileExtractor {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl ProfileExtractor {
    pub fn new(opts: Options) -> Self {
        precompile_selectors(FIELD_SELECTORS);
        Self { opts }
    }

    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::new()
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Extract every field. Any missing required field aborts the call.
    pub fn extract(&self, doc: &ParsedDocument) -> Result<UserProfile> {
        let profile_url = self.profile_url(doc)?;
        let username = username_from_url(&profile_url);

        let profile = UserProfile {
            image_url: self.image_url(doc)?,
            join_date: self.join_date(doc)?,
            last_online: self.last_online(doc)?,
            gender: self.gender(doc),
            birthday: self.birthday(doc),
            location: self.location(doc),
            about: self.about(doc),
            anime_stats: self.anime_stats(doc),
            manga_stats: self.manga_stats(doc),
            profile_url,
            username,
        };

        tracing::debug!(username = %profile.username, "extracted profile");
        Ok(profile)
    }

    /// Parse `html` and extract it.
    pub fn extract_html(&self, html: &str) -> Result<UserProfile> {
        let doc = ParsedDocument::parse(html);
        self.extract(&doc)
    }

    pub fn profile_url(&self, doc: &ParsedDocument) -> Result<String> {
        tag("profile_url", doc.require_attribute(&PROFILE_URL, "content"))
    }

    pub fn username(&self, doc: &ParsedDocument) -> Result<String> {
        self.profile_url(doc).map(|url| username_from_url(&url))
    }

    pub fn image_url(&self, doc: &ParsedDocument) -> Result<String> {
        tag("image_url", doc.require_attribute(&IMAGE, "src"))
    }

    pub fn join_date(&self, doc: &ParsedDocument) -> Result<String> {
        tag("join_date", doc.require_text(&JOINED))
    }

    pub fn last_online(&self, doc: &ParsedDocument) -> Result<String> {
        tag("last_online", doc.require_text(&LAST_ONLINE))
    }

    pub fn gender(&self, doc: &ParsedDocument) -> Option<String> {
        doc.optional_text(&GENDER)
    }

    pub fn birthday(&self, doc: &ParsedDocument) -> Option<String> {
        doc.optional_text(&BIRTHDAY)
    }

    pub fn location(&self, doc: &ParsedDocument) -> Option<String> {
        doc.optional_text(&LOCATION)
    }

    /// The about block in the configured format.
    pub fn about(&self, doc: &ParsedDocument) -> Option<String> {
        let markup = ABOUT.iter().find_map(|loc| doc.inner_markup(loc))?;
        let about = render_about(&markup, self.opts.about_format);
        (!about.is_empty()).then_some(about)
    }

    pub fn anime_stats(&self, doc: &ParsedDocument) -> AnimeStats {
        extract_scoped::<AnimeStatsExtractor>(doc)
    }

    pub fn manga_stats(&self, doc: &ParsedDocument) -> MangaStats {
        extract_scoped::<MangaStatsExtractor>(doc)
    }
}

/// Extract a profile from raw HTML with default options.
pub fn parse_profile(html: &str) -> Result<UserProfile> {
    ProfileExtractor::default().extract_html(html)
}
