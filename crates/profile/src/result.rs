// ABOUTME: UserProfile, AnimeStats and MangaStats records produced by the extractors.
// ABOUTME: Includes a plain-text summary formatter and small convenience predicates.

use serde::{Deserialize, Serialize};

/// Anime list statistics shown on a profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnimeStats {
    pub days_watched: f64,
    pub mean_score: f64,
    pub watching: u32,
    pub completed: u32,
    pub on_hold: u32,
    pub dropped: u32,
    pub plan_to_watch: u32,
    pub total_entries: u32,
    pub rewatched: u32,
    pub episodes_watched: u32,
}

/// Manga list statistics shown on a profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MangaStats {
    pub days_read: f64,
    pub mean_score: f64,
    pub reading: u32,
    pub completed: u32,
    pub on_hold: u32,
    pub dropped: u32,
    pub plan_to_read: u32,
    pub total_entries: u32,
    pub reread: u32,
    pub chapters_read: u32,
    pub volumes_read: u32,
}

/// A user profile extracted from a profile page.
///
/// `username` is always the trailing path segment of `profile_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserProfile {
    pub profile_url: String,
    pub username: String,
    pub image_url: String,
    pub join_date: String,
    pub last_online: String,
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub location: Option<String>,
    /// Free text in the configured about format (BBCode by default).
    pub about: Option<String>,
    pub anime_stats: AnimeStats,
    pub manga_stats: MangaStats,
}

impl UserProfile {
    /// Format the profile as a short human-readable summary.
    pub fn format_summary(&self) -> String {
        let mut lines = vec![format!("{} <{}>", self.username, self.profile_url)];

        lines.push(format!("Joined: {}", self.join_date));
        lines.push(format!("Last Online: {}", self.last_online));
        for (label, value) in [
            ("Gender", &self.gender),
            ("Birthday", &self.birthday),
            ("Location", &self.location),
        ] {
            if let Some(v) = value {
                lines.push(format!("{}: {}", label, v));
            }
        }

        lines.push(format!(
            "Anime: {} entries, {} days, mean {:.2}",
            self.anime_stats.total_entries, self.anime_stats.days_watched, self.anime_stats.mean_score
        ));
        lines.push(format!(
            "Manga: {} entries, {} days, mean {:.2}",
            self.manga_stats.total_entries, self.manga_stats.days_read, self.manga_stats.mean_score
        ));

        if let Some(ref about) = self.about {
            if !about.is_empty() {
                lines.push(String::new());
                lines.push(about.clone());
            }
        }

        lines.join("\n")
    }

    /// Returns true if the profile has a non-empty about section.
    pub fn has_about(&self) -> bool {
        self.about.as_ref().map_or(false, |a| !a.is_empty())
    }
}
