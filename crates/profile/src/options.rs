// ABOUTME: Configuration options for profile extraction including AboutFormat, Options, and ExtractorBuilder.
// ABOUTME: ExtractorBuilder provides a fluent API for constructing ProfileExtractor instances.

use std::fmt;

use crate::extractors::profile::ProfileExtractor;

/// Output format for the free-text about block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AboutFormat {
    /// Portable BBCode markup.
    #[default]
    BbCode,
    /// Sanitized HTML.
    Html,
    /// Plain text with line breaks.
    Text,
}

impl fmt::Display for AboutFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AboutFormat::BbCode => "bbcode",
            AboutFormat::Html => "html",
            AboutFormat::Text => "text",
        };
        write!(f, "{}", s)
    }
}

impl From<&str> for AboutFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "html" => AboutFormat::Html,
            "text" | "txt" => AboutFormat::Text,
            _ => AboutFormat::BbCode,
        }
    }
}

/// Configuration options for the profile extractor.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub about_format: AboutFormat,
}

/// Builder for constructing ProfileExtractor instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ExtractorBuilder {
    opts: Options,
}

impl ExtractorBuilder {
    /// Create a new ExtractorBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format of the about block.
    pub fn about_format(mut self, format: AboutFormat) -> Self {
        self.opts.about_format = format;
        self
    }

    /// Build the ProfileExtractor with the configured options.
    pub fn build(self) -> ProfileExtractor {
        ProfileExtractor::new(self.opts)
    }
}
