use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::TrackerError;

/// Badges a participant needs for the full arcade track, in display order.
pub const REQUIRED_BADGES: [&str; 20] = [
    "The Basics of Google Cloud Compute",
    "Get Started with Cloud Storage",
    "Get Started with Pub/Sub",
    "Get Started with API Gateway",
    "Get Started with Looker",
    "Get Started with Dataplex",
    "Get Started with Google Workspace Tools",
    "App Building with Appsheet",
    "Develop with Apps Script and AppSheet",
    "Build a Website on Google Cloud",
    "Set Up a Google Cloud Network",
    "Store, Process, and Manage Data on Google Cloud - Console",
    "Cloud Run Functions: 3 Ways",
    "App Engine: 3 Ways",
    "Cloud Speech API: 3 Ways",
    "Monitoring in Google Cloud",
    "Analyze Speech and Language with Google APIs",
    "Prompt Design in Vertex AI",
    "Develop Gen AI Apps with Gemini and Streamlit",
    "Level 3: Generative AI",
];

/// The arcade game badge, treated separately from the skill badges.
pub const CAPSTONE_BADGE: &str = "Level 3: Generative AI";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub roster_path: String,
    pub output_path: String,
    pub output_mode: OutputMode,
    // Scraped profile name wins over the roster name when present
    pub prefer_scraped_name: bool,
    pub request_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub selectors: SelectorConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMode {
    #[serde(rename = "console")]
    Console,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "both")]
    Both,
}

impl OutputMode {
    pub fn writes_file(self) -> bool {
        matches!(self, OutputMode::File | OutputMode::Both)
    }

    pub fn echoes_members(self) -> bool {
        matches!(self, OutputMode::Console | OutputMode::Both)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub display_name: String,
    pub badge_title: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            display_name: "h1.ql-display-small".to_string(),
            badge_title: "div.profile-badge span.ql-title-medium".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster_path: "participants.csv".to_string(),
            output_path: "results.csv".to_string(),
            output_mode: OutputMode::Both,
            prefer_scraped_name: true,
            request_delay_ms: 1000,
            request_timeout_secs: 30,
            selectors: SelectorConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(file_path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(file_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise use the defaults. Nothing is written.
    pub fn load_or_default(file_path: &str) -> anyhow::Result<Self> {
        if std::path::Path::new(file_path).exists() {
            Self::load_from_file(file_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, file_path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(file_path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.roster_path.trim().is_empty() {
            return Err(TrackerError::Config("roster_path is empty".to_string()));
        }
        if self.output_mode.writes_file() && self.output_path.trim().is_empty() {
            return Err(TrackerError::Config("output_path is empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(TrackerError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Canonical matching key for a badge title: lower-case ASCII letters and digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BadgeKey(String);

impl BadgeKey {
    pub fn from_title(title: &str) -> Self {
        BadgeKey(normalize_badge_title(title))
    }
}

/// Lower-case the title and drop everything that is not an ASCII letter or digit
pub fn normalize_badge_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// The fixed set of required badges, built once at startup.
#[derive(Debug, Clone)]
pub struct BadgeCatalog {
    required: HashSet<BadgeKey>,
    capstone: BadgeKey,
}

impl BadgeCatalog {
    pub fn new<'a, I>(titles: I, capstone: &str) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            required: titles.into_iter().map(BadgeKey::from_title).collect(),
            capstone: BadgeKey::from_title(capstone),
        }
    }

    pub fn arcade() -> Self {
        Self::new(REQUIRED_BADGES, CAPSTONE_BADGE)
    }

    pub fn required(&self) -> &HashSet<BadgeKey> {
        &self.required
    }

    pub fn capstone(&self) -> &BadgeKey {
        &self.capstone
    }

    pub fn required_count(&self) -> usize {
        self.required.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub profile_url: String,
}

/// What the extractor found on a profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedProfile {
    pub badge_titles: Vec<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Participant {
    pub display_name: String,
    pub profile_url: String,
    pub found_badges: HashSet<BadgeKey>,
}

impl Participant {
    pub fn new(entry: &RosterEntry, profile: ScrapedProfile, prefer_scraped_name: bool) -> Self {
        let display_name = match profile.display_name {
            Some(scraped) if prefer_scraped_name && !scraped.is_empty() => scraped,
            _ => capitalize_words(&entry.name),
        };

        Self {
            display_name,
            profile_url: entry.profile_url.clone(),
            found_badges: profile
                .badge_titles
                .iter()
                .map(|title| BadgeKey::from_title(title))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    CompletedAll,
    SomeLabsLeft,
    OnlyArcadeLeft,
    Unclassified,
}

impl Tier {
    /// Tiers that appear in the report, in report order.
    pub const REPORTED: [Tier; 3] = [Tier::CompletedAll, Tier::SomeLabsLeft, Tier::OnlyArcadeLeft];

    pub fn title(self) -> &'static str {
        match self {
            Tier::CompletedAll => "Completed Everything",
            Tier::SomeLabsLeft => "Some Labs Left",
            Tier::OnlyArcadeLeft => "Only Arcade Left",
            // Never reported; shows up in per-participant log lines
            Tier::Unclassified => "Unclassified",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: Tier,
    pub matched_count: usize,
    pub has_capstone: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub name: String,
    pub profile_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup {
    pub tier: Tier,
    pub entries: Vec<ReportEntry>,
}

impl ReportGroup {
    pub fn new(tier: Tier) -> Self {
        Self { tier, entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sort_by_name(&mut self) {
        self.entries.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

/// Title-case every word: the first letter and any letter after punctuation
/// ("o'neil-smith" becomes "O'Neil-Smith"). Words are re-joined with single spaces.
pub fn capitalize_words(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut out = String::with_capacity(word.len());
            let mut at_boundary = true;
            for c in word.to_lowercase().chars() {
                if at_boundary {
                    out.extend(c.to_uppercase());
                } else {
                    out.push(c);
                }
                at_boundary = if c.is_ascii() {
                    !(c.is_ascii_alphanumeric() || c == '_')
                } else {
                    c.is_whitespace()
                };
            }
            out
        })
        .collect::<Vec<_>>()
        .join(" ")
}
