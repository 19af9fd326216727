use crate::analyzer::BadgeClassifier;
use crate::extractor::BadgeSource;
use crate::models::{Participant, ReportEntry, ReportGroup, RosterEntry, Tier};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub prefer_scraped_name: bool,
    pub request_delay: Duration,
}

/// Accumulates classified participants into the three reported tiers.
#[derive(Debug, Clone)]
pub struct TierReport {
    groups: Vec<ReportGroup>,
}

impl Default for TierReport {
    fn default() -> Self {
        Self {
            groups: Tier::REPORTED.iter().map(|tier| ReportGroup::new(*tier)).collect(),
        }
    }
}

impl TierReport {
    pub fn record(&mut self, name: &str, profile_url: &str, tier: Tier) {
        if let Some(group) = self.groups.iter_mut().find(|g| g.tier == tier) {
            group.entries.push(ReportEntry {
                name: name.to_string(),
                profile_url: profile_url.to_string(),
            });
        }
    }

    /// Groups in report order, each sorted by name.
    pub fn into_groups(mut self) -> Vec<ReportGroup> {
        for group in &mut self.groups {
            group.sort_by_name();
        }
        self.groups
    }
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub groups: Vec<ReportGroup>,
    pub checked: usize,
    pub skipped: usize,
}

/// Check every roster entry in order, one fetch at a time.
pub async fn run<S: BadgeSource>(
    roster: &[RosterEntry],
    source: &S,
    classifier: &BadgeClassifier<'_>,
    options: &RunOptions,
) -> RunOutcome {
    let mut report = TierReport::default();
    let mut checked = 0;
    let mut skipped = 0;

    for entry in roster {
        println!("🔍 Checking profile: {}", entry.name);

        let fetched = source.fetch_profile(&entry.profile_url).await;

        match fetched {
            Ok(profile) => {
                let participant = Participant::new(entry, profile, options.prefer_scraped_name);
                let result = classifier.classify(&participant.found_badges);
                info!(
                    name = %participant.display_name,
                    matched = result.matched_count,
                    capstone = result.has_capstone,
                    tier = result.tier.title(),
                    "classified participant"
                );

                report.record(&participant.display_name, &participant.profile_url, result.tier);
                checked += 1;
            }
            Err(e) => {
                println!("   ❌ Error fetching profile: {}", e);
                warn!(url = e.url(), error = %e, "skipping participant");
                skipped += 1;
            }
        }

        if !options.request_delay.is_zero() {
            tokio::time::sleep(options.request_delay).await;
        }
    }

    RunOutcome {
        groups: report.into_groups(),
        checked,
        skipped,
    }
}
