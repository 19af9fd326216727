use crate::error::{ScrapeError, TrackerError};
use crate::models::{capitalize_words, ScrapedProfile, SelectorConfig};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::debug;

/// Anything that can turn a profile URL into the badges shown on it.
pub trait BadgeSource {
    async fn fetch_profile(&self, url: &str) -> Result<ScrapedProfile, ScrapeError>;
}

pub struct ProfileScraper {
    client: reqwest::Client,
    timeout: Duration,
    name_selector: Selector,
    badge_selector: Selector,
    whitespace: Regex,
}

impl ProfileScraper {
    pub fn new(selectors: &SelectorConfig, timeout: Duration) -> Result<Self, TrackerError> {
        Self::with_client(reqwest::Client::new(), selectors, timeout)
    }

    pub fn with_client(
        client: reqwest::Client,
        selectors: &SelectorConfig,
        timeout: Duration,
    ) -> Result<Self, TrackerError> {
        Ok(Self {
            client,
            timeout,
            name_selector: compile_selector("display_name", &selectors.display_name)?,
            badge_selector: compile_selector("badge_title", &selectors.badge_title)?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Extract the display name and badge titles from a profile document.
    pub fn parse_profile(&self, content: &str) -> ScrapedProfile {
        let document = Html::parse_document(content);

        let display_name = document
            .select(&self.name_selector)
            .next()
            .map(|el| self.element_text(el))
            .filter(|name| !name.is_empty())
            .map(|name| capitalize_words(&name));

        let badge_titles = document
            .select(&self.badge_selector)
            .map(|el| self.element_text(el))
            .filter(|title| !title.is_empty())
            .collect();

        ScrapedProfile {
            badge_titles,
            display_name,
        }
    }

    fn element_text(&self, element: ElementRef) -> String {
        let text = element.text().collect::<String>();
        self.whitespace.replace_all(text.trim(), " ").into_owned()
    }
}

impl BadgeSource for ProfileScraper {
    async fn fetch_profile(&self, url: &str) -> Result<ScrapedProfile, ScrapeError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| ScrapeError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        debug!(url, %status, "profile response");
        if status != reqwest::StatusCode::OK {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })?;

        let content = std::str::from_utf8(&body).map_err(|e| ScrapeError::Parse {
            url: url.to_string(),
            reason: format!("body is not valid UTF-8: {}", e),
        })?;

        let profile = self.parse_profile(content);
        debug!(
            url,
            badges = profile.badge_titles.len(),
            has_name = profile.display_name.is_some(),
            "parsed profile"
        );
        Ok(profile)
    }
}

fn compile_selector(field: &'static str, selector: &str) -> Result<Selector, TrackerError> {
    Selector::parse(selector).map_err(|e| TrackerError::Selector {
        field,
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}
