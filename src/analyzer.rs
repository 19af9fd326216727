use crate::models::{BadgeCatalog, BadgeKey, Classification, Tier};
use std::collections::HashSet;

/// Participants holding the capstone need strictly more than this many
/// required badges to land in `SomeLabsLeft`.
const SOME_LABS_LEFT_ABOVE: usize = 13;

/// Numbers the tier rules are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFacts {
    pub matched_count: usize,
    pub has_capstone: bool,
    pub required_count: usize,
}

pub struct TierRule {
    pub tier: Tier,
    pub applies: fn(&MatchFacts) -> bool,
}

/// Evaluated top to bottom, first match wins. A capstone holder with 19
/// badges is `SomeLabsLeft`, never `OnlyArcadeLeft`.
pub const TIER_RULES: [TierRule; 3] = [
    TierRule {
        tier: Tier::CompletedAll,
        applies: |f| f.matched_count == f.required_count,
    },
    TierRule {
        tier: Tier::SomeLabsLeft,
        applies: |f| f.has_capstone && f.matched_count > SOME_LABS_LEFT_ABOVE,
    },
    TierRule {
        tier: Tier::OnlyArcadeLeft,
        applies: |f| !f.has_capstone && f.matched_count + 1 == f.required_count,
    },
];

pub fn tier_for(facts: &MatchFacts) -> Tier {
    TIER_RULES
        .iter()
        .find(|rule| (rule.applies)(facts))
        .map(|rule| rule.tier)
        .unwrap_or(Tier::Unclassified)
}

pub struct BadgeClassifier<'a> {
    pub catalog: &'a BadgeCatalog,
}

impl<'a> BadgeClassifier<'a> {
    pub fn new(catalog: &'a BadgeCatalog) -> Self {
        Self { catalog }
    }

    pub fn match_facts(&self, found: &HashSet<BadgeKey>) -> MatchFacts {
        let required = self.catalog.required();
        let matched_count = found.intersection(required).count();
        let capstone = self.catalog.capstone();
        let has_capstone = found.contains(capstone) && required.contains(capstone);

        MatchFacts {
            matched_count,
            has_capstone,
            required_count: self.catalog.required_count(),
        }
    }

    pub fn classify(&self, found: &HashSet<BadgeKey>) -> Classification {
        let facts = self.match_facts(found);

        Classification {
            tier: tier_for(&facts),
            matched_count: facts.matched_count,
            has_capstone: facts.has_capstone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CAPSTONE_BADGE, REQUIRED_BADGES};

    trait ClassifyTitles {
        fn classify_titles<S: AsRef<str>>(&self, titles: &[S]) -> Classification;
    }

    impl ClassifyTitles for BadgeClassifier<'_> {
        fn classify_titles<S: AsRef<str>>(&self, titles: &[S]) -> Classification {
            let found: HashSet<BadgeKey> = titles
                .iter()
                .map(|title| BadgeKey::from_title(title.as_ref()))
                .collect();
            self.classify(&found)
        }
    }

    fn skill_badges() -> Vec<&'static str> {
        REQUIRED_BADGES
            .iter()
            .copied()
            .filter(|title| *title != CAPSTONE_BADGE)
            .collect()
    }

    fn with_capstone(skills: usize) -> Vec<&'static str> {
        let mut titles: Vec<&str> = skill_badges().into_iter().take(skills).collect();
        titles.push(CAPSTONE_BADGE);
        titles
    }

    #[test]
    fn all_required_badges_completes_everything() {
        let catalog = BadgeCatalog::arcade();
        let result = BadgeClassifier::new(&catalog).classify_titles(&REQUIRED_BADGES);

        assert_eq!(result.tier, Tier::CompletedAll);
        assert_eq!(result.matched_count, 20);
        assert!(result.has_capstone);
    }

    #[test]
    fn capstone_plus_thirteen_is_some_labs_left() {
        let catalog = BadgeCatalog::arcade();
        let result = BadgeClassifier::new(&catalog).classify_titles(&with_capstone(13));

        assert_eq!(result.tier, Tier::SomeLabsLeft);
        assert_eq!(result.matched_count, 14);
    }

    #[test]
    fn capstone_plus_twelve_is_unclassified() {
        let catalog = BadgeCatalog::arcade();
        let result = BadgeClassifier::new(&catalog).classify_titles(&with_capstone(12));

        assert_eq!(result.tier, Tier::Unclassified);
        assert_eq!(result.matched_count, 13);
    }

    #[test]
    fn everything_but_capstone_is_only_arcade_left() {
        let catalog = BadgeCatalog::arcade();
        let result = BadgeClassifier::new(&catalog).classify_titles(&skill_badges());

        assert_eq!(result.tier, Tier::OnlyArcadeLeft);
        assert_eq!(result.matched_count, 19);
        assert!(!result.has_capstone);
    }

    #[test]
    fn capstone_with_nineteen_prefers_some_labs_left() {
        let catalog = BadgeCatalog::arcade();
        let result = BadgeClassifier::new(&catalog).classify_titles(&with_capstone(18));

        assert_eq!(result.matched_count, 19);
        assert!(result.has_capstone);
        assert_eq!(result.tier, Tier::SomeLabsLeft);
    }

    #[test]
    fn eighteen_without_capstone_is_unclassified() {
        let catalog = BadgeCatalog::arcade();
        let titles: Vec<&str> = skill_badges().into_iter().take(18).collect();
        let result = BadgeClassifier::new(&catalog).classify_titles(&titles);

        assert_eq!(result.tier, Tier::Unclassified);
    }

    #[test]
    fn extra_and_duplicate_badges_do_not_count() {
        let catalog = BadgeCatalog::arcade();
        let mut titles: Vec<String> = REQUIRED_BADGES.iter().map(|t| t.to_uppercase()).collect();
        titles.push("cloud-run-functions-3-ways".to_string());
        titles.push("Some Unrelated Badge".to_string());

        let result = BadgeClassifier::new(&catalog).classify_titles(&titles);
        assert_eq!(result.matched_count, 20);
        assert_eq!(result.tier, Tier::CompletedAll);
    }

    #[test]
    fn no_badges_is_unclassified() {
        let catalog = BadgeCatalog::arcade();
        let result = BadgeClassifier::new(&catalog).classify(&HashSet::new());
        assert_eq!(
            result,
            Classification {
                tier: Tier::Unclassified,
                matched_count: 0,
                has_capstone: false,
            }
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let catalog = BadgeCatalog::arcade();
        let classifier = BadgeClassifier::new(&catalog);
        let titles = with_capstone(15);
        assert_eq!(classifier.classify_titles(&titles), classifier.classify_titles(&titles));
    }

    #[test]
    fn rule_table_order_is_visible() {
        let facts = MatchFacts {
            matched_count: 19,
            has_capstone: true,
            required_count: 20,
        };
        let matching: Vec<Tier> = TIER_RULES
            .iter()
            .filter(|rule| (rule.applies)(&facts))
            .map(|rule| rule.tier)
            .collect();
        assert_eq!(matching, vec![Tier::SomeLabsLeft]);
        assert_eq!(tier_for(&facts), Tier::SomeLabsLeft);
    }
}
