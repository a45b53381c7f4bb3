//! Hiring classifier: decide which extracted posts announce hiring.
//!
//! Pure content matching, no navigation, no side effects. The matching
//! rule is deliberately the simple one the tool has always used:
//! case-folded substring containment. Negated phrasing ("not hiring")
//! is a known false-positive of that rule and is preserved as-is; the
//! [`KeywordMatcher`] seam exists so a stricter matcher can be swapped
//! in without touching the pipeline.

use hirelens_core::config::ClassifierConfig;
use hirelens_core::{ClassificationResult, PostRecord};

/// Swappable content-matching policy.
pub trait KeywordMatcher: Send + Sync {
    /// The first configured phrase found in `text`, if any.
    fn find_match(&self, text: &str) -> Option<String>;
}

/// Case-folded substring containment over a fixed phrase list.
#[derive(Debug, Clone)]
pub struct SubstringMatcher {
    phrases: Vec<String>,
}

impl SubstringMatcher {
    /// Build a matcher from phrases; matching is case-insensitive.
    #[must_use]
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.into().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }
}

impl KeywordMatcher for SubstringMatcher {
    fn find_match(&self, text: &str) -> Option<String> {
        let folded = text.to_lowercase();
        self.phrases
            .iter()
            .find(|phrase| folded.contains(phrase.as_str()))
            .cloned()
    }
}

/// Classifies post records as hiring / not-hiring.
///
/// A post is hiring when a hiring keyword matches, or when a job-title
/// phrase matches together with a hiring-intent cue. `Unavailable`
/// records are not-hiring by definition.
pub struct HiringClassifier {
    keywords: Box<dyn KeywordMatcher>,
    titles: Box<dyn KeywordMatcher>,
    cues: Box<dyn KeywordMatcher>,
}

impl HiringClassifier {
    /// Build the default substring classifier from configuration.
    #[must_use]
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self {
            keywords: Box::new(SubstringMatcher::new(config.search_keywords.clone())),
            titles: Box::new(SubstringMatcher::new(config.job_titles.clone())),
            cues: Box::new(SubstringMatcher::new(config.intent_cues.clone())),
        }
    }

    /// Build a classifier from explicit matchers.
    #[must_use]
    pub fn with_matchers(
        keywords: Box<dyn KeywordMatcher>,
        titles: Box<dyn KeywordMatcher>,
        cues: Box<dyn KeywordMatcher>,
    ) -> Self {
        Self {
            keywords,
            titles,
            cues,
        }
    }

    /// Classify one record. Deterministic and idempotent.
    #[must_use]
    pub fn classify(&self, record: PostRecord) -> ClassificationResult {
        if record.is_unavailable() {
            return ClassificationResult {
                record,
                hiring: false,
                matched: Vec::new(),
            };
        }

        let keyword = self.keywords.find_match(&record.text);
        let title = self.titles.find_match(&record.text);
        let cue = self.cues.find_match(&record.text);

        let hiring = keyword.is_some() || (title.is_some() && cue.is_some());

        let mut matched = Vec::new();
        if hiring {
            matched.extend(keyword);
            matched.extend(title);
            matched.extend(cue);
        }

        ClassificationResult {
            record,
            hiring,
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hirelens_core::{Engagement, ExtractionStatus};

    fn record(text: &str) -> PostRecord {
        PostRecord {
            url: "https://www.linkedin.com/feed/update/urn:li:activity:1/".to_string(),
            author_name: Some("Jane Doe".to_string()),
            author_headline: None,
            text: text.to_string(),
            timestamp: None,
            engagement: Engagement::default(),
            status: ExtractionStatus::Extracted,
        }
    }

    fn classifier() -> HiringClassifier {
        HiringClassifier::from_config(&ClassifierConfig::default())
    }

    #[test]
    fn test_keyword_match_is_hiring() {
        let result = classifier().classify(record("We are hiring a backend developer"));
        assert!(result.hiring);
        assert!(result.matched.contains(&"hiring".to_string()));
    }

    #[test]
    fn test_no_match_is_not_hiring() {
        let result = classifier().classify(record("Had a great time at the conference"));
        assert!(!result.hiring);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn test_title_plus_cue_is_hiring() {
        let result = classifier().classify(record(
            "Open position for an iOS developer, join our team in Pune",
        ));
        assert!(result.hiring);
        assert!(result.matched.contains(&"ios developer".to_string()));
    }

    #[test]
    fn test_title_without_cue_is_not_hiring() {
        let result =
            classifier().classify(record("Proud to call myself an android developer today"));
        assert!(!result.hiring);
    }

    #[test]
    fn test_unavailable_is_never_hiring() {
        let unavailable = PostRecord::unavailable(
            "https://www.linkedin.com/feed/update/urn:li:activity:2/",
            "removed",
        );
        let result = classifier().classify(unavailable);
        assert!(!result.hiring);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let rec = record("We are hiring");
        let first = classifier().classify(rec.clone());
        let second = classifier().classify(rec);
        assert_eq!(first.hiring, second.hiring);
        assert_eq!(first.matched, second.matched);
    }

    #[test]
    fn test_case_folding() {
        let result = classifier().classify(record("WE ARE HIRING!!!"));
        assert!(result.hiring);
    }

    #[test]
    fn test_negated_phrasing_false_positive_is_preserved() {
        // Substring containment by design: "not hiring" still contains
        // "hiring". Known limitation, kept until the matcher is swapped.
        let result = classifier().classify(record("We are not hiring right now"));
        assert!(result.hiring);
    }

    #[test]
    fn test_custom_matcher_seam() {
        struct NeverMatches;
        impl KeywordMatcher for NeverMatches {
            fn find_match(&self, _text: &str) -> Option<String> {
                None
            }
        }

        let classifier = HiringClassifier::with_matchers(
            Box::new(NeverMatches),
            Box::new(NeverMatches),
            Box::new(NeverMatches),
        );
        let result = classifier.classify(record("We are hiring"));
        assert!(!result.hiring);
    }
}
