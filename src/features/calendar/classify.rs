//! Keyword classification of event subjects.

use serde::{Deserialize, Serialize};

use super::event::DEFAULT_CLASSIFICATION;

/// Case-sensitive substring rule: a subject containing `keyword` is labelled `label`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClassificationRule {
    pub keyword: String,
    pub label: String,
}

impl ClassificationRule {
    pub fn new(keyword: &str, label: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            label: label.to_string(),
        }
    }
}

/// Ordered rule list; the first matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: Vec<ClassificationRule>,
}

impl Classifier {
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    pub fn classify(&self, subject: &str) -> String {
        self.rules
            .iter()
            .find(|rule| subject.contains(rule.keyword.as_str()))
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| DEFAULT_CLASSIFICATION.to_string())
    }
}
