//! First-match-wins keyword classifier.

use regex::Regex;

use crate::knowledge::{FALLBACK_REPLY, RULES};

/// One compiled rule: a key, its pattern and the reply it selects.
#[derive(Debug)]
pub struct ResponseCategory {
    pub key: &'static str,
    pub pattern: Regex,
    pub reply: &'static str,
}

impl ResponseCategory {
    /// Test already-normalized input against this rule.
    pub fn matches(&self, normalized: &str) -> bool {
        self.pattern.is_match(normalized)
    }
}

/// The ordered rule table, compiled once and reused.
#[derive(Debug)]
pub struct MessageClassifier {
    categories: Vec<ResponseCategory>,
}

impl Default for MessageClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageClassifier {
    /// Compile every rule in priority order.
    pub fn new() -> Self {
        let categories = RULES
            .iter()
            .map(|&(key, pattern, reply)| ResponseCategory {
                key,
                pattern: Regex::new(pattern).expect("Invalid category regex"),
                reply,
            })
            .collect();
        Self { categories }
    }

    /// Rules in the order they are tested.
    pub fn categories(&self) -> &[ResponseCategory] {
        &self.categories
    }

    /// Look a rule up by key.
    pub fn category(&self, key: &str) -> Option<&ResponseCategory> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// The first rule matching `text`, if any.
    pub fn classify_category(&self, text: &str) -> Option<&ResponseCategory> {
        let normalized = normalize(text);
        self.categories.iter().find(|c| c.matches(&normalized))
    }

    /// Reply body for `text`: the first matching rule's reply, or the fallback.
    pub fn classify(&self, text: &str) -> &'static str {
        match self.classify_category(text) {
            Some(category) => {
                tracing::debug!(category = category.key, "Message classified");
                category.reply
            }
            None => {
                tracing::debug!("No category matched, using fallback reply");
                FALLBACK_REPLY
            }
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
