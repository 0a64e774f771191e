//! Filename classification rules.
//!
//! Rules are evaluated in order and the first match wins. A rule whose
//! prefix contains an earlier rule's prefix can never match, so rule lists
//! are validated on construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::content::{ContentDate, ContentType};

/// Errors produced while classifying an input filename
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("No content type matches filename: {0}")]
    UnrecognizedType(String),

    #[error("No YYYYMMDD date found in filename: {0}")]
    MissingDate(String),

    #[error("Rule '{shadowed}' can never match: earlier rule '{by}' matches first")]
    ShadowedRule { shadowed: String, by: String },

    #[error("Rule list is empty")]
    NoRules,
}

/// One filename pattern and what it maps to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRule {
    /// Substring to look for in the filename
    pub prefix: String,

    /// Content type assigned on match
    #[serde(rename = "type")]
    pub content_type: ContentType,

    /// Destination category directory
    pub directory: String,

    /// Suffix appended to the destination file stem
    #[serde(default)]
    pub suffix: String,
}

impl TypeRule {
    pub fn new(
        prefix: impl Into<String>,
        content_type: ContentType,
        directory: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            content_type,
            directory: directory.into(),
            suffix: suffix.into(),
        }
    }

    fn matches(&self, filename: &str) -> bool {
        filename.contains(&self.prefix)
    }
}

/// Built-in rule table. Longer prefixes come before the prefixes they contain.
pub fn default_rules() -> Vec<TypeRule> {
    vec![
        TypeRule::new("순살크립토카드뉴스", ContentType::CryptoCard, "cardnews", "-crypto"),
        TypeRule::new("순살카드뉴스", ContentType::Card, "cardnews", ""),
        TypeRule::new("순살크립토", ContentType::Crypto, "newsletters", "-crypto"),
        TypeRule::new("순살브리핑", ContentType::Briefing, "newsletters", ""),
        TypeRule::new("SoonsalCrypto", ContentType::English, "english", ""),
    ]
}

/// Result of classifying one filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    /// The rule that matched
    pub rule: &'a TypeRule,

    /// Date found in the filename
    pub date: ContentDate,
}

/// Ordered, validated rule list
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<TypeRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

impl Classifier {
    /// Build a classifier, rejecting rules that an earlier rule shadows
    pub fn new(rules: Vec<TypeRule>) -> Result<Self, ClassifyError> {
        if rules.is_empty() {
            return Err(ClassifyError::NoRules);
        }

        for (i, rule) in rules.iter().enumerate() {
            if let Some(earlier) = rules[..i].iter().find(|e| rule.prefix.contains(&e.prefix)) {
                return Err(ClassifyError::ShadowedRule {
                    shadowed: rule.prefix.clone(),
                    by: earlier.prefix.clone(),
                });
            }
        }

        Ok(Self { rules })
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[TypeRule] {
        &self.rules
    }

    /// First rule whose prefix occurs in `filename`
    pub fn match_rule(&self, filename: &str) -> Option<&TypeRule> {
        self.rules.iter().find(|rule| rule.matches(filename))
    }

    /// Resolve both the content type and the date of `filename`
    pub fn classify(&self, filename: &str) -> Result<Classification<'_>, ClassifyError> {
        let rule = self
            .match_rule(filename)
            .ok_or_else(|| ClassifyError::UnrecognizedType(filename.to_string()))?;
        let date = ContentDate::from_filename(filename)
            .ok_or_else(|| ClassifyError::MissingDate(filename.to_string()))?;

        Ok(Classification { rule, date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        assert!(Classifier::new(default_rules()).is_ok());
    }

    #[test]
    fn test_longer_prefix_wins() {
        let classifier = Classifier::default();
        let rule = classifier.match_rule("순살크립토카드뉴스_20260302.html").unwrap();
        assert_eq!(rule.content_type, ContentType::CryptoCard);
        assert_eq!(rule.directory, "cardnews");
        assert_eq!(rule.suffix, "-crypto");
    }

    #[test]
    fn test_shadowed_rule_rejected() {
        let rules = vec![
            TypeRule::new("순살크립토", ContentType::Crypto, "newsletters", "-crypto"),
            TypeRule::new("순살크립토카드뉴스", ContentType::CryptoCard, "cardnews", "-crypto"),
        ];
        let err = Classifier::new(rules).unwrap_err();
        assert_eq!(
            err,
            ClassifyError::ShadowedRule {
                shadowed: "순살크립토카드뉴스".to_string(),
                by: "순살크립토".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_rules_rejected() {
        assert_eq!(Classifier::new(Vec::new()).unwrap_err(), ClassifyError::NoRules);
    }

    #[test]
    fn test_unrecognized_and_undated() {
        let classifier = Classifier::default();
        assert!(matches!(
            classifier.classify("weekly_20260302.html"),
            Err(ClassifyError::UnrecognizedType(_))
        ));
        assert!(matches!(
            classifier.classify("순살브리핑_latest.html"),
            Err(ClassifyError::MissingDate(_))
        ));
    }
}
