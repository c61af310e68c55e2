//! Pattern rules for brushes
//!
//! A rule is a compiled regex plus an action for each capture group it
//! cares about. An action either styles the captured text or hands it to
//! a nested rule for a finer-grained pass.

use std::collections::BTreeMap;

use regex::Regex;

use super::collector::MatchCollector;
use super::error::{BrushError, Result};
use super::span::MatchResult;

/// What to do with the text of one capture group
#[derive(Debug, Clone)]
pub enum GroupAction {
    /// Style the capture with this style key
    Style(String),
    /// Evaluate a nested rule over the capture
    Nested(Box<RegexRule>),
}

/// A single regex rule
#[derive(Debug, Clone)]
pub struct RegexRule {
    /// Compiled regex pattern
    pattern: Regex,
    /// Capture group index -> action, applied in ascending group order
    groups: BTreeMap<usize, GroupAction>,
    /// Bold override for spans this rule styles directly
    bold: Option<bool>,
}

impl RegexRule {
    /// Create a rule with no group actions yet
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            groups: BTreeMap::new(),
            bold: None,
        })
    }

    /// Create a rule styling the whole match
    pub fn styled(pattern: &str, style_key: &str) -> Result<Self> {
        Self::new(pattern)?.with_style(0, style_key)
    }

    /// Builder: style capture `group` with `style_key`
    pub fn with_style(self, group: usize, style_key: &str) -> Result<Self> {
        self.with_action(group, GroupAction::Style(style_key.to_string()))
    }

    /// Builder: evaluate `rule` over capture `group`
    pub fn with_nested(self, group: usize, rule: RegexRule) -> Result<Self> {
        self.with_action(group, GroupAction::Nested(Box::new(rule)))
    }

    /// Builder: set the bold override
    pub fn with_bold(mut self, bold: Option<bool>) -> Self {
        self.bold = bold;
        self
    }

    /// Builder: attach an action to a capture group
    ///
    /// Fails if the pattern has no such group.
    ///
    /// # Panics
    ///
    /// Panics if the action is a style with an empty key.
    pub fn with_action(mut self, group: usize, action: GroupAction) -> Result<Self> {
        if group >= self.pattern.captures_len() {
            return Err(BrushError::UnknownGroup {
                pattern: self.pattern.as_str().to_string(),
                group,
            });
        }
        if let GroupAction::Style(key) = &action {
            assert!(!key.is_empty(), "style key of a rule cannot be empty");
        }
        self.groups.insert(group, action);
        Ok(self)
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn groups(&self) -> &BTreeMap<usize, GroupAction> {
        &self.groups
    }

    pub fn bold(&self) -> Option<bool> {
        self.bold
    }

    /// Collect every match of this rule inside `text[offset..offset + length]`
    ///
    /// Spans are recorded in absolute buffer offsets.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or not on character boundaries.
    pub fn apply(&self, text: &str, offset: usize, length: usize, matches: &mut MatchCollector) {
        let region = &text[offset..offset + length];
        for caps in self.pattern.captures_iter(region) {
            for (&group, action) in &self.groups {
                // Groups that did not take part, or matched nothing, are skipped
                let Some(m) = caps.get(group) else {
                    continue;
                };
                if m.is_empty() {
                    continue;
                }
                let start = offset + m.start();
                match action {
                    GroupAction::Style(key) => {
                        matches.add(MatchResult::new(start, m.len(), key.as_str(), self.bold));
                    }
                    GroupAction::Nested(rule) => rule.apply(text, start, m.len(), matches),
                }
            }
        }
    }
}
