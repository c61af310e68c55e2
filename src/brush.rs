//! Brushes
//!
//! A brush is the rule table for one language: an ordered list of regex
//! rules, plus an optional script region pattern that lets the brush be
//! embedded inside another language (a `<script>` block in HTML, a
//! `<?php ... ?>` block, and so on).

use regex::Regex;

use super::collector::MatchCollector;
use super::error::{BrushError, Result};
use super::rules::RegexRule;

/// Rule table for one language
#[derive(Debug, Clone)]
pub struct Brush {
    /// Language name (e.g., "XML", "JavaScript")
    pub name: String,
    /// Rules, evaluated in declaration order
    rules: Vec<RegexRule>,
    /// Where this language shows up inside a host document
    script_region: Option<Regex>,
}

impl Brush {
    /// Create a new empty brush
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rules: Vec::new(),
            script_region: None,
        }
    }

    /// Add a rule after the existing ones
    pub fn add_rule(&mut self, rule: RegexRule) {
        self.rules.push(rule);
    }

    /// Set the pattern locating this language inside a host document
    ///
    /// Groups 1, 2 and 3 are the opening delimiter, the embedded code and
    /// the closing delimiter.
    pub fn set_script_region(&mut self, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern)?;
        // captures_len counts the implicit group 0
        if regex.captures_len() < 4 {
            return Err(BrushError::ScriptRegionGroups(pattern.to_string()));
        }
        self.script_region = Some(regex);
        Ok(())
    }

    pub fn rules(&self) -> &[RegexRule] {
        &self.rules
    }

    pub fn script_region(&self) -> Option<&Regex> {
        self.script_region.as_ref()
    }

    /// Run every rule over `text[offset..offset + length]`
    pub(crate) fn collect(&self, text: &str, offset: usize, length: usize, matches: &mut MatchCollector) {
        for rule in &self.rules {
            rule.apply(text, offset, length, matches);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_keep_declaration_order() {
        let mut brush = Brush::new("Test");
        brush.add_rule(RegexRule::styled(r"\w+", "variable").unwrap());
        brush.add_rule(RegexRule::styled(r"\bif\b", "keyword").unwrap());

        let mut matches = MatchCollector::new();
        brush.collect("if", 0, 2, &mut matches);
        let keys: Vec<_> = matches.at(0).iter().map(|m| m.style_key()).collect();
        assert_eq!(keys, vec!["variable", "keyword"]);
    }

    #[test]
    fn test_script_region_needs_three_groups() {
        let mut brush = Brush::new("PHP");
        assert!(brush.script_region().is_none());
        let err = brush.set_script_region(r"(<\?)(.*)\?>").unwrap_err();
        assert!(matches!(err, BrushError::ScriptRegionGroups(_)));
        brush.set_script_region(r"(<\?)(.*?)(\?>)").unwrap();
        assert!(brush.script_region().is_some());
    }
}
