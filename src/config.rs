//! Brush definitions in TOML
//!
//! Lets rule tables live in data instead of code.
//!
//! Example:
//! ```toml
//! name = "XML"
//! script-region = '(<\?php)([\s\S]*?)(\?>)'
//!
//! [[rule]]
//! id = "attribute-value"
//! pattern = '"[^"]*"'
//! style = "string"
//! nested-only = true
//!
//! [[rule]]
//! pattern = '(</?)(\w+)([^>]*)(/?>)'
//! bold = true
//! groups = { 1 = "keyword", 2 = "keyword", 3 = { rule = "attribute-value" }, 4 = "keyword" }
//! ```
//!
//! Rules are added in file order. A rule marked `nested-only` is only used
//! through `{ rule = "<id>" }` references from other rules, so it needs an
//! id. Ids must be unique and style keys must not be empty.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::brush::Brush;
use super::error::{BrushError, Result};
use super::rules::RegexRule;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct BrushDef {
    name: String,
    script_region: Option<String>,
    #[serde(default, rename = "rule")]
    rules: Vec<RuleDef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RuleDef {
    id: Option<String>,
    pattern: String,
    /// Shorthand for `groups = { 0 = "..." }`
    style: Option<String>,
    bold: Option<bool>,
    #[serde(default)]
    nested_only: bool,
    /// Group index (as a TOML key) -> action
    #[serde(default)]
    groups: BTreeMap<String, ActionDef>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ActionDef {
    Style(String),
    Rule { rule: String },
}

impl Brush {
    /// Build a brush from a TOML definition
    pub fn from_toml(source: &str) -> Result<Self> {
        let def: BrushDef = toml::from_str(source)?;

        let mut by_id: HashMap<&str, &RuleDef> = HashMap::new();
        for rule in &def.rules {
            match rule.id.as_deref() {
                Some(id) => {
                    if by_id.insert(id, rule).is_some() {
                        return Err(BrushError::DuplicateRule(id.to_string()));
                    }
                }
                None if rule.nested_only => {
                    return Err(BrushError::UnreachableRule(rule.pattern.clone()));
                }
                None => {}
            }
        }

        let mut brush = Brush::new(&def.name);
        if let Some(region) = &def.script_region {
            brush.set_script_region(region)?;
        }
        for rule in def.rules.iter().filter(|rule| !rule.nested_only) {
            let mut path = Vec::new();
            brush.add_rule(build_rule(rule, &by_id, &mut path)?);
        }
        Ok(brush)
    }
}

/// Compile one rule definition, following nested references
///
/// `path` holds the ids currently being built, to catch cycles.
fn build_rule<'a>(def: &'a RuleDef, by_id: &HashMap<&str, &'a RuleDef>, path: &mut Vec<&'a str>) -> Result<RegexRule> {
    if let Some(id) = def.id.as_deref() {
        if path.contains(&id) {
            return Err(BrushError::RuleCycle(id.to_string()));
        }
        path.push(id);
    }

    let mut rule = RegexRule::new(&def.pattern)?.with_bold(def.bold);
    if let Some(style) = &def.style {
        rule = rule.with_style(0, non_empty(style, def)?)?;
    }
    for (key, action) in &def.groups {
        let group = key
            .parse::<usize>()
            .map_err(|_| BrushError::GroupIndex(key.clone()))?;
        rule = match action {
            ActionDef::Style(style) => rule.with_style(group, non_empty(style, def)?)?,
            ActionDef::Rule { rule: id } => {
                let nested = by_id
                    .get(id.as_str())
                    .copied()
                    .ok_or_else(|| BrushError::UnknownRule(id.clone()))?;
                let nested = build_rule(nested, by_id, path)?;
                rule.with_nested(group, nested)?
            }
        };
    }

    if def.id.is_some() {
        path.pop();
    }
    Ok(rule)
}

fn non_empty<'s>(style: &'s str, def: &RuleDef) -> Result<&'s str> {
    if style.is_empty() {
        return Err(BrushError::EmptyStyle(def.pattern.clone()));
    }
    Ok(style)
}
