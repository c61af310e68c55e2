//! Highlighting parser
//!
//! This module provides the `Parser` that runs a brush over a buffer,
//! lets registered script brushes take over the regions they claim, and
//! resolves everything into one style per position.

use std::sync::Arc;

use log::{debug, trace};
use parking_lot::Mutex;

use super::brush::Brush;
use super::collector::{MatchCollector, StyleMap};
use super::error::{BrushError, Result};
use super::span::MatchResult;

/// Style key given to the delimiters of an embedded script region
pub const SCRIPT_STYLE: &str = "script";

/// Main highlighting engine
///
/// The only state is the list of script brushes, shared by every
/// `parse` call. It is safe to parse from several threads at once.
#[derive(Debug, Default)]
pub struct Parser {
    /// Script brushes, tried in registration order
    html_script_brushes: Mutex<Vec<Arc<Brush>>>,
}

impl Parser {
    /// Create a parser with no script brushes
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight `text[offset..offset + length]` with `brush`
    ///
    /// With `html_script` on, every registered script brush overrides the
    /// host brush inside the regions its script pattern matches. Returns
    /// `None` if the range is not inside `text` or does not fall on
    /// character boundaries.
    pub fn parse(
        &self,
        brush: &Brush,
        html_script: bool,
        text: &str,
        offset: usize,
        length: usize,
    ) -> Option<StyleMap> {
        let end = offset.checked_add(length)?;
        text.get(offset..end)?;

        let mut matches = MatchCollector::new();
        brush.collect(text, offset, length, &mut matches);

        if html_script {
            for script_brush in self.html_script_brushes() {
                apply_script_brush(&script_brush, text, offset, length, &mut matches);
            }
        }

        let styles = matches.resolve(offset);
        debug!(
            "parsed {}..{} with {}: {} candidates, {} styles",
            offset,
            end,
            brush.name,
            matches.len(),
            styles.len()
        );
        Some(styles)
    }

    /// Highlight the whole of `text`
    pub fn parse_all(&self, brush: &Brush, html_script: bool, text: &str) -> StyleMap {
        self.parse(brush, html_script, text, 0, text.len())
            .unwrap_or_default()
    }

    /// Copy of the script brush list
    pub fn html_script_brushes(&self) -> Vec<Arc<Brush>> {
        self.html_script_brushes.lock().clone()
    }

    /// Replace all script brushes
    ///
    /// Every brush needs a script region; on error the list is unchanged.
    pub fn set_html_script_brushes(&self, brushes: impl IntoIterator<Item = Arc<Brush>>) -> Result<()> {
        let brushes: Vec<_> = brushes.into_iter().collect();
        for brush in &brushes {
            check_embeddable(brush)?;
        }
        debug!("replacing script brushes with {} brushes", brushes.len());
        *self.html_script_brushes.lock() = brushes;
        Ok(())
    }

    /// Add a script brush after the existing ones
    pub fn add_html_script_brush(&self, brush: Arc<Brush>) -> Result<()> {
        check_embeddable(&brush)?;
        debug!("adding script brush {}", brush.name);
        self.html_script_brushes.lock().push(brush);
        Ok(())
    }
}

fn check_embeddable(brush: &Brush) -> Result<()> {
    if brush.script_region().is_none() {
        return Err(BrushError::NotEmbeddable(brush.name.clone()));
    }
    Ok(())
}

/// Let `script_brush` take over every region its script pattern matches
///
/// Host matches inside a region are cut away first, then the delimiters
/// get the script style and the code between them is run through the
/// script brush's own rules. Script regions inside that code are not
/// looked at.
fn apply_script_brush(
    script_brush: &Brush,
    text: &str,
    offset: usize,
    length: usize,
    matches: &mut MatchCollector,
) {
    let Some(region) = script_brush.script_region() else {
        return;
    };

    for caps in region.captures_iter(&text[offset..offset + length]) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        trace!(
            "{} region at {}..{}",
            script_brush.name,
            offset + whole.start(),
            offset + whole.end()
        );
        matches.remove_range(offset + whole.start(), offset + whole.end());

        if let Some(open) = caps.get(1).filter(|m| !m.is_empty()) {
            matches.add(MatchResult::new(offset + open.start(), open.len(), SCRIPT_STYLE, None));
        }
        if let Some(code) = caps.get(2).filter(|m| !m.is_empty()) {
            script_brush.collect(text, offset + code.start(), code.len(), matches);
        }
        if let Some(close) = caps.get(3).filter(|m| !m.is_empty()) {
            matches.add(MatchResult::new(offset + close.start(), close.len(), SCRIPT_STYLE, None));
        }
    }
}
