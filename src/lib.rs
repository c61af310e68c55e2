//! brushwork - regex brush highlighting engine
//!
//! Runs a language's brush (an ordered table of regex rules) over a
//! buffer and turns the overlapping candidate matches into one style per
//! position:
//! - rules style capture groups or hand them to nested rules
//! - script brushes take over embedded regions (code inside markup)
//! - the longest match at each position wins, the earliest on a tie
//!
//! ```
//! use brushwork::{Brush, Parser, RegexRule};
//!
//! let mut brush = Brush::new("Numbers");
//! brush.add_rule(RegexRule::styled(r"\d+", "value").unwrap());
//!
//! let styles = Parser::new().parse_all(&brush, false, "a 12 b");
//! assert_eq!(styles["value"][0].offset(), 2);
//! ```

mod brush;
mod collector;
mod config;
mod error;
mod parser;
mod rules;
mod span;

pub use brush::Brush;
pub use collector::{MatchCollector, StyleMap};
pub use error::{BrushError, Result};
pub use parser::{Parser, SCRIPT_STYLE};
pub use rules::{GroupAction, RegexRule};
pub use span::MatchResult;
