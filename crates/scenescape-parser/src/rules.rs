//! Ordered pattern lists with first-match-wins evaluation.

use regex::{Captures, Regex};

/// A single pattern paired with the function that turns its captures into
/// a result.
///
/// Extractors may reject a match (empty title, numeric overflow); the next
/// rule is then tried.
pub(crate) struct Rule<T> {
    pub name: &'static str,
    pub regex: Regex,
    pub extract: fn(&Captures<'_>) -> Option<T>,
}

impl<T> Rule<T> {
    /// Build a rule from a pattern known at compile time.
    ///
    /// Panics on an invalid pattern, which is a programming error caught by
    /// the unit tests of every rule list.
    pub fn new(name: &'static str, pattern: &str, extract: fn(&Captures<'_>) -> Option<T>) -> Self {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => panic!("invalid {name} pattern: {e}"),
        };
        Self {
            name,
            regex,
            extract,
        }
    }

    fn apply(&self, input: &str) -> Option<T> {
        let captures = self.regex.captures(input)?;
        (self.extract)(&captures)
    }
}

/// Evaluate `rules` in order and return the first accepted result.
pub(crate) fn first_match<T>(rules: &[Rule<T>], input: &str) -> Option<T> {
    rules.iter().find_map(|rule| rule.apply(input))
}

/// Parse a capture group as a base-10 `u32`.
pub(crate) fn number(captures: &Captures<'_>, group: usize) -> Option<u32> {
    captures.get(group)?.as_str().parse().ok()
}
