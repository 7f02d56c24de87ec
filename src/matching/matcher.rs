// file: src/matching/matcher.rs
// description: keyword presence tests over a text blob
// reference: whole-word rules from matching::patterns

use crate::matching::patterns::PatternRegistry;

/// Which rule set decides a match, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// `merger(s)` / `acquisition(s)`; either term, or both when `require_both`.
    TwoTerm { require_both: bool },
    /// Any term of the extended special-situations vocabulary.
    Extended,
}

impl Default for MatchMode {
    fn default() -> Self {
        MatchMode::TwoTerm {
            require_both: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextMatcher<'a> {
    registry: &'a PatternRegistry,
}

impl<'a> TextMatcher<'a> {
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self { registry }
    }

    pub fn matches(&self, text: Option<&str>, mode: MatchMode) -> bool {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return false;
        };

        match mode {
            MatchMode::TwoTerm { require_both } => {
                let rules = self.registry.two_term();
                if require_both {
                    rules.first.is_match(text) && rules.second.is_match(text)
                } else {
                    rules.first.is_match(text) || rules.second.is_match(text)
                }
            }
            MatchMode::Extended => self.registry.extended().any_match(text),
        }
    }
}

impl Default for TextMatcher<'static> {
    fn default() -> Self {
        Self::new(PatternRegistry::shared())
    }
}
