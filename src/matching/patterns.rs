// file: src/matching/patterns.rs
// description: compiled keyword patterns and the classification rule table
// reference: https://docs.rs/regex

use crate::models::Category;
use lazy_static::lazy_static;
use regex::Regex;

/// Extended special-situations vocabulary, in registry order.
/// The flag marks terms that also match their plural with a trailing `s`.
pub const EXTENDED_VOCABULARY: &[(&str, bool)] = &[
    ("merger", true),
    ("acquisition", true),
    ("business combination", false),
    ("tender offer", false),
    ("going private", false),
    ("take private", false),
    ("13e-3", false),
    ("sc to-t", false),
    ("sc to-i", false),
    ("spin-off", false),
    ("spinoff", false),
    ("split-off", false),
    ("carve-out", false),
    ("restructuring", false),
    ("recapitalization", false),
    ("rights offering", false),
    ("asset sale", false),
    ("divestiture", false),
    ("chapter 11", false),
    ("bankruptcy", false),
    ("13d", false),
    ("13d/a", false),
    ("strategic review", false),
    ("strategic alternatives", false),
    ("special dividend", false),
    ("share repurchase", false),
    ("buyback", false),
];

/// Ordered classification table, highest priority first.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule::new(&["13e-3"], Category::GoingPrivate13e3),
    CategoryRule::new(&["sc to-t"], Category::TenderOfferThirdParty),
    CategoryRule::new(&["sc to-i"], Category::IssuerTender),
    CategoryRule::new(
        &["tender offer", "going private", "go-private", "take private"],
        Category::TenderGoingPrivate,
    ),
    CategoryRule::new(
        &["spin-off", "spinoff", "split-off", "carve-out"],
        Category::SpinOff,
    ),
    CategoryRule::new(
        &[
            "merger",
            "acquisition",
            "acquires",
            "to be acquired",
            "combination",
        ],
        Category::MergerAcquisition,
    ),
    CategoryRule::new(
        &["restructuring", "recapitalization", "rights offering"],
        Category::RestructuringRecap,
    ),
    CategoryRule::new(
        &["asset sale", "divestiture", "sell division", "disposition"],
        Category::AssetSale,
    ),
    CategoryRule::new(
        &["chapter 11", "bankruptcy", "emerges from chapter"],
        Category::Bankruptcy,
    ),
    CategoryRule::new(&["13d"], Category::Activist13d),
    CategoryRule::new(&["strategic review"], Category::StrategicReview),
    CategoryRule::new(&["special dividend"], Category::SpecialDividend),
    CategoryRule::new(&["buyback", "share repurchase"], Category::Buyback),
];

lazy_static! {
    static ref SHARED_REGISTRY: PatternRegistry =
        PatternRegistry::build().expect("keyword vocabulary regexes are valid");
}

/// A trigger list and the category it selects. Triggers are lower-case
/// substrings.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub triggers: &'static [&'static str],
    pub category: Category,
}

impl CategoryRule {
    pub const fn new(triggers: &'static [&'static str], category: Category) -> Self {
        Self { triggers, category }
    }
}

#[derive(Debug, Clone)]
pub struct KeywordPattern {
    term: &'static str,
    regex: Regex,
}

impl KeywordPattern {
    pub fn compile(term: &'static str, plural: bool) -> Result<Self, regex::Error> {
        Ok(Self {
            term,
            regex: Regex::new(&whole_word_source(term, plural))?,
        })
    }

    pub fn term(&self) -> &'static str {
        self.term
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// `merger(s)` / `acquisition(s)` pair used by the 8-K M&A scan.
#[derive(Debug, Clone)]
pub struct TwoTermRules {
    pub first: KeywordPattern,
    pub second: KeywordPattern,
}

#[derive(Debug, Clone)]
pub struct ExtendedRules {
    patterns: Vec<KeywordPattern>,
}

impl ExtendedRules {
    pub fn patterns(&self) -> &[KeywordPattern] {
        &self.patterns
    }

    pub fn any_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// Every rule set the matcher and classifier consult. Built once and shared
/// by reference; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    two_term: TwoTermRules,
    extended: ExtendedRules,
    category_rules: &'static [CategoryRule],
}

impl PatternRegistry {
    pub fn build() -> Result<Self, regex::Error> {
        let two_term = TwoTermRules {
            first: KeywordPattern::compile("merger", true)?,
            second: KeywordPattern::compile("acquisition", true)?,
        };

        let patterns = EXTENDED_VOCABULARY
            .iter()
            .map(|&(term, plural)| KeywordPattern::compile(term, plural))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            two_term,
            extended: ExtendedRules { patterns },
            category_rules: CATEGORY_RULES,
        })
    }

    /// Process-wide instance, compiled on first use.
    pub fn shared() -> &'static PatternRegistry {
        &SHARED_REGISTRY
    }

    pub fn two_term(&self) -> &TwoTermRules {
        &self.two_term
    }

    pub fn extended(&self) -> &ExtendedRules {
        &self.extended
    }

    pub fn category_rules(&self) -> &[CategoryRule] {
        self.category_rules
    }
}

/// Builds `(?i)\b<term>(?:s)?\b`.
///
/// Boundaries are the regex crate's Unicode `\b` on both ends, so every term
/// must start and end with an alphanumeric. Interior punctuation is literal and
/// interior spaces match any whitespace run, which lets phrases wrap across
/// lines in filing text.
pub fn whole_word_source(term: &str, plural: bool) -> String {
    let body = term
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let suffix = if plural { "s?" } else { "" };
    format!(r"(?i)\b{}{}\b", body, suffix)
}
