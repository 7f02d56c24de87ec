// file: src/models/provenance.rs
// description: provenance tags recording which filing surface matched
// reference: where_found column of the hit tables

use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SurfaceTag {
    Primary,
    Attachment(String),
    PressRelease,
}

impl fmt::Display for SurfaceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceTag::Primary => f.write_str("primary"),
            SurfaceTag::Attachment(name) => write!(f, "attachment:{}", name),
            SurfaceTag::PressRelease => f.write_str("press_release"),
        }
    }
}

/// Deduplicated set of rendered tags, ordered lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereFound {
    tags: BTreeSet<String>,
}

impl WhereFound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: SurfaceTag) -> bool {
        self.tags.insert(tag.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join("; ")
    }
}

impl fmt::Display for WhereFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_is_sorted_and_deduplicated() {
        let mut found = WhereFound::new();
        found.insert(SurfaceTag::Primary);
        found.insert(SurfaceTag::Attachment("ex992.htm".to_string()));
        found.insert(SurfaceTag::Attachment("ex991.htm".to_string()));
        assert!(!found.insert(SurfaceTag::Primary));

        assert_eq!(
            found.joined(),
            "attachment:ex991.htm; attachment:ex992.htm; primary"
        );
    }

    #[test]
    fn test_press_release_sorts_before_primary() {
        let mut found = WhereFound::new();
        found.insert(SurfaceTag::Primary);
        found.insert(SurfaceTag::PressRelease);
        assert_eq!(found.to_string(), "press_release; primary");
    }
}
