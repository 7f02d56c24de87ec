// file: src/matching/classifier.rs
// description: first-match-wins special-situation classification
// reference: ordered rule table in matching::patterns

use crate::matching::patterns::PatternRegistry;
use crate::models::Category;

pub struct SituationClassifier<'a> {
    registry: &'a PatternRegistry,
}

impl<'a> SituationClassifier<'a> {
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self { registry }
    }

    /// Returns the category of the first rule with a trigger contained in the
    /// lower-cased text, or `Other`.
    ///
    /// Containment is plain substring search, not whole-word: `premerger`
    /// classifies as M&A here while the matcher rejects it.
    pub fn classify(&self, text: Option<&str>) -> Category {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return Category::Other;
        };
        let lowered = text.to_lowercase();

        self.registry
            .category_rules()
            .iter()
            .find(|rule| rule.triggers.iter().any(|t| lowered.contains(t)))
            .map(|rule| rule.category)
            .unwrap_or(Category::Other)
    }
}

impl Default for SituationClassifier<'static> {
    fn default() -> Self {
        Self::new(PatternRegistry::shared())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Category {
        SituationClassifier::default().classify(Some(text))
    }

    #[test]
    fn test_absent_text_is_other() {
        let classifier = SituationClassifier::default();
        assert_eq!(classifier.classify(None), Category::Other);
        assert_eq!(classifier.classify(Some("")), Category::Other);
    }

    #[test]
    fn test_going_private_outranks_merger() {
        assert_eq!(
            classify("Schedule 13E-3 filed in connection with the merger"),
            Category::GoingPrivate13e3
        );
    }

    #[test]
    fn test_tender_offer_outranks_to_be_acquired() {
        assert_eq!(
            classify("Company to be acquired via tender offer"),
            Category::TenderGoingPrivate
        );
    }

    #[test]
    fn test_each_rule_reachable() {
        let cases = [
            ("SC TO-T filed by purchaser", Category::TenderOfferThirdParty),
            ("SC TO-I issuer offer", Category::IssuerTender),
            ("planned go-private deal", Category::TenderGoingPrivate),
            ("completes Carve-Out of unit", Category::SpinOff),
            ("Parent acquires Target", Category::MergerAcquisition),
            ("announces rights offering", Category::RestructuringRecap),
            ("closing of the asset sale", Category::AssetSale),
            ("emerges from Chapter 11", Category::Bankruptcy),
            ("beneficial owner filed a 13D", Category::Activist13d),
            ("board launched a strategic review", Category::StrategicReview),
            ("declares special dividend", Category::SpecialDividend),
            ("new share repurchase program", Category::Buyback),
            ("quarterly earnings release", Category::Other),
        ];

        for (text, expected) in cases {
            assert_eq!(classify(text), expected, "{text}");
        }
    }

    #[test]
    fn test_substring_containment_is_not_whole_word() {
        assert_eq!(classify("premerger notification"), Category::MergerAcquisition);
    }

    #[test]
    fn test_spin_off_outranks_merger() {
        assert_eq!(
            classify("spin-off followed by a merger with SpinCo"),
            Category::SpinOff
        );
    }
}
