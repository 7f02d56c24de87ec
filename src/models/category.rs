// file: src/models/category.rs
// description: special-situation taxonomy labels
// reference: corporate-action categories reported in the special situations table

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Going-Private (13E-3)")]
    GoingPrivate13e3,
    #[serde(rename = "Tender Offer (TO-T)")]
    TenderOfferThirdParty,
    #[serde(rename = "Issuer Tender (TO-I)")]
    IssuerTender,
    #[serde(rename = "Tender/Going-Private")]
    TenderGoingPrivate,
    #[serde(rename = "Spin-off")]
    SpinOff,
    #[serde(rename = "M&A")]
    MergerAcquisition,
    #[serde(rename = "Restructuring/Recap")]
    RestructuringRecap,
    #[serde(rename = "Asset Sale")]
    AssetSale,
    Bankruptcy,
    #[serde(rename = "Activist/13D")]
    Activist13d,
    #[serde(rename = "Strategic Review")]
    StrategicReview,
    #[serde(rename = "Special Dividend")]
    SpecialDividend,
    Buyback,
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::GoingPrivate13e3 => "Going-Private (13E-3)",
            Category::TenderOfferThirdParty => "Tender Offer (TO-T)",
            Category::IssuerTender => "Issuer Tender (TO-I)",
            Category::TenderGoingPrivate => "Tender/Going-Private",
            Category::SpinOff => "Spin-off",
            Category::MergerAcquisition => "M&A",
            Category::RestructuringRecap => "Restructuring/Recap",
            Category::AssetSale => "Asset Sale",
            Category::Bankruptcy => "Bankruptcy",
            Category::Activist13d => "Activist/13D",
            Category::StrategicReview => "Strategic Review",
            Category::SpecialDividend => "Special Dividend",
            Category::Buyback => "Buyback",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
