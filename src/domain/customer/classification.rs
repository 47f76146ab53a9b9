//! Entity classification Billogram keeps per customer (`company_type`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Legal entity kind of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityClassification {
    #[serde(rename = "individual")]
    Individual,

    #[serde(rename = "business")]
    Business,

    #[serde(rename = "foreign individual")]
    ForeignIndividual,

    #[serde(rename = "foreign business")]
    ForeignBusiness,
}

impl EntityClassification {
    /// Classifies from the two independent facts checkout knows.
    pub fn classify(is_business: bool, is_domestic: bool) -> Self {
        match (is_business, is_domestic) {
            (true, true) => EntityClassification::Business,
            (true, false) => EntityClassification::ForeignBusiness,
            (false, true) => EntityClassification::Individual,
            (false, false) => EntityClassification::ForeignIndividual,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityClassification::Individual => "individual",
            EntityClassification::Business => "business",
            EntityClassification::ForeignIndividual => "foreign individual",
            EntityClassification::ForeignBusiness => "foreign business",
        }
    }
}

impl fmt::Display for EntityClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
