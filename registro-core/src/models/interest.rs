use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Ambito di interesse (interestedDomain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterestedDomain {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Artificial Intelligence")]
    ArtificialIntelligence,
    #[serde(rename = "Cloud Computing")]
    CloudComputing,
    #[serde(rename = "Cybersecurity")]
    Cybersecurity,
}

impl InterestedDomain {
    pub const ALL: [InterestedDomain; 6] = [
        InterestedDomain::WebDevelopment,
        InterestedDomain::MobileDevelopment,
        InterestedDomain::DataScience,
        InterestedDomain::ArtificialIntelligence,
        InterestedDomain::CloudComputing,
        InterestedDomain::Cybersecurity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InterestedDomain::WebDevelopment => "Web Development",
            InterestedDomain::MobileDevelopment => "Mobile Development",
            InterestedDomain::DataScience => "Data Science",
            InterestedDomain::ArtificialIntelligence => "Artificial Intelligence",
            InterestedDomain::CloudComputing => "Cloud Computing",
            InterestedDomain::Cybersecurity => "Cybersecurity",
        }
    }
}

impl FromStr for InterestedDomain {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterestedDomain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for InterestedDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
