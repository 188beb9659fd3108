use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Corso di laurea (branchName). Il nome sul wire è quello mostrato nel form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "Computer Science")]
    ComputerScience,
    #[serde(rename = "Electrical Engineering")]
    ElectricalEngineering,
    #[serde(rename = "Mechanical Engineering")]
    MechanicalEngineering,
    #[serde(rename = "Civil Engineering")]
    CivilEngineering,
    #[serde(rename = "Business Administration")]
    BusinessAdministration,
}

impl Branch {
    pub const ALL: [Branch; 5] = [
        Branch::ComputerScience,
        Branch::ElectricalEngineering,
        Branch::MechanicalEngineering,
        Branch::CivilEngineering,
        Branch::BusinessAdministration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Branch::ComputerScience => "Computer Science",
            Branch::ElectricalEngineering => "Electrical Engineering",
            Branch::MechanicalEngineering => "Mechanical Engineering",
            Branch::CivilEngineering => "Civil Engineering",
            Branch::BusinessAdministration => "Business Administration",
        }
    }
}

// Confronto esatto: niente trim, niente case folding.
impl FromStr for Branch {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Branch::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
