//! The fixed set of city districts
//!
//! Income rows carry district labels like `4109102 Sevilla distrito 02`,
//! while the boundary file names districts (`Macarena`). Both resolve to a
//! `District`; anything outside the eleven districts is an error.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{IrsError, Result};

static DISTRICT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)distrito\s+(\d+)").expect("district number pattern is valid")
});

/// One of the eleven administrative districts of Seville
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum District {
    CascoAntiguo,
    Macarena,
    Nervion,
    CerroAmate,
    Sur,
    Triana,
    EsteAlcosaTorreblanca,
    SanPabloSantaJusta,
    LosRemedios,
    BellavistaLaPalmera,
    Norte,
}

impl District {
    /// All districts in numeric order
    pub const ALL: [Self; 11] = [
        Self::CascoAntiguo,
        Self::Macarena,
        Self::Nervion,
        Self::CerroAmate,
        Self::Sur,
        Self::Triana,
        Self::EsteAlcosaTorreblanca,
        Self::SanPabloSantaJusta,
        Self::LosRemedios,
        Self::BellavistaLaPalmera,
        Self::Norte,
    ];

    /// Official district number (1-11)
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::CascoAntiguo => 1,
            Self::Macarena => 2,
            Self::Nervion => 3,
            Self::CerroAmate => 4,
            Self::Sur => 5,
            Self::Triana => 6,
            Self::EsteAlcosaTorreblanca => 7,
            Self::SanPabloSantaJusta => 8,
            Self::LosRemedios => 9,
            Self::BellavistaLaPalmera => 10,
            Self::Norte => 11,
        }
    }

    /// Display name, as used by the boundary file
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CascoAntiguo => "Casco Antiguo",
            Self::Macarena => "Macarena",
            Self::Nervion => "Nervión",
            Self::CerroAmate => "Cerro - Amate",
            Self::Sur => "Sur",
            Self::Triana => "Triana",
            Self::EsteAlcosaTorreblanca => "Este - Alcosa - Torreblanca",
            Self::SanPabloSantaJusta => "San Pablo - Santa Justa",
            Self::LosRemedios => "Los Remedios",
            Self::BellavistaLaPalmera => "Bellavista - La Palmera",
            Self::Norte => "Norte",
        }
    }

    /// Look up a district by number
    ///
    /// # Errors
    /// `UnknownDistrict` for numbers outside 1-11.
    pub fn from_number(number: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|d| u32::from(d.number()) == number)
            .ok_or_else(|| IrsError::UnknownDistrict {
                code: number.to_string(),
            })
    }

    /// Resolve an income source label such as `4109102 Sevilla distrito 02`
    ///
    /// # Errors
    /// `UnknownDistrict` when the label has no district number or the
    /// number is out of range.
    pub fn from_label(label: &str) -> Result<Self> {
        DISTRICT_NUMBER
            .captures(label)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .and_then(|number| Self::from_number(number).ok())
            .ok_or_else(|| IrsError::UnknownDistrict {
                code: label.to_string(),
            })
    }

    /// Resolve a display name as found in the boundary file
    ///
    /// # Errors
    /// `UnknownDistrict` when no district carries that name.
    pub fn from_name(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name() == trimmed)
            .ok_or_else(|| IrsError::UnknownDistrict {
                code: name.to_string(),
            })
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} {}", self.number(), self.name())
    }
}
