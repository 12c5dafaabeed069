use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownModel;

/// Propagation models offered by the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelId {
    #[serde(rename = "ECC-33")]
    Ecc33,
    #[serde(rename = "SUI")]
    Sui,
    #[serde(rename = "Okumura-Hata")]
    OkumuraHata,
}

impl ModelId {
    pub const ALL: [ModelId; 3] = [ModelId::Ecc33, ModelId::Sui, ModelId::OkumuraHata];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelId::Ecc33 => "ECC-33",
            ModelId::Sui => "SUI",
            ModelId::OkumuraHata => "Okumura-Hata",
        }
    }

    /// Advisory text shown as the dropdown option tooltip.
    pub fn description(self) -> &'static str {
        match self {
            ModelId::Ecc33 => "Best for cellular networks, frequency range 30 MHz - 3 GHz",
            ModelId::Sui => "Optimized for wireless communications, frequency range 1.9 - 11 GHz",
            ModelId::OkumuraHata => {
                "Most widely used, frequency range 150 MHz - 1.5 GHz (extended up to 2 GHz)"
            }
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ModelId::ALL
            .into_iter()
            .find(|model| model.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownModel(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Urban,
    Suburban,
    Rural,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Urban => "Urban",
            Environment::Suburban => "Suburban",
            Environment::Rural => "Rural",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four numeric inputs of the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Frequency,
    Distance,
    TxHeight,
    RxHeight,
}

impl NumericField {
    pub const ALL: [NumericField; 4] = [
        NumericField::Frequency,
        NumericField::Distance,
        NumericField::TxHeight,
        NumericField::RxHeight,
    ];

    /// Form field name on the wire.
    pub fn name(self) -> &'static str {
        match self {
            NumericField::Frequency => "frequency",
            NumericField::Distance => "distance",
            NumericField::TxHeight => "tx_height",
            NumericField::RxHeight => "rx_height",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NumericField::Frequency => "Frequency",
            NumericField::Distance => "Distance",
            NumericField::TxHeight => "TX Height",
            NumericField::RxHeight => "RX Height",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            NumericField::Frequency => "MHz",
            NumericField::Distance => "km",
            NumericField::TxHeight | NumericField::RxHeight => "m",
        }
    }
}

pub const MODEL_FIELD: &str = "model";
pub const ENVIRONMENT_FIELD: &str = "environment";
