use std::fmt;

use serde::{Deserialize, Serialize};

/// A figure as the service delivered it. Integers print as sent, floats print
/// in their shortest form (`900.0` shows as `900`), strings verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Figure {
    Number(serde_json::Number),
    Text(String),
}

impl Figure {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Figure::Number(number) => number.as_f64(),
            Figure::Text(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Figure::Number(_))
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Figure::Number(number) if number.is_i64() || number.is_u64() => {
                write!(f, "{number}")
            }
            Figure::Number(number) => match number.as_f64() {
                Some(value) => write!(f, "{value}"),
                None => write!(f, "{number}"),
            },
            Figure::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for Figure {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Figure::Number)
            .unwrap_or_else(|| Figure::Text(value.to_string()))
    }
}

/// Input parameters echoed back by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoedParameters {
    pub environment: String,
    pub frequency: Figure,
    pub distance: Figure,
    pub tx_height: Figure,
    pub rx_height: Figure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarPrediction {
    pub pathloss: Figure,
    pub model: String,
    pub parameters: EchoedParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownPrediction {
    pub pathloss: Figure,
    pub fspl: Figure,
    pub additional_loss: Figure,
    pub model: String,
    pub parameters: EchoedParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_calculations: Figure,
    pub min_pathloss: Figure,
    pub max_pathloss: Figure,
    pub avg_pathloss: Figure,
    pub pathloss_range: Figure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    pub frequency: Figure,
    pub distance: Figure,
    pub tx_height: Figure,
    pub rx_height: Figure,
    pub pathloss: Figure,
    pub fspl: Figure,
    pub additional_loss: Figure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPrediction {
    pub model: String,
    pub environment: String,
    pub summary: BatchSummary,
    pub results: Vec<BatchRow>,
}

/// A successful prediction, one variant per response shape.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResult {
    Scalar(ScalarPrediction),
    Breakdown(BreakdownPrediction),
    Batch(BatchPrediction),
}

impl PredictionResult {
    pub fn model(&self) -> &str {
        match self {
            PredictionResult::Scalar(result) => &result.model,
            PredictionResult::Breakdown(result) => &result.model,
            PredictionResult::Batch(result) => &result.model,
        }
    }
}
