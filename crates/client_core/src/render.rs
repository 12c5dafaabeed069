//! Maps a successful prediction onto the result region.

use std::{fmt, str::FromStr};

use shared::{
    domain::NumericField,
    protocol::{
        BatchPrediction, BatchRow, BreakdownPrediction, EchoedParameters, Figure,
        PredictionResult, ScalarPrediction,
    },
};

use crate::{
    error::RenderError,
    transport::FormEncoding,
    types::{ElementId, Region},
    view::ViewSink,
};

const LOSS_UNIT: &str = "dB";

/// Which response the page expects, fixed per page at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Scalar,
    ScalarWithBreakdown,
    Batch,
}

impl ResponseShape {
    pub fn name(self) -> &'static str {
        match self {
            ResponseShape::Scalar => "scalar",
            ResponseShape::ScalarWithBreakdown => "scalar_with_breakdown",
            ResponseShape::Batch => "batch",
        }
    }

    pub fn decode(self, body: serde_json::Value) -> serde_json::Result<PredictionResult> {
        Ok(match self {
            ResponseShape::Scalar => {
                PredictionResult::Scalar(serde_json::from_value::<ScalarPrediction>(body)?)
            }
            ResponseShape::ScalarWithBreakdown => PredictionResult::Breakdown(
                serde_json::from_value::<BreakdownPrediction>(body)?,
            ),
            ResponseShape::Batch => {
                PredictionResult::Batch(serde_json::from_value::<BatchPrediction>(body)?)
            }
        })
    }

    /// The single-value page posts `FormData`; the other two post URL-encoded
    /// bodies.
    pub fn default_encoding(self) -> FormEncoding {
        match self {
            ResponseShape::Scalar => FormEncoding::Multipart,
            ResponseShape::ScalarWithBreakdown | ResponseShape::Batch => FormEncoding::UrlEncoded,
        }
    }

    fn of(result: &PredictionResult) -> Self {
        match result {
            PredictionResult::Scalar(_) => ResponseShape::Scalar,
            PredictionResult::Breakdown(_) => ResponseShape::ScalarWithBreakdown,
            PredictionResult::Batch(_) => ResponseShape::Batch,
        }
    }
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResponseShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(ResponseShape::Scalar),
            "scalar_with_breakdown" | "breakdown" => Ok(ResponseShape::ScalarWithBreakdown),
            "batch" | "simulation" => Ok(ResponseShape::Batch),
            other => Err(format!("unknown response shape '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    shape: ResponseShape,
}

impl Renderer {
    pub fn new(shape: ResponseShape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> ResponseShape {
        self.shape
    }

    /// Populates the result region and scrolls it into view. Rendering the
    /// same result twice leaves the page as rendering it once.
    pub fn render<S: ViewSink + ?Sized>(
        &self,
        result: &PredictionResult,
        sink: &mut S,
    ) -> Result<(), RenderError> {
        let actual = ResponseShape::of(result);
        if actual != self.shape {
            return Err(RenderError::ShapeMismatch {
                expected: self.shape.name(),
                actual: actual.name(),
            });
        }

        match result {
            PredictionResult::Scalar(scalar) => render_scalar(scalar, sink),
            PredictionResult::Breakdown(breakdown) => render_breakdown(breakdown, sink),
            PredictionResult::Batch(batch) => render_batch(batch, sink),
        }

        sink.set_region_visible(Region::Results, true);
        sink.scroll_into_view(Region::Results);
        Ok(())
    }

    pub fn hide<S: ViewSink + ?Sized>(&self, sink: &mut S) {
        sink.set_region_visible(Region::Results, false);
    }
}

fn render_scalar<S: ViewSink + ?Sized>(scalar: &ScalarPrediction, sink: &mut S) {
    sink.set_text(ElementId::PathlossValue, &scalar.pathloss.to_string());
    sink.set_text(ElementId::UsedModel, &scalar.model);
    sink.set_text(ElementId::UsedEnvironment, &scalar.parameters.environment);
    sink.set_list(ElementId::ParametersList, &parameter_lines(&scalar.parameters));
}

fn render_breakdown<S: ViewSink + ?Sized>(breakdown: &BreakdownPrediction, sink: &mut S) {
    sink.set_text(ElementId::PathlossValue, &format_loss(&breakdown.pathloss));
    sink.set_text(ElementId::FsplValue, &format_loss(&breakdown.fspl));
    sink.set_text(
        ElementId::AdditionalLossValue,
        &format_loss(&breakdown.additional_loss),
    );
    sink.set_text(ElementId::UsedModel, &breakdown.model);
    sink.set_text(ElementId::UsedEnvironment, &breakdown.parameters.environment);
    sink.set_list(
        ElementId::ParametersList,
        &parameter_lines(&breakdown.parameters),
    );
}

fn render_batch<S: ViewSink + ?Sized>(batch: &BatchPrediction, sink: &mut S) {
    sink.set_text(ElementId::UsedModel, &batch.model);
    sink.set_text(ElementId::UsedEnvironment, &batch.environment);

    let summary = &batch.summary;
    sink.set_text(
        ElementId::TotalCalculations,
        &summary.total_calculations.to_string(),
    );
    sink.set_text(ElementId::MinPathloss, &with_loss_unit(&summary.min_pathloss));
    sink.set_text(ElementId::MaxPathloss, &with_loss_unit(&summary.max_pathloss));
    sink.set_text(ElementId::AvgPathloss, &with_loss_unit(&summary.avg_pathloss));
    sink.set_text(
        ElementId::PathlossRange,
        &with_loss_unit(&summary.pathloss_range),
    );

    sink.clear_table();
    for row in &batch.results {
        sink.append_table_row(&table_cells(row));
    }
}

/// Two fractional digits plus the unit. Text figures keep their wording.
pub fn format_loss(figure: &Figure) -> String {
    match figure.as_f64() {
        Some(value) => format!("{} {LOSS_UNIT}", to_fixed_2(value)),
        None => format!("{figure} {LOSS_UNIT}"),
    }
}

/// Two-decimal rounding with exact ties going away from zero, as a browser's
/// `toFixed(2)` does. `{:.2}` alone rounds `120.125` to `120.12`.
fn to_fixed_2(value: f64) -> String {
    let magnitude = value.abs();
    let cents = magnitude * 100.0;
    // An exact tie is a multiple of 1/8, for which the scaling above is exact.
    if (magnitude * 8.0).fract() == 0.0 && cents.fract() == 0.5 {
        let rounded = (cents.trunc() + 1.0) / 100.0;
        format!("{:.2}", rounded.copysign(value))
    } else {
        format!("{value:.2}")
    }
}

/// Appends the unit only to figures that arrived as numbers.
pub fn with_loss_unit(figure: &Figure) -> String {
    if figure.is_numeric() {
        format!("{figure} {LOSS_UNIT}")
    } else {
        figure.to_string()
    }
}

pub fn parameter_lines(parameters: &EchoedParameters) -> Vec<String> {
    [
        (NumericField::Frequency, &parameters.frequency),
        (NumericField::Distance, &parameters.distance),
        (NumericField::TxHeight, &parameters.tx_height),
        (NumericField::RxHeight, &parameters.rx_height),
    ]
    .into_iter()
    .map(|(field, value)| format!("{}: {value} {}", field.label(), field.unit()))
    .collect()
}

pub fn table_cells(row: &BatchRow) -> Vec<String> {
    [
        &row.frequency,
        &row.distance,
        &row.tx_height,
        &row.rx_height,
        &row.pathloss,
        &row.fspl,
        &row.additional_loss,
    ]
    .into_iter()
    .map(ToString::to_string)
    .collect()
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
