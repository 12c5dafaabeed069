//! Form values, submit events and the named view elements the controller drives.

use shared::domain::{ModelId, NumericField, ENVIRONMENT_FIELD, MODEL_FIELD};

/// Live values of the prediction form, mutated on every input event.
///
/// Numeric fields hold the raw input text; an empty string means no value was
/// supplied and is left for the service to reject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    frequency: String,
    distance: String,
    tx_height: String,
    rx_height: String,
    environment: String,
}

impl FormState {
    pub fn value(&self, field: NumericField) -> &str {
        match field {
            NumericField::Frequency => &self.frequency,
            NumericField::Distance => &self.distance,
            NumericField::TxHeight => &self.tx_height,
            NumericField::RxHeight => &self.rx_height,
        }
    }

    pub fn set_value(&mut self, field: NumericField, value: impl Into<String>) {
        let slot = match field {
            NumericField::Frequency => &mut self.frequency,
            NumericField::Distance => &mut self.distance,
            NumericField::TxHeight => &mut self.tx_height,
            NumericField::RxHeight => &mut self.rx_height,
        };
        *slot = value.into();
    }

    pub fn set_environment(&mut self, environment: impl Into<String>) {
        self.environment = environment.into();
    }

    pub fn snapshot(&self, model: Option<ModelId>) -> FormSnapshot {
        FormSnapshot {
            frequency: self.frequency.clone(),
            distance: self.distance.clone(),
            tx_height: self.tx_height.clone(),
            rx_height: self.rx_height.clone(),
            model,
            environment: self.environment.clone(),
        }
    }
}

/// Immutable copy of the form taken when a submission starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub frequency: String,
    pub distance: String,
    pub tx_height: String,
    pub rx_height: String,
    pub model: Option<ModelId>,
    pub environment: String,
}

impl FormSnapshot {
    /// Field name/value pairs in page order, as sent on the wire.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (NumericField::Frequency.name(), self.frequency.clone()),
            (NumericField::Distance.name(), self.distance.clone()),
            (NumericField::TxHeight.name(), self.tx_height.clone()),
            (NumericField::RxHeight.name(), self.rx_height.clone()),
            (
                MODEL_FIELD,
                self.model.map(|model| model.as_str().to_string()).unwrap_or_default(),
            ),
            (ENVIRONMENT_FIELD, self.environment.clone()),
        ]
    }
}

/// The form's submit event. Its default action (a full page reload) must be
/// suppressed by whoever handles it.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Elements whose content the renderer and presenter populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    PathlossValue,
    UsedModel,
    UsedEnvironment,
    FsplValue,
    AdditionalLossValue,
    ParametersList,
    TotalCalculations,
    MinPathloss,
    MaxPathloss,
    AvgPathloss,
    PathlossRange,
    ErrorMessage,
}

impl ElementId {
    /// Element id in the page markup.
    pub fn dom_id(self) -> &'static str {
        match self {
            ElementId::PathlossValue => "pathlossValue",
            ElementId::UsedModel => "usedModel",
            ElementId::UsedEnvironment => "usedEnvironment",
            ElementId::FsplValue => "fsplValue",
            ElementId::AdditionalLossValue => "additionalLossValue",
            ElementId::ParametersList => "parametersList",
            ElementId::TotalCalculations => "totalCalculations",
            ElementId::MinPathloss => "minPathloss",
            ElementId::MaxPathloss => "maxPathloss",
            ElementId::AvgPathloss => "avgPathloss",
            ElementId::PathlossRange => "pathlossRange",
            ElementId::ErrorMessage => "error",
        }
    }
}

/// The two mutually exclusive display regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Results,
    Error,
}
