use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::{
    controller::{ControllerOptions, DEFAULT_BUSY_LABEL, DEFAULT_IDLE_LABEL},
    error::ConfigError,
    render::ResponseShape,
    transport::FormEncoding,
};

pub const DEFAULT_SETTINGS_FILE: &str = "predictor.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub server_url: String,
    pub predict_path: String,
    pub breakdown_path: String,
    pub simulate_path: String,
    /// Overrides the per-shape default encoding when set.
    pub encoding: Option<FormEncoding>,
    pub press_effect_ms: u64,
    pub idle_label: String,
    pub busy_label: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            predict_path: "/predict".into(),
            breakdown_path: "/predict".into(),
            simulate_path: "/simulate".into(),
            encoding: None,
            press_effect_ms: 150,
            idle_label: DEFAULT_IDLE_LABEL.into(),
            busy_label: DEFAULT_BUSY_LABEL.into(),
        }
    }
}

impl ClientSettings {
    pub fn endpoint(&self, shape: ResponseShape) -> Result<Url, ConfigError> {
        let path = match shape {
            ResponseShape::Scalar => &self.predict_path,
            ResponseShape::ScalarWithBreakdown => &self.breakdown_path,
            ResponseShape::Batch => &self.simulate_path,
        };
        let invalid = |source| ConfigError::InvalidUrl {
            url: format!("{}{path}", self.server_url),
            source,
        };
        Url::parse(self.server_url.trim())
            .and_then(|base| base.join(path))
            .map_err(invalid)
    }

    pub fn encoding_for(&self, shape: ResponseShape) -> FormEncoding {
        self.encoding.unwrap_or_else(|| shape.default_encoding())
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            press_effect: Duration::from_millis(self.press_effect_ms),
            idle_label: self.idle_label.clone(),
            busy_label: self.busy_label.clone(),
            ..ControllerOptions::default()
        }
    }
}

/// Defaults, then the settings file, then environment overrides.
///
/// A missing default file is fine; a missing file that was asked for
/// explicitly is an error.
pub fn load_settings(path: Option<&Path>) -> Result<ClientSettings, ConfigError> {
    let explicit = path.is_some();
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));

    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => parse_settings(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => {
            ClientSettings::default()
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

pub fn parse_settings(raw: &str) -> Result<ClientSettings, toml::de::Error> {
    toml::from_str(raw)
}

pub fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(v) = lookup("PREDICTOR_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("APP__PREDICT_PATH") {
        settings.predict_path = v;
    }
    if let Some(v) = lookup("APP__BREAKDOWN_PATH") {
        settings.breakdown_path = v;
    }
    if let Some(v) = lookup("APP__SIMULATE_PATH") {
        settings.simulate_path = v;
    }

    if let Some(v) = lookup("APP__FORM_ENCODING") {
        settings.encoding = Some(v.parse()?);
    }

    if let Some(v) = lookup("APP__PRESS_EFFECT_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.press_effect_ms = parsed;
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
