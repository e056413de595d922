//! Serde model of the wttr.in `j1` payload, restricted to the consumed
//! subset. The endpoint reports every value as a string and omits fields
//! freely, so everything here is optional.

use anyhow::{Context, Result};
use serde::Deserialize;

/// A `{"value": ...}` wrapper, used by wttr.in for localized strings and
/// area names.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentCondition {
    /// Localized description, present when `lang=zh` is requested.
    #[serde(default)]
    pub lang_zh: Vec<TextValue>,

    #[serde(rename = "temp_C")]
    pub temp_c: Option<String>,

    #[serde(rename = "FeelsLikeC")]
    pub feels_like_c: Option<String>,

    pub humidity: Option<String>,

    pub pressure: Option<String>,

    #[serde(rename = "winddir16Point")]
    pub wind_dir: Option<String>,

    #[serde(rename = "windspeedKmph")]
    pub wind_speed_kmph: Option<String>,

    pub visibility: Option<String>,

    #[serde(rename = "precipMM")]
    pub precip_mm: Option<String>,

    #[serde(rename = "cloudcover")]
    pub cloud_cover: Option<String>,
}

impl CurrentCondition {
    /// Localized weather description, if the payload carries one.
    pub fn description(&self) -> Option<&str> {
        self.lang_zh.first().map(|v| v.value.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearestArea {
    #[serde(rename = "areaName", default)]
    pub area_name: Vec<TextValue>,
}

/// Top-level `j1` report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub current_condition: Vec<CurrentCondition>,

    #[serde(default)]
    pub nearest_area: Vec<NearestArea>,
}

impl WeatherReport {
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).context("Failed to parse wttr.in JSON")
    }

    /// The first current-conditions snapshot, if any.
    pub fn current(&self) -> Option<&CurrentCondition> {
        self.current_condition.first()
    }

    /// Name of the nearest area, if the payload carries one.
    pub fn area_name(&self) -> Option<&str> {
        self.nearest_area.first().and_then(|area| area.area_name.first()).map(|v| v.value.as_str())
    }
}
