//! The alerts operation: resolve a region code, fetch current conditions,
//! and evaluate the threshold rules.

use anyhow::{Context, Result, anyhow};

use crate::{
    client::{ReportFormat, WeatherApi},
    model::{CurrentCondition, WeatherReport},
    region::Region,
};

pub const HEAT_THRESHOLD_C: f64 = 35.0;
pub const COLD_THRESHOLD_C: f64 = 0.0;
pub const HUMIDITY_THRESHOLD_PCT: f64 = 85.0;
pub const WIND_THRESHOLD_KMPH: f64 = 39.0;
pub const PRECIP_THRESHOLD_MM: f64 = 50.0;

/// One triggered warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Heat,
    Cold,
    HighHumidity,
    HighWind,
    HeavyRain,
}

impl AlertKind {
    pub const fn message(&self) -> &'static str {
        match self {
            AlertKind::Heat => "高温预警：当前温度超过35°C，请注意防暑降温",
            AlertKind::Cold => "低温预警：当前温度低于0°C，请注意防寒保暖",
            AlertKind::HighHumidity => "湿度预警：当前湿度较高，请注意防潮",
            AlertKind::HighWind => "大风预警：当前风速较大，请注意防风",
            AlertKind::HeavyRain => "暴雨预警：当前降水量较大，请注意防涝",
        }
    }
}

/// The four numeric values the threshold rules operate on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readings {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmph: f64,
    pub precip_mm: f64,
}

/// Evaluate the threshold rules in fixed order. The heat/cold pair is
/// mutually exclusive; the rest are independent.
pub fn evaluate(readings: &Readings) -> Vec<AlertKind> {
    let mut alerts = Vec::new();

    if readings.temperature_c >= HEAT_THRESHOLD_C {
        alerts.push(AlertKind::Heat);
    } else if readings.temperature_c <= COLD_THRESHOLD_C {
        alerts.push(AlertKind::Cold);
    }

    if readings.humidity_pct >= HUMIDITY_THRESHOLD_PCT {
        alerts.push(AlertKind::HighHumidity);
    }

    if readings.wind_speed_kmph >= WIND_THRESHOLD_KMPH {
        alerts.push(AlertKind::HighWind);
    }

    if readings.precip_mm >= PRECIP_THRESHOLD_MM {
        alerts.push(AlertKind::HeavyRain);
    }

    alerts
}

/// Get threshold-based alerts for a registered region code.
///
/// Every failure path terminates in a returned message; this never errors.
pub async fn get_alerts(api: &dyn WeatherApi, state: &str) -> String {
    let region = match Region::try_from(state) {
        Ok(region) => region,
        Err(err) => return err.to_string(),
    };

    let (latitude, longitude) = region.coordinates();
    let location = format!("{latitude},{longitude}");

    let Some(body) = api.fetch(&location, ReportFormat::Json, false).await else {
        return format!("无法获取 {} 的天气预警信息", region.name());
    };

    match build_report(region, &body) {
        Ok(text) => text,
        Err(err) => format!("解析 {} 的天气预警信息时出错：{err}", region.name()),
    }
}

fn build_report(region: Region, body: &str) -> Result<String> {
    let report = WeatherReport::parse(body)?;
    let current =
        report.current().ok_or_else(|| anyhow!("response contained no current_condition"))?;
    let description =
        current.description().ok_or_else(|| anyhow!("response contained no description"))?;

    let readings = extract_readings(current)?;
    let alerts = evaluate(&readings);

    let mut text = format!(
        "\n{}天气预警信息：\n当前天气：{}\n温度：{}°C\n相对湿度：{}%\n风速：{}km/h\n降水量：{}mm\n\n预警信息：",
        region.name(),
        description,
        readings.temperature_c,
        readings.humidity_pct,
        readings.wind_speed_kmph,
        readings.precip_mm,
    );

    if alerts.is_empty() {
        text.push_str("\n当前无特别预警信息");
    } else {
        for alert in &alerts {
            text.push_str("\n- ");
            text.push_str(alert.message());
        }
    }

    Ok(text)
}

fn extract_readings(current: &CurrentCondition) -> Result<Readings> {
    Ok(Readings {
        temperature_c: numeric(current.temp_c.as_deref(), "temp_C")?,
        humidity_pct: numeric(current.humidity.as_deref(), "humidity")?,
        wind_speed_kmph: numeric(current.wind_speed_kmph.as_deref(), "windspeedKmph")?,
        precip_mm: numeric(current.precip_mm.as_deref(), "precipMM")?,
    })
}

fn numeric(value: Option<&str>, field: &str) -> Result<f64> {
    let raw = value.ok_or_else(|| anyhow!("missing field {field}"))?;
    raw.parse::<f64>().with_context(|| format!("invalid number in {field}: {raw}"))
}
