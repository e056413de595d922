//! The forecast operation: one compact request kept as a fallback, one
//! structured request rendered into the detailed localized block.

use crate::{
    client::{ReportFormat, WeatherApi},
    config::DEFAULT_CITY,
    model::WeatherReport,
};

/// Returned when even the compact request fails.
pub const FORECAST_UNAVAILABLE: &str = "无法获取该位置的天气预报";

/// Get the current weather for a coordinate pair.
///
/// Out-of-range coordinates are passed through to the endpoint as-is. Every
/// failure path degrades to a simpler text; this never errors.
pub async fn get_forecast(api: &dyn WeatherApi, latitude: f64, longitude: f64) -> String {
    let location = format!("{latitude},{longitude}");

    let Some(summary) = api.fetch(&location, ReportFormat::Compact, true).await else {
        return FORECAST_UNAVAILABLE.to_string();
    };

    let Some(detailed) = api.fetch(&location, ReportFormat::Json, true).await else {
        return summary;
    };

    render_current(&detailed).unwrap_or(summary)
}

/// Render the detailed block, or `None` when the payload is unusable.
fn render_current(body: &str) -> Option<String> {
    let report = WeatherReport::parse(body).ok()?;
    let current = report.current()?;
    let area = report.area_name().unwrap_or(DEFAULT_CITY);

    Some(format!(
        "\n位置：{}\n当前天气：{}\n温度：{}°C\n体感温度：{}°C\n相对湿度：{}%\n气压：{}hPa\n风向：{}\n风速：{}km/h\n能见度：{}km\n降水量：{}mm\n云量：{}%\n",
        area,
        current.description().unwrap_or("未知"),
        or_na(current.temp_c.as_ref()),
        or_na(current.feels_like_c.as_ref()),
        or_na(current.humidity.as_ref()),
        or_na(current.pressure.as_ref()),
        or_na(current.wind_dir.as_ref()),
        or_na(current.wind_speed_kmph.as_ref()),
        or_na(current.visibility.as_ref()),
        or_na(current.precip_mm.as_ref()),
        or_na(current.cloud_cover.as_ref()),
    ))
}

fn or_na(value: Option<&String>) -> &str {
    value.map_or("N/A", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Scripted responses per format; `None` simulates a transport failure.
    #[derive(Debug, Default)]
    struct ScriptedApi {
        compact: Option<&'static str>,
        detailed: Option<&'static str>,
    }

    #[async_trait]
    impl WeatherApi for ScriptedApi {
        async fn fetch(
            &self,
            _location: &str,
            format: ReportFormat,
            metric: bool,
        ) -> Option<String> {
            assert!(metric, "forecast requests must ask for metric units");
            match format {
                ReportFormat::Compact => self.compact.map(str::to_string),
                ReportFormat::Json => self.detailed.map(str::to_string),
            }
        }
    }

    const SUMMARY_LINE: &str = "北京: ☀️ +21°C 40% ↓11km/h 0.0mm";

    const DETAILED_BODY: &str = r#"{
        "current_condition": [{
            "lang_zh": [{"value": "晴"}],
            "temp_C": "21",
            "FeelsLikeC": "20",
            "humidity": "40",
            "pressure": "1016",
            "winddir16Point": "N",
            "windspeedKmph": "11",
            "visibility": "10",
            "precipMM": "0.0",
            "cloudcover": "25"
        }],
        "nearest_area": [{"areaName": [{"value": "Beijing"}]}]
    }"#;

    #[tokio::test]
    async fn both_requests_failing_returns_unavailable() {
        let api = ScriptedApi::default();

        let result = get_forecast(&api, 39.9042, 116.4074).await;

        assert_eq!(result, FORECAST_UNAVAILABLE);
    }

    #[tokio::test]
    async fn summary_failure_returns_unavailable_even_if_detail_works() {
        let api = ScriptedApi { compact: None, detailed: Some(DETAILED_BODY) };

        let result = get_forecast(&api, 39.9042, 116.4074).await;

        assert_eq!(result, FORECAST_UNAVAILABLE);
    }

    #[tokio::test]
    async fn detailed_failure_falls_back_to_summary() {
        let api = ScriptedApi { compact: Some(SUMMARY_LINE), detailed: None };

        let result = get_forecast(&api, 39.9042, 116.4074).await;

        assert_eq!(result, SUMMARY_LINE);
    }

    #[tokio::test]
    async fn malformed_detail_falls_back_to_summary() {
        let api = ScriptedApi { compact: Some(SUMMARY_LINE), detailed: Some("<html>busy</html>") };

        let result = get_forecast(&api, 39.9042, 116.4074).await;

        assert_eq!(result, SUMMARY_LINE);
    }

    #[tokio::test]
    async fn empty_conditions_fall_back_to_summary() {
        let api = ScriptedApi {
            compact: Some(SUMMARY_LINE),
            detailed: Some(r#"{"current_condition": []}"#),
        };

        let result = get_forecast(&api, 39.9042, 116.4074).await;

        assert_eq!(result, SUMMARY_LINE);
    }

    #[tokio::test]
    async fn renders_all_fields_in_order() {
        let api = ScriptedApi { compact: Some(SUMMARY_LINE), detailed: Some(DETAILED_BODY) };

        let result = get_forecast(&api, 39.9042, 116.4074).await;

        assert_eq!(
            result,
            "\n位置：Beijing\n当前天气：晴\n温度：21°C\n体感温度：20°C\n相对湿度：40%\n气压：1016hPa\n风向：N\n风速：11km/h\n能见度：10km\n降水量：0.0mm\n云量：25%\n"
        );
    }

    #[tokio::test]
    async fn missing_humidity_renders_na() {
        let api = ScriptedApi {
            compact: Some(SUMMARY_LINE),
            detailed: Some(
                r#"{
                    "current_condition": [{
                        "lang_zh": [{"value": "多云"}],
                        "temp_C": "18"
                    }],
                    "nearest_area": [{"areaName": [{"value": "上海"}]}]
                }"#,
            ),
        };

        let result = get_forecast(&api, 31.2304, 121.4737).await;

        assert!(result.contains("相对湿度：N/A%"));
        assert!(result.contains("温度：18°C"));
        assert!(result.contains("位置：上海"));
    }

    #[tokio::test]
    async fn missing_area_falls_back_to_default_city() {
        let api = ScriptedApi {
            compact: Some(SUMMARY_LINE),
            detailed: Some(r#"{"current_condition": [{"temp_C": "3"}]}"#),
        };

        let result = get_forecast(&api, 39.9042, 116.4074).await;

        assert!(result.contains("位置：Beijing"));
        assert!(result.contains("当前天气：未知"));
    }
}
