// SPDX-License-Identifier: MPL-2.0
//! Prediction endpoints: on-demand forecasts and the dashboard overview.

use super::{ApiResult, Client};
use serde::{Deserialize, Serialize};

/// Which model the backend should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// Daily totals, predicted for the whole week around the chosen date.
    #[default]
    Day,
    /// Hourly counts, predicted for all 24 hours of the chosen date.
    Hour,
}

/// Payload for `POST /predict`. Numeric encodings (season 1-4, weathersit
/// 1-4, holiday/workingday 0 or 1) follow the backend's feature scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    /// Date in `YYYY-MM-DD` form.
    pub date: String,
    pub temp: f64,
    pub atemp: f64,
    pub hum: f64,
    pub windspeed: f64,
    pub holiday: u8,
    pub workingday: u8,
    pub season: u8,
    pub weathersit: u8,
    pub hour: u8,
    pub model_type: ModelType,
}

/// Forecast series returned by `POST /predict`, tagged by model type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PredictionResponse {
    Day {
        current_prediction: f64,
        week_labels: Vec<String>,
        week_predictions: Vec<f64>,
    },
    Hour {
        current_prediction: f64,
        hour_labels: Vec<String>,
        hour_predictions: Vec<f64>,
    },
}

impl PredictionResponse {
    /// The headline number for the selected date/hour.
    pub fn current(&self) -> f64 {
        match self {
            PredictionResponse::Day {
                current_prediction, ..
            }
            | PredictionResponse::Hour {
                current_prediction, ..
            } => *current_prediction,
        }
    }

    /// Label/value pairs for chart rendering, regardless of model type.
    pub fn series(&self) -> (&[String], &[f64]) {
        match self {
            PredictionResponse::Day {
                week_labels,
                week_predictions,
                ..
            } => (week_labels, week_predictions),
            PredictionResponse::Hour {
                hour_labels,
                hour_predictions,
                ..
            } => (hour_labels, hour_predictions),
        }
    }
}

/// Current weather snapshot nested in the overview response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherSnapshot {
    pub temp: f64,
    pub atemp: f64,
    pub humidity: f64,
    pub windspeed: f64,
    pub weathersit: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OverviewPredictions {
    pub total_rentals_today: f64,
    pub current_hour_rentals: f64,
}

/// Response of `GET /api/predictor/overview`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Overview {
    pub city: String,
    pub date: String,
    pub hour: u8,
    pub weather: WeatherSnapshot,
    pub predictions: OverviewPredictions,
}

impl Client {
    /// Requests a forecast for the given conditions.
    pub async fn predict(&self, request: &PredictionRequest) -> ApiResult<PredictionResponse> {
        self.post_json("/predict", request).await
    }

    /// Fetches the live overview for a city at a given date and hour.
    pub async fn overview(&self, city: &str, date: &str, hour: u8) -> ApiResult<Overview> {
        self.get_json(
            "/api/predictor/overview",
            &[
                ("city", city.to_string()),
                ("date", date.to_string()),
                ("hour", hour.to_string()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_model_type_lowercase() {
        let request = PredictionRequest {
            date: "2025-06-01".to_string(),
            temp: 25.0,
            atemp: 27.0,
            hum: 60.0,
            windspeed: 10.0,
            holiday: 0,
            workingday: 1,
            season: 2,
            weathersit: 1,
            hour: 8,
            model_type: ModelType::Hour,
        };
        let json = serde_json::to_value(&request).expect("serialize request");
        assert_eq!(json["model_type"], "hour");
        assert_eq!(json["season"], 2);
    }

    #[test]
    fn day_response_deserializes_from_tagged_body() {
        let body = r#"{
            "type": "day",
            "current_prediction": 4521.0,
            "week_labels": ["Sun","Mon","Tue","Wed","Thu","Fri","Sat"],
            "week_predictions": [4100.0,4300.0,4521.0,4600.0,4700.0,4900.0,4400.0]
        }"#;
        let response: PredictionResponse = serde_json::from_str(body).expect("day response");
        assert_eq!(response.current(), 4521.0);
        let (labels, values) = response.series();
        assert_eq!(labels.len(), 7);
        assert_eq!(values.len(), 7);
    }

    #[test]
    fn hour_response_exposes_24_point_series() {
        let labels: Vec<String> = (0..24).map(|h| format!("{h:02}")).collect();
        let values: Vec<f64> = (0..24).map(f64::from).collect();
        let response = PredictionResponse::Hour {
            current_prediction: 12.0,
            hour_labels: labels,
            hour_predictions: values,
        };
        let (labels, values) = response.series();
        assert_eq!(labels.len(), 24);
        assert_eq!(values[23], 23.0);
    }

    #[test]
    fn overview_deserializes_nested_weather() {
        let body = r#"{
            "city": "Hyderabad",
            "date": "2025-06-01",
            "hour": 14,
            "weather": {
                "temp": 31.5, "atemp": 34.0, "humidity": 48.0,
                "windspeed": 12.2, "weathersit": 1, "description": "clear"
            },
            "predictions": { "total_rentals_today": 5230.0, "current_hour_rentals": 412.0 }
        }"#;
        let overview: Overview = serde_json::from_str(body).expect("overview");
        assert_eq!(overview.weather.weathersit, 1);
        assert_eq!(overview.predictions.current_hour_rentals, 412.0);
    }
}
