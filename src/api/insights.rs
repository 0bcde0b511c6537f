// SPDX-License-Identifier: MPL-2.0
//! Historical analytics served by `GET /api/predictor/insights/`.
//!
//! The backend precomputes these from its training data; the client only
//! renders them (metric cards and trend charts on the dashboard).

use super::{ApiResult, Client};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Averages {
    pub avg_daily: f64,
    pub avg_hourly: f64,
    pub avg_weekly: f64,
    pub avg_monthly: f64,
    pub avg_yearly: f64,
}

/// Peak usage indices. `peak_day_of_week` is 0-based from Sunday,
/// `peak_month_of_year` is 1-based, matching the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Peaks {
    pub peak_hour: u8,
    pub peak_day_of_week: u8,
    pub peak_day_of_month: u8,
    pub peak_month_of_year: u8,
}

/// One sample of the hourly demand profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyPoint {
    pub hr: u8,
    pub cnt: f64,
}

/// One sample of the day-of-week demand profile (0 = Sunday).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DayOfWeekPoint {
    pub day: u8,
    pub cnt: f64,
}

/// One sample of the monthly demand profile (1 = January).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyPoint {
    pub month: u8,
    pub cnt: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Trends {
    #[serde(default)]
    pub hourly: Vec<HourlyPoint>,
    #[serde(default)]
    pub day_of_week: Vec<DayOfWeekPoint>,
    #[serde(default)]
    pub monthly: Vec<MonthlyPoint>,
}

/// Full insights document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Insights {
    pub averages: Averages,
    pub peaks: Peaks,
    #[serde(default)]
    pub trends: Trends,
}

impl Insights {
    pub const DAY_NAMES: [&'static str; 7] =
        ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    pub const MONTH_NAMES: [&'static str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    /// Human label for the peak weekday, or `None` when out of range.
    pub fn peak_day_label(&self) -> Option<&'static str> {
        Self::DAY_NAMES.get(self.peaks.peak_day_of_week as usize).copied()
    }

    /// Human label for the peak month, or `None` when out of range.
    pub fn peak_month_label(&self) -> Option<&'static str> {
        let index = (self.peaks.peak_month_of_year as usize).checked_sub(1)?;
        Self::MONTH_NAMES.get(index).copied()
    }
}

impl Client {
    pub async fn insights(&self) -> ApiResult<Insights> {
        self.get_json("/api/predictor/insights/", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Insights {
        serde_json::from_str(
            r#"{
                "averages": {
                    "avg_daily": 4504.3, "avg_hourly": 189.5, "avg_weekly": 31530.0,
                    "avg_monthly": 135129.0, "avg_yearly": 1621550.0
                },
                "peaks": {
                    "peak_hour": 17, "peak_day_of_week": 5,
                    "peak_day_of_month": 15, "peak_month_of_year": 9
                },
                "trends": {
                    "hourly": [{"hr": 0, "cnt": 55.0}, {"hr": 17, "cnt": 461.0}],
                    "day_of_week": [{"day": 0, "cnt": 4228.0}],
                    "monthly": [{"month": 1, "cnt": 2176.0}]
                }
            }"#,
        )
        .expect("insights sample")
    }

    #[test]
    fn peak_labels_resolve() {
        let insights = sample();
        assert_eq!(insights.peak_day_label(), Some("Fri"));
        assert_eq!(insights.peak_month_label(), Some("Sep"));
    }

    #[test]
    fn out_of_range_peaks_yield_none() {
        let mut insights = sample();
        insights.peaks.peak_day_of_week = 9;
        insights.peaks.peak_month_of_year = 0;
        assert_eq!(insights.peak_day_label(), None);
        assert_eq!(insights.peak_month_label(), None);
    }

    #[test]
    fn missing_trends_default_to_empty() {
        let insights: Insights = serde_json::from_str(
            r#"{
                "averages": {
                    "avg_daily": 1.0, "avg_hourly": 1.0, "avg_weekly": 1.0,
                    "avg_monthly": 1.0, "avg_yearly": 1.0
                },
                "peaks": {
                    "peak_hour": 0, "peak_day_of_week": 0,
                    "peak_day_of_month": 1, "peak_month_of_year": 1
                }
            }"#,
        )
        .expect("insights without trends");
        assert!(insights.trends.hourly.is_empty());
    }
}
