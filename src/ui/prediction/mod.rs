// SPDX-License-Identifier: MPL-2.0
//! Prediction form and result pane.
//!
//! The form collects the weather and calendar features the backend's models
//! expect, parses them locally (inputs are free text, validated on submit
//! rather than on every keystroke), and hands a complete
//! [`PredictionRequest`] to the parent. The returned series is drawn as a
//! bar chart next to the headline figure.

use crate::api::prediction::ModelType;
use crate::api::{ApiError, PredictionRequest, PredictionResponse};
use crate::app::config::{MAX_HOUR, MAX_SEASON, MAX_WEATHERSIT, MIN_SEASON, MIN_WEATHERSIT};
use crate::i18n::fluent::I18n;
use crate::ui::components::error_display::{ErrorDisplay, ErrorSeverity};
use crate::ui::components::metric_card;
use crate::ui::dashboard::charts::BarChart;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use chrono::{Local, NaiveDate, Timelike};
use iced::widget::{button, canvas, checkbox, text, text_input, Column, Container, Row, Text};
use iced::{alignment, Element, Length, Theme};

/// Messages handled by the prediction screen.
#[derive(Debug, Clone)]
pub enum Message {
    DateChanged(String),
    HourChanged(String),
    TempChanged(String),
    AtempChanged(String),
    HumidityChanged(String),
    WindspeedChanged(String),
    SeasonPicked(u8),
    WeatherSitPicked(u8),
    HolidayToggled(bool),
    WorkingDayToggled(bool),
    ModelPicked(ModelType),
    Submitted,
    Retry,
    Completed(Result<PredictionResponse, ApiError>),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    Predict(PredictionRequest),
}

/// Prediction screen state.
#[derive(Debug)]
pub struct State {
    date_input: String,
    hour_input: String,
    temp_input: String,
    atemp_input: String,
    humidity_input: String,
    windspeed_input: String,
    season: u8,
    weathersit: u8,
    holiday: bool,
    workingday: bool,
    model_type: ModelType,
    in_flight: bool,
    form_error: Option<&'static str>,
    result: Option<PredictionResponse>,
    api_error: Option<ApiError>,
    last_request: Option<PredictionRequest>,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub fn new() -> Self {
        let now = Local::now();
        Self {
            date_input: now.format("%Y-%m-%d").to_string(),
            hour_input: now.hour().to_string(),
            // The backend's own fallback weather figures.
            temp_input: "25.0".to_string(),
            atemp_input: "27.0".to_string(),
            humidity_input: "60.0".to_string(),
            windspeed_input: "10.0".to_string(),
            season: MIN_SEASON,
            weathersit: MIN_WEATHERSIT,
            holiday: false,
            workingday: true,
            model_type: ModelType::Day,
            in_flight: false,
            form_error: None,
            result: None,
            api_error: None,
            last_request: None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn result(&self) -> Option<&PredictionResponse> {
        self.result.as_ref()
    }

    /// Parses the form into a request, reporting the first problem as an
    /// i18n key.
    fn build_request(&self) -> Result<PredictionRequest, &'static str> {
        if NaiveDate::parse_from_str(self.date_input.trim(), "%Y-%m-%d").is_err() {
            return Err("error-form-invalid-date");
        }
        let hour: u8 = self
            .hour_input
            .trim()
            .parse()
            .map_err(|_| "error-form-invalid-number")?;
        if hour > MAX_HOUR {
            return Err("error-form-hour-range");
        }
        let parse_float = |input: &str| -> Result<f64, &'static str> {
            input.trim().parse().map_err(|_| "error-form-invalid-number")
        };

        Ok(PredictionRequest {
            date: self.date_input.trim().to_string(),
            temp: parse_float(&self.temp_input)?,
            atemp: parse_float(&self.atemp_input)?,
            hum: parse_float(&self.humidity_input)?,
            windspeed: parse_float(&self.windspeed_input)?,
            holiday: u8::from(self.holiday),
            workingday: u8::from(self.workingday),
            season: self.season,
            weathersit: self.weathersit,
            hour,
            model_type: self.model_type,
        })
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::DateChanged(value) => self.date_input = value,
            Message::HourChanged(value) => self.hour_input = value,
            Message::TempChanged(value) => self.temp_input = value,
            Message::AtempChanged(value) => self.atemp_input = value,
            Message::HumidityChanged(value) => self.humidity_input = value,
            Message::WindspeedChanged(value) => self.windspeed_input = value,
            Message::SeasonPicked(season) => {
                self.season = season.clamp(MIN_SEASON, MAX_SEASON);
            }
            Message::WeatherSitPicked(weathersit) => {
                self.weathersit = weathersit.clamp(MIN_WEATHERSIT, MAX_WEATHERSIT);
            }
            Message::HolidayToggled(value) => self.holiday = value,
            Message::WorkingDayToggled(value) => self.workingday = value,
            Message::ModelPicked(model_type) => self.model_type = model_type,
            Message::Submitted => {
                if self.in_flight {
                    return Event::None;
                }
                match self.build_request() {
                    Ok(request) => {
                        self.form_error = None;
                        self.api_error = None;
                        self.in_flight = true;
                        self.last_request = Some(request.clone());
                        return Event::Predict(request);
                    }
                    Err(key) => self.form_error = Some(key),
                }
            }
            Message::Retry => {
                if let Some(request) = self.last_request.clone() {
                    if !self.in_flight {
                        self.api_error = None;
                        self.in_flight = true;
                        return Event::Predict(request);
                    }
                }
            }
            Message::Completed(result) => {
                self.in_flight = false;
                match result {
                    Ok(response) => {
                        self.result = Some(response);
                        self.api_error = None;
                    }
                    Err(error) => self.api_error = Some(error),
                }
            }
        }
        Event::None
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let form = Container::new(self.view_form(i18n))
            .width(Length::Fixed(sizing::FORM_WIDTH))
            .padding(spacing::LG)
            .style(styles::container::panel);

        let result = Container::new(self.view_result(i18n))
            .width(Length::Fill)
            .padding(spacing::LG);

        Container::new(
            Row::new()
                .spacing(spacing::LG)
                .push(form)
                .push(result),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::LG)
        .into()
    }

    fn view_form<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let title = Text::new(i18n.tr("prediction-title")).size(typography::TITLE_SM);

        let labeled = |key: &str, input: Element<'a, Message>| -> Element<'a, Message> {
            Column::new()
                .spacing(spacing::XXS)
                .push(Text::new(i18n.tr(key)).size(typography::BODY_SM))
                .push(input)
                .into()
        };

        let date = text_input("2025-06-01", &self.date_input)
            .on_input(Message::DateChanged)
            .padding(spacing::XS);
        let hour = text_input("8", &self.hour_input)
            .on_input(Message::HourChanged)
            .padding(spacing::XS);
        let temp = text_input("25.0", &self.temp_input)
            .on_input(Message::TempChanged)
            .padding(spacing::XS);
        let atemp = text_input("27.0", &self.atemp_input)
            .on_input(Message::AtempChanged)
            .padding(spacing::XS);
        let humidity = text_input("60.0", &self.humidity_input)
            .on_input(Message::HumidityChanged)
            .padding(spacing::XS);
        let windspeed = text_input("10.0", &self.windspeed_input)
            .on_input(Message::WindspeedChanged)
            .padding(spacing::XS);

        let season_row = self.choice_row(
            i18n,
            &[
                (1, "season-spring"),
                (2, "season-summer"),
                (3, "season-fall"),
                (4, "season-winter"),
            ],
            self.season,
            Message::SeasonPicked,
        );
        let weather_row = self.choice_row(
            i18n,
            &[
                (1, "weather-clear"),
                (2, "weather-mist"),
                (3, "weather-light-precip"),
                (4, "weather-heavy-precip"),
            ],
            self.weathersit,
            Message::WeatherSitPicked,
        );

        let holiday = checkbox(self.holiday)
            .label(i18n.tr("prediction-holiday-label"))
            .on_toggle(Message::HolidayToggled);
        let workingday = checkbox(self.workingday)
            .label(i18n.tr("prediction-workingday-label"))
            .on_toggle(Message::WorkingDayToggled);

        let model_row = Row::new()
            .spacing(spacing::XS)
            .push(self.model_button(i18n, ModelType::Day, "prediction-model-day"))
            .push(self.model_button(i18n, ModelType::Hour, "prediction-model-hour"));

        let submit = button(
            Text::new(i18n.tr("prediction-submit"))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center),
        )
        .width(Length::Fill)
        .style(styles::button::primary)
        .on_press_maybe((!self.in_flight).then_some(Message::Submitted));

        let mut column = Column::new()
            .spacing(spacing::SM)
            .push(title)
            .push(labeled("prediction-date-label", date.into()))
            .push(labeled("prediction-hour-label", hour.into()))
            .push(labeled("prediction-temp-label", temp.into()))
            .push(labeled("prediction-atemp-label", atemp.into()))
            .push(labeled("prediction-humidity-label", humidity.into()))
            .push(labeled("prediction-windspeed-label", windspeed.into()))
            .push(labeled("prediction-season-label", season_row))
            .push(labeled("prediction-weathersit-label", weather_row))
            .push(holiday)
            .push(workingday)
            .push(model_row)
            .push(submit);

        if let Some(key) = self.form_error {
            column = column.push(
                Text::new(i18n.tr(key))
                    .size(typography::BODY_SM)
                    .style(|_theme: &Theme| text::Style {
                        color: Some(palette::ERROR_500),
                    }),
            );
        }

        column.into()
    }

    fn choice_row<'a>(
        &'a self,
        i18n: &'a I18n,
        choices: &[(u8, &'static str)],
        selected: u8,
        to_message: fn(u8) -> Message,
    ) -> Element<'a, Message> {
        let mut row = Row::new().spacing(spacing::XXS);
        for (value, key) in choices {
            let style: fn(&Theme, button::Status) -> button::Style = if *value == selected {
                styles::button::selected
            } else {
                styles::button::quiet
            };
            row = row.push(
                button(Text::new(i18n.tr(key)).size(typography::BODY_SM))
                    .style(style)
                    .on_press(to_message(*value)),
            );
        }
        row.into()
    }

    fn model_button<'a>(
        &'a self,
        i18n: &'a I18n,
        model_type: ModelType,
        key: &'static str,
    ) -> Element<'a, Message> {
        let style: fn(&Theme, button::Status) -> button::Style = if self.model_type == model_type {
            styles::button::selected
        } else {
            styles::button::quiet
        };
        button(Text::new(i18n.tr(key)).size(typography::BODY_SM))
            .style(style)
            .on_press(Message::ModelPicked(model_type))
            .into()
    }

    fn view_result<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        if self.in_flight {
            return Container::new(Text::new(i18n.tr("prediction-working")))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .padding(spacing::XL)
                .into();
        }

        if let Some(error) = &self.api_error {
            return ErrorDisplay::new(ErrorSeverity::Error)
                .title(i18n.tr("error-api-title"))
                .message(i18n.tr(error.i18n_key()))
                .details(error.detail())
                .action(i18n.tr("action-retry"), Message::Retry)
                .view();
        }

        let Some(result) = &self.result else {
            return Container::new(text("")).into();
        };

        let headline = Text::new(i18n.tr_with_args(
            "prediction-result-headline",
            &[("count", metric_card::format_count(result.current()).as_str())],
        ))
        .size(typography::TITLE_MD);

        let chart_title_key = match result {
            PredictionResponse::Day { .. } => "prediction-chart-week",
            PredictionResponse::Hour { .. } => "prediction-chart-hours",
        };
        let (labels, values) = result.series();

        let chart = canvas(BarChart {
            labels: labels.to_vec(),
            values: values.to_vec(),
            color: palette::ACCENT_500,
        })
        .width(Length::Fill)
        .height(Length::Fixed(sizing::CHART_HEIGHT));

        Column::new()
            .spacing(spacing::MD)
            .push(headline)
            .push(Text::new(i18n.tr(chart_title_key)).size(typography::BODY_SM))
            .push(chart)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_state() -> State {
        let mut state = State::new();
        state.date_input = "2025-06-01".to_string();
        state.hour_input = "8".to_string();
        state
    }

    #[test]
    fn submit_emits_request_with_parsed_fields() {
        let mut state = valid_state();
        state.update(Message::SeasonPicked(2));
        state.update(Message::WeatherSitPicked(1));
        state.update(Message::ModelPicked(ModelType::Hour));

        let event = state.update(Message::Submitted);
        let Event::Predict(request) = event else {
            panic!("expected a predict event");
        };
        assert_eq!(request.date, "2025-06-01");
        assert_eq!(request.hour, 8);
        assert_eq!(request.season, 2);
        assert_eq!(request.model_type, ModelType::Hour);
        assert_eq!(request.workingday, 1);
        assert!(state.is_in_flight());
    }

    #[test]
    fn malformed_date_is_caught_locally() {
        let mut state = valid_state();
        state.update(Message::DateChanged("01/06/2025".to_string()));
        assert_eq!(state.update(Message::Submitted), Event::None);
        assert_eq!(state.form_error, Some("error-form-invalid-date"));
        assert!(!state.is_in_flight());
    }

    #[test]
    fn out_of_range_hour_is_caught_locally() {
        let mut state = valid_state();
        state.update(Message::HourChanged("24".to_string()));
        assert_eq!(state.update(Message::Submitted), Event::None);
        assert_eq!(state.form_error, Some("error-form-hour-range"));
    }

    #[test]
    fn garbage_number_is_caught_locally() {
        let mut state = valid_state();
        state.update(Message::TempChanged("warm".to_string()));
        assert_eq!(state.update(Message::Submitted), Event::None);
        assert_eq!(state.form_error, Some("error-form-invalid-number"));
    }

    #[test]
    fn completion_stores_result_and_unlocks() {
        let mut state = valid_state();
        state.update(Message::Submitted);

        let response = PredictionResponse::Day {
            current_prediction: 4521.0,
            week_labels: vec!["Sun".to_string(); 7],
            week_predictions: vec![4000.0; 7],
        };
        state.update(Message::Completed(Ok(response.clone())));
        assert!(!state.is_in_flight());
        assert_eq!(state.result(), Some(&response));
    }

    #[test]
    fn retry_reissues_the_last_request() {
        let mut state = valid_state();
        state.update(Message::Submitted);
        state.update(Message::Completed(Err(ApiError::Network(
            "refused".to_string(),
        ))));
        assert!(state.api_error.is_some());

        let event = state.update(Message::Retry);
        assert!(matches!(event, Event::Predict(_)));
        assert!(state.is_in_flight());
    }

    #[test]
    fn retry_without_a_prior_request_is_ignored() {
        let mut state = valid_state();
        assert_eq!(state.update(Message::Retry), Event::None);
        assert!(!state.is_in_flight());
    }

    #[test]
    fn season_picks_are_clamped_to_encoding() {
        let mut state = valid_state();
        state.update(Message::SeasonPicked(9));
        assert_eq!(state.season, MAX_SEASON);
    }
}
