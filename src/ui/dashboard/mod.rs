// SPDX-License-Identifier: MPL-2.0
//! Dashboard: live overview plus historical analytics.
//!
//! Both documents are fetched when the screen is entered (and again on
//! refresh): the overview is live per-city data, the insights are
//! precomputed analytics. Each half fails independently; a failed half
//! renders the shared error display with a retry while the other stays up.

pub mod charts;

use crate::api::insights::Insights;
use crate::api::prediction::Overview;
use crate::api::ApiError;
use crate::i18n::fluent::I18n;
use crate::ui::components::error_display::{ErrorDisplay, ErrorSeverity};
use crate::ui::components::metric_card;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use charts::{BarChart, LineChart};
use iced::widget::{button, canvas, scrollable, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

/// Messages handled by the dashboard.
#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    OverviewLoaded(Result<Overview, ApiError>),
    InsightsLoaded(Result<Insights, ApiError>),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// The parent should fetch overview + insights.
    Refresh,
}

/// One independently-loaded half of the dashboard.
#[derive(Debug)]
enum Load<T> {
    Loading,
    Ready(T),
    Failed(ApiError),
}

// Hand-written so `T` needs no `Default` of its own.
impl<T> Default for Load<T> {
    fn default() -> Self {
        Load::Loading
    }
}

/// Dashboard state.
#[derive(Debug, Default)]
pub struct State {
    overview: Load<Overview>,
    insights: Load<Insights>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks both halves as loading; the parent calls this when it spawns
    /// the fetch tasks (on entry and on refresh).
    pub fn begin_loading(&mut self) {
        self.overview = Load::Loading;
        self.insights = Load::Loading;
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Refresh => Event::Refresh,
            Message::OverviewLoaded(result) => {
                self.overview = match result {
                    Ok(overview) => Load::Ready(overview),
                    Err(error) => Load::Failed(error),
                };
                Event::None
            }
            Message::InsightsLoaded(result) => {
                self.insights = match result {
                    Ok(insights) => Load::Ready(insights),
                    Err(error) => Load::Failed(error),
                };
                Event::None
            }
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let header = Row::new()
            .align_y(alignment::Vertical::Center)
            .push(
                Container::new(Text::new(i18n.tr("dashboard-title")).size(typography::TITLE_LG))
                    .width(Length::Fill),
            )
            .push(
                button(Text::new(i18n.tr("dashboard-refresh")))
                    .style(styles::button::primary)
                    .on_press(Message::Refresh),
            );

        let content = Column::new()
            .spacing(spacing::LG)
            .padding(spacing::LG)
            .push(header)
            .push(self.view_overview(i18n))
            .push(self.view_insights(i18n));

        scrollable(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_overview<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        match &self.overview {
            Load::Loading => loading(i18n),
            Load::Failed(error) => failure(i18n, error),
            Load::Ready(overview) => {
                let title = Text::new(
                    i18n.tr_with_args("dashboard-overview-title", &[("city", overview.city.as_str())]),
                )
                .size(typography::TITLE_SM);

                let cards = Row::new()
                    .spacing(spacing::SM)
                    .push(metric_card::view(
                        i18n.tr("dashboard-total-today"),
                        metric_card::format_count(overview.predictions.total_rentals_today),
                    ))
                    .push(metric_card::view(
                        i18n.tr("dashboard-current-hour"),
                        metric_card::format_count(overview.predictions.current_hour_rentals),
                    ))
                    .push(metric_card::view(
                        i18n.tr("dashboard-weather-temp"),
                        format!("{:.1} °C", overview.weather.temp),
                    ))
                    .push(metric_card::view(
                        i18n.tr("dashboard-weather-feels"),
                        format!("{:.1} °C", overview.weather.atemp),
                    ))
                    .push(metric_card::view(
                        i18n.tr("dashboard-weather-humidity"),
                        format!("{:.0} %", overview.weather.humidity),
                    ))
                    .push(metric_card::view(
                        i18n.tr("dashboard-weather-wind"),
                        format!("{:.1} km/h", overview.weather.windspeed),
                    ));

                Column::new()
                    .spacing(spacing::SM)
                    .push(title)
                    .push(cards)
                    .into()
            }
        }
    }

    fn view_insights<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        match &self.insights {
            Load::Loading => loading(i18n),
            Load::Failed(error) => failure(i18n, error),
            Load::Ready(insights) => {
                let averages = Row::new()
                    .spacing(spacing::SM)
                    .push(metric_card::view(
                        i18n.tr("dashboard-avg-daily"),
                        metric_card::format_count(insights.averages.avg_daily),
                    ))
                    .push(metric_card::view(
                        i18n.tr("dashboard-avg-hourly"),
                        metric_card::format_count(insights.averages.avg_hourly),
                    ))
                    .push(metric_card::view(
                        i18n.tr("dashboard-avg-weekly"),
                        metric_card::format_count(insights.averages.avg_weekly),
                    ))
                    .push(metric_card::view(
                        i18n.tr("dashboard-avg-monthly"),
                        metric_card::format_count(insights.averages.avg_monthly),
                    ))
                    .push(metric_card::view(
                        i18n.tr("dashboard-avg-yearly"),
                        metric_card::format_count(insights.averages.avg_yearly),
                    ));

                let peaks = Row::new()
                    .spacing(spacing::SM)
                    .push(metric_card::view(
                        i18n.tr("dashboard-peak-hour"),
                        format!("{:02}:00", insights.peaks.peak_hour),
                    ))
                    .push(metric_card::view(
                        i18n.tr("dashboard-peak-day"),
                        insights.peak_day_label().unwrap_or("—").to_string(),
                    ))
                    .push(metric_card::view(
                        i18n.tr("dashboard-peak-month"),
                        insights.peak_month_label().unwrap_or("—").to_string(),
                    ));

                let mut column = Column::new()
                    .spacing(spacing::SM)
                    .push(Text::new(i18n.tr("dashboard-averages-title")).size(typography::TITLE_SM))
                    .push(averages)
                    .push(Text::new(i18n.tr("dashboard-peaks-title")).size(typography::TITLE_SM))
                    .push(peaks);

                if !insights.trends.hourly.is_empty() {
                    let chart = BarChart {
                        labels: insights
                            .trends
                            .hourly
                            .iter()
                            .map(|p| format!("{:02}", p.hr))
                            .collect(),
                        values: insights.trends.hourly.iter().map(|p| p.cnt).collect(),
                        color: palette::ACCENT_500,
                    };
                    column = column
                        .push(Text::new(i18n.tr("dashboard-chart-hourly")).size(typography::BODY))
                        .push(
                            canvas(chart)
                                .width(Length::Fill)
                                .height(Length::Fixed(sizing::CHART_HEIGHT)),
                        );
                }

                if !insights.trends.day_of_week.is_empty() {
                    let chart = BarChart {
                        labels: insights
                            .trends
                            .day_of_week
                            .iter()
                            .map(|p| {
                                Insights::DAY_NAMES
                                    .get(p.day as usize)
                                    .copied()
                                    .unwrap_or("—")
                                    .to_string()
                            })
                            .collect(),
                        values: insights.trends.day_of_week.iter().map(|p| p.cnt).collect(),
                        color: palette::PRIMARY_500,
                    };
                    column = column
                        .push(Text::new(i18n.tr("dashboard-chart-weekday")).size(typography::BODY))
                        .push(
                            canvas(chart)
                                .width(Length::Fill)
                                .height(Length::Fixed(sizing::CHART_HEIGHT)),
                        );
                }

                if !insights.trends.monthly.is_empty() {
                    let chart = LineChart {
                        labels: insights
                            .trends
                            .monthly
                            .iter()
                            .map(|p| {
                                (p.month as usize)
                                    .checked_sub(1)
                                    .and_then(|i| Insights::MONTH_NAMES.get(i))
                                    .copied()
                                    .unwrap_or("—")
                                    .to_string()
                            })
                            .collect(),
                        values: insights.trends.monthly.iter().map(|p| p.cnt).collect(),
                        color: palette::PRIMARY_400,
                    };
                    column = column
                        .push(Text::new(i18n.tr("dashboard-chart-monthly")).size(typography::BODY))
                        .push(
                            canvas(chart)
                                .width(Length::Fill)
                                .height(Length::Fixed(sizing::CHART_HEIGHT)),
                        );
                }

                column.into()
            }
        }
    }
}

fn loading<'a>(i18n: &'a I18n) -> Element<'a, Message> {
    Container::new(Text::new(i18n.tr("dashboard-loading")).size(typography::BODY))
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .padding(spacing::LG)
        .into()
}

fn failure<'a>(i18n: &'a I18n, error: &ApiError) -> Element<'a, Message> {
    ErrorDisplay::new(ErrorSeverity::Error)
        .title(i18n.tr("error-api-title"))
        .message(i18n.tr(error.i18n_key()))
        .details(error.detail())
        .action(i18n.tr("action-retry"), Message::Refresh)
        .view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::insights::{Averages, Peaks, Trends};
    use crate::api::prediction::{OverviewPredictions, WeatherSnapshot};

    fn overview() -> Overview {
        Overview {
            city: "Hyderabad".to_string(),
            date: "2025-06-01".to_string(),
            hour: 14,
            weather: WeatherSnapshot {
                temp: 31.5,
                atemp: 34.0,
                humidity: 48.0,
                windspeed: 12.2,
                weathersit: 1,
            },
            predictions: OverviewPredictions {
                total_rentals_today: 5230.0,
                current_hour_rentals: 412.0,
            },
        }
    }

    fn insights() -> Insights {
        Insights {
            averages: Averages {
                avg_daily: 4504.0,
                avg_hourly: 189.0,
                avg_weekly: 31530.0,
                avg_monthly: 135129.0,
                avg_yearly: 1621550.0,
            },
            peaks: Peaks {
                peak_hour: 17,
                peak_day_of_week: 5,
                peak_day_of_month: 15,
                peak_month_of_year: 9,
            },
            trends: Trends::default(),
        }
    }

    #[test]
    fn refresh_bubbles_up() {
        let mut state = State::new();
        assert_eq!(state.update(Message::Refresh), Event::Refresh);
    }

    #[test]
    fn halves_load_independently() {
        let mut state = State::new();
        state.begin_loading();

        state.update(Message::OverviewLoaded(Ok(overview())));
        state.update(Message::InsightsLoaded(Err(ApiError::Status(502))));

        assert!(matches!(state.overview, Load::Ready(_)));
        assert!(matches!(state.insights, Load::Failed(_)));
    }

    #[test]
    fn begin_loading_resets_both_halves() {
        let mut state = State::new();
        state.update(Message::OverviewLoaded(Ok(overview())));
        state.update(Message::InsightsLoaded(Ok(insights())));

        state.begin_loading();
        assert!(matches!(state.overview, Load::Loading));
        assert!(matches!(state.insights, Load::Loading));
    }
}
