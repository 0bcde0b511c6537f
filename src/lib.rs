// SPDX-License-Identifier: MPL-2.0
//! `pedalcast` is a desktop client for a bike-share demand forecasting
//! service, built with the Iced GUI framework.
//!
//! It renders authentication screens, a prediction form, analytics
//! dashboards, and a floating assistant chat panel. Predictions, weather
//! lookups, and analytics are computed by a remote backend reached over
//! HTTP; this crate is the presentation layer.

#![doc(html_root_url = "https://docs.rs/pedalcast/0.2.0")]

pub mod api;
pub mod app;
pub mod error;
pub mod i18n;
pub mod ui;
