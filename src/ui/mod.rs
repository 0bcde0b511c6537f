// SPDX-License-Identifier: MPL-2.0
//! UI composition: screens, the chat overlay, shared components, and styling.

pub mod about;
pub mod auth;
pub mod chat;
pub mod components;
pub mod dashboard;
pub mod design_tokens;
pub mod navbar;
pub mod notifications;
pub mod prediction;
pub mod settings;
pub mod styles;
pub mod theming;
pub mod widgets;
