// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications appear temporarily to inform users about actions (session
//! warnings, sign-out, background failures) without blocking interaction.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//! - [`manager`] - `Manager` for queuing and lifecycle management
//! - [`toast`] - Toast widget component for rendering notifications
//!
//! # Design Considerations
//!
//! - Toast duration: ~3s for success/info, ~5s for warnings, manual dismiss for errors
//! - Max visible toasts: 3 (others are queued)
//! - Position: bottom-left corner, clear of the chat launcher

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, Severity};
pub use toast::Toast;
