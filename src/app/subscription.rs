// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Three concerns, each active only while needed:
//! - window-level pointer routing to the chat panel during a drag/resize
//!   session, so the interaction keeps tracking after the pointer leaves
//!   the panel (and ends reliably on release anywhere in the window);
//! - the chat panel's per-frame tick that coalesces pointer samples;
//! - the periodic tick that expires toast notifications.
//!
//! All three are derived from state. Closing the panel (or finishing the
//! session) makes the corresponding subscription disappear on the next
//! update, which is what releases the "global listeners".

use super::{App, Message};
use crate::ui::chat;
use iced::{event, mouse, time, Subscription};
use std::time::Duration;

pub fn subscription(app: &App) -> Subscription<Message> {
    let mut subscriptions = Vec::new();

    // Window-level pointer tracking while the panel is being dragged/resized.
    if app.chat.is_interacting() {
        subscriptions.push(event::listen_with(|event, _status, _window| {
            if let event::Event::Mouse(mouse::Event::CursorMoved { position }) = &event {
                return Some(Message::Chat(chat::Message::PointerMoved(*position)));
            }
            if matches!(
                &event,
                event::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
            ) {
                return Some(Message::Chat(chat::Message::PointerReleased));
            }
            None
        }));
    }

    // Frame tick for pointer-sample coalescing (display-rate, gated).
    subscriptions.push(app.chat.subscription().map(Message::Chat));

    // Notification auto-dismiss timer.
    if app.notifications.has_notifications() {
        subscriptions.push(time::every(Duration::from_millis(500)).map(|_| Message::Tick));
    }

    Subscription::batch(subscriptions)
}
