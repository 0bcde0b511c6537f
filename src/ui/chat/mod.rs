// SPDX-License-Identifier: MPL-2.0
//! Floating assistant chat panel.
//!
//! The panel is an overlay layered above whichever screen is active: a round
//! launcher button while closed, a draggable and resizable conversation
//! window while open. Geometry and interaction state live in
//! [`panel::PanelController`]; this module owns the transcript, the input
//! line, and the wiring between pointer events and the controller.

pub mod hit_region;
pub mod panel;

pub use panel::{InteractionMode, PanelController, PanelGeometry, ResizeEdge};

use crate::api::ApiError;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::floating;
use hit_region::PanelHitRegion;
use iced::widget::{button, canvas, container, scrollable, text_input, Column, Row, Stack, Text};
use iced::{alignment, Element, Length, Point, Subscription};

/// One transcript line. System-authored lines carry an i18n key so they
/// follow a language switch; user text and backend replies are shown as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineBody {
    Text(String),
    Localized(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub from_user: bool,
    pub body: LineBody,
}

/// Messages handled by the chat panel.
#[derive(Debug, Clone)]
pub enum Message {
    Open,
    Close,
    ToggleFullScreen,
    /// A press landed on a border drag strip.
    DragStarted(Point),
    /// A press landed on a corner resize handle.
    ResizeStarted { pointer: Point, edge: ResizeEdge },
    /// Window-level cursor move, routed here while a session is open.
    PointerMoved(Point),
    /// Window-level button release, routed here while a session is open.
    PointerReleased,
    /// Per-frame tick that commits the newest buffered pointer sample.
    FrameTick,
    InputChanged(String),
    Submit,
    ReplyReceived(Result<String, ApiError>),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// The user submitted a message; the parent performs the API call.
    Send(String),
}

/// Chat panel state. One instance per application window.
pub struct State {
    open: bool,
    controller: PanelController,
    transcript: Vec<ChatLine>,
    input: String,
    awaiting_reply: bool,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub fn new() -> Self {
        Self {
            open: false,
            controller: PanelController::new(),
            transcript: Vec::new(),
            input: String::new(),
            awaiting_reply: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True while a drag or resize session is in progress; the app routes
    /// window-level pointer events here only then.
    pub fn is_interacting(&self) -> bool {
        self.open && self.controller.is_interacting()
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.controller.geometry()
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Open => {
                self.open = true;
                // Geometry lives for one visibility session: reopening after
                // a close starts from the default frame again.
                self.controller = PanelController::new();
                if self.transcript.is_empty() {
                    self.transcript.push(ChatLine {
                        from_user: false,
                        body: LineBody::Localized("chat-greeting"),
                    });
                }
                Event::None
            }
            Message::Close => {
                // Closing mid-session must drop the session; the subscription
                // derived from this state stops with it, so no global pointer
                // routing outlives the panel.
                self.open = false;
                self.controller = PanelController::new();
                Event::None
            }
            Message::ToggleFullScreen => {
                self.controller.toggle_full_screen();
                Event::None
            }
            Message::DragStarted(pointer) => {
                self.controller.begin_drag(pointer);
                Event::None
            }
            Message::ResizeStarted { pointer, edge } => {
                self.controller.begin_resize(pointer, edge);
                Event::None
            }
            Message::PointerMoved(pointer) => {
                self.controller.pointer_moved(pointer);
                Event::None
            }
            Message::PointerReleased => {
                self.controller.end_interaction();
                Event::None
            }
            Message::FrameTick => {
                self.controller.commit_frame();
                Event::None
            }
            Message::InputChanged(value) => {
                self.input = value;
                Event::None
            }
            Message::Submit => {
                let message = self.input.trim().to_string();
                if message.is_empty() || self.awaiting_reply {
                    return Event::None;
                }
                self.input.clear();
                self.awaiting_reply = true;
                self.transcript.push(ChatLine {
                    from_user: true,
                    body: LineBody::Text(message.clone()),
                });
                Event::Send(message)
            }
            Message::ReplyReceived(result) => {
                self.awaiting_reply = false;
                let body = match result {
                    Ok(reply) => LineBody::Text(reply),
                    Err(_) => LineBody::Localized("chat-reply-error"),
                };
                self.transcript.push(ChatLine {
                    from_user: false,
                    body,
                });
                Event::None
            }
        }
    }

    /// Frame tick at display rate, only while a pointer session is open.
    /// Window-level pointer routing is handled by the app subscription.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.is_interacting() {
            iced::time::every(std::time::Duration::from_millis(16)).map(|_| Message::FrameTick)
        } else {
            Subscription::none()
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        if !self.open {
            return self.view_launcher();
        }

        let panel_frame = self.view_panel(i18n);

        if self.controller.is_full_screen() {
            // Geometry is ignored for layout while full-screen; the panel
            // covers the whole viewport.
            container(panel_frame)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        } else {
            let geometry = self.controller.geometry();
            floating(panel_frame, Point::new(geometry.x, geometry.y)).into()
        }
    }

    fn view_launcher(&self) -> Element<'_, Message> {
        let launcher = button(
            Text::new("💬")
                .size(typography::TITLE_MD)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center),
        )
        .width(Length::Fixed(sizing::CHAT_LAUNCHER_SIZE))
        .height(Length::Fixed(sizing::CHAT_LAUNCHER_SIZE))
        .style(styles::button::launcher)
        .on_press(Message::Open);

        container(launcher)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Bottom)
            .padding(spacing::LG)
            .into()
    }

    fn view_panel<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let full_screen = self.controller.is_full_screen();

        let header = self.view_header(i18n, full_screen);
        let transcript = self.view_transcript(i18n);
        let input_row = self.view_input(i18n);

        let body = Column::new().push(header).push(transcript).push(input_row);

        let mut frame = container(body).style(styles::container::chat_panel);
        frame = if full_screen {
            frame.width(Length::Fill).height(Length::Fill)
        } else {
            let geometry = self.controller.geometry();
            frame
                .width(Length::Fixed(geometry.width))
                .height(Length::Fixed(geometry.height))
        };

        if full_screen {
            // No drag/resize chrome while full-screen.
            frame.into()
        } else {
            // Sized explicitly: the floating wrapper hands out loose limits,
            // so a Fill canvas would have nothing to fill against.
            let geometry = self.controller.geometry();
            let hit_region = canvas(PanelHitRegion {
                interacting: self.controller.is_interacting(),
            })
            .width(Length::Fixed(geometry.width))
            .height(Length::Fixed(geometry.height));

            Stack::new()
                .width(Length::Fixed(geometry.width))
                .height(Length::Fixed(geometry.height))
                .push(frame)
                .push(hit_region)
                .into()
        }
    }

    fn view_header<'a>(&'a self, i18n: &'a I18n, full_screen: bool) -> Element<'a, Message> {
        let title = Text::new(i18n.tr("chat-title")).size(typography::TITLE_SM);

        let full_screen_button = button(Text::new(if full_screen { "❐" } else { "⛶" }))
            .style(styles::button::quiet)
            .on_press(Message::ToggleFullScreen);
        let close_button = button(Text::new("✕"))
            .style(styles::button::quiet)
            .on_press(Message::Close);

        let bar = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(
                container(title)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center),
            )
            .push(full_screen_button)
            .push(close_button);

        container(bar)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::PANEL_HEADER_HEIGHT))
            .padding(spacing::SM)
            .style(styles::container::chat_header)
            .into()
    }

    fn view_transcript<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let mut lines = Column::new().spacing(spacing::SM).padding(spacing::MD);

        for line in &self.transcript {
            let body = match &line.body {
                LineBody::Text(text) => text.clone(),
                LineBody::Localized(key) => i18n.tr(key),
            };
            let bubble = container(Text::new(body).size(typography::BODY))
                .padding(spacing::SM)
                .style(styles::container::chat_bubble(line.from_user));

            let row = container(bubble).width(Length::Fill).align_x(if line.from_user {
                alignment::Horizontal::Right
            } else {
                alignment::Horizontal::Left
            });
            lines = lines.push(row);
        }

        if self.awaiting_reply {
            lines = lines.push(
                container(Text::new(i18n.tr("chat-typing")).size(typography::BODY_SM))
                    .padding(spacing::XS)
                    .style(crate::ui::styles::overlay::indicator(
                        crate::ui::design_tokens::radius::SM,
                    )),
            );
        }

        scrollable(lines)
            .width(Length::Fill)
            .height(Length::Fill)
            .anchor_bottom()
            .into()
    }

    fn view_input<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let placeholder = i18n.tr("chat-placeholder");
        let input = text_input(placeholder.as_str(), &self.input)
            .on_input(Message::InputChanged)
            .on_submit(Message::Submit)
            .padding(spacing::SM)
            .size(typography::BODY);

        let send = button(Text::new(i18n.tr("chat-send")).size(typography::BODY))
            .style(styles::button::accent)
            .on_press_maybe((!self.awaiting_reply).then_some(Message::Submit));

        container(
            Row::new()
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center)
                .push(input)
                .push(send),
        )
        .width(Length::Fill)
        .padding(spacing::SM)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_adds_greeting_once() {
        let mut state = State::new();
        state.update(Message::Open);
        state.update(Message::Close);
        state.update(Message::Open);

        assert_eq!(state.transcript.len(), 1);
        assert_eq!(
            state.transcript[0].body,
            LineBody::Localized("chat-greeting")
        );
    }

    #[test]
    fn reopening_resets_geometry_but_keeps_transcript() {
        let mut state = State::new();
        state.update(Message::Open);
        state.update(Message::DragStarted(Point::new(40.0, 80.0)));
        state.update(Message::PointerMoved(Point::new(300.0, 300.0)));
        state.update(Message::PointerReleased);
        assert_ne!(state.geometry(), panel::DEFAULT_GEOMETRY);

        state.update(Message::InputChanged("hello".to_string()));
        state.update(Message::Submit);
        state.update(Message::Close);
        state.update(Message::Open);

        assert_eq!(state.geometry(), panel::DEFAULT_GEOMETRY);
        assert_eq!(state.transcript.len(), 2); // greeting + user line
    }

    #[test]
    fn closing_mid_drag_drops_the_session() {
        let mut state = State::new();
        state.update(Message::Open);
        state.update(Message::DragStarted(Point::new(40.0, 80.0)));
        assert!(state.is_interacting());

        state.update(Message::Close);
        assert!(!state.is_interacting());
        // With no session, the frame tick subscription is gone too.
        state.update(Message::Open);
        assert!(!state.is_interacting());
    }

    #[test]
    fn submit_emits_send_and_blocks_until_reply() {
        let mut state = State::new();
        state.update(Message::Open);
        state.update(Message::InputChanged("  peak hour?  ".to_string()));

        let event = state.update(Message::Submit);
        assert_eq!(event, Event::Send("peak hour?".to_string()));
        assert!(state.awaiting_reply);
        assert!(state.input.is_empty());

        // A second submit while waiting goes nowhere.
        state.update(Message::InputChanged("again".to_string()));
        assert_eq!(state.update(Message::Submit), Event::None);

        state.update(Message::ReplyReceived(Ok("17:00".to_string())));
        assert!(!state.awaiting_reply);
        let last = state.transcript.last().expect("reply line");
        assert!(!last.from_user);
        assert_eq!(last.body, LineBody::Text("17:00".to_string()));
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut state = State::new();
        state.update(Message::Open);
        state.update(Message::InputChanged("   ".to_string()));
        assert_eq!(state.update(Message::Submit), Event::None);
        assert_eq!(state.transcript.len(), 1); // just the greeting
    }

    #[test]
    fn failed_reply_becomes_localized_bot_line() {
        let mut state = State::new();
        state.update(Message::Open);
        state.update(Message::InputChanged("hi".to_string()));
        state.update(Message::Submit);
        state.update(Message::ReplyReceived(Err(ApiError::Network(
            "refused".to_string(),
        ))));

        let last = state.transcript.last().expect("error line");
        assert_eq!(last.body, LineBody::Localized("chat-reply-error"));
        assert!(!state.awaiting_reply);
    }

    #[test]
    fn full_screen_disables_interaction_but_preserves_frame() {
        let mut state = State::new();
        state.update(Message::Open);
        let before = state.geometry();

        state.update(Message::ToggleFullScreen);
        state.update(Message::DragStarted(Point::new(10.0, 10.0)));
        assert!(!state.is_interacting());

        state.update(Message::ToggleFullScreen);
        assert_eq!(state.geometry(), before);
    }
}
