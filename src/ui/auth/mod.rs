// SPDX-License-Identifier: MPL-2.0
//! Sign-in and sign-up forms.
//!
//! One component carries both faces of the account flow; switching between
//! them keeps the username so a freshly registered user can sign straight
//! in. Submission is validated locally first (the backend re-checks), then
//! handed to the parent as an [`Event`] to perform the API call.

use crate::api::{ApiError, SignUpForm};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text, text_input, Column, Container, Text};
use iced::{alignment, Element, Length, Theme};

/// Which face of the form is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    SignIn,
    SignUp,
}

/// Messages handled by the auth component.
#[derive(Debug, Clone)]
pub enum Message {
    SwitchTo(Mode),
    UsernameChanged(String),
    PasswordChanged(String),
    FullNameChanged(String),
    EmailChanged(String),
    Password1Changed(String),
    Password2Changed(String),
    SignInSubmitted,
    SignUpSubmitted,
    /// The API call the parent ran for us failed.
    Failed(ApiError),
    /// The sign-up API call succeeded (sign-in success is handled by the
    /// parent switching screens).
    SignUpSucceeded,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    SignIn { username: String, password: String },
    SignUp(Box<SignUpForm>),
}

/// Inline form feedback: an i18n key plus an optional technical detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub key: String,
    pub detail: Option<String>,
}

/// Auth screens state.
#[derive(Debug, Default)]
pub struct State {
    mode: Mode,
    username: String,
    password: String,
    full_name: String,
    email: String,
    password1: String,
    password2: String,
    in_flight: bool,
    error: Option<FormError>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::SwitchTo(mode) => {
                self.mode = mode;
                self.error = None;
                self.password.clear();
                self.password1.clear();
                self.password2.clear();
                Event::None
            }
            Message::UsernameChanged(value) => {
                self.username = value;
                Event::None
            }
            Message::PasswordChanged(value) => {
                self.password = value;
                Event::None
            }
            Message::FullNameChanged(value) => {
                self.full_name = value;
                Event::None
            }
            Message::EmailChanged(value) => {
                self.email = value;
                Event::None
            }
            Message::Password1Changed(value) => {
                self.password1 = value;
                Event::None
            }
            Message::Password2Changed(value) => {
                self.password2 = value;
                Event::None
            }
            Message::SignInSubmitted => {
                if self.in_flight {
                    return Event::None;
                }
                if self.username.trim().is_empty() || self.password.is_empty() {
                    self.error = Some(FormError {
                        key: "error-form-missing-fields".to_string(),
                        detail: None,
                    });
                    return Event::None;
                }
                self.error = None;
                self.in_flight = true;
                Event::SignIn {
                    username: self.username.trim().to_string(),
                    password: self.password.clone(),
                }
            }
            Message::SignUpSubmitted => {
                if self.in_flight {
                    return Event::None;
                }
                let form = SignUpForm {
                    full_name: self.full_name.trim().to_string(),
                    username: self.username.trim().to_string(),
                    email: self.email.trim().to_string(),
                    password1: self.password1.clone(),
                    password2: self.password2.clone(),
                };
                if let Err(key) = form.validate() {
                    self.error = Some(FormError {
                        key: key.to_string(),
                        detail: None,
                    });
                    return Event::None;
                }
                self.error = None;
                self.in_flight = true;
                Event::SignUp(Box::new(form))
            }
            Message::Failed(error) => {
                self.in_flight = false;
                self.error = Some(FormError {
                    key: error.i18n_key().to_string(),
                    detail: Some(error.detail()),
                });
                Event::None
            }
            Message::SignUpSucceeded => {
                self.in_flight = false;
                self.error = None;
                // Back to sign-in with the username kept and passwords wiped.
                self.mode = Mode::SignIn;
                self.password.clear();
                self.password1.clear();
                self.password2.clear();
                Event::None
            }
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let form = match self.mode {
            Mode::SignIn => self.view_sign_in(i18n),
            Mode::SignUp => self.view_sign_up(i18n),
        };

        Container::new(
            Container::new(form)
                .width(Length::Fixed(sizing::FORM_WIDTH))
                .padding(spacing::LG)
                .style(styles::container::panel),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
    }

    fn view_sign_in<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let title = Text::new(i18n.tr("auth-sign-in-title")).size(typography::TITLE_SM);

        let username = text_input(
            i18n.tr("auth-username-label").as_str(),
            &self.username,
        )
        .on_input(Message::UsernameChanged)
        .padding(spacing::SM);

        let password = text_input(
            i18n.tr("auth-password-label").as_str(),
            &self.password,
        )
        .secure(true)
        .on_input(Message::PasswordChanged)
        .on_submit(Message::SignInSubmitted)
        .padding(spacing::SM);

        let submit = button(
            Text::new(i18n.tr("auth-sign-in-button"))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center),
        )
        .width(Length::Fill)
        .style(styles::button::primary)
        .on_press_maybe((!self.in_flight).then_some(Message::SignInSubmitted));

        let switch = button(Text::new(i18n.tr("auth-switch-to-sign-up")).size(typography::BODY_SM))
            .style(styles::button::quiet)
            .on_press(Message::SwitchTo(Mode::SignUp));

        let mut column = Column::new()
            .spacing(spacing::MD)
            .push(title)
            .push(username)
            .push(password)
            .push(submit)
            .push(switch);

        if self.in_flight {
            column = column.push(Text::new(i18n.tr("auth-working")).size(typography::BODY_SM));
        }
        if let Some(error) = &self.error {
            column = column.push(self.view_error(i18n, error));
        }

        column.into()
    }

    fn view_sign_up<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let title = Text::new(i18n.tr("auth-sign-up-title")).size(typography::TITLE_SM);

        let full_name = text_input(
            i18n.tr("auth-full-name-label").as_str(),
            &self.full_name,
        )
        .on_input(Message::FullNameChanged)
        .padding(spacing::SM);

        let username = text_input(
            i18n.tr("auth-username-label").as_str(),
            &self.username,
        )
        .on_input(Message::UsernameChanged)
        .padding(spacing::SM);

        let email = text_input(i18n.tr("auth-email-label").as_str(), &self.email)
            .on_input(Message::EmailChanged)
            .padding(spacing::SM);

        let password1 = text_input(
            i18n.tr("auth-password1-label").as_str(),
            &self.password1,
        )
        .secure(true)
        .on_input(Message::Password1Changed)
        .padding(spacing::SM);

        let password2 = text_input(
            i18n.tr("auth-password2-label").as_str(),
            &self.password2,
        )
        .secure(true)
        .on_input(Message::Password2Changed)
        .on_submit(Message::SignUpSubmitted)
        .padding(spacing::SM);

        let submit = button(
            Text::new(i18n.tr("auth-sign-up-button"))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center),
        )
        .width(Length::Fill)
        .style(styles::button::primary)
        .on_press_maybe((!self.in_flight).then_some(Message::SignUpSubmitted));

        let switch = button(Text::new(i18n.tr("auth-switch-to-sign-in")).size(typography::BODY_SM))
            .style(styles::button::quiet)
            .on_press(Message::SwitchTo(Mode::SignIn));

        let mut column = Column::new()
            .spacing(spacing::MD)
            .push(title)
            .push(full_name)
            .push(username)
            .push(email)
            .push(password1)
            .push(password2)
            .push(submit)
            .push(switch);

        if self.in_flight {
            column = column.push(Text::new(i18n.tr("auth-working")).size(typography::BODY_SM));
        }
        if let Some(error) = &self.error {
            column = column.push(self.view_error(i18n, error));
        }

        column.into()
    }

    fn view_error<'a>(&'a self, i18n: &'a I18n, error: &FormError) -> Element<'a, Message> {
        let mut column = Column::new().spacing(spacing::XXS).push(
            Text::new(i18n.tr(&error.key))
                .size(typography::BODY_SM)
                .style(|_theme: &Theme| text::Style {
                    color: Some(crate::ui::design_tokens::palette::ERROR_500),
                }),
        );
        if let Some(detail) = &error.detail {
            column = column.push(Text::new(detail.clone()).size(typography::CAPTION));
        }
        column.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sign_in_is_rejected_locally() {
        let mut state = State::new();
        let event = state.update(Message::SignInSubmitted);
        assert_eq!(event, Event::None);
        assert_eq!(
            state.error().map(|e| e.key.as_str()),
            Some("error-form-missing-fields")
        );
        assert!(!state.is_in_flight());
    }

    #[test]
    fn valid_sign_in_emits_event_and_locks_form() {
        let mut state = State::new();
        state.update(Message::UsernameChanged("  ada ".to_string()));
        state.update(Message::PasswordChanged("s3cret".to_string()));

        let event = state.update(Message::SignInSubmitted);
        assert_eq!(
            event,
            Event::SignIn {
                username: "ada".to_string(),
                password: "s3cret".to_string(),
            }
        );
        assert!(state.is_in_flight());

        // No double submit while the request is in flight.
        assert_eq!(state.update(Message::SignInSubmitted), Event::None);
    }

    #[test]
    fn failed_request_unlocks_and_reports() {
        let mut state = State::new();
        state.update(Message::UsernameChanged("ada".to_string()));
        state.update(Message::PasswordChanged("s3cret".to_string()));
        state.update(Message::SignInSubmitted);

        state.update(Message::Failed(ApiError::Rejected(
            "No active account".to_string(),
        )));
        assert!(!state.is_in_flight());
        assert_eq!(
            state.error().map(|e| e.key.as_str()),
            Some("error-api-rejected")
        );
    }

    #[test]
    fn mismatched_sign_up_passwords_stay_local() {
        let mut state = State::new();
        state.update(Message::SwitchTo(Mode::SignUp));
        state.update(Message::FullNameChanged("Ada Lovelace".to_string()));
        state.update(Message::UsernameChanged("ada".to_string()));
        state.update(Message::EmailChanged("ada@example.com".to_string()));
        state.update(Message::Password1Changed("one".to_string()));
        state.update(Message::Password2Changed("two".to_string()));

        assert_eq!(state.update(Message::SignUpSubmitted), Event::None);
        assert_eq!(
            state.error().map(|e| e.key.as_str()),
            Some("error-form-password-mismatch")
        );
    }

    #[test]
    fn sign_up_success_returns_to_sign_in_keeping_username() {
        let mut state = State::new();
        state.update(Message::SwitchTo(Mode::SignUp));
        state.update(Message::FullNameChanged("Ada Lovelace".to_string()));
        state.update(Message::UsernameChanged("ada".to_string()));
        state.update(Message::EmailChanged("ada@example.com".to_string()));
        state.update(Message::Password1Changed("s3cret".to_string()));
        state.update(Message::Password2Changed("s3cret".to_string()));

        let event = state.update(Message::SignUpSubmitted);
        assert!(matches!(event, Event::SignUp(_)));

        state.update(Message::SignUpSucceeded);
        assert_eq!(state.mode(), Mode::SignIn);
        assert_eq!(state.username, "ada");
        assert!(state.password1.is_empty());
    }

    #[test]
    fn switching_modes_clears_errors_and_passwords() {
        let mut state = State::new();
        state.update(Message::PasswordChanged("oops".to_string()));
        state.update(Message::SignInSubmitted); // missing username -> error
        assert!(state.error().is_some());

        state.update(Message::SwitchTo(Mode::SignUp));
        assert!(state.error().is_none());
        assert!(state.password.is_empty());
    }
}
