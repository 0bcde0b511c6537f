// SPDX-License-Identifier: MPL-2.0
//! Settings screen: language, theme, and backend endpoint.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::widget::{button, text_input, Column, Container, Row, Text};
use iced::{alignment, Element, Length};
use unic_langid::LanguageIdentifier;

/// Messages emitted by the settings screen.
#[derive(Debug, Clone)]
pub enum Message {
    LocaleSelected(LanguageIdentifier),
    ThemePicked(ThemeMode),
    BaseUrlChanged(String),
    BaseUrlApplied,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    LocaleSelected(LanguageIdentifier),
    ThemePicked(ThemeMode),
    BaseUrlApplied(String),
}

/// Initial values handed in by the parent.
pub struct StateConfig {
    pub theme_mode: ThemeMode,
    pub base_url: String,
}

/// Settings screen state.
#[derive(Debug)]
pub struct State {
    theme_mode: ThemeMode,
    base_url_input: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::System,
            base_url_input: crate::api::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl State {
    pub fn new(config: StateConfig) -> Self {
        Self {
            theme_mode: config.theme_mode,
            base_url_input: config.base_url,
        }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::LocaleSelected(locale) => Event::LocaleSelected(locale),
            Message::ThemePicked(mode) => {
                self.theme_mode = mode;
                Event::ThemePicked(mode)
            }
            Message::BaseUrlChanged(value) => {
                self.base_url_input = value;
                Event::None
            }
            Message::BaseUrlApplied => {
                let url = self.base_url_input.trim().to_string();
                if url.is_empty() {
                    return Event::None;
                }
                Event::BaseUrlApplied(url)
            }
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let title = Text::new(i18n.tr("settings-title")).size(typography::TITLE_LG);

        // Language selection, one button per embedded locale.
        let mut language_column = Column::new()
            .spacing(spacing::XS)
            .push(Text::new(i18n.tr("select-language-label")).size(typography::TITLE_SM));

        for locale in &i18n.available_locales {
            let display_name = locale.to_string();
            let translated_name_key = format!("language-name-{}", locale);
            let translated_name = i18n.tr(&translated_name_key);
            let button_text = if translated_name.starts_with("MISSING:") {
                display_name.clone()
            } else {
                format!("{} ({})", translated_name, display_name)
            };

            let style: fn(&iced::Theme, button::Status) -> button::Style =
                if i18n.current_locale() == locale {
                    styles::button::selected
                } else {
                    styles::button::quiet
                };
            language_column = language_column.push(
                button(Text::new(button_text).size(typography::BODY))
                    .style(style)
                    .on_press(Message::LocaleSelected(locale.clone())),
            );
        }

        // Theme mode selection.
        let theme_button = |key: &str, mode: ThemeMode| {
            let style: fn(&iced::Theme, button::Status) -> button::Style =
                if self.theme_mode == mode {
                    styles::button::selected
                } else {
                    styles::button::quiet
                };
            button(Text::new(i18n.tr(key)).size(typography::BODY))
                .style(style)
                .on_press(Message::ThemePicked(mode))
        };
        let theme_row = Column::new()
            .spacing(spacing::XS)
            .push(Text::new(i18n.tr("settings-theme-label")).size(typography::TITLE_SM))
            .push(
                Row::new()
                    .spacing(spacing::XS)
                    .push(theme_button("theme-light", ThemeMode::Light))
                    .push(theme_button("theme-dark", ThemeMode::Dark))
                    .push(theme_button("theme-system", ThemeMode::System)),
            );

        // Backend endpoint.
        let url_row = Column::new()
            .spacing(spacing::XS)
            .push(Text::new(i18n.tr("settings-api-url-label")).size(typography::TITLE_SM))
            .push(
                Row::new()
                    .spacing(spacing::XS)
                    .push(
                        text_input(crate::api::DEFAULT_BASE_URL, &self.base_url_input)
                            .on_input(Message::BaseUrlChanged)
                            .on_submit(Message::BaseUrlApplied)
                            .padding(spacing::XS),
                    )
                    .push(
                        button(Text::new(i18n.tr("settings-api-url-apply")))
                            .style(styles::button::primary)
                            .on_press(Message::BaseUrlApplied),
                    ),
            );

        Container::new(
            Container::new(
                Column::new()
                    .spacing(spacing::LG)
                    .push(title)
                    .push(language_column)
                    .push(theme_row)
                    .push(url_row),
            )
            .width(Length::Fixed(sizing::FORM_WIDTH * 1.4))
            .padding(spacing::LG)
            .style(styles::container::panel),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .padding(spacing::XL)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_pick_updates_state_and_propagates() {
        let mut state = State::default();
        let event = state.update(Message::ThemePicked(ThemeMode::Dark));
        assert_eq!(event, Event::ThemePicked(ThemeMode::Dark));
        assert_eq!(state.theme_mode(), ThemeMode::Dark);
    }

    #[test]
    fn locale_selection_propagates() {
        let mut state = State::default();
        let fr: LanguageIdentifier = "fr".parse().unwrap();
        assert_eq!(
            state.update(Message::LocaleSelected(fr.clone())),
            Event::LocaleSelected(fr)
        );
    }

    #[test]
    fn blank_base_url_is_not_applied() {
        let mut state = State::default();
        state.update(Message::BaseUrlChanged("   ".to_string()));
        assert_eq!(state.update(Message::BaseUrlApplied), Event::None);
    }

    #[test]
    fn base_url_is_trimmed_on_apply() {
        let mut state = State::default();
        state.update(Message::BaseUrlChanged(
            "  https://api.example.com  ".to_string(),
        ));
        assert_eq!(
            state.update(Message::BaseUrlApplied),
            Event::BaseUrlApplied("https://api.example.com".to_string())
        );
    }
}
