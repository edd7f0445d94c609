//! Core application state and Iced Application implementation
//!
//! Uses the Iced 0.13 API. Search state lives in [`Session`]; this module wires
//! it to widgets, network tasks and timers.

use iced::keyboard::{self, key::Named, Key};
use iced::widget::{button, column, container, image, row, scrollable, text, Space};
use iced::{Background, Border, Element, Event, Length, Padding, Subscription, Task, Theme};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{self, BookProvider, BookSummary, Field, SearchError, SearchQuery};
use crate::config::Config;
use crate::native;
use crate::preferences::Preferences;
use crate::state::Session;
use crate::ui::theme::{self, Palette};
use crate::ui::{card, details, form};

// ============================================================================
// Application State
// ============================================================================

pub struct BookFinder {
    config: Config,
    session: Session,
    provider: Arc<dyn BookProvider>,
    client: reqwest::Client,
    preferences: Preferences,
    covers: HashMap<usize, image::Handle>,
}

#[derive(Debug, Clone)]
pub enum Message {
    FieldChanged(Field, String),
    Submit,
    Clear,
    SearchComplete {
        generation: u64,
        outcome: Result<Vec<BookSummary>, SearchError>,
    },
    CoverLoaded {
        generation: u64,
        index: usize,
        handle: Option<image::Handle>,
    },
    Select(usize),
    Dismiss,
    OpenLink(String),
    ToggleTheme,
    GreetingExpired,
    ErrorExpired(u64),
    IcedEvent(Event),
}

impl BookFinder {
    /// Build the app for `config`, returning the greeting timer as the
    /// startup task.
    pub fn new(config: Config, preferences: Preferences) -> (Self, Task<Message>) {
        let client = catalog::http_client(config.request_timeout());
        let provider = catalog::provider(&config, client.clone());
        Self::with_provider(config, preferences, provider, client)
    }

    pub fn with_provider(
        config: Config,
        preferences: Preferences,
        provider: Arc<dyn BookProvider>,
        client: reqwest::Client,
    ) -> (Self, Task<Message>) {
        tracing::info!("Searching with {}", provider.name());

        let session = Session::new(config.layout, preferences.theme());
        let (delay, message) = greeting_timer(&config);
        let greeting = after(delay, message);

        let app = Self {
            config,
            session,
            provider,
            client,
            preferences,
            covers: HashMap::new(),
        };
        (app, greeting)
    }

    pub fn title(&self) -> String {
        String::from("Book Finder")
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FieldChanged(field, value) => {
                self.session.set_field(field, value);
                Task::none()
            }

            Message::Submit => match self.session.begin_search() {
                Ok(pending) => {
                    self.covers.clear();
                    tracing::info!(
                        "Searching {} for {:?} (generation {})",
                        self.provider.name(),
                        pending.query,
                        pending.generation
                    );
                    let generation = pending.generation;
                    Task::perform(
                        search(self.provider.clone(), pending.query, self.config.page_size),
                        move |outcome| Message::SearchComplete { generation, outcome },
                    )
                }
                Err(rejected) => {
                    tracing::debug!("Search rejected: {}", rejected.message());
                    self.session.show_error(rejected.message());
                    self.schedule_error_expiry()
                }
            },

            Message::Clear => {
                self.session.clear();
                self.covers.clear();
                Task::none()
            }

            Message::SearchComplete { generation, outcome } => {
                let failed = outcome.is_err();
                if !self.session.finish_search(generation, outcome) {
                    return Task::none();
                }

                if failed {
                    self.schedule_error_expiry()
                } else {
                    tracing::info!("Found {} books", self.session.results.len());
                    self.load_covers()
                }
            }

            Message::CoverLoaded {
                generation,
                index,
                handle,
            } => {
                if generation == self.session.generation() {
                    if let Some(handle) = handle {
                        self.covers.insert(index, handle);
                    }
                }
                Task::none()
            }

            Message::Select(index) => {
                self.session.select(index);
                Task::none()
            }

            Message::Dismiss => {
                self.session.dismiss();
                Task::none()
            }

            Message::OpenLink(url) => {
                if let Err(e) = native::open_url(&url) {
                    tracing::warn!("{}", e);
                }
                Task::none()
            }

            Message::ToggleTheme => {
                let theme = self.session.toggle_theme();
                if let Err(e) = self.preferences.set_theme(theme) {
                    tracing::warn!("Could not save theme preference: {}", e);
                }
                Task::none()
            }

            Message::GreetingExpired => {
                self.session.hide_greeting();
                Task::none()
            }

            Message::ErrorExpired(id) => {
                self.session.expire_error(id);
                Task::none()
            }

            Message::IcedEvent(event) => {
                if let Event::Keyboard(keyboard::Event::KeyPressed {
                    key: Key::Named(Named::Escape),
                    ..
                }) = event
                {
                    return self.update(Message::Dismiss);
                }
                Task::none()
            }
        }
    }

    /// Delay and message that will hide the error notice currently shown
    fn error_timer(&self) -> Option<(Duration, Message)> {
        let notice = self.session.error.as_ref()?;
        Some((self.config.error_duration(), Message::ErrorExpired(notice.id)))
    }

    fn schedule_error_expiry(&self) -> Task<Message> {
        match self.error_timer() {
            Some((delay, message)) => after(delay, message),
            None => Task::none(),
        }
    }

    /// Fetch thumbnails for the current results in the background
    fn load_covers(&self) -> Task<Message> {
        let generation = self.session.generation();
        let tasks: Vec<Task<Message>> = self
            .session
            .results
            .iter()
            .enumerate()
            .filter_map(|(index, book)| {
                let url = book.cover_url.clone()?;
                Some(Task::perform(
                    load_cover(self.client.clone(), url),
                    move |handle| Message::CoverLoaded {
                        generation,
                        index,
                        handle,
                    },
                ))
            })
            .collect();
        Task::batch(tasks)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let palette = Palette::for_mode(self.session.theme);

        let mut content = column![self.view_header(palette)].spacing(32);

        if self.session.show_greeting {
            content = content.push(self.view_greeting(palette));
        }

        content = content.push(
            container(form::view(
                &self.session.form,
                self.session.loading,
                palette,
                Message::FieldChanged,
                Message::Submit,
                Message::Clear,
            ))
            .center_x(Length::Fill),
        );

        if let Some(notice) = &self.session.error {
            content = content.push(
                container(text(&notice.message).size(15).color(palette.error))
                    .center_x(Length::Fill),
            );
        }

        let results: Element<'_, Message> = if self.session.loading {
            centered_hint("Searching...", palette)
        } else if self.session.is_idle_empty() {
            centered_hint("Start searching to discover amazing books! 🔍", palette)
        } else {
            container(card::grid(
                &self.session.results,
                &self.covers,
                palette,
                Message::Select,
            ))
            .center_x(Length::Fill)
            .into()
        };
        content = content.push(results);

        content = content.push(
            container(
                text("Built with ❤️ using Rust & iced")
                    .size(13)
                    .color(palette.text_muted),
            )
            .center_x(Length::Fill)
            .padding(Padding::from([24.0, 0.0])),
        );

        let base = container(scrollable(content).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| container::Style {
                background: Some(Background::Color(palette.background)),
                ..Default::default()
            });

        match self.session.selected_book() {
            Some(book) => {
                let cover = self.session.selected.and_then(|i| self.covers.get(&i));
                details::modal(
                    base,
                    details::view(book, cover, palette, Message::Dismiss, Message::OpenLink),
                    palette,
                    Message::Dismiss,
                )
            }
            None => base.into(),
        }
    }

    fn view_header(&self, palette: &'static Palette) -> Element<'_, Message> {
        let (icon, hint) = if self.session.theme.is_dark() {
            ("☀️", "Switch to Light Mode")
        } else {
            ("🌙", "Switch to Dark Mode")
        };

        let toggle = button(text(icon).size(22))
            .style(button::text)
            .on_press(Message::ToggleTheme);

        container(
            row![
                text("📚 Book Finder").size(32).color(palette.text),
                Space::with_width(Length::Fill),
                text(hint).size(12).color(palette.text_muted),
                toggle
            ]
            .spacing(12)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::from([24.0, 24.0]))
        .width(Length::Fill)
        .style(move |_theme| container::Style {
            background: Some(Background::Color(palette.surface)),
            border: Border {
                color: palette.border,
                width: 1.0,
                radius: 0.0.into(),
            },
            ..Default::default()
        })
        .into()
    }

    fn view_greeting(&self, palette: &'static Palette) -> Element<'_, Message> {
        container(
            container(text(self.config.greeting()).size(18).color(palette.text))
                .padding(Padding::from([12.0, 24.0]))
                .style(move |_theme| container::Style {
                    background: Some(Background::Color(palette.surface_highlight)),
                    border: Border {
                        color: palette.border,
                        width: 1.0,
                        radius: 12.0.into(),
                    },
                    ..Default::default()
                }),
        )
        .center_x(Length::Fill)
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::event::listen().map(Message::IcedEvent)
    }

    pub fn theme(&self) -> Theme {
        theme::iced_theme(self.session.theme)
    }
}

// ============================================================================
// Tasks
// ============================================================================

fn greeting_timer(config: &Config) -> (Duration, Message) {
    (config.greeting_duration(), Message::GreetingExpired)
}

/// Emit `message` once `delay` has passed
fn after(delay: Duration, message: Message) -> Task<Message> {
    Task::perform(delayed(delay, message), |message| message)
}

async fn delayed(delay: Duration, message: Message) -> Message {
    tokio::time::sleep(delay).await;
    message
}

async fn search(
    provider: Arc<dyn BookProvider>,
    query: SearchQuery,
    limit: usize,
) -> Result<Vec<BookSummary>, SearchError> {
    provider.search(&query, limit).await
}

async fn load_cover(client: reqwest::Client, url: String) -> Option<image::Handle> {
    match catalog::fetch_cover(client, url.clone()).await {
        Ok(bytes) => Some(image::Handle::from_bytes(bytes)),
        Err(e) => {
            tracing::debug!("No cover from {}: {}", url, e);
            None
        }
    }
}

fn centered_hint<'a>(hint: &'a str, palette: &'static Palette) -> Element<'a, Message> {
    container(text(hint).size(18).color(palette.text_muted))
        .center_x(Length::Fill)
        .padding(Padding::from([48.0, 0.0]))
        .into()
}
