//! Result cards and the grid they sit in

use iced::widget::{button, column, container, image, row, text, Space};
use iced::{Background, Border, ContentFit, Element, Length, Padding, Shadow, Vector};
use std::collections::HashMap;

use super::theme::Palette;
use crate::catalog::BookSummary;

pub const COLUMNS: usize = 3;
const COVER_HEIGHT: f32 = 220.0;
const EXCERPT_CHARS: usize = 160;

/// Cover image, or a placeholder while it loads or when there is none
pub fn cover<'a, Message: 'a>(
    handle: Option<&image::Handle>,
    height: f32,
    palette: &'static Palette,
) -> Element<'a, Message> {
    match handle {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(height)
            .content_fit(ContentFit::Contain)
            .into(),
        None => container(text("📚").size(56))
            .width(Length::Fill)
            .height(height)
            .center_x(Length::Fill)
            .center_y(height)
            .style(move |_theme| container::Style {
                background: Some(Background::Color(palette.surface_highlight)),
                ..Default::default()
            })
            .into(),
    }
}

/// One clickable result card
pub fn view<'a, Message: Clone + 'a>(
    book: &'a BookSummary,
    cover_handle: Option<&image::Handle>,
    palette: &'static Palette,
    on_select: Message,
) -> Element<'a, Message> {
    let mut details = column![
        text(&book.title).size(18).color(palette.text),
        text(book.authors_line()).size(13).color(palette.text_muted),
        text(book.excerpt(EXCERPT_CHARS)).size(13).color(palette.text),
    ]
    .spacing(6);

    if let Some(published) = &book.published {
        details = details.push(
            text(format!("Published: {published}"))
                .size(11)
                .color(palette.text_muted),
        );
    }

    let content = column![
        cover(cover_handle, COVER_HEIGHT, palette),
        container(details).padding(16)
    ];

    button(content)
        .padding(0)
        .width(Length::Fill)
        .on_press(on_select)
        .style(move |_theme, status| {
            let hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
            button::Style {
                background: Some(Background::Color(palette.surface)),
                text_color: palette.text,
                border: Border {
                    color: if hovered { palette.primary } else { palette.border },
                    width: 1.0,
                    radius: 16.0.into(),
                },
                shadow: Shadow {
                    color: palette.overlay,
                    offset: Vector::new(0.0, if hovered { 6.0 } else { 2.0 }),
                    blur_radius: if hovered { 18.0 } else { 6.0 },
                },
            }
        })
        .into()
}

/// Results laid out in rows of [`COLUMNS`] cards
pub fn grid<'a, Message: Clone + 'a>(
    books: &'a [BookSummary],
    covers: &HashMap<usize, image::Handle>,
    palette: &'static Palette,
    on_select: impl Fn(usize) -> Message,
) -> Element<'a, Message> {
    let rows: Vec<Element<'a, Message>> = books
        .chunks(COLUMNS)
        .enumerate()
        .map(|(row_index, chunk)| {
            let mut cells: Vec<Element<'a, Message>> = chunk
                .iter()
                .enumerate()
                .map(|(offset, book)| {
                    let index = row_index * COLUMNS + offset;
                    container(view(book, covers.get(&index), palette, on_select(index)))
                        .width(Length::FillPortion(1))
                        .into()
                })
                .collect();

            // Keep card widths even on a short last row
            while cells.len() < COLUMNS {
                cells.push(Space::with_width(Length::FillPortion(1)).into());
            }

            row(cells).spacing(24).into()
        })
        .collect();

    container(column(rows).spacing(24))
        .padding(Padding::from([0.0, 24.0]))
        .max_width(1200.0)
        .into()
}
