//! Detail overlay for the selected book

use iced::widget::{
    button, center, column, container, image, mouse_area, opaque, row, scrollable, stack, text,
    Space,
};
use iced::{Background, Border, Element, Length};

use super::card;
use super::theme::Palette;
use crate::catalog::BookSummary;

/// Lay `content` over `base`; clicking outside `content` emits `on_blur`
pub fn modal<'a, Message: Clone + 'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    palette: &'static Palette,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(move |_theme| container::Style {
                background: Some(Background::Color(palette.overlay)),
                ..Default::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

/// Detail card, populated from the already fetched summary
pub fn view<'a, Message: Clone + 'a>(
    book: &'a BookSummary,
    cover_handle: Option<&image::Handle>,
    palette: &'static Palette,
    on_close: Message,
    on_open: impl Fn(String) -> Message,
) -> Element<'a, Message> {
    let mut info = column![
        text(&book.title).size(24).color(palette.text),
        text(book.authors_line()).size(15).color(palette.text_muted),
    ]
    .spacing(8);

    if let Some(published) = &book.published {
        info = info.push(
            text(format!("Published: {published}"))
                .size(13)
                .color(palette.text_muted),
        );
    }

    info = info.push(
        scrollable(text(book.description_or_default()).size(15).color(palette.text))
            .height(Length::Fixed(220.0)),
    );

    let open = button(text("Open in browser").size(14))
        .style(button::primary)
        .on_press_maybe(book.link.clone().map(on_open));

    let close = button(text("Close").size(14))
        .style(button::secondary)
        .on_press(on_close);

    let body = row![
        container(card::cover(cover_handle, 260.0, palette)).width(Length::Fixed(180.0)),
        column![info, row![Space::with_width(Length::Fill), open, close].spacing(12)]
            .spacing(16)
            .width(Length::Fill),
    ]
    .spacing(24);

    container(body)
        .padding(24)
        .width(Length::Fixed(720.0))
        .style(move |_theme| container::Style {
            background: Some(Background::Color(palette.surface)),
            border: Border {
                color: palette.border,
                width: 1.0,
                radius: 16.0.into(),
            },
            ..Default::default()
        })
        .into()
}
