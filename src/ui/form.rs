//! Search form widgets

use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Background, Border, Element, Length, Padding};

use super::theme::Palette;
use crate::catalog::{Field, SearchForm};

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Keywords => "🔍 Search books by title, author, or keyword",
        Field::Title => "🔖 Search by Title",
        Field::Author => "✍️ Search by Author",
        Field::Subject => "📂 Search by Subject (e.g. Science, Romance)",
    }
}

/// Single text input bound to one form field
fn input<'a, Message: Clone + 'a>(
    form: &'a SearchForm,
    field: Field,
    on_input: impl Fn(Field, String) -> Message + 'a,
    on_submit: Message,
) -> Element<'a, Message> {
    text_input(placeholder(field), form.get(field))
        .on_input(move |value| on_input(field, value))
        .on_submit(on_submit)
        .padding(12)
        .size(16)
        .width(Length::Fill)
        .into()
}

/// Search form: inputs for the current layout plus Search and Clear buttons
pub fn view<'a, Message: Clone + 'a>(
    form: &'a SearchForm,
    loading: bool,
    palette: &'static Palette,
    on_input: impl Fn(Field, String) -> Message + Clone + 'a,
    on_submit: Message,
    on_clear: Message,
) -> Element<'a, Message> {
    let mut inputs: Vec<Element<'a, Message>> = form
        .fields()
        .iter()
        .map(|&field| input(form, field, on_input.clone(), on_submit.clone()))
        .collect();

    // Title and author share a row, subject spans the full width
    let inputs: Element<'a, Message> = if inputs.len() == 3 {
        let subject = inputs.pop();
        let author = inputs.pop();
        let title = inputs.pop();
        let mut rows = column![].spacing(12);
        if let (Some(title), Some(author)) = (title, author) {
            rows = rows.push(row![title, author].spacing(12));
        }
        if let Some(subject) = subject {
            rows = rows.push(subject);
        }
        rows.into()
    } else {
        column(inputs).spacing(12).into()
    };

    let submit = button(text(if loading { "Searching..." } else { "Search" }).size(16))
        .padding(Padding::from([8.0, 24.0]))
        .style(button::primary)
        .on_press_maybe((!loading).then(|| on_submit.clone()));

    let clear = button(text("Clear Filters").size(16))
        .padding(Padding::from([8.0, 24.0]))
        .style(button::secondary)
        .on_press(on_clear);

    let buttons = row![
        Space::with_width(Length::Fill),
        submit,
        clear,
        Space::with_width(Length::Fill)
    ]
    .spacing(16);

    container(column![inputs, buttons].spacing(16))
        .padding(24)
        .max_width(900.0)
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
