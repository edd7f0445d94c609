//! Search form state and the validated query built from it.

use crate::config::FormLayout;

/// One editable input of the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Keywords,
    Title,
    Author,
    Subject,
}

/// Raw form contents, edited on every keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub layout: FormLayout,
    pub keywords: String,
    pub title: String,
    pub author: String,
    pub subject: String,
}

impl SearchForm {
    pub fn new(layout: FormLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Keywords => &self.keywords,
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Subject => &self.subject,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Keywords => self.keywords = value,
            Field::Title => self.title = value,
            Field::Author => self.author = value,
            Field::Subject => self.subject = value,
        }
    }

    /// Inputs shown for the current layout.
    pub fn fields(&self) -> &'static [Field] {
        match self.layout {
            FormLayout::Fields => &[Field::Title, Field::Author, Field::Subject],
            FormLayout::FreeText => &[Field::Keywords],
        }
    }

    /// Reset every input, keeping the layout.
    pub fn clear(&mut self) {
        *self = Self::new(self.layout);
    }

    /// Message shown when the user submits an empty form.
    pub fn empty_message(&self) -> &'static str {
        match self.layout {
            FormLayout::Fields => "Please enter a title, author, or subject.",
            FormLayout::FreeText => "Please enter something to search for.",
        }
    }

    /// Build a query from the non-blank inputs, or `None` when there is
    /// nothing to search for.
    pub fn to_query(&self) -> Option<SearchQuery> {
        let pick = |field: Field| non_blank(self.get(field));

        let query = SearchQuery {
            keywords: pick(Field::Keywords),
            title: pick(Field::Title),
            author: pick(Field::Author),
            subject: pick(Field::Subject),
        };

        (!query.is_empty()).then_some(query)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Trimmed, non-empty search terms for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

impl SearchQuery {
    pub fn keywords(value: impl Into<String>) -> Self {
        Self {
            keywords: non_blank(&value.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_none()
            && self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
    }

    /// Google Books `q` value: bare terms plus `inauthor:` / `subject:`
    /// qualifiers, space separated.
    pub fn google_terms(&self) -> String {
        let mut parts = Vec::new();
        if let Some(keywords) = &self.keywords {
            parts.push(keywords.clone());
        }
        if let Some(title) = &self.title {
            parts.push(title.clone());
        }
        if let Some(author) = &self.author {
            parts.push(format!("inauthor:{author}"));
        }
        if let Some(subject) = &self.subject {
            parts.push(format!("subject:{subject}"));
        }
        parts.join(" ")
    }

    /// OpenLibrary query parameters, one per present term.
    pub fn openlibrary_params(&self) -> Vec<(&'static str, &str)> {
        [
            ("q", &self.keywords),
            ("title", &self.title),
            ("author", &self.author),
            ("subject", &self.subject),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}
