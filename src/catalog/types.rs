//! Book records shared by every provider.

use serde::{Deserialize, Serialize};

pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const NO_DESCRIPTION: &str = "No description available.";

/// Minimal book record rendered in the grid and detail overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub title: String,
    pub authors: Vec<String>,
    pub cover_url: Option<String>,
    pub description: Option<String>,
    pub published: Option<String>,
    pub link: Option<String>,
}

impl BookSummary {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            cover_url: None,
            description: None,
            published: None,
            link: None,
        }
    }

    /// Comma separated authors, or "Unknown Author".
    pub fn authors_line(&self) -> String {
        if self.authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            self.authors.join(", ")
        }
    }

    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    /// First `max_chars` characters of the description, with an ellipsis when
    /// cut short.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let description = self.description_or_default();
        let mut chars = description.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}…", head.trim_end())
        } else {
            head
        }
    }
}

/// `title — authors (published)` as printed by the CLI.
impl std::fmt::Display for BookSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} — {}", self.title, self.authors_line())?;
        if let Some(published) = &self.published {
            write!(f, " ({published})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks() {
        let book = BookSummary::new("Dune");
        assert_eq!(book.authors_line(), "Unknown Author");
        assert_eq!(book.description_or_default(), "No description available.");
        assert_eq!(book.to_string(), "Dune — Unknown Author");
    }

    #[test]
    fn test_display_with_authors_and_date() {
        let book = BookSummary {
            authors: vec!["Terry Pratchett".into(), "Neil Gaiman".into()],
            published: Some("1990".into()),
            ..BookSummary::new("Good Omens")
        };
        assert_eq!(
            book.to_string(),
            "Good Omens — Terry Pratchett, Neil Gaiman (1990)"
        );
    }

    #[test]
    fn test_excerpt() {
        let book = BookSummary {
            description: Some("A desert planet and its spice".into()),
            ..BookSummary::new("Dune")
        };
        assert_eq!(book.excerpt(9), "A desert…");
        assert_eq!(book.excerpt(100), "A desert planet and its spice");
    }
}
