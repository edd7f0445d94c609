//! Command-line interface
//!
//! `bookfinder` with no subcommand opens the window; `bookfinder search`
//! runs one search in the terminal.

use clap::{Parser, Subcommand};

use crate::catalog::{Field, SearchForm};
use crate::config::{FormLayout, ProviderKind};

#[derive(Parser, Debug)]
#[command(name = "bookfinder")]
#[command(about = "Search Google Books or OpenLibrary", long_about = None)]
#[command(version)]
#[command(after_help = "Environment:
  BOOKFINDER_CONFIG    Path to config.toml
  BOOKFINDER_PROVIDER  Provider override
  RUST_LOG             Log filter (default bookfinder=info)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search from the terminal and print the results
    Search {
        /// Match the title
        #[arg(short, long)]
        title: Option<String>,

        /// Match the author
        #[arg(short, long)]
        author: Option<String>,

        /// Match the subject
        #[arg(short, long)]
        subject: Option<String>,

        /// Catalog to search (default from config)
        #[arg(short, long, value_enum)]
        provider: Option<ProviderKind>,

        /// Free-text search words
        words: Vec<String>,
    },
}

impl Commands {
    /// Search form equivalent to the given flags and words.
    ///
    /// Bare words alone make a free-text search; combined with flags they are
    /// sent as extra keywords.
    pub fn search_form(&self) -> SearchForm {
        let Commands::Search {
            title,
            author,
            subject,
            words,
            ..
        } = self;

        let has_fields = title.is_some() || author.is_some() || subject.is_some();
        let layout = if !has_fields && !words.is_empty() {
            FormLayout::FreeText
        } else {
            FormLayout::Fields
        };

        let mut form = SearchForm::new(layout);
        for (field, value) in [
            (Field::Title, title),
            (Field::Author, author),
            (Field::Subject, subject),
        ] {
            if let Some(value) = value {
                form.set(field, value.clone());
            }
        }
        if !words.is_empty() {
            form.set(Field::Keywords, words.join(" "));
        }
        form
    }

    pub fn provider(&self) -> Option<ProviderKind> {
        let Commands::Search { provider, .. } = self;
        *provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(args: &[&str]) -> Commands {
        let cli = Cli::try_parse_from(std::iter::once("bookfinder").chain(args.iter().copied()))
            .unwrap();
        cli.command.expect("Expected Search command")
    }

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::try_parse_from(["bookfinder"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_fields() {
        let cmd = search(&["search", "--author", "Jane Austen", "-s", "Romance"]);
        let form = cmd.search_form();
        assert_eq!(form.author, "Jane Austen");
        assert_eq!(form.subject, "Romance");
        assert_eq!(form.layout, FormLayout::Fields);
        assert_eq!(cmd.provider(), None);
    }

    #[test]
    fn test_parse_free_text_with_provider() {
        let cmd = search(&["search", "the", "hobbit", "--provider", "openlibrary"]);
        let form = cmd.search_form();
        assert_eq!(form.layout, FormLayout::FreeText);
        assert_eq!(form.keywords, "the hobbit");
        assert_eq!(cmd.provider(), Some(ProviderKind::OpenLibrary));
        assert!(form.to_query().is_some());
    }

    #[test]
    fn test_parse_words_and_flags_combine() {
        let form = search(&["search", "dune", "--author", "Herbert"]).search_form();
        let query = form.to_query().unwrap();
        assert_eq!(query.google_terms(), "dune inauthor:Herbert");
    }

    #[test]
    fn test_parse_empty_search_has_no_query() {
        let form = search(&["search"]).search_form();
        assert!(form.to_query().is_none());
    }

    #[test]
    fn test_mistyped_flag_is_rejected() {
        let result = Cli::try_parse_from(["bookfinder", "search", "--titel", "Dune"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(Cli::try_parse_from(["bookfinder", "search", "--title"]).is_err());
        assert!(Cli::try_parse_from(["bookfinder", "search", "-p", "bing", "x"]).is_err());
        assert!(Cli::try_parse_from(["bookfinder", "frobnicate"]).is_err());
    }
}
