//! Desktop integration
//!
//! Hands external links to the system browser.

use std::process::Command;

use crate::error::{Error, Result};

/// Program and leading arguments that open a URL on `os`.
///
/// The URL is always passed as one trailing argument and never goes through a
/// shell, so `&` and `?` in query strings survive intact.
fn opener(os: &str) -> (&'static str, &'static [&'static str]) {
    match os {
        "macos" => ("open", &[]),
        "windows" => ("rundll32", &["url.dll,FileProtocolHandler"]),
        _ => ("xdg-open", &[]),
    }
}

fn open_command(os: &str, url: &str) -> Command {
    let (program, args) = opener(os);
    let mut command = Command::new(program);
    command.args(args).arg(url);
    command
}

/// Only web links are handed to the opener
fn is_web_link(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Open a link with the default browser
pub fn open_url(url: &str) -> Result<()> {
    if !is_web_link(url) {
        return Err(Error::Open {
            url: url.to_string(),
            reason: "not an http(s) link".to_string(),
        });
    }

    let mut command = open_command(std::env::consts::OS, url);
    command.spawn().map_err(|e| Error::Open {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    tracing::info!("Opened {} with {:?}", url, command.get_program());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_links_only() {
        assert!(is_web_link("https://openlibrary.org/works/OL45804W"));
        assert!(is_web_link("http://books.google.com/books?id=x"));
        assert!(!is_web_link("file:///etc/passwd"));
        assert!(!is_web_link("not a link"));
    }

    fn args(command: &Command) -> Vec<&str> {
        command
            .get_args()
            .map(|arg| arg.to_str().unwrap())
            .collect()
    }

    #[test]
    fn test_windows_link_with_ampersand_is_one_argument() {
        let url = "https://books.google.com/books?id=abc&hl=en&source=gbs_api";
        let command = open_command("windows", url);
        assert_eq!(command.get_program(), "rundll32");
        assert_eq!(args(&command), vec!["url.dll,FileProtocolHandler", url]);
    }

    #[test]
    fn test_unix_openers_pass_link_unchanged() {
        let url = "https://openlibrary.org/search?q=a&b=c";
        let mac = open_command("macos", url);
        assert_eq!(mac.get_program(), "open");
        assert_eq!(args(&mac), vec![url]);

        let linux = open_command("linux", url);
        assert_eq!(linux.get_program(), "xdg-open");
        assert_eq!(args(&linux), vec![url]);
    }

    #[test]
    fn test_open_rejects_non_web_link() {
        let err = open_url("javascript:alert(1)").unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }
}
