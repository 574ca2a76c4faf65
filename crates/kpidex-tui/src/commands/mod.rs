// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the focused industry tab; on the search tab, close the app
    Quit,
    // Regardless of focused tab, close the app
    Exit,
    Help,
    Theme(String),
    Sidebar,
    // Submit a search as if typed into the search bar
    Search(String),
    // Open an industry page by slug
    Open(String),
    Home,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "q!" | "quit!" => Ok(Command::Exit),
            "help" => Ok(Command::Help),
            "sidebar" => Ok(Command::Sidebar),
            "home" => Ok(Command::Home),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "search" => {
                if rest.is_empty() {
                    Err("usage: search <text>".to_string())
                } else {
                    Ok(Command::Search(rest.to_string()))
                }
            }
            "open" => match rest.trim_start_matches('/') {
                "" => Err("usage: open <industry-slug>".to_string()),
                slug => Ok(Command::Open(slug.to_string())),
            },
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state. Errors are
/// shown in the command bar.
pub fn execute_command(s: &mut AppState<'_>, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => s.close_tab(),
        Command::Exit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Sidebar => s.toggle_sidebar(),
        Command::Search(text) => s.run_search(&text),
        Command::Open(slug) => s.open_industry(&slug)?,
        Command::Home => s.home(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("  quit  "), Ok(Command::Quit));
        assert_eq!(Command::parse("q!"), Ok(Command::Exit));
    }

    #[test]
    fn parse_with_arguments() {
        assert_eq!(
            Command::parse("theme gruvbox"),
            Ok(Command::Theme("gruvbox".to_string()))
        );
        assert_eq!(
            Command::parse("search net interest"),
            Ok(Command::Search("net interest".to_string()))
        );
        assert_eq!(
            Command::parse("open /capital-markets"),
            Ok(Command::Open("capital-markets".to_string()))
        );
    }

    #[test]
    fn missing_arguments_are_errors() {
        assert!(Command::parse("theme").is_err());
        assert!(Command::parse("search").is_err());
        assert!(Command::parse("open /").is_err());
    }

    #[test]
    fn parse_empty_returns_sentinel_err() {
        assert_eq!(Command::parse(""), Err(String::new()));
        assert_eq!(Command::parse("  "), Err(String::new()));
    }

    #[test]
    fn parse_unknown() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}
