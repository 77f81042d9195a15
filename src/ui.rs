// Terminal layer: prompts through `dialoguer`, spinners through `indicatif`
// and colours through `crossterm`. Handlers only see the `Console` trait, so
// the same flows can be driven by a scripted console in tests.

use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

/// Everything a handler needs from the terminal.
pub trait Console {
    /// Print one line (may contain embedded newlines, e.g. a table).
    fn say(&mut self, line: &str);

    /// Prompt for a non-empty line of text.
    fn text(&mut self, prompt: &str) -> io::Result<String>;

    /// Prompt for text that may be left blank.
    fn optional_text(&mut self, prompt: &str) -> io::Result<String>;

    /// Prompt for hidden input such as a password or token.
    fn secret(&mut self, prompt: &str) -> io::Result<String>;

    fn integer(&mut self, prompt: &str) -> io::Result<i64>;

    fn decimal(&mut self, prompt: &str) -> io::Result<f64>;

    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;

    /// Start a progress indicator for a blocking call. Callers finish it.
    fn spinner(&self, message: &str) -> ProgressBar;
}

/// The interactive terminal used by the binary.
#[derive(Debug, Default)]
pub struct Terminal;

impl Terminal {
    pub fn new() -> Self {
        Terminal
    }
}

impl Console for Terminal {
    fn say(&mut self, line: &str) {
        println!("{}", line);
    }

    fn text(&mut self, prompt: &str) -> io::Result<String> {
        Input::<String>::new().with_prompt(prompt).interact_text()
    }

    fn optional_text(&mut self, prompt: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
    }

    fn secret(&mut self, prompt: &str) -> io::Result<String> {
        // `Password` hides input in terminal for passwords.
        Password::new().with_prompt(prompt).interact()
    }

    fn integer(&mut self, prompt: &str) -> io::Result<i64> {
        // dialoguer re-asks on its own until the text parses.
        Input::<i64>::new().with_prompt(prompt).interact_text()
    }

    fn decimal(&mut self, prompt: &str) -> io::Result<f64> {
        Input::<f64>::new().with_prompt(prompt).interact_text()
    }

    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        Confirm::new().with_prompt(prompt).default(false).interact()
    }

    fn spinner(&self, message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

pub fn heading(text: &str) -> String {
    text.cyan().bold().to_string()
}

pub fn success(text: &str) -> String {
    text.green().to_string()
}

pub fn notice(text: &str) -> String {
    text.yellow().to_string()
}

pub fn failure(text: &str) -> String {
    text.red().to_string()
}

pub fn info(text: &str) -> String {
    text.blue().to_string()
}

/// Boxed menu title plus numbered options.
pub fn menu_block(title: &str, options: &[&str]) -> String {
    const WIDTH: usize = 46;
    let bar = "═".repeat(WIDTH);
    let pad = WIDTH.saturating_sub(title.chars().count());
    let left = pad / 2;
    let centred = format!("{}{}{}", " ".repeat(left), title, " ".repeat(pad - left));

    let mut out = String::new();
    out.push_str(&heading(&format!("╔{}╗", bar)));
    out.push('\n');
    out.push_str(&heading(&format!("║{}║", centred)));
    out.push('\n');
    out.push_str(&heading(&format!("╚{}╝", bar)));
    for (i, option) in options.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{} {}", notice(&format!("{}.", i + 1)), option));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_block_numbers_options_from_one() {
        let block = menu_block("MAIN MENU", &["Manage Products", "Manage Users", "Back"]);
        assert!(block.contains("MAIN MENU"));
        assert!(block.contains("1.") && block.contains("Manage Products"));
        assert!(block.contains("3.") && block.contains("Back"));
        assert_eq!(block.lines().count(), 6);
    }

    #[test]
    fn styled_text_keeps_content() {
        assert!(failure("Invalid choice").contains("Invalid choice"));
        assert!(success("done").contains("done"));
    }
}
