//! Console abstraction for the interactive menu.
//!
//! The controller talks to a [`Console`] rather than to stdin/stdout directly so
//! the whole menu can be driven from a script in tests.

use crate::errors::Result;
use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented input and output.
pub trait Console {
    /// Shows `prompt` and reads one line without its line ending.
    ///
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Like [`Console::read_line`] but without echoing the input.
    fn read_password(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Writes `line` followed by a newline.
    fn write_line(&mut self, line: &str) -> Result<()>;
}

/// Shows `prompt` until the user types something other than whitespace.
///
/// Returns `None` at end of input.
pub fn ask<C: Console + ?Sized>(console: &mut C, prompt: &str) -> Result<Option<String>> {
    loop {
        match console.read_line(prompt)? {
            Some(line) if line.trim().is_empty() => {}
            Some(line) => return Ok(Some(line.trim().to_string())),
            None => return Ok(None),
        }
    }
}

/// Password counterpart of [`ask`]. The password is returned untrimmed.
pub fn ask_password<C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
) -> Result<Option<String>> {
    loop {
        match console.read_password(prompt)? {
            Some(password) if password.is_empty() => {}
            other => return Ok(other),
        }
    }
}

/// Reads one line from `reader` without its line ending, `None` at end of input.
fn read_input_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// The process terminal: stdin/stdout, with `rpassword` for hidden input.
///
/// When stdin is not a terminal (piped or redirected input) passwords are
/// read from stdin like any other line.
#[derive(Debug, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        read_input_line(&mut io::stdin().lock())
    }

    fn read_password(&mut self, prompt: &str) -> Result<Option<String>> {
        if !io::stdin().is_terminal() {
            return self.read_line(prompt);
        }

        match rpassword::prompt_password(prompt) {
            Ok(password) => Ok(Some(password)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::ScriptedConsole;

    #[test]
    fn test_ask_skips_blank_lines_and_trims() {
        let mut console = ScriptedConsole::new(["", "   ", "  alice "]);
        assert_eq!(ask(&mut console, "Username: ").unwrap().as_deref(), Some("alice"));
        assert_eq!(console.prompts().len(), 3);
    }

    #[test]
    fn test_ask_returns_none_at_end_of_input() {
        let mut console = ScriptedConsole::new([""]);
        assert_eq!(ask(&mut console, "Username: ").unwrap(), None);
    }

    #[test]
    fn test_read_input_line_strips_line_endings() {
        let mut input = io::Cursor::new("alice\r\npw123\nlast");
        assert_eq!(read_input_line(&mut input).unwrap().as_deref(), Some("alice"));
        assert_eq!(read_input_line(&mut input).unwrap().as_deref(), Some("pw123"));
        assert_eq!(read_input_line(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_input_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_ask_password_keeps_spaces() {
        let mut console = ScriptedConsole::new(["", " pw 123 "]);
        let password = ask_password(&mut console, "Password: ").unwrap();
        assert_eq!(password.as_deref(), Some(" pw 123 "));
    }
}
