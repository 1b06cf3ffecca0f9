//! Line-oriented terminal I/O

use crate::core::Prompter;
use std::io::{self, BufRead, Write};

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.output.write_all(b"\n")?;
        }
        self.output.flush()
    }

    /// Print `prompt` and read one line without its newline; `None` at end of input
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask for a form field; a blank answer keeps `current`
    pub fn field(&mut self, label: &str, current: &str) -> io::Result<Option<String>> {
        let prompt = if current.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{current}]: ")
        };
        Ok(self.read_line(&prompt)?.map(|answer| {
            if answer.trim().is_empty() {
                current.to_string()
            } else {
                answer
            }
        }))
    }
}

impl<R: BufRead, W: Write> Prompter for Terminal<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        match self.read_line(&format!("{message} [y/N] ")) {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Confirmation read failed");
                false
            }
        }
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        match self.read_line(&format!("{message} ")) {
            Ok(answer) => answer.filter(|a| !a.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Prompt read failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn term(input: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_field_keeps_current_on_blank() {
        let mut t = term("\nNew Name\n");
        assert_eq!(t.field("Name", "Old").unwrap().as_deref(), Some("Old"));
        assert_eq!(t.field("Name", "Old").unwrap().as_deref(), Some("New Name"));
        assert_eq!(t.field("Name", "Old").unwrap(), None);
        assert!(String::from_utf8_lossy(t.output()).contains("Name [Old]: "));
    }

    #[test]
    fn test_confirm_and_prompt() {
        let mut t = term("y\nno\n\nsecret1\n");
        assert!(t.confirm("Delete?"));
        assert!(!t.confirm("Delete?"));
        assert_eq!(t.prompt("Password:"), None);
        assert_eq!(t.prompt("Password:").as_deref(), Some("secret1"));
        assert!(!t.confirm("Delete?"));
    }
}
