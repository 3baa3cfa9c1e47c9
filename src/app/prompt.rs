use crate::utils::error::{Result, ToolError};
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Line-oriented console I/O over any reader/writer pair, so menus can be driven from tests.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

pub type StdPrompter = Prompter<std::io::StdinLock<'static>, std::io::Stdout>;

impl StdPrompter {
    pub fn stdio() -> Self {
        Prompter::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Trimmed line, or `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`ask`](Self::ask) but end of input is an error.
    pub fn ask_required(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt)?
            .ok_or_else(|| ToolError::validation("Input closed"))
    }

    /// Re-prompts until `parse` accepts the answer.
    pub fn ask_until<T, F>(&mut self, prompt: &str, mut parse: F) -> Result<T>
    where
        F: FnMut(&str) -> Result<T>,
    {
        loop {
            let answer = self.ask_required(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(format!("❌ {}", e))?,
            }
        }
    }

    /// Gives up after `max_attempts` rejected answers.
    pub fn ask_bounded<T, F>(&mut self, prompt: &str, max_attempts: usize, mut parse: F) -> Result<T>
    where
        F: FnMut(&str) -> Result<T>,
    {
        for attempt in 1..=max_attempts {
            let answer = self.ask_required(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(format!("❌ {} (Attempt {}/{})", e, attempt, max_attempts))?,
            }
        }
        Err(ToolError::validation(format!(
            "Maximum attempts reached for input: {}",
            prompt.trim()
        )))
    }

    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(matches!(
            self.ask(prompt)?.map(|a| a.to_lowercase()).as_deref(),
            Some("y") | Some("yes")
        ))
    }
}

#[cfg(test)]
pub(crate) fn scripted(input: &str) -> Prompter<std::io::Cursor<Vec<u8>>, Vec<u8>> {
    Prompter::new(std::io::Cursor::new(input.as_bytes().to_vec()), Vec::new())
}
