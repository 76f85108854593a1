use super::{ACCENT_STYLE, Console, ERROR_STYLE, Key, RESET, UIError};
use crate::registry::{ValidationError, is_cancel_keyword};

/// Result of a prompt that the operator may abandon with a cancel keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer<T> {
    Value(T),
    Cancelled,
}

/// Free-text prompts drawn below the current screen.
pub struct Prompt {
    question_color: String,
    error_color: String,
}

impl Default for Prompt {
    fn default() -> Self {
        Self {
            question_color: ACCENT_STYLE.to_string(),
            error_color: ERROR_STYLE.to_string(),
        }
    }
}

impl Prompt {
    /// Ask once and return the trimmed reply.
    pub fn input<C: Console + ?Sized>(&self, console: &mut C, question: &str) -> Result<String, UIError> {
        write!(console, "{}{}:{} ", self.question_color, question, RESET)?;
        console.flush()?;
        Ok(console.read_line()?.trim().to_string())
    }

    /// Print an inline error line.
    pub fn error<C: Console + ?Sized>(&self, console: &mut C, message: &str) -> Result<(), UIError> {
        writeln!(console, "{}✗ {}{}", self.error_color, message, RESET)?;
        Ok(())
    }

    /// Ask until `parse` accepts the reply or the operator types a cancel keyword.
    /// Each rejection is reported inline before asking again.
    pub fn validated_input<C, T, F>(&self, console: &mut C, question: &str, mut parse: F) -> Result<Answer<T>, UIError>
    where
        C: Console + ?Sized,
        F: FnMut(&str) -> Result<T, ValidationError>,
    {
        loop {
            let reply = self.input(console, question)?;
            if is_cancel_keyword(&reply) {
                return Ok(Answer::Cancelled);
            }
            match parse(&reply) {
                Ok(value) => return Ok(Answer::Value(value)),
                Err(err) => self.error(console, &err.to_string())?,
            }
        }
    }

    /// Ask a y/yes or n/no question, repeating on any other reply.
    pub fn yes_no<C: Console + ?Sized>(&self, console: &mut C, question: &str) -> Result<Answer<bool>, UIError> {
        loop {
            let reply = self.input(console, &format!("{} (y/n)", question))?.to_ascii_lowercase();
            match reply.as_str() {
                "y" | "yes" => return Ok(Answer::Value(true)),
                "n" | "no" => return Ok(Answer::Value(false)),
                _ if is_cancel_keyword(&reply) => return Ok(Answer::Cancelled),
                _ => self.error(console, "Please answer 'y' or 'n'")?,
            }
        }
    }

    /// Destructive-action gate: true only when the reply is `yes`.
    pub fn typed_confirmation<C: Console + ?Sized>(&self, console: &mut C, question: &str, ignore_case: bool) -> Result<bool, UIError> {
        let reply = self.input(console, &format!("{} Type 'yes' to confirm", question))?;
        Ok(if ignore_case { reply.eq_ignore_ascii_case("yes") } else { reply == "yes" })
    }

    /// Show a message and wait for any key.
    pub fn pause<C: Console + ?Sized>(&self, console: &mut C, message: &str) -> Result<Key, UIError> {
        writeln!(console, "{}", message)?;
        write!(console, "{}Press any key to continue...{}", self.question_color, RESET)?;
        console.flush()?;
        let key = console.read_key()?;
        writeln!(console)?;
        Ok(key)
    }
}

#[cfg(test)]
#[path = "../test/ui/prompt.rs"]
mod tests;
