use serde::Serialize;

use super::error::CommandError;

/// Writes command results either as text or as pretty JSON
pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn emit<T, F>(&self, value: &T, human: F) -> Result<(), CommandError>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> String,
    {
        println!("{}", self.render(value, human)?);
        Ok(())
    }

    pub fn render<T, F>(&self, value: &T, human: F) -> Result<String, CommandError>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> String,
    {
        if self.json {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(human())
        }
    }

    /// Status lines are suppressed in JSON mode
    pub fn note(&self, message: impl AsRef<str>) {
        if !self.json {
            println!("{}", message.as_ref());
        }
    }
}
