use super::Error;
use serde::Serialize;
use std::io::Write;

// A TOML report writer for the CLI, one table for each section
pub(crate) struct Logger<W: Write> {
    writer: W,
    empty: bool,
}

impl<W: Write> Logger<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer, empty: true }
    }

    pub(crate) fn section<S: Serialize>(&mut self, title: &str, s: &S) -> Result<(), Error> {
        let body = toml::to_string(s)?;
        if !self.empty {
            writeln!(self.writer)?;
        }
        self.empty = false;
        writeln!(self.writer, "[{title}]")?;
        write!(self.writer, "{body}")?;
        Ok(())
    }

    pub(crate) fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub(crate) fn flush(&mut self) -> Result<(), std::io::Error> {
        self.writer.flush()
    }
}
