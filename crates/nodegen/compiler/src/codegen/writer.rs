// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.


//! Indenting source writer

use super::{GenerationError, GenerationResult};

/// Line-oriented writer for generated Rust source
#[derive(Debug)]
pub struct SourceWriter {
    buffer: String,
    level: usize,
    indent_width: usize,
    max_size: Option<usize>,
}

impl SourceWriter {
    /// Create a new writer indenting by `indent_width` spaces
    pub fn new(indent_width: usize) -> Self {
        SourceWriter {
            buffer: String::new(),
            level: 0,
            indent_width,
            max_size: None,
        }
    }

    /// Create a new writer with a maximum buffer size
    pub fn with_max_size(indent_width: usize, limit: usize) -> Self {
        SourceWriter {
            max_size: Some(limit),
            ..Self::new(indent_width)
        }
    }

    /// Write one line at the current indentation
    pub fn line(&mut self, text: impl AsRef<str>) -> GenerationResult<()> {
        let text = text.as_ref();
        let indent = if text.is_empty() { 0 } else { self.level * self.indent_width };
        let needed = indent + text.len() + 1;
        if let Some(limit) = self.max_size {
            if self.buffer.len() + needed > limit {
                return Err(GenerationError::OutputSizeLimitExceeded {
                    actual: self.buffer.len() + needed,
                    limit,
                });
            }
        }
        self.buffer.extend(std::iter::repeat_n(' ', indent));
        self.buffer.push_str(text);
        self.buffer.push('\n');
        Ok(())
    }

    /// Write several lines, each at the current indentation
    pub fn lines<I, S>(&mut self, lines: I) -> GenerationResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line)?;
        }
        Ok(())
    }

    /// Write a line and indent everything after it
    pub fn open(&mut self, text: impl AsRef<str>) -> GenerationResult<()> {
        self.line(text)?;
        self.level += 1;
        Ok(())
    }

    /// Dedent and write a closing line
    pub fn close(&mut self, text: impl AsRef<str>) -> GenerationResult<()> {
        self.level = self.level.saturating_sub(1);
        self.line(text)
    }

    /// Dedent, write a line and indent again, as for `} else {`
    pub fn reopen(&mut self, text: impl AsRef<str>) -> GenerationResult<()> {
        self.level = self.level.saturating_sub(1);
        self.open(text)
    }

    pub fn blank(&mut self) -> GenerationResult<()> {
        self.line("")
    }

    /// Write a `///` doc comment
    pub fn doc(&mut self, text: impl AsRef<str>) -> GenerationResult<()> {
        self.line(format!("/// {}", text.as_ref()))
    }

    /// Write a `//` comment
    pub fn comment(&mut self, text: impl AsRef<str>) -> GenerationResult<()> {
        self.line(format!("// {}", text.as_ref()))
    }

    /// Current indentation level
    pub fn level(&self) -> usize {
        self.level
    }

    /// Get current position in buffer
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Get current buffer size
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.level = 0;
    }

    /// Get the generated source
    pub fn into_string(self) -> String {
        self.buffer
    }
}
