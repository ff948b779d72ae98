//! Reader for the engine's start script grammar:
//!
//! ```text
//! [GAME]
//! {
//!     mapname=Comet Catcher Redux;   // comments run to end of line
//!     [PLAYER0]
//!     {
//!         name=someone;
//!     }
//! }
//! ```
//!
//! Only top-level sections are allowed at the outermost level. Values run up
//! to the next `;` and may contain anything but a newline, so `//` inside a
//! value (URLs, mostly) is kept.

use crate::errors::ScriptError;
use crate::section::{Entry, Section};

/// Deepest `[NAME]{` nesting accepted. Real scripts never go past three.
pub(crate) const MAX_DEPTH: usize = 64;

pub(crate) struct Parser<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, pos: 0, depth: 0 }
    }

    /// Parses the whole text into its top-level sections.
    pub(crate) fn parse_document(mut self) -> Result<Vec<Section>, ScriptError> {
        let mut sections = Vec::new();

        loop {
            self.skip_trivia();

            match self.peek() {
                None => return Ok(sections),
                Some(b'[') => sections.push(self.parse_section()?),
                Some(_) => return Err(self.unexpected("'['")),
            }
        }
    }

    fn parse_section(&mut self) -> Result<Section, ScriptError> {
        let open = self.pos;
        if self.depth == MAX_DEPTH {
            return Err(ScriptError::NestingTooDeep { offset: open });
        }

        self.depth += 1;
        self.pos += 1;

        let name_end = self.text[self.pos..]
            .find(|c: char| c == ']' || c == '\n')
            .map(|i| self.pos + i)
            .ok_or(ScriptError::UnexpectedEnd {
                offset: self.text.len(),
                context: "a section name",
            })?;

        if self.text.as_bytes()[name_end] != b']' {
            self.pos = name_end;
            return Err(self.unexpected("']'"));
        }

        let name = self.text[self.pos..name_end].trim();
        if name.is_empty() {
            return Err(ScriptError::EmptySectionName { offset: open });
        }

        let mut section = Section::new(name);
        self.pos = name_end + 1;

        self.skip_trivia();
        match self.peek() {
            Some(b'{') => self.pos += 1,
            Some(_) => return Err(self.unexpected("'{'")),
            None => {
                return Err(ScriptError::UnterminatedSection {
                    name: section.name,
                    offset: open,
                });
            },
        }

        loop {
            self.skip_trivia();

            match self.peek() {
                None => {
                    return Err(ScriptError::UnterminatedSection {
                        name: section.name,
                        offset: open,
                    });
                },

                Some(b'}') => {
                    self.pos += 1;
                    self.depth -= 1;
                    return Ok(section);
                },

                Some(b'[') => section.sections.push(self.parse_section()?),

                Some(_) => section.entries.push(self.parse_entry()?),
            }
        }
    }

    fn parse_entry(&mut self) -> Result<Entry, ScriptError> {
        let start = self.pos;

        let eq = loop {
            match self.peek() {
                Some(b'=') => break self.pos,
                Some(b';' | b'{' | b'}' | b'[' | b']' | b'\n') => return Err(self.unexpected("'='")),
                Some(_) => self.pos += 1,
                None => {
                    return Err(ScriptError::UnexpectedEnd {
                        offset: self.pos,
                        context: "a key",
                    });
                },
            }
        };

        let key = self.text[start..eq].trim();
        if key.is_empty() {
            return Err(ScriptError::EmptyKey { offset: start });
        }

        self.pos = eq + 1;
        let value_start = self.pos;

        let semicolon = loop {
            match self.peek() {
                Some(b';') => break self.pos,
                Some(b'\n') => return Err(self.unexpected("';'")),
                Some(_) => self.pos += 1,
                None => {
                    return Err(ScriptError::UnexpectedEnd {
                        offset: self.pos,
                        context: "a value",
                    });
                },
            }
        };

        let value = self.text[value_start..semicolon].trim();
        self.pos = semicolon + 1;

        Ok(Entry {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Skips whitespace and `//` line comments.
    fn skip_trivia(&mut self) {
        loop {
            let rest = &self.text[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if !trimmed.starts_with("//") {
                return;
            }

            self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
        }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn unexpected(&self, expected: &'static str) -> ScriptError {
        ScriptError::UnexpectedToken {
            expected,
            found: self.text[self.pos..].chars().next().unwrap_or('\0'),
            offset: self.pos,
        }
    }
}
