//! Decoding of the start script the engine embeds in every replay.
//!
//! The replay decoder only depends on [`GameSpecificationDecoder`]; the
//! [`StartScriptDecoder`] here is the implementation used unless a caller
//! injects their own.

use spring_logging::Log;

mod errors;
mod parser;
mod section;

pub use errors::ScriptError;
pub use section::{Entry, GameSpecification, Section};

use parser::Parser;

/// Turns start script text into a [`GameSpecification`].
pub trait GameSpecificationDecoder: std::fmt::Debug {
    fn decode(&self, text: &str) -> Result<GameSpecification, ScriptError>;
}

/// Default decoder for the `[SECTION] { key=value; }` start script grammar.
#[derive(Clone, Copy, Debug, Default)]
pub struct StartScriptDecoder;

impl GameSpecificationDecoder for StartScriptDecoder {
    fn decode(&self, text: &str) -> Result<GameSpecification, ScriptError> {
        let sections = Parser::new(text).parse_document()?;

        tracing::trace!(
            target: Log::StartScript,
            sections = sections.len(),
            "Parsed start script"
        );

        GameSpecification::from_sections(text.to_string(), sections).ok_or(ScriptError::MissingGameSection)
    }
}
