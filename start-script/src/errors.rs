use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("start script has no top-level [GAME] section")]
    MissingGameSection,

    #[error("expected {expected} at byte {offset}, found {found:?}")]
    UnexpectedToken {
        expected: &'static str,
        found: char,
        offset: usize,
    },

    #[error("start script ended at byte {offset} while reading {context}")]
    UnexpectedEnd { offset: usize, context: &'static str },

    #[error("section [{name}] opened at byte {offset} is never closed")]
    UnterminatedSection { name: String, offset: usize },

    #[error("section opened at byte {offset} is nested too deeply")]
    NestingTooDeep { offset: usize },

    #[error("empty section name at byte {offset}")]
    EmptySectionName { offset: usize },

    #[error("empty key at byte {offset}")]
    EmptyKey { offset: usize },
}
