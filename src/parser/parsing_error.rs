//! Error types for the Newick parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting grammar errors found while scanning a Newick string.

use crate::parser::byte_parser::ByteParser;
use thiserror::Error;

/// Number of bytes of context taken on each side of the offending character
pub const DEFAULT_CONTEXT_RADIUS: usize = 20;

/// Marker inserted into the context right after the offending character
pub const ERROR_MARKER: &str = "[ERROR HERE]";

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================€=
/// Kinds of grammar errors, named after the automaton state at failure.
#[derive(Error, PartialEq, Eq, Debug, Clone, Copy)]
pub enum ParsingErrorType {
    /// Input ended inside a quoted name.
    #[error("unterminated quoted name")]
    UnterminatedQuote,
    /// Input ended inside a `{...}` annotation.
    #[error("unterminated annotation")]
    UnterminatedAnnotation,
    /// A `,` or `)` without matching `(`, or a `(` never closed.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    /// A character not allowed in the current state, e.g. a quote in the
    /// middle of a name.
    #[error("stray character")]
    StrayCharacter,
    /// A second annotation on one node, or `{` inside an annotation.
    #[error("reopened annotation")]
    ReopenedAnnotation,
    /// A name immediately followed by `(`.
    #[error("name followed by opening parenthesis")]
    NameBeforeOpening,
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Grammar error with the offending position and surrounding text.
///
/// The context is advisory: use [kind](Self::kind) to branch on the cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: unexpected {found:?} at position {position} in '{context}'")]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    found: Option<char>,
    context: String,
}

impl ParsingError {
    /// Creates a [ParsingError] for the byte at `position` of the parser input.
    pub fn at(kind: ParsingErrorType, parser: &ByteParser<'_>, position: usize) -> Self {
        Self {
            kind,
            position,
            found: parser.char_at(position),
            context: parser.context_around(position, DEFAULT_CONTEXT_RADIUS, ERROR_MARKER),
        }
    }

    /// Creates a [ParsingError] for the byte that was just consumed.
    pub fn at_last(kind: ParsingErrorType, parser: &ByteParser<'_>) -> Self {
        Self::at(kind, parser, parser.position().saturating_sub(1))
    }

    /// Get the error kind
    pub fn kind(&self) -> ParsingErrorType {
        self.kind
    }

    /// Get the byte offset where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the offending character, if the input was not empty
    pub fn found(&self) -> Option<char> {
        self.found
    }

    /// Get the surrounding text including the [ERROR_MARKER]
    pub fn context(&self) -> &str {
        &self.context
    }
}
