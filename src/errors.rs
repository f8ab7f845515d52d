/*!
 * Error types for the retag library.
 *
 * This module contains the typed failures raised while scanning HTML markup,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while scanning HTML markup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// Error when the lexer hits input it cannot tokenize
    #[error("Invalid markup at byte {position}: {message}")]
    Syntax {
        /// Byte offset into the original input where lexing failed
        position: usize,
        /// What the lexer was looking for when it gave up
        message: String,
    },

    /// Error when a closing tag appears while no tag is open
    #[error("Encountered more closing tags (</{tag}>) than opening tags")]
    StrayClosingTag {
        /// Name of the offending closing tag
        tag: String,
    },

    /// Error when a closing tag does not match the innermost open tag
    #[error("Encountered unexpected closing tag </{tag}>, open tags are <{}>", .stack.join("> <"))]
    MismatchedClosingTag {
        /// Name of the offending closing tag
        tag: String,
        /// Names of the tags open at that point, outermost first
        stack: Vec<String>,
    },

    /// Error when the input ends with tags still open
    #[error("Not all tags were closed: <{}>", .stack.join("> <"))]
    UnclosedTags {
        /// Names of the tags left open, outermost first
        stack: Vec<String>,
    },
}
