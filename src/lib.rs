/*!
 * # retag - HTML markup restoration for machine translation
 *
 * A Rust library that lifts HTML markup off a document before translation
 * and projects it back onto the translated text afterwards, using the
 * attention-based alignments the translation engine produced.
 *
 * ## Features
 *
 * - Flatten an HTML document to the plain text a translation model expects
 * - Remember removed markup as taint-annotated spans over the plain text
 * - Resolve soft attention matrices into hard token alignments
 * - Transfer tags across alignments and rebuild valid HTML on both sides
 * - Fail fast on malformed markup, fall back gracefully when alignments
 *   are missing
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `annotation`: Plain text with sentence and token byte ranges
 * - `response`: The translation result markup is restored onto
 * - `markup`: Scanning, taint tracking and restoration:
 *   - `markup::scanner`: Pull lexer over HTML input
 *   - `markup::taint`: Tags, tag storage and taint diffing
 * - `errors`: Custom error types for malformed markup
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod annotation;
pub mod errors;
pub mod markup;
pub mod response;

// Re-export main types for easier usage
pub use annotation::{AnnotatedText, ByteRange};
pub use errors::MarkupError;
pub use markup::{Html, RestoreOutcome};
pub use response::{AlignmentMatrix, Response};
