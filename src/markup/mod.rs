/*!
 * HTML handling around translation.
 *
 * [`Html::parse`] strips the markup off a document and remembers where it
 * was as taint-annotated spans over the plain text. After translation,
 * [`Html::restore`] projects that markup onto the translated text through
 * the response's alignment data.
 */

mod elements;
mod html;
mod restore;
pub mod scanner;
pub mod taint;

pub use html::Html;
pub use restore::RestoreOutcome;
