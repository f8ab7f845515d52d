/*!
 * Scanning markup out of a document.
 *
 * `Html::parse` flattens an HTML string into the plain text the translation
 * engine gets to see, while keeping every tag and the byte ranges it governed
 * as spans. The matching `Html::restore` in the restore module puts the tags
 * back onto the translated text.
 */

use log::debug;

use crate::errors::MarkupError;
use crate::markup::elements::{is_block_element, is_void_element};
use crate::markup::scanner::{Event, Scanner};
use crate::markup::taint::{Span, Tag, TagArena, TagId, Taint};

/// The markup scanned out of one document, ready to be restored onto its
/// translation.
#[derive(Debug, Default)]
pub struct Html {
    pub(crate) arena: TagArena,
    pub(crate) spans: Vec<Span>,
}

impl Html {
    /// Scan the markup out of `source`, leaving the flattened plain text in
    /// its place.
    ///
    /// With `process_markup` false nothing is scanned, `source` stays as it
    /// is, and restoring through the returned `Html` is a no-op. On error
    /// `source` is also left untouched.
    pub fn parse(source: &mut String, process_markup: bool) -> Result<Html, MarkupError> {
        if !process_markup {
            return Ok(Html::default());
        }

        let original = std::mem::take(source);
        match scan(&original) {
            Ok((arena, spans, plain)) => {
                debug!(
                    "Scanned {} bytes of markup into {} bytes of plain text, {} spans, {} tags",
                    original.len(),
                    plain.len(),
                    spans.len(),
                    arena.len()
                );
                *source = plain;
                Ok(Html { arena, spans })
            }
            Err(error) => {
                *source = original;
                Err(error)
            }
        }
    }

    /// Whether a scan pass ran for this document. False only when markup
    /// processing was disabled at parse time.
    pub fn has_markup(&self) -> bool {
        !self.spans.is_empty()
    }
}

type ScanOutput = (TagArena, Vec<Span>, String);

/// Drive the lexer over `input`, maintaining the open-tag stack and emitting
/// one span per text run and per tag boundary that needs one.
fn scan(input: &str) -> Result<ScanOutput, MarkupError> {
    let mut scanner = Scanner::new(input);
    let mut arena = TagArena::new();
    let mut spans: Vec<Span> = Vec::new();
    let mut stack: Taint = Vec::new();
    let mut plain = String::new();
    let mut current_tag: Option<TagId> = None;

    spans.push(Span {
        begin: 0,
        end: 0,
        taint: Vec::new(),
    });

    loop {
        match scanner.next_event()? {
            Event::Eof => break,

            Event::Text(text) => {
                let begin = plain.len();
                plain.push_str(&text);
                spans.push(Span {
                    begin,
                    end: plain.len(),
                    taint: stack.clone(),
                });

                // Void tags applied to the span just recorded; they must not
                // leak into later spans' taints.
                stack.retain(|id| !arena.get(*id).is_void);
            }

            Event::TagStart { name } => {
                // A word-breaking element has to break the word in the
                // flattened text too, or the engine sees "foobar" where the
                // page showed "foo bar".
                if is_block_element(&name) && !plain.is_empty() && !plain.ends_with(' ') {
                    plain.push(' ');
                }

                let is_void = is_void_element(&name);
                let id = arena.alloc(Tag::new(name.into_owned(), is_void));
                current_tag = Some(id);
                stack.push(id);

                // A void element governs no text; record it on an empty span
                // and take it off the stack right away.
                if is_void {
                    spans.push(Span {
                        begin: plain.len(),
                        end: plain.len(),
                        taint: stack.clone(),
                    });
                    stack.pop();
                }
            }

            Event::Attribute { name, value } => {
                debug_assert!(current_tag.is_some());
                if let Some(id) = current_tag {
                    arena.append_attribute(id, &name, &value);
                }
            }

            Event::TagEnd { name } => {
                // A void element is popped when its opening tag is handled,
                // so a real `</br>` or the synthesized end of `<img/>` has
                // nothing left to close.
                if is_void_element(&name) {
                    continue;
                }

                let top = match stack.last() {
                    Some(id) => *id,
                    None => {
                        return Err(MarkupError::StrayClosingTag {
                            tag: name.into_owned(),
                        });
                    }
                };

                if arena.get(top).name != name.as_ref() {
                    return Err(MarkupError::MismatchedClosingTag {
                        tag: name.into_owned(),
                        stack: tag_names(&stack, &arena),
                    });
                }

                // An element closed before it governed any text (as in
                // "<u></u>") would vanish without a trace; record it on an
                // empty span so it still round-trips.
                if spans.last().map_or(true, |span| !span.taint.contains(&top)) {
                    spans.push(Span {
                        begin: plain.len(),
                        end: plain.len(),
                        taint: stack.clone(),
                    });
                }

                stack.pop();
            }
        }
    }

    if !stack.is_empty() {
        return Err(MarkupError::UnclosedTags {
            stack: tag_names(&stack, &arena),
        });
    }

    // Trailing sentinel past the end of the text: the token walk only
    // reaches it at the very last token, once every tag is closed.
    spans.push(Span {
        begin: plain.len() + 1,
        end: plain.len() + 1,
        taint: stack,
    });

    Ok((arena, spans, plain))
}

fn tag_names(stack: &Taint, arena: &TagArena) -> Vec<String> {
    stack.iter().map(|id| arena.get(*id).name.clone()).collect()
}
