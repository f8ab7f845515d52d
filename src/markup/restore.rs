/*!
 * Restoring markup onto translated text.
 *
 * The pipeline works in four steps: rebuild the source HTML from the scanned
 * spans (which yields a taint per source token as a side effect), resolve
 * the soft alignment matrices to one source token per target token, copy
 * taints across those alignments, and rebuild the target HTML from the
 * transferred taints.
 */

use log::{trace, warn};

use crate::annotation::{AnnotatedText, ByteRange};
use crate::markup::html::Html;
use crate::markup::taint::{diff_taint, Taint};
use crate::response::Response;

/// How a restore call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Markup was restored onto both source and target text
    Restored,

    /// Markup processing was disabled for this document; nothing to do
    NoMarkup,

    /// The response carries no usable alignments; the plain-text translation
    /// was left untouched
    AlignmentsUnavailable,
}

impl Html {
    /// Restore the scanned markup onto a finished translation.
    ///
    /// Rewrites `response.source` and `response.target` with HTML-augmented
    /// counterparts. Transferring tags needs complete alignment data; when
    /// that is missing the response stays untouched, so the caller still has
    /// the plain-text translation to fall back on.
    pub fn restore(&self, response: &mut Response) -> RestoreOutcome {
        if self.spans.is_empty() {
            return RestoreOutcome::NoMarkup;
        }

        if !response.has_alignments() {
            warn!("Response carries no usable alignments, keeping translation without markup");
            return RestoreOutcome::AlignmentsUnavailable;
        }

        // The source token taints fall out of rebuilding the source HTML.
        let mut source_taints: Vec<Taint> = Vec::new();
        let source = self.restore_source(&response.source, &mut source_taints);
        debug_assert_eq!(source_taints.len(), count_tokens(&response.source));

        let alignments = hard_alignments(response);

        // One empty taint up front, so every real token has a predecessor to
        // diff against.
        let mut target_taints: Vec<Taint> = Vec::with_capacity(count_tokens(&response.target) + 1);
        target_taints.push(Taint::new());
        copy_taint(response, &alignments, &source_taints, &mut target_taints);
        debug_assert_eq!(target_taints.len(), count_tokens(&response.target) + 1);

        if log::max_level() >= log::LevelFilter::Trace {
            trace_mapping(response, &alignments, &target_taints, self);
        }

        let target = self.restore_target(&response.target, &target_taints);

        response.source = source;
        response.target = target;
        RestoreOutcome::Restored
    }

    /// Rebuild the source text with its markup, collecting each token's
    /// taint along the way.
    fn restore_source(
        &self,
        input: &AnnotatedText,
        source_taints: &mut Vec<Taint>,
    ) -> AnnotatedText {
        // Starting the diff at the first span is safe: it is always empty.
        let mut prev_idx = 0usize;
        let mut span_idx = 0usize;

        apply(input, |range, token, last| {
            let mut html = encode_entities(token);
            let mut offset = 0usize;
            let whitespace_size = count_prefix_whitespace(token);

            // Closing tags go left of the token, opening tags right after
            // its leading whitespace. But once a span has opened a tag there,
            // a later span's closing tag has to land right of the whitespace
            // too, or it would wrap the wrong side of that opening tag.
            let mut close_left = true;

            // A token can stretch over several spans. Walk to the last span
            // overlapping this token, emitting tag differences as we go.
            loop {
                let (opening, closing) = diff_taint(
                    &self.spans[prev_idx].taint,
                    &self.spans[span_idx].taint,
                    &self.arena,
                );
                prev_idx = span_idx;

                for id in &closing {
                    let close_tag = self.arena.get(*id).close_text();
                    let at = offset + if close_left { 0 } else { whitespace_size };
                    html.insert_str(at, &close_tag);
                    offset += close_tag.len();
                }

                for id in &opening {
                    let open_tag = self.arena.get(*id).open_text();
                    html.insert_str(offset + whitespace_size, &open_tag);
                    offset += open_tag.len();
                    close_left = false;
                }

                if span_idx + 1 < self.spans.len()
                    && (self.spans[span_idx + 1].begin < range.end || last)
                {
                    span_idx += 1;
                    continue;
                }

                break;
            }

            // Only the last overlapping span's taint is kept for the token.
            // A token stretching over several spans loses the inner ones on
            // the target side, including any empty elements inside it.
            source_taints.push(self.spans[prev_idx].taint.clone());

            html
        })
    }

    /// Rebuild the target text with markup from the transferred taints.
    fn restore_target(&self, input: &AnnotatedText, target_taints: &[Taint]) -> AnnotatedText {
        let mut prev_idx = 0usize;
        let mut curr_idx = 1usize;

        let out = apply(input, |_range, token, last| {
            let mut html = encode_entities(token);
            let mut offset = 0usize;
            let whitespace_size = count_prefix_whitespace(token);

            debug_assert!(curr_idx < target_taints.len());
            let (opening, closing) = diff_taint(
                &target_taints[prev_idx],
                &target_taints[curr_idx],
                &self.arena,
            );

            for id in &closing {
                let close_tag = self.arena.get(*id).close_text();
                html.insert_str(offset, &close_tag);
                offset += close_tag.len();
            }

            for id in &opening {
                let open_tag = self.arena.get(*id).open_text();
                html.insert_str(offset + whitespace_size, &open_tag);
                offset += open_tag.len();
            }

            // The very last token closes whatever its own taint leaves open.
            if last {
                for id in target_taints[curr_idx].iter().rev() {
                    html.push_str(&self.arena.get(*id).close_text());
                }
            }

            prev_idx += 1;
            curr_idx += 1;
            html
        });

        debug_assert_eq!(curr_idx, target_taints.len());
        out
    }
}

/// Walk `input`'s tokens in document order (per sentence its leading gap
/// and words, then the ending whitespace), building a new annotated text
/// from whatever `fun` returns per token. The final call gets `last` set.
fn apply<F>(input: &AnnotatedText, mut fun: F) -> AnnotatedText
where
    F: FnMut(ByteRange, &str, bool) -> String,
{
    let mut out = AnnotatedText::new();

    for sentence_idx in 0..input.num_sentences() {
        let prefix = fun(input.gap_range(sentence_idx), input.gap(sentence_idx), false);

        let mut tokens = Vec::with_capacity(input.num_words(sentence_idx));
        for word_idx in 0..input.num_words(sentence_idx) {
            tokens.push(fun(
                input.word_range(sentence_idx, word_idx),
                input.word(sentence_idx, word_idx),
                false,
            ));
        }

        out.append_sentence(&prefix, &tokens);
    }

    let ending = fun(
        input.gap_range(input.num_sentences()),
        input.gap(input.num_sentences()),
        true,
    );
    out.append_ending_whitespace(&ending);

    out
}

/// Resolve soft attention weights to one source token per target token.
fn hard_alignments(response: &Response) -> Vec<Vec<usize>> {
    let mut alignments: Vec<Vec<usize>> = Vec::new();

    for sentence_idx in 0..response.target.num_sentences() {
        let matrix = &response.alignments[sentence_idx];
        let target_words = response.target.num_words(sentence_idx);
        let source_words = response.source.num_words(sentence_idx);
        let mut row: Vec<usize> = Vec::with_capacity(target_words);

        // Pick the strongest source token for each target token. The last
        // column is the sentence-end token, which only the target's own
        // sentence-end token may align with, so it is skipped here.
        for t in 0..target_words.saturating_sub(1) {
            let mut s_max = 0;
            for s in 1..source_words.saturating_sub(1) {
                if matrix[t][s] > matrix[t][s_max] {
                    s_max = s;
                }
            }
            row.push(s_max);
        }

        // Sub-word pieces of one word should carry one alignment: that of
        // the strongest piece. Looking at the directly preceding token is
        // enough, it has been through this same treatment already.
        if source_words > 0 {
            for t in 1..target_words.saturating_sub(1) {
                if !is_continuation(response.target.word(sentence_idx, t)) {
                    continue;
                }

                let curr_source = row[t];
                let prev_source = row[t - 1];
                let curr_score = matrix[t][curr_source];
                let prev_score = matrix[t - 1][prev_source];

                if curr_score > prev_score {
                    // The stronger pick wins; rewrite the word's earlier
                    // pieces back to its first token.
                    let mut i = t;
                    loop {
                        row[i] = curr_source;
                        if i == 0 || !is_continuation(response.target.word(sentence_idx, i)) {
                            break;
                        }
                        i -= 1;
                    }
                } else {
                    row[t] = prev_source;
                }
            }
        }

        // Sentence-end tokens always align with each other.
        row.push(source_words.saturating_sub(1));

        alignments.push(row);
    }

    alignments
}

/// Transfer each source token's taint to the target tokens aligned with it.
///
/// Pushes one taint per target token in the exact order `apply` walks them:
/// per sentence the leading gap and then the words, plus one final entry
/// for the ending whitespace.
fn copy_taint(
    response: &Response,
    alignments: &[Vec<usize>],
    source_taints: &[Taint],
    target_taints: &mut Vec<Taint>,
) {
    let mut offset = 0;

    for sentence_idx in 0..response.target.num_sentences() {
        // The sentence's leading gap keeps the taint of the source gap.
        target_taints.push(source_taints[offset].clone());

        for t in 0..response.target.num_words(sentence_idx) {
            let s = alignments[sentence_idx][t];
            target_taints.push(source_taints[offset + 1 + s].clone());
        }

        offset += response.source.num_words(sentence_idx) + 1;
    }

    debug_assert!(offset < source_taints.len());
    target_taints.push(source_taints[offset].clone());
}

/// All walkable tokens of a text: per sentence its leading gap and words,
/// plus the ending whitespace.
fn count_tokens(text: &AnnotatedText) -> usize {
    let mut tokens = 1;
    for sentence_idx in 0..text.num_sentences() {
        tokens += 1 + text.num_words(sentence_idx);
    }
    tokens
}

/// Escape the characters that would read as markup in restored output.
fn encode_entities(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(ch),
        }
    }
    output
}

/// Number of leading space bytes of a token. Engine tokens use plain spaces
/// for word boundaries, so only those count.
fn count_prefix_whitespace(input: &str) -> usize {
    input.bytes().take_while(|byte| *byte == b' ').count()
}

/// A token that continues the previous one rather than starting a new word.
fn is_continuation(token: &str) -> bool {
    !token.is_empty() && !token.starts_with(' ')
}

/// Dump which source token each target token mapped to, with the tag names
/// it inherited.
fn trace_mapping(
    response: &Response,
    alignments: &[Vec<usize>],
    target_taints: &[Taint],
    html: &Html,
) {
    let mut taints = target_taints.iter().skip(1);

    for sentence_idx in 0..response.target.num_sentences() {
        trace!(
            "Mapped sentence prefix with tags: {}",
            taint_names(taints.next(), html)
        );

        for word_idx in 0..response.target.num_words(sentence_idx) {
            let aligned = alignments[sentence_idx][word_idx];
            let source_word = if aligned < response.source.num_words(sentence_idx) {
                response.source.word(sentence_idx, aligned)
            } else {
                ""
            };
            trace!(
                "Mapped {:>10} to {:>10} with tags: {}",
                response.target.word(sentence_idx, word_idx),
                source_word,
                taint_names(taints.next(), html)
            );
        }
    }

    trace!(
        "Mapped end-of-input with tags: {}",
        taint_names(taints.next(), html)
    );
}

fn taint_names(taint: Option<&Taint>, html: &Html) -> String {
    taint
        .map(|ids| {
            ids.iter()
                .map(|id| format!("/{}", html.arena.get(*id).name))
                .collect()
        })
        .unwrap_or_default()
}
