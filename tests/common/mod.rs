/*!
 * Common test utilities for the retag test suite
 */

use retag::{AnnotatedText, Response};

/// Initializes logging for tests that want to inspect log output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Splits one sentence into engine-style tokens: every word keeps its single
/// leading space, trailing punctuation splits off into continuation tokens,
/// and an empty end-of-sentence token is appended the way a translation
/// engine emits one.
pub fn split_tokens(sentence: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in sentence.chars() {
        if ch == ' ' && !current.is_empty() {
            push_word(&mut tokens, std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        push_word(&mut tokens, current);
    }

    tokens.push(String::new());
    tokens
}

/// Pushes a word, peeling trailing punctuation off into tokens of their own
/// the way a subword vocabulary does.
fn push_word(tokens: &mut Vec<String>, word: String) {
    let stem = word.trim_end_matches(['.', ',', '!', '?', ';', ':']);
    if stem.is_empty() || stem.len() == word.len() {
        tokens.push(word);
        return;
    }

    let punctuation: Vec<String> = word[stem.len()..].chars().map(String::from).collect();
    tokens.push(word[..stem.len()].to_string());
    tokens.extend(punctuation);
}

/// Builds an annotated text over `text` as a single sentence, splitting off
/// leading and trailing spaces into the surrounding whitespace gaps.
pub fn annotate(text: &str) -> AnnotatedText {
    let body_start = text.len() - text.trim_start_matches(' ').len();
    let body_end = text.trim_end_matches(' ').len().max(body_start);

    let mut out = AnnotatedText::new();
    out.append_sentence(&text[..body_start], &split_tokens(&text[body_start..body_end]));
    out.append_ending_whitespace(&text[body_end..]);
    out
}

/// Builds an annotated text with one sentence per slice entry, joined by
/// single-space gaps.
pub fn annotate_sentences(sentences: &[&str], ending: &str) -> AnnotatedText {
    let mut out = AnnotatedText::new();
    for (idx, sentence) in sentences.iter().enumerate() {
        let prefix = if idx == 0 { "" } else { " " };
        out.append_sentence(prefix, &split_tokens(sentence));
    }
    out.append_ending_whitespace(ending);
    out
}

/// Fills in identity alignment matrices: target token `t` aligns with
/// source token `t` of the same sentence.
pub fn identity_alignments(response: &mut Response) {
    response.alignments = (0..response.target.num_sentences())
        .map(|sentence| {
            let target_words = response.target.num_words(sentence);
            let source_words = response.source.num_words(sentence);
            (0..target_words)
                .map(|t| {
                    (0..source_words)
                        .map(|s| if s == t { 1.0 } else { 0.0 })
                        .collect()
                })
                .collect()
        })
        .collect();
}

/// A finished single-sentence translation from `source` to `target` with
/// identity alignments, both given as flattened plain text.
pub fn make_response(source: &str, target: &str) -> Response {
    let mut response = Response {
        source: annotate(source),
        target: annotate(target),
        alignments: Vec::new(),
    };
    identity_alignments(&mut response);
    response
}
