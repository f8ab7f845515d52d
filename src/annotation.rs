/*!
 * Token-annotated text as produced by the translation engine.
 *
 * An `AnnotatedText` is a flat string plus byte ranges describing how the
 * engine tokenized it: per-sentence word ranges, and the gaps between
 * sentences. The markup restoration pipeline walks these ranges in document
 * order and rebuilds an equivalent annotation over the HTML-augmented text.
 */

use serde::{Deserialize, Serialize};

/// Half-open `[begin, end)` range of bytes into an `AnnotatedText`'s text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    /// First byte of the range
    pub begin: usize,

    /// One past the last byte of the range
    pub end: usize,
}

impl ByteRange {
    /// Create a new byte range.
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Length of the range in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// Whether the range covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }
}

/// Text together with the engine's sentence and word segmentation.
///
/// The ranges cover the text contiguously in document order: the gap before
/// the first sentence, the first sentence's words, the gap between the first
/// and second sentence, and so on, ending with the whitespace after the last
/// sentence. There is always exactly one more gap than there are sentences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedText {
    /// The flat text all ranges index into
    pub text: String,

    /// Word ranges, one list per sentence
    sentences: Vec<Vec<ByteRange>>,

    /// Inter-sentence ranges: gap `i` precedes sentence `i`, the final gap
    /// holds any trailing whitespace
    gaps: Vec<ByteRange>,
}

impl Default for AnnotatedText {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotatedText {
    /// Create an empty text with no sentences and a single empty gap.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            sentences: Vec::new(),
            gaps: vec![ByteRange::new(0, 0)],
        }
    }

    /// Append a sentence: `prefix` extends the pending gap, then each token
    /// is recorded as one word of the new sentence.
    pub fn append_sentence(&mut self, prefix: &str, tokens: &[impl AsRef<str>]) {
        debug_assert_eq!(self.gaps.len(), self.sentences.len() + 1);

        self.text.push_str(prefix);
        if let Some(gap) = self.gaps.last_mut() {
            gap.end = self.text.len();
        }

        let mut words = Vec::with_capacity(tokens.len());
        for token in tokens {
            let begin = self.text.len();
            self.text.push_str(token.as_ref());
            words.push(ByteRange::new(begin, self.text.len()));
        }
        self.sentences.push(words);

        // Open the gap that trails this sentence.
        self.gaps.push(ByteRange::new(self.text.len(), self.text.len()));
    }

    /// Append whitespace after the last sentence, extending the final gap.
    pub fn append_ending_whitespace(&mut self, whitespace: &str) {
        self.text.push_str(whitespace);
        if let Some(gap) = self.gaps.last_mut() {
            gap.end = self.text.len();
        }
    }

    /// Number of sentences.
    pub fn num_sentences(&self) -> usize {
        self.sentences.len()
    }

    /// Number of words in the given sentence.
    pub fn num_words(&self, sentence: usize) -> usize {
        self.sentences[sentence].len()
    }

    /// Byte range of one word.
    pub fn word_range(&self, sentence: usize, word: usize) -> ByteRange {
        self.sentences[sentence][word]
    }

    /// Text of one word.
    pub fn word(&self, sentence: usize, word: usize) -> &str {
        let range = self.word_range(sentence, word);
        &self.text[range.begin..range.end]
    }

    /// Byte range of the gap preceding sentence `index`. Index
    /// `num_sentences()` addresses the trailing whitespace.
    pub fn gap_range(&self, index: usize) -> ByteRange {
        self.gaps[index]
    }

    /// Text of the gap preceding sentence `index`.
    pub fn gap(&self, index: usize) -> &str {
        let range = self.gap_range(index);
        &self.text[range.begin..range.end]
    }
}
