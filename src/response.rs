/*!
 * Translation engine response consumed by markup restoration.
 */

use serde::{Deserialize, Serialize};

use crate::annotation::AnnotatedText;

/// One sentence's soft alignment weights, indexed `[target_token][source_token]`.
///
/// Both axes include the explicit sentence-end token the engine appends.
pub type AlignmentMatrix = Vec<Vec<f32>>;

/// A finished translation: tokenized source and target text plus the
/// attention-based alignment scores linking them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The (plain text) input as the engine segmented it
    pub source: AnnotatedText,

    /// The translated output as the engine segmented it
    pub target: AnnotatedText,

    /// One soft alignment matrix per sentence
    pub alignments: Vec<AlignmentMatrix>,
}

impl Response {
    /// Whether alignment data is complete enough to transfer markup.
    ///
    /// Checked sentence by sentence: a sentence may be empty, and a model
    /// that did not produce alignments still emits a row per target word,
    /// just with no weights in it. So neither an empty `alignments` check
    /// nor a total-size check would do.
    pub fn has_alignments(&self) -> bool {
        if self.source.num_sentences() != self.target.num_sentences() {
            return false;
        }

        for sentence_idx in 0..self.target.num_sentences() {
            let matrix = match self.alignments.get(sentence_idx) {
                Some(matrix) => matrix,
                None => return false,
            };

            if matrix.len() != self.target.num_words(sentence_idx) {
                return false;
            }

            for row in matrix {
                if row.len() != self.source.num_words(sentence_idx) {
                    return false;
                }
            }
        }

        true
    }
}
