/*!
 * Tests for markup error formatting
 */

use retag::MarkupError;

#[test]
fn test_markupError_syntax_shouldDisplayPositionAndMessage() {
    let error = MarkupError::Syntax {
        position: 12,
        message: "unterminated comment".to_string(),
    };
    assert_eq!(
        format!("{}", error),
        "Invalid markup at byte 12: unterminated comment"
    );
}

#[test]
fn test_markupError_strayClosingTag_shouldDisplayTagName() {
    let error = MarkupError::StrayClosingTag {
        tag: "b".to_string(),
    };
    assert_eq!(
        format!("{}", error),
        "Encountered more closing tags (</b>) than opening tags"
    );
}

#[test]
fn test_markupError_mismatchedClosingTag_shouldDisplayOpenTags() {
    let error = MarkupError::MismatchedClosingTag {
        tag: "i".to_string(),
        stack: vec!["p".to_string(), "b".to_string()],
    };
    assert_eq!(
        format!("{}", error),
        "Encountered unexpected closing tag </i>, open tags are <p> <b>"
    );
}

#[test]
fn test_markupError_unclosedTags_shouldDisplayRemainingStack() {
    let error = MarkupError::UnclosedTags {
        stack: vec!["div".to_string(), "b".to_string()],
    };
    assert_eq!(
        format!("{}", error),
        "Not all tags were closed: <div> <b>"
    );
}

#[test]
fn test_markupError_equality_shouldCompareByValue() {
    let a = MarkupError::StrayClosingTag {
        tag: "b".to_string(),
    };
    let b = MarkupError::StrayClosingTag {
        tag: "b".to_string(),
    };
    let c = MarkupError::StrayClosingTag {
        tag: "i".to_string(),
    };
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.clone(), b);
}
