/*!
 * Tests for scanning markup out of documents
 */

use retag::{Html, MarkupError};

fn flatten(input: &str) -> String {
    let mut source = input.to_string();
    Html::parse(&mut source, true).unwrap();
    source
}

fn parse_err(input: &str) -> (MarkupError, String) {
    let mut source = input.to_string();
    let error = Html::parse(&mut source, true).unwrap_err();
    (error, source)
}

#[test]
fn test_htmlParse_withInlineMarkup_shouldFlattenText() {
    assert_eq!(flatten("<p>Hi <b>you</b></p>"), "Hi you");
}

#[test]
fn test_htmlParse_withBlockElements_shouldBreakWords() {
    assert_eq!(flatten("<div>foo</div><div>bar</div>"), "foo bar");
}

#[test]
fn test_htmlParse_withInlineSiblings_shouldNotBreakWords() {
    assert_eq!(flatten("<b>foo</b><i>bar</i>"), "foobar");
}

#[test]
fn test_htmlParse_withNestedList_shouldBreakBetweenItems() {
    assert_eq!(flatten("<ul><li>One</li><li>Two</li></ul>"), "One Two");
}

#[test]
fn test_htmlParse_withVoidElements_shouldAcceptAnySpelling() {
    // "<br>", "<img/>" and even a stray "</br>" are all fine.
    assert_eq!(flatten("a<br>b<img/>c</br>"), "a b c");
}

#[test]
fn test_htmlParse_withComment_shouldDropIt() {
    assert_eq!(flatten("x<!-- hidden <b> -->y"), "xy");
}

#[test]
fn test_htmlParse_withEntities_shouldDecodeThem() {
    assert_eq!(flatten("<p>fish &amp; chips</p>"), "fish & chips");
}

#[test]
fn test_htmlParse_withEmptyInput_shouldSucceed() {
    let mut source = String::new();
    let html = Html::parse(&mut source, true).unwrap();
    assert_eq!(source, "");
    assert!(html.has_markup());
}

#[test]
fn test_htmlParse_withMarkupDisabled_shouldSkipScanning() {
    let mut source = "a <b> b".to_string();
    let html = Html::parse(&mut source, false).unwrap();
    assert_eq!(source, "a <b> b");
    assert!(!html.has_markup());
}

#[test]
fn test_htmlParse_withStrayClosingTag_shouldFail() {
    let (error, source) = parse_err("text</b>");
    assert_eq!(
        error,
        MarkupError::StrayClosingTag {
            tag: "b".to_string(),
        }
    );
    // The input is handed back untouched so the caller can decide what to
    // do with the document.
    assert_eq!(source, "text</b>");
}

#[test]
fn test_htmlParse_withMismatchedClosingTag_shouldFail() {
    let (error, source) = parse_err("<p><b>x</p>");
    assert_eq!(
        error,
        MarkupError::MismatchedClosingTag {
            tag: "p".to_string(),
            stack: vec!["p".to_string(), "b".to_string()],
        }
    );
    assert_eq!(source, "<p><b>x</p>");
}

#[test]
fn test_htmlParse_withUnclosedTags_shouldFail() {
    let (error, source) = parse_err("<div><b>x");
    assert_eq!(
        error,
        MarkupError::UnclosedTags {
            stack: vec!["div".to_string(), "b".to_string()],
        }
    );
    assert_eq!(source, "<div><b>x");
}

#[test]
fn test_htmlParse_withUnterminatedComment_shouldFail() {
    let (error, source) = parse_err("text<!-- never closed");
    assert_eq!(
        error,
        MarkupError::Syntax {
            position: 4,
            message: "unterminated comment".to_string(),
        }
    );
    assert_eq!(source, "text<!-- never closed");
}
