/*!
 * HTML element categories relevant to flattening markup.
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Elements that never take a closing tag.
/// See https://developer.mozilla.org/en-US/docs/Glossary/Void_element
static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img",
        "input", "keygen", "link", "meta", "param", "source", "track", "wbr",
    ]
    .into_iter()
    .collect()
});

/// Elements that can occur inside a word without implying a word boundary.
/// Not strictly the inline elements of the HTML standard, more a list of
/// tags we expect to see used mid-word.
/// See https://developer.mozilla.org/en-US/docs/Web/Guide/HTML/Content_categories
static INLINE_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "abbr", "a", "b", "em", "i", "kbd", "mark", "math", "output", "q", "ruby", "small",
        "span", "strong", "sub", "sup", "time", "u", "var", "wbr", "ins", "del",
    ]
    .into_iter()
    .collect()
});

/// Whether `name` is a void element, expecting no closing tag.
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(name)
}

/// Whether `name` breaks a word, so flattened text needs a space around it.
pub fn is_block_element(name: &str) -> bool {
    !INLINE_ELEMENTS.contains(name)
}
