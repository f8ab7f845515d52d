/*!
 * Tags, taints and spans: the bookkeeping the scanner leaves behind.
 *
 * Every opening tag encountered during a scan becomes one `Tag` record in a
 * per-document `TagArena`, addressed by a stable `TagId`. A `Taint` is the
 * stack of tags open at some point of the document, and a `Span` ties a
 * taint to the byte range of flattened text it governs. Identity comparisons
 * on `TagId` make matching a closing tag against "the same" opening tag
 * exact even when a document repeats tag names.
 */

/// One scanned element: name, serialized attributes, void flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Lowercased element name
    pub name: String,

    /// Attributes serialized in source order, each as ` name="value"`
    pub attributes: String,

    /// Whether this is a void element (no closing tag, never nests)
    pub is_void: bool,
}

impl Tag {
    /// Create a tag with no attributes yet.
    pub fn new(name: String, is_void: bool) -> Self {
        Self {
            name,
            attributes: String::new(),
            is_void,
        }
    }

    /// Serialize the opening tag, attributes included.
    pub fn open_text(&self) -> String {
        format!("<{}{}>", self.name, self.attributes)
    }

    /// Serialize the matching closing tag.
    pub fn close_text(&self) -> String {
        format!("</{}>", self.name)
    }
}

/// Handle to a `Tag` in its arena. Equality is tag identity, not name
/// equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagId(usize);

/// Owner of all `Tag` records created during one document scan.
#[derive(Debug, Default)]
pub struct TagArena {
    tags: Vec<Tag>,
}

impl TagArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a tag, returning its handle.
    pub fn alloc(&mut self, tag: Tag) -> TagId {
        self.tags.push(tag);
        TagId(self.tags.len() - 1)
    }

    /// Look up a tag by handle.
    pub fn get(&self, id: TagId) -> &Tag {
        &self.tags[id.0]
    }

    /// Append one attribute to a tag's serialized attribute string.
    pub fn append_attribute(&mut self, id: TagId, name: &str, value: &str) {
        let tag = &mut self.tags[id.0];
        tag.attributes.push(' ');
        tag.attributes.push_str(name);
        tag.attributes.push_str("=\"");
        tag.attributes.push_str(value);
        tag.attributes.push('"');
    }

    /// Number of tags allocated so far.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether no tags have been allocated.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// The stack of open tags governing a point of the document, outermost first.
pub type Taint = Vec<TagId>;

/// A byte range of flattened text and the taint that governs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// First byte of the range in the flattened text
    pub begin: usize,

    /// One past the last byte of the range
    pub end: usize,

    /// Tags open across this range, outermost first
    pub taint: Taint,
}

/// Compute the tag operations that turn taint `prev` into taint `curr`.
///
/// Returns `(opening, closing)`: `opening` holds `curr`'s tags beyond the
/// common prefix in nesting order, `closing` holds `prev`'s tags beyond the
/// common prefix in closing order (innermost first), with void tags dropped
/// since they were never left open.
pub fn diff_taint(prev: &Taint, curr: &Taint, arena: &TagArena) -> (Taint, Taint) {
    let mut common = 0;
    while common < prev.len() && common < curr.len() && prev[common] == curr[common] {
        common += 1;
    }

    let opening: Taint = curr[common..].to_vec();
    let closing: Taint = prev[common..]
        .iter()
        .rev()
        .filter(|id| !arena.get(**id).is_void)
        .copied()
        .collect();

    (opening, closing)
}
