use std::fmt::Debug;
use std::hash::Hash;

/// Read-only view over a document tree the engine does not own.
///
/// Markers are CSS selector strings. Implementations must treat a marker they
/// cannot interpret as matching nothing.
pub trait DocumentAccessor {
    /// Handle to one element. Only valid for the accessor that produced it.
    type Node: Copy + Eq + Hash + Debug;

    /// Current navigation location, either a full URL or a bare path.
    fn location(&self) -> &str;

    /// Trimmed text of the document `<title>`, if any.
    fn document_title(&self) -> Option<String>;

    /// First element matching `marker` below `scope` (or anywhere when `None`).
    fn find(&self, scope: Option<Self::Node>, marker: &str) -> Option<Self::Node>;

    /// Every element matching `marker` below `scope`, in document order.
    fn find_all(&self, scope: Option<Self::Node>, marker: &str) -> Vec<Self::Node>;

    /// Rendered text of `node`, with line breaks between block-level content.
    fn text(&self, node: Self::Node) -> String;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;

    /// Lowercase element name.
    fn tag_name(&self, node: Self::Node) -> String;

    /// Whether any proper ancestor of `node` matches `marker`.
    fn ancestor_matches(&self, node: Self::Node, marker: &str) -> bool;

    /// First hit over an ordered list of markers.
    fn find_first<S: AsRef<str>>(&self, scope: Option<Self::Node>, markers: &[S]) -> Option<Self::Node> {
        markers
            .iter()
            .find_map(|marker| self.find(scope, marker.as_ref()))
    }
}
