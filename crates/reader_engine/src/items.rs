//! Primitives over content items shared by classification and extraction.

use crate::dom::DocumentAccessor;
use crate::navigation::handle_from_href;
use crate::settings::Markers;
use crate::text::clean_text;

pub(crate) fn primary_region<D: DocumentAccessor>(doc: &D, markers: &Markers) -> Option<D::Node> {
    doc.find_first(None, &markers.primary_region)
}

/// Primary region, widened to the main landmark or the body when it is missing.
pub(crate) fn main_region<D: DocumentAccessor>(doc: &D, markers: &Markers) -> Option<D::Node> {
    doc.find_first(None, &markers.main_region)
}

pub(crate) fn is_quoted<D: DocumentAccessor>(doc: &D, node: D::Node, markers: &Markers) -> bool {
    doc.ancestor_matches(node, &markers.quoted)
}

/// Items in document order that are neither quoted nor nested in another item.
pub(crate) fn top_level_items<D: DocumentAccessor>(
    doc: &D,
    region: D::Node,
    markers: &Markers,
) -> Vec<D::Node> {
    doc.find_all(Some(region), &markers.item)
        .into_iter()
        .filter(|&item| {
            !doc.ancestor_matches(item, &markers.item) && !is_quoted(doc, item, markers)
        })
        .collect()
}

/// The focal item of a detail page, or the first top-level item.
pub(crate) fn main_item<D: DocumentAccessor>(
    doc: &D,
    region: D::Node,
    markers: &Markers,
) -> Option<D::Node> {
    doc.find_all(Some(region), &markers.main_item)
        .into_iter()
        .find(|&item| !is_quoted(doc, item, markers))
        .or_else(|| top_level_items(doc, region, markers).into_iter().next())
}

/// Item text elements below `scope` that do not belong to a quoted item.
pub(crate) fn text_nodes<D: DocumentAccessor>(
    doc: &D,
    scope: Option<D::Node>,
    markers: &Markers,
) -> Vec<D::Node> {
    doc.find_all(scope, &markers.item_text)
        .into_iter()
        .filter(|&node| !is_quoted(doc, node, markers))
        .collect()
}

/// Cleaned text of the item's own body, empty when it has none.
pub(crate) fn primary_text<D: DocumentAccessor>(doc: &D, item: D::Node, markers: &Markers) -> String {
    text_nodes(doc, Some(item), markers)
        .into_iter()
        .next()
        .map(|node| clean_text(&doc.text(node)))
        .unwrap_or_default()
}

/// Handle of the profile that posted `item`, read from its name block links.
pub(crate) fn item_author<D: DocumentAccessor>(
    doc: &D,
    item: D::Node,
    markers: &Markers,
) -> Option<String> {
    doc.find_all(Some(item), &markers.author_link)
        .into_iter()
        .filter(|&link| !is_quoted(doc, link, markers))
        .filter_map(|link| doc.attribute(link, "href"))
        .find_map(|href| handle_from_href(&href))
}

/// Top-level items in `region` posted by `handle` (case-insensitive).
pub(crate) fn items_by_author<D: DocumentAccessor>(
    doc: &D,
    region: D::Node,
    handle: &str,
    markers: &Markers,
) -> Vec<D::Node> {
    top_level_items(doc, region, markers)
        .into_iter()
        .filter(|&item| {
            item_author(doc, item, markers).is_some_and(|author| author.eq_ignore_ascii_case(handle))
        })
        .collect()
}
