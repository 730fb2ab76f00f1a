use ego_tree::{NodeId, NodeRef};
use reader_logging::reader_warn;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

use crate::dom::DocumentAccessor;

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// In-memory document parsed with html5ever, addressed through `DocumentAccessor`.
pub struct HtmlDocument {
    html: Html,
    location: String,
}

impl HtmlDocument {
    pub fn parse(html: &str, location: impl Into<String>) -> Self {
        Self {
            html: Html::parse_document(html),
            location: location.into(),
        }
    }

    /// Same tree, new location. Mirrors an SPA route change without a reload.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(node).and_then(ElementRef::wrap)
    }

    fn selector(marker: &str) -> Option<Selector> {
        match Selector::parse(marker) {
            Ok(selector) => Some(selector),
            Err(err) => {
                reader_warn!("Ignoring unparsable marker {:?}: {:?}", marker, err);
                None
            }
        }
    }
}

impl DocumentAccessor for HtmlDocument {
    type Node = NodeId;

    fn location(&self) -> &str {
        &self.location
    }

    fn document_title(&self) -> Option<String> {
        let selector = Self::selector("title")?;
        self.html
            .select(&selector)
            .next()
            .map(|title| title.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
    }

    fn find(&self, scope: Option<NodeId>, marker: &str) -> Option<NodeId> {
        let selector = Self::selector(marker)?;
        match scope {
            Some(scope) => self.element(scope)?.select(&selector).next().map(|el| el.id()),
            None => self.html.select(&selector).next().map(|el| el.id()),
        }
    }

    fn find_all(&self, scope: Option<NodeId>, marker: &str) -> Vec<NodeId> {
        let Some(selector) = Self::selector(marker) else {
            return Vec::new();
        };
        match scope {
            Some(scope) => match self.element(scope) {
                Some(root) => root.select(&selector).map(|el| el.id()).collect(),
                None => Vec::new(),
            },
            None => self.html.select(&selector).map(|el| el.id()).collect(),
        }
    }

    fn text(&self, node: NodeId) -> String {
        let Some(node) = self.html.tree.get(node) else {
            return String::new();
        };
        let mut renderer = TextRenderer::default();
        for child in node.children() {
            renderer.visit(child);
        }
        renderer.finish()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.value().attr(name).map(str::to_string)
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.element(node)
            .map(|el| el.value().name().to_ascii_lowercase())
            .unwrap_or_default()
    }

    fn ancestor_matches(&self, node: NodeId, marker: &str) -> bool {
        let Some(selector) = Self::selector(marker) else {
            return false;
        };
        let Some(node) = self.html.tree.get(node) else {
            return false;
        };
        node.ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| selector.matches(&ancestor))
    }
}

/// Approximates the browser's rendered text: block elements and `<br>` break
/// lines, whitespace inside a line collapses to single spaces.
#[derive(Default)]
struct TextRenderer {
    builder: String,
    last_char: Option<char>,
}

impl TextRenderer {
    fn visit(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Text(text) => self.append_text(text),
            Node::Element(element) => {
                let name = element.name();
                if SKIPPED_TAGS.contains(&name) {
                    return;
                }
                if name == "br" {
                    self.newline();
                    return;
                }
                let block = BLOCK_TAGS.contains(&name);
                if block {
                    self.newline();
                }
                for child in node.children() {
                    self.visit(child);
                }
                if block {
                    self.newline();
                }
            }
            _ => {
                for child in node.children() {
                    self.visit(child);
                }
            }
        }
    }

    fn append_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if self.last_char.is_none()
                    || self.last_char == Some(' ')
                    || self.last_char == Some('\n')
                {
                    continue;
                }
                self.push_char(' ');
            } else {
                self.push_char(ch);
            }
        }
    }

    fn newline(&mut self) {
        if self.last_char == Some(' ') {
            self.builder.pop();
            self.last_char = self.builder.chars().last();
        }
        if self.builder.is_empty() || self.last_char == Some('\n') {
            return;
        }
        self.push_char('\n');
    }

    fn push_char(&mut self, ch: char) {
        self.builder.push(ch);
        self.last_char = Some(ch);
    }

    fn finish(self) -> String {
        self.builder.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> HtmlDocument {
        HtmlDocument::parse(
            &format!("<html><head><title> Page </title></head><body>{body}</body></html>"),
            "/alice/status/1",
        )
    }

    #[test]
    fn rendered_text_breaks_blocks_and_collapses_spaces() {
        let doc = doc("<div id='root'><p>One   two</p><p>three<br>four <span>five</span></p><script>x()</script></div>");
        let root = doc.find(None, "#root").unwrap();
        assert_eq!(doc.text(root), "One two\nthree\nfour five");
    }

    #[test]
    fn find_all_is_scoped_and_ordered() {
        let doc = doc("<p class='x'>a</p><div id='s'><p class='x'>b</p><p class='x'>c</p></div>");
        let scope = doc.find(None, "#s").unwrap();
        let texts: Vec<String> = doc
            .find_all(Some(scope), ".x")
            .into_iter()
            .map(|n| doc.text(n))
            .collect();
        assert_eq!(texts, vec!["b", "c"]);
        assert_eq!(doc.find_all(None, ".x").len(), 3);
    }

    #[test]
    fn ancestor_matching_excludes_self() {
        let doc = doc("<nav><span id='inner'>x</span></nav><nav id='outer'>y</nav>");
        let inner = doc.find(None, "#inner").unwrap();
        let outer = doc.find(None, "#outer").unwrap();
        assert!(doc.ancestor_matches(inner, "nav"));
        assert!(!doc.ancestor_matches(outer, "nav"));
    }

    #[test]
    fn invalid_marker_matches_nothing() {
        let doc = doc("<p>a</p>");
        assert!(doc.find(None, "p[[").is_none());
        assert!(doc.find_all(None, "p[[").is_empty());
    }

    #[test]
    fn title_and_attributes_are_read() {
        let doc = doc("<a id='l' href='/bob'>Bob</a>");
        let link = doc.find(None, "#l").unwrap();
        assert_eq!(doc.document_title().as_deref(), Some("Page"));
        assert_eq!(doc.attribute(link, "href").as_deref(), Some("/bob"));
        assert_eq!(doc.attribute(link, "lang"), None);
        assert_eq!(doc.tag_name(link), "a");
    }
}
