use url::Url;

/// Placeholder origin used to resolve bare paths and relative hrefs.
const PLACEHOLDER_BASE: &str = "https://reader.invalid/";

/// Path segment reserved by the platform for non-profile routes.
const RESERVED_SEGMENT: &str = "i";

const LONGFORM_SEGMENTS: &[&str] = &["article", "articles", "notes"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Dedicated long-form route, e.g. `/alice/article/123`.
    ArticleUrl,
    /// Single-item detail route, e.g. `/alice/status/123`.
    StatusUrl,
    Other,
}

/// Classification of the current location. Recomputed on every check since
/// the host can change its path without reloading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    segments: Vec<String>,
    kind: PageKind,
}

impl NavigationContext {
    /// Accepts a full URL or a bare path. Query and fragment are ignored.
    pub fn from_location(location: &str) -> Self {
        let segments = resolve(location)
            .map(|url| path_segments(&url))
            .unwrap_or_default();
        let kind = classify(&segments);
        Self { segments, kind }
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Profile handle that owns the item at this location, if the route names one.
    pub fn author_handle(&self) -> Option<&str> {
        if self.kind == PageKind::Other {
            return None;
        }
        self.segments
            .first()
            .map(String::as_str)
            .filter(|first| *first != RESERVED_SEGMENT)
    }
}

/// Handle named by a profile link such as `/alice` or `https://x.com/alice`.
pub fn handle_from_href(href: &str) -> Option<String> {
    let url = resolve(href)?;
    match path_segments(&url).as_slice() {
        [handle] if handle != RESERVED_SEGMENT => Some(handle.clone()),
        _ => None,
    }
}

fn resolve(location: &str) -> Option<Url> {
    let trimmed = location.trim();
    if let Ok(url) = Url::parse(trimmed) {
        if url.has_host() {
            return Some(url);
        }
    }
    Url::parse(PLACEHOLDER_BASE).ok()?.join(trimmed).ok()
}

fn path_segments(url: &Url) -> Vec<String> {
    url.path_segments()
        .map(|segments| {
            segments
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn classify(segments: &[String]) -> PageKind {
    let segment = |index: usize| segments.get(index).map(String::as_str);
    let is_id = |value: Option<&str>| {
        value.is_some_and(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()))
    };

    if segments.len() >= 3 && segment(1).is_some_and(|s| LONGFORM_SEGMENTS.contains(&s)) {
        return PageKind::ArticleUrl;
    }
    if segment(1) == Some("status") && is_id(segment(2)) {
        return PageKind::StatusUrl;
    }
    // `/i/web/status/<id>` carries no author segment.
    if segment(0) == Some(RESERVED_SEGMENT) && segment(2) == Some("status") && is_id(segment(3)) {
        return PageKind::StatusUrl;
    }
    PageKind::Other
}
