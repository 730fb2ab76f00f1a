use url::Url;

const PLACEHOLDER_BASE: &str = "https://reader.invalid/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No navigation seen yet.
    #[default]
    Idle,
    /// Waiting out the settle delay after a navigation.
    Settling,
    /// Checking the current page; no reader shown.
    Watching,
    /// A reader is shown for the current page.
    Offered,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    path: Option<String>,
    phase: Phase,
    no_content_reported: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionView {
    pub path: Option<String>,
    pub phase: Phase,
    pub reader_offered: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            path: self.path.clone(),
            phase: self.phase,
            reader_offered: self.phase == Phase::Offered,
        }
    }

    pub(crate) fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Whether a result for `path` still belongs to the current page.
    pub(crate) fn is_current(&self, path: &str) -> bool {
        self.path.as_deref() == Some(normalize_path(path).as_str())
    }

    pub(crate) fn navigate(&mut self, path: String) {
        self.path = Some(path);
        self.phase = Phase::Settling;
        self.no_content_reported = false;
    }

    /// Returns true the first time it is called for the current page.
    pub(crate) fn mark_no_content(&mut self) -> bool {
        !std::mem::replace(&mut self.no_content_reported, true)
    }
}

/// Canonical page path: query, fragment and trailing slash removed.
pub fn normalize_path(location: &str) -> String {
    let trimmed = location.trim();
    let parsed = Url::parse(trimmed)
        .ok()
        .filter(Url::has_host)
        .or_else(|| Url::parse(PLACEHOLDER_BASE).ok()?.join(trimmed).ok());

    let path = match parsed {
        Some(url) => url.path().to_string(),
        None => trimmed.to_string(),
    };
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_path;

    #[test]
    fn normalizes_urls_and_paths_alike() {
        assert_eq!(normalize_path("https://x.com/alice/status/1?s=20#m"), "/alice/status/1");
        assert_eq!(normalize_path("/alice/status/1/"), "/alice/status/1");
        assert_eq!(normalize_path("alice/status/1"), "/alice/status/1");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("https://x.com"), "/");
    }
}
