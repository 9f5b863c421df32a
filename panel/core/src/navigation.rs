//! Navigation Bridge
//!
//! Keeps the document viewer's navigation target in sync with activated
//! citation affordances. The viewer understands a fragment of the form
//! `#page=N&view=Fit`; any fragment already on the target is replaced.

use tracing::debug;

/// Parse the data carried by an activated affordance
///
/// Only integer page numbers are accepted.
pub fn parse_page(data: &str) -> Option<i64> {
    data.trim().parse().ok()
}

/// Build the navigation target that shows `page`
pub fn page_target(current: &str, page: i64) -> String {
    let base = current.split_once('#').map_or(current, |(base, _)| base);
    format!("{base}#page={page}&view=Fit")
}

/// The document viewer's navigation state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewerTarget {
    target: String,
    page: Option<i64>,
}

impl ViewerTarget {
    /// Wrap the viewer's initial target
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            page: None,
        }
    }

    /// Current navigation target
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Last page navigated to
    pub fn page(&self) -> Option<i64> {
        self.page
    }

    /// Handle activation of an affordance carrying `data`
    ///
    /// Returns the new page when the data named one; malformed data leaves
    /// the target untouched.
    pub fn activate(&mut self, data: &str) -> Option<i64> {
        let Some(page) = parse_page(data) else {
            debug!(data = %data, "Ignoring activation without a page number");
            return None;
        };
        self.target = page_target(&self.target, page);
        self.page = Some(page);
        Some(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page("7"), Some(7));
        assert_eq!(parse_page(" 12 "), Some(12));
        assert_eq!(parse_page("seven"), None);
        assert_eq!(parse_page("3.5"), None);
        assert_eq!(parse_page(""), None);
    }

    #[test]
    fn test_page_target_without_fragment() {
        assert_eq!(
            page_target("/static/books/guide.pdf", 7),
            "/static/books/guide.pdf#page=7&view=Fit"
        );
    }

    #[test]
    fn test_page_target_replaces_fragment() {
        assert_eq!(
            page_target("/static/books/guide.pdf?dl=0#page=2&view=Fit", 7),
            "/static/books/guide.pdf?dl=0#page=7&view=Fit"
        );
    }

    #[test]
    fn test_activate_updates_target() {
        let mut viewer = ViewerTarget::new("https://example.com/doc.pdf#page=1&view=Fit");
        assert_eq!(viewer.activate("7"), Some(7));
        assert_eq!(viewer.target(), "https://example.com/doc.pdf#page=7&view=Fit");
        assert_eq!(viewer.page(), Some(7));
    }

    #[test]
    fn test_activate_malformed_is_ignored() {
        let mut viewer = ViewerTarget::new("/doc.pdf#page=2&view=Fit");
        assert_eq!(viewer.activate("not-a-page"), None);
        assert_eq!(viewer.target(), "/doc.pdf#page=2&view=Fit");
        assert_eq!(viewer.page(), None);
    }
}
