//! Sidebar toggle

/// Show/hide state of the sidebar and its toggle label
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SidebarToggle {
    collapsed: bool,
}

impl SidebarToggle {
    /// Create with an initial state
    pub fn new(collapsed: bool) -> Self {
        Self { collapsed }
    }

    /// Whether the sidebar is hidden
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Label for the toggle control
    pub fn label(&self) -> &'static str {
        if self.collapsed {
            "Show Sidebar"
        } else {
            "Hide Sidebar"
        }
    }

    /// Flip visibility; returns the new collapsed state
    pub fn toggle(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_label() {
        let mut sidebar = SidebarToggle::default();
        assert_eq!(sidebar.label(), "Hide Sidebar");
        assert!(sidebar.toggle());
        assert_eq!(sidebar.label(), "Show Sidebar");
        assert!(!sidebar.toggle());
        assert_eq!(sidebar.label(), "Hide Sidebar");
    }
}
