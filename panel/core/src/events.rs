//! Surface Events
//!
//! Events sent from the UI surface to the Panel. Surfaces report what the
//! user did; the Panel decides what it means.

use serde::{Deserialize, Serialize};

/// Events from UI Surface to Panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    // ============================================
    // Chat
    // ============================================
    /// Submit intent with the current input contents (untrimmed)
    Submit {
        /// Raw input text
        text: String,
    },

    /// An element inside the message log was activated.
    ///
    /// Reported once at log scope for anything clickable; `data` is the
    /// element's associated data (a page number for citation affordances).
    AffordanceActivated {
        /// Associated data of the activated element
        data: String,
    },

    // ============================================
    // Layout
    // ============================================
    /// Pointer pressed on the resizer handle
    DragStart {
        /// Pointer x position
        x: i32,
        /// Current viewer pane width
        current_width: i32,
    },

    /// Pointer moved (only meaningful while resizing)
    DragMove {
        /// Pointer x position
        x: i32,
    },

    /// Pointer released
    DragEnd,

    /// Sidebar toggle activated
    ToggleSidebar,
}
