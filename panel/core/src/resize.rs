//! Drag Resize Controller
//!
//! Two-state machine for resizing the viewer pane with the pointer. The pane
//! sits to the right of the handle, so dragging left makes it wider.
//!
//! `max_width` is fixed when the controller is built from the viewport
//! width and is not recomputed if the viewport later changes.

/// Controller state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragState {
    /// No gesture in progress
    Idle,
    /// Pointer is down on the handle
    Resizing {
        /// Pointer x at drag start
        anchor_x: i32,
        /// Pane width at drag start
        anchor_width: i32,
    },
}

/// Width bounds and state for one resizable pane
#[derive(Clone, Debug)]
pub struct DragResizer {
    state: DragState,
    min_width: i32,
    max_width: i32,
}

impl DragResizer {
    /// Create with explicit bounds
    pub fn new(min_width: i32, max_width: i32) -> Self {
        Self {
            state: DragState::Idle,
            min_width,
            max_width,
        }
    }

    /// Bounds derived from the viewport: `max = viewport - reserved_margin`
    pub fn for_viewport(viewport_width: i32, min_width: i32, reserved_margin: i32) -> Self {
        Self::new(min_width, viewport_width - reserved_margin)
    }

    /// Current state
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether a drag is in progress
    pub fn is_resizing(&self) -> bool {
        matches!(self.state, DragState::Resizing { .. })
    }

    /// Lower bound (exclusive)
    pub fn min_width(&self) -> i32 {
        self.min_width
    }

    /// Upper bound (exclusive)
    pub fn max_width(&self) -> i32 {
        self.max_width
    }

    /// Pointer pressed on the handle
    pub fn begin(&mut self, x: i32, current_width: i32) {
        self.state = DragState::Resizing {
            anchor_x: x,
            anchor_width: current_width,
        };
    }

    /// Pointer moved; returns the width to apply, if any
    ///
    /// Candidates outside `(min_width, max_width)` are dropped and the pane
    /// keeps its width for this move.
    pub fn drag(&mut self, x: i32) -> Option<i32> {
        let DragState::Resizing {
            anchor_x,
            anchor_width,
        } = self.state
        else {
            return None;
        };

        let dx = x - anchor_x;
        let candidate = anchor_width - dx;
        (candidate > self.min_width && candidate < self.max_width).then_some(candidate)
    }

    /// Pointer released; returns true if a drag was in progress
    pub fn end(&mut self) -> bool {
        let was_resizing = self.is_resizing();
        self.state = DragState::Idle;
        was_resizing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_left_widens() {
        let mut resizer = DragResizer::new(200, 800);
        resizer.begin(100, 400);
        assert_eq!(resizer.drag(50), Some(450));
    }

    #[test]
    fn test_drag_right_narrows() {
        let mut resizer = DragResizer::new(200, 800);
        resizer.begin(100, 400);
        assert_eq!(resizer.drag(150), Some(350));
    }

    #[test]
    fn test_out_of_bounds_dropped() {
        let mut resizer = DragResizer::new(200, 800);
        resizer.begin(100, 400);
        assert_eq!(resizer.drag(300), None); // 200 is not > min
        assert_eq!(resizer.drag(-300), None); // 800 is not < max
        assert_eq!(resizer.drag(299), Some(201));
    }

    #[test]
    fn test_move_while_idle_ignored() {
        let mut resizer = DragResizer::new(200, 800);
        assert_eq!(resizer.drag(10), None);
    }

    #[test]
    fn test_end_returns_to_idle() {
        let mut resizer = DragResizer::new(200, 800);
        assert!(!resizer.end());
        resizer.begin(0, 300);
        assert!(resizer.is_resizing());
        assert!(resizer.end());
        assert_eq!(resizer.state(), DragState::Idle);
        assert_eq!(resizer.drag(-10), None);
    }

    #[test]
    fn test_for_viewport() {
        let resizer = DragResizer::for_viewport(1400, 200, 600);
        assert_eq!(resizer.min_width(), 200);
        assert_eq!(resizer.max_width(), 800);
    }
}
