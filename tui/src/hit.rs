//! Hit Map
//!
//! Rebuilt every frame from what was actually drawn. Maps screen cells to
//! the data of the clickable element drawn there, so a click anywhere in the
//! message log resolves to at most one affordance.

use ratatui::layout::Rect;

/// Clickable regions drawn in the current frame
#[derive(Clone, Debug, Default)]
pub struct HitMap {
    targets: Vec<(Rect, String)>,
}

impl HitMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget last frame's regions
    pub fn clear(&mut self) {
        self.targets.clear();
    }

    /// Register a region carrying `data`
    pub fn push(&mut self, area: Rect, data: impl Into<String>) {
        if area.width > 0 && area.height > 0 {
            self.targets.push((area, data.into()));
        }
    }

    /// Data of the region containing the cell, if any
    pub fn hit(&self, column: u16, row: u16) -> Option<&str> {
        self.targets
            .iter()
            .find(|(area, _)| contains(*area, column, row))
            .map(|(_, data)| data.as_str())
    }

    /// Number of registered regions
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether nothing is clickable
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Whether `area` contains the cell at (`column`, `row`)
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_inside_and_outside() {
        let mut map = HitMap::new();
        map.push(Rect::new(10, 5, 6, 1), "3");
        map.push(Rect::new(18, 5, 6, 1), "7");

        assert_eq!(map.hit(10, 5), Some("3"));
        assert_eq!(map.hit(15, 5), Some("3"));
        assert_eq!(map.hit(16, 5), None);
        assert_eq!(map.hit(18, 5), Some("7"));
        assert_eq!(map.hit(12, 6), None);
    }

    #[test]
    fn test_empty_regions_ignored() {
        let mut map = HitMap::new();
        map.push(Rect::new(0, 0, 0, 1), "1");
        assert!(map.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut map = HitMap::new();
        map.push(Rect::new(0, 0, 3, 1), "1");
        assert_eq!(map.len(), 1);
        map.clear();
        assert_eq!(map.hit(0, 0), None);
    }
}
