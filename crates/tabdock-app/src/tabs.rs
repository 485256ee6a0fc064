//! Captured-tab bookkeeping.
//!
//! A flat list of captured windows plus the active index. Capture
//! deduplication is a linear scan by window id.

use tabdock_platform::{DesktopWindow, WindowId};

/// One tab: the captured window and, when embedding failed, the error shown
/// in place of the window content.
pub struct CapturedTab {
    pub window: DesktopWindow,
    pub embed_error: Option<String>,
}

#[derive(Default)]
pub struct TabSet {
    tabs: Vec<CapturedTab>,
    active: Option<usize>,
}

impl TabSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapturedTab> {
        self.tabs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&CapturedTab> {
        self.tabs.get(index)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&CapturedTab> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    /// Index of the tab holding `id`, if it is already captured.
    pub fn position_of(&self, id: WindowId) -> Option<usize> {
        self.tabs.iter().position(|t| t.window.id == id)
    }

    /// Append a tab and make it active. Returns its index.
    pub fn add(&mut self, tab: CapturedTab) -> usize {
        self.tabs.push(tab);
        let index = self.tabs.len() - 1;
        self.active = Some(index);
        index
    }

    pub fn activate(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.active = Some(index);
        }
    }

    /// Drop every tab. The captured windows must be released first.
    pub fn clear(&mut self) {
        self.tabs.clear();
        self.active = None;
    }

    /// Remove a tab, keeping the active index on a sensible neighbor.
    pub fn remove(&mut self, index: usize) -> Option<CapturedTab> {
        if index >= self.tabs.len() {
            return None;
        }
        let tab = self.tabs.remove(index);
        self.active = if self.tabs.is_empty() {
            None
        } else {
            match self.active {
                Some(a) if a > index => Some(a - 1),
                Some(a) if a == index => Some(index.min(self.tabs.len() - 1)),
                other => other,
            }
        };
        Some(tab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: u64, title: &str) -> CapturedTab {
        CapturedTab {
            window: DesktopWindow {
                id: WindowId(id),
                title: title.into(),
            },
            embed_error: None,
        }
    }

    #[test]
    fn add_activates() {
        let mut tabs = TabSet::new();
        tabs.add(tab(1, "a"));
        tabs.add(tab(2, "b"));
        assert_eq!(tabs.active(), Some(1));
        assert_eq!(tabs.len(), 2);
    }

    #[test]
    fn position_of_finds_captured_id() {
        let mut tabs = TabSet::new();
        tabs.add(tab(1, "a"));
        tabs.add(tab(2, "b"));
        assert_eq!(tabs.position_of(WindowId(1)), Some(0));
        assert_eq!(tabs.position_of(WindowId(3)), None);
    }

    #[test]
    fn remove_active_moves_to_neighbor() {
        let mut tabs = TabSet::new();
        tabs.add(tab(1, "a"));
        tabs.add(tab(2, "b"));
        tabs.add(tab(3, "c"));
        tabs.activate(1);
        tabs.remove(1);
        assert_eq!(tabs.active(), Some(1));
        assert_eq!(tabs.active_tab().unwrap().window.id, WindowId(3));
    }

    #[test]
    fn remove_last_tab_clears_active() {
        let mut tabs = TabSet::new();
        tabs.add(tab(1, "a"));
        tabs.remove(0);
        assert_eq!(tabs.active(), None);
        assert!(tabs.is_empty());
    }

    #[test]
    fn remove_before_active_shifts_index() {
        let mut tabs = TabSet::new();
        tabs.add(tab(1, "a"));
        tabs.add(tab(2, "b"));
        tabs.add(tab(3, "c"));
        assert_eq!(tabs.active(), Some(2));
        tabs.remove(0);
        assert_eq!(tabs.active(), Some(1));
        assert_eq!(tabs.active_tab().unwrap().window.id, WindowId(3));
    }

    #[test]
    fn remove_trailing_active_clamps() {
        let mut tabs = TabSet::new();
        tabs.add(tab(1, "a"));
        tabs.add(tab(2, "b"));
        tabs.remove(1);
        assert_eq!(tabs.active(), Some(0));
    }

    #[test]
    fn clear_empties_and_deactivates() {
        let mut tabs = TabSet::new();
        tabs.add(tab(1, "a"));
        tabs.add(tab(2, "b"));
        tabs.clear();
        assert!(tabs.is_empty());
        assert_eq!(tabs.active(), None);
    }

    #[test]
    fn activate_out_of_range_is_ignored() {
        let mut tabs = TabSet::new();
        tabs.add(tab(1, "a"));
        tabs.activate(5);
        assert_eq!(tabs.active(), Some(0));
    }
}
