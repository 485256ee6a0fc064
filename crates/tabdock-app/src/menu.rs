//! Capture-menu state.
//!
//! Holds the list of capturable windows shown in the "Windows" menu. The
//! list is rebuilt only when the enumerated title set actually changed, so
//! an idle desktop does not churn the menu every poll.

use tabdock_platform::DesktopWindow;

#[derive(Default)]
pub struct CaptureMenu {
    entries: Vec<DesktopWindow>,
    titles: Vec<String>,
}

impl CaptureMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the menu contents with a fresh enumeration pass.
    ///
    /// Returns true when the menu was rebuilt. The incoming list is already
    /// title-sorted (enumerator contract), so comparing the title sequences
    /// is a set-equality check.
    pub fn refresh(&mut self, windows: Vec<DesktopWindow>) -> bool {
        let titles: Vec<String> = windows.iter().map(|w| w.title.clone()).collect();
        if titles == self.titles {
            return false;
        }
        self.titles = titles;
        self.entries = windows;
        true
    }

    pub fn entries(&self) -> &[DesktopWindow] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
