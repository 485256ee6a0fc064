//! No-op backend.
//!
//! Used as a fallback on platforms where reparenting foreign windows is
//! not possible (Wayland), or for testing. All queries return empty
//! results and all mutations succeed silently.

use tabdock_common::Rect;

use crate::{DesktopWindow, Result, WindowBackend, WindowId};

/// A backend that captures nothing.
pub struct NoopBackend;

impl WindowBackend for NoopBackend {
    fn list_windows(&mut self) -> Result<Vec<DesktopWindow>> {
        Ok(Vec::new())
    }

    fn capture(&mut self, _id: WindowId, _bounds: Rect) -> Result<()> {
        Ok(())
    }

    fn place(&mut self, _id: WindowId, _bounds: Rect) -> Result<()> {
        Ok(())
    }

    fn set_visible(&mut self, _id: WindowId, _visible: bool) -> Result<()> {
        Ok(())
    }

    fn release(&mut self, _id: WindowId) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_empty() {
        let mut backend = NoopBackend;
        assert!(backend.list_windows().unwrap().is_empty());
    }

    #[test]
    fn mutations_succeed() {
        let mut backend = NoopBackend;
        let bounds = Rect::new(0, 0, 100, 100);
        assert!(backend.capture(WindowId(1), bounds).is_ok());
        assert!(backend.place(WindowId(1), bounds).is_ok());
        assert!(backend.set_visible(WindowId(1), false).is_ok());
        assert!(backend.release(WindowId(1)).is_ok());
    }

    #[test]
    fn reports_unavailable() {
        let backend = NoopBackend;
        assert_eq!(backend.name(), "noop");
        assert!(!backend.is_available());
    }
}
