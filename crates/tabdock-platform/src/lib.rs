//! Platform window-system abstraction.
//!
//! Wraps the OS windowing API (enumeration, reparenting, show/hide) behind
//! the [`WindowBackend`] trait. Linux uses X11 via x11rb, Windows uses the
//! Win32 API. Platforms without a reparenting primitive (Wayland) get the
//! no-op backend.

use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use serde::{Deserialize, Serialize};
use tabdock_common::{PlatformError, Rect};

pub mod noop;
#[cfg(target_os = "windows")]
pub mod win32;
#[cfg(target_os = "linux")]
pub mod x11;

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Opaque platform window handle (XID on X11, HWND on Win32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Lightweight descriptor of a capturable top-level window.
///
/// Recreated on every enumeration pass; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopWindow {
    pub id: WindowId,
    pub title: String,
}

/// Platform-agnostic control of external application windows.
///
/// All mutations are best-effort: callers log failures and carry on.
pub trait WindowBackend {
    /// Visible top-level windows, sorted by title, excluding the host's own
    /// window and windows without a title. On enumeration failure the last
    /// successful list (or empty) is returned instead of an error.
    fn list_windows(&mut self) -> Result<Vec<DesktopWindow>>;

    /// Reparent a window under the host window, make it visible, and size
    /// it to `bounds` (host-relative pixels).
    fn capture(&mut self, id: WindowId, bounds: Rect) -> Result<()>;

    /// Move/resize an already-captured window within the host.
    fn place(&mut self, id: WindowId, bounds: Rect) -> Result<()>;

    /// Show or hide a captured window (inactive tabs are hidden).
    fn set_visible(&mut self, id: WindowId, visible: bool) -> Result<()>;

    /// Reparent a captured window back to the desktop root and restore its
    /// visibility.
    fn release(&mut self, id: WindowId) -> Result<()>;

    /// Backend name for logging and the status line.
    fn name(&self) -> &'static str;

    /// False when this backend cannot capture anything (no-op fallback).
    fn is_available(&self) -> bool {
        true
    }
}

/// Drop the host's own window and untitled windows, then sort by title.
///
/// Shared by the real backends so the enumeration contract is uniform.
pub fn filter_windows(host: WindowId, mut windows: Vec<DesktopWindow>) -> Vec<DesktopWindow> {
    windows.retain(|w| w.id != host && !w.title.trim().is_empty());
    windows.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.0.cmp(&b.id.0)));
    windows
}

/// Create the backend matching the host window's raw handle.
///
/// The host handle determines both the platform connection and the window
/// that enumeration must exclude.
pub fn create_backend(host: &dyn HasWindowHandle) -> Result<Box<dyn WindowBackend>> {
    let handle = host
        .window_handle()
        .map_err(|e| PlatformError::HostHandle(e.to_string()))?;

    match handle.as_raw() {
        #[cfg(target_os = "linux")]
        RawWindowHandle::Xlib(h) => Ok(Box::new(x11::X11Backend::connect(h.window as u32)?)),
        #[cfg(target_os = "linux")]
        RawWindowHandle::Xcb(h) => Ok(Box::new(x11::X11Backend::connect(h.window.get())?)),
        #[cfg(target_os = "windows")]
        RawWindowHandle::Win32(h) => Ok(Box::new(win32::Win32Backend::new(h.hwnd.get()))),
        RawWindowHandle::Wayland(_) => Err(PlatformError::NotSupported(
            "wayland compositors do not allow reparenting foreign surfaces".into(),
        )),
        other => Err(PlatformError::NotSupported(format!("{other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(id: u64, title: &str) -> DesktopWindow {
        DesktopWindow {
            id: WindowId(id),
            title: title.into(),
        }
    }

    #[test]
    fn window_id_equality() {
        assert_eq!(WindowId(1), WindowId(1));
        assert_ne!(WindowId(1), WindowId(2));
    }

    #[test]
    fn window_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(WindowId(1));
        set.insert(WindowId(2));
        set.insert(WindowId(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn window_id_serialization() {
        let id = WindowId(42);
        let json = serde_json::to_string(&id).unwrap();
        let back: WindowId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn window_id_display_is_hex() {
        assert_eq!(WindowId(0x2a).to_string(), "0x2a");
    }

    #[test]
    fn filter_excludes_host_window() {
        let host = WindowId(7);
        let out = filter_windows(host, vec![win(7, "TabDock"), win(8, "Editor")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, WindowId(8));
    }

    #[test]
    fn filter_drops_untitled_windows() {
        let out = filter_windows(
            WindowId(0),
            vec![win(1, ""), win(2, "   "), win(3, "Browser")],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Browser");
    }

    #[test]
    fn filter_sorts_by_title() {
        let out = filter_windows(
            WindowId(0),
            vec![win(1, "zsh"), win(2, "Browser"), win(3, "editor")],
        );
        let titles: Vec<&str> = out.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["Browser", "editor", "zsh"]);
    }

    #[test]
    fn filter_is_stable_for_equal_titles() {
        let out = filter_windows(WindowId(0), vec![win(9, "term"), win(4, "term")]);
        assert_eq!(out[0].id, WindowId(4));
        assert_eq!(out[1].id, WindowId(9));
    }
}
