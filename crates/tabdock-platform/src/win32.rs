//! Win32 backend.
//!
//! Enumerates top-level windows with `EnumWindows` and embeds them with
//! `SetParent` plus a `WS_CHILD` style swap. The original window style is
//! kept so `release` can restore it.

use std::collections::HashMap;

use tabdock_common::{PlatformError, Rect};
use tracing::{debug, warn};
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, TRUE};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowLongPtrW, GetWindowTextW, IsWindowVisible, MoveWindow, SetParent,
    SetWindowLongPtrW, ShowWindow, GWL_STYLE, SW_HIDE, SW_SHOW, WS_CAPTION, WS_CHILD, WS_POPUP,
    WS_THICKFRAME,
};

use crate::{filter_windows, DesktopWindow, Result, WindowBackend, WindowId};

fn win_err(e: impl std::fmt::Display) -> PlatformError {
    PlatformError::WindowSystem(e.to_string())
}

unsafe extern "system" fn enum_windows_cb(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let out = &mut *(lparam.0 as *mut Vec<isize>);
    out.push(hwnd.0 as isize);
    TRUE
}

/// Win32 window backend.
pub struct Win32Backend {
    /// The application's own top-level HWND, stored raw (HWND is a pointer
    /// and the app is single-threaded anyway).
    host: isize,
    /// Original GWL_STYLE of each captured window, restored on release.
    original_styles: HashMap<u64, isize>,
    /// Last successful enumeration, returned when a later pass fails.
    cached: Vec<DesktopWindow>,
}

impl Win32Backend {
    pub fn new(host: isize) -> Self {
        debug!("win32 backend, host hwnd {host:#x}");
        Self {
            host,
            original_styles: HashMap::new(),
            cached: Vec::new(),
        }
    }

    fn host_hwnd(&self) -> HWND {
        HWND(self.host as *mut _)
    }

    fn hwnd(id: WindowId) -> HWND {
        HWND(id.0 as isize as *mut _)
    }

    fn enumerate(&self) -> Result<Vec<DesktopWindow>> {
        let mut raw: Vec<isize> = Vec::new();
        unsafe {
            EnumWindows(
                Some(enum_windows_cb),
                LPARAM(&mut raw as *mut Vec<isize> as isize),
            )
        }
        .map_err(win_err)?;

        let mut windows = Vec::new();
        for &handle in &raw {
            let hwnd = HWND(handle as *mut _);
            if !unsafe { IsWindowVisible(hwnd) }.as_bool() {
                continue;
            }
            let mut buf = [0u16; 512];
            let len = unsafe { GetWindowTextW(hwnd, &mut buf) };
            if len <= 0 {
                continue;
            }
            windows.push(DesktopWindow {
                id: WindowId(handle as u64),
                title: String::from_utf16_lossy(&buf[..len as usize]),
            });
        }

        Ok(filter_windows(WindowId(self.host as u64), windows))
    }
}

impl WindowBackend for Win32Backend {
    fn list_windows(&mut self) -> Result<Vec<DesktopWindow>> {
        match self.enumerate() {
            Ok(windows) => {
                self.cached = windows.clone();
                Ok(windows)
            }
            Err(e) => {
                warn!("window enumeration failed, using cached list: {e}");
                Ok(self.cached.clone())
            }
        }
    }

    fn capture(&mut self, id: WindowId, bounds: Rect) -> Result<()> {
        let hwnd = Self::hwnd(id);

        // Swap the top-level frame styles for WS_CHILD before reparenting;
        // the original style is restored on release.
        let style = unsafe { GetWindowLongPtrW(hwnd, GWL_STYLE) };
        self.original_styles.insert(id.0, style);
        let child_style = (style
            & !(WS_POPUP.0 as isize | WS_CAPTION.0 as isize | WS_THICKFRAME.0 as isize))
            | WS_CHILD.0 as isize;
        unsafe { SetWindowLongPtrW(hwnd, GWL_STYLE, child_style) };

        unsafe { SetParent(hwnd, self.host_hwnd()) }.map_err(win_err)?;
        self.place(id, bounds)?;
        let _ = unsafe { ShowWindow(hwnd, SW_SHOW) };
        debug!("captured {id} into host hwnd {:#x}", self.host);
        Ok(())
    }

    fn place(&mut self, id: WindowId, bounds: Rect) -> Result<()> {
        let hwnd = Self::hwnd(id);
        unsafe {
            MoveWindow(
                hwnd,
                bounds.x,
                bounds.y,
                bounds.width as i32,
                bounds.height as i32,
                TRUE,
            )
        }
        .map_err(win_err)?;
        Ok(())
    }

    fn set_visible(&mut self, id: WindowId, visible: bool) -> Result<()> {
        let hwnd = Self::hwnd(id);
        let cmd = if visible { SW_SHOW } else { SW_HIDE };
        let _ = unsafe { ShowWindow(hwnd, cmd) };
        Ok(())
    }

    fn release(&mut self, id: WindowId) -> Result<()> {
        let hwnd = Self::hwnd(id);

        if let Some(style) = self.original_styles.remove(&id.0) {
            unsafe { SetWindowLongPtrW(hwnd, GWL_STYLE, style) };
        }
        // Null parent puts the window back on the desktop.
        unsafe { SetParent(hwnd, HWND::default()) }.map_err(win_err)?;
        let _ = unsafe { ShowWindow(hwnd, SW_SHOW) };
        debug!("released {id} back to the desktop");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "win32"
    }
}
