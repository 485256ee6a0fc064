//! X11 backend.
//!
//! Enumerates top-level windows from the root's `_NET_CLIENT_LIST`
//! (falling back to `query_tree` under window managers that do not set
//! it) and embeds them with `reparent_window`. Titles come from
//! `_NET_WM_NAME` with a `WM_NAME` fallback.

use tabdock_common::{PlatformError, Rect};
use tracing::{debug, warn};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ConfigureWindowAux, ConnectionExt as _, MapState, Window,
};
use x11rb::rust_connection::RustConnection;

use crate::{filter_windows, DesktopWindow, Result, WindowBackend, WindowId};

fn x11_err(e: impl std::fmt::Display) -> PlatformError {
    PlatformError::WindowSystem(e.to_string())
}

/// EWMH atoms used for enumeration.
struct Atoms {
    net_client_list: Atom,
    net_wm_name: Atom,
    utf8_string: Atom,
}

impl Atoms {
    fn load(conn: &RustConnection) -> Result<Self> {
        Ok(Self {
            net_client_list: intern(conn, b"_NET_CLIENT_LIST")?,
            net_wm_name: intern(conn, b"_NET_WM_NAME")?,
            utf8_string: intern(conn, b"UTF8_STRING")?,
        })
    }
}

fn intern(conn: &RustConnection, name: &[u8]) -> Result<Atom> {
    Ok(conn
        .intern_atom(false, name)
        .map_err(x11_err)?
        .reply()
        .map_err(x11_err)?
        .atom)
}

/// X11 window backend over an xcb connection.
pub struct X11Backend {
    conn: RustConnection,
    root: Window,
    host: Window,
    atoms: Atoms,
    /// Last successful enumeration, returned when a later pass fails.
    cached: Vec<DesktopWindow>,
}

impl X11Backend {
    /// Connect to the display named by `$DISPLAY`. `host` is the X window
    /// id of the application's own top-level window; it is excluded from
    /// enumeration and becomes the reparenting target.
    pub fn connect(host: u32) -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None).map_err(x11_err)?;
        let root = conn.setup().roots[screen_num].root;
        let atoms = Atoms::load(&conn)?;
        debug!("connected to X11, root 0x{root:x}, host 0x{host:x}");
        Ok(Self {
            conn,
            root,
            host,
            atoms,
            cached: Vec::new(),
        })
    }

    /// Window title: `_NET_WM_NAME` first, then `WM_NAME`. Empty when the
    /// window has neither (such windows are filtered out).
    fn window_title(&self, window: Window) -> String {
        if let Ok(cookie) = self.conn.get_property(
            false,
            window,
            self.atoms.net_wm_name,
            self.atoms.utf8_string,
            0,
            1024,
        ) {
            if let Ok(reply) = cookie.reply() {
                if !reply.value.is_empty() {
                    if let Ok(s) = String::from_utf8(reply.value) {
                        return s;
                    }
                }
            }
        }

        if let Ok(cookie) = self.conn.get_property(
            false,
            window,
            AtomEnum::WM_NAME,
            AtomEnum::STRING,
            0,
            1024,
        ) {
            if let Ok(reply) = cookie.reply() {
                if !reply.value.is_empty() {
                    return String::from_utf8_lossy(&reply.value).into_owned();
                }
            }
        }

        String::new()
    }

    /// Client windows from `_NET_CLIENT_LIST`, if the window manager
    /// maintains it.
    fn client_list(&self) -> Result<Vec<Window>> {
        let reply = self
            .conn
            .get_property(
                false,
                self.root,
                self.atoms.net_client_list,
                AtomEnum::WINDOW,
                0,
                u32::MAX / 4,
            )
            .map_err(x11_err)?
            .reply()
            .map_err(x11_err)?;

        Ok(reply
            .value32()
            .map(|values| values.collect())
            .unwrap_or_default())
    }

    /// Fallback enumeration: direct children of the root that are viewable
    /// and not override-redirect (skips popups and menus).
    fn query_tree_windows(&self) -> Result<Vec<Window>> {
        let tree = self
            .conn
            .query_tree(self.root)
            .map_err(x11_err)?
            .reply()
            .map_err(x11_err)?;

        let mut windows = Vec::new();
        for &window in &tree.children {
            let attrs = match self.conn.get_window_attributes(window) {
                Ok(cookie) => match cookie.reply() {
                    Ok(attrs) => attrs,
                    Err(_) => continue,
                },
                Err(_) => continue,
            };
            if attrs.override_redirect || attrs.map_state != MapState::VIEWABLE {
                continue;
            }
            windows.push(window);
        }
        Ok(windows)
    }

    fn enumerate(&self) -> Result<Vec<DesktopWindow>> {
        let mut ids = self.client_list()?;
        if ids.is_empty() {
            ids = self.query_tree_windows()?;
        }

        let windows = ids
            .into_iter()
            .map(|w| DesktopWindow {
                id: WindowId(u64::from(w)),
                title: self.window_title(w),
            })
            .collect();

        Ok(filter_windows(WindowId(u64::from(self.host)), windows))
    }
}

impl WindowBackend for X11Backend {
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
        let window = id.0 as Window;
        // check() so a bad window id fails here, not asynchronously later
        self.conn
            .reparent_window(window, self.host, bounds.x as i16, bounds.y as i16)
            .map_err(x11_err)?
            .check()
            .map_err(x11_err)?;
        self.conn.map_window(window).map_err(x11_err)?;
        self.place(id, bounds)?;
        debug!("captured {id} into host 0x{:x}", self.host);
        Ok(())
    }

    fn place(&mut self, id: WindowId, bounds: Rect) -> Result<()> {
        let aux = ConfigureWindowAux::new()
            .x(bounds.x)
            .y(bounds.y)
            .width(bounds.width)
            .height(bounds.height);
        self.conn
            .configure_window(id.0 as Window, &aux)
            .map_err(x11_err)?;
        self.conn.flush().map_err(x11_err)?;
        Ok(())
    }

    fn set_visible(&mut self, id: WindowId, visible: bool) -> Result<()> {
        let window = id.0 as Window;
        if visible {
            self.conn.map_window(window).map_err(x11_err)?;
        } else {
            self.conn.unmap_window(window).map_err(x11_err)?;
        }
        self.conn.flush().map_err(x11_err)?;
        Ok(())
    }

    fn release(&mut self, id: WindowId) -> Result<()> {
        let window = id.0 as Window;
        self.conn
            .reparent_window(window, self.root, 0, 0)
            .map_err(x11_err)?;
        self.conn.map_window(window).map_err(x11_err)?;
        self.conn.flush().map_err(x11_err)?;
        debug!("released {id} back to root");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "x11"
    }
}
