//! The TabDock shell.
//!
//! A single eframe window with a menu bar, a tab strip, a status line, and
//! a content area the active captured window is placed over. The desktop is
//! re-enumerated on a fixed-interval poll driven from `update()`.

use std::time::{Duration, Instant};

use eframe::egui;
use tabdock_common::Rect;
use tabdock_config::TabdockConfig;
use tabdock_platform::{DesktopWindow, WindowBackend, WindowId};
use tracing::{debug, info, warn};

use crate::menu::CaptureMenu;
use crate::tabs::{CapturedTab, TabSet};

/// Fixed-interval poll, checked once per frame.
struct PollTimer {
    interval: Duration,
    last: Option<Instant>,
}

impl PollTimer {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True when a poll is due; marks the poll as started at `now`.
    fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Time until the next poll, for repaint scheduling.
    fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self.interval.saturating_sub(now.duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

pub struct TabDockApp {
    /// Created lazily on the first frame, once the host window handle
    /// exists. Falls back to the no-op backend on unsupported platforms.
    backend: Option<Box<dyn WindowBackend>>,
    menu: CaptureMenu,
    tabs: TabSet,
    poll: PollTimer,
    status: String,
    /// Host-relative pixel bounds of the content area, updated every frame.
    content_bounds: Rect,
    /// Last bounds pushed to the backend, to skip redundant placements.
    last_placed: Option<(WindowId, Rect)>,
}

impl TabDockApp {
    pub fn new(config: TabdockConfig) -> Self {
        Self {
            backend: None,
            menu: CaptureMenu::new(),
            tabs: TabSet::new(),
            poll: PollTimer::new(Duration::from_millis(config.capture.poll_interval_ms)),
            status: "Scanning for windows...".into(),
            content_bounds: Rect::new(0, 0, 0, 0),
            last_placed: None,
        }
    }

    fn ensure_backend(&mut self, frame: &eframe::Frame) {
        if self.backend.is_some() {
            return;
        }
        match tabdock_platform::create_backend(frame) {
            Ok(backend) => {
                info!("window backend: {}", backend.name());
                self.backend = Some(backend);
            }
            Err(e) => {
                warn!("window capture unavailable: {e}");
                self.status = format!("Window capture unavailable: {e}");
                self.backend = Some(Box::new(tabdock_platform::noop::NoopBackend));
            }
        }
    }

    fn poll_windows(&mut self) {
        if !self.poll.due(Instant::now()) {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        match backend.list_windows() {
            Ok(windows) => {
                if self.menu.refresh(windows) {
                    debug!("capture menu rebuilt, {} windows", self.menu.entries().len());
                }
            }
            Err(e) => warn!("window enumeration failed: {e}"),
        }
    }

    /// Dock a window picked from the capture menu. Selecting an already
    /// captured window just focuses its tab.
    fn select_window(&mut self, window: DesktopWindow) {
        if let Some(index) = self.tabs.position_of(window.id) {
            self.activate_tab(index);
            self.status = format!("\"{}\" is already docked", window.title);
            return;
        }

        let bounds = self.content_bounds;
        let previous = visible_window(&self.tabs);
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        match backend.capture(window.id, bounds) {
            Ok(()) => {
                if let Some(prev) = previous {
                    if let Err(e) = backend.set_visible(prev, false) {
                        warn!("hiding {prev} failed: {e}");
                    }
                }
                self.status = format!("Captured \"{}\"", window.title);
                self.tabs.add(CapturedTab {
                    window,
                    embed_error: None,
                });
                self.last_placed = None;
            }
            Err(e) => {
                warn!("capture of {} failed: {e}", window.id);
                self.status = format!("Capture failed: {e}");
                self.tabs.add(CapturedTab {
                    window,
                    embed_error: Some(e.to_string()),
                });
            }
        }
    }

    fn activate_tab(&mut self, index: usize) {
        if self.tabs.active() == Some(index) {
            return;
        }
        let previous = visible_window(&self.tabs);
        self.tabs.activate(index);
        let shown = visible_window(&self.tabs);

        if let Some(backend) = self.backend.as_mut() {
            if let Some(prev) = previous {
                if let Err(e) = backend.set_visible(prev, false) {
                    warn!("hiding {prev} failed: {e}");
                }
            }
            if let Some(id) = shown {
                if let Err(e) = backend.set_visible(id, true) {
                    warn!("showing {id} failed: {e}");
                }
            }
        }
        self.last_placed = None;
    }

    /// Close a tab: the window is restored to the desktop first, then the
    /// tab is removed.
    fn close_tab(&mut self, index: usize) {
        let Some(tab) = self.tabs.get(index) else {
            return;
        };
        let id = tab.window.id;
        let title = tab.window.title.clone();

        if let Some(backend) = self.backend.as_mut() {
            match backend.release(id) {
                Ok(()) => self.status = format!("Released \"{title}\""),
                Err(e) => {
                    warn!("release of {id} failed: {e}");
                    self.status = format!("Release failed: {e}");
                }
            }
        }

        self.tabs.remove(index);
        self.last_placed = None;

        let shown = visible_window(&self.tabs);
        if let Some(backend) = self.backend.as_mut() {
            if let Some(id) = shown {
                if let Err(e) = backend.set_visible(id, true) {
                    warn!("showing {id} failed: {e}");
                }
            }
        }
    }

    /// Restore every captured window to the desktop and drop all tabs.
    fn release_everything(&mut self) {
        let ids: Vec<WindowId> = self.tabs.iter().map(|t| t.window.id).collect();
        if let Some(backend) = self.backend.as_mut() {
            for id in &ids {
                if let Err(e) = backend.release(*id) {
                    warn!("release of {id} failed: {e}");
                }
            }
        }
        self.tabs.clear();
        self.last_placed = None;
    }

    /// Keep the active embedded window tracking the content area.
    fn place_active(&mut self) {
        let Some(tab) = self.tabs.active_tab() else {
            return;
        };
        if tab.embed_error.is_some() {
            return;
        }
        let id = tab.window.id;
        let bounds = self.content_bounds;
        if bounds.is_empty() || self.last_placed == Some((id, bounds)) {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        match backend.place(id, bounds) {
            Ok(()) => self.last_placed = Some((id, bounds)),
            Err(e) => warn!("placing {id} failed: {e}"),
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Windows", |ui| {
                    if self.menu.is_empty() {
                        ui.weak("No capturable windows");
                    }
                    let entries: Vec<DesktopWindow> = self.menu.entries().to_vec();
                    for window in entries {
                        if ui.button(&window.title).clicked() {
                            self.select_window(window);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    if ui.button("Release all").clicked() {
                        self.release_everything();
                        self.status = "Released all windows".into();
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn tab_strip(&mut self, ctx: &egui::Context) {
        if self.tabs.is_empty() {
            return;
        }
        egui::TopBottomPanel::top("tab_strip").show(ctx, |ui| {
            let mut clicked = None;
            let mut closed = None;
            let active = self.tabs.active();

            ui.horizontal_wrapped(|ui| {
                for (i, tab) in self.tabs.iter().enumerate() {
                    let label = if tab.embed_error.is_some() {
                        egui::RichText::new(&tab.window.title)
                            .color(ui.visuals().error_fg_color)
                    } else {
                        egui::RichText::new(&tab.window.title)
                    };
                    if ui.selectable_label(active == Some(i), label).clicked() {
                        clicked = Some(i);
                    }
                    if ui.small_button("✕").clicked() {
                        closed = Some(i);
                    }
                    ui.separator();
                }
            });

            if let Some(i) = clicked {
                self.activate_tab(i);
            }
            if let Some(i) = closed {
                self.close_tab(i);
            }
        });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(backend) = &self.backend {
                        ui.weak(backend.name());
                    }
                });
            });
        });
    }

    fn content_area(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            let ppp = ctx.pixels_per_point();
            self.content_bounds = Rect::new(
                (rect.min.x * ppp).round() as i32,
                (rect.min.y * ppp).round() as i32,
                (rect.width() * ppp).round().max(0.0) as u32,
                (rect.height() * ppp).round().max(0.0) as u32,
            );

            let error = self
                .tabs
                .active_tab()
                .and_then(|t| t.embed_error.clone());
            if self.tabs.active_tab().is_none() {
                ui.centered_and_justified(|ui| {
                    ui.weak("Pick a window from the Windows menu to dock it here");
                });
            } else if let Some(e) = error {
                // Capture failed: inline placeholder instead of window content
                ui.centered_and_justified(|ui| {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!("Could not embed this window: {e}"),
                    );
                });
            } else {
                self.place_active();
            }
        });
    }
}

/// The window that should currently be mapped inside the host: the active
/// tab's, unless its capture failed.
fn visible_window(tabs: &TabSet) -> Option<WindowId> {
    tabs.active_tab()
        .filter(|t| t.embed_error.is_none())
        .map(|t| t.window.id)
}

impl eframe::App for TabDockApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.ensure_backend(frame);
        self.poll_windows();

        self.menu_bar(ctx);
        self.tab_strip(ctx);
        self.status_bar(ctx);
        self.content_area(ctx);

        ctx.request_repaint_after(self.poll.remaining(Instant::now()));
    }

    fn on_exit(&mut self) {
        self.release_everything();
    }
}
