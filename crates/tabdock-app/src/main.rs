mod app;
mod cli;
mod menu;
mod tabs;

use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    // Parse CLI arguments
    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("tabdock=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "tabdock=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("TabDock v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load config
    let config = match &args.config {
        Some(path) => tabdock_config::load_config_from(std::path::Path::new(path)),
        None => tabdock_config::load_config(),
    }
    .unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        tabdock_config::TabdockConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width as f32, config.window.height as f32]),
        ..Default::default()
    };

    tracing::info!("Entering event loop");
    eframe::run_native(
        "tabdock",
        options,
        Box::new(move |_cc| Ok(Box::new(app::TabDockApp::new(config)))),
    )
}
