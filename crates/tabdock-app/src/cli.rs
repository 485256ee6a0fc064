use clap::Parser;

/// TabDock — dock existing desktop windows as tabs in one host window.
#[derive(Parser, Debug)]
#[command(name = "tabdock", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
