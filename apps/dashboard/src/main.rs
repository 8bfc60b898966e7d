use std::path::PathBuf;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::DashboardApp;

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "Desktop dashboard for a REST users collection")]
struct Args {
    /// Base address of the users service, e.g. http://localhost:8000
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings(&args.config);
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    let base_url = config::validate_base_url(&settings.base_url)?;

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();
    tracing::info!(%base_url, "starting dashboard");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, base_url.to_string());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("User Management Dashboard")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    let label = base_url.to_string();
    eframe::run_native(
        "User Management Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(cmd_tx, ui_rx, label)))),
    )
    .map_err(|err| anyhow!("dashboard window failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn cli_defaults_to_local_settings_file() {
        let args = Args::parse_from(["dashboard"]);
        assert!(args.base_url.is_none());
        assert_eq!(args.config.to_string_lossy(), "dashboard.toml");
    }

    #[test]
    fn cli_accepts_base_url_override() {
        let args = Args::parse_from(["dashboard", "--base-url", "http://10.0.0.5:8000"]);
        assert_eq!(args.base_url.as_deref(), Some("http://10.0.0.5:8000"));
    }
}
