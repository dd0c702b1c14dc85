use std::fs::{self, OpenOptions};
use std::io::stdout;
use std::sync::{Arc, Mutex};

use color_eyre::eyre::WrapErr;
use ratatui::crossterm::terminal::supports_keyboard_enhancement;

use docqa_tui::app::App;
use docqa_tui::log_info;
use docqa_tui::util::config::AppConfig;
use docqa_tui::util::io::backend::{DocumentBackend, HttpBackend};
use docqa_tui::util::io::event::EventHandler;
use docqa_tui::util::io::terminal::{restore_on_error, InputModes};
use docqa_tui::util::log::set_log_dir;
use docqa_tui::util::service::health::HealthMonitor;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = AppConfig::load()?;
    set_log_dir(&config.log_dir);
    init_tracing(&config)?;
    log_info!("Starting docqa-tui against {}", config.backend_url);

    let backend: Arc<dyn DocumentBackend> =
        Arc::new(HttpBackend::new(config.backend_url.clone(), config.request_timeout())?);

    let terminal = ratatui::init();
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    let modes = restore_on_error(InputModes::enable(&mut stdout(), enhanced), ratatui::restore)?;

    let events = EventHandler::new();
    let health = HealthMonitor::new(Arc::clone(&backend), config.health_interval()).spawn(events.sender());

    let result = App::new(config, backend, events).run(terminal).await;

    health.abort();
    let teardown = modes.disable(&mut stdout());
    ratatui::restore();
    result?;
    teardown?;
    Ok(())
}

/// Request-level diagnostics go to `trace.log`; the terminal belongs to the UI.
fn init_tracing(config: &AppConfig) -> color_eyre::Result<()> {
    fs::create_dir_all(&config.log_dir)
        .wrap_err_with(|| format!("Failed to create log directory {}", config.log_dir.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_dir.join("trace.log"))
        .wrap_err("Failed to open trace.log")?;

    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
