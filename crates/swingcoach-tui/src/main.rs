// Swing coach entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config and credentials
// 3. Build the analysis client
// 4. Create mpsc channels
// 5. Spawn the controller loop
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use swingcoach_app::{run, Controller};
use swingcoach_core::config;
use swingcoach_llm::{AnalysisService, GeminiClient};
use swingcoach_tui::ViewState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Swing coach starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: model={}, max_output_tokens={}",
        config.llm.model, config.llm.max_output_tokens
    );

    let client = GeminiClient::from_config(&config);
    let model = client.model().to_string();
    let service: Arc<dyn AnalysisService> = Arc::new(client);

    let (cmd_tx, cmd_rx) = mpsc::channel(32);
    let (ui_tx, ui_rx) = mpsc::channel(64);
    let (outcome_tx, outcome_rx) = mpsc::channel(8);

    let controller = Controller::new(service, outcome_tx);
    let app_handle = tokio::spawn(async move {
        if let Err(e) = run(cmd_rx, outcome_rx, ui_tx, controller).await {
            error!("Controller loop error: {}", e);
        }
    });

    let view_state = ViewState::new(model, config.form.default_familiarity);
    if let Err(e) = swingcoach_tui::run(ui_rx, cmd_tx, view_state).await {
        error!("TUI error: {:#}", e);
    }

    // The TUI dropped its command sender, so the controller loop winds down.
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Swing coach shut down cleanly");
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("swingcoach.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("swingcoach=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
