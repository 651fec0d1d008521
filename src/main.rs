use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};

use tender_dashboard::api::ApiClient;
use tender_dashboard::app::App;
use tender_dashboard::model::FilterSet;
use tender_dashboard::model::Status;

/// Tender Dashboard — live terminal dashboard for sales-tender tracking.
#[derive(Parser, Debug)]
#[command(name = "tender-dashboard", version, about)]
struct Cli {
    /// Base URL of the tender backend API
    #[arg(long, default_value = "http://localhost:8000/api")]
    api_url: String,

    /// Start with expiry reminders enabled
    #[arg(long)]
    reminders: bool,

    /// Initial status filter (e.g. "round 1", "won")
    #[arg(long)]
    filter: Option<String>,

    /// Directory for exported reports
    #[arg(long, default_value = "./reports")]
    report_dir: PathBuf,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Set up logging to file (we own the terminal)
    let log_dir = std::env::var("TENDER_DASHBOARD_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("tender-dashboard"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "dashboard.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tender_dashboard=info".parse()?),
        )
        .init();

    let mut initial_filters = FilterSet::default();
    if let Some(ref status) = cli.filter {
        initial_filters.status = Some(Status::from_str_loose(status));
    }

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    // Set up terminal with mouse capture enabled
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = ratatui::init();

    // Run the app
    let api = ApiClient::new(cli.api_url);
    let mut app = App::new(api, initial_filters, cli.reminders, cli.report_dir);
    let result = app.run(&mut terminal).await;

    // Restore terminal — disable mouse capture before restoring
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    ratatui::restore();

    result
}
