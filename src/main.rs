use clap::Parser;
use cognitia::core::config;
use cognitia::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "cognitia", about = "Terminal client for the Cognitia research assistant")]
struct Args {
    /// Backend base URL (overrides config file and COGNITIA_API_URL)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Where to write the debug log
    #[arg(long, default_value = "cognitia.log")]
    log_file: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The TUI owns the terminal, so logs go to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        config::CognitiaConfig::default()
    });
    let resolved = config::resolve(&file_config, args.base_url.as_deref());

    log::info!("Cognitia starting up against {}", resolved.base_url);

    tui::run(resolved)
}
