use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use outlook_syncer::config::Config;
use outlook_syncer::pipeline::run_for_platform;
use outlook_syncer::platform::Platform;

#[derive(Parser)]
#[command(name = "outlook-syncer")]
#[command(about = "Export recent Outlook Inbox and Sent Items messages to daily_emails.json")]
#[command(version = "0.1.0")]
struct Args {
    /// Day window (default: 1, only enforced by the Windows extractor)
    #[arg(short, long)]
    days: Option<u32>,

    /// Output file (default: daily_emails.json next to the executable)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the resolved configuration without touching Outlook
    #[arg(long)]
    check_config: bool,
}

fn main() -> Result<()> {
    // Load .env if present
    dotenv::dotenv().ok();

    let args = Args::parse();

    env_logger::init();

    let mut config = Config::new()?;
    if let Some(days) = args.days {
        config.days = days;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }

    let platform = Platform::current();

    if args.check_config {
        println!("✅ Configuration valid!");
        println!("🖥️  Platform: {}", platform);
        println!("📅 Days: {}", config.days);
        println!("📁 Output: {}", config.output_path.display());
        println!("⏱️  Script timeout: {}s", config.script_timeout.as_secs());
        println!("🔢 Scan cap per folder: {}", config.scan_cap);
        for (token, class) in config.folder_tokens.entries() {
            println!("   {} → {}", token, class.label());
        }
        return Ok(());
    }

    info!("🚀 Starting Outlook extraction");
    run_for_platform(&platform, &config)?;

    Ok(())
}
