//! trifold CLI: terminal viewport multiplexer fed by remote frames

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trifold_client::FrameClient;
use trifold_engine::Config;

/// Terminal viewport multiplexer fed by remote frames
#[derive(Parser)]
#[command(name = "trifold")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the viewport TUI (default when no command specified)
    Tui,

    /// List the frames the server advertises
    Frames {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch one frame and print its markup
    Fetch {
        /// Frame index
        index: usize,
    },

    /// Check that the frame server is reachable
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

const TRIFOLD_DIR: &str = ".trifold";

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Tui) => {
            let config = load_config();
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            if let Err(e) = rt.block_on(trifold_tui::run_tui(config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Frames { json }) => {
            init_tracing();
            cmd_frames(json);
        }
        Some(Commands::Fetch { index }) => {
            init_tracing();
            cmd_fetch(index);
        }
        Some(Commands::Doctor { json }) => {
            init_tracing();
            cmd_doctor(json);
        }
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .map(|dir| dir.join(TRIFOLD_DIR).join("config.json"))
        .unwrap_or_else(|_| PathBuf::from(TRIFOLD_DIR).join("config.json"))
}

fn load_config() -> Config {
    match Config::load(&config_path()) {
        Ok(config) => config.with_env_override(),
        Err(e) => {
            eprintln!("Warning: failed to load config ({e}); using defaults");
            Config::default().with_env_override()
        }
    }
}

fn build_client() -> FrameClient {
    let config = load_config();
    match FrameClient::builder().base_url(&config.api_url).build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_frames(json: bool) {
    let client = build_client();
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    match rt.block_on(client.frames()) {
        Ok(names) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&names).expect("failed to serialize")
                );
                return;
            }
            if names.is_empty() {
                println!("No frames advertised");
                return;
            }
            for (index, name) in names.iter().enumerate() {
                println!("{index:>3}  {name}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_fetch(index: usize) {
    let client = build_client();
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    match rt.block_on(client.fetch_frame(index)) {
        Ok(markup) => println!("{markup}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_doctor(json: bool) {
    let client = build_client();
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    let first_frame = rt.block_on(client.fetch_frame(0));
    let reachable = first_frame.is_ok();
    let total = client.total_frames();

    if json {
        let report = serde_json::json!({
            "base_url": client.base_url(),
            "reachable": reachable,
            "advertised_frames": total,
            "error": first_frame.as_ref().err().map(ToString::to_string),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("failed to serialize")
        );
    } else {
        println!("Frame server: {}", client.base_url());
        match &first_frame {
            Ok(_) => println!("  reachable: yes"),
            Err(e) => println!("  reachable: no ({e})"),
        }
        match total {
            Some(total) => println!("  advertised frames: {total}"),
            None => println!("  advertised frames: unknown"),
        }
    }

    if !reachable {
        std::process::exit(1);
    }
}
