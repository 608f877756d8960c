//! v4l2-panel - control panel for Video4Linux capture devices.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use v4l2_panel::{ControlBackend, PanelConfig, V4l2Device, apply_assignments, write_listing};

/// Command-line arguments for v4l2-panel
#[derive(Parser, Debug)]
#[command(name = "v4l2-panel")]
#[command(version, about = "Control panel for V4L2 capture devices", long_about = None)]
#[command(after_help = "EXAMPLES:\n    v4l2-panel /dev/video0\n    v4l2-panel --list /dev/video0\n    v4l2-panel /dev/video0 Brightness 128 Contrast 32")]
struct Args {
    /// Video device node, e.g. /dev/video0
    device: PathBuf,

    /// NAME VALUE pairs to assign without opening the panel
    #[arg(value_names = ["NAME", "VALUE"], allow_hyphen_values = true)]
    assignments: Vec<String>,

    /// Print every control and exit
    #[arg(short, long)]
    list: bool,

    /// Panel configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let device = V4l2Device::open(&args.device)?;

    if args.list {
        let controls = device.enumerate();
        write_listing(&controls, &mut io::stdout().lock()).context("writing control listing")?;
        return Ok(());
    }

    if !args.assignments.is_empty() {
        let failures = apply_assignments(&device, &args.assignments, &mut io::stdout().lock())
            .context("writing assignment results")?;
        for e in failures {
            warn!("{}", e);
        }
        return Ok(());
    }

    let config = PanelConfig::discover(args.config.as_deref())?;
    run_panel(device, config)
}

#[cfg(feature = "gui")]
fn run_panel(device: V4l2Device, config: PanelConfig) -> Result<()> {
    use v4l2_panel::{DeviceApplier, Panel, load_rows, run_window};

    let rows = load_rows(&device);
    info!("Loaded {} rows from {}", rows.len(), device.path().display());
    let panel = Panel::new(rows, DeviceApplier::new(device), &config);
    run_window(panel, &config.window)?;
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn run_panel(device: V4l2Device, _config: PanelConfig) -> Result<()> {
    info!("Opened {}", device.path().display());
    anyhow::bail!("built without the `gui` feature; use --list or NAME VALUE pairs")
}
