use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use kurbo::Rect;

use boxtour::{CornerRadius, RadiusMetrics, TourService, border_radius_px, mask_path};

#[derive(Parser, Debug)]
#[command(name = "boxtour", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a tour configuration JSON file.
    Validate(ValidateArgs),
    /// Fetch a tour configuration from an HTTP endpoint and validate it.
    Fetch(FetchArgs),
    /// Print the cut-out mask path for a target box.
    Mask(MaskArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input tour configuration JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FetchArgs {
    /// Configuration endpoint URL.
    #[arg(long)]
    endpoint: String,
}

#[derive(Parser, Debug)]
struct MaskArgs {
    /// Target box x (document coordinates).
    #[arg(long)]
    x: f64,

    /// Target box y (document coordinates).
    #[arg(long)]
    y: f64,

    /// Target box width.
    #[arg(long)]
    width: f64,

    /// Target box height.
    #[arg(long)]
    height: f64,

    /// Overlay width.
    #[arg(long, default_value_t = 1920.0)]
    overlay_width: f64,

    /// Overlay height.
    #[arg(long, default_value_t = 1080.0)]
    overlay_height: f64,

    /// Border radius as a CSS value (px, em, rem, or %).
    #[arg(long, default_value = "0px")]
    radius: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Fetch(args) => cmd_fetch(args),
        Command::Mask(args) => cmd_mask(args),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<boxtour::TourConfig> {
    let f = File::open(path).with_context(|| format!("open tour config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let config: boxtour::TourConfig =
        serde_json::from_reader(r).with_context(|| "parse tour config JSON")?;
    Ok(config)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let config = read_config_json(&args.in_path)?;
    config.validate()?;
    eprintln!(
        "{}: ok ({} steps, interval {}ms)",
        args.in_path.display(),
        config.steps.len(),
        config.autoplay_interval_ms
    );
    Ok(())
}

fn cmd_fetch(args: FetchArgs) -> anyhow::Result<()> {
    let service = TourService::new();
    let config = service
        .fetch_config(&args.endpoint)
        .with_context(|| format!("fetch tour config from '{}'", args.endpoint))?;
    eprintln!("{}: ok ({} steps)", args.endpoint, config.steps.len());
    for (index, step) in config.steps.iter().enumerate() {
        eprintln!(
            "  step {}: {} ({})",
            index + 1,
            step.target_selector,
            step.callout_position.as_str()
        );
    }
    Ok(())
}

fn cmd_mask(args: MaskArgs) -> anyhow::Result<()> {
    let target = Rect::new(args.x, args.y, args.x + args.width, args.y + args.height);
    let overlay = Rect::new(0.0, 0.0, args.overlay_width, args.overlay_height);
    let radius: CornerRadius = border_radius_px(
        &args.radius,
        &RadiusMetrics {
            offset_width: args.width,
            offset_height: args.height,
            font_size_px: 16.0,
            root_font_size_px: 16.0,
        },
    );
    println!("{}", mask_path(overlay, target, radius));
    Ok(())
}
