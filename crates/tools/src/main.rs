use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use tools::{FrameRequest, generate_points, read_config, read_files, render_frame};

/// Render the file sphere headlessly and print the result as JSON.
#[derive(Debug, Parser)]
#[command(name = "sphere", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render one frame and print its stats (and optionally draw commands).
    Frame(FrameArgs),
    /// Print the generated point set.
    Points(PointsArgs),
}

#[derive(Debug, Args)]
struct Inputs {
    /// JSON array of file records; `-` reads stdin.
    #[arg(long)]
    files: PathBuf,
    /// JSON config: `{ "sphere": {...}, "style": {...} }`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for filler shading.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Debug, Args)]
struct FrameArgs {
    #[command(flatten)]
    inputs: Inputs,
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    #[arg(long, allow_hyphen_values = true)]
    rotate_x: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    rotate_y: Option<f64>,
    #[arg(long)]
    zoom: Option<f64>,
    /// Include the recorded draw commands.
    #[arg(long)]
    commands: bool,
}

#[derive(Debug, Args)]
struct PointsArgs {
    #[command(flatten)]
    inputs: Inputs,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    match Cli::parse().command {
        Command::Frame(args) => cmd_frame(args),
        Command::Points(args) => cmd_points(args),
    }
}

fn cmd_frame(args: FrameArgs) -> Result<(), String> {
    let files = read_files(&args.inputs.files)?;
    let config = read_config(args.inputs.config.as_deref())?;
    let req = FrameRequest {
        width: args.width,
        height: args.height,
        rotate_x: args.rotate_x,
        rotate_y: args.rotate_y,
        zoom: args.zoom,
        seed: args.inputs.seed,
        include_commands: args.commands,
    };
    print_json(&render_frame(&files, &config, &req))
}

fn cmd_points(args: PointsArgs) -> Result<(), String> {
    let files = read_files(&args.inputs.files)?;
    let config = read_config(args.inputs.config.as_deref())?;
    print_json(&generate_points(&files, &config, args.inputs.seed))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| format!("serialize: {e}"))?;
    println!("{text}");
    Ok(())
}
