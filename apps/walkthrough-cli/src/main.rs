use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use walkthrough_gate::{GateConfig, GateProfile};
use walkthrough_input::{Action, KeyInput, action_for};
use walkthrough_kernel::{Config, MoveOutcome, Session};
use walkthrough_render::{DebugTextRenderer, Frame, Projection, Renderer};
use walkthrough_tools::SessionInspector;

#[derive(Parser)]
#[command(name = "walkthrough-cli", about = "Headless tools for the maze walkthrough")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON session config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Gate threshold table; overrides the config file
    #[arg(long, global = true)]
    gate_profile: Option<GateProfile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, layout and gate thresholds
    Info,
    /// List every gate wall with its clearance from a point
    Walls {
        /// Query point (defaults to the start position)
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        at: Option<Vec<f32>>,
    },
    /// Replay a key sequence, e.g. "wwwwdd"
    Walk {
        /// Keys from the desktop bindings (w a s d f h)
        keys: String,
    },
    /// Dump the draw list for the start view
    Frame {
        #[arg(long, default_value_t = 1000)]
        width: u32,
        #[arg(long, default_value_t = 1000)]
        height: u32,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(profile) = cli.gate_profile {
        config.gate = GateConfig::profile(profile);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(&cli)?;
    let mut session = Session::new(&config)?;

    match cli.command {
        Commands::Info => {
            let layout = session.layout();
            let gate = session.gate().config();
            println!("walkthrough-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", walkthrough_render::crate_info());
            println!("tools: {}", walkthrough_tools::crate_info());
            println!(
                "layout: {} buildings (yaws {:?}), {} gate walls, {} panels",
                layout.building_yaws.len(),
                layout.building_yaws,
                layout.gate_wall_count(),
                layout.panels.len()
            );
            println!(
                "gate: face {:?} >= {}, branch wall {} [{}..{}], corridor {:?} >= {}, crossing {:?} >= {}",
                gate.face_walls,
                gate.face_floor,
                gate.branch_wall,
                gate.branch_low,
                gate.branch_high,
                gate.corridor_walls,
                gate.corridor_floor,
                gate.crossing_walls,
                gate.crossing_floor
            );
            println!("{}", SessionInspector::summary(&session));
        }
        Commands::Walls { at } => {
            let point = match at.as_deref() {
                Some([x, y, z]) => glam::Vec3::new(*x, *y, *z),
                _ => session.camera().position(),
            };
            let gate = session.gate();
            println!(
                "Clearances from ({:.2}, {:.2}, {:.2}):",
                point.x, point.y, point.z
            );
            for line in SessionInspector::clearances_at(gate, point) {
                println!("  {line}");
            }
            let verdict = gate.config().evaluate(&gate.clearances(point));
            println!("Gate: {verdict}");
        }
        Commands::Walk { keys } => {
            let mut accepted = 0;
            let mut blocked = 0;
            for (step, c) in keys.chars().enumerate() {
                let Some(action) = action_for(KeyInput::Char(c.to_ascii_lowercase())) else {
                    tracing::warn!("step {step}: no binding for {c:?}");
                    continue;
                };
                match session.apply(action) {
                    Some(MoveOutcome::Accepted(pose)) => {
                        accepted += 1;
                        let p = pose.position();
                        println!("{step:>4} {c}  -> ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
                    }
                    Some(MoveOutcome::Blocked(verdict)) => {
                        blocked += 1;
                        println!("{step:>4} {c}  {verdict}");
                    }
                    None if action == Action::ToggleShader => {
                        println!("{step:>4} {c}  shader={}", session.shader().name());
                    }
                    None => {}
                }
            }
            println!("Accepted: {accepted}  Blocked: {blocked}");
            println!("{}", SessionInspector::summary(&session));
        }
        Commands::Frame { width, height } => {
            let frame = Frame::build(&session, Projection::new(width, height));
            print!("{}", DebugTextRenderer::new().render(&frame));
        }
    }

    Ok(())
}
