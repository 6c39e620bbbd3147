use anyhow::Context;
use clap::{Parser, Subcommand};
use platformer_assets::{SheetSize, SpriteId, SpriteSheet, lookup};
use platformer_input::{Action, InputLatch, KeyState};
use platformer_kernel::World;
use platformer_render::{DebugTextRenderer, RenderFrame, Renderer};
use platformer_tools::WorldInspector;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "platformer-cli", about = "Headless platformer tooling")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// List the sprite atlas table
    Atlas {
        /// Sheet to normalize texture coordinates against
        #[arg(long)]
        sheet: Option<PathBuf>,
    },
    /// Run the simulation headless and print one line per tick
    Simulate {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        /// Hold move-left for the whole run
        #[arg(long)]
        left: bool,
        /// Hold move-right for the whole run
        #[arg(long)]
        right: bool,
        /// Hold crouch for the whole run
        #[arg(long)]
        crouch: bool,
        /// Release the jump key before these ticks (repeatable)
        #[arg(long = "jump-at")]
        jump_at: Vec<u64>,
        /// Emit JSON lines instead of text
        #[arg(long)]
        json: bool,
        /// Dump projected quads for the final tick against this sheet size (WxH)
        #[arg(long, value_parser = parse_sheet_size)]
        quads: Option<SheetSize>,
    },
}

fn parse_sheet_size(s: &str) -> Result<SheetSize, String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WxH, got {s:?}"))?;
    let width: u32 = w.parse().map_err(|e| format!("bad width {w:?}: {e}"))?;
    let height: u32 = h.parse().map_err(|e| format!("bad height {h:?}: {e}"))?;
    if width == 0 || height == 0 {
        return Err(format!("sheet size must be non-zero, got {s:?}"));
    }
    Ok(SheetSize::new(width, height))
}

/// Press the held keys, then step `ticks` times, releasing jump where asked.
fn simulate(
    ticks: u64,
    held: &[Action],
    jump_at: &[u64],
    mut on_tick: impl FnMut(&World, &InputLatch),
) -> World {
    let mut world = World::new();
    let mut latch = InputLatch::new();
    for &action in held {
        world.handle_input(&mut latch, action, KeyState::Pressed);
    }

    for tick in 0..ticks {
        if jump_at.contains(&tick) {
            world.handle_input(&mut latch, Action::Jump, KeyState::Pressed);
            world.handle_input(&mut latch, Action::Jump, KeyState::Released);
        }
        world.step(&latch);
        on_tick(&world, &latch);
    }
    world
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("platformer-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: tick={}", World::new().tick());
            println!("assets: {}", platformer_assets::crate_info());
            println!("input: {}", platformer_input::crate_info());
            println!("render: {}", platformer_render::crate_info());
            println!("tools: {}", platformer_tools::crate_info());
        }
        Commands::Atlas { sheet } => {
            let size = match sheet {
                Some(path) => Some(
                    SpriteSheet::load(&path)
                        .with_context(|| format!("failed to load {}", path.display()))?
                        .size(),
                ),
                None => None,
            };
            for id in SpriteId::ALL {
                let r = lookup(id);
                print!(
                    "{:<20} x={:<5} y={:<5} {}x{} frames={}",
                    id.name(),
                    r.x,
                    r.y,
                    r.width,
                    r.height,
                    r.frame_count
                );
                if let Some(size) = size {
                    let u0 = r.x as f32 / size.width as f32;
                    let u1 = (r.x + r.frame_count * r.width) as f32 / size.width as f32;
                    let v1 = (size.height as f32 - r.y as f32) / size.height as f32;
                    let v0 = v1 - r.height as f32 / size.height as f32;
                    print!(" u=[{u0:.4}, {u1:.4}] v=[{v0:.4}, {v1:.4}]");
                }
                println!();
            }
        }
        Commands::Simulate {
            ticks,
            left,
            right,
            crouch,
            jump_at,
            json,
            quads,
        } => {
            let held: Vec<Action> = [
                (left, Action::MoveLeft),
                (right, Action::MoveRight),
                (crouch, Action::Crouch),
            ]
            .into_iter()
            .filter_map(|(on, action)| on.then_some(action))
            .collect();
            tracing::debug!(?held, ?jump_at, ticks, "simulating");

            let mut write_err = None;
            let world = simulate(ticks, &held, &jump_at, |world, latch| {
                let summary = WorldInspector::summary(world, latch);
                if json {
                    match serde_json::to_string(&summary) {
                        Ok(line) => println!("{line}"),
                        Err(e) => {
                            write_err.get_or_insert(e);
                        }
                    }
                } else {
                    println!("{summary}");
                }
            });
            if let Some(e) = write_err {
                return Err(e).context("failed to serialize tick summary");
            }

            if let Some(size) = quads {
                let frame = RenderFrame::build(&world, size, Duration::ZERO);
                print!("{}", DebugTextRenderer::new().render(&frame));
            }
        }
    }

    Ok(())
}
