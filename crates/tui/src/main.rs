mod renderer;
mod replay;

use std::path::PathBuf;

use anyhow::{Context, Result};
use touchview_core::trace::{GestureTrace, replay as replay_all};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let (print_only, path) = match args.as_slice() {
        [_, flag, path] if flag == "--print" => (true, path),
        [_, path] => (false, path),
        _ => {
            eprintln!("Usage: touchview [--print] <trace.json>");
            std::process::exit(1);
        }
    };

    let path = PathBuf::from(path);
    let data = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let trace = GestureTrace::from_json(&data)?;
    log::info!("loaded {} events from {}", trace.events.len(), path.display());

    if print_only {
        return print_transforms(&trace);
    }

    let mut session = replay::Replay::new(trace)?;
    renderer::render_tui(&mut session)
}

/// One JSON transform per line, for diffing traces.
#[allow(clippy::print_stdout)]
fn print_transforms(trace: &GestureTrace) -> Result<()> {
    for transform in replay_all(trace)? {
        println!("{}", serde_json::to_string(&transform)?);
    }
    Ok(())
}
