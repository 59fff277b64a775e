//! Harness that drives a `Seeker` against a simulated process.
//!
//! The core never performs I/O; this binary closes the loop, prints the
//! control trajectory, and reports whether the run converged.

mod cli;
mod sim;

use clap::Parser;
use seeker_config::{Bracket, Config, ProcessCfg, ProcessKind, RunCfg, SeekCfg};
use seeker_core::{BracketKind, Seeker};
use seeker_traits::Process;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = cli::Cli::parse();
    init_tracing(&args.log_level, args.json);

    let cfg = merge(&args)?;
    // A retarget past the budget would never fire, yet its gate below would
    // suppress the convergence report for the whole run.
    for (at, _) in &args.retarget {
        eyre::ensure!(
            *at <= cfg.run.ticks,
            "retarget tick {at} exceeds the run budget of {} ticks",
            cfg.run.ticks
        );
    }
    let mut seeker = Seeker::builder()
        .target(cfg.seek.target)
        .bracket(match cfg.seek.bracket {
            Bracket::Pair => BracketKind::Pair,
            Bracket::Triplet => BracketKind::Triplet,
        });
    if let Some(e) = cfg.seek.error {
        seeker = seeker.error(e);
    }
    if let Some(lo) = cfg.seek.lo {
        seeker = seeker.lo(lo);
    }
    if let Some(hi) = cfg.seek.hi {
        seeker = seeker.hi(hi);
    }
    if let Some(x0) = cfg.seek.x0 {
        seeker = seeker.x0(x0);
    }
    let mut seeker = seeker.build()?;
    let mut process = sim::SimProcess::new(cfg.process);

    // With pending retargets the run must not stop early.
    let last_retarget = args.retarget.iter().map(|(t, _)| *t).max().unwrap_or(0);

    let mut y = 0.0;
    let mut converged_at = None;
    for tick in 1..=cfg.run.ticks {
        for (at, target) in &args.retarget {
            if *at == tick {
                tracing::info!(tick, target, "retarget");
                seeker.set_target(*target);
            }
        }
        let x = seeker.next(y);
        y = process.respond(x);
        emit_tick(args.json, tick, x, y, seeker.target());
        if tick >= last_retarget && (y - seeker.target()).abs() <= seeker.error() {
            converged_at = Some(tick);
            break;
        }
    }

    match converged_at {
        Some(tick) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "event": "converged",
                        "ticks": tick,
                        "y": y,
                        "target": seeker.target(),
                    })
                );
            } else {
                println!("converged after {tick} ticks (y = {y:.4})");
            }
            Ok(())
        }
        None => Err(eyre::eyre!(
            "did not converge within {} ticks (last y = {y:.4}, target = {})",
            cfg.run.ticks,
            seeker.target()
        )),
    }
}

fn emit_tick(json: bool, tick: usize, x: f64, y: f64, target: f64) {
    if json {
        println!(
            "{}",
            serde_json::json!({ "tick": tick, "x": x, "y": y, "target": target })
        );
    } else {
        println!("{tick:>5}  x = {x:>12.5}  y = {y:>12.5}  target = {target}");
    }
}

/// Start from the config file (when given) and let flags override.
fn merge(args: &cli::Cli) -> eyre::Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            let target = args
                .target
                .ok_or_else(|| eyre::eyre!("either --config or --target is required"))?;
            Config {
                seek: SeekCfg {
                    target,
                    error: None,
                    lo: None,
                    hi: None,
                    x0: None,
                    bracket: Bracket::Pair,
                },
                process: ProcessCfg::default(),
                run: RunCfg::default(),
            }
        }
    };
    if let Some(t) = args.target {
        cfg.seek.target = t;
    }
    if let Some(e) = args.error {
        cfg.seek.error = Some(e);
    }
    if let Some(lo) = args.lo {
        cfg.seek.lo = Some(lo);
    }
    if let Some(hi) = args.hi {
        cfg.seek.hi = Some(hi);
    }
    if let Some(x0) = args.x0 {
        cfg.seek.x0 = Some(x0);
    }
    if args.triplet {
        cfg.seek.bracket = Bracket::Triplet;
    }
    if args.quadratic {
        cfg.process.kind = ProcessKind::Quadratic;
    }
    if let Some(a) = args.gain {
        cfg.process.a = a;
    }
    if let Some(b) = args.offset {
        cfg.process.b = b;
    }
    if let Some(n) = args.noise {
        cfg.process.noise = n;
    }
    if let Some(ticks) = args.ticks {
        cfg.run.ticks = ticks;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
