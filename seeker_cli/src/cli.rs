//! CLI argument definitions.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seeker", version, about = "Setpoint seeker harness")]
pub struct Cli {
    /// Path to a config TOML; command-line flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Target output value
    #[arg(short, long, allow_negative_numbers = true)]
    pub target: Option<f64>,

    /// Half-width of the acceptable band around the target
    #[arg(long, allow_negative_numbers = true)]
    pub error: Option<f64>,

    /// Inclusive lower bound on emitted inputs
    #[arg(long, allow_negative_numbers = true)]
    pub lo: Option<f64>,

    /// Inclusive upper bound on emitted inputs
    #[arg(long, allow_negative_numbers = true)]
    pub hi: Option<f64>,

    /// Initial guess seeding the bracket
    #[arg(long, allow_negative_numbers = true)]
    pub x0: Option<f64>,

    /// Use the three-point bracket instead of the pair
    #[arg(long, action = ArgAction::SetTrue)]
    pub triplet: bool,

    /// Maximum control ticks before giving up
    #[arg(long)]
    pub ticks: Option<usize>,

    /// Change the target mid-run, e.g. --retarget 100:6.0 (repeatable)
    #[arg(long, value_name = "TICK:VALUE", value_parser = parse_retarget)]
    pub retarget: Vec<(usize, f64)>,

    /// Simulated process gain
    #[arg(long, allow_negative_numbers = true)]
    pub gain: Option<f64>,

    /// Simulated process offset
    #[arg(long, allow_negative_numbers = true)]
    pub offset: Option<f64>,

    /// Simulated measurement noise amplitude
    #[arg(long)]
    pub noise: Option<f64>,

    /// Square the input in the simulated process
    #[arg(long, action = ArgAction::SetTrue)]
    pub quadratic: bool,

    /// Emit JSON lines instead of a table
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

fn parse_retarget(s: &str) -> Result<(usize, f64), String> {
    let (tick, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TICK:VALUE, got {s:?}"))?;
    let tick = tick
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad tick in {s:?}: {e}"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad value in {s:?}: {e}"))?;
    Ok((tick, value))
}

#[cfg(test)]
mod tests {
    use super::{Cli, parse_retarget};
    use clap::Parser;

    #[test]
    fn negative_numeric_values_parse() {
        let cli = Cli::try_parse_from([
            "seeker", "--target", "-6", "--lo", "-20", "--hi", "20", "--x0", "-3.5", "--gain",
            "-2", "--offset", "-1.5",
        ])
        .unwrap();
        assert_eq!(cli.target, Some(-6.0));
        assert_eq!(cli.lo, Some(-20.0));
        assert_eq!(cli.x0, Some(-3.5));
        assert_eq!(cli.gain, Some(-2.0));
        assert_eq!(cli.offset, Some(-1.5));
    }

    #[test]
    fn retarget_pair_parses() {
        assert_eq!(parse_retarget("100:6.0").unwrap(), (100, 6.0));
        assert_eq!(parse_retarget(" 5 : -2 ").unwrap(), (5, -2.0));
    }

    #[test]
    fn malformed_retarget_is_rejected() {
        assert!(parse_retarget("100").is_err());
        assert!(parse_retarget("x:1").is_err());
        assert!(parse_retarget("1:y").is_err());
    }
}
