use std::path::PathBuf;

use clap::Parser;
use webterm_common::PixelSize;

/// webterm: render a byte stream through a headless terminal session.
///
/// Output read from stdin is decoded and written to stdout; overlay
/// messages and title changes are logged to stderr.
#[derive(Parser, Debug)]
#[command(name = "webterm", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON file with a preference bag to apply after open.
    #[arg(short = 'p', long)]
    pub prefs: Option<PathBuf>,

    /// Container size in pixels, as WIDTHxHEIGHT.
    #[arg(long, default_value = "720x432", value_parser = parse_pixel_size)]
    pub container: PixelSize,

    /// Window title to set once the session is open.
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

fn parse_pixel_size(s: &str) -> Result<PixelSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let parse = |part: &str| -> Result<f64, String> {
        match part.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(n),
            _ => Err(format!("invalid pixel size '{part}'")),
        }
    };
    Ok(PixelSize::new(parse(w)?, parse(h)?))
}
