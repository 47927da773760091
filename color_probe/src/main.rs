// Example runner for the `color_probe` library: decode one image, print its
// dominant color, and optionally probe a pixel at native (1:1) display size.

use std::env;
use std::process::ExitCode;

use color_probe::logging::{init_logging, LoggingConfig};
use color_probe::{save_swatch, ClickPoint, ColorProbe, DisplayGeometry, ProbeConfig, Report};

const USAGE: &str = "Usage: color_probe <image_path> [<x> <y>] [--swatch <out.png>]";
const SWATCH_SIZE: u32 = 100;

struct Args {
    image_path: String,
    click: Option<ClickPoint>,
    swatch_path: Option<String>,
}

fn parse_args(raw: &[String]) -> anyhow::Result<Option<Args>> {
    let mut positional = Vec::new();
    let mut swatch_path = None;
    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        if arg == "--swatch" {
            let path = iter
                .next()
                .ok_or_else(|| anyhow::anyhow!("--swatch needs an output path"))?;
            swatch_path = Some(path.clone());
        } else {
            positional.push(arg.clone());
        }
    }

    let click = match positional.len() {
        0 => return Ok(None),
        1 => None,
        3 => {
            let x: f32 = positional[1].parse()?;
            let y: f32 = positional[2].parse()?;
            Some(ClickPoint::new(x, y))
        }
        _ => anyhow::bail!("expected an image path and optionally both x and y"),
    };

    Ok(Some(Args {
        image_path: positional.swap_remove(0),
        click,
        swatch_path,
    }))
}

fn main() -> anyhow::Result<ExitCode> {
    init_logging(LoggingConfig::default());

    // --- 1. Argument Parsing & Setup ---
    let raw: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&raw)? else {
        println!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    };
    let probe = ColorProbe::new(ProbeConfig::from_env());
    log::debug!("using {:?}", probe.config());

    // --- 2. Decode ---
    let bytes = match std::fs::read(&args.image_path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("could not read {}: {}", args.image_path, err);
            println!("{}", Report::DecodeFailed.message());
            return Ok(ExitCode::FAILURE);
        }
    };
    let image = match probe.load(&bytes) {
        Ok(image) => image,
        Err(err) => {
            println!("{}", Report::from(&err).message());
            return Ok(ExitCode::FAILURE);
        }
    };
    log::info!("Image loaded: {}x{}", image.width(), image.height());

    // --- 3. Probe ---
    let mut reports = vec![probe.dominant(&image)];
    if let Some(click) = args.click {
        reports.push(probe.click(&image, DisplayGeometry::native(&image), click));
    }
    for report in &reports {
        println!("{}", report.message());
    }

    // --- 4. Swatch ---
    if let Some(path) = args.swatch_path {
        match reports.iter().rev().find_map(Report::swatch) {
            Some(color) => {
                save_swatch(&path, color, SWATCH_SIZE)?;
                println!("Swatch {} written to {}", color.hex(), path);
            }
            None => log::warn!("no color to write to {}", path),
        }
    }

    let failed = reports.iter().any(Report::is_failure);
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_prints_usage() {
        assert!(parse_args(&[]).unwrap().is_none());
    }

    #[test]
    fn path_click_and_swatch() {
        let args = parse_args(&strings(&["in.png", "10", "20.5", "--swatch", "out.png"]))
            .unwrap()
            .unwrap();
        assert_eq!(args.image_path, "in.png");
        assert_eq!(args.click, Some(ClickPoint::new(10.0, 20.5)));
        assert_eq!(args.swatch_path.as_deref(), Some("out.png"));
    }

    #[test]
    fn lone_coordinate_is_rejected() {
        assert!(parse_args(&strings(&["in.png", "10"])).is_err());
    }

    #[test]
    fn swatch_without_path_is_rejected() {
        assert!(parse_args(&strings(&["in.png", "--swatch"])).is_err());
    }
}
