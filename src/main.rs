// Some vector helpers are only exercised by tests
#![allow(dead_code)]

mod canvas;
mod color;
mod error;
mod logger;
mod math3d;
mod regions;
mod report;
mod scenarios;
mod shader;
mod util;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use error::Result;
use log::debug;
use regions::Scene;
use scenarios::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use util::{clock_seed, Rng};

const DEFAULT_OUT_DIR: &str = "images";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Sun,
    Grid,
    Rays,
    Geometry,
    All,
    Scene(PathBuf),
    Inspect(PathBuf),
}

#[derive(Debug)]
struct Options {
    command: Command,
    width: usize,
    height: usize,
    out_dir: PathBuf,
    seed: Option<u64>,
    verbose: bool,
}

fn print_help() {
    println!("Usage: pixeldump [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  sun              Gradient sky with a gradient sun (circle.ppm)");
    println!("  grid             4x4 grid of noisy rectangles (grid.ppm)");
    println!("  rays             Ray directions as colors (rays.ppm)");
    println!("  geometry         Vector and triangle report (geometry.txt)");
    println!("  all              Everything above");
    println!("  scene FILE       Render a JSON scene file");
    println!("  inspect FILE     Check a pixel dump and print its size");
    println!();
    println!("Options:");
    println!(
        "  --width W, -w W           Image width (default: {})",
        DEFAULT_WIDTH
    );
    println!(
        "  --height H, -h H          Image height (default: {})",
        DEFAULT_HEIGHT
    );
    println!("  --resolution WxH, -r WxH  Set both (e.g., 1920x1080)");
    println!(
        "  --out-dir DIR, -o DIR     Output directory (default: {})",
        DEFAULT_OUT_DIR
    );
    println!("  --seed N                  Seed for noise fills (default: clock)");
    println!("  --verbose, -v             Debug logging");
    println!("  --help                    Show this help message");
}

/// Parse command line arguments. `Err` carries a usage message.
fn parse_args(args: &[String]) -> std::result::Result<Options, String> {
    let mut width = DEFAULT_WIDTH;
    let mut height = DEFAULT_HEIGHT;
    let mut out_dir = PathBuf::from(DEFAULT_OUT_DIR);
    let mut seed = None;
    let mut verbose = false;
    let mut command = None;

    let value = |i: usize, flag: &str| -> std::result::Result<String, String> {
        args.get(i + 1)
            .cloned()
            .ok_or_else(|| format!("{} needs a value", flag))
    };
    let number = |text: &str, flag: &str| -> std::result::Result<usize, String> {
        text.parse::<usize>()
            .map_err(|_| format!("{} expects a number, got '{}'", flag, text))
    };

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--width" | "-w" => {
                width = number(&value(i, arg)?, arg)?;
                i += 1;
            },
            "--height" | "-h" => {
                height = number(&value(i, arg)?, arg)?;
                i += 1;
            },
            "--resolution" | "-r" => {
                // WxH format (e.g., 1920x1080)
                let text = value(i, arg)?;
                let (w, h) = text
                    .split_once('x')
                    .ok_or_else(|| format!("{} expects WxH, got '{}'", arg, text))?;
                width = number(w, arg)?;
                height = number(h, arg)?;
                i += 1;
            },
            "--out-dir" | "-o" => {
                out_dir = PathBuf::from(value(i, arg)?);
                i += 1;
            },
            "--seed" => {
                let text = value(i, arg)?;
                seed = Some(
                    text.parse::<u64>()
                        .map_err(|_| format!("--seed expects a number, got '{}'", text))?,
                );
                i += 1;
            },
            "--verbose" | "-v" => verbose = true,
            "sun" => command = Some(Command::Sun),
            "grid" => command = Some(Command::Grid),
            "rays" => command = Some(Command::Rays),
            "geometry" => command = Some(Command::Geometry),
            "all" => command = Some(Command::All),
            "scene" => {
                command = Some(Command::Scene(PathBuf::from(value(i, arg)?)));
                i += 1;
            },
            "inspect" => {
                command = Some(Command::Inspect(PathBuf::from(value(i, arg)?)));
                i += 1;
            },
            other => return Err(format!("Unknown argument '{}'", other)),
        }
        i += 1;
    }

    let command = command.ok_or_else(|| "No command given".to_string())?;
    Ok(Options {
        command,
        width,
        height,
        out_dir,
        seed,
        verbose,
    })
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        debug!("Created {}", dir.display());
    }
    Ok(())
}

fn run(options: &Options) -> Result<()> {
    let (width, height) = (options.width, options.height);
    let out = |name: &str| options.out_dir.join(name);

    let wants = |c: &Command| options.command == *c || options.command == Command::All;

    if matches!(
        options.command,
        Command::Sun | Command::Grid | Command::Rays | Command::Geometry | Command::All
    ) {
        ensure_dir(&options.out_dir)?;
    }

    if wants(&Command::Sun) {
        scenarios::draw_sun(&out("circle.ppm"), width, height)?;
    }
    if wants(&Command::Grid) {
        let seed = options.seed.unwrap_or_else(clock_seed);
        debug!("Noise seed {}", seed);
        scenarios::draw_noise_grid(&out("grid.ppm"), width, height, &mut Rng::new(seed))?;
    }
    if wants(&Command::Rays) {
        scenarios::draw_rays(&out("rays.ppm"), width, height)?;
    }
    if wants(&Command::Geometry) {
        scenarios::write_geometry_report(&out("geometry.txt"))?;
    }

    match &options.command {
        Command::Scene(path) => {
            let mut scene = Scene::load(path)?;
            if options.seed.is_some() {
                scene.seed = options.seed;
            }
            if let Some(parent) = scene.output.parent() {
                if !parent.as_os_str().is_empty() {
                    ensure_dir(parent)?;
                }
            }
            scene.render()?.draw()?;
        },
        Command::Inspect(path) => {
            let text = fs::read_to_string(path)?;
            let image = canvas::parse_dump(&text, path)?;
            println!(
                "{}: {} {}x{}",
                path.display(),
                canvas::MAGIC_NUMBER,
                image.width(),
                image.height()
            );
        },
        _ => {},
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help") {
        print_help();
        return ExitCode::SUCCESS;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Use --help for usage.");
            return ExitCode::from(2);
        },
    };

    if let Err(e) = logger::init(options.verbose) {
        eprintln!("Logger already installed: {}", e);
    }

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pixeldump: {}", e);
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let options = parse_args(&args(&["sun"])).unwrap();
        assert_eq!(options.command, Command::Sun);
        assert_eq!((options.width, options.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(options.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
        assert_eq!(options.seed, None);
        assert!(!options.verbose);
    }

    #[test]
    fn test_flags() {
        let options = parse_args(&args(&[
            "-r", "64x48", "--seed", "7", "-o", "out", "-v", "grid",
        ]))
        .unwrap();
        assert_eq!(options.command, Command::Grid);
        assert_eq!((options.width, options.height), (64, 48));
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.out_dir, PathBuf::from("out"));
        assert!(options.verbose);
    }

    #[test]
    fn test_scene_takes_path() {
        let options = parse_args(&args(&["scene", "sun.json", "-w", "10"])).unwrap();
        assert_eq!(options.command, Command::Scene(PathBuf::from("sun.json")));
        assert_eq!(options.width, 10);
    }

    #[test]
    fn test_bad_args() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--width"])).is_err());
        assert!(parse_args(&args(&["--width", "abc", "sun"])).is_err());
        assert!(parse_args(&args(&["-r", "100", "sun"])).is_err());
        assert!(parse_args(&args(&["paint"])).is_err());
    }

    #[test]
    fn test_run_writes_outputs() {
        let dir = std::env::temp_dir().join(format!("pixeldump-run-{}", std::process::id()));
        let options = Options {
            command: Command::All,
            width: 8,
            height: 4,
            out_dir: dir.clone(),
            seed: Some(1),
            verbose: false,
        };
        run(&options).unwrap();
        for name in ["circle.ppm", "grid.ppm", "rays.ppm", "geometry.txt"] {
            assert!(dir.join(name).exists(), "missing {}", name);
        }
        let inspect = Options {
            command: Command::Inspect(dir.join("rays.ppm")),
            ..options
        };
        run(&inspect).unwrap();
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_zero_size_is_reported() {
        let options = Options {
            command: Command::Sun,
            width: 0,
            height: 4,
            out_dir: std::env::temp_dir(),
            seed: None,
            verbose: false,
        };
        assert!(matches!(
            run(&options),
            Err(error::Error::InvalidDimensions { .. })
        ));
    }
}
