#![deny(unsafe_code)]
//! CLI binary for backdrop background animations.
//!
//! Subcommands:
//! - `render <field>` runs a field for N frames and writes the last one as PNG
//! - `render --scene scene.json` does the same from a scene document
//! - `list` prints available fields and palettes

mod error;

use backdrop_core::{FixedRate, FrameSource, Immediate, Palette, Scene};
use backdrop_engines::render::render_scene;
use backdrop_engines::FieldKind;
use clap::{Parser, Subcommand};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "backdrop", about = "Procedural page-background animations")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a field for N frames and write the final frame as PNG.
    Render {
        /// Field name ("particles" or "stars"). Ignored with --scene.
        #[arg(required_unless_present = "scene")]
        field: Option<String>,

        /// Read field, size, params, seed and frames from a JSON scene file.
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 120)]
        frames: u64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Field parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Frames per second; 0 renders as fast as possible.
        #[arg(long, default_value_t = 0)]
        fps: u32,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// List available fields and palettes.
    List,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn read_scene(path: &Path) -> Result<Scene, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    Ok(Scene::from_json(&text)?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let fields = FieldKind::list_fields();
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "fields": fields,
                    "palettes": palettes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Fields:");
                for name in fields {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Render {
            field,
            scene,
            width,
            height,
            frames,
            seed,
            params,
            fps,
            output,
        } => {
            let scene = match (scene, field) {
                (Some(path), _) => read_scene(&path)?,
                (None, Some(field)) => {
                    let params: serde_json::Value = serde_json::from_str(&params)
                        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
                    Scene {
                        params,
                        frames,
                        ..Scene::new(&field, width, height, seed)
                    }
                }
                (None, None) => {
                    return Err(CliError::Input("a field name or --scene is required".into()))
                }
            };
            log::info!("rendering scene {scene:?}");

            let mut source: Box<dyn FrameSource> = if fps == 0 {
                Box::new(Immediate)
            } else {
                Box::new(FixedRate::per_second(fps))
            };
            let surface = render_scene(&scene, source.as_mut())?;
            backdrop_engines::snapshot::write_png(&surface, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "field": scene.field,
                    "width": scene.width,
                    "height": scene.height,
                    "frames": scene.frames,
                    "seed": scene.seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, {} frames, seed {}) -> {}",
                    scene.field,
                    scene.width,
                    scene.height,
                    scene.frames,
                    scene.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_defaults_match_documented_values() {
        let cli = Cli::try_parse_from(["backdrop", "render", "stars"]).unwrap();
        match cli.command {
            Command::Render {
                field,
                width,
                height,
                frames,
                seed,
                fps,
                output,
                ..
            } => {
                assert_eq!(field.as_deref(), Some("stars"));
                assert_eq!((width, height), (800, 600));
                assert_eq!(frames, 120);
                assert_eq!(seed, 42);
                assert_eq!(fps, 0);
                assert_eq!(output, PathBuf::from("output.png"));
            }
            Command::List => panic!("expected render"),
        }
    }

    #[test]
    fn render_requires_field_or_scene() {
        assert!(Cli::try_parse_from(["backdrop", "render"]).is_err());
        assert!(Cli::try_parse_from(["backdrop", "render", "--scene", "s.json"]).is_ok());
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::try_parse_from(["backdrop", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn missing_scene_file_is_io_error() {
        let dir = std::env::temp_dir().join("backdrop-cli-no-such-dir");
        let err = read_scene(&dir.join("scene.json")).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }
}
