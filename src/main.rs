use clap::{Parser, Subcommand};
use photofx::config::{self, PhotofxConfig};
use photofx::convert::{ConvertError, Converter, ResizeOptions};
use photofx::effects::{self, EffectError};
use photofx::imaging::{Compression, OutputFormat};
use photofx::output;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "photofx")]
#[command(about = "Apply photographic effects and resize images")]
#[command(long_about = "\
Apply photographic effects and resize images

Effects run external tools: the ImageMagick `convert` / `composite`
programs, or effect scripts from the scripts directory. Resizing is done
in-process.

Layout next to photofx.toml (all paths configurable):

  photofx.toml          # Optional config (see 'photofx gen-config')
  scripts/              # Effect scripts: sketch, vintage1, splittone1, ...
  assets/               # Overlays: pencil_tile.gif, texture_fabric.gif

Run 'photofx effects' to list every effect and the command it runs.
Set RUST_LOG=debug (or pass -vv) to log each command line before it runs.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (default: ./photofx.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply a named effect to an image
    Apply {
        /// Effect name (see `photofx effects`)
        effect: String,
        input: PathBuf,
        output: PathBuf,
        /// Print the execution result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resize an image, keeping its aspect ratio
    Resize {
        input: PathBuf,
        output: PathBuf,
        /// Target width in pixels (0 = derive from height)
        #[arg(long, default_value_t = 0)]
        width: u32,
        /// Target height in pixels (0 = derive from width)
        #[arg(long, default_value_t = 0)]
        height: u32,
        /// Output format, overriding the config
        #[arg(long)]
        format: Option<OutputFormat>,
        /// Compression effort, overriding the config
        #[arg(long)]
        compression: Option<Compression>,
        /// Quality 1-100, overriding the config
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        quality: Option<u32>,
    },
    /// List available effects
    Effects {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Verify that every program and asset the effects need is present
    Check,
    /// Print a stock photofx.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Effects { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(effects::definitions())?);
            } else {
                output::print_effect_list(effects::definitions());
            }
        }
        Command::Apply {
            effect,
            input,
            output: out,
            json,
        } => {
            let converter = load_converter(cli.config.as_deref())?;
            match converter.effect(&input, &out, &effect) {
                Ok(result) if json => println!("{}", serde_json::to_string_pretty(&result)?),
                Ok(result) => output::print_execution(&result, &out),
                Err(ConvertError::Effect(EffectError::ExternalToolFailure { effect, result })) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        output::print_execution(&result, &out);
                    }
                    return Err(format!("effect '{effect}' failed").into());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Resize {
            input,
            output: out,
            width,
            height,
            format,
            compression,
            quality,
        } => {
            let converter = load_converter(cli.config.as_deref())?;
            let options = ResizeOptions {
                format,
                compression,
                quality,
            };
            let written = converter.resize_with(&input, &out, width, height, &options)?;
            let format = format.unwrap_or(converter.config().output.format);
            output::print_resize(&out, written, format);
        }
        Command::Check => {
            let converter = load_converter(cli.config.as_deref())?;
            let statuses = converter.check_tools();
            output::print_tool_status(&statuses);

            let total = effects::definitions().len();
            let ready = output::count_ready_effects(effects::definitions(), &statuses);
            println!("==> {ready} of {total} effects ready");
            if ready < total {
                return Err("some effects are missing programs or assets".into());
            }
        }
    }

    Ok(())
}

/// `-v` count → log level. `RUST_LOG` still wins when set.
fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Load config from `--config` or `./photofx.toml`; tool paths resolve against
/// the directory the config came from.
fn load_converter(config_path: Option<&Path>) -> Result<Converter, config::ConfigError> {
    let (config, base_dir): (PhotofxConfig, PathBuf) = match config_path {
        Some(path) => {
            let config = config::load_config_file(path)?;
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf();
            (config, base)
        }
        None => (config::load_config(Path::new("."))?, PathBuf::from(".")),
    };
    log::debug!("tool paths relative to {}", base_dir.display());
    Ok(Converter::new(config, &base_dir))
}
