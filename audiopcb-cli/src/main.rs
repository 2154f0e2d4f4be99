//! Thin CLI driver for the audiopcb generation pipeline: loads a netlist and
//! an optional configuration file, runs the pipeline to a finalized or
//! failed outcome, and persists the board through the Specctra session text
//! backend. Exit codes distinguish the stage a failure came from per the
//! informative CLI surface.
use std::path::PathBuf;
use std::process::ExitCode;

use audiopcb::backend::specctra::SpecctraSessionBackend;
use audiopcb::backend::{emit_board, BoardBackend};
use audiopcb::config::{load_config, Config};
use audiopcb::model::board::{four_layer_stack, six_layer_stack, two_layer_stack, BoardPreset, Layer};
use audiopcb::netlist::import::from_reference_json;
use audiopcb::registry::Registry;
use audiopcb::validation::Category;
use audiopcb::{Context, PipelineDriver, PipelineState};
use clap::{ArgEnum, Parser};
use eyre::{Result, WrapErr};

const EXIT_OK: u8 = 0;
const EXIT_VALIDATION_FAILED: u8 = 1;
const EXIT_PLACEMENT_FAILED: u8 = 2;
const EXIT_ROUTING_FAILED: u8 = 3;
const EXIT_ZONE_FAILED: u8 = 4;
const EXIT_CONFIG_ERROR: u8 = 5;

#[derive(Copy, Clone, Debug, ArgEnum)]
enum PresetArg {
    Eurorack,
    Pedal,
    Desktop,
    Rack,
    Custom,
}

#[derive(Parser, Debug)]
#[clap(name = "audiopcb", about = "constraint-driven PCB generation pipeline for audio circuits")]
struct Args {
    /// Path to a reference-format netlist JSON document.
    netlist: PathBuf,

    /// Board preset to build on.
    #[clap(long, arg_enum, default_value = "pedal")]
    preset: PresetArg,

    /// Board width in millimetres, required when `--preset custom`.
    #[clap(long)]
    width_mm: Option<f64>,

    /// Board height in millimetres, required when `--preset custom`.
    #[clap(long)]
    height_mm: Option<f64>,

    /// Layer count of the board stack.
    #[clap(long, default_value_t = 2)]
    layers: u32,

    /// Path to an `audiopcb.toml` configuration file; defaults are used if
    /// omitted.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Path the finalized board is persisted to via the Specctra session
    /// text backend. Skipped when omitted or when the pipeline fails.
    #[clap(long)]
    output: Option<PathBuf>,

    /// Return after the first pass's validation stage without refinement.
    #[clap(long)]
    validate_only: bool,

    /// Raise the minimum severity logged from warning to info.
    #[clap(long)]
    verbose: bool,
}

fn board_preset(args: &Args) -> Result<BoardPreset> {
    Ok(match args.preset {
        PresetArg::Eurorack => BoardPreset::Eurorack,
        PresetArg::Pedal => BoardPreset::Pedal,
        PresetArg::Desktop => BoardPreset::Desktop,
        PresetArg::Rack => BoardPreset::Rack,
        PresetArg::Custom => {
            let width_mm = args.width_mm.ok_or_else(|| eyre::eyre!("--width-mm is required for --preset custom"))?;
            let height_mm = args.height_mm.ok_or_else(|| eyre::eyre!("--height-mm is required for --preset custom"))?;
            BoardPreset::Custom { width_mm, height_mm }
        }
    })
}

fn layer_stack(layers: u32) -> Result<Vec<Layer>> {
    match layers {
        2 => Ok(two_layer_stack()),
        4 => Ok(four_layer_stack()),
        6 => Ok(six_layer_stack()),
        n => eyre::bail!("unsupported layer count {n}; expected 2, 4, or 6"),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    let filter = std::env::var("RUSTAUDIOPCB_LOG").unwrap_or_else(|_| default_filter.to_string());
    pretty_env_logger::formatted_builder().parse_filters(&filter).init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    color_eyre::install()?;
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            match load_config(dir) {
                Ok(c) => c,
                Err(e) => {
                    log::error!("configuration error: {e}");
                    return Ok(ExitCode::from(EXIT_CONFIG_ERROR));
                }
            }
        }
        None => Config::default(),
    };

    let netlist_json = std::fs::read_to_string(&args.netlist)
        .wrap_err_with(|| format!("failed to read netlist '{}'", args.netlist.display()))?;

    let registry = Registry::new();
    let netlist = match from_reference_json(&netlist_json, &registry) {
        Ok(n) => n,
        Err(e) => {
            log::error!("netlist import error: {e}");
            return Ok(ExitCode::from(EXIT_CONFIG_ERROR));
        }
    };

    let preset = board_preset(&args)?;
    let layers = layer_stack(args.layers)?;

    let mut run_config = config;
    if args.validate_only {
        run_config.refinement.refinement_budget = 0;
    }

    let ctx = Context::new(&registry, &run_config);
    let mut driver = PipelineDriver::new(ctx);

    let timestamp = std::time::SystemTime::now().duration_since(std::time::SystemTime::UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);

    let outcome = match driver.run(netlist, preset, layers, timestamp) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("pipeline error: {e}");
            let code = match e {
                audiopcb::pipeline::PipelineError::Placement(_) => EXIT_PLACEMENT_FAILED,
                audiopcb::pipeline::PipelineError::ZoneSynth(_) => EXIT_ZONE_FAILED,
                audiopcb::pipeline::PipelineError::Validation(_) => EXIT_VALIDATION_FAILED,
            };
            return Ok(ExitCode::from(code));
        }
    };

    println!("{}", outcome.report.to_markdown());

    match outcome.state {
        PipelineState::Finalized => {
            if let Some(output) = &args.output {
                let mut backend = SpecctraSessionBackend::new(args.netlist.file_stem().and_then(|s| s.to_str()).unwrap_or("board"));
                emit_board(&mut backend, &outcome.board);
                backend.persist(output).wrap_err("failed to persist board")?;
                log::info!("board persisted to {}", output.display());
            }
            Ok(ExitCode::from(EXIT_OK))
        }
        PipelineState::Failed => {
            let has_connectivity_issue = outcome.report.issues.iter().any(|i| i.category == Category::Connectivity);
            let code = if has_connectivity_issue { EXIT_ROUTING_FAILED } else { EXIT_VALIDATION_FAILED };
            Ok(ExitCode::from(code))
        }
        other => {
            log::error!("pipeline ended in unexpected state {other}");
            Ok(ExitCode::from(EXIT_VALIDATION_FAILED))
        }
    }
}
