//! Pot-Limit Omaha equity calculator.
//!
//! Usage:
//!   cargo run --release --bin plo_calc -- --hole AhAdKsKd --players 2 --pot 100 --bet 50
//!   cargo run --release --bin plo_calc -- --request hand.json --json
//!
//! `--request` takes a JSON body with `holeCards`, `communityCards`,
//! `numPlayers`, `potSize` and `betToCall`. `--config` takes a JSON
//! `EquityConfig`; command-line options override it.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use plo_equity::{
    logging, Calculator, EngineError, EquityConfig, EquityRequest, EquityResponse, ErrorResponse,
    HandRequest, ModeSelection,
};

#[derive(Parser, Debug)]
#[command(version, about = "Pot-Limit Omaha equity and call/fold calculator", long_about = None)]
struct Args {
    /// Hero's four hole cards, e.g. AhAdKsKd
    #[arg(short = 'H', long, required_unless_present = "request")]
    hole: Option<String>,

    /// Known board cards (0, 3, 4 or 5), e.g. 7h8sKd
    #[arg(short, long, default_value = "")]
    board: String,

    /// Players at the table, hero included (2-9)
    #[arg(short = 'n', long, default_value_t = 2)]
    players: usize,

    /// Pot size before the call
    #[arg(short, long, default_value_t = 0.0)]
    pot: f64,

    /// Amount to call
    #[arg(long, default_value_t = 0.0)]
    bet: f64,

    /// JSON request file; replaces the card and money options
    #[arg(short, long, conflicts_with = "hole")]
    request: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Monte Carlo trials
    #[arg(short, long)]
    trials: Option<u64>,

    /// Worker threads (default: all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Enumerate exactly when there are at most this many completions
    #[arg(long)]
    exhaustive_limit: Option<u64>,

    /// Force a simulation mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,

    /// Also write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Debug logging on the terminal
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Auto,
    Exhaustive,
    MonteCarlo,
}

impl From<ModeArg> for ModeSelection {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => ModeSelection::Auto,
            ModeArg::Exhaustive => ModeSelection::Exhaustive,
            ModeArg::MonteCarlo => ModeSelection::MonteCarlo,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(args.verbose, args.log_file.as_deref()) {
        eprintln!("Error initializing logger: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(response) => {
            if args.json {
                match serde_json::to_string_pretty(&response) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error writing response: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_response(&response);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            if args.json {
                if let Ok(json) = serde_json::to_string_pretty(&ErrorResponse::from(&e)) {
                    println!("{}", json);
                }
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<EquityResponse, EngineError> {
    let config = build_config(args)?;
    let req = build_request(args)?;
    let calculator = Calculator::new(config);

    if !args.progress {
        return calculator.evaluate(&req);
    }

    let pb = ProgressBar::new(0);
    let template = "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta})";
    if let Ok(style) = ProgressStyle::with_template(template) {
        pb.set_style(style.progress_chars("=> "));
    }
    let result = calculator.evaluate_with_progress(&req, |done, total| {
        pb.set_length(total);
        if done > pb.position() {
            pb.set_position(done);
        }
    });
    pb.finish_and_clear();
    result
}

fn build_config(args: &Args) -> Result<EquityConfig, EngineError> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {}", path.display());
            EquityConfig::from_json_file(path)?
        }
        None => EquityConfig::default(),
    };

    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(trials) = args.trials {
        config = config.with_trials(trials);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if let Some(limit) = args.exhaustive_limit {
        config = config.with_exhaustive_limit(limit);
    }
    if let Some(mode) = args.mode {
        config = config.with_mode(mode.into());
    }

    config.validate()?;
    Ok(config)
}

fn build_request(args: &Args) -> Result<EquityRequest, EngineError> {
    let hand = match &args.request {
        Some(path) => {
            let body = fs::read_to_string(path).map_err(|e| {
                EngineError::InvalidRequest(format!("cannot read {}: {}", path.display(), e))
            })?;
            serde_json::from_str::<HandRequest>(&body).map_err(|e| {
                EngineError::InvalidRequest(format!("malformed request {}: {}", path.display(), e))
            })?
        }
        None => HandRequest {
            hole_cards: split_codes(args.hole.as_deref().unwrap_or_default())?,
            community_cards: split_codes(&args.board)?,
            num_players: args.players,
            pot_size: args.pot,
            bet_to_call: args.bet,
        },
    };
    EquityRequest::try_from(&hand)
}

fn split_codes(cards: &str) -> Result<Vec<String>, EngineError> {
    Ok(plo_equity::cards::parse_cards(cards)?
        .iter()
        .map(|card| card.to_string())
        .collect())
}

fn print_response(response: &EquityResponse) {
    println!("Equity:      {:.2}%", response.equity * 100.0);
    println!("Pot odds:    {:.2}%", response.pot_odds * 100.0);
    println!("EV:          {:+.2}", response.ev);
    println!("Decision:    {}", if response.should_call { "CALL" } else { "FOLD" });
    println!("Mode:        {} ({} trials)", response.mode, response.trials);
}
