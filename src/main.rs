//! Tablut evaluator -- scores Ashton Tablut positions.
//!
//! By default this binary reads linear-notation states from stdin, one per
//! line, and writes `eval attacker <score> defender <score>` for each.
//! With `--watch` it connects to the game server instead and prints the
//! configured side's score for every state the server sends.
//!
//! Options:
//!   --host HOST     Server host (default: localhost)
//!   --port PORT     Server port (default: 5800 white, 5801 black)
//!   --side SIDE     white or black (default: white)
//!   --timeout SECS  Connect/read/write timeout (default: 60)
//!   --watch         Score states received from the server
//!   --trace         Log every weighted feature term
//!   --help          Show this message

use std::env;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use tablut::board::Side;
use tablut::config::ClientConfig;
use tablut::eval::{AttackerEvaluator, DefenderEvaluator, LogTrace};
use tablut::protocol::{parse_linear, ClientError, TablutClient};
use tablut::BoardState;

struct Options {
    config: ClientConfig,
    watch: bool,
    trace: bool,
}

/// Both evaluators, sharing one trace setting.
struct Evaluators {
    attacker: AttackerEvaluator,
    defender: DefenderEvaluator,
}

impl Evaluators {
    fn new(trace: bool) -> Self {
        let mut attacker = AttackerEvaluator::new();
        let mut defender = DefenderEvaluator::new();
        if trace {
            attacker = attacker.with_trace(Arc::new(LogTrace));
            defender = defender.with_trace(Arc::new(LogTrace));
        }
        Evaluators { attacker, defender }
    }

    fn for_side(&self, side: Side, state: &BoardState) -> Result<f64, tablut::EvalError> {
        match side {
            Side::Attacker => self.attacker.evaluate(state),
            Side::Defender => self.defender.evaluate(state),
        }
    }
}

fn main() {
    let opts = match parse_args(env::args().skip(1)) {
        Ok(Some(opts)) => opts,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            std::process::exit(1);
        }
    };

    init_logging(opts.trace);
    let evaluators = Evaluators::new(opts.trace);

    let result = if opts.watch {
        watch(&opts.config, &evaluators)
    } else {
        score_stdin(&evaluators)
    };
    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

/// Parses command-line arguments. `Ok(None)` means help was requested.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Options>, String> {
    let mut host: Option<String> = None;
    let mut port: Option<u16> = None;
    let mut side = Side::Defender;
    let mut timeout: Option<Duration> = None;
    let mut watch = false;
    let mut trace = false;

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {}", name))
        };
        match arg.as_str() {
            "--host" => host = Some(value("--host")?),
            "--port" => {
                let v = value("--port")?;
                port = Some(v.parse().map_err(|_| format!("invalid --port value: '{}'", v))?);
            }
            "--side" => {
                let v = value("--side")?;
                side = Side::from_name(&v).ok_or_else(|| format!("invalid --side value: '{}'", v))?;
            }
            "--timeout" => {
                let v = value("--timeout")?;
                let secs: u64 = v
                    .parse()
                    .ok()
                    .filter(|&s| s > 0)
                    .ok_or_else(|| format!("invalid --timeout value: '{}'", v))?;
                timeout = Some(Duration::from_secs(secs));
            }
            "--watch" => watch = true,
            "--trace" => trace = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    let mut config = ClientConfig::for_side(side);
    if let Some(h) = host {
        config.host = h;
    }
    if let Some(p) = port {
        config.port = p;
    }
    if let Some(t) = timeout {
        config.timeout = t;
    }
    Ok(Some(Options { config, watch, trace }))
}

fn print_usage() {
    eprintln!("Usage: tablut [OPTIONS]");
    eprintln!();
    eprintln!("Reads linear-notation states from stdin and prints both evaluations.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --host HOST     Server host (default: localhost)");
    eprintln!("  --port PORT     Server port (default: 5800 white, 5801 black)");
    eprintln!("  --side SIDE     white or black (default: white)");
    eprintln!("  --timeout SECS  Connect/read/write timeout (default: 60)");
    eprintln!("  --watch         Score states received from the server");
    eprintln!("  --trace         Log every weighted feature term");
    eprintln!("  --help          Show this message");
}

fn init_logging(trace: bool) {
    let default = if trace { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Scores each stdin line until EOF or `quit`.
fn score_stdin(evaluators: &Evaluators) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut input = stdin.lock();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!("skipping line that is not valid UTF-8: {}", e);
                continue;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "quit" {
            break;
        }

        let state = match parse_linear(trimmed) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("skipping malformed state: {}", e);
                continue;
            }
        };

        let scores = evaluators
            .attacker
            .evaluate(&state)
            .and_then(|a| evaluators.defender.evaluate(&state).map(|d| (a, d)));
        match scores {
            Ok((a, d)) => writeln!(out, "eval attacker {} defender {}", a, d)?,
            Err(e) => writeln!(out, "eval error {}", e)?,
        }
        out.flush()?;
    }
    Ok(())
}

/// Prints the configured side's score for each state the server sends.
fn watch(config: &ClientConfig, evaluators: &Evaluators) -> Result<(), Box<dyn Error>> {
    let mut client = TablutClient::new(config.clone());
    client.connect()?;

    loop {
        let state = match client.receive_state() {
            Ok(s) => s,
            Err(ClientError::Closed) => break,
            Err(e) => return Err(e.into()),
        };
        match evaluators.for_side(config.side, &state) {
            Ok(score) => println!(
                "eval {} {} turn {}",
                config.side.color_name(),
                score,
                state.turn().code()
            ),
            Err(e) => println!("eval error {}", e),
        }
        if state.turn().is_game_over() {
            break;
        }
    }
    client.close();
    Ok(())
}
