use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};
use lcg_session::config::{
    DEFAULT_INCREMENT, DEFAULT_MODULUS, DEFAULT_MULTIPLIER, DEFAULT_SEED, DEFAULT_SEQUENCE_LENGTH,
    MAX_SEQUENCE_LENGTH,
};
use lcg_session::{GeneratorParams, SequenceEntry, SessionConfig, SessionController};
use tracing::Level;

/// Drive a linear congruential generator session; x(n)=a*x(n-1) + c mod m
///
/// The actions run in order against one session, the way button presses would
/// in an interactive front end. The resulting sequence is written to stdout.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The modulus m, must be positive.
    #[arg(short, long, default_value_t = DEFAULT_MODULUS)]
    modulus: i64,

    /// The multiplier a, reduced modulo m.
    #[arg(short = 'a', long, default_value_t = DEFAULT_MULTIPLIER, allow_negative_numbers = true)]
    multiplier: i64,

    /// The increment c, reduced modulo m.
    #[arg(short = 'c', long, default_value_t = DEFAULT_INCREMENT, allow_negative_numbers = true)]
    increment: i64,

    /// The start value of x.
    #[arg(short, long, default_value_t = DEFAULT_SEED, allow_negative_numbers = true)]
    seed: i64,

    /// Number of values a generate action produces.
    #[arg(short, long, default_value_t = DEFAULT_SEQUENCE_LENGTH,
          value_parser = clap::value_parser!(u64).range(1..=MAX_SEQUENCE_LENGTH as u64).map(|v| v as usize))]
    length: usize,

    /// Actions to perform, in order. With none, the session is primed with one sequence.
    #[arg(value_enum)]
    actions: Vec<Action>,

    /// Write the sequence as JSON instead of CSV.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity; repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum Action {
    Apply,
    Generate,
    Step,
    Reset,
}

fn write_csv(sequence: &[SequenceEntry]) {
    println!("Index,Integer,Normalized");
    for entry in sequence {
        println!("{},{},{:.10}", entry.index, entry.integer, entry.normalized);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = SessionConfig {
        params: GeneratorParams::new(args.modulus, args.multiplier, args.increment)?,
        seed: args.seed,
        length: args.length,
    };
    let params = &config.params;
    let mut session = SessionController::new();

    if args.actions.is_empty() {
        session.prime(params, config.seed, config.length)?;
    }
    for action in &args.actions {
        match action {
            Action::Apply => session.apply_settings(params, config.seed),
            Action::Generate => {
                session.generate(params, config.seed, config.length)?;
            }
            Action::Step => {
                session.step(params, config.seed);
            }
            Action::Reset => session.reset(params, config.seed),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(session.sequence())?);
    } else {
        write_csv(session.sequence());
    }

    eprintln!("{}", session.status());
    if let Some(summary) = session.summary() {
        eprintln!("{summary}");
    }
    Ok(())
}
