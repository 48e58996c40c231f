use clap::Parser;

use wick_rs::latex::to_latex;
use wick_rs::parse::ParseMode;
use wick_rs::wick::{Wick, WickConfig};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Operator string, e.g. `c_{p1,↑} c^\dagger_{p1,↑}`.
    #[arg(value_name = "EXPR")]
    expr: String,

    /// Reject unrecognized input instead of skipping it.
    #[clap(long)]
    strict: bool,

    /// Maximum number of generated terms.
    #[clap(long, value_name = "INT", default_value = "1048576")]
    max_terms: usize,

    /// Maximum number of operators in the input.
    #[clap(long, value_name = "INT", default_value = "64")]
    max_operators: usize,

    /// Print one term per line instead of a single LaTeX sum.
    #[clap(long)]
    list: bool,

    /// Enable debug logging.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let config = WickConfig::default()
        .with_max_terms(args.max_terms)
        .with_max_operators(args.max_operators)
        .with_parse_mode(if args.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        });
    let wick = Wick::new(config);
    log::info!("wick = {:?}", wick);

    let time_total = std::time::Instant::now();
    let ops = wick_rs::parse::parse_operators(&args.expr, wick.config().parse_mode)?;
    log::info!("Parsed {} operators", ops.len());
    log::info!(
        "At most {} terms ({} inversions)",
        Wick::term_count_bound(&ops),
        wick_rs::operator::count_inversions(&ops)
    );

    let (terms, stats) = wick.normal_order_with_stats(&ops)?;
    log::info!("Done: {} terms ({}) in {:.3}s", terms.len(), stats, time_total.elapsed().as_secs_f64());

    if args.list {
        for term in &terms {
            println!("{}", term);
        }
    } else {
        println!("{}", to_latex(&terms));
    }

    Ok(())
}
