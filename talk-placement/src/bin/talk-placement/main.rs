use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fd_core::convert_case::Case;
use fd_core::statistics::configure_statistic_logging;
use log::error;
use log::info;
use log::LevelFilter;
use talk_placement::CostSource;
use talk_placement::PlacementInstance;
use talk_placement::PlacementModel;
use talk_placement::PlacementReport;
use talk_placement::PlacementResult;
use talk_placement::SearchStrategy;

/// Places conference talks into parallel tracks such that the total conflict cost of talks
/// sharing a track is minimal.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The number of tracks which run in parallel.
    #[arg(long, default_value_t = 6)]
    tracks: usize,

    /// The number of time slots of every track; there are `tracks * time-slots` talks.
    #[arg(long, default_value_t = 6)]
    time_slots: usize,

    /// The largest conflict cost of a single pair of talks. Random costs are drawn from
    /// `[0, max-single-cost)`.
    #[arg(long, default_value_t = 50)]
    max_single_cost: i32,

    /// The seed of the random costs; ignored when `--costs` is given.
    #[arg(long, default_value_t = 55)]
    seed: u64,

    /// A file with one `talk_a talk_b cost` triple per line, used instead of random costs.
    ///
    /// Lines starting with `#` are comments.
    #[arg(long, verbatim_doc_comment)]
    costs: Option<PathBuf>,

    /// The time limit of a search in seconds; zero or less means no limit.
    #[arg(long, default_value_t = 180, allow_negative_numbers = true)]
    timeout: i64,

    /// Search for any placement with a total cost of at most this cap instead of an optimal
    /// one.
    #[arg(long)]
    max_cost: Option<i32>,

    /// Repeat the capped search, lowering the cap by this percentage below every cost found,
    /// until no placement is found.
    #[arg(long)]
    descend_step: Option<u32>,

    /// Log the progress of the search.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print the statistics of the search after it finished.
    #[arg(short = 's', long = "log-statistics")]
    log_statistics: bool,
}

/// Which search of [`SearchStrategy`] the arguments ask for.
#[derive(Debug, Clone, Copy)]
enum Mode {
    Optimise,
    Capped(i32),
    Descend {
        initial_cap: Option<i32>,
        step_percent: u32,
    },
}

impl Args {
    fn mode(&self) -> Mode {
        match (self.descend_step, self.max_cost) {
            (Some(step_percent), initial_cap) => Mode::Descend {
                initial_cap,
                step_percent,
            },
            (None, Some(cap)) => Mode::Capped(cap),
            (None, None) => Mode::Optimise,
        }
    }
}

/// Log lines are prefixed with `%` so they read as comments next to the placement output.
fn configure_logging(args: &Args) {
    if args.log_statistics {
        configure_statistic_logging(
            "%%%mzn-stat:",
            Some("%%%mzn-stat-end"),
            Some(Case::Camel),
            None,
        );
    }

    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "% {}", record.args()))
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .target(env_logger::Target::Stdout)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    configure_logging(&args);

    match run(&args) {
        Ok(report) => {
            println!("{report}");
            report.log_statistics();
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Execution failed, error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> PlacementResult<PlacementReport> {
    let instance = PlacementInstance::balanced(args.tracks, args.time_slots, args.max_single_cost);
    instance.validate()?;

    let cost_source = match &args.costs {
        Some(path) => CostSource::File(path.clone()),
        None => CostSource::Random { seed: args.seed },
    };
    let table = cost_source.build_table(&instance)?;
    info!(
        "Placing {} talks in {} tracks with {} conflicting pairs",
        instance.no_of_talks,
        instance.no_of_parallel_tracks,
        table.iter().filter(|&(_, cost)| cost > 0).count()
    );

    let mut model = PlacementModel::build(instance, table)?;
    let mut search = SearchStrategy::new(&mut model);

    Ok(match args.mode() {
        Mode::Optimise => search.find_optimal(args.timeout),
        Mode::Capped(cap) => search.find_under_bound(Some(cap), args.timeout),
        Mode::Descend {
            initial_cap,
            step_percent,
        } => search.descend_from_above(initial_cap, step_percent, args.timeout),
    })
}
