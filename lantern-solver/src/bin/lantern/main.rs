mod result;

use std::io::Write;

use clap::Parser;
use itertools::Itertools;
use lantern_solver::automaton::Automaton;
use lantern_solver::constraints;
use lantern_solver::convert_case::Case;
use lantern_solver::options::RegularFiltering;
use lantern_solver::options::RegularPropagatorOptions;
use lantern_solver::options::SolverOptions;
use lantern_solver::statistics::configure_statistic_logging;
use lantern_solver::statistics::should_log_statistics;
use lantern_solver::Solver;
use log::error;
use log::info;
use log::LevelFilter;
use result::LanternError;
use result::LanternResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The language which the sequence has to be a word of.
    ///
    /// Symbols are digits, or arbitrary integers written as '<-12>'. The expression supports
    /// concatenation, alternation ('|'), classes ('[0-3]'), grouping, and the repetitions '*',
    /// '+', '?', '{n}', '{n,}' and '{n,m}'.
    #[arg(long, verbatim_doc_comment)]
    regex: String,

    /// The number of variables in the sequence.
    ///
    /// Possible values: usize
    #[arg(long, verbatim_doc_comment)]
    length: usize,

    /// Restricts the initial domain of one position, e.g. '2=0,1'. Positions are counted from 0.
    ///
    /// Positions without a given domain range over the alphabet of the automaton.
    #[arg(long = "domain", verbatim_doc_comment)]
    domains: Vec<String>,

    /// How the regular propagator maintains its layered graph.
    #[arg(long, value_enum, default_value_t)]
    filtering: RegularFiltering,

    /// Enables log message output from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging("%% stat:", None, Some(Case::Camel), None);
    }

    let level_filter = if verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> LanternResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics);

    let automaton = Automaton::from_regex(&args.regex)?;
    info!(
        "The automaton of '{}' has {} states",
        args.regex,
        automaton.num_states()
    );

    let mut domains = vec![automaton.alphabet(); args.length];
    for domain in &args.domains {
        let (position, values) = parse_domain(domain)?;
        if position >= args.length {
            return Err(LanternError::PositionOutOfRange {
                position,
                length: args.length,
            });
        }
        domains[position] = values;
    }

    let mut solver = Solver::with_options(SolverOptions {
        regular: RegularPropagatorOptions::new(args.filtering),
    });

    let variables = domains
        .into_iter()
        .enumerate()
        .map(|(position, values)| {
            // A variable needs a value; an empty alphabet only accepts the empty sequence.
            let values = if values.is_empty() { vec![0] } else { values };
            solver.new_named_sparse_integer(values, format!("x[{position}]"))
        })
        .collect_vec();

    let constraint = constraints::regular(variables.clone(), automaton);
    info!("Posting {}", constraint.display(solver.variable_names()));

    let mut stdout = std::io::stdout();
    if solver.add_constraint(constraint).post().is_err() {
        writeln!(stdout, "INFEASIBLE")?;
    } else {
        for variable in variables {
            let name = solver.variable_names().display_name(variable);
            writeln!(
                stdout,
                "{name} = {{{}}}",
                solver.domain(variable).iter().join(", ")
            )?;
        }
    }

    if should_log_statistics() {
        solver.log_statistics(args.verbose);
    }

    Ok(())
}

/// Parses `position=value,value,...`.
fn parse_domain(domain: &str) -> LanternResult<(usize, Vec<i32>)> {
    let (position, values) = domain
        .split_once('=')
        .ok_or_else(|| LanternError::invalid_domain(domain))?;

    let position = position
        .trim()
        .parse::<usize>()
        .map_err(|_| LanternError::invalid_domain(domain))?;
    let values = values
        .split(',')
        .map(|value| value.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| LanternError::invalid_domain(domain))?;

    Ok((position, values))
}
