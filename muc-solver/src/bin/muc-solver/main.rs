mod os_signal_termination;
mod result;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;

use clap::Parser;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use muc_solver::convert_case::Case;
use muc_solver::program::parse_program;
use muc_solver::program::AssumptionTransformer;
use muc_solver::program::Program;
use muc_solver::program::ProgramOracle;
use muc_solver::program::Signature;
use muc_solver::program::UnsatConstraintComputer;
use muc_solver::statistics::configure_statistic_logging;
use muc_solver::termination::Combinator;
use muc_solver::termination::DecisionBudget;
use muc_solver::termination::TerminationCondition;
use muc_solver::termination::TimeBudget;
use muc_solver::CoreComputer;
use muc_solver::CoreComputerError;
use muc_solver::Explanation;
use muc_solver::MinimisationOptions;
use os_signal_termination::OsSignal;
use result::MucSolverError;
use result::MucSolverResult;

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
    about
)]
struct Args {
    /// The program files to explain. The program is read from stdin when no file is given.
    ///
    /// Programs consist of facts (`a(1..5).`), choices (`{ b; c }.`) and integrity constraints
    /// (`:- a(1), not b.`).
    #[clap(verbatim_doc_comment)]
    instance_paths: Vec<PathBuf>,

    /// The signatures (`name/arity`) of the facts which are turned into assumptions.
    ///
    /// Can be given multiple times. Without any signature, every fact becomes an assumption.
    #[arg(short = 'a', long = "assumption-signature", value_name = "NAME/ARITY")]
    assumption_signatures: Vec<Signature>,

    /// The time limit in milliseconds for the complete computation.
    #[arg(long = "time-limit")]
    time_limit: Option<u64>,

    /// The maximum number of search decisions, summed over all oracle queries.
    #[arg(long = "decision-limit")]
    decision_limit: Option<u64>,

    /// Do not shrink the remaining candidates with the cores reported by the oracle.
    ///
    /// This results in one oracle query per literal of the initial core.
    #[arg(long = "no-core-intersection")]
    no_core_intersection: bool,

    /// Check whether the literals found to be necessary are unsatisfiable on their own before
    /// trying the next candidate.
    #[arg(long = "check-necessary-early")]
    check_necessary_early: bool,

    /// After a MUC is found, report the constraints it violates together with their locations.
    ///
    /// The assumed facts are replaced by the atoms of the MUC and the choices are assigned such
    /// that as few constraints as possible are violated.
    #[arg(long = "unsat-constraints")]
    unsat_constraints: bool,

    /// Print the program after the facts have been turned into choices, before explaining it.
    #[arg(long = "print-transformed-program")]
    print_transformed_program: bool,

    /// Log the statistics of the minimisation and of the oracle.
    #[arg(short = 's', long = "log-statistics")]
    log_statistics: bool,

    /// Enables log message output from the solver.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging("%%%muc-stat:", Some(Case::Camel), None);
    }
    let level_filter = if verbose {
        LevelFilter::Debug
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

fn run() -> MucSolverResult<()> {
    let started = Instant::now();
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics);

    if muc_solver::asserts::MUC_ASSERT_LEVEL_DEFINITION >= muc_solver::asserts::MUC_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            muc_solver::asserts::MUC_ASSERT_LEVEL_DEFINITION
        );
    }

    let program = read_program(&args.instance_paths)?;

    let transformer = AssumptionTransformer::new(args.assumption_signatures.clone());
    let transformed = transformer.transform(&program);
    if args.print_transformed_program {
        print!("{transformed}");
    }

    let (ground_program, assumptions) = transformed.ground();
    info!(
        "Explaining a program with {} atoms under {} assumptions",
        ground_program.num_atoms(),
        assumptions.len()
    );

    let termination = create_termination(args.time_limit, args.decision_limit)?;
    let mut oracle = ProgramOracle::with_termination(ground_program, termination);

    let options = MinimisationOptions {
        intersect_with_reported_cores: !args.no_core_intersection,
        check_necessary_early: args.check_necessary_early,
    };
    let mut core_computer = CoreComputer::with_options(&mut oracle, assumptions, options);
    let _ = core_computer.explain()?;

    match core_computer.explanation() {
        Explanation::NoExplanationNeeded => println!("SATISFIABLE: Instance has no MUCs"),
        Explanation::Explained(core) if core.is_empty() => println!(
            "NO MUCS CONTAINED: The unsatisfiability of this program is not induced by the provided assumptions"
        ),
        Explanation::Explained(core) => {
            println!("MUC 1");
            println!("{}", core_computer.render(core).join(" "));

            if args.unsat_constraints {
                let mut muc = core
                    .iter()
                    .filter_map(|literal| core_computer.literal_lookup().symbol(literal.atom()))
                    .cloned()
                    .collect::<Vec<_>>();
                muc.sort();

                let program = transformer.replace_assumed_facts(&program, &muc);
                print_unsat_constraints(&program, &args, started)?;
            }
        }
        Explanation::NotYetRun => return Err(CoreComputerError::NotYetComputed.into()),
    }

    oracle.log_statistics();

    Ok(())
}

/// Prints the constraints violated by `program`; the time limit covers the complete run.
fn print_unsat_constraints(
    program: &Program,
    args: &Args,
    started: Instant,
) -> MucSolverResult<()> {
    let remaining_millis = args.time_limit.map(|millis| {
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        millis.saturating_sub(elapsed)
    });
    let termination = create_termination(remaining_millis, args.decision_limit)?;

    let mut computer = UnsatConstraintComputer::with_termination(program, termination);
    let constraints = computer.compute()?;

    println!("UNSAT CONSTRAINTS");
    for constraint in &constraints {
        match &constraint.location {
            Some(location) => println!("{constraint} [{location}]"),
            None => println!("{constraint}"),
        }
    }

    computer.log_statistics();

    Ok(())
}

/// Parses every file into one program; reads stdin if there are no files.
fn read_program(instance_paths: &[PathBuf]) -> MucSolverResult<Program> {
    if instance_paths.is_empty() {
        let source = std::io::read_to_string(std::io::stdin())?;
        let mut program = parse_program(&source)
            .map_err(|error| MucSolverError::invalid_program("<stdin>", error))?;
        program.set_source_name("<stdin>");

        return Ok(program);
    }

    let mut program = Program::default();
    for path in instance_paths {
        let source = std::fs::read_to_string(path)?;
        let name = path.display().to_string();
        let mut parsed = parse_program(&source)
            .map_err(|error| MucSolverError::invalid_program(name.as_str(), error))?;
        parsed.set_source_name(&name);

        program.statements.extend(parsed.statements);
    }

    Ok(program)
}

fn create_termination(
    time_limit: Option<u64>,
    decision_limit: Option<u64>,
) -> std::io::Result<impl TerminationCondition> {
    let time_budget =
        time_limit.map(|millis| TimeBudget::starting_now(Duration::from_millis(millis)));
    let decision_budget = decision_limit.map(DecisionBudget::new);

    Ok(Combinator::new(
        OsSignal::install()?,
        Combinator::new(time_budget, decision_budget),
    ))
}
