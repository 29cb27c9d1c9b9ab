#![cfg(test)]

use muc_solver::program::parse_program;
use muc_solver::program::AssumptionTransformer;
use muc_solver::program::GroundProgram;
use muc_solver::program::ProgramOracle;
use muc_solver::program::Signature;
use muc_solver::AssumptionSet;
use muc_solver::CoreComputer;
use muc_solver::Explanation;
use muc_solver::Oracle;
use rand::rngs::SmallRng;
use rand::seq::index::sample;
use rand::SeedableRng;

/// The outcome of explaining a program in which the facts of `a/1` are assumed.
#[derive(Debug)]
struct Explained {
    ground_program: GroundProgram,
    explanation: Explanation,
    rendered: Vec<String>,
    oracle_calls: u64,
}

fn explain(source: &str) -> Explained {
    let program = parse_program(source).expect("valid program");
    let transformed = AssumptionTransformer::new([Signature::new("a", 1)]).transform(&program);
    let (ground_program, assumptions) = transformed.ground();

    let mut oracle = ProgramOracle::new(ground_program.clone());
    let mut core_computer = CoreComputer::new(&mut oracle, assumptions);
    let explanation = core_computer
        .explain()
        .expect("the oracle is not interrupted")
        .clone();
    let rendered = core_computer.muc_to_strings();
    let oracle_calls = core_computer.statistics().oracle_calls;

    Explained {
        ground_program,
        explanation,
        rendered,
        oracle_calls,
    }
}

/// Asserts that `core` is unsatisfiable and that dropping any of its literals makes it
/// satisfiable, using an oracle which has not been queried before.
fn assert_minimal_unsatisfiable(ground_program: &GroundProgram, core: &AssumptionSet) {
    let mut oracle = ProgramOracle::new(ground_program.clone());

    let outcome = oracle.solve(&core.to_vec()).expect("not interrupted");
    assert!(!outcome.is_satisfiable(), "{core} is satisfiable");

    for literal in core.iter() {
        let subset = core.without(literal);
        let outcome = oracle.solve(&subset.to_vec()).expect("not interrupted");
        assert!(
            outcome.is_satisfiable(),
            "{core} is not minimal: {literal} can be dropped"
        );
    }
}

fn domain(size: usize) -> String {
    format!("a(1..{size}).\n")
}

#[test]
fn single_constraint_is_the_core() {
    let source = format!("{}:- a(1), a(4), a(5).", domain(5));

    let explained = explain(&source);

    assert_eq!(explained.rendered, vec!["a(1)", "a(4)", "a(5)"]);
    let Explanation::Explained(core) = &explained.explanation else {
        panic!("the program is unsatisfiable");
    };
    assert_minimal_unsatisfiable(&explained.ground_program, core);
    assert!(explained.oracle_calls <= 5 + 1);
}

#[test]
fn single_forbidden_fact_is_the_core() {
    let source = format!("{}:- a(3).", domain(5));

    let explained = explain(&source);

    assert_eq!(explained.rendered, vec!["a(3)"]);
}

#[test]
fn one_of_several_independent_cores_is_found() {
    let source = format!("{}:- a(3).\n:- a(5).\n:- a(9).", domain(10));

    let explained = explain(&source);

    assert_eq!(explained.rendered.len(), 1);
    assert!(["a(3)", "a(5)", "a(9)"].contains(&explained.rendered[0].as_str()));
    let Explanation::Explained(core) = &explained.explanation else {
        panic!("the program is unsatisfiable");
    };
    assert_minimal_unsatisfiable(&explained.ground_program, core);
}

#[test]
fn overlapping_constraints_yield_one_complete_body() {
    let source = format!(
        "{}:- a(3), a(9), a(5).\n:- a(5), a(1), a(2).\n:- a(9), a(2), a(7).",
        domain(10)
    );
    let bodies = [
        vec!["a(3)", "a(5)", "a(9)"],
        vec!["a(1)", "a(2)", "a(5)"],
        vec!["a(2)", "a(7)", "a(9)"],
    ];

    let explained = explain(&source);

    assert!(
        bodies.contains(&explained.rendered.iter().map(String::as_str).collect::<Vec<_>>()),
        "{:?} is not the body of a constraint",
        explained.rendered
    );
    let Explanation::Explained(core) = &explained.explanation else {
        panic!("the program is unsatisfiable");
    };
    assert_minimal_unsatisfiable(&explained.ground_program, core);
}

#[test]
fn large_domains_yield_the_forbidden_conjunction() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut forbidden = sample(&mut rng, 1000, 10)
        .into_iter()
        .map(|index| index + 1)
        .collect::<Vec<_>>();
    forbidden.sort_unstable();

    let body = forbidden
        .iter()
        .map(|number| format!("a({number})"))
        .collect::<Vec<_>>();
    let source = format!("{}:- {}.", domain(1000), body.join(", "));

    let explained = explain(&source);

    // The atoms are interned in the order of the domain, so the core renders in numeric order.
    assert_eq!(explained.rendered, body);
    let Explanation::Explained(core) = &explained.explanation else {
        panic!("the program is unsatisfiable");
    };
    assert_minimal_unsatisfiable(&explained.ground_program, core);
    assert!(explained.oracle_calls <= 10 + 1);
}

#[test]
fn satisfiable_programs_need_no_explanation() {
    let explained = explain("{ b; c }. :- b, c.");

    assert_eq!(explained.explanation, Explanation::NoExplanationNeeded);
    assert!(explained.rendered.is_empty());
    assert_eq!(explained.oracle_calls, 1);
}

#[test]
fn satisfiable_assumptions_need_no_explanation() {
    let source = format!("{}{{ b }}.\n:- a(1), not b.", domain(3));

    let explained = explain(&source);

    assert_eq!(explained.explanation, Explanation::NoExplanationNeeded);
}

#[test]
fn unsatisfiability_without_assumptions_yields_an_empty_core() {
    let explained = explain("a(1..3). b. :- b.");

    assert_eq!(
        explained.explanation,
        Explanation::Explained(AssumptionSet::new())
    );
    assert!(explained.rendered.is_empty());
}
