//! This module defines the experiments that can be run by the binary.

use std::{io::Write, time::Duration};

use colored::Colorize;
use linejoin_physical::{
    meta::TimedCode,
    tabular::{
        operations::{validate_line_join, LineJoinStrategy},
        relation::{Relation, Value},
    },
};

use crate::{cli::ExperimentArgs, error::CliError, fixtures, generator::RandomGenerator};

/// Default number of tuples per relation for [Experiment::Random]
const DEFAULT_RANDOM_ROWS: usize = 100;
/// Default number of tuples per block for [Experiment::Dangling]
const DEFAULT_DANGLING_ROWS: usize = 1000;
/// Largest value used for the join attributes in [Experiment::Random]
const RANDOM_VALUE_LIMIT: Value = 5000;

/// Experiments that can be selected on the command line
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Experiment {
    /// Natural join of two fixed relations
    Pairwise,
    /// Line join of four fixed relations using semi-join reduction
    Reduced,
    /// Line join of four fixed relations using chained natural joins
    Chained,
    /// Compare both strategies on random relations
    Random,
    /// Compare both strategies on relations with many dangling tuples
    Dangling,
    /// Run all of the above
    All,
}

impl Experiment {
    /// All experiments, in the order in which [Experiment::All] runs them
    const EVERY: [Experiment; 5] = [
        Experiment::Pairwise,
        Experiment::Reduced,
        Experiment::Chained,
        Experiment::Random,
        Experiment::Dangling,
    ];

    /// Replace every occurrence of [Experiment::All] by the individual experiments.
    pub fn expand(experiments: &[Experiment]) -> Vec<Experiment> {
        experiments
            .iter()
            .flat_map(|experiment| match experiment {
                Experiment::All => Self::EVERY.to_vec(),
                other => vec![*other],
            })
            .collect()
    }

    /// Short description of the experiment
    pub fn title(&self) -> &'static str {
        match self {
            Experiment::Pairwise => "natural join of two relations",
            Experiment::Reduced => "line join by semi-join reduction",
            Experiment::Chained => "line join by chaining natural joins",
            Experiment::Random => "timing on random relations",
            Experiment::Dangling => "timing on relations with dangling tuples",
            Experiment::All => "all experiments",
        }
    }
}

/// Outcome of evaluating the same line join with both strategies
#[derive(Debug)]
pub struct Comparison {
    /// Result of [LineJoinStrategy::Reduced]
    pub reduced: Relation,
    /// Time spent by [LineJoinStrategy::Reduced]
    pub reduced_time: Duration,
    /// Result of [LineJoinStrategy::Chained]
    pub chained: Relation,
    /// Time spent by [LineJoinStrategy::Chained]
    pub chained_time: Duration,
}

impl Comparison {
    /// Return whether both strategies computed the same set of tuples.
    pub fn is_equivalent(&self) -> bool {
        self.reduced.attribute_names() == self.chained.attribute_names()
            && self.reduced.tuple_set() == self.chained.tuple_set()
    }
}

/// Runs experiments and writes their output
#[derive(Debug)]
pub struct ExperimentRunner<W: Write> {
    out: W,
    args: ExperimentArgs,
    generator: RandomGenerator,
    timing: TimedCode,
}

impl<W: Write> ExperimentRunner<W> {
    /// Create a new [ExperimentRunner] that writes to `out`.
    pub fn new(out: W, args: ExperimentArgs) -> Result<Self, CliError> {
        args.validate()?;

        let generator = RandomGenerator::new(args.seed);
        log::info!("Random seed: {}", generator.seed());

        Ok(Self {
            out,
            args,
            generator,
            timing: TimedCode::new(),
        })
    }

    /// Return the timing information collected so far.
    pub fn timing(&self) -> &TimedCode {
        &self.timing
    }

    /// Return the writer this runner writes to.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run the given experiments in order.
    ///
    /// The overall timer is stopped even if one of the experiments fails.
    pub fn run_all(&mut self, experiments: &[Experiment]) -> Result<(), CliError> {
        self.timing.start();
        let result = self.run_in_order(experiments);
        self.timing.stop();

        result
    }

    fn run_in_order(&mut self, experiments: &[Experiment]) -> Result<(), CliError> {
        for (number, experiment) in Experiment::expand(experiments).into_iter().enumerate() {
            let heading = format!("Output for experiment {}: {}", number + 1, experiment.title());
            writeln!(self.out, "{}\n", heading.bold())?;

            log::info!("Running experiment \"{}\" ...", experiment.title());
            self.run(experiment)?;
            writeln!(self.out)?;
        }

        Ok(())
    }

    /// Run a single experiment.
    pub fn run(&mut self, experiment: Experiment) -> Result<(), CliError> {
        match experiment {
            Experiment::Pairwise => self.pairwise(),
            Experiment::Reduced => self.fixed_line_join(LineJoinStrategy::Reduced),
            Experiment::Chained => self.fixed_line_join(LineJoinStrategy::Chained),
            Experiment::Random => {
                let rows = self.random_rows()?;
                let relations = random_relations(&mut self.generator, rows);
                self.timed_comparison("Random", &relations)
            }
            Experiment::Dangling => {
                let rows = self.dangling_rows()?;
                let relations = dangling_relations(&mut self.generator, rows);
                self.timed_comparison("Dangling", &relations)
            }
            Experiment::All => self.run_all(&Experiment::EVERY),
        }
    }

    fn random_rows(&self) -> Result<Value, CliError> {
        base_size(self.args.rows.unwrap_or(DEFAULT_RANDOM_ROWS))
    }

    fn dangling_rows(&self) -> Result<Value, CliError> {
        base_size(self.args.rows.unwrap_or(DEFAULT_DANGLING_ROWS))
    }

    /// Print a relation preceded by a caption.
    fn print_relation(&mut self, caption: &str, relation: &Relation) -> Result<(), CliError> {
        writeln!(self.out, "{caption}:")?;
        writeln!(self.out, "{relation}")?;

        Ok(())
    }

    /// Print the input relations of a line join, named R1, R2, ...
    fn print_inputs(&mut self, relations: &[Relation]) -> Result<(), CliError> {
        for (index, relation) in relations.iter().enumerate() {
            let caption = match relation.name() {
                Some(name) => format!("Relation {name}"),
                None => format!("Relation R{}", index + 1),
            };
            self.print_relation(&caption, relation)?;
        }

        Ok(())
    }

    fn pairwise(&mut self) -> Result<(), CliError> {
        let [r1, r2] = fixtures::pairwise_relations();
        let joined = r1.natural_join(&r2);

        self.print_inputs(&[r1, r2])?;
        self.print_relation("Join between relations R1 and R2", &joined)
    }

    fn fixed_line_join(&mut self, strategy: LineJoinStrategy) -> Result<(), CliError> {
        let relations = fixtures::line_join_relations();
        validate_line_join(&relations)?;

        let chain = relations
            .iter()
            .skip(1)
            .fold(relations[0].clone(), |joined, relation| {
                joined.natural_join(relation)
            });
        let (result, _) = self.evaluate("Fixed", strategy, &relations);

        self.print_inputs(&relations)?;
        self.print_relation("Result of chain of natural joins of R1, R2, R3 & R4", &chain)?;
        self.print_relation(
            &format!("Result of line join using {strategy} of R1, R2, R3 & R4"),
            &result,
        )?;

        if chain.tuple_set() != result.tuple_set() {
            log::warn!("line join using {strategy} differs from the chain of natural joins");
        }

        Ok(())
    }

    /// Evaluate a line join with the given strategy and record the time it takes.
    fn evaluate(
        &mut self,
        block: &str,
        strategy: LineJoinStrategy,
        relations: &[Relation],
    ) -> (Relation, Duration) {
        let path = format!("{block}/{strategy}");

        self.timing.sub(&path).start();
        let result = strategy.evaluate(relations);
        let elapsed = self.timing.sub(&path).stop();

        log::debug!(
            "{block}: {strategy} computed {} tuples in {}µs",
            result.row_count(),
            elapsed.as_micros()
        );

        (result, elapsed)
    }

    /// Evaluate a line join with both strategies and compare the results.
    pub fn compare(&mut self, block: &str, relations: &[Relation]) -> Result<Comparison, CliError> {
        validate_line_join(relations)?;

        let (reduced, reduced_time) = self.evaluate(block, LineJoinStrategy::Reduced, relations);
        let (chained, chained_time) = self.evaluate(block, LineJoinStrategy::Chained, relations);

        Ok(Comparison {
            reduced,
            reduced_time,
            chained,
            chained_time,
        })
    }

    fn timed_comparison(&mut self, block: &str, relations: &[Relation]) -> Result<(), CliError> {
        let comparison = self.compare(block, relations)?;

        writeln!(
            self.out,
            "Time taken for line join ({}): {} microseconds.",
            LineJoinStrategy::Reduced,
            comparison.reduced_time.as_micros()
        )?;
        writeln!(
            self.out,
            "Time taken for line join ({}): {} microseconds.",
            LineJoinStrategy::Chained,
            comparison.chained_time.as_micros()
        )?;
        writeln!(self.out)?;

        if comparison.is_equivalent() {
            writeln!(
                self.out,
                "{}",
                "The two methods of executing the query produced equivalent results.".green()
            )?;
        } else {
            writeln!(
                self.out,
                "{}",
                "The two methods of executing the query did not produce equivalent results.".red()
            )?;
        }

        writeln!(
            self.out,
            "The line join query has {} result tuples.",
            comparison.reduced.row_count()
        )?;

        if self.args.print_results {
            writeln!(self.out)?;
            self.print_relation(
                &format!("Results of the line join query ({})", LineJoinStrategy::Reduced),
                &comparison.reduced,
            )?;
            self.print_relation(
                &format!("Results of the line join query ({})", LineJoinStrategy::Chained),
                &comparison.chained,
            )?;
        }

        Ok(())
    }
}

/// Convert the number of rows given on the command line into a [Value].
fn base_size(rows: usize) -> Result<Value, CliError> {
    Value::try_from(rows).map_err(|_| CliError::InvalidParameter {
        parameter: format!("--rows {rows} is too large"),
    })
}

/// Returns the line join `R1(A, B), R2(B, C), R3(C, D)` with
/// `R1 = {(i, x_i)}`, `R2 = {(y_i, i)}` and `R3 = {(i, i)}` for `i` in `1..=n`,
/// where `x_i` and `y_i` are random values.
pub fn random_relations(generator: &mut RandomGenerator, n: Value) -> Vec<Relation> {
    let mut r1 = Relation::with_name("R1", ["A", "B"]);
    let mut r2 = Relation::with_name("R2", ["B", "C"]);
    let mut r3 = Relation::with_name("R3", ["C", "D"]);

    for i in 1..=n {
        r1.insert_tuple(&[i, generator.random_int(1, RANDOM_VALUE_LIMIT)]);
        r2.insert_tuple(&[generator.random_int(1, RANDOM_VALUE_LIMIT), i]);
        r3.insert_tuple(&[i, i]);
    }

    vec![r1, r2, r3]
}

/// Returns the line join `R1(A, B), R2(B, C), R3(C, D)`
/// where `R1 ⋈ R2` has `2n² + 1` tuples but only `n + 1` of them have a partner in `R3`:
/// `(i, 5, 8)` for `i` in `1..=n` and `(2n + 1, 2n + 2, 8)`.
///
/// The tuples of each relation are shuffled.
pub fn dangling_relations(generator: &mut RandomGenerator, n: Value) -> Vec<Relation> {
    let mut rows1 = Vec::<[Value; 2]>::new();
    let mut rows2 = Vec::<[Value; 2]>::new();
    let mut rows3 = Vec::<[Value; 2]>::new();

    for i in 1..=n {
        rows1.push([i, 5]);
        rows2.push([5, i]);
    }
    for i in n + 1..=2 * n {
        rows1.push([i, 7]);
        rows2.push([7, i]);
    }
    rows1.push([2 * n + 1, 2 * n + 2]);
    rows2.push([2 * n + 2, 8]);

    let lower = 2 * n + 2;
    let upper = lower.max(3 * n);
    for _ in 0..2 * n {
        rows3.push([
            generator.random_int(lower, upper),
            generator.random_int(1, upper),
        ]);
    }
    rows3.push([8, 30]);

    generator.shuffle(&mut rows1);
    generator.shuffle(&mut rows2);
    generator.shuffle(&mut rows3);

    vec![
        Relation::from_rows(["A", "B"], rows1).named("R1"),
        Relation::from_rows(["B", "C"], rows2).named("R2"),
        Relation::from_rows(["C", "D"], rows3).named("R3"),
    ]
}
