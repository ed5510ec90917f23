//! Code for timing blocks of code

use std::{
    fmt,
    time::{Duration, Instant},
};

use ascii_tree::{write_tree, Tree};
use cpu_time::ProcessTime;
use linked_hash_map::LinkedHashMap;

/// Measurements recorded for a block of code
#[derive(Default, Copy, Clone)]
pub struct TimedCodeInfo {
    total_system_time: Duration,
    total_process_time: Duration,
    start_system: Option<Instant>,
    start_process: Option<ProcessTime>,
    runs: u64,
}

impl TimedCodeInfo {
    /// Create new [TimedCodeInfo] object
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total system time for this node.
    pub fn system_time(&self) -> Duration {
        self.total_system_time
    }

    /// Returns the total process time for this node
    pub fn process_time(&self) -> Duration {
        self.total_process_time
    }

    /// Returns the number of completed measurements
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Returns whether a measurement is currently running
    pub fn is_running(&self) -> bool {
        self.start_system.is_some()
    }
}

impl fmt::Debug for TimedCodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let run_msg = if self.is_running() {
            "currently running"
        } else {
            "currently not running"
        };
        write!(
            f,
            "TimedCodeInfo [totals (µs): {}/{}, {:?} completed runs, {}]",
            self.total_system_time.as_micros(),
            self.total_process_time.as_micros(),
            self.runs,
            run_msg,
        )
    }
}

/// Represents a block of code that is timed
///
/// Blocks form a tree: every block can contain named sub-blocks,
/// which are kept in the order they were first used.
#[derive(Debug, Default, Clone)]
pub struct TimedCode {
    info: TimedCodeInfo,
    subblocks: LinkedHashMap<String, TimedCode>,
}

impl TimedCode {
    /// Create new [TimedCode] object
    pub fn new() -> Self {
        Self::default()
    }

    /// Return an iterator through the sub-nodes
    pub fn sub_nodes(&self) -> impl Iterator<Item = (&str, &TimedCode)> {
        self.subblocks.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Return the recorded timings for this block
    pub fn timings(&self) -> &TimedCodeInfo {
        &self.info
    }

    /// Reset the current node, remove all subnodes
    pub fn reset(&mut self) {
        self.info = Default::default();
        self.subblocks.clear();
    }

    /// Navigate to a subblock (use forward slash to go multiple layers at once)
    pub fn sub(&mut self, name: &str) -> &mut TimedCode {
        let mut current_block = self;
        for part in name.split('/') {
            current_block = current_block
                .subblocks
                .entry(part.to_string())
                .or_insert_with(TimedCode::new);
        }

        current_block
    }

    /// Return the total system time this block took.
    pub fn total_system_time(&self) -> Duration {
        self.info.total_system_time
    }

    /// Return how often this block has been measured.
    pub fn runs(&self) -> u64 {
        self.info.runs
    }

    /// Start the next measurement
    pub fn start(&mut self) {
        debug_assert!(!self.info.is_running());

        self.info.start_system = Some(Instant::now());
        self.info.start_process = Some(ProcessTime::now());
    }

    /// Stop the current measurement and save the times
    ///
    /// Returns the system time of this measurement.
    pub fn stop(&mut self) -> Duration {
        let (Some(start_system), Some(start_process)) =
            (self.info.start_system.take(), self.info.start_process.take())
        else {
            log::warn!("stopped a timer that was never started");
            return Duration::ZERO;
        };

        let duration_system = start_system.elapsed();
        self.info.total_system_time += duration_system;
        self.info.total_process_time += start_process.elapsed();
        self.info.runs += 1;

        duration_system
    }

    /// Turns e.g. (Test, 0.642355,1234,56) into "Test [64.2%, 1234µs, 56x]"
    fn format_title(title: &str, percentage: f64, micros: u128, runs: u64) -> String {
        format!("{title} [{percentage:.1}%, {micros}µs, {runs}x]")
    }

    /// Create ASCII tree recursively
    fn create_tree_recursive(current_node: &TimedCode, title: String) -> Tree {
        let mut subnodes = Vec::<Tree>::new();

        for (name, block) in current_node.subblocks.iter() {
            let percentage = if current_node.info.total_system_time > Duration::ZERO {
                100.0
                    * (block.info.total_system_time.as_secs_f64()
                        / current_node.info.total_system_time.as_secs_f64())
            } else {
                0.0
            };

            subnodes.push(TimedCode::create_tree_recursive(
                block,
                TimedCode::format_title(
                    name,
                    percentage,
                    block.info.total_system_time.as_micros(),
                    block.info.runs,
                ),
            ));
        }

        if subnodes.is_empty() {
            Tree::Leaf(vec![title])
        } else {
            Tree::Node(title, subnodes)
        }
    }

    /// Creates an ASCII tree
    pub fn create_tree(&self, title: &str) -> Tree {
        let title_string = format!(
            "{title} [system/process (µs): {}/{}]",
            self.info.total_system_time.as_micros(),
            self.info.total_process_time.as_micros(),
        );
        TimedCode::create_tree_recursive(self, title_string)
    }

    /// Creates an ASCII tree and converts it to a string representation
    pub fn create_tree_string(&self, title: &str) -> String {
        let tree = self.create_tree(title);

        let mut output = String::new();
        if write_tree(&mut output, &tree).is_err() {
            log::warn!("unable to render timing tree");
        }

        output
    }
}

#[cfg(test)]
mod test {
    use super::TimedCode;
    use std::time::Duration;
    use test_log::test;

    #[test]
    fn measure_nested_blocks() {
        let mut timing = TimedCode::new();

        timing.start();
        timing.sub("Line join/Reduced").start();
        timing.sub("Line join/Reduced").stop();
        timing.sub("Line join/Reduced").start();
        timing.sub("Line join/Reduced").stop();
        timing.sub("Line join/Chained").start();
        timing.sub("Line join/Chained").stop();
        timing.stop();

        assert_eq!(timing.runs(), 1);
        assert_eq!(timing.sub("Line join/Reduced").runs(), 2);
        assert_eq!(timing.sub("Line join").sub("Chained").runs(), 1);
        assert_eq!(timing.sub("Line join").runs(), 0);

        let names = timing
            .sub("Line join")
            .sub_nodes()
            .map(|(name, _)| name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Reduced", "Chained"]);

        let tree = timing.create_tree_string("linejoin");
        assert!(tree.contains("linejoin"));
        assert!(tree.contains("Reduced"));
        assert!(tree.contains("2x"));
    }

    #[test]
    fn stop_without_start() {
        let mut timing = TimedCode::new();

        assert_eq!(timing.stop(), Duration::ZERO);
        assert_eq!(timing.runs(), 0);
    }

    #[test]
    fn reset_clears_blocks() {
        let mut timing = TimedCode::new();
        timing.sub("A").start();
        timing.sub("A").stop();

        timing.reset();

        assert_eq!(timing.sub_nodes().count(), 0);
        assert_eq!(timing.total_system_time(), Duration::ZERO);
    }
}
