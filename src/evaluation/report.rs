use crate::evaluation::runs::RunRecord;
use crate::evaluation::statistics::RunStatistics;
use crate::evolution::queens::Queens;
use std::fmt;

const RULE: &str = "===========================================";

/// The best boards across all runs, fewest attacks first, ties in run order.
pub fn top_champions(records: &[RunRecord], count: usize) -> Vec<Queens> {
    let mut boards: Vec<Queens> = records.iter().map(|record| record.result.best).collect();
    boards.sort_by_key(Queens::fitness);
    boards.truncate(count);
    boards
}

/// End of trial report: one line per run, the aggregate statistics and the best boards drawn
/// out. Rendered through `Display`, so it can be printed or collected into a `String`.
pub struct Report<'a> {
    /// Every run of the trial set, in run order
    pub records: &'a [RunRecord],
    /// Aggregates computed from the same records
    pub statistics: &'a RunStatistics,
    /// How many boards to draw
    pub top_champions_count: usize,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Results")?;
        writeln!(f, "{}", RULE)?;
        for record in self.records {
            writeln!(
                f,
                "Run: {} -> Fitness: {}, Time: {:.3}ms, Generations: {}",
                record.run + 1,
                record.fitness(),
                record.elapsed_ms(),
                record.result.generations
            )?;
        }

        let statistics = self.statistics;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Mean time: {:.3}ms", statistics.time_ms.mean)?;
        writeln!(
            f,
            "Standard deviation time: {:.3}ms",
            statistics.time_ms.std_dev
        )?;
        writeln!(f, "Mean generations: {:.2}", statistics.generations.mean)?;
        writeln!(
            f,
            "Standard deviation generations: {:.2}",
            statistics.generations.std_dev
        )?;
        writeln!(
            f,
            "Solved: {}/{} ({:.1}%)",
            statistics.solved,
            statistics.runs,
            statistics.success_rate() * 100.0
        )?;
        writeln!(f, "{}", RULE)?;

        let champions = top_champions(self.records, self.top_champions_count);
        writeln!(f, "{} best queens", champions.len())?;
        for queens in &champions {
            writeln!(f, "Fitness: {}", queens.fitness())?;
            writeln!(f, "Queens: {}", queens.bits())?;
            write!(f, "{}", queens)?;
        }
        Ok(())
    }
}

/// Builds the report as a single string, ready to be printed
pub fn render_report(
    records: &[RunRecord],
    statistics: &RunStatistics,
    top_champions_count: usize,
) -> String {
    Report {
        records,
        statistics,
        top_champions_count,
    }
    .to_string()
}

/// Prints the report to the console
pub fn print_report(records: &[RunRecord], statistics: &RunStatistics, top_champions_count: usize) {
    print!(
        "{}",
        Report {
            records,
            statistics,
            top_champions_count,
        }
    );
}
