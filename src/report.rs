//! Plain-text rendering of solve results.
//!
//! The search engine never prints; everything shown here is read from a
//! [`SolveReport`] after the fact.

use std::fmt;

use crate::models::Solution;
use crate::scheduler::{MoveKind, SearchState, SolveReport};

const RULE: &str = "==================================================";

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MoveKind::Transfer => "transfer",
            MoveKind::InterSwap => "inter-machine swap",
            MoveKind::IntraSwap => "intra-machine swap",
        })
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchState::Searching => "searching",
            SearchState::LocalOptimum => "local optimum",
            SearchState::IterationLimit => "iteration limit",
        })
    }
}

fn write_machines(f: &mut fmt::Formatter<'_>, solution: &Solution, times: &[i64]) -> fmt::Result {
    for ((machine, sequence), time) in solution.sequences().zip(times) {
        writeln!(f, "Machine {machine}: seq={sequence:?}, time={time}")?;
    }
    Ok(())
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kpi = &self.kpi;

        writeln!(f, "[PHASE 1: INITIAL SOLUTION (FFD)]")?;
        write_machines(f, &self.initial, &self.initial_times)?;
        writeln!(f, "Initial makespan: {}", kpi.initial_makespan)?;
        writeln!(f)?;

        writeln!(f, "[PHASE 2: LOCAL SEARCH]")?;
        for record in &self.result.trace {
            writeln!(
                f,
                "=> Iteration {}: improvement found, new makespan {} via {} (gain {})",
                record.iteration,
                record.makespan,
                record.kind(),
                record.gain
            )?;
        }
        match self.result.state {
            SearchState::LocalOptimum => {
                writeln!(f, "=> Local optimum reached. No further improvement.")?
            }
            state => writeln!(f, "=> Search stopped: {state}.")?,
        }
        writeln!(f)?;

        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "FINAL RESULT FOR {}",
            self.scenario.as_deref().unwrap_or("unknown scenario")
        )?;
        writeln!(f, "{RULE}")?;
        write_machines(f, &self.result.solution, &self.final_times)?;
        writeln!(f)?;

        writeln!(f, "--- Metrics ---")?;
        writeln!(f, "Final makespan (MS): {}", kpi.final_makespan)?;
        writeln!(f, "Lower bound (DDLB): {:.2}", kpi.lower_bound)?;
        writeln!(f, "MS/DDLB ratio: {:.4}", kpi.ratio)?;
        writeln!(f, "Improvement over initial solution: {}", kpi.improvement)?;
        writeln!(f, "Iterations: {}", kpi.iterations)?;
        write!(
            f,
            "Local search time: {:.2} ms",
            kpi.search_duration.as_secs_f64() * 1000.0
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Instance, Job, SetupMatrix};
    use crate::scheduler::{LocalSearchConfig, MoveKind, Solver};

    fn make_instance(times: &[i64], machines: usize) -> Instance {
        let jobs = times
            .iter()
            .enumerate()
            .map(|(i, &p)| Job::new(i + 1).with_processing_time(p))
            .collect();
        Instance::new(jobs, SetupMatrix::zeros(times.len()), machines).unwrap()
    }

    #[test]
    fn test_report_lists_machines_and_metrics() {
        let inst = make_instance(&[10, 4, 6], 2).with_scenario("S2");
        let text = Solver::default().solve(&inst).to_string();

        assert!(text.contains("Machine 1: seq=[1], time=10"));
        assert!(text.contains("Machine 2: seq=[3, 2], time=10"));
        assert!(text.contains("Initial makespan: 10"));
        assert!(text.contains("Local optimum reached"));
        assert!(text.contains("FINAL RESULT FOR S2"));
        assert!(text.contains("Lower bound (DDLB): 10.00"));
        assert!(text.contains("MS/DDLB ratio: 1.0000"));
        assert!(text.contains("Iterations: 1"));
        assert!(!text.contains("=> Iteration"));
    }

    #[test]
    fn test_report_renders_trace() {
        // [1, 2] pays setup 10; swapping removes it.
        let mut setups = SetupMatrix::zeros(2);
        setups.set_cost(1, 2, 10);
        let jobs = vec![
            Job::new(1).with_processing_time(1),
            Job::new(2).with_processing_time(1),
        ];
        let inst = Instance::new(jobs, setups, 1).unwrap();
        let text = Solver::default().solve(&inst).to_string();

        assert!(text.contains("Initial makespan: 12"));
        assert!(text.contains(
            "=> Iteration 1: improvement found, new makespan 2 via intra-machine swap (gain 10)"
        ));
        assert!(text.contains("FINAL RESULT FOR unknown scenario"));
        assert!(text.contains("Machine 1: seq=[2, 1], time=2"));
        assert!(text.contains("Improvement over initial solution: 10"));
    }

    #[test]
    fn test_report_shows_iteration_limit() {
        let inst = make_instance(&[5, 1, 1, 1, 1, 1], 2);
        let solver = Solver::new(LocalSearchConfig::default().with_max_iterations(0));
        let text = solver.solve(&inst).to_string();
        assert!(text.contains("Search stopped: iteration limit."));
    }

    #[test]
    fn test_move_kind_display() {
        assert_eq!(MoveKind::Transfer.to_string(), "transfer");
        assert_eq!(MoveKind::InterSwap.to_string(), "inter-machine swap");
        assert_eq!(MoveKind::IntraSwap.to_string(), "intra-machine swap");
    }
}
