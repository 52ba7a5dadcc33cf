//! Main loop driver.
//!
//! ```text
//! Running --pass--> Running
//! Running --max_change < threshold--> Converged   (relaxation only)
//! Running --step limit reached-->     Exhausted
//! ```
//! Terminal states are never left.

use crate::config::*;
use crate::domain::*;
use crate::par_slice;
use crate::snapshot::*;
use crate::solver::*;
use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Running,
    Converged,
    Exhausted,
}

impl ControllerState {
    pub fn is_terminal(&self) -> bool {
        *self != ControllerState::Running
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Termination {
    /// Stop when a pass changes no interior cell by `threshold` or more,
    /// or after `max_steps` passes.
    Converge { threshold: f64, max_steps: usize },
    /// Always run exactly `steps` passes.
    Fixed { steps: usize },
}

impl Termination {
    pub fn max_steps(&self) -> usize {
        match self {
            Termination::Converge { max_steps, .. } => *max_steps,
            Termination::Fixed { steps } => *steps,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub state: ControllerState,
    pub steps: usize,
    /// Max change of the last pass, infinity if the regime does not track it.
    pub max_change: f64,
    pub snapshots_written: usize,
    pub snapshot_failures: usize,
    /// First completed step whose field held NaN or infinity,
    /// only looked for when the divergence check is on.
    pub first_non_finite_step: Option<usize>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn print_report(&self) {
        print!("{self}");
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.state {
            ControllerState::Converged => {
                writeln!(f, "Converged after {} passes.", self.steps)?
            }
            ControllerState::Exhausted => {
                writeln!(f, "Stopped after {} passes.", self.steps)?
            }
            ControllerState::Running => {
                writeln!(f, "Still running after {} passes.", self.steps)?
            }
        }
        if self.max_change.is_finite() {
            writeln!(f, "Final max change: {}", self.max_change)?;
        }
        writeln!(f, "Snapshots written: {}", self.snapshots_written)?;
        if self.snapshot_failures > 0 {
            writeln!(f, "Snapshots lost: {}", self.snapshot_failures)?;
        }
        if let Some(step) = self.first_non_finite_step {
            writeln!(f, "Field went non-finite at step {step}")?;
        }
        writeln!(
            f,
            "Total time taken: {:.3} seconds.",
            self.elapsed.as_secs_f64()
        )
    }
}

pub struct IterationController<
    SolverType: SolverInterface<GRID_DIMENSION>,
    const GRID_DIMENSION: usize,
> {
    solver: SolverType,
    termination: Termination,
    output_every: Option<usize>,
    final_snapshot: bool,
    divergence_check: bool,
    state: ControllerState,
    steps: usize,
    max_change: f64,
    snapshots_written: usize,
    snapshot_failures: usize,
    first_non_finite_step: Option<usize>,
}

impl<SolverType: SolverInterface<GRID_DIMENSION>, const GRID_DIMENSION: usize>
    IterationController<SolverType, GRID_DIMENSION>
{
    pub fn new(solver: SolverType, termination: Termination) -> Self {
        assert!(termination.max_steps() > 0, "step limit must be positive");
        IterationController {
            solver,
            termination,
            output_every: None,
            final_snapshot: false,
            divergence_check: false,
            state: ControllerState::Running,
            steps: 0,
            max_change: f64::INFINITY,
            snapshots_written: 0,
            snapshot_failures: 0,
            first_non_finite_step: None,
        }
    }

    /// Convergence bounded run that hands the settled field
    /// to the writer once at the end.
    pub fn relaxation(
        solver: SolverType,
        config: &RelaxationConfig<GRID_DIMENSION>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            solver,
            Termination::Converge {
                threshold: config.threshold,
                max_steps: config.max_iterations,
            },
        )
        .with_final_snapshot(true)
        .with_divergence_check(config.divergence_check))
    }

    /// Fixed length run with a snapshot every `output_every` steps.
    pub fn time_marching(
        solver: SolverType,
        config: &WaveConfig<GRID_DIMENSION>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            solver,
            Termination::Fixed {
                steps: config.total_steps,
            },
        )
        .with_output_every(config.output_every)
        .with_divergence_check(config.divergence_check))
    }

    pub fn with_output_every(mut self, output_every: usize) -> Self {
        assert!(output_every > 0, "output cadence must be positive");
        self.output_every = Some(output_every);
        self
    }

    pub fn with_final_snapshot(mut self, final_snapshot: bool) -> Self {
        self.final_snapshot = final_snapshot;
        self
    }

    pub fn with_divergence_check(mut self, divergence_check: bool) -> Self {
        self.divergence_check = divergence_check;
        self
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn solver(&self) -> &SolverType {
        &self.solver
    }

    pub fn current(&self) -> &OwnedDomain<GRID_DIMENSION> {
        self.solver.current()
    }

    pub fn into_solver(self) -> SolverType {
        self.solver
    }

    /// Advance by one pass unless a terminal state was reached.
    pub fn step<Writer: SnapshotWriter<GRID_DIMENSION>>(
        &mut self,
        writer: &mut Writer,
    ) -> ControllerState {
        if self.state.is_terminal() {
            return self.state;
        }

        if let Some(max_change) = self.solver.step() {
            self.max_change = max_change;
        }
        let step_index = self.steps;
        self.steps += 1;

        if self.divergence_check && self.first_non_finite_step.is_none() {
            let current = self.solver.current();
            if par_slice::any_non_finite(current.buffer(), self.solver.chunk_size())
            {
                eprintln!("WARNING: non-finite values after step {step_index}");
                self.first_non_finite_step = Some(step_index);
            }
        }

        if let Some(output_every) = self.output_every {
            if step_index % output_every == 0 {
                let result = writer.write_step(step_index, self.solver.current());
                self.record_snapshot(result);
            }
        }

        self.state = match self.termination {
            Termination::Converge { threshold, .. }
                if self.max_change < threshold =>
            {
                ControllerState::Converged
            }
            _ if self.steps >= self.termination.max_steps() => {
                ControllerState::Exhausted
            }
            _ => ControllerState::Running,
        };
        self.state
    }

    /// Step until a terminal state, then emit the final snapshot
    /// if configured.
    pub fn run<Writer: SnapshotWriter<GRID_DIMENSION>>(
        &mut self,
        writer: &mut Writer,
    ) -> RunReport {
        profiling::scope!("IterationController::run");
        let start = Instant::now();
        while !self.step(writer).is_terminal() {}
        let elapsed = start.elapsed();

        if self.final_snapshot {
            let result = writer.write_final(self.solver.current());
            self.record_snapshot(result);
        }

        self.report(elapsed)
    }

    fn record_snapshot(&mut self, result: Result<(), SnapshotError>) {
        match result {
            Ok(()) => self.snapshots_written += 1,
            Err(e) => {
                eprintln!("ERROR: snapshot lost after step {}: {e}", self.steps);
                self.snapshot_failures += 1;
            }
        }
    }

    pub fn report(&self, elapsed: Duration) -> RunReport {
        RunReport {
            state: self.state,
            steps: self.steps,
            max_change: self.max_change,
            snapshots_written: self.snapshots_written,
            snapshot_failures: self.snapshot_failures,
            first_non_finite_step: self.first_non_finite_step,
            elapsed,
        }
    }
}
