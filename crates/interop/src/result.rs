use std::fmt;

use crate::model::Model;

/// Outcome of a single `Z3_solver_check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatStatus {
    Sat,
    Unsat,
    Unknown,
}

impl SatStatus {
    /// Map a native `Z3_lbool` (-1, 0, 1).
    pub fn from_lbool(raw: i32) -> Self {
        match raw {
            1 => SatStatus::Sat,
            -1 => SatStatus::Unsat,
            _ => SatStatus::Unknown,
        }
    }

    pub fn is_sat(self) -> bool {
        self == SatStatus::Sat
    }
}

impl fmt::Display for SatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SatStatus::Sat => "sat",
            SatStatus::Unsat => "unsat",
            SatStatus::Unknown => "unknown",
        })
    }
}

/// Result of a check together with what the solver can say about it.
#[derive(Debug)]
pub enum SolverResult<'ctx> {
    /// Satisfiable, with the model when Z3 produced one.
    Sat(Option<Model<'ctx>>),
    Unsat,
    /// Undecided, with Z3's reason (timeout, interruption, incompleteness...).
    Unknown(String),
}

impl<'ctx> SolverResult<'ctx> {
    /// Returns `true` if the result is `Sat`.
    pub fn is_sat(&self) -> bool {
        matches!(self, SolverResult::Sat(_))
    }

    /// Returns `true` if the result is `Unsat`.
    pub fn is_unsat(&self) -> bool {
        matches!(self, SolverResult::Unsat)
    }

    /// Returns `true` if the result is `Unknown`.
    pub fn is_unknown(&self) -> bool {
        matches!(self, SolverResult::Unknown(_))
    }

    pub fn status(&self) -> SatStatus {
        match self {
            SolverResult::Sat(_) => SatStatus::Sat,
            SolverResult::Unsat => SatStatus::Unsat,
            SolverResult::Unknown(_) => SatStatus::Unknown,
        }
    }

    /// Returns the model if the result is `Sat` with a model.
    pub fn model(&self) -> Option<&Model<'ctx>> {
        match self {
            SolverResult::Sat(Some(model)) => Some(model),
            _ => None,
        }
    }

    /// Take the model out of a `Sat` result.
    pub fn into_model(self) -> Option<Model<'ctx>> {
        match self {
            SolverResult::Sat(model) => model,
            _ => None,
        }
    }
}
