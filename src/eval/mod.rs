//! Position evaluation.
//!
//! Scores a position as a single number, higher favouring Black (Black is
//! the maximizing side throughout the engine). Implementations are
//! interchangeable strategies behind one interface; the searcher only
//! depends on the trait.

mod centre;
mod material;
mod phased;

use serde::{Deserialize, Serialize};

use crate::board::State;

pub use centre::CentreHeuristic;
pub use material::MaterialHeuristic;
pub use phased::PhasedHeuristic;

/// An evaluation strategy. Higher values favour Black.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, state: &State) -> f64;
}

/// Configuration selector for the built-in heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    Centre,
    Phased,
    Material,
}

impl HeuristicKind {
    pub fn build(self) -> Box<dyn Heuristic> {
        match self {
            HeuristicKind::Centre => Box::new(CentreHeuristic),
            HeuristicKind::Phased => Box::new(PhasedHeuristic),
            HeuristicKind::Material => Box::new(MaterialHeuristic),
        }
    }
}

impl Default for HeuristicKind {
    fn default() -> Self {
        HeuristicKind::Phased
    }
}
