//! Commonly used types and utilities for ease of import.

pub use crate::{
    AttackOutcome, AttackResult, Board, CellState, Difficulty, GameConfig, GameController,
    GameError, GameMode, PlacementOutcome, Phase, SearchMode, Side, TargetView,
    TargetingEngine,
};

#[cfg(feature = "std")]
pub use crate::init_logging;
