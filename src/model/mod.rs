//! Domain entities for the league: teams and the games they play.

/// Game entity and the result-registration transition.
pub mod game;
/// Team entity with its season win/loss tally.
pub mod team;

pub use game::{Game, GameError};
pub use team::Team;
