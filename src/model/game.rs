use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::PrimitiveDateTime;
use uuid::Uuid;

use super::team::Team;

/// Errors raised by game construction and the result transition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// A team cannot play against itself.
    #[error("home and away team must be different")]
    SameTeam,
    /// The result of a finished game cannot be registered again.
    #[error("game `{id}` is already finished")]
    AlreadyFinished {
        /// Identifier of the offending game.
        id: Uuid,
    },
}

/// A scheduled or completed game between two distinct teams.
///
/// Teams are referenced by identifier only; who played whom is answered by
/// querying the store, never by back-pointers on the teams themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Opaque identifier assigned at construction.
    pub id: Uuid,
    /// Team playing at home.
    pub home_team_id: Uuid,
    /// Visiting team.
    pub away_team_id: Uuid,
    /// Points scored by the home team, 0 until the game finishes.
    pub home_points: u32,
    /// Points scored by the away team, 0 until the game finishes.
    pub away_points: u32,
    /// Scheduled tip-off.
    pub scheduled_at: PrimitiveDateTime,
    /// Whether the final score has been registered.
    pub finished: bool,
}

impl Game {
    /// Schedule a game between two distinct teams.
    pub fn new(
        home_team_id: Uuid,
        away_team_id: Uuid,
        scheduled_at: PrimitiveDateTime,
    ) -> Result<Self, GameError> {
        if home_team_id == away_team_id {
            return Err(GameError::SameTeam);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            home_team_id,
            away_team_id,
            home_points: 0,
            away_points: 0,
            scheduled_at,
            finished: false,
        })
    }

    /// Register the final score, moving the game from scheduled to finished.
    ///
    /// The transition is one-way: a second call fails with
    /// [`GameError::AlreadyFinished`] and leaves every field untouched. The
    /// winning team gains a win and the loser a loss; a tie (unreachable
    /// under basketball scoring, but not ruled out structurally) updates
    /// neither tally.
    pub fn register_result(
        &mut self,
        home_points: u32,
        away_points: u32,
        home_team: &mut Team,
        away_team: &mut Team,
    ) -> Result<(), GameError> {
        if self.finished {
            return Err(GameError::AlreadyFinished { id: self.id });
        }
        debug_assert_eq!(home_team.id, self.home_team_id);
        debug_assert_eq!(away_team.id, self.away_team_id);

        self.home_points = home_points;
        self.away_points = away_points;
        self.finished = true;

        if home_points > away_points {
            home_team.register_win();
            away_team.register_loss();
        } else if away_points > home_points {
            away_team.register_win();
            home_team.register_loss();
        }

        Ok(())
    }

    /// Identifier of the winning team, `None` while scheduled or on a tie.
    pub fn winner_id(&self) -> Option<Uuid> {
        if !self.finished {
            return None;
        }
        match self.home_points.cmp(&self.away_points) {
            std::cmp::Ordering::Greater => Some(self.home_team_id),
            std::cmp::Ordering::Less => Some(self.away_team_id),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Absolute point difference between the two teams.
    pub fn point_margin(&self) -> u32 {
        self.home_points.abs_diff(self.away_points)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn fixtures() -> (Team, Team) {
        (
            Team::new("Lakers", "Los Angeles", "Redick"),
            Team::new("Celtics", "Boston", "Mazzulla"),
        )
    }

    #[test]
    fn a_team_cannot_play_itself() {
        let (home, _) = fixtures();
        let result = Game::new(home.id, home.id, datetime!(2025-05-04 18:30:00));
        assert_eq!(result.unwrap_err(), GameError::SameTeam);
    }

    #[test]
    fn new_game_is_scheduled_and_scoreless() {
        let (home, away) = fixtures();
        let game = Game::new(home.id, away.id, datetime!(2025-05-04 18:30:00)).unwrap();
        assert!(!game.finished);
        assert_eq!(game.home_points, 0);
        assert_eq!(game.away_points, 0);
        assert_eq!(game.winner_id(), None);
    }

    #[test]
    fn registering_a_result_updates_both_tallies() {
        let (mut home, mut away) = fixtures();
        let mut game = Game::new(home.id, away.id, datetime!(2025-05-04 18:30:00)).unwrap();

        game.register_result(80, 70, &mut home, &mut away).unwrap();

        assert!(game.finished);
        assert_eq!(game.home_points, 80);
        assert_eq!(game.away_points, 70);
        assert_eq!(home.wins, 1);
        assert_eq!(home.losses, 0);
        assert_eq!(away.wins, 0);
        assert_eq!(away.losses, 1);
        assert_eq!(game.winner_id(), Some(home.id));
        assert_eq!(game.point_margin(), 10);
    }

    #[test]
    fn away_win_credits_the_visitors() {
        let (mut home, mut away) = fixtures();
        let mut game = Game::new(home.id, away.id, datetime!(2025-05-04 18:30:00)).unwrap();

        game.register_result(88, 95, &mut home, &mut away).unwrap();

        assert_eq!(away.wins, 1);
        assert_eq!(home.losses, 1);
        assert_eq!(game.winner_id(), Some(away.id));
    }

    #[test]
    fn a_tie_finishes_the_game_but_moves_no_tally() {
        let (mut home, mut away) = fixtures();
        let mut game = Game::new(home.id, away.id, datetime!(2025-05-04 18:30:00)).unwrap();

        game.register_result(70, 70, &mut home, &mut away).unwrap();

        assert!(game.finished);
        assert_eq!((home.wins, home.losses), (0, 0));
        assert_eq!((away.wins, away.losses), (0, 0));
        assert_eq!(game.winner_id(), None);
        assert_eq!(game.point_margin(), 0);
    }

    #[test]
    fn second_registration_is_rejected_and_changes_nothing() {
        let (mut home, mut away) = fixtures();
        let mut game = Game::new(home.id, away.id, datetime!(2025-05-04 18:30:00)).unwrap();
        game.register_result(95, 88, &mut home, &mut away).unwrap();

        let err = game
            .register_result(10, 90, &mut home, &mut away)
            .unwrap_err();

        assert_eq!(err, GameError::AlreadyFinished { id: game.id });
        assert_eq!(game.home_points, 95);
        assert_eq!(game.away_points, 88);
        assert_eq!((home.wins, home.losses), (1, 0));
        assert_eq!((away.wins, away.losses), (0, 1));
    }
}
