use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A basketball team together with its season win/loss tally.
///
/// The tally is only ever mutated through [`Team::register_win`] and
/// [`Team::register_loss`]; everything else about a team is plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Opaque identifier assigned at construction.
    pub id: Uuid,
    /// Official team name.
    pub name: String,
    /// City the team plays for.
    pub city: String,
    /// Head coach.
    pub coach: String,
    /// Games won this season.
    pub wins: u32,
    /// Games lost this season.
    pub losses: u32,
}

impl Team {
    /// Create a new team with a fresh identifier and a zeroed tally.
    pub fn new(name: impl Into<String>, city: impl Into<String>, coach: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            city: city.into(),
            coach: coach.into(),
            wins: 0,
            losses: 0,
        }
    }

    /// Record one more win.
    pub fn register_win(&mut self) {
        self.wins += 1;
    }

    /// Record one more loss.
    pub fn register_loss(&mut self) {
        self.losses += 1;
    }

    /// Fraction of played games won, `0.0` when no games have been played.
    pub fn win_ratio(&self) -> f64 {
        let played = self.wins + self.losses;
        if played == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(played)
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_team_starts_with_zeroed_tally() {
        let team = Team::new("Lakers", "Los Angeles", "Redick");
        assert_eq!(team.wins, 0);
        assert_eq!(team.losses, 0);
        assert_eq!(team.win_ratio(), 0.0);
    }

    #[test]
    fn tally_moves_only_by_single_increments() {
        let mut team = Team::new("Celtics", "Boston", "Mazzulla");
        team.register_win();
        team.register_win();
        team.register_loss();
        assert_eq!(team.wins, 2);
        assert_eq!(team.losses, 1);
    }

    #[test]
    fn win_ratio_is_wins_over_played() {
        let mut team = Team::new("Bulls", "Chicago", "Donovan");
        team.register_win();
        team.register_win();
        team.register_win();
        team.register_loss();
        assert_eq!(team.win_ratio(), 0.75);
    }

    #[test]
    fn display_shows_name_and_city() {
        let team = Team::new("Lakers", "Los Angeles", "Redick");
        assert_eq!(team.to_string(), "Lakers (Los Angeles)");
    }
}
