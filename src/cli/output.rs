//! Output formatting utilities for CLI.

use serde::Serialize;
use tactica::RoundOutcome;

/// How a simulated game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum Ending {
    /// The last level was cleared.
    Victory,
    /// The player squad was wiped out.
    Defeat,
    /// The player had nothing to do.
    Stalled,
    /// The turn limit was hit.
    TurnLimit,
}

/// Result of one simulated game.
#[derive(Debug, Clone, Serialize)]
pub(super) struct SimulatedGame {
    /// Random seed used.
    pub(super) seed: u64,
    /// How the game ended.
    pub(super) ending: Ending,
    /// Level reached.
    pub(super) level: u8,
    /// Final score.
    pub(super) score: u32,
    /// Player turns played.
    pub(super) turns: u32,
    /// Computer units killed by the player.
    pub(super) kills: u32,
    /// Player units lost.
    pub(super) losses: u32,
}

impl SimulatedGame {
    /// Ending implied by a round outcome, if it ended the game.
    pub(super) const fn ending_for(outcome: RoundOutcome) -> Option<Ending> {
        match outcome {
            RoundOutcome::Victory => Some(Ending::Victory),
            RoundOutcome::Defeat => Some(Ending::Defeat),
            RoundOutcome::LevelAdvanced { .. } => None,
        }
    }
}

/// Aggregated results of a simulation run.
#[derive(Debug, Default, Serialize)]
pub(super) struct SimulationSummary {
    /// Games played.
    pub(super) games: u64,
    /// Games won.
    pub(super) victories: u64,
    /// Games lost.
    pub(super) defeats: u64,
    /// Games that stalled or hit the turn limit.
    pub(super) unfinished: u64,
    /// Best score seen.
    pub(super) best_score: u32,
    /// Mean score.
    pub(super) mean_score: f64,
    /// Mean level reached.
    pub(super) mean_level: f64,
    /// Mean player turns per game.
    pub(super) mean_turns: f64,
    /// Per-game results.
    pub(super) results: Vec<SimulatedGame>,
}

impl SimulationSummary {
    /// Add a game result to the summary.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn add_result(&mut self, game: SimulatedGame) {
        let n = self.results.len() as f64;
        self.mean_score = (self.mean_score * n + f64::from(game.score)) / (n + 1.0);
        self.mean_level = (self.mean_level * n + f64::from(game.level)) / (n + 1.0);
        self.mean_turns = (self.mean_turns * n + f64::from(game.turns)) / (n + 1.0);

        self.games += 1;
        match game.ending {
            Ending::Victory => self.victories += 1,
            Ending::Defeat => self.defeats += 1,
            Ending::Stalled | Ending::TurnLimit => self.unfinished += 1,
        }
        self.best_score = self.best_score.max(game.score);
        self.results.push(game);
    }
}

/// Format a simulation summary as human-readable text.
pub(super) fn format_text(summary: &SimulationSummary, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("Simulation Results ({} games)\n", summary.games));
    output.push_str(&format!("  Victories:  {}\n", summary.victories));
    output.push_str(&format!("  Defeats:    {}\n", summary.defeats));
    output.push_str(&format!("  Unfinished: {}\n", summary.unfinished));
    output.push_str(&format!(
        "  Score:      best {}  mean {:.1}\n",
        summary.best_score, summary.mean_score
    ));
    output.push_str(&format!("  Mean level: {:.2}\n", summary.mean_level));
    output.push_str(&format!("  Mean turns: {:.1}\n", summary.mean_turns));

    if verbose {
        output.push('\n');
        for game in &summary.results {
            output.push_str(&format!(
                "  seed {:>20}  {:<9}  level {}  score {:>5}  turns {:>4}  kills {:>3}  losses {:>3}\n",
                game.seed,
                format!("{:?}", game.ending),
                game.level,
                game.score,
                game.turns,
                game.kills,
                game.losses
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(ending: Ending, score: u32, level: u8) -> SimulatedGame {
        SimulatedGame {
            seed: 1,
            ending,
            level,
            score,
            turns: 10,
            kills: 2,
            losses: 1,
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = SimulationSummary::default();
        summary.add_result(game(Ending::Victory, 300, 4));
        summary.add_result(game(Ending::Defeat, 100, 2));
        summary.add_result(game(Ending::Stalled, 20, 1));

        assert_eq!(summary.games, 3);
        assert_eq!(summary.victories, 1);
        assert_eq!(summary.defeats, 1);
        assert_eq!(summary.unfinished, 1);
        assert_eq!(summary.best_score, 300);
        assert!((summary.mean_score - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_text() {
        let mut summary = SimulationSummary::default();
        summary.add_result(game(Ending::Defeat, 40, 1));

        let text = format_text(&summary, true);
        assert!(text.contains("Simulation Results (1 games)"));
        assert!(text.contains("Defeats:    1"));
        assert!(text.contains("Defeat "));
    }

    #[test]
    fn test_json_ending_names() {
        let json = serde_json::to_string(&game(Ending::TurnLimit, 0, 1)).unwrap();
        assert!(json.contains("\"ending\":\"turnlimit\""));
    }
}
