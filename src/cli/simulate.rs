//! Simulate command implementation - headless self-play.

use super::output::{Ending, SimulatedGame, SimulationSummary, format_text};
use super::{CliError, GameArgs, SimulateFormat};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tactica::{Action, GameConfig, GameController, MemoryStore, NullView};
use tracing::{debug, info};

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a game fails.
pub(crate) fn execute(
    game: GameArgs,
    games: u64,
    max_turns: u32,
    format: SimulateFormat,
    verbose: bool,
) -> Result<(), CliError> {
    let config = game.config()?;
    let seed = game.seed();
    info!(games, seed, max_turns, "starting simulation");

    let mut summary = SimulationSummary::default();
    for i in 0..games {
        let result = play_game(config, seed.wrapping_add(i), max_turns)?;
        debug!(seed = result.seed, ending = ?result.ending, score = result.score, "game finished");
        summary.add_result(result);
    }

    match format {
        SimulateFormat::Text => print!("{}", format_text(&summary, verbose)),
        SimulateFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Play one game with both sides driven by the greedy planner.
fn play_game(config: GameConfig, seed: u64, max_turns: u32) -> Result<SimulatedGame, CliError> {
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let mut controller = GameController::new(config, NullView, MemoryStore::new(), rng)?;

    let mut turns = 0;
    let mut kills = 0;
    let mut losses = 0;
    let mut ending = Ending::TurnLimit;

    while turns < max_turns {
        let Some(report) = controller.autoplay_turn()? else {
            ending = Ending::Stalled;
            break;
        };
        turns += 1;

        if matches!(report.action, Action::Attacked { killed: true, .. }) {
            kills += 1;
        }
        if matches!(report.reply, Some(Action::Attacked { killed: true, .. })) {
            losses += 1;
        }
        if let Some(end) = report.round.and_then(SimulatedGame::ending_for) {
            ending = end;
            break;
        }
    }

    let state = controller.state();
    Ok(SimulatedGame {
        seed,
        ending,
        level: state.level,
        score: state.score,
        turns,
        kills,
        losses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_game_is_deterministic() {
        let config = GameConfig::default();
        let a = play_game(config, 11, 200).unwrap();
        let b = play_game(config, 11, 200).unwrap();

        assert_eq!(a.ending, b.ending);
        assert_eq!(a.score, b.score);
        assert_eq!(a.turns, b.turns);
        assert!(a.turns <= 200);
    }

    #[test]
    fn test_turn_limit() {
        let result = play_game(GameConfig::default(), 3, 1).unwrap();
        assert!(result.turns <= 1);
        assert!(matches!(
            result.ending,
            Ending::TurnLimit | Ending::Stalled | Ending::Defeat | Ending::Victory
        ));
    }
}
