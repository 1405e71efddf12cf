//! Turn controller: the state machine that turns cell clicks into turns.
//!
//! The controller owns the battlefield. A player action is validated in full
//! before anything changes; once accepted it is applied, the computer replies
//! in the same call, and a finished round is resolved before control returns.
//!
//! ```text
//!   AwaitingSelection ──own unit──▶ AwaitingTarget ──move/attack──▶ ComputerTurn
//!          ▲                          │  ▲   │                          │
//!          │◀──────self-click─────────┘  └───┘ reselect                 │
//!          │                                  │ last enemy falls        │
//!          │                                  ▼                         │
//!          └────────── next level ──── RoundResolving ◀── side wiped ───┘
//!                                             │
//!                                             ▼
//!                                          GameOver
//! ```

mod view;

pub use view::{Announcement, BoardView, CursorHint, HighlightColor, NullView, Stats};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, GameConfig};
use crate::error::{GameError, GameResult};
use crate::game::{
    BattlefieldState, COMPUTER_POOL, PLAYER_POOL, PlannedAction, ROUND_POINTS, Side, apply_damage,
    can_attack, can_move, compute_damage, generate_squad, opening_layout, place_reinforcements,
    plan_turn, round_over, to_row_col,
};
use crate::persistence::{StateStore, deserialize, serialize};

/// Where the controller is in a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the player to pick a unit.
    AwaitingSelection,
    /// A player unit is selected; waiting for a destination or target.
    AwaitingTarget,
    /// The computer is taking its turn.
    ComputerTurn,
    /// One side has been wiped out.
    RoundResolving,
    /// The game has been won or lost.
    GameOver,
}

impl Phase {
    /// Resting phase implied by a battlefield.
    #[must_use]
    pub fn of(state: &BattlefieldState) -> Self {
        if state.game_over {
            Phase::GameOver
        } else if state.current_player == Side::Computer {
            Phase::ComputerTurn
        } else if state.selected.is_some() {
            Phase::AwaitingTarget
        } else {
            Phase::AwaitingSelection
        }
    }
}

/// Something a side did on its turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// A unit was selected.
    Selected {
        /// Cell of the selected unit.
        cell: usize,
    },
    /// The selection was dropped.
    Deselected {
        /// Cell of the previously selected unit.
        cell: usize,
    },
    /// A unit moved.
    Moved {
        /// Origin cell.
        from: usize,
        /// Destination cell.
        to: usize,
    },
    /// A unit attacked.
    Attacked {
        /// Attacker's cell.
        from: usize,
        /// Target's cell.
        to: usize,
        /// Damage dealt.
        damage: f64,
        /// Whether the target died.
        killed: bool,
    },
    /// The side had nothing to do.
    Passed,
    /// The game is over; the click did nothing.
    Ignored,
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The player squad was wiped out.
    Defeat,
    /// The last level was cleared.
    Victory,
    /// A level was cleared and the next one began.
    LevelAdvanced {
        /// The new level.
        level: u8,
    },
}

/// Result of an accepted player action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionReport {
    /// What the player did.
    pub action: Action,
    /// The computer's reply, if the player's action ended the turn.
    pub reply: Option<Action>,
    /// Round resolution, if a side was wiped out.
    pub round: Option<RoundOutcome>,
}

impl ActionReport {
    const fn new(action: Action) -> Self {
        Self {
            action,
            reply: None,
            round: None,
        }
    }

    /// Check if this action used up the player's turn.
    #[must_use]
    pub const fn ended_turn(&self) -> bool {
        matches!(self.action, Action::Moved { .. } | Action::Attacked { .. })
    }
}

/// What hovering over a cell would mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Highlight to show on the hovered cell.
    pub highlight: Option<HighlightColor>,
    /// Cursor hint for the hovered cell.
    pub cursor: CursorHint,
    /// Tooltip for a unit on the cell.
    pub info: Option<String>,
}

/// Drives a game: owns the battlefield, the view, the store and the dice.
#[derive(Debug)]
pub struct GameController<V, S, R> {
    config: GameConfig,
    state: BattlefieldState,
    phase: Phase,
    view: V,
    store: S,
    rng: R,
}

impl<V: BoardView, S: StateStore, R: Rng> GameController<V, S, R> {
    /// Create a controller and start a new game.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is not playable.
    pub fn new(config: GameConfig, view: V, store: S, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut controller = Self {
            config,
            state: BattlefieldState::new(config.board_size),
            phase: Phase::AwaitingSelection,
            view,
            store,
            rng,
        };
        controller.new_game();
        Ok(controller)
    }

    /// Create a controller around an existing battlefield.
    ///
    /// The battlefield's board size overrides the configured one.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the resulting configuration is not playable.
    pub fn with_state(
        config: GameConfig,
        state: BattlefieldState,
        view: V,
        store: S,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let config = GameConfig {
            board_size: state.board_size,
            ..config
        };
        config.validate()?;
        let mut controller = Self {
            config,
            phase: Phase::of(&state),
            state,
            view,
            store,
            rng,
        };
        controller.refresh_view();
        Ok(controller)
    }

    /// The battlefield.
    #[must_use]
    pub const fn state(&self) -> &BattlefieldState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The view.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The state store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Start over at level 1 with fresh squads. The high score carries over.
    pub fn new_game(&mut self) {
        let board_size = self.config.board_size;
        let squad_size = self.config.squad_size;

        let player = generate_squad(&mut self.rng, &PLAYER_POOL, 1, squad_size);
        let computer = generate_squad(&mut self.rng, &COMPUTER_POOL, 1, squad_size);

        let mut state = BattlefieldState::new(board_size);
        state.high_score = self.state.high_score;
        state.placements = opening_layout(player, computer, board_size);
        self.drop_selection_highlight();
        self.state = state;
        self.enter(Phase::AwaitingSelection);

        info!(board_size, squad_size, "new game");
        self.view.announce(&Announcement::LevelStarted { level: 1 });
        self.refresh_view();
    }

    /// Restore the saved game if there is one.
    ///
    /// Returns `true` if a saved game was restored. Otherwise the game that
    /// [`GameController::new`] started is kept as is. Failures are logged and
    /// treated as "no saved game".
    pub fn init(&mut self) -> bool {
        match self.load_record() {
            Ok(state) => {
                self.adopt(state);
                true
            }
            Err(e) => {
                if !matches!(&e, GameError::PersistenceUnavailable { reason } if reason == NO_SAVE) {
                    warn!(error = %e, "could not restore saved game, keeping the new one");
                }
                false
            }
        }
    }

    /// Save the battlefield.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PersistenceUnavailable`] if the store fails. The
    /// session continues either way.
    pub fn save_game(&mut self) -> GameResult<()> {
        match self.store.save(&serialize(&self.state)) {
            Ok(()) => {
                info!(level = self.state.level, score = self.state.score, "game saved");
                self.view.announce(&Announcement::Saved);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                self.view.announce(&Announcement::SaveFailed(e.clone()));
                Err(e)
            }
        }
    }

    /// Replace the battlefield with the saved one.
    ///
    /// A missing or unusable save counts as "no saved game": a new game is
    /// started in its place.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PersistenceUnavailable`] if nothing is saved or
    /// the saved record is unusable.
    pub fn load_game(&mut self) -> GameResult<()> {
        match self.load_record() {
            Ok(state) => {
                self.adopt(state);
                self.view.announce(&Announcement::Loaded);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "load failed, starting a new game");
                self.view.announce(&Announcement::LoadFailed(e.clone()));
                self.new_game();
                Err(e)
            }
        }
    }

    /// Handle a click on `cell`.
    ///
    /// This is the only player input. It selects, reselects or deselects a
    /// unit, or, with a unit selected, moves it or attacks with it. A move or
    /// attack is followed by the computer's reply and, if a side is wiped
    /// out, by round resolution.
    ///
    /// Clicking the selected unit again drops the selection.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidIndex`] for a cell off the board. Other
    /// errors reject the action and leave the battlefield unchanged.
    pub fn apply_player_action(&mut self, cell: usize) -> GameResult<ActionReport> {
        to_row_col(cell, self.state.board_size)?;

        if self.state.game_over {
            return Ok(ActionReport::new(Action::Ignored));
        }
        if self.state.current_player != Side::Player {
            return Err(GameError::NotPlayerTurn);
        }

        let occupant = self.state.unit_at(cell).copied();
        let result = match (occupant, self.state.selected) {
            (Some(unit), selected) if unit.side() == Side::Player => {
                if selected == Some(cell) {
                    Ok(self.deselect(cell))
                } else {
                    Ok(self.select(cell))
                }
            }
            (_, None) => Err(GameError::NoSelection { cell }),
            (Some(_), Some(from)) => self.player_attack(from, cell),
            (None, Some(from)) => self.player_move(from, cell),
        };

        match &result {
            Ok(report) => debug!(cell, ?report, "player action accepted"),
            Err(e) => {
                debug!(cell, error = %e, "player action rejected");
                self.view.announce(&Announcement::Rejected(e.clone()));
            }
        }
        result
    }

    /// Play one player turn with the greedy planner.
    ///
    /// The planned action goes through [`GameController::apply_player_action`]
    /// as clicks, so it is validated like any other input. Returns `None` if
    /// the game is over or the player has nothing to do.
    ///
    /// # Errors
    ///
    /// Returns the error of a rejected click, such as
    /// [`GameError::NotPlayerTurn`].
    pub fn autoplay_turn(&mut self) -> GameResult<Option<ActionReport>> {
        if self.state.game_over {
            return Ok(None);
        }
        let (from, to) = match plan_turn(&self.state, Side::Player) {
            PlannedAction::Attack { from, to } | PlannedAction::Move { from, to } => (from, to),
            PlannedAction::Pass => return Ok(None),
        };
        if self.state.selected != Some(from) {
            self.apply_player_action(from)?;
        }
        self.apply_player_action(to).map(Some)
    }

    /// Work out what hovering over `cell` would show.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidIndex`] for a cell off the board.
    pub fn preview(&self, cell: usize) -> GameResult<Preview> {
        let board_size = self.state.board_size;
        to_row_col(cell, board_size)?;

        if self.state.game_over {
            return Ok(Preview {
                highlight: None,
                cursor: CursorHint::Idle,
                info: None,
            });
        }

        let hovered = self.state.unit_at(cell);
        let info = hovered.map(crate::game::Unit::info);
        if self.state.current_player == Side::Computer {
            return Ok(Preview {
                highlight: None,
                cursor: CursorHint::Waiting,
                info,
            });
        }

        let (highlight, cursor) = match (self.state.selected_placement(), hovered) {
            (_, Some(unit)) if unit.side() == Side::Player => (None, CursorHint::AwaitingMove),
            (Some(selected), None) => {
                let occupied = self.state.occupied();
                if can_move(selected.cell, cell, &selected.unit, board_size, &occupied) {
                    (Some(HighlightColor::Move), CursorHint::AwaitingMove)
                } else {
                    (None, CursorHint::Blocked)
                }
            }
            (Some(selected), Some(target)) => {
                if can_attack(selected.cell, cell, &selected.unit, board_size, Some(target)) {
                    (Some(HighlightColor::Attack), CursorHint::AwaitingAttack)
                } else {
                    (None, CursorHint::Blocked)
                }
            }
            (None, _) => (None, CursorHint::Idle),
        };

        Ok(Preview {
            highlight,
            cursor,
            info,
        })
    }

    /// Apply the preview of `cell` to the view.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidIndex`] for a cell off the board.
    pub fn hover(&mut self, cell: usize) -> GameResult<Preview> {
        let preview = self.preview(cell)?;
        if let Some(color) = preview.highlight {
            self.view.highlight_cell(cell, color);
        }
        self.view.set_cursor(preview.cursor);
        Ok(preview)
    }

    /// Undo [`GameController::hover`] for `cell`. The selection highlight stays.
    pub fn leave(&mut self, cell: usize) {
        if self.state.selected != Some(cell) {
            self.view.clear_highlight(cell);
        }
        self.view.set_cursor(self.resting_cursor());
    }

    fn select(&mut self, cell: usize) -> ActionReport {
        if let Some(previous) = self.state.selected {
            self.view.clear_highlight(previous);
        }
        self.state.select(cell);
        self.view.highlight_cell(cell, HighlightColor::Selected);
        self.enter(Phase::AwaitingTarget);
        ActionReport::new(Action::Selected { cell })
    }

    fn deselect(&mut self, cell: usize) -> ActionReport {
        self.view.clear_highlight(cell);
        self.state.deselect();
        self.enter(Phase::AwaitingSelection);
        ActionReport::new(Action::Deselected { cell })
    }

    fn player_move(&mut self, from: usize, to: usize) -> GameResult<ActionReport> {
        let board_size = self.state.board_size;
        let Some(unit) = self.state.unit_at(from).copied() else {
            return Err(GameError::NoSelection { cell: to });
        };
        if !can_move(from, to, &unit, board_size, &self.state.occupied()) {
            return Err(GameError::IllegalMove { from, to });
        }

        self.view.clear_highlight(from);
        self.state.relocate(from, to);
        self.state.deselect();
        self.refresh_view();

        Ok(self.finish_player_turn(Action::Moved { from, to }))
    }

    fn player_attack(&mut self, from: usize, to: usize) -> GameResult<ActionReport> {
        let board_size = self.state.board_size;
        let Some(attacker) = self.state.unit_at(from).copied() else {
            return Err(GameError::NoSelection { cell: to });
        };
        let target = self.state.unit_at(to).copied();
        let Some(defender) = target.filter(|t| can_attack(from, to, &attacker, board_size, Some(t)))
        else {
            return Err(GameError::IllegalAttack { from, to });
        };

        let damage = compute_damage(&attacker, &defender);
        self.view.show_transient_effect(to, damage);
        let killed = apply_damage(&mut self.state, to, damage, Side::Player);

        self.view.clear_highlight(from);
        self.state.deselect();
        self.refresh_view();

        Ok(self.finish_player_turn(Action::Attacked {
            from,
            to,
            damage,
            killed,
        }))
    }

    fn finish_player_turn(&mut self, action: Action) -> ActionReport {
        let mut report = ActionReport::new(action);

        if !round_over(&self.state) {
            report.reply = Some(self.computer_turn());
        }
        if round_over(&self.state) {
            report.round = self.resolve_round();
        }

        self.check_consistency();
        report
    }

    /// Let the computer take one turn.
    fn computer_turn(&mut self) -> Action {
        self.enter(Phase::ComputerTurn);
        self.state.switch_player();
        self.view.set_cursor(CursorHint::Waiting);

        let board_size = self.state.board_size;
        let action = match plan_turn(&self.state, Side::Computer) {
            PlannedAction::Attack { from, to } => {
                match (self.state.unit_at(from).copied(), self.state.unit_at(to).copied()) {
                    (Some(attacker), Some(defender)) => {
                        debug_assert!(can_attack(from, to, &attacker, board_size, Some(&defender)));

                        let damage = compute_damage(&attacker, &defender);
                        self.view.show_transient_effect(to, damage);
                        let killed = apply_damage(&mut self.state, to, damage, Side::Computer);
                        Action::Attacked {
                            from,
                            to,
                            damage,
                            killed,
                        }
                    }
                    _ => Action::Passed,
                }
            }
            PlannedAction::Move { from, to } => {
                self.state.relocate(from, to);
                Action::Moved { from, to }
            }
            PlannedAction::Pass => Action::Passed,
        };
        debug!(?action, "computer turn");

        if !round_over(&self.state) {
            self.state.switch_player();
            self.enter(Phase::AwaitingSelection);
        }
        self.refresh_view();
        action
    }

    /// Settle a round after a side has been wiped out.
    fn resolve_round(&mut self) -> Option<RoundOutcome> {
        self.enter(Phase::RoundResolving);

        let outcome = if self.state.count(Side::Player) == 0 {
            self.state.game_over = true;
            info!(level = self.state.level, score = self.state.score, "defeat");
            self.view.announce(&Announcement::Defeat {
                score: self.state.score,
            });
            RoundOutcome::Defeat
        } else if self.state.count(Side::Computer) == 0 {
            let level = self.state.level;
            self.state.add_score(ROUND_POINTS * u32::from(level));

            if level >= self.config.max_level {
                self.state.game_over = true;
                info!(level, score = self.state.score, "victory");
                self.view.announce(&Announcement::Victory {
                    score: self.state.score,
                });
                RoundOutcome::Victory
            } else {
                self.advance_level();
                self.view.announce(&Announcement::LevelCleared { level });
                RoundOutcome::LevelAdvanced {
                    level: self.state.level,
                }
            }
        } else {
            return None;
        };

        self.state.current_player = Side::Player;
        self.state.deselect();
        self.enter(Phase::of(&self.state));
        self.refresh_view();
        Some(outcome)
    }

    fn advance_level(&mut self) {
        self.state.advance_level();
        self.state.clear_side(Side::Computer);

        let level = self.state.level;
        let squad = generate_squad(&mut self.rng, &COMPUTER_POOL, level, self.config.squad_size);
        place_reinforcements(&mut self.state.placements, squad, self.state.board_size);

        info!(level, score = self.state.score, "level advanced");
    }

    fn load_record(&mut self) -> GameResult<BattlefieldState> {
        let record = self.store.load()?.ok_or_else(|| GameError::persistence(NO_SAVE))?;
        let state = deserialize(record)?;

        if !(1..=self.config.max_level).contains(&state.level) {
            return Err(GameError::persistence(format!(
                "level {} outside 1..={}",
                state.level, self.config.max_level
            )));
        }
        if !state.game_over && round_over(&state) {
            return Err(GameError::persistence("round already decided but game not over"));
        }
        Ok(state)
    }

    fn adopt(&mut self, state: BattlefieldState) {
        self.config.board_size = state.board_size;
        self.drop_selection_highlight();
        self.state = state;
        self.enter(Phase::of(&self.state));
        info!(level = self.state.level, score = self.state.score, "game restored");

        if let Some(cell) = self.state.selected {
            self.view.highlight_cell(cell, HighlightColor::Selected);
        }
        self.refresh_view();

        if self.phase == Phase::ComputerTurn {
            // Saved mid-reply; let the computer finish its turn.
            self.state.current_player = Side::Player;
            self.computer_turn();
            if round_over(&self.state) {
                self.resolve_round();
            }
        }
    }

    fn drop_selection_highlight(&mut self) {
        if let Some(cell) = self.state.selected {
            self.view.clear_highlight(cell);
        }
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(from = ?self.phase, to = ?phase, "phase change");
            self.phase = phase;
        }
    }

    fn resting_cursor(&self) -> CursorHint {
        if self.state.current_player == Side::Computer && !self.state.game_over {
            CursorHint::Waiting
        } else {
            CursorHint::Idle
        }
    }

    fn refresh_view(&mut self) {
        self.view.render(&self.state.placements);
        self.view.show_stats(Stats {
            level: self.state.level,
            score: self.state.score,
            high_score: self.state.high_score,
            game_over: self.state.game_over,
        });
        self.view.set_cursor(self.resting_cursor());
    }

    fn check_consistency(&self) {
        if cfg!(debug_assertions) {
            for violation in crate::game::check_invariants(&self.state) {
                tracing::error!(%violation, "battlefield inconsistent");
            }
        }
    }
}

/// Reason used when the store holds nothing.
const NO_SAVE: &str = "no saved game";
