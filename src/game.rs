//! Game state: grid, turn sequencing, win prompt, loss.

use crate::GameConfig;
use crate::grid::{Direction, Grid, SpawnMode};
use crate::input::{Action, KeyLayout};
use crate::lang::{Language, Message};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Tiles placed before the first move, always drawn from the start table.
const OPENING_TILES: usize = 2;

/// Tiles placed after every move that changed the grid.
const TILES_PER_TURN: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// Grid full with no legal move.
    Lost,
    /// Won and declined to continue.
    Retired,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// 2048 reached; waiting for continue / stop. Offered once per game.
    WonPrompt,
    Over(Ending),
}

#[derive(Debug)]
pub struct GameState {
    pub grid: Grid,
    rng: StdRng,
    pub seed: u64,
    pub keys: KeyLayout,
    pub mode: SpawnMode,
    pub language: Language,
    pub phase: Phase,
    /// Hint shown under the board until the next turn.
    pub notice: Option<Message>,
    /// Moves that changed the grid.
    pub moves: u32,
    win_offered: bool,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut grid = Grid::new(config.width, config.height);
        grid.spawn(OPENING_TILES, SpawnMode::Start, &mut rng);
        Self {
            grid,
            rng,
            seed: config.seed,
            keys: config.keys,
            mode: config.difficulty,
            language: config.language,
            phase: Phase::Playing,
            notice: None,
            moves: 0,
            win_offered: false,
        }
    }

    pub fn score(&self) -> u64 {
        self.grid.score()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    /// Advance the game by one key press.
    pub fn handle(&mut self, action: Action) {
        match self.phase {
            Phase::Over(_) => {}
            Phase::WonPrompt => self.answer_win_prompt(action),
            Phase::Playing => match action {
                Action::Gravity(direction) => self.turn(direction),
                Action::Quit => self.phase = Phase::Over(Ending::Quit),
                Action::Other(_) | Action::Unbound | Action::Confirm => {
                    self.notice = Some(Message::UnknownDirection);
                }
                Action::None => {}
            },
        }
    }

    /// Gravity, then a spawn if anything moved, then the terminal checks.
    fn turn(&mut self, direction: Direction) {
        self.notice = None;
        if self.grid.apply_gravity(direction) {
            self.grid.spawn(TILES_PER_TURN, self.mode, &mut self.rng);
            self.moves += 1;
        }
        if self.grid.is_lost() {
            self.phase = Phase::Over(Ending::Lost);
        } else if self.grid.is_won() && !self.win_offered {
            self.win_offered = true;
            self.phase = Phase::WonPrompt;
        }
    }

    fn answer_win_prompt(&mut self, action: Action) {
        match action {
            Action::Confirm => self.phase = Phase::Playing,
            Action::Other(c) if self.language.is_yes(c) => self.phase = Phase::Playing,
            Action::None => {}
            Action::Quit => self.phase = Phase::Over(Ending::Quit),
            Action::Other(_) | Action::Unbound | Action::Gravity(_) => {
                self.phase = Phase::Over(Ending::Retired);
            }
        }
    }
}
