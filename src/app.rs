//! App: terminal init, event loop, best score bookkeeping.

use crate::GameConfig;
use crate::best_score::BestScore;
use crate::game::{Ending, GameState, Phase};
use crate::input::key_to_action;
use crate::lang::Message;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;

pub struct App {
    state: GameState,
    theme: Theme,
    /// Key hint lines, rendered once from the layout.
    hint: Vec<String>,
    store: BestScore,
    /// Best score on disk when the game started.
    best: u64,
    /// Problems to report once the terminal is restored.
    warnings: Vec<String>,
    /// The stored best could not be read; leave the file alone.
    store_unreadable: bool,
    /// Set once the final popup has been dismissed (or the player quit).
    done: bool,
}

impl App {
    pub fn new(config: &GameConfig, theme: Theme, store: BestScore) -> Self {
        let mut warnings = Vec::new();
        let (best, store_unreadable) = match store.load() {
            Ok(best) => (best, false),
            Err(e) => {
                warnings.push(e.to_string());
                (0, true)
            }
        };
        Self {
            state: GameState::new(config),
            hint: config.hint.render(&config.keys),
            theme,
            store,
            best,
            warnings,
            store_unreadable,
            done: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result?;
        self.finish();
        Ok(())
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.done {
            terminal.draw(|f| {
                crate::ui::draw(f, &self.state, &self.theme, &self.hint, self.best)
            })?;
            // Turn-based: block until the next key.
            if let Event::Key(key) = event::read()? {
                self.on_key(key);
            }
        }
        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.state.is_over() {
            // Any key dismisses the final popup.
            self.done = true;
            return;
        }
        self.state.handle(key_to_action(key, &self.state.keys));
        if self.state.phase == Phase::Over(Ending::Quit) {
            self.done = true;
        }
    }

    /// Save the score if it is a new best, then print the summary on the restored terminal.
    fn finish(&mut self) {
        let lang = self.state.language;
        let score = self.state.score();
        if !self.store_unreadable {
            if let Err(e) = self.store.record(score) {
                self.warnings.push(e.to_string());
            }
        }
        for w in &self.warnings {
            eprintln!("gravity-2048: {}", w);
        }
        if self.state.phase == Phase::Over(Ending::Lost) {
            println!("{}", lang.text(Message::YouLost));
        }
        println!("{}: {}", lang.text(Message::FinalScore), score);
        println!("{}: {}", lang.text(Message::BestScore), self.best.max(score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, SpawnMode};
    use crate::input::{HintLayout, KeyLayout};
    use crate::lang::Language;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app(dir: &std::path::Path) -> App {
        let config = GameConfig {
            width: 4,
            height: 4,
            keys: KeyLayout::VIM,
            hint: HintLayout::Linear,
            difficulty: SpawnMode::Normal,
            language: Language::English,
            seed: 11,
        };
        App::new(&config, Theme::classic(), BestScore::in_dir(dir))
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_keys_drive_the_game() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.state.grid = Grid::from_ranks(4, 4, &[1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        app.on_key(press('h'));
        assert_eq!(app.state.grid.rank(0, 0), 2);
        assert_eq!(app.state.score(), 4);
        assert_eq!(app.hint, vec!["[H][J][K][L]".to_string()]);
    }

    #[test]
    fn test_release_events_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let mut key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.on_key(key);
        assert!(!app.done);
    }

    #[test]
    fn test_escape_quits_and_records_score() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.state.grid = Grid::from_ranks(4, 4, &[3, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        app.on_key(press('h'));
        app.on_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.done);

        app.finish();
        assert_eq!(BestScore::in_dir(dir.path()).load().unwrap(), 16);
    }

    #[test]
    fn test_lost_game_waits_for_a_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.state.phase = Phase::Over(Ending::Lost);
        assert!(!app.done);
        app.on_key(press('x'));
        assert!(app.done);
    }

    #[test]
    fn test_corrupt_best_score_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("best_score"), "oops").unwrap();
        let app = app(dir.path());
        assert_eq!(app.best, 0);
        assert_eq!(app.warnings.len(), 1);
    }

    #[test]
    fn test_corrupt_best_score_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best_score");
        std::fs::write(&path, "oops").unwrap();
        let mut app = app(dir.path());
        app.state.grid = Grid::from_ranks(4, 4, &[3, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        app.on_key(press('h'));

        app.finish();
        assert_eq!(app.warnings.len(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "oops");
    }
}
