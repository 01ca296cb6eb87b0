//! gravity-2048: the 2048 sliding-tile game in the terminal.

mod app;
mod best_score;
mod game;
mod grid;
mod input;
mod lang;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use best_score::BestScore;
use clap::{Parser, ValueEnum};
use grid::SpawnMode;
use input::{HintLayout, KeyLayout};
use lang::{Language, Message};
use std::path::PathBuf;
use theme::Theme;

/// Options derived from the CLI that shape one game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub keys: KeyLayout,
    pub hint: HintLayout,
    pub difficulty: SpawnMode,
    pub language: Language,
    pub seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let language = args.language();

    if args.help {
        print!("{}", language.text(Message::HelpMsg));
        return Ok(());
    }

    let data_dir = best_score::config_dir();
    let store = BestScore::in_dir(&data_dir);

    if args.clear {
        match store.clear() {
            Ok(()) => println!("{}", language.text(Message::ClearSuccess)),
            Err(e) => {
                eprintln!("{}", language.text(Message::ClearError));
                return Err(e.into());
            }
        }
        return Ok(());
    }

    if args.best_score {
        let best = store
            .load()
            .with_context(|| format!("reading {}", store.path().display()))?;
        println!("{}: {}", language.text(Message::BestScore), best);
        return Ok(());
    }

    let theme = match args.theme.as_deref() {
        Some(name) => Theme::load(name, &theme_dirs(&data_dir))
            .with_context(|| format!("cannot load theme {:?}", name))?,
        None => Theme::classic(),
    };

    if args.show_theme {
        print!("{}", theme.preview());
        return Ok(());
    }

    let keys = args.key_layout()?;
    let hint = match args.hint_layout.as_deref() {
        Some(name) => HintLayout::parse(name, args.custom_hint.as_deref())?,
        None => HintLayout::default_for(&keys),
    };
    let config = GameConfig {
        width: args.width,
        height: args.height,
        keys,
        hint,
        difficulty: args.difficulty.into(),
        language,
        seed: args.seed.unwrap_or_else(rand::random),
    };
    let mut app = App::new(&config, theme, store);
    app.run()?;
    Ok(())
}

/// Where named themes are looked up, in order.
fn theme_dirs(data_dir: &std::path::Path) -> Vec<PathBuf> {
    vec![data_dir.join("themes"), PathBuf::from("themes")]
}

/// 2048 with gravity, in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "gravity-2048",
    version,
    about = "The 2048 sliding-tile game in the terminal.",
    disable_help_flag = true
)]
pub struct Args {
    /// Show the help page (in the selected language).
    #[arg(short, long)]
    pub help: bool,

    /// Play with the Z S Q D keys.
    #[arg(long, conflicts_with_all = ["qwerty", "vim", "keys"])]
    pub azerty: bool,

    /// Play with the W S A D keys (default).
    #[arg(long, conflicts_with_all = ["vim", "keys"])]
    pub qwerty: bool,

    /// Play with the vim keys (K J H L).
    #[arg(long, conflicts_with = "keys")]
    pub vim: bool,

    /// Four custom keys, in up down left right order.
    #[arg(long, value_name = "UDLR")]
    pub keys: Option<String>,

    /// Key hint shape: cross, square, linear or custom.
    #[arg(long, value_name = "NAME")]
    pub hint_layout: Option<String>,

    /// Pattern for the custom hint: U D L R and spaces, `/` for a new line.
    #[arg(long, value_name = "PATTERN", requires = "hint_layout")]
    pub custom_hint: Option<String>,

    #[arg(long, visible_alias = "en", conflicts_with_all = ["french", "chinese"])]
    pub english: bool,

    #[arg(long, visible_alias = "fr", conflicts_with = "chinese")]
    pub french: bool,

    #[arg(long, visible_alias = "zh")]
    pub chinese: bool,

    /// Theme file path, or name of a theme in the themes directory.
    #[arg(short, long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Print the colours of the theme and exit.
    #[arg(long)]
    pub show_theme: bool,

    #[arg(short, long, default_value = "normal")]
    pub difficulty: Difficulty,

    /// Grid width in tiles.
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u16).range(2..=8))]
    pub width: u16,

    /// Grid height in tiles.
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u16).range(2..=8))]
    pub height: u16,

    /// Seed for tile spawns; the same seed and moves replay the same game.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Delete the saved best score.
    #[arg(long)]
    pub clear: bool,

    /// Print the best score and exit.
    #[arg(long)]
    pub best_score: bool,
}

impl Args {
    fn language(&self) -> Language {
        if self.french {
            Language::French
        } else if self.chinese {
            Language::Chinese
        } else {
            Language::English
        }
    }

    fn key_layout(&self) -> Result<KeyLayout> {
        Ok(if self.azerty {
            KeyLayout::AZERTY
        } else if self.vim {
            KeyLayout::VIM
        } else if let Some(keys) = &self.keys {
            KeyLayout::custom(keys)?
        } else {
            KeyLayout::QWERTY
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Difficulty {
    #[default]
    Normal,
    /// Spawns 4s more often, and the odd 64.
    Hell,
}

impl From<Difficulty> for SpawnMode {
    fn from(d: Difficulty) -> Self {
        match d {
            Difficulty::Normal => SpawnMode::Normal,
            Difficulty::Hell => SpawnMode::Hell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["gravity-2048"]).unwrap();
        assert_eq!(args.language(), Language::English);
        assert_eq!(args.key_layout().unwrap(), KeyLayout::QWERTY);
        assert_eq!((args.width, args.height), (4, 4));
        assert_eq!(SpawnMode::from(args.difficulty), SpawnMode::Normal);
    }

    #[test]
    fn test_language_aliases() {
        let args = Args::try_parse_from(["gravity-2048", "--fr"]).unwrap();
        assert_eq!(args.language(), Language::French);
        let args = Args::try_parse_from(["gravity-2048", "--zh", "--vim"]).unwrap();
        assert_eq!(args.language(), Language::Chinese);
        assert_eq!(args.key_layout().unwrap(), KeyLayout::VIM);
    }

    #[test]
    fn test_exclusive_flags() {
        assert!(Args::try_parse_from(["gravity-2048", "--azerty", "--vim"]).is_err());
        assert!(Args::try_parse_from(["gravity-2048", "--en", "--french"]).is_err());
        assert!(Args::try_parse_from(["gravity-2048", "--qwerty", "--keys", "wsad"]).is_err());
    }

    #[test]
    fn test_grid_size_range() {
        assert!(Args::try_parse_from(["gravity-2048", "--width", "1"]).is_err());
        assert!(Args::try_parse_from(["gravity-2048", "--height", "9"]).is_err());
        let args = Args::try_parse_from(["gravity-2048", "--width", "8", "--height", "2"]).unwrap();
        assert_eq!((args.width, args.height), (8, 2));
    }

    #[test]
    fn test_custom_keys_and_difficulty() {
        let args =
            Args::try_parse_from(["gravity-2048", "--keys", "IKJL", "-d", "hell", "-h"]).unwrap();
        assert!(args.help);
        assert_eq!(SpawnMode::from(args.difficulty), SpawnMode::Hell);
        let keys = args.key_layout().unwrap();
        assert_eq!((keys.up, keys.left), ('i', 'j'));

        let args = Args::try_parse_from(["gravity-2048", "--keys", "ab"]).unwrap();
        assert!(args.key_layout().is_err());
    }
}
