//! Tile themes: one line per rank 0..=17, `"#rrggbb, #rrggbb"` (background, label) → ratatui Color.

use crate::grid::{MAX_RANK, tile_value};
use crossterm::style::Stylize;
use ratatui::style::Color;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Lines in a theme file: ranks 0 (empty cell) through MAX_RANK.
pub const THEME_LINES: usize = MAX_RANK as usize + 1;

const THEME_EXTENSION: &str = "theme";

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no theme named {name:?} (searched {searched})")]
    NotFound { name: String, searched: String },
    #[error("corrupted theme file: {0}")]
    ThemeCorrupt(String),
    #[error("invalid rgb values: ({0}, {1}, {2})")]
    ColorOutOfRange(i64, i64, i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Checked constructor; every component must be in 0..=255.
    pub fn new(r: i64, g: i64, b: i64) -> Result<Self, ThemeError> {
        match (u8::try_from(r), u8::try_from(g), u8::try_from(b)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self { r, g, b }),
            _ => Err(ThemeError::ColorOutOfRange(r, g, b)),
        }
    }

    const fn hex(v: u32) -> Self {
        Self {
            r: (v >> 16) as u8,
            g: (v >> 8) as u8,
            b: v as u8,
        }
    }

    #[inline]
    pub const fn color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }

    fn term_color(self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Background and label colour of one rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileColors {
    pub bg: Rgb,
    pub label: Rgb,
}

const fn tile(bg: u32, label: u32) -> TileColors {
    TileColors {
        bg: Rgb::hex(bg),
        label: Rgb::hex(label),
    }
}

/// Built-in palette; same colours as themes/classic.theme.
const CLASSIC: [TileColors; THEME_LINES] = [
    tile(0xcdc1b4, 0x776e65),
    tile(0xeee4da, 0x776e65),
    tile(0xede0c8, 0x776e65),
    tile(0xf2b179, 0xf9f6f2),
    tile(0xf59563, 0xf9f6f2),
    tile(0xf67c5f, 0xf9f6f2),
    tile(0xf65e3b, 0xf9f6f2),
    tile(0xedcf72, 0xf9f6f2),
    tile(0xedcc61, 0xf9f6f2),
    tile(0xedc850, 0xf9f6f2),
    tile(0xedc53f, 0xf9f6f2),
    tile(0xedc22e, 0xf9f6f2),
    tile(0x3c3a32, 0xf9f6f2),
    tile(0x3c3a32, 0xf9f6f2),
    tile(0x3c3a32, 0xf9f6f2),
    tile(0x3c3a32, 0xf9f6f2),
    tile(0x3c3a32, 0xf9f6f2),
    tile(0x3c3a32, 0xf9f6f2),
];

/// Board frame colours, not part of the theme file.
const FRAME: Rgb = Rgb::hex(0xbbada0);
const TEXT: Rgb = Rgb::hex(0xf9f6f2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    tiles: [TileColors; THEME_LINES],
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            tiles: CLASSIC,
        }
    }

    /// Load a theme by path, or by name as `<name>.theme` in the first of `search_dirs` that has it.
    pub fn load(name: &str, search_dirs: &[PathBuf]) -> Result<Self, ThemeError> {
        let path = resolve(name, search_dirs)?;
        let content = std::fs::read_to_string(&path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        Self::parse(&stem, &content)
    }

    /// Parse theme file content. Trailing blank lines are ignored; anything else must be
    /// exactly one `background, label` pair per rank.
    pub fn parse(name: &str, content: &str) -> Result<Self, ThemeError> {
        let lines: Vec<&str> = content.lines().map(str::trim).collect();
        let used = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
        if used != THEME_LINES {
            return Err(ThemeError::ThemeCorrupt(format!(
                "expected {} lines, found {}",
                THEME_LINES, used
            )));
        }
        let mut tiles = [TileColors::default(); THEME_LINES];
        for (rank, line) in lines[..used].iter().enumerate() {
            let (bg, label) = line.split_once(',').ok_or_else(|| {
                ThemeError::ThemeCorrupt(format!(
                    "line {}: expected \"#rrggbb, #rrggbb\", got {:?}",
                    rank + 1,
                    line
                ))
            })?;
            tiles[rank] = TileColors {
                bg: parse_color(bg).map_err(|e| at_line(e, rank + 1))?,
                label: parse_color(label).map_err(|e| at_line(e, rank + 1))?,
            };
        }
        Ok(Self {
            name: name.to_string(),
            tiles,
        })
    }

    /// Colours for `rank`; ranks above MAX_RANK use the last line.
    #[inline]
    pub fn tile(&self, rank: u8) -> TileColors {
        self.tiles[(rank as usize).min(THEME_LINES - 1)]
    }

    pub fn frame(&self) -> Color {
        FRAME.color()
    }

    pub fn text(&self) -> Color {
        TEXT.color()
    }

    /// One line per rank: value, then background and label swatches (ANSI true colour).
    pub fn preview(&self) -> String {
        let mut out = format!("{}\n", self.name);
        for rank in 0..=MAX_RANK {
            let colors = self.tile(rank);
            let value = match tile_value(rank) {
                0 => ".".to_string(),
                v => v.to_string(),
            };
            let _ = writeln!(
                out,
                "{:>7} # {}{}",
                value,
                "  ".on(colors.bg.term_color()),
                "  ".on(colors.label.term_color())
            );
        }
        out
    }
}

fn at_line(err: ThemeError, line: usize) -> ThemeError {
    match err {
        ThemeError::ThemeCorrupt(reason) => {
            ThemeError::ThemeCorrupt(format!("line {}: {}", line, reason))
        }
        other => other,
    }
}

fn resolve(name: &str, search_dirs: &[PathBuf]) -> Result<PathBuf, ThemeError> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Ok(direct.to_path_buf());
    }
    let file = format!("{}.{}", name, THEME_EXTENSION);
    search_dirs
        .iter()
        .map(|dir| dir.join(&file))
        .find(|p| p.is_file())
        .ok_or_else(|| ThemeError::NotFound {
            name: name.to_string(),
            searched: search_dirs
                .iter()
                .map(|d| d.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Parse `#rrggbb`, or decimal `r;g;b` (each 0..=255).
pub fn parse_color(s: &str) -> Result<Rgb, ThemeError> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ThemeError::ThemeCorrupt(format!("invalid hex colour: {:?}", s)));
        }
        let component = |i: usize| i64::from_str_radix(&hex[i..i + 2], 16).unwrap_or_default();
        return Rgb::new(component(0), component(2), component(4));
    }
    let parts: Vec<&str> = s.split(';').map(str::trim).collect();
    let &[r, g, b] = parts.as_slice() else {
        return Err(ThemeError::ThemeCorrupt(format!("invalid colour: {:?}", s)));
    };
    let num = |p: &str| {
        p.parse::<i64>()
            .map_err(|_| ThemeError::ThemeCorrupt(format!("invalid colour component: {:?}", p)))
    };
    Rgb::new(num(r)?, num(g)?, num(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn theme_text(line: &str) -> String {
        std::iter::repeat_n(line, THEME_LINES).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_parse_hex() {
        let c = parse_color("#98C379").unwrap();
        assert_eq!(c, Rgb { r: 0x98, g: 0xC3, b: 0x79 });
        assert!(matches!(c.color(), Color::Rgb(0x98, 0xC3, 0x79)));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_color("5; 150 ;255").unwrap(), Rgb { r: 5, g: 150, b: 255 });
        assert!(matches!(
            parse_color("256;-1;5"),
            Err(ThemeError::ColorOutOfRange(256, -1, 5))
        ));
    }

    #[test]
    fn test_bad_colours_are_corrupt() {
        for bad in ["98C379", "#98C37", "#98C37G", "1;2", "a;b;c", ""] {
            assert!(
                matches!(parse_color(bad), Err(ThemeError::ThemeCorrupt(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_shipped_classic_matches_builtin() {
        let parsed = Theme::parse("classic", include_str!("../themes/classic.theme")).unwrap();
        assert_eq!(parsed, Theme::classic());
    }

    #[test]
    fn test_shipped_onedark_parses() {
        let theme = Theme::parse("onedark", include_str!("../themes/onedark.theme")).unwrap();
        assert_eq!(theme.tile(0).bg, Rgb { r: 0x31, g: 0x35, b: 0x3f });
    }

    #[test]
    fn test_wrong_line_count_is_corrupt() {
        let short = std::iter::repeat_n("#000000, #ffffff", 17).collect::<Vec<_>>().join("\n");
        assert!(matches!(Theme::parse("t", &short), Err(ThemeError::ThemeCorrupt(_))));

        let long = format!("{}\n#000000, #ffffff", theme_text("#000000, #ffffff"));
        assert!(matches!(Theme::parse("t", &long), Err(ThemeError::ThemeCorrupt(_))));

        let trailing = format!("{}\n\n\n", theme_text("#000000, #ffffff"));
        assert!(Theme::parse("t", &trailing).is_ok());
    }

    #[test]
    fn test_missing_separator_names_line() {
        let mut lines: Vec<String> = vec!["#000000, #ffffff".to_string(); THEME_LINES];
        lines[4] = "#000000 #ffffff".to_string();
        match Theme::parse("t", &lines.join("\n")) {
            Err(ThemeError::ThemeCorrupt(msg)) => assert!(msg.starts_with("line 5"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_load_by_name_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.theme");
        fs::write(&path, theme_text("#101010, 200;200;200")).unwrap();

        let by_name = Theme::load("mono", &[dir.path().to_path_buf()]).unwrap();
        assert_eq!(by_name.name, "mono");
        assert_eq!(by_name.tile(3).label, Rgb { r: 200, g: 200, b: 200 });

        let by_path = Theme::load(path.to_str().unwrap(), &[]).unwrap();
        assert_eq!(by_path, by_name);

        assert!(matches!(
            Theme::load("nope", &[dir.path().to_path_buf()]),
            Err(ThemeError::NotFound { .. })
        ));
    }

    #[test]
    fn test_preview_lists_every_rank() {
        let preview = Theme::classic().preview();
        assert!(preview.starts_with("classic\n"));
        assert_eq!(preview.lines().count(), THEME_LINES + 1);
        assert!(preview.contains("131072"));
    }

    #[test]
    fn test_tile_clamps_rank() {
        let theme = Theme::classic();
        assert_eq!(theme.tile(40), theme.tile(MAX_RANK));
    }
}
