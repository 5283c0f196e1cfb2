/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or
/// incomplete, then sanitizes the values the rest of the crate leans
/// on: the field height must be even (two pixel rows share one
/// terminal row), rates and chances must be at least 1, and obstacle
/// colors must stay non-zero (zero is the empty cell).

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct Config {
    pub window: WindowConfig,
    pub speed: SpeedConfig,
    pub terrain: TerrainConfig,
    pub actors: ActorConfig,
}

#[derive(Clone, Debug)]
pub struct WindowConfig {
    /// Field width in cells (one terminal column each).
    pub width: usize,
    /// Field height in pixel rows (two per terminal row; kept even).
    pub height: usize,
    pub charset: Charset,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub frame_sleep_ms: u64,
    /// Frames between player steps.
    pub player_energy: u32,
    /// Frames between hunter steps.
    pub hunter_energy: u32,
}

#[derive(Clone, Debug)]
pub struct TerrainConfig {
    /// 1-in-N chance per cell of rolling an obstacle.
    pub obstacle_chance: u32,
    pub color_min: u8,
    pub color_max: u8,
}

#[derive(Clone, Debug)]
pub struct ActorConfig {
    pub player_color: u8,
    pub hunter_color: u8,
}

/// Which glyph set the compositor draws half-block cells with.
/// `Ascii` is for terminals without the block-element range.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    Unicode,
    Ascii,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    window: TomlWindow,
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    terrain: TomlTerrain,
    #[serde(default)]
    actors: TomlActors,
}

#[derive(Deserialize, Debug)]
struct TomlWindow {
    #[serde(default = "default_width")]
    width: usize,
    #[serde(default = "default_height")]
    height: usize,
    #[serde(default = "default_charset")]
    charset: Charset,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_frame_sleep")]
    frame_sleep_ms: u64,
    #[serde(default = "default_player_energy")]
    player_energy: u32,
    #[serde(default = "default_hunter_energy")]
    hunter_energy: u32,
}

#[derive(Deserialize, Debug)]
struct TomlTerrain {
    #[serde(default = "default_obstacle_chance")]
    obstacle_chance: u32,
    #[serde(default = "default_color_min")]
    color_min: u8,
    #[serde(default = "default_color_max")]
    color_max: u8,
}

#[derive(Deserialize, Debug)]
struct TomlActors {
    #[serde(default = "default_player_color")]
    player_color: u8,
    #[serde(default = "default_hunter_color")]
    hunter_color: u8,
}

// ── Defaults ──

fn default_width() -> usize { 80 }
fn default_height() -> usize { 60 }
fn default_charset() -> Charset { Charset::Unicode }

fn default_frame_sleep() -> u64 { 10 }
fn default_player_energy() -> u32 { 4 }
fn default_hunter_energy() -> u32 { 10 }

fn default_obstacle_chance() -> u32 { 6 }
fn default_color_min() -> u8 { 236 }   // dark greys from the 256-color cube
fn default_color_max() -> u8 { 240 }

fn default_player_color() -> u8 { 220 }  // gold
fn default_hunter_color() -> u8 { 200 }  // magenta

impl Default for TomlWindow {
    fn default() -> Self {
        TomlWindow {
            width: default_width(),
            height: default_height(),
            charset: default_charset(),
        }
    }
}

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            frame_sleep_ms: default_frame_sleep(),
            player_energy: default_player_energy(),
            hunter_energy: default_hunter_energy(),
        }
    }
}

impl Default for TomlTerrain {
    fn default() -> Self {
        TomlTerrain {
            obstacle_chance: default_obstacle_chance(),
            color_min: default_color_min(),
            color_max: default_color_max(),
        }
    }
}

impl Default for TomlActors {
    fn default() -> Self {
        TomlActors {
            player_color: default_player_color(),
            hunter_color: default_hunter_color(),
        }
    }
}

// ── Loading ──

impl Config {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        Config::from_toml(load_toml(&candidate_dirs()))
    }

    fn from_toml(t: TomlConfig) -> Self {
        let width = t.window.width.max(1);
        let height = {
            let h = t.window.height.max(2);
            h - h % 2
        };
        let color_min = t.terrain.color_min.max(1);
        Config {
            window: WindowConfig {
                width,
                height,
                charset: t.window.charset,
            },
            speed: SpeedConfig {
                frame_sleep_ms: t.speed.frame_sleep_ms,
                player_energy: t.speed.player_energy.max(1),
                hunter_energy: t.speed.hunter_energy.max(1),
            },
            terrain: TerrainConfig {
                obstacle_chance: t.terrain.obstacle_chance.max(1),
                color_min,
                color_max: t.terrain.color_max.max(color_min),
            },
            actors: ActorConfig {
                player_color: t.actors.player_color,
                hunter_color: t.actors.hunter_color,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from_toml(TomlConfig::default())
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_survive_an_empty_file() {
        let t: TomlConfig = toml::from_str("").unwrap();
        let c = Config::from_toml(t);
        assert_eq!(c.window.width, 80);
        assert_eq!(c.window.height, 60);
        assert_eq!(c.window.charset, Charset::Unicode);
        assert_eq!(c.speed.player_energy, 4);
        assert_eq!(c.speed.hunter_energy, 10);
        assert_eq!(c.terrain.obstacle_chance, 6);
    }

    #[test]
    fn partial_file_fills_in_the_rest() {
        let t: TomlConfig = toml::from_str(
            "[window]\nwidth = 40\ncharset = \"ascii\"\n",
        )
        .unwrap();
        let c = Config::from_toml(t);
        assert_eq!(c.window.width, 40);
        assert_eq!(c.window.height, 60);
        assert_eq!(c.window.charset, Charset::Ascii);
    }

    #[test]
    fn odd_height_rounds_down_to_even() {
        let t: TomlConfig = toml::from_str("[window]\nheight = 61\n").unwrap();
        assert_eq!(Config::from_toml(t).window.height, 60);
        let t: TomlConfig = toml::from_str("[window]\nheight = 1\n").unwrap();
        assert_eq!(Config::from_toml(t).window.height, 2);
    }

    #[test]
    fn degenerate_rates_clamp_to_one() {
        let t: TomlConfig = toml::from_str(
            "[speed]\nplayer_energy = 0\n[terrain]\nobstacle_chance = 0\ncolor_min = 0\ncolor_max = 0\n",
        )
        .unwrap();
        let c = Config::from_toml(t);
        assert_eq!(c.speed.player_energy, 1);
        assert_eq!(c.terrain.obstacle_chance, 1);
        assert_eq!(c.terrain.color_min, 1);
        assert_eq!(c.terrain.color_max, 1);
    }
}
