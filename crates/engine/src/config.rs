//! Engine configuration.
//!
//! All settings come from `JIGSAW_*` environment variables. Unparseable values
//! fall back to defaults; structural problems (zero rows, no image) are left
//! for [`PuzzleEngine::create`](crate::PuzzleEngine::create) to reject.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `JIGSAW_IMAGE` | primary image path or URL | none |
//! | `JIGSAW_DIFFICULTY` | `easy` / `medium` / `hard` | `easy` |
//! | `JIGSAW_ROWS`, `JIGSAW_COLS` | grid override | from difficulty |
//! | `JIGSAW_MODE` | `drag` / `select` / `slide` | `drag` |
//! | `JIGSAW_SEED` | shuffle seed | clock |
//! | `JIGSAW_HINTS` | hint budget | 3 |
//! | `JIGSAW_PUZZLE_ID` | id attached to results | `local` |
//! | `JIGSAW_USER` | session user id | anonymous |
//! | `JIGSAW_SOUNDS` | `name=path,...` | none |
//! | `JIGSAW_ASSET_POLICY` | `strict` / `tolerant` | `tolerant` |
//! | `JIGSAW_RESULT_LOG` | JSON-lines result file | none |
//! | `JIGSAW_LOG_PATH` | tracing log file | none |

use tui_jigsaw_assets::{AssetManifest, CompletionPolicy};
use tui_jigsaw_core::{clock_seed, PuzzleOptions};
use tui_jigsaw_types::{
    Difficulty, InteractionMode, PuzzleConfig, DEFAULT_HINT_BUDGET, HINT_DURATION_MS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub puzzle: PuzzleConfig,
    pub mode: InteractionMode,
    /// `None` seeds from the clock.
    pub seed: Option<u32>,
    pub hint_budget: u32,
    pub puzzle_id: String,
    pub user: Option<String>,
    /// `(name, url)` pairs.
    pub sounds: Vec<(String, String)>,
    pub asset_policy: CompletionPolicy,
    pub result_log: Option<String>,
    pub log_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            puzzle: PuzzleConfig::from_difficulty(Difficulty::Easy, ""),
            mode: InteractionMode::Drag,
            seed: None,
            hint_budget: DEFAULT_HINT_BUDGET,
            puzzle_id: "local".to_string(),
            user: None,
            sounds: Vec::new(),
            asset_policy: CompletionPolicy::Tolerant,
            result_log: None,
            log_path: None,
        }
    }
}

impl EngineConfig {
    pub fn new(puzzle: PuzzleConfig) -> Self {
        Self {
            puzzle,
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };
        let defaults = Self::default();

        let image = get("JIGSAW_IMAGE").unwrap_or_default();
        let difficulty = get("JIGSAW_DIFFICULTY")
            .and_then(|s| Difficulty::from_str(&s))
            .unwrap_or(Difficulty::Easy);
        let mut puzzle = PuzzleConfig::from_difficulty(difficulty, image);
        if let Some(rows) = get("JIGSAW_ROWS").and_then(|s| s.parse().ok()) {
            puzzle.rows = rows;
            puzzle.difficulty = None;
        }
        if let Some(cols) = get("JIGSAW_COLS").and_then(|s| s.parse().ok()) {
            puzzle.cols = cols;
            puzzle.difficulty = None;
        }

        let sounds = get("JIGSAW_SOUNDS")
            .map(|s| parse_sounds(&s))
            .unwrap_or_default();

        Self {
            puzzle,
            mode: get("JIGSAW_MODE")
                .and_then(|s| InteractionMode::from_str(&s))
                .unwrap_or(defaults.mode),
            seed: get("JIGSAW_SEED").and_then(|s| s.parse().ok()),
            hint_budget: get("JIGSAW_HINTS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.hint_budget),
            puzzle_id: get("JIGSAW_PUZZLE_ID").unwrap_or(defaults.puzzle_id),
            user: get("JIGSAW_USER"),
            sounds,
            asset_policy: get("JIGSAW_ASSET_POLICY")
                .and_then(|s| CompletionPolicy::from_str(&s))
                .unwrap_or(defaults.asset_policy),
            result_log: get("JIGSAW_RESULT_LOG"),
            log_path: get("JIGSAW_LOG_PATH"),
        }
    }

    /// Command-line image path wins over `JIGSAW_IMAGE`.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.puzzle.image = image.into();
        self
    }

    pub fn with_mode(mut self, mode: InteractionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Everything the preloader has to fetch: the primary image and sounds.
    pub fn manifest(&self) -> AssetManifest {
        let mut manifest = AssetManifest::new();
        if !self.puzzle.image.trim().is_empty() {
            manifest = manifest.image(self.puzzle.image.clone());
        }
        for (name, url) in &self.sounds {
            manifest = manifest.sound(name.clone(), url.clone());
        }
        manifest
    }

    pub fn puzzle_options(&self) -> PuzzleOptions {
        PuzzleOptions {
            mode: self.mode,
            seed: self.seed.unwrap_or_else(clock_seed),
            hint_budget: self.hint_budget,
            hint_duration_ms: HINT_DURATION_MS,
        }
    }
}

/// Parse `name=path,name=path`. Malformed entries are skipped.
fn parse_sounds(s: &str) -> Vec<(String, String)> {
    s.split(',')
        .filter_map(|entry| {
            let (name, path) = entry.split_once('=')?;
            let (name, path) = (name.trim(), path.trim());
            if name.is_empty() || path.is_empty() {
                return None;
            }
            Some((name.to_string(), path.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let c = EngineConfig::from_lookup(|_| None);
        assert_eq!((c.puzzle.rows, c.puzzle.cols), (3, 3));
        assert_eq!(c.puzzle.image, "");
        assert_eq!(c.mode, InteractionMode::Drag);
        assert_eq!(c.hint_budget, DEFAULT_HINT_BUDGET);
        assert_eq!(c.puzzle_id, "local");
        assert!(c.manifest().is_empty());
    }

    #[test]
    fn difficulty_then_explicit_grid_override() {
        let c = EngineConfig::from_lookup(lookup(&[
            ("JIGSAW_DIFFICULTY", "hard"),
            ("JIGSAW_COLS", "7"),
            ("JIGSAW_IMAGE", "cat.png"),
        ]));
        assert_eq!((c.puzzle.rows, c.puzzle.cols), (5, 7));
        assert_eq!(c.puzzle.difficulty, None);
        assert_eq!(c.manifest().images, vec!["cat.png".to_string()]);
    }

    #[test]
    fn difficulty_label_kept_without_override() {
        let c = EngineConfig::from_lookup(lookup(&[("JIGSAW_DIFFICULTY", "medium")]));
        assert_eq!((c.puzzle.rows, c.puzzle.cols), (4, 4));
        assert_eq!(c.puzzle.difficulty, Some(Difficulty::Medium));

        let c = EngineConfig::from_lookup(lookup(&[
            ("JIGSAW_DIFFICULTY", "medium"),
            ("JIGSAW_ROWS", "4"),
        ]));
        assert_eq!(c.puzzle.difficulty, None);
    }

    #[test]
    fn bad_values_fall_back() {
        let c = EngineConfig::from_lookup(lookup(&[
            ("JIGSAW_MODE", "juggle"),
            ("JIGSAW_SEED", "abc"),
            ("JIGSAW_HINTS", "-1"),
            ("JIGSAW_USER", "   "),
        ]));
        assert_eq!(c.mode, InteractionMode::Drag);
        assert_eq!(c.seed, None);
        assert_eq!(c.hint_budget, DEFAULT_HINT_BUDGET);
        assert_eq!(c.user, None);
    }

    #[test]
    fn sounds_are_parsed_into_manifest() {
        let c = EngineConfig::from_lookup(lookup(&[(
            "JIGSAW_SOUNDS",
            "snap=a/snap.wav, win = b/win.wav,broken,=x",
        )]));
        assert_eq!(
            c.sounds,
            vec![
                ("snap".to_string(), "a/snap.wav".to_string()),
                ("win".to_string(), "b/win.wav".to_string()),
            ]
        );
        assert_eq!(c.manifest().sounds.len(), 2);
    }

    #[test]
    fn seed_passes_through_to_options() {
        let c = EngineConfig::default().with_seed(99).with_mode(InteractionMode::Slide);
        let o = c.puzzle_options();
        assert_eq!(o.seed, 99);
        assert_eq!(o.mode, InteractionMode::Slide);
    }

    #[test]
    fn from_env_does_not_panic() {
        let _config = EngineConfig::from_env();
    }
}
