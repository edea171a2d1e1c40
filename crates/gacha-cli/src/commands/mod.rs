pub mod config;
pub mod draw;
pub mod simulate;

use std::path::Path;

use gacha_engine::{RewardEngine, preset};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Build an engine from a named preset plus an optional JSON override file.
pub fn load_engine(preset_name: &str, config: Option<&Path>) -> Result<RewardEngine, String> {
    let base = preset::by_name(preset_name).ok_or_else(|| {
        format!(
            "unknown preset: \"{preset_name}\". Use: {}",
            preset::names().join(", ")
        )
    })?;

    let config = match config {
        Some(path) => base
            .apply_file(path)
            .map_err(|e| format!("cannot load {}: {e}", path.display()))?,
        None => base,
    };

    RewardEngine::new(config).map_err(|e| e.to_string())
}

/// A seeded generator, or one seeded from the OS when no seed is given.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Percentage of `part` in `whole`, 0 when `whole` is 0.
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}
