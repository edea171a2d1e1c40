//! Pre-configured tuning tables.
//!
//! [`standard`] is the canonical tuning. [`legacy`] reproduces an older
//! deployment that weighted legendaries higher and punished them less; it is
//! kept for replaying historical player states, not for new banners.

use super::{CategoryWeights, CountRange, GachaConfig, PayloadConfig, PerRarity};

/// Canonical tuning.
///
/// Rarity weights 40/30/20/10, a legendary costs 0.20 up-rate.
pub fn standard() -> GachaConfig {
    GachaConfig {
        soft_pity: 40,
        hard_pity: 60,
        category_weights: CategoryWeights::default(),
        rarity_weights: PerRarity::new(40.0, 30.0, 20.0, 10.0),
        up_rate_deltas: PerRarity::new(0.03, 0.02, -0.10, -0.20),
        unit_pool_sizes: PerRarity::new(10, 6, 5, 4),
        sub_draws: CountRange::new(2, 3),
        payloads: PayloadConfig::default(),
    }
}

/// Historical deployment variant.
///
/// Rarity weights 35/30/20/15, a legendary costs 0.15 up-rate. Everything
/// else matches [`standard`].
pub fn legacy() -> GachaConfig {
    GachaConfig {
        rarity_weights: PerRarity::new(35.0, 30.0, 20.0, 15.0),
        up_rate_deltas: PerRarity::new(0.03, 0.02, -0.10, -0.15),
        ..standard()
    }
}

/// Look up a preset by name ("standard" or "legacy").
pub fn by_name(name: &str) -> Option<GachaConfig> {
    match name.trim().to_lowercase().as_str() {
        "standard" | "default" => Some(standard()),
        "legacy" => Some(legacy()),
        _ => None,
    }
}

/// Names accepted by [`by_name`].
pub fn names() -> &'static [&'static str] {
    &["standard", "legacy"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        for name in names() {
            let cfg = by_name(name).unwrap();
            assert!(cfg.validate().is_ok(), "{name} failed validation");
        }
    }

    #[test]
    fn legacy_differs_only_in_rarity_tuning() {
        let std_cfg = standard();
        let old = legacy();
        assert_eq!(old.rarity_weights, PerRarity::new(35.0, 30.0, 20.0, 15.0));
        assert!((old.up_rate_deltas.legendary + 0.15).abs() < f64::EPSILON);
        assert_eq!(old.category_weights, std_cfg.category_weights);
        assert_eq!(old.unit_pool_sizes, std_cfg.unit_pool_sizes);
        assert_eq!(old.soft_pity, std_cfg.soft_pity);
        assert_eq!(old.hard_pity, std_cfg.hard_pity);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("Legacy"), Some(legacy()));
        assert_eq!(by_name("default"), Some(standard()));
        assert_eq!(by_name("gold"), None);
    }
}
