use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Terrain tunables. Defaults reproduce the stock world; a `worldgen.toml`
/// may override any subset of fields.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub mountain: Mountain,
    #[serde(default)]
    pub soil: Soil,
    #[serde(default)]
    pub strata: Strata,
    #[serde(default)]
    pub biomes: Biomes,
    #[serde(default)]
    pub trees: Trees,
}

impl WorldGenConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        let cfg: WorldGenConfig = toml::from_str(&s)?;
        Ok(cfg)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_base_height")]
    pub base: f32,
    #[serde(default = "default_macro_scale")]
    pub macro_scale: f32,
    #[serde(default = "default_macro_amp")]
    pub macro_amp: f32,
    #[serde(default = "default_region_scale")]
    pub region_scale: f32,
    #[serde(default = "default_region_amp")]
    pub region_amp: f32,
    #[serde(default = "default_detail_scale")]
    pub detail_scale: f32,
    #[serde(default = "default_detail_amp")]
    pub detail_amp: f32,
    #[serde(default = "default_hill_scale")]
    pub hill_scale: f32,
    #[serde(default = "default_hill_amp")]
    pub hill_amp: f32,
    #[serde(default = "default_hill_mask_scale")]
    pub hill_mask_scale: f32,
    #[serde(default = "default_hill_mask_threshold")]
    pub hill_mask_threshold: f32,
    #[serde(default = "default_hill_mask_feather")]
    pub hill_mask_feather: f32,
}
fn default_base_height() -> f32 {
    48.0
}
fn default_macro_scale() -> f32 {
    0.0012
}
fn default_macro_amp() -> f32 {
    20.0
}
fn default_region_scale() -> f32 {
    0.0035
}
fn default_region_amp() -> f32 {
    6.0
}
fn default_detail_scale() -> f32 {
    0.05
}
fn default_detail_amp() -> f32 {
    2.0
}
fn default_hill_scale() -> f32 {
    0.07
}
fn default_hill_amp() -> f32 {
    14.0
}
fn default_hill_mask_scale() -> f32 {
    0.010
}
fn default_hill_mask_threshold() -> f32 {
    0.62
}
fn default_hill_mask_feather() -> f32 {
    0.08
}
impl Default for Height {
    fn default() -> Self {
        Self {
            base: default_base_height(),
            macro_scale: default_macro_scale(),
            macro_amp: default_macro_amp(),
            region_scale: default_region_scale(),
            region_amp: default_region_amp(),
            detail_scale: default_detail_scale(),
            detail_amp: default_detail_amp(),
            hill_scale: default_hill_scale(),
            hill_amp: default_hill_amp(),
            hill_mask_scale: default_hill_mask_scale(),
            hill_mask_threshold: default_hill_mask_threshold(),
            hill_mask_feather: default_hill_mask_feather(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Mountain {
    #[serde(default = "default_mountain_scale")]
    pub scale: f32,
    #[serde(default = "default_mountain_amp")]
    pub amp: f32,
    #[serde(default = "default_mountain_mask")]
    pub mask: f32,
}
fn default_mountain_scale() -> f32 {
    0.015
}
fn default_mountain_amp() -> f32 {
    32.0
}
fn default_mountain_mask() -> f32 {
    0.75
}
impl Default for Mountain {
    fn default() -> Self {
        Self {
            scale: default_mountain_scale(),
            amp: default_mountain_amp(),
            mask: default_mountain_mask(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Soil {
    #[serde(default = "default_min_dirt")]
    pub min_dirt: i32,
    #[serde(default = "default_max_dirt")]
    pub max_dirt: i32,
}
fn default_min_dirt() -> i32 {
    2
}
fn default_max_dirt() -> i32 {
    5
}
impl Default for Soil {
    fn default() -> Self {
        Self {
            min_dirt: default_min_dirt(),
            max_dirt: default_max_dirt(),
        }
    }
}

/// Subsurface material noise. Each stone variant claims voxels where its
/// offset 3D noise rises above the mask.
#[derive(Clone, Debug, Deserialize)]
pub struct Strata {
    #[serde(default = "default_strata_scale")]
    pub scale: f32,
    #[serde(default = "default_strata_mask")]
    pub mask: f32,
    #[serde(default = "default_block_seed")]
    pub block_seed: u32,
}
fn default_strata_scale() -> f32 {
    0.05
}
fn default_strata_mask() -> f32 {
    0.4
}
fn default_block_seed() -> u32 {
    1_234_567
}
impl Default for Strata {
    fn default() -> Self {
        Self {
            scale: default_strata_scale(),
            mask: default_strata_mask(),
            block_seed: default_block_seed(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Biomes {
    #[serde(default = "default_biome_scale")]
    pub scale: f32,
    #[serde(default = "default_forest_threshold")]
    pub forest_threshold: f32,
}
fn default_biome_scale() -> f32 {
    0.0015
}
fn default_forest_threshold() -> f32 {
    0.5
}
impl Default for Biomes {
    fn default() -> Self {
        Self {
            scale: default_biome_scale(),
            forest_threshold: default_forest_threshold(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Trees {
    #[serde(default = "default_forest_chance")]
    pub forest_chance: f32,
    #[serde(default = "default_sparse_chance")]
    pub sparse_chance: f32,
    #[serde(default = "default_trunk_min")]
    pub trunk_min: i32,
    #[serde(default = "default_trunk_max")]
    pub trunk_max: i32,
    #[serde(default = "default_tree_margin")]
    pub margin: i32,
}
fn default_forest_chance() -> f32 {
    0.08
}
fn default_sparse_chance() -> f32 {
    0.005
}
fn default_trunk_min() -> i32 {
    4
}
fn default_trunk_max() -> i32 {
    6
}
fn default_tree_margin() -> i32 {
    3
}
impl Default for Trees {
    fn default() -> Self {
        Self {
            forest_chance: default_forest_chance(),
            sparse_chance: default_sparse_chance(),
            trunk_min: default_trunk_min(),
            trunk_max: default_trunk_max(),
            margin: default_tree_margin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_stock_defaults() {
        let cfg: WorldGenConfig = toml::from_str("").expect("parse");
        assert_eq!(cfg.height.base, 48.0);
        assert_eq!(cfg.mountain.mask, 0.75);
        assert_eq!(cfg.strata.block_seed, 1_234_567);
        assert_eq!(cfg.trees.trunk_min, 4);
        assert_eq!(cfg.trees.trunk_max, 6);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg: WorldGenConfig = toml::from_str(
            "[trees]\nforest_chance = 0.2\n\n[mountain]\namp = 48.0\n",
        )
        .expect("parse");
        assert_eq!(cfg.trees.forest_chance, 0.2);
        assert_eq!(cfg.trees.sparse_chance, 0.005);
        assert_eq!(cfg.mountain.amp, 48.0);
        assert_eq!(cfg.mountain.scale, 0.015);
    }
}
