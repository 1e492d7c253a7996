//! Built-in algorithm presets, looked up by name or alias.

use crate::error::{CubeError, CubeResult};
use crate::formula::convert;
use crate::moves::Move;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Case family an algorithm belongs to; decides which overlay a render gets.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum RenderGroup {
    F2L,
    OLL,
    PLL,
    ZBLL,
    #[default]
    #[serde(rename = "NO_GROUP")]
    #[strum(serialize = "NO_GROUP")]
    NoGroup,
}

impl RenderGroup {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A named formula with its render settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmPreset {
    pub name: String,
    pub formula: String,
    pub group: RenderGroup,
    /// Times the whole formula is played.
    pub repeat: usize,
    pub aliases: Vec<String>,
}

impl AlgorithmPreset {
    /// # Errors
    ///
    /// [`CubeError::Validation`] for a blank name or formula, or `repeat` of zero.
    pub fn new(
        name: impl Into<String>,
        formula: impl Into<String>,
        group: RenderGroup,
        repeat: usize,
    ) -> CubeResult<Self> {
        let name = name.into();
        let formula = formula.into();
        if name.trim().is_empty() {
            return Err(CubeError::validation("Preset name must be non-empty"));
        }
        if formula.trim().is_empty() {
            return Err(CubeError::validation("Preset formula must be non-empty"));
        }
        if repeat < 1 {
            return Err(CubeError::validation("Preset repeat must be >= 1"));
        }
        Ok(Self {
            name,
            formula,
            group,
            repeat,
            aliases: Vec::new(),
        })
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// The formula's moves with the preset's repeat applied.
    pub fn moves(&self) -> CubeResult<Vec<Move>> {
        convert(&self.formula, self.repeat)
    }
}

fn builtin_presets() -> CubeResult<Vec<AlgorithmPreset>> {
    Ok(vec![
        AlgorithmPreset::new("Sexy", "R' U R U'", RenderGroup::NoGroup, 6)?
            .with_aliases(["SexyMoveSixTimes"]),
        AlgorithmPreset::new("Ua", "M2 U M U2 M' U M2", RenderGroup::PLL, 1)?,
        AlgorithmPreset::new("Ub", "M2 U' M U2 M' U' M2", RenderGroup::PLL, 1)?,
        AlgorithmPreset::new(
            "Vperm",
            "R' U R' d' R' F' R2 U' R' U R' F R F",
            RenderGroup::PLL,
            1,
        )?,
    ])
}

fn registry_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Indexes presets by lowercased name and alias.
///
/// # Errors
///
/// [`CubeError::Validation`] if two presets share a name or alias.
fn build_registry(presets: Vec<AlgorithmPreset>) -> CubeResult<HashMap<String, AlgorithmPreset>> {
    let mut registry = HashMap::new();
    for preset in presets {
        let keys: Vec<String> = std::iter::once(&preset.name)
            .chain(&preset.aliases)
            .cloned()
            .collect();
        for raw_key in keys {
            if registry
                .insert(registry_key(&raw_key), preset.clone())
                .is_some()
            {
                return Err(CubeError::validation(format!(
                    "Duplicate preset key detected: {raw_key}"
                )));
            }
        }
    }
    Ok(registry)
}

static REGISTRY: LazyLock<CubeResult<HashMap<String, AlgorithmPreset>>> =
    LazyLock::new(|| builtin_presets().and_then(build_registry));

fn registry() -> CubeResult<&'static HashMap<String, AlgorithmPreset>> {
    REGISTRY.as_ref().map_err(Clone::clone)
}

/// Looks up a built-in preset by name or alias, ignoring case and surrounding whitespace.
///
/// # Errors
///
/// [`CubeError::UnknownPreset`] listing the available names, or the
/// [`CubeError::Validation`] raised while building the built-in registry.
pub fn get_preset(name: &str) -> CubeResult<&'static AlgorithmPreset> {
    find_preset(registry(), name)
}

fn find_preset<'a>(
    registry: CubeResult<&'a HashMap<String, AlgorithmPreset>>,
    name: &str,
) -> CubeResult<&'a AlgorithmPreset> {
    let registry = registry?;
    registry
        .get(&registry_key(name))
        .ok_or_else(|| CubeError::UnknownPreset {
            name: name.to_string(),
            available: sorted_names(registry).join(", "),
        })
}

/// Sorted names of the built-in presets (aliases excluded).
///
/// # Errors
///
/// [`CubeError::Validation`] if the built-in registry is inconsistent.
pub fn list_preset_names() -> CubeResult<Vec<String>> {
    registry().map(sorted_names)
}

fn sorted_names(registry: &HashMap<String, AlgorithmPreset>) -> Vec<String> {
    registry
        .values()
        .map(|preset| preset.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
