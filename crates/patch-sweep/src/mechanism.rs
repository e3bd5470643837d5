//! Link formation mechanisms and their translation to generator models
//!
//! The sweep speaks of a (global, local) pair of link formation mechanisms;
//! the generator speaks of a model name plus a flag for uniform triadic
//! closure. [`MechanismTable`] translates between the two.

use crate::error::{Result, SweepError};
use clap::ValueEnum;
use patch_core::ModelName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Link formation mechanism
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Lfm {
    /// Uniformly random target; as local mechanism, uniform triadic closure
    Random,
    /// Group homophily
    Homophily,
    /// Preferential attachment with homophily
    Pah,
}

impl Lfm {
    pub const ALL: [Self; 3] = [Self::Random, Self::Homophily, Self::Pah];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Homophily => "homophily",
            Self::Pah => "pah",
        }
    }

    /// Abbreviation used in plot labels
    pub const fn short(self) -> &'static str {
        match self {
            Self::Random => "R",
            Self::Homophily => "H",
            Self::Pah => "PAH",
        }
    }
}

impl fmt::Display for Lfm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lfm {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|lfm| lfm.as_str() == s)
            .ok_or_else(|| {
                SweepError::InvalidMechanism(format!(
                    "unknown mechanism `{s}` (expected random, homophily or pah)"
                ))
            })
    }
}

/// Bidirectional lookup between model names and global mechanisms
///
/// Immutable once built; the sweep shares one table between the enumerator
/// and all workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MechanismTable {
    model_to_global: BTreeMap<ModelName, Lfm>,
    global_to_model: BTreeMap<Lfm, ModelName>,
}

impl Default for MechanismTable {
    fn default() -> Self {
        Self::new([
            (ModelName::ErPatch, Lfm::Random),
            (ModelName::Tch, Lfm::Homophily),
            (ModelName::Patch, Lfm::Pah),
        ])
    }
}

impl MechanismTable {
    /// Build a table from `(model, global mechanism)` pairs
    pub fn new(entries: impl IntoIterator<Item = (ModelName, Lfm)>) -> Self {
        let model_to_global: BTreeMap<_, _> = entries.into_iter().collect();
        let global_to_model = model_to_global
            .iter()
            .map(|(&model, &global)| (global, model))
            .collect();
        Self {
            model_to_global,
            global_to_model,
        }
    }

    pub fn global_of(&self, model: ModelName) -> Result<Lfm> {
        self.model_to_global.get(&model).copied().ok_or_else(|| {
            SweepError::InvalidMechanism(format!("no global mechanism for model {model}"))
        })
    }

    pub fn model_of(&self, global: Lfm) -> Result<ModelName> {
        self.global_to_model.get(&global).copied().ok_or_else(|| {
            SweepError::InvalidMechanism(format!("no model for global mechanism {global}"))
        })
    }

    /// Whether a local mechanism may accompany a global one
    pub fn is_valid(local: Lfm, global: Lfm) -> bool {
        local == Lfm::Random || local == global
    }

    /// Translate a (local, global) pair into `(tc_uniform, model)`
    pub fn to_model(&self, local: Lfm, global: Lfm) -> Result<(bool, ModelName)> {
        if !Self::is_valid(local, global) {
            return Err(SweepError::InvalidMechanism(format!(
                "local must be `random` or the same as global=`{global}`, got `{local}`"
            )));
        }
        Ok((local == Lfm::Random, self.model_of(global)?))
    }

    /// Translate `(tc_uniform, model)` into a (global, local) pair
    pub fn to_mechanisms(&self, tc_uniform: bool, model: ModelName) -> Result<(Lfm, Lfm)> {
        if model == ModelName::ErPatch && !tc_uniform {
            return Err(SweepError::InvalidMechanism(
                "ERPATCH requires uniform triadic closure".to_string(),
            ));
        }
        let global = self.global_of(model)?;
        let local = if tc_uniform { Lfm::Random } else { global };
        Ok((global, local))
    }
}
