//! Mutator specifications.
//!
//! A spec names a mutator, its version and its float parameters. Parameters are
//! kept sorted by key so that the identity hash is canonical.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::run::ids::MutatorId;

/// Single key/value parameter. Float-only for trivial canonicalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParamFields")]
pub struct MutatorParam {
    key: String,
    value: f32,
}

impl MutatorParam {
    /// Validate and build a parameter.
    ///
    /// Rejects empty keys and non-finite values.
    pub fn new(key: impl Into<String>, value: f32) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyParamKey);
        }
        if !value.is_finite() {
            return Err(ConfigError::NonFiniteParam { key, value });
        }
        Ok(Self { key, value })
    }

    /// Parameter key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Parameter value.
    pub fn value(&self) -> f32 {
        self.value
    }
}

/// Immutable specification of one mutator application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpecFields")]
pub struct MutatorSpec {
    id: MutatorId,
    version: i32,
    params: Vec<MutatorParam>,
}

impl MutatorSpec {
    /// Canonical factory.
    ///
    /// Sorts parameters by key (ordinal) and rejects duplicates.
    pub fn create(
        id: MutatorId,
        version: i32,
        params: Vec<MutatorParam>,
    ) -> Result<Self, ConfigError> {
        if id.is_empty() {
            return Err(ConfigError::EmptyMutatorId);
        }
        if version < 1 {
            return Err(ConfigError::InvalidVersion(version));
        }

        let mut params = params;
        params.sort_by(|a, b| a.key.cmp(&b.key));
        if let Some(pair) = params.windows(2).find(|w| w[0].key == w[1].key) {
            return Err(ConfigError::DuplicateParamKey(pair[1].key.clone()));
        }

        Ok(Self { id, version, params })
    }

    /// Version 1 spec without parameters.
    pub fn simple(id: &str) -> Result<Self, ConfigError> {
        Self::create(MutatorId::new(id), 1, Vec::new())
    }

    /// Mutator id.
    pub fn id(&self) -> &MutatorId {
        &self.id
    }

    /// Mutator version.
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Sorted parameters.
    pub fn params(&self) -> &[MutatorParam] {
        &self.params
    }

    /// Look up a parameter by key.
    pub fn param(&self, key: &str) -> Option<f32> {
        self.params
            .binary_search_by(|p| p.key.as_str().cmp(key))
            .ok()
            .map(|i| self.params[i].value)
    }

    /// Parameter value or a default when absent.
    pub fn param_or(&self, key: &str, default: f32) -> f32 {
        self.param(key).unwrap_or(default)
    }
}

// Decoded data goes through the same validation as the constructors.

#[derive(Deserialize)]
struct ParamFields {
    key: String,
    value: f32,
}

impl TryFrom<ParamFields> for MutatorParam {
    type Error = ConfigError;

    fn try_from(fields: ParamFields) -> Result<Self, Self::Error> {
        Self::new(fields.key, fields.value)
    }
}

#[derive(Deserialize)]
struct SpecFields {
    id: MutatorId,
    version: i32,
    params: Vec<MutatorParam>,
}

impl TryFrom<SpecFields> for MutatorSpec {
    type Error = ConfigError;

    fn try_from(fields: SpecFields) -> Result<Self, Self::Error> {
        Self::create(fields.id, fields.version, fields.params)
    }
}
