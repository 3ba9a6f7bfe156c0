use derive_more as dm;
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use common::{config::ConfigLayout, log_debug, log_warn};

pub const CONFIG_FILENAME: &str = "symval_config";
pub const CONFIG_ENV_PREFIX: &str = "SYMVAL";

impl TryFrom<::config::Config> for OracleConfig {
    type Error = ::config::ConfigError;

    fn try_from(value: ::config::Config) -> Result<Self, Self::Error> {
        let config: OracleConfig = value.try_deserialize()?;
        log_debug!("Loaded configurations: {:?}", config);

        if config.solver.timeout_ms == Some(0) {
            log_warn!(concat!(
                "A zero solver timeout makes every check indeterminate, ",
                "consider removing `solver.timeout_ms`."
            ));
        }

        Ok(config)
    }
}

/// Reads the oracle configuration from `symval_config.*` (searched upwards
/// from the working directory), `SYMVAL_CONFIG_STR` and `SYMVAL_*` variables.
pub fn load() -> Result<OracleConfig, ::config::ConfigError> {
    ConfigLayout::new(CONFIG_FILENAME, CONFIG_ENV_PREFIX)
        .build(&OracleConfig::default())?
        .try_into()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default)]
    pub solver: SolverConfig,

    #[serde(default)]
    pub eval_mode: EvalMode,

    /// Whether to run the second session that rules out other results.
    #[serde(default = "default_check_uniqueness")]
    pub check_uniqueness: bool,
}

fn default_check_uniqueness() -> bool {
    true
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            solver: Default::default(),
            eval_mode: Default::default(),
            check_uniqueness: default_check_uniqueness(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Per-check timeout. Hitting it yields an indeterminate verdict.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Global solver parameters, set once before any session starts.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

/// How terms absent from a model are treated on evaluation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, dm::Display)]
#[serde(rename_all = "snake_case")]
pub enum EvalMode {
    /// Unconstrained constants get an arbitrary value of their sort.
    #[default]
    #[display("complete")]
    Complete,
    /// Only what the model fixes is evaluated; anything else is an error.
    #[display("partial")]
    Partial,
}

impl EvalMode {
    #[inline]
    pub fn model_completion(self) -> bool {
        matches!(self, Self::Complete)
    }
}
