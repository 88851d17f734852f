use serde::{Deserialize, Serialize};

use crate::error::{Argon2Error, Result};

/// Default memory cost: 64 MiB.
pub const DEFAULT_MEMORY_COST_KIB: u32 = 64 * 1024;
pub const DEFAULT_TIME_COST: u32 = 3;
pub const DEFAULT_PARALLELISM: u32 = 1;
pub const DEFAULT_OUTPUT_LEN: usize = 32;

/// Cost parameters for a hash call, bundled so applications can keep them in
/// their own configuration.
///
/// Deserialization fills missing fields with the defaults and then runs
/// [`validate`](Self::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCostParams")]
pub struct CostParams {
    time_cost: u32,
    memory_cost_kib: u32,
    parallelism: u32,
    output_len: usize,
}

/// Unchecked form read from configuration.
#[derive(Deserialize)]
#[serde(default)]
struct RawCostParams {
    time_cost: u32,
    memory_cost_kib: u32,
    parallelism: u32,
    output_len: usize,
}

impl Default for RawCostParams {
    fn default() -> Self {
        let defaults = CostParams::default();
        Self {
            time_cost: defaults.time_cost,
            memory_cost_kib: defaults.memory_cost_kib,
            parallelism: defaults.parallelism,
            output_len: defaults.output_len,
        }
    }
}

impl TryFrom<RawCostParams> for CostParams {
    type Error = Argon2Error;

    fn try_from(raw: RawCostParams) -> Result<Self> {
        CostParams::new(
            raw.time_cost,
            raw.memory_cost_kib,
            raw.parallelism,
            raw.output_len,
        )
    }
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            time_cost: DEFAULT_TIME_COST,
            memory_cost_kib: DEFAULT_MEMORY_COST_KIB,
            parallelism: DEFAULT_PARALLELISM,
            output_len: DEFAULT_OUTPUT_LEN,
        }
    }
}

impl CostParams {
    pub fn new(
        time_cost: u32,
        memory_cost_kib: u32,
        parallelism: u32,
        output_len: usize,
    ) -> Result<Self> {
        let params = Self {
            time_cost,
            memory_cost_kib,
            parallelism,
            output_len,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn memory_cost_kib(&self) -> u32 {
        self.memory_cost_kib
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// Checks the structural preconditions only. Limits such as the minimum
    /// memory per lane are enforced by the primitive.
    pub fn validate(&self) -> Result<()> {
        if self.time_cost == 0 {
            return Err(Argon2Error::invalid_argument("tCost must be > 0"));
        }
        if self.memory_cost_kib == 0 {
            return Err(Argon2Error::invalid_argument("mCost must be > 0"));
        }
        if self.parallelism == 0 {
            return Err(Argon2Error::invalid_argument("parallelism must be > 0"));
        }
        if self.output_len == 0 {
            return Err(Argon2Error::invalid_argument("outLength must be > 0"));
        }
        Ok(())
    }
}
