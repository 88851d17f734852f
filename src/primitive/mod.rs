//! The raw hashing primitive behind the façade.
//!
//! The façade owns all input validation. Implementations of [`RawHasher`] may
//! assume positive costs and non-empty buffers.

pub mod native;

use std::sync::Arc;

use crate::algorithm::AlgorithmId;
use crate::error::Result;

pub use native::Argon2Primitive;

/// Computes an Argon2 digest into `out`.
///
/// Failures carry a signed code: negative for errors the primitive reports,
/// positive for faults the binding detects around it. `out` may hold partial
/// data after a failure.
pub trait RawHasher {
    #[allow(clippy::too_many_arguments)]
    fn raw_hash(
        &self,
        id: AlgorithmId,
        time_cost: u32,
        memory_cost_kib: u32,
        parallelism: u32,
        password: &[u8],
        salt: &[u8],
        out: &mut [u8],
    ) -> Result<()>;
}

impl<T: RawHasher + ?Sized> RawHasher for &T {
    fn raw_hash(
        &self,
        id: AlgorithmId,
        time_cost: u32,
        memory_cost_kib: u32,
        parallelism: u32,
        password: &[u8],
        salt: &[u8],
        out: &mut [u8],
    ) -> Result<()> {
        (**self).raw_hash(id, time_cost, memory_cost_kib, parallelism, password, salt, out)
    }
}

impl<T: RawHasher + ?Sized> RawHasher for Arc<T> {
    fn raw_hash(
        &self,
        id: AlgorithmId,
        time_cost: u32,
        memory_cost_kib: u32,
        parallelism: u32,
        password: &[u8],
        salt: &[u8],
        out: &mut [u8],
    ) -> Result<()> {
        (**self).raw_hash(id, time_cost, memory_cost_kib, parallelism, password, salt, out)
    }
}
