//! Validating façade over the Argon2 password hashing primitive.
//!
//! An [`Engine`] is bound to one registered [`AlgorithmId`]. It checks every
//! call parameter before handing work to a [`RawHasher`], and verifies digests
//! with a comparison whose running time does not depend on where they differ.
//!
//! ```no_run
//! use argon2_bind::Engine;
//!
//! let engine = Engine::best()?;
//! let digest = engine.hash(2, 65536, 1, b"correct horse", b"somesalt12345678", 32)?;
//! assert!(engine.verify(&digest, 2, 65536, 1, b"correct horse", b"somesalt12345678")?);
//! # Ok::<(), argon2_bind::Argon2Error>(())
//! ```
//!
//! Engines hold no mutable state and can be shared between threads. Each call
//! blocks until the primitive returns and cannot be cancelled.

mod algorithm;
mod error;
mod params;
pub mod primitive;
mod salt;
pub mod verify;

use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::{debug, trace, warn};
use zeroize::{Zeroize, Zeroizing};

pub use crate::algorithm::{AlgorithmId, Variant, Version};
pub use crate::error::{
    Argon2Error, BINDING_INIT_FAILED, BINDING_RNG_UNAVAILABLE, BINDING_UNRECOGNIZED, ErrorKind,
    Origin, Result,
};
pub use crate::params::CostParams;
pub use crate::primitive::{Argon2Primitive, RawHasher};
pub use crate::salt::{SALT_LEN, generate_salt};

/// Hashing engine bound to a fixed Argon2 variant and version.
#[derive(Clone)]
pub struct Engine<R = Argon2Primitive> {
    id: AlgorithmId,
    hasher: R,
}

impl Engine<Argon2Primitive> {
    /// Engine backed by the production primitive.
    ///
    /// The first call in a process runs the primitive's known-answer test.
    pub fn new(id: AlgorithmId) -> Result<Self> {
        Ok(Self::with_hasher(id, Argon2Primitive::new()?))
    }

    pub fn from_codes(variant: u32, version: u32) -> Result<Self> {
        Self::new(AlgorithmId::from_codes(variant, version)?)
    }

    /// Engine for a named identity such as `Argon2id13`.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::new(name.parse()?)
    }

    /// Engine for [`AlgorithmId::BEST`].
    pub fn best() -> Result<Self> {
        Self::new(AlgorithmId::BEST)
    }
}

impl<R: RawHasher> Engine<R> {
    pub fn with_hasher(id: AlgorithmId, hasher: R) -> Self {
        debug!(algorithm = %id, "argon2 engine ready");
        Self { id, hasher }
    }

    pub fn id(&self) -> AlgorithmId {
        self.id
    }

    pub fn variant(&self) -> Variant {
        self.id.variant()
    }

    pub fn version(&self) -> Version {
        self.id.version()
    }

    /// Hashes `password` and `salt` into a new buffer of `out_len` bytes.
    ///
    /// `memory_cost_kib` is in kibibytes, `parallelism` is the lane count.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `out_len` is zero or any check of
    /// [`hash_into`](Self::hash_into) fails; `PrimitiveFailure` if the
    /// primitive rejects the request.
    pub fn hash(
        &self,
        time_cost: u32,
        memory_cost_kib: u32,
        parallelism: u32,
        password: &[u8],
        salt: &[u8],
        out_len: usize,
    ) -> Result<Vec<u8>> {
        if out_len == 0 {
            return Err(Argon2Error::invalid_argument("outLength must be > 0"));
        }

        let mut out = vec![0u8; out_len];
        self.hash_into(time_cost, memory_cost_kib, parallelism, password, salt, &mut out)?;
        Ok(out)
    }

    /// Hashes into a caller-supplied buffer and hands the same buffer back.
    ///
    /// Parameters are checked in argument order and the first failing check
    /// is reported. The primitive is not called unless all of them pass.
    /// `password` and `out` cannot alias; the borrow rules forbid it.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a zero cost or an empty buffer,
    /// `PrimitiveFailure` if the primitive rejects the request. After a
    /// failure the contents of `out` are unspecified.
    pub fn hash_into<'o>(
        &self,
        time_cost: u32,
        memory_cost_kib: u32,
        parallelism: u32,
        password: &[u8],
        salt: &[u8],
        out: &'o mut [u8],
    ) -> Result<&'o mut [u8]> {
        if time_cost == 0 {
            return Err(Argon2Error::invalid_argument("tCost must be > 0"));
        }
        if memory_cost_kib == 0 {
            return Err(Argon2Error::invalid_argument("mCost must be > 0"));
        }
        if parallelism == 0 {
            return Err(Argon2Error::invalid_argument("parallelism must be > 0"));
        }
        if password.is_empty() {
            return Err(Argon2Error::invalid_argument("password length must be > 0"));
        }
        if salt.is_empty() {
            return Err(Argon2Error::invalid_argument("salt length must be > 0"));
        }
        if out.is_empty() {
            return Err(Argon2Error::invalid_argument("out length must be > 0"));
        }

        trace!(
            algorithm = %self.id,
            time_cost,
            memory_cost_kib,
            parallelism,
            out_len = out.len(),
            "delegating to argon2 primitive"
        );

        if let Err(err) = self.hasher.raw_hash(
            self.id,
            time_cost,
            memory_cost_kib,
            parallelism,
            password,
            salt,
            out,
        ) {
            warn!(algorithm = %self.id, code = ?err.code(), "argon2 primitive failed: {err}");
            return Err(err);
        }

        Ok(out)
    }

    /// Like [`hash`](Self::hash), but the digest is wiped when dropped.
    pub fn hash_zeroizing(
        &self,
        time_cost: u32,
        memory_cost_kib: u32,
        parallelism: u32,
        password: &[u8],
        salt: &[u8],
        out_len: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        self.hash(time_cost, memory_cost_kib, parallelism, password, salt, out_len)
            .map(Zeroizing::new)
    }

    /// Hashes with bundled cost parameters.
    pub fn hash_with(&self, cost: &CostParams, password: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
        self.hash(
            cost.time_cost(),
            cost.memory_cost_kib(),
            cost.parallelism(),
            password,
            salt,
            cost.output_len(),
        )
    }

    /// Recomputes the digest under the given parameters and compares it with
    /// `reference` in constant time.
    ///
    /// The recomputed digest has the reference's length and is zeroed before
    /// this returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `reference` is empty; otherwise the errors of
    /// [`hash_into`](Self::hash_into), unchanged.
    pub fn verify(
        &self,
        reference: &[u8],
        time_cost: u32,
        memory_cost_kib: u32,
        parallelism: u32,
        password: &[u8],
        salt: &[u8],
    ) -> Result<bool> {
        let mut scratch = Zeroizing::new(vec![0u8; reference.len()]);
        self.verify_into(
            reference,
            time_cost,
            memory_cost_kib,
            parallelism,
            password,
            salt,
            &mut scratch,
        )
    }

    /// Verifies with bundled cost parameters. The output length comes from
    /// `reference`, not from `cost`.
    pub fn verify_with(
        &self,
        reference: &[u8],
        cost: &CostParams,
        password: &[u8],
        salt: &[u8],
    ) -> Result<bool> {
        self.verify(
            reference,
            cost.time_cost(),
            cost.memory_cost_kib(),
            cost.parallelism(),
            password,
            salt,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn verify_into(
        &self,
        reference: &[u8],
        time_cost: u32,
        memory_cost_kib: u32,
        parallelism: u32,
        password: &[u8],
        salt: &[u8],
        scratch: &mut [u8],
    ) -> Result<bool> {
        if reference.is_empty() {
            return Err(Argon2Error::invalid_argument("inHash length must be > 0"));
        }
        if scratch.len() != reference.len() {
            return Err(Argon2Error::invalid_argument(format!(
                "digest lengths differ: {} != {}",
                reference.len(),
                scratch.len()
            )));
        }

        let outcome = self
            .hash_into(time_cost, memory_cost_kib, parallelism, password, salt, scratch)
            .and_then(|derived| verify::compare_digests(reference, derived));
        scratch.zeroize();

        Ok(outcome?.matches())
    }
}

impl<R> PartialEq for Engine<R> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<R> Eq for Engine<R> {}

impl<R> Hash for Engine<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<R> fmt::Debug for Engine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<R> fmt::Display for Engine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Argon2(type={}, version={})",
            self.id.variant().label(),
            self.id.version().code()
        )
    }
}
