use std::sync::OnceLock;

use argon2::{Algorithm, AssociatedData, Block, Params, ParamsBuilder};
use subtle::ConstantTimeEq;
use tracing::{info, warn};
use zeroize::Zeroize;

use super::RawHasher;
use crate::algorithm::{AlgorithmId, Variant, Version};
use crate::error::{Argon2Error, BINDING_INIT_FAILED, BINDING_UNRECOGNIZED, Result};

/// Reference library code for a failed working-memory allocation.
const MEMORY_ALLOCATION_ERROR: i32 = -22;

/// Outcome of the process-wide known-answer test, computed at most once.
static SELF_TEST: OnceLock<Result<()>> = OnceLock::new();

// RFC 9106, section 5.3 (Argon2id, version 0x13).
const KAT_PASSWORD: [u8; 32] = [0x01; 32];
const KAT_SALT: [u8; 16] = [0x02; 16];
const KAT_SECRET: [u8; 8] = [0x03; 8];
const KAT_AD: [u8; 12] = [0x04; 12];
const KAT_TAG: [u8; 32] = [
    0x0d, 0x64, 0x0d, 0xf5, 0x8d, 0x78, 0x76, 0x6c, 0x08, 0xc0, 0x37, 0xa3, 0x4a, 0x8b, 0x53, 0xc9,
    0xd0, 0x1e, 0xf0, 0x45, 0x2d, 0x75, 0xb6, 0x5e, 0xb5, 0x25, 0x20, 0xe9, 0x6b, 0x01, 0xe6, 0x59,
];

/// Production primitive backed by the RustCrypto `argon2` crate.
///
/// Constructing it runs the known-answer test once per process. Later
/// constructions reuse the cached outcome.
#[derive(Debug, Clone, Copy)]
pub struct Argon2Primitive {
    _ready: (),
}

impl Argon2Primitive {
    pub fn new() -> Result<Self> {
        SELF_TEST.get_or_init(self_test).clone()?;
        Ok(Self { _ready: () })
    }
}

impl RawHasher for Argon2Primitive {
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
        let params =
            Params::new(memory_cost_kib, time_cost, parallelism, None).map_err(map_error)?;
        let mut blocks = allocate_blocks(params.block_count())?;

        let result = argon2::Argon2::new(algorithm(id.variant()), version(id.version()), params)
            .hash_password_into_with_memory(password, salt, out, &mut blocks[..])
            .map_err(map_error);
        blocks.zeroize();
        result
    }
}

/// Reserves the working memory up front so an oversized memory cost is
/// reported as an error instead of aborting the process.
fn allocate_blocks(count: usize) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    if let Err(e) = blocks.try_reserve_exact(count) {
        warn!(blocks = count, "argon2 working memory allocation failed: {e}");
        return Err(Argon2Error::primitive(
            MEMORY_ALLOCATION_ERROR,
            "memory allocation error",
        ));
    }
    blocks.resize(count, Block::default());
    Ok(blocks)
}

fn algorithm(variant: Variant) -> Algorithm {
    match variant {
        Variant::D => Algorithm::Argon2d,
        Variant::I => Algorithm::Argon2i,
        Variant::Id => Algorithm::Argon2id,
    }
}

fn version(version: Version) -> argon2::Version {
    match version {
        Version::V10 => argon2::Version::V0x10,
        Version::V13 => argon2::Version::V0x13,
    }
}

/// Maps `argon2` crate errors onto the reference library's negative codes.
fn map_error(err: argon2::Error) -> Argon2Error {
    let code = match err {
        argon2::Error::OutputTooShort => -2,
        argon2::Error::OutputTooLong => -3,
        argon2::Error::PwdTooLong => -5,
        argon2::Error::SaltTooShort => -6,
        argon2::Error::SaltTooLong => -7,
        argon2::Error::AdTooLong => -9,
        argon2::Error::SecretTooLong => -11,
        argon2::Error::TimeTooSmall => -12,
        argon2::Error::MemoryTooLittle => -14,
        argon2::Error::MemoryTooMuch => -15,
        argon2::Error::ThreadsTooFew => -16,
        argon2::Error::ThreadsTooMany => -17,
        argon2::Error::VersionInvalid => -25,
        argon2::Error::AlgorithmInvalid => -26,
        _ => {
            return Argon2Error::binding(
                BINDING_UNRECOGNIZED,
                format!("unrecognized primitive error: {err}"),
            );
        }
    };
    Argon2Error::primitive(code, err.to_string())
}

fn self_test() -> Result<()> {
    let params = ParamsBuilder::new()
        .m_cost(32)
        .t_cost(3)
        .p_cost(4)
        .data(AssociatedData::new(&KAT_AD).map_err(map_error)?)
        .build()
        .map_err(map_error)?;

    let hasher = argon2::Argon2::new_with_secret(
        &KAT_SECRET,
        Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    )
    .map_err(map_error)?;

    let mut tag = [0u8; 32];
    hasher
        .hash_password_into(&KAT_PASSWORD, &KAT_SALT, &mut tag)
        .map_err(map_error)?;

    if bool::from(tag[..].ct_eq(&KAT_TAG[..])) {
        info!("argon2 primitive passed known-answer test");
        Ok(())
    } else {
        warn!("argon2 primitive failed known-answer test");
        Err(Argon2Error::binding(
            BINDING_INIT_FAILED,
            "argon2 primitive failed known-answer test",
        ))
    }
}
