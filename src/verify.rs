//! Constant-time digest comparison.

use std::hint::black_box;

use subtle::ConstantTimeEq;

use crate::error::{Argon2Error, Result};

/// Outcome of a full-length digest comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    mismatches: usize,
    inspected: usize,
}

impl Comparison {
    pub fn matches(&self) -> bool {
        self.mismatches == 0
    }

    /// Number of byte positions the comparison visited.
    pub fn inspected(&self) -> usize {
        self.inspected
    }
}

/// Compares two digests of equal length without exiting early.
///
/// Every position is visited and each inequality bumps a counter, so the
/// running time does not depend on where (or whether) the digests differ.
///
/// # Errors
///
/// Returns `InvalidArgument` when the lengths differ. That check is a
/// precondition and is not performed in constant time.
pub fn compare_digests(expected: &[u8], actual: &[u8]) -> Result<Comparison> {
    if expected.len() != actual.len() {
        return Err(Argon2Error::invalid_argument(format!(
            "digest lengths differ: {} != {}",
            expected.len(),
            actual.len()
        )));
    }

    let mut mismatches = 0usize;
    let mut inspected = 0usize;
    for (a, b) in expected.iter().zip(actual) {
        mismatches += usize::from(a.ct_ne(b).unwrap_u8());
        inspected += 1;
    }

    Ok(Comparison {
        mismatches: black_box(mismatches),
        inspected,
    })
}
