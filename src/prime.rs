//! Prime capacity sizing shared by both hash map variants.
//!
//! Both tables keep their capacity prime so that quadratic probing visits
//! enough distinct slots and modular reduction spreads hashes evenly.

/// Returns true if `n` is a prime number.
///
/// Trial division by odd factors up to the square root of `n`.
#[must_use]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }

    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    while factor.saturating_mul(factor) <= n {
        if n % factor == 0 {
            return false;
        }
        factor = factor.saturating_add(2);
    }

    true
}

/// Returns the smallest odd prime reached by counting up in steps of two
/// from `n` (after bumping an even `n` to `n + 1`).
///
/// Note that an input that is already prime but even (that is, 2) yields 3;
/// callers that want to keep an already-prime capacity check [`is_prime`]
/// before calling this.
#[must_use]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n.saturating_add(1) } else { n };

    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }

    candidate
}
