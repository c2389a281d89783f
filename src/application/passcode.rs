//! One-time passcode generation.
//!
//! Passcodes are exactly six ASCII digits, zero-padded, drawn from the OS
//! entropy source. They never expire and are never rotated except by the
//! enrollment path issuing a fresh entry.

use rand::Rng;

pub const PASSCODE_LEN: usize = 6;

pub fn generate() -> String {
    let n: u32 = rand::rngs::OsRng.gen_range(0..1_000_000);
    format!("{:06}", n)
}

/// Exact-shape check: six ASCII digits, nothing else. Comparison against a
/// stored passcode is plain string equality, no normalization.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == PASSCODE_LEN && code.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_passcodes_are_six_digits() {
        for _ in 0..200 {
            let code = generate();
            assert!(is_well_formed(&code), "bad passcode: {code:?}");
        }
    }

    #[test]
    fn well_formed_rejects_wrong_shapes() {
        assert!(is_well_formed("000000"));
        assert!(is_well_formed("123456"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("12345"));
        assert!(!is_well_formed("1234567"));
        assert!(!is_well_formed("12345a"));
        assert!(!is_well_formed(" 23456"));
        assert!(!is_well_formed("１２３４５６")); // full-width digits
    }
}
