use sha2::Digest;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Compare two strings in constant time.
///
/// Both inputs are reduced to SHA-256 digests first so the comparison runs over
/// two fixed-length buffers: the timing depends neither on where the inputs
/// first differ nor on their lengths.
///
/// Meant for checking caller-supplied static credentials against configured
/// values. Password hashes go through [`crate::PasswordHasher::verify`].
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let a = Sha256::digest(a.as_bytes());
    let b = Sha256::digest(b.as_bytes());

    a.as_slice().ct_eq(b.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_strings() {
        assert!(constant_time_eq("fahmi", "fahmi"));
        assert!(constant_time_eq("", ""));
    }

    #[test]
    fn test_different_strings() {
        assert!(!constant_time_eq("fahmi", "fahm1"));
        assert!(!constant_time_eq("user", "user2"));
        assert!(!constant_time_eq("", "password"));
        assert!(!constant_time_eq("Password", "password"));
    }

    #[test]
    fn test_matches_byte_equality() {
        let samples = ["", "a", "ab", "user", "user ", "üser", "password", "pass:word"];

        for a in samples {
            for b in samples {
                assert_eq!(constant_time_eq(a, b), a == b, "{a:?} vs {b:?}");
            }
        }
    }
}
