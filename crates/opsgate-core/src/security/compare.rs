//! Constant-time comparison helpers.

/// Compare two byte slices without short-circuiting on the first difference.
///
/// Lengths are compared up front; callers that must not leak the length of a
/// secret should compare fixed-size digests instead.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_slices() {
        assert!(constant_time_eq(b"token-123", b"token-123"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_different_slices() {
        assert!(!constant_time_eq(b"token-123", b"token-124"));
        assert!(!constant_time_eq(b"token", b"token-123"));
    }
}
