//! Canonical Hashing
//!
//! FNV-1a 64-bit primitives shared by run identity and event-stream verification.
//! Explicit byte layout: integers little-endian, strings one byte per UTF-16 unit
//! with a second (high) byte only for units above 0x7F.

/// FNV-1a 64-bit offset basis. Also the hash of an empty input.
pub const FNV_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;

/// FNV-1a 64-bit prime.
pub const FNV_PRIME: u64 = 1_099_511_628_211;

/// Fold one byte into a running hash.
#[inline]
pub fn hash_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// Fold a u32 (little-endian) into a running hash.
#[inline]
pub fn hash_u32(hash: u64, value: u32) -> u64 {
    value
        .to_le_bytes()
        .iter()
        .fold(hash, |h, &b| hash_byte(h, b))
}

/// Fold an i32 (little-endian, two's complement) into a running hash.
#[inline]
pub fn hash_i32(hash: u64, value: i32) -> u64 {
    hash_u32(hash, value as u32)
}

/// Fold a string into a running hash.
///
/// ASCII costs one byte per character. Identity hashes depend on this exact
/// encoding, so it must not be replaced by plain UTF-8.
pub fn hash_str(hash: u64, value: &str) -> u64 {
    value.encode_utf16().fold(hash, |mut h, unit| {
        h = hash_byte(h, unit as u8);
        if unit > 0x7F {
            h = hash_byte(h, (unit >> 8) as u8);
        }
        h
    })
}

/// Incremental FNV-1a 64 hasher.
///
/// Order of updates is critical for determinism.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fnv1a {
    hash: u64,
}

impl Default for Fnv1a {
    fn default() -> Self {
        Self::new()
    }
}

impl Fnv1a {
    /// Start from the offset basis.
    pub fn new() -> Self {
        Self { hash: FNV_OFFSET_BASIS }
    }

    /// Resume from a previously folded value.
    pub fn from_state(hash: u64) -> Self {
        Self { hash }
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hash = hash_byte(self.hash, value);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hash = hash_u32(self.hash, value);
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hash = hash_i32(self.hash, value);
    }

    /// Update with the raw IEEE-754 bits of a float.
    #[inline]
    pub fn update_f32_bits(&mut self, value: f32) {
        self.update_u32(value.to_bits());
    }

    /// Update with a string.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.hash = hash_str(self.hash, value);
    }

    /// Current hash value.
    pub fn finish(&self) -> u64 {
        self.hash
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_offset_basis() {
        assert_eq!(Fnv1a::new().finish(), 0xcbf2_9ce4_8422_2325);
        assert_eq!(hash_str(FNV_OFFSET_BASIS, ""), FNV_OFFSET_BASIS);
    }

    #[test]
    fn test_reference_vector() {
        // Published FNV-1a 64 test vector for "a"
        assert_eq!(hash_str(FNV_OFFSET_BASIS, "a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_non_ascii_adds_high_byte() {
        // U+00E9 folds 0xE9 then 0x00
        let expected = hash_byte(hash_byte(FNV_OFFSET_BASIS, 0xE9), 0x00);
        assert_eq!(hash_str(FNV_OFFSET_BASIS, "é"), expected);
        assert_eq!(hash_str(FNV_OFFSET_BASIS, "é"), 0x0a6a_1207_b6cd_9fac);
        assert_eq!(hash_str(FNV_OFFSET_BASIS, "Ā"), 0x0832_8707_b4eb_6e3a);
    }

    #[test]
    fn test_integers_little_endian() {
        let manual = [0x00u8, 0x00, 0x80, 0x3f]
            .iter()
            .fold(FNV_OFFSET_BASIS, |h, &b| hash_byte(h, b));
        assert_eq!(hash_u32(FNV_OFFSET_BASIS, 0x3f80_0000), manual);
        assert_eq!(hash_u32(FNV_OFFSET_BASIS, 0x3f80_0000), 0x4b72_477f_9c5c_2f98);
        assert_eq!(hash_i32(FNV_OFFSET_BASIS, -1), 0x994f_7665_3e2a_3951);
    }

    #[test]
    fn test_hasher_matches_free_functions() {
        let mut hasher = Fnv1a::new();
        hasher.update_str("ReflexGates");
        hasher.update_u32(0xC0FFEE);
        hasher.update_i32(0);
        hasher.update_f32_bits(1.0);

        let mut h = hash_str(FNV_OFFSET_BASIS, "ReflexGates");
        h = hash_u32(h, 0xC0FFEE);
        h = hash_i32(h, 0);
        h = hash_u32(h, 1.0f32.to_bits());
        assert_eq!(hasher.finish(), h);

        let resumed = Fnv1a::from_state(h);
        assert_eq!(resumed.finish(), hasher.finish());
    }
}
