//! Trait definitions for comparing fingerprints.

/// A computed perceptual hash that can be compared
pub trait PerceptualHash: Clone + Send + Sync {
    /// Hamming distance to another hash
    ///
    /// Returns the number of bits that differ between the two hashes.
    /// Lower distance = more similar images.
    fn diff_bits(&self, other: &Self) -> u32;

    /// Get the raw hash bytes
    fn as_bytes(&self) -> &[u8];

    /// Get the hash as a hexadecimal string
    fn to_hex(&self) -> String {
        self.as_bytes()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}
