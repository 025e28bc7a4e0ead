//! Bucket index computation from a key's display form.

use std::fmt::{self, Display, Write};

/// Folds characters into a running bucket index without materializing the rendered key.
struct BucketFolder {
    total: u64,
    buckets: u64,
}

impl Write for BucketFolder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            // Widen for the multiply: `total` is already reduced mod `buckets`, but
            // `total * 31 + ch` can exceed `u64` for absurdly large bucket counts.
            self.total =
                ((u128::from(self.total) * 31 + u128::from(ch as u32)) % u128::from(self.buckets)) as u64;
        }
        Ok(())
    }
}

/// Computes the bucket index for `key` in a table with `buckets` buckets.
///
/// The key's [`Display`] output is folded character by character (by Unicode code point) using
/// `total = (total * 31 + codepoint) % buckets`, starting from 0. The result is deterministic for
/// a fixed bucket count and always lies in `[0, buckets)`; the arithmetic is unsigned, so no
/// negative intermediate needs guarding against. There is no seeding, so the function is not
/// collision resistant against adversarial keys.
pub fn bucket_index<K: Display + ?Sized>(key: &K, buckets: usize) -> usize {
    debug_assert!(buckets > 0);
    let mut folder = BucketFolder {
        total: 0,
        buckets: buckets as u64,
    };
    // `BucketFolder::write_str` never fails, so this can only be `Err` for a `Display` impl that
    // invents errors; fold whatever was written either way.
    let _ = write!(folder, "{key}");
    folder.total as usize
}
