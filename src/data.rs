//! Static URL source: the ordered list of comment pages to archive.
//!
//! The list is maintained by hand. New batches collected from the forum's
//! search are filtered against the already-archived list with
//! [`partition_new_urls`] before being appended, so ids stay stable.

use std::collections::HashSet;

/// Comment page URLs, in archive order. Index + 1 + the configured id offset
/// is the record id.
pub static URLS: &[&str] = &[
    "https://www.kaskus.co.id/post/64c8a1f2b4d9aa1e3a0f7c21",
    "https://www.kaskus.co.id/post/64c8b03e1a2f4c5d6e7f8a92",
    "https://www.kaskus.co.id/post/64c9d4a7e8b1c2d3f4a5b6c7",
    "https://www.kaskus.co.id/post/64ca12bc3d4e5f6a7b8c9d0e",
    "https://www.kaskus.co.id/post/64cb7f019a8b7c6d5e4f3a2b",
    "https://www.kaskus.co.id/post/64cc3e5d6f7a8b9c0d1e2f3a",
    "https://www.kaskus.co.id/post/64cd90817263544536271809",
    "https://www.kaskus.co.id/post/64ce0a1b2c3d4e5f60718293",
    "https://www.kaskus.co.id/post/64cf55aa66bb77cc88dd99ee",
    "https://www.kaskus.co.id/post/64d001122334455667788990",
    "https://www.kaskus.co.id/post/64d1abcdef0123456789abcd",
    "https://www.kaskus.co.id/post/64d2fedcba9876543210fedc",
];

/// Split a candidate batch against the already-archived list.
///
/// Returns `(new, duplicates)`, both preserving the batch's order. A URL
/// repeated within the batch itself counts as a duplicate after its first
/// occurrence.
#[must_use]
pub fn partition_new_urls<'a>(
    known: &[&str],
    candidates: &[&'a str],
) -> (Vec<&'a str>, Vec<&'a str>) {
    let known: HashSet<&str> = known.iter().copied().collect();
    let mut seen_in_batch = HashSet::new();
    let mut fresh = Vec::new();
    let mut duplicates = Vec::new();

    for &url in candidates {
        if known.contains(url) || !seen_in_batch.insert(url) {
            duplicates.push(url);
        } else {
            fresh.push(url);
        }
    }

    (fresh, duplicates)
}
