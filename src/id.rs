//! String-hash element identifiers.
//!
//! Ids let embedding code find an element again without holding its handle,
//! e.g. when the tree is rebuilt from a declarative description. The hash is
//! FNV-1a over the label bytes, optionally mixed with an index for elements
//! created in a loop.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x100_0000_01b3;

fn hash_bytes(data: &[u8], seed: u64) -> u64 {
    let mut hash = if seed == 0 { FNV_OFFSET } else { seed };
    for &byte in data {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Identifier derived from a string label, used for element lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    hash: u64,
}

impl ElementId {
    /// Creates an id from the `label`.
    pub fn new(label: &str) -> ElementId {
        Self::new_index(label, 0)
    }

    /// Creates an id from the `label` and an `index`, for elements created in
    /// a loop over the same label.
    pub fn new_index(label: &str, index: u32) -> ElementId {
        let base = hash_bytes(label.as_bytes(), 0);
        let hash = if index == 0 {
            base
        } else {
            hash_bytes(&index.to_le_bytes(), base)
        };
        ElementId { hash }
    }

    /// The raw hash value.
    pub fn value(&self) -> u64 {
        self.hash
    }
}

impl From<&str> for ElementId {
    fn from(label: &str) -> Self {
        ElementId::new(label)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn same_label_same_id() {
        assert_eq!(ElementId::new("ok_button"), ElementId::new("ok_button"));
    }

    #[test]
    fn different_labels_differ() {
        assert_ne!(ElementId::new("ok_button"), ElementId::new("cancel_button"));
    }

    #[test]
    fn index_variants_differ() {
        let base = ElementId::new("row");
        assert_eq!(ElementId::new_index("row", 0), base);
        assert_ne!(ElementId::new_index("row", 1), base);
        assert_ne!(ElementId::new_index("row", 1), ElementId::new_index("row", 2));
    }
}
