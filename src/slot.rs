//! Slot states of the backing array.

/// One position of the backing array. Exactly one state at a time.
#[derive(Debug)]
pub(crate) enum Slot<K, V> {
    Empty,
    /// Formerly occupied; lookups walk past it, inserts may reuse it.
    Tombstone,
    /// `hash` caches the key's hash so rehashing never calls `K: Hash`.
    Occupied { hash: u64, key: K, value: V },
}

impl<K, V> Slot<K, V> {
    /// Empty or Tombstone: a slot the insert probe may claim.
    #[inline]
    pub(crate) fn is_reusable(&self) -> bool {
        !matches!(self, Slot::Occupied { .. })
    }

    #[inline]
    pub(crate) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self) -> Option<(&K, &mut V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((&*key, value)),
            _ => None,
        }
    }

    pub(crate) fn into_entry(self) -> Option<(K, V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }
}

/// A freshly allocated array of `capacity` Empty slots.
pub(crate) fn empty_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reusable_states() {
        let empty: Slot<&str, i32> = Slot::Empty;
        let tomb: Slot<&str, i32> = Slot::Tombstone;
        let occ = Slot::Occupied {
            hash: 7,
            key: "k",
            value: 1,
        };
        assert!(empty.is_reusable());
        assert!(tomb.is_reusable());
        assert!(tomb.is_tombstone());
        assert!(!occ.is_reusable());
        assert_eq!(occ.entry(), Some((&"k", &1)));
        assert_eq!(occ.into_entry(), Some(("k", 1)));
        assert!(empty.value().is_none());
    }

    #[test]
    fn empty_slots_has_requested_len() {
        let slots: Box<[Slot<u8, u8>]> = empty_slots(13);
        assert_eq!(slots.len(), 13);
        assert!(slots.iter().all(|s| matches!(s, Slot::Empty)));
    }
}
