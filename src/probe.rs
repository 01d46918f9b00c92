//! Additive-gap probe sequence.
//!
//! Starting from `hash mod capacity`, each step advances by a fixed gap.
//! The walk covers every slot exactly once when `gcd(gap, capacity) == 1`.
//! For an odd gap, `gcd(gap, 2c) == gcd(gap, c)`, so doubling the capacity
//! never breaks coverage once the initial capacity is coprime.

/// Iterator over slot indices, yielding at most `capacity` positions.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSeq {
    pos: usize,
    step: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSeq {
    #[inline]
    pub(crate) fn new(hash: u64, capacity: usize, gap: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            pos: (hash % capacity as u64) as usize,
            step: gap % capacity,
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let cur = self.pos;
        self.pos = (self.pos + self.step) % self.capacity;
        Some(cur)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

pub(crate) fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Invariant: a coprime gap visits each slot exactly once per cycle.
    #[test]
    fn coprime_gap_covers_every_slot() {
        for (cap, hash) in [(500usize, 0u64), (500, 12_345), (1000, 999), (1, 42), (636, 7)] {
            let seen: BTreeSet<usize> = ProbeSeq::new(hash, cap, 127).collect();
            assert_eq!(seen.len(), cap, "capacity {cap}");
        }
    }

    /// Invariant: a shared factor strands slots; construction must rule this out.
    #[test]
    fn shared_factor_leaves_slots_unreachable() {
        let seen: BTreeSet<usize> = ProbeSeq::new(0, 254, 127).collect();
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn starts_at_home_and_wraps() {
        let idx: Vec<usize> = ProbeSeq::new(503, 500, 127).take(4).collect();
        assert_eq!(idx, vec![3, 130, 257, 384]);
        let wrapped: Vec<usize> = ProbeSeq::new(499, 500, 127).take(2).collect();
        assert_eq!(wrapped, vec![499, 126]);
    }

    #[test]
    fn gap_larger_than_capacity_is_reduced() {
        let idx: Vec<usize> = ProbeSeq::new(0, 10, 13).take(3).collect();
        assert_eq!(idx, vec![0, 3, 6]);
    }

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(500, 127), 1);
        assert_eq!(gcd(635, 127), 127);
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
    }
}
