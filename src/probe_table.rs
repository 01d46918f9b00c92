//! ProbeTable: open addressing over a fixed-size slot array with tombstones.

use crate::config::{ProbeConfig, DEFAULT_LOAD_FACTOR};
use crate::error::InvalidArgument;
use crate::probe::{gcd, ProbeSeq};
use crate::slot::{empty_slots, Slot};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use hashbrown::hash_map::DefaultHashBuilder;
use tracing::{debug, trace};

/// Where a lookup probe stopped.
enum Lookup {
    Found(usize),
    /// Hit an Empty slot, or walked a full cycle without a match.
    Absent,
}

/// Open-addressing hash table with a fixed additive probe gap.
///
/// Removal leaves a tombstone so later keys on the same probe path stay
/// reachable; tombstones are reclaimed either by a new key landing on them
/// or by the next growth.
pub struct ProbeTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    slots: Box<[Slot<K, V>]>,
    config: ProbeConfig,
    len: usize,
    tombstones: usize,
    threshold: usize,
}

impl<K, V> ProbeTable<K, V>
where
    K: Eq + Hash,
{
    /// Table of at least `capacity` slots (raised to the configured floor).
    pub fn new(capacity: i64, load_factor: f32) -> Result<Self, InvalidArgument> {
        Self::with_config(
            capacity,
            ProbeConfig::default().with_load_factor(load_factor),
        )
    }

    /// Like `new` with the default load factor of 0.5.
    pub fn with_capacity(capacity: i64) -> Result<Self, InvalidArgument> {
        Self::new(capacity, DEFAULT_LOAD_FACTOR)
    }

    pub fn with_config(capacity: i64, config: ProbeConfig) -> Result<Self, InvalidArgument> {
        Self::with_hasher(capacity, config, Default::default())
    }
}

impl<K, V, S> Default for ProbeTable<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::build(0, ProbeConfig::default(), S::default())
    }
}

/// Iterator over live entries in unspecified order.
pub struct Iter<'a, K, V> {
    it: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.it.find_map(Slot::entry)?;
        self.remaining -= 1;
        Some(e)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over live entries with mutable values.
pub struct IterMut<'a, K, V> {
    it: core::slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.it.find_map(Slot::entry_mut)?;
        self.remaining -= 1;
        Some(e)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V, S> ProbeTable<K, V, S> {
    fn build(requested: usize, config: ProbeConfig, hasher: S) -> Self {
        let capacity = config.initial_capacity(requested);
        let threshold = config.threshold(capacity);
        trace!(requested, capacity, threshold, "new probe table");
        Self {
            hasher,
            slots: empty_slots(capacity),
            config,
            len: 0,
            tombstones: 0,
            threshold,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live-entry count at which the next `put` grows the table first.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn load_factor(&self) -> f32 {
        self.config.load_factor
    }

    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.slots.iter(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.slots.iter_mut(),
            remaining: self.len,
        }
    }

    #[inline]
    fn probe_seq(&self, hash: u64) -> ProbeSeq {
        ProbeSeq::new(hash, self.slots.len(), self.config.probe_gap)
    }

    /// Lookup probe: skips tombstones and mismatches, stops on Empty.
    fn probe<Q>(&self, hash: u64, q: &Q) -> Lookup
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        for i in self.probe_seq(hash) {
            match &self.slots[i] {
                Slot::Empty => return Lookup::Absent,
                Slot::Occupied { hash: h, key, .. } if *h == hash && key.borrow() == q => {
                    return Lookup::Found(i);
                }
                _ => {}
            }
        }
        Lookup::Absent
    }

    /// Insert probe: first Empty or Tombstone slot on the path.
    fn probe_insert(&self, hash: u64) -> usize {
        let slots = &self.slots;
        self.probe_seq(hash)
            .find(|&i| slots[i].is_reusable())
            .expect("len < capacity leaves a reusable slot on every full probe cycle")
    }

    /// Reallocate at double capacity (repeated until the new threshold
    /// exceeds `len`) and re-place every live entry by its cached hash.
    /// Tombstones are dropped.
    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let mut capacity = old_capacity;
        loop {
            capacity = capacity.checked_mul(2).expect("capacity overflow");
            if self.config.threshold(capacity) > self.len {
                break;
            }
        }
        debug_assert_eq!(gcd(capacity, self.config.probe_gap), 1);

        let old = mem::replace(&mut self.slots, empty_slots(capacity));
        let dropped = mem::take(&mut self.tombstones);
        self.threshold = self.config.threshold(capacity);

        let mut placed = 0usize;
        for slot in old.into_vec() {
            if let Slot::Occupied { hash, key, value } = slot {
                let i = self.probe_insert(hash);
                self.slots[i] = Slot::Occupied { hash, key, value };
                placed += 1;
            }
        }
        debug_assert_eq!(placed, self.len);

        debug!(
            old_capacity,
            capacity,
            threshold = self.threshold,
            live = self.len,
            dropped_tombstones = dropped,
            "grew probe table"
        );
    }
}

impl<K, V, S> ProbeTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(
        capacity: i64,
        config: ProbeConfig,
        hasher: S,
    ) -> Result<Self, InvalidArgument> {
        if capacity < 0 {
            return Err(InvalidArgument::NegativeCapacity(capacity));
        }
        config.validate()?;
        let requested =
            usize::try_from(capacity).map_err(|_| InvalidArgument::CapacityOverflow(capacity))?;
        Ok(Self::build(requested, config, hasher))
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Insert or overwrite. Returns the previous value for an existing key,
    /// whose stored key is kept.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.len >= self.threshold {
            self.grow();
        }
        let hash = self.make_hash(&key);
        match self.probe(hash, &key) {
            Lookup::Found(i) => self.slots[i].value_mut().map(|v| mem::replace(v, value)),
            Lookup::Absent => {
                let i = self.probe_insert(hash);
                if self.slots[i].is_tombstone() {
                    self.tombstones -= 1;
                }
                self.slots[i] = Slot::Occupied { hash, key, value };
                self.len += 1;
                None
            }
        }
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.probe(self.make_hash(q), q) {
            Lookup::Found(i) => self.slots[i].value(),
            Lookup::Absent => None,
        }
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.probe(self.make_hash(q), q) {
            Lookup::Found(i) => self.slots[i].value_mut(),
            Lookup::Absent => None,
        }
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        matches!(self.probe(self.make_hash(q), q), Lookup::Found(_))
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    /// Remove and return the owned entry, leaving a tombstone in its slot.
    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Lookup::Found(i) = self.probe(self.make_hash(q), q) else {
            return None;
        };
        let slot = mem::replace(&mut self.slots[i], Slot::Tombstone);
        self.len -= 1;
        self.tombstones += 1;
        slot.into_entry()
    }
}

impl<K, V, S> Extend<(K, V)> for ProbeTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ProbeTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
