//! # Chunk Cache
//!
//! Memoizes the derived artifacts of each generated chunk.
//!
//! ## What Is Stored
//!
//! A [`ChunkEntry`] keeps the run-length encoded field and the visible
//! faces. The dense field is dropped once both are built; callers that
//! need it again decode the entry.
//!
//! ## Eviction
//!
//! Retention is an [`EvictionPolicy`]. The default, [`RetainAll`], never
//! evicts. [`LruPolicy`] bounds the entry count and [`DistancePolicy`]
//! drops chunks that fall outside a radius around a moving centre.
//! Evicting an entry is always safe: regenerating it yields the same bytes.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use strata_shared::{ChunkCoord, PackedFace, VoxelMaterial};

use crate::error::GenResult;
use crate::field::VoxelField;
use crate::rle::EncodedField;
use crate::visibility::{check_edge, VisibleFaces};

// =============================================================================
// ENTRY
// =============================================================================

/// Cached result of generating one chunk. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkEntry {
    /// Run-length encoded field.
    pub encoded: EncodedField,
    /// Visible faces grouped by material.
    pub faces: VisibleFaces,
    /// True iff every voxel is air.
    pub is_empty: bool,
}

impl ChunkEntry {
    /// Builds an entry from a dense field.
    ///
    /// Empty chunks skip face extraction entirely.
    ///
    /// # Errors
    ///
    /// Returns `ChunkSizeOutOfRange` if the field edge exceeds what packed
    /// face coordinates can address.
    pub fn from_field(field: &VoxelField) -> GenResult<Self> {
        check_edge(field.edge())?;
        Ok(Self::from_validated_field(field))
    }

    /// Builds an entry from a field whose edge is already known to fit.
    pub(crate) fn from_validated_field(field: &VoxelField) -> Self {
        let encoded = EncodedField::encode(field);
        let is_empty = encoded.is_empty_chunk();
        let faces = if is_empty {
            VisibleFaces::default()
        } else {
            VisibleFaces::scan(field)
        };
        Self {
            encoded,
            faces,
            is_empty,
        }
    }

    /// Total number of visible faces.
    #[inline]
    #[must_use]
    pub const fn face_count(&self) -> usize {
        self.faces.total()
    }

    /// Visible faces grouped by material.
    #[inline]
    #[must_use]
    pub fn faces_by_material(&self) -> &BTreeMap<VoxelMaterial, Vec<PackedFace>> {
        self.faces.by_material()
    }
}

// =============================================================================
// EVICTION POLICIES
// =============================================================================

/// Decides which resident chunks to drop.
///
/// The cache calls [`touch`](Self::touch) on every insert and hit,
/// [`forget`](Self::forget) on every removal, and asks for
/// [`victims`](Self::victims) after each insert or policy change.
pub trait EvictionPolicy {
    /// Records a use of `coord`.
    fn touch(&mut self, coord: ChunkCoord);

    /// Returns chunks to evict now and stops tracking them.
    fn victims(&mut self) -> Vec<ChunkCoord>;

    /// Drops any state held for `coord`.
    fn forget(&mut self, coord: ChunkCoord);
}

/// Never evicts. Entries live as long as the cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetainAll;

impl EvictionPolicy for RetainAll {
    #[inline]
    fn touch(&mut self, _coord: ChunkCoord) {}

    #[inline]
    fn victims(&mut self) -> Vec<ChunkCoord> {
        Vec::new()
    }

    #[inline]
    fn forget(&mut self, _coord: ChunkCoord) {}
}

/// Keeps at most `capacity` chunks, evicting the least recently used.
#[derive(Clone, Debug)]
pub struct LruPolicy {
    capacity: usize,
    clock: u64,
    last_used: HashMap<ChunkCoord, u64>,
    by_age: BTreeMap<u64, ChunkCoord>,
}

impl LruPolicy {
    /// Creates a policy holding at most `capacity` chunks (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            clock: 0,
            last_used: HashMap::new(),
            by_age: BTreeMap::new(),
        }
    }

    /// Maximum resident chunks.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl EvictionPolicy for LruPolicy {
    fn touch(&mut self, coord: ChunkCoord) {
        self.clock += 1;
        if let Some(previous) = self.last_used.insert(coord, self.clock) {
            self.by_age.remove(&previous);
        }
        self.by_age.insert(self.clock, coord);
    }

    fn victims(&mut self) -> Vec<ChunkCoord> {
        let excess = self.last_used.len().saturating_sub(self.capacity);
        let victims: Vec<ChunkCoord> = self.by_age.values().take(excess).copied().collect();
        for coord in &victims {
            self.forget(*coord);
        }
        victims
    }

    fn forget(&mut self, coord: ChunkCoord) {
        if let Some(age) = self.last_used.remove(&coord) {
            self.by_age.remove(&age);
        }
    }
}

/// Keeps chunks within a Chebyshev `radius` of a centre chunk.
#[derive(Clone, Debug, Default)]
pub struct DistancePolicy {
    center: ChunkCoord,
    radius: u32,
    resident: BTreeSet<ChunkCoord>,
}

impl DistancePolicy {
    /// Creates a policy around `center`.
    #[must_use]
    pub fn new(center: ChunkCoord, radius: u32) -> Self {
        Self {
            center,
            radius,
            resident: BTreeSet::new(),
        }
    }

    /// Moves the focus. Takes effect on the next eviction pass.
    pub fn set_center(&mut self, center: ChunkCoord) {
        self.center = center;
    }

    /// Current focus.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> ChunkCoord {
        self.center
    }

    /// Retention radius in chunks.
    #[inline]
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }
}

impl EvictionPolicy for DistancePolicy {
    fn touch(&mut self, coord: ChunkCoord) {
        self.resident.insert(coord);
    }

    fn victims(&mut self) -> Vec<ChunkCoord> {
        let (center, radius) = (self.center, self.radius);
        let victims: Vec<ChunkCoord> = self
            .resident
            .iter()
            .filter(|coord| coord.chebyshev_distance(center) > radius)
            .copied()
            .collect();
        for coord in &victims {
            self.resident.remove(coord);
        }
        victims
    }

    fn forget(&mut self, coord: ChunkCoord) {
        self.resident.remove(&coord);
    }
}

// =============================================================================
// CACHE
// =============================================================================

/// Cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests served from the cache.
    pub hits: u64,
    /// Requests that generated a chunk.
    pub misses: u64,
    /// Entries dropped by the policy.
    pub evictions: u64,
    /// Entries currently held.
    pub resident: usize,
}

impl CacheStats {
    /// Fraction of requests served from the cache.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Chunk entries keyed by exact coordinate.
#[derive(Debug)]
pub struct ChunkCache<P = RetainAll> {
    entries: HashMap<ChunkCoord, Arc<ChunkEntry>>,
    policy: P,
    stats: CacheStats,
}

impl Default for ChunkCache<RetainAll> {
    fn default() -> Self {
        Self::new(RetainAll)
    }
}

impl<P: EvictionPolicy> ChunkCache<P> {
    /// Creates an empty cache with a retention policy.
    #[must_use]
    pub fn new(policy: P) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
            stats: CacheStats::default(),
        }
    }

    /// Returns the entry for `coord`, building it with `build` on a miss.
    pub fn get_or_insert_with(
        &mut self,
        coord: ChunkCoord,
        build: impl FnOnce() -> ChunkEntry,
    ) -> Arc<ChunkEntry> {
        if let Some(entry) = self.entries.get(&coord) {
            self.stats.hits += 1;
            self.policy.touch(coord);
            tracing::trace!(%coord, "chunk cache hit");
            return Arc::clone(entry);
        }

        self.stats.misses += 1;
        let entry = Arc::new(build());
        self.entries.insert(coord, Arc::clone(&entry));
        self.policy.touch(coord);
        self.evict();
        entry
    }

    /// Returns a resident entry without counting a request.
    #[inline]
    #[must_use]
    pub fn peek(&self, coord: ChunkCoord) -> Option<&Arc<ChunkEntry>> {
        self.entries.get(&coord)
    }

    /// Returns true if `coord` is resident.
    #[inline]
    #[must_use]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.entries.contains_key(&coord)
    }

    /// Removes an entry. A later request regenerates it.
    pub fn unload(&mut self, coord: ChunkCoord) -> Option<Arc<ChunkEntry>> {
        let removed = self.entries.remove(&coord);
        if removed.is_some() {
            self.policy.forget(coord);
            tracing::debug!(%coord, "chunk unloaded");
        }
        removed
    }

    /// Mutates the policy, then applies it.
    pub fn update_policy(&mut self, update: impl FnOnce(&mut P)) {
        update(&mut self.policy);
        self.evict();
    }

    /// Number of resident entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is resident.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resident coordinates, unordered.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.entries.keys().copied()
    }

    /// Counter snapshot.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            resident: self.entries.len(),
            ..self.stats
        }
    }

    fn evict(&mut self) {
        for coord in self.policy.victims() {
            if self.entries.remove(&coord).is_some() {
                self.stats.evictions += 1;
                tracing::debug!(%coord, "chunk evicted");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stone_entry() -> ChunkEntry {
        ChunkEntry::from_field(&VoxelField::filled(2, VoxelMaterial::Stone)).unwrap()
    }

    #[test]
    fn test_entry_from_empty_field() {
        let entry = ChunkEntry::from_field(&VoxelField::new(8)).unwrap();
        assert!(entry.is_empty);
        assert_eq!(entry.face_count(), 0);
        assert_eq!(entry.encoded.run_count(), 1);
    }

    #[test]
    fn test_entry_from_solid_field() {
        let entry = stone_entry();
        assert!(!entry.is_empty);
        assert_eq!(entry.face_count(), 24);
        assert_eq!(entry.faces_by_material().len(), 1);
    }

    #[test]
    fn test_entry_rejects_oversized_field() {
        use crate::error::GenerationError;

        let oversized = ChunkEntry::from_field(&VoxelField::filled(17, VoxelMaterial::Stone));
        assert_eq!(oversized, Err(GenerationError::ChunkSizeOutOfRange { size: 17, max: 16 }));

        // Empty fields are rejected too, even though they have no faces
        assert!(ChunkEntry::from_field(&VoxelField::new(17)).is_err());
        assert!(ChunkEntry::from_field(&VoxelField::filled(16, VoxelMaterial::Stone)).is_ok());
    }

    #[test]
    fn test_hit_returns_same_entry() {
        let mut cache = ChunkCache::new(RetainAll);
        let coord = ChunkCoord::new(1, 2, 3);

        let first = cache.get_or_insert_with(coord, stone_entry);
        let second = cache.get_or_insert_with(coord, || panic!("rebuilt on hit"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                evictions: 0,
                resident: 1
            }
        );
        assert!((cache.stats().hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_retain_all_never_evicts() {
        let mut cache = ChunkCache::new(RetainAll);
        for coord in ChunkCoord::default().cube_around(2) {
            let _ = cache.get_or_insert_with(coord, stone_entry);
        }
        assert_eq!(cache.len(), 125);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_lru_evicts_oldest() {
        let mut cache = ChunkCache::new(LruPolicy::new(2));
        let a = ChunkCoord::new(0, 0, 0);
        let b = ChunkCoord::new(1, 0, 0);
        let c = ChunkCoord::new(2, 0, 0);

        let _ = cache.get_or_insert_with(a, stone_entry);
        let _ = cache.get_or_insert_with(b, stone_entry);
        // Refresh a so b is the oldest
        let _ = cache.get_or_insert_with(a, stone_entry);
        let _ = cache.get_or_insert_with(c, stone_entry);

        assert!(cache.contains(a));
        assert!(!cache.contains(b));
        assert!(cache.contains(c));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_distance_policy_follows_center() {
        let mut cache = ChunkCache::new(DistancePolicy::new(ChunkCoord::default(), 1));
        for coord in ChunkCoord::default().cube_around(1) {
            let _ = cache.get_or_insert_with(coord, stone_entry);
        }
        assert_eq!(cache.len(), 27);

        cache.update_policy(|policy| policy.set_center(ChunkCoord::new(2, 0, 0)));
        // Only the x = 1 slab is within one chunk of (2, 0, 0)
        assert_eq!(cache.len(), 9);
        assert!(cache.coords().all(|coord| coord.x == 1));
        assert_eq!(cache.stats().evictions, 18);
    }

    #[test]
    fn test_unload_then_regenerate() {
        let mut cache = ChunkCache::new(LruPolicy::new(4));
        let coord = ChunkCoord::new(5, -1, 2);

        let first = cache.get_or_insert_with(coord, stone_entry);
        assert!(cache.unload(coord).is_some());
        assert!(cache.unload(coord).is_none());
        assert!(cache.peek(coord).is_none());

        let again = cache.get_or_insert_with(coord, stone_entry);
        assert_eq!(*first, *again);
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.stats().evictions, 0);
    }
}
