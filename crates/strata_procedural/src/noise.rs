//! # Noise Composer
//!
//! Deterministic, seed-derived, band-limited 2D scalar fields.
//!
//! ## The Capability Seam
//!
//! Generation only ever talks to [`NoiseField`]: given two real coordinates
//! and an octave count, return a value in `[0, 1]`. [`OctavedNoise`] is the
//! stock implementation; tests and tools inject closures instead.
//!
//! ## Determinism Guarantee
//!
//! Given the same [`WorldSeed`], every channel produces exactly the same
//! values on any platform, any time. No global state, no randomness
//! source other than the seed.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::config::{NoiseChannelSettings, WorldConfig};

/// World seed for deterministic generation.
///
/// All procedural generation derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose.
    ///
    /// Different purposes give statistically independent streams.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0 ^ purpose.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        hash = hash.wrapping_mul(0x517C_C1B7_2722_0A95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Sub-seed of one noise channel.
    #[inline]
    #[must_use]
    pub const fn channel(self, channel: NoiseChannel) -> Self {
        self.derive(channel.purpose())
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        // Fits in an i64 so it survives a TOML round trip.
        Self(0x0DEA_DBEE_FCAF_EBAB)
    }
}

/// The independently seeded noise channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoiseChannel {
    /// Terrain height.
    Height,
    /// Moisture (biome selection).
    Moisture,
    /// Per-chunk roughness.
    Wackiness,
}

impl NoiseChannel {
    /// Purpose id fed to [`WorldSeed::derive`]. Part of the world format.
    #[inline]
    #[must_use]
    pub const fn purpose(self) -> u64 {
        match self {
            Self::Height => 1,
            Self::Moisture => 2,
            Self::Wackiness => 3,
        }
    }

    /// Lower-case channel name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Height => "height",
            Self::Moisture => "moisture",
            Self::Wackiness => "wackiness",
        }
    }
}

/// A deterministic 2D scalar field with values in `[0, 1]`.
pub trait NoiseField {
    /// Evaluates the field at `(x, y)` summing `octaves` layers.
    fn eval(&self, x: f64, y: f64, octaves: u32) -> f64;
}

impl<F> NoiseField for F
where
    F: Fn(f64, f64, u32) -> f64,
{
    #[inline]
    fn eval(&self, x: f64, y: f64, octaves: u32) -> f64 {
        self(x, y, octaves)
    }
}

// =============================================================================
// SIMPLEX PRIMITIVE
// =============================================================================

/// Unit gradients, eight evenly spaced directions.
const GRADIENTS: [[f64; 2]; 8] = [
    [1.0, 0.0],
    [core::f64::consts::FRAC_1_SQRT_2, core::f64::consts::FRAC_1_SQRT_2],
    [0.0, 1.0],
    [-core::f64::consts::FRAC_1_SQRT_2, core::f64::consts::FRAC_1_SQRT_2],
    [-1.0, 0.0],
    [-core::f64::consts::FRAC_1_SQRT_2, -core::f64::consts::FRAC_1_SQRT_2],
    [0.0, -1.0],
    [core::f64::consts::FRAC_1_SQRT_2, -core::f64::consts::FRAC_1_SQRT_2],
];

/// Seeded 2D simplex noise, raw output in `[-1, 1]`.
pub struct SimplexNoise {
    /// 256-entry permutation, doubled so lookups never wrap.
    perm: [u8; 512],
}

impl SimplexNoise {
    /// Skewing factor: (sqrt(3) - 1) / 2.
    const F2: f64 = 0.366_025_403_784_438_6;
    /// Unskewing factor: (3 - sqrt(3)) / 6.
    const G2: f64 = 0.211_324_865_405_187_1;
    /// Scales the corner sum to roughly [-1, 1].
    const SCALE: f64 = 70.0;

    /// Builds the permutation table from a seed.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }

        // Fisher-Yates driven by splitmix64; never degenerates on seed 0.
        let mut state = seed.value();
        for i in (1..256usize).rev() {
            state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^= z >> 31;
            table.swap(i, (z % (i as u64 + 1)) as usize);
        }

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&table);
        perm[256..].copy_from_slice(&table);
        Self { perm }
    }

    #[inline]
    fn hash(&self, i: usize, j: usize) -> usize {
        self.perm[i + self.perm[j] as usize] as usize
    }

    #[inline]
    fn corner(x: f64, y: f64, hash: usize) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t <= 0.0 {
            return 0.0;
        }
        let [gx, gy] = GRADIENTS[hash & 7];
        let t2 = t * t;
        t2 * t2 * (gx * x + gy * y)
    }

    /// Samples raw noise in `[-1, 1]`.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let skew = (x + y) * Self::F2;
        let i = (x + skew).floor();
        let j = (y + skew).floor();

        let unskew = (i + j) * Self::G2;
        let x0 = x - (i - unskew);
        let y0 = y - (j - unskew);

        // Lower or upper triangle of the skewed cell
        let (i1, j1) = if x0 > y0 { (1usize, 0usize) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + Self::G2;
        let y1 = y0 - j1 as f64 + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;

        let n0 = Self::corner(x0, y0, self.hash(ii, jj));
        let n1 = Self::corner(x1, y1, self.hash(ii + i1, jj + j1));
        let n2 = Self::corner(x2, y2, self.hash(ii + 1, jj + 1));

        (Self::SCALE * (n0 + n1 + n2)).clamp(-1.0, 1.0)
    }

    /// Samples noise remapped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn sample_unit(&self, x: f64, y: f64) -> f64 {
        (self.sample(x, y) + 1.0) * 0.5
    }
}

// =============================================================================
// OCTAVED CHANNEL
// =============================================================================

/// Normalized fractal noise for one channel.
///
/// Octave `o` samples at frequency `2^o / wavelength` with amplitude
/// `amplitude / 2^o`; the sum is divided by the total amplitude so the
/// result stays in `[0, 1]` for every octave count.
pub struct OctavedNoise {
    simplex: SimplexNoise,
    amplitude: f64,
    wavelength: f64,
}

impl OctavedNoise {
    /// Creates a channel from a seed and its settings.
    #[must_use]
    pub fn new(seed: WorldSeed, settings: NoiseChannelSettings) -> Self {
        Self {
            simplex: SimplexNoise::new(seed),
            amplitude: settings.amplitude,
            wavelength: settings.wavelength,
        }
    }
}

impl NoiseField for OctavedNoise {
    fn eval(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let mut frequency = 1.0;
        let mut total = 0.0;
        let mut amplitude_sum = 0.0;

        for _ in 0..octaves.max(1) {
            let amplitude = self.amplitude / frequency;
            amplitude_sum += amplitude;
            total += amplitude
                * self
                    .simplex
                    .sample_unit(frequency * x / self.wavelength, frequency * y / self.wavelength);
            frequency *= 2.0;
        }

        total / amplitude_sum
    }
}

// =============================================================================
// EVALUATION MEMO
// =============================================================================

/// Bounded evaluation memo around any [`NoiseField`].
///
/// Keyed by the exact input bits and octave count, so results are
/// indistinguishable from the wrapped field. When the memo reaches capacity
/// it is cleared wholesale.
pub struct MemoizedNoise<N> {
    inner: N,
    memo: Mutex<HashMap<(u64, u64, u32), f64>>,
    capacity: usize,
}

impl<N: NoiseField> MemoizedNoise<N> {
    /// Wraps a field with a memo of at most `capacity` entries.
    #[must_use]
    pub fn new(inner: N, capacity: usize) -> Self {
        Self {
            inner,
            memo: Mutex::new(HashMap::with_capacity(capacity.min(4096))),
            capacity: capacity.max(1),
        }
    }

    /// Number of memoized evaluations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.memo.lock().len()
    }

    /// Returns true if nothing is memoized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memo.lock().is_empty()
    }
}

impl<N: NoiseField> NoiseField for MemoizedNoise<N> {
    fn eval(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let key = (x.to_bits(), y.to_bits(), octaves);
        if let Some(&value) = self.memo.lock().get(&key) {
            return value;
        }

        // Evaluate outside the lock; a racing thread computes the same value.
        let value = self.inner.eval(x, y, octaves);

        let mut memo = self.memo.lock();
        if memo.len() >= self.capacity {
            memo.clear();
        }
        memo.insert(key, value);
        value
    }
}

// =============================================================================
// CHANNEL SET
// =============================================================================

/// The three seed-derived channels a generator consumes.
pub struct NoiseSet<N> {
    /// Terrain height.
    pub height: N,
    /// Moisture.
    pub moisture: N,
    /// Per-chunk roughness.
    pub wackiness: N,
}

impl NoiseSet<OctavedNoise> {
    /// Seeds every channel from a world configuration.
    #[must_use]
    pub fn from_config(config: &WorldConfig) -> Self {
        let seed = config.world_seed();
        Self {
            height: OctavedNoise::new(seed.channel(NoiseChannel::Height), config.noise.height),
            moisture: OctavedNoise::new(seed.channel(NoiseChannel::Moisture), config.noise.moisture),
            wackiness: OctavedNoise::new(
                seed.channel(NoiseChannel::Wackiness),
                config.noise.wackiness,
            ),
        }
    }
}

impl<N: NoiseField> NoiseSet<N> {
    /// Wraps every channel in a bounded memo.
    #[must_use]
    pub fn memoized(self, capacity: usize) -> NoiseSet<MemoizedNoise<N>> {
        NoiseSet {
            height: MemoizedNoise::new(self.height, capacity),
            moisture: MemoizedNoise::new(self.moisture, capacity),
            wackiness: MemoizedNoise::new(self.wackiness, capacity),
        }
    }
}
