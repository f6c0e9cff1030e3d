// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::f64::consts::LN_2;

use byteorder::ByteOrder;
use byteorder::BE;

use crate::error::Error;
use crate::hash::fnv1a;
use crate::hash::BASE_SEED;
use crate::hash::STEP_SEED;

/// Number of bits per bucket word.
const WORD_BITS: u32 = 32;

/// The largest supported bit capacity: the greatest multiple of 32
/// representable in a `u32`.
pub const MAX_NUM_BITS: u32 = u32::MAX - (WORD_BITS - 1);

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides fast membership queries with:
/// - No false negatives (inserted items always return `true`)
/// - Tunable false positive rate
/// - Constant space usage
///
/// Bit positions are derived by double hashing over two seeded 32-bit
/// FNV-1a digests, and the serialized form is a plain sequence of big-endian
/// 32-bit words, both bit-compatible with the companion implementations of
/// this scheme in other ecosystems. See the crate-level documentation for
/// the wire-format contract, in particular that `m` and `k` travel
/// out-of-band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    /// Total number of bits (m). Always exactly `32 * buckets.len()`.
    num_bits: u32,
    /// Number of bit positions derived per item (k)
    num_hashes: u32,
    /// Bit array packed into 32-bit words; bit `b` lives in word `b / 32`
    /// at offset `b % 32`, LSB first.
    buckets: Vec<u32>,
}

impl BloomFilter {
    /// Creates a filter with the requested bit capacity, rounded up to the
    /// next multiple of 32, and the given number of hash functions.
    ///
    /// `num_bits` is clamped to [`MAX_NUM_BITS`]. A requested capacity of 0
    /// yields a zero-word filter and a `num_hashes` of 0 a filter that
    /// derives no positions. Both are inert rather than an error:
    /// [`insert()`](Self::insert) does nothing and
    /// [`contains()`](Self::contains) answers `false` for every item.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::BloomFilter;
    /// let filter = BloomFilter::new(1000, 4);
    /// assert_eq!(filter.capacity(), 1024);
    /// assert_eq!(filter.num_hashes(), 4);
    /// assert!(filter.is_empty());
    /// ```
    pub fn new(num_bits: u32, num_hashes: u32) -> Self {
        let num_words = num_bits.min(MAX_NUM_BITS).div_ceil(WORD_BITS);
        BloomFilter {
            num_bits: num_words * WORD_BITS,
            num_hashes,
            buckets: vec![0; num_words as usize],
        }
    }

    /// Creates a filter that takes ownership of an existing bucket-word
    /// vector, typically one obtained from [`as_words()`](Self::as_words) on
    /// another instance or from a companion implementation.
    ///
    /// The capacity is exactly `32 * words.len()`; no rounding is needed.
    ///
    /// # Panics
    ///
    /// Panics if `32 * words.len()` exceeds [`MAX_NUM_BITS`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::BloomFilter;
    /// let filter = BloomFilter::from_words(vec![0; 4], 3);
    /// assert_eq!(filter.capacity(), 128);
    /// ```
    pub fn from_words(words: Vec<u32>, num_hashes: u32) -> Self {
        assert!(
            words.len() <= (MAX_NUM_BITS / WORD_BITS) as usize,
            "word count must not exceed {}",
            MAX_NUM_BITS / WORD_BITS
        );

        BloomFilter {
            num_bits: words.len() as u32 * WORD_BITS,
            num_hashes,
            buckets: words,
        }
    }

    /// Decodes a filter from the canonical byte layout: each 4 bytes form
    /// one big-endian bucket word, in sequence order. Inverse of
    /// [`to_bytes()`](Self::to_bytes).
    ///
    /// `num_hashes` must be the `k` the filter was built with; the byte
    /// layout does not carry it.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidEncoding`](crate::error::ErrorKind) if
    /// the length is not a multiple of 4. Some implementations of this
    /// scheme silently drop the trailing partial word instead; this crate
    /// rejects such input, since a torn word is far more likely a truncated
    /// transfer than an intentional encoding.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::BloomFilter;
    /// let filter = BloomFilter::from_bytes(&[0; 8], 4)?;
    /// assert_eq!(filter.capacity(), 64);
    ///
    /// assert!(BloomFilter::from_bytes(&[0; 5], 4).is_err());
    /// # Ok::<(), bloomfilter::error::Error>(())
    /// ```
    pub fn from_bytes(bytes: &[u8], num_hashes: u32) -> Result<Self, Error> {
        if bytes.len() % 4 != 0 {
            return Err(
                Error::invalid_encoding("byte length is not a multiple of the 4-byte word size")
                    .with_context("length", bytes.len()),
            );
        }

        let mut words = vec![0u32; bytes.len() / 4];
        BE::read_u32_into(bytes, &mut words);
        Ok(Self::from_words(words, num_hashes))
    }

    /// Estimates the bit capacity and hash count for an expected item count
    /// and target false-positive probability.
    ///
    /// Formulas: `m = ceil(-n * ln(p) / ln(2)^2)`, then `k = ceil(ln(2) * m
    /// / n)` from the unrounded `m`, then `m` rounds up to the next multiple
    /// of 32. Pure function; feed the result into [`new()`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameters`](crate::error::ErrorKind) if
    /// `expected_items` is 0 or `fpp` is not inside the open interval
    /// (0, 1).
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::BloomFilter;
    /// let (num_bits, num_hashes) = BloomFilter::estimate_parameters(10_000, 1e-6)?;
    /// assert_eq!(num_bits, 287_552);
    /// assert_eq!(num_hashes, 20);
    /// # Ok::<(), bloomfilter::error::Error>(())
    /// ```
    pub fn estimate_parameters(expected_items: u64, fpp: f64) -> Result<(u32, u32), Error> {
        if expected_items == 0 {
            return Err(Error::invalid_parameters(
                "expected_items must be greater than 0",
            ));
        }
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(
                Error::invalid_parameters("fpp must be inside the open interval (0, 1)")
                    .with_context("fpp", fpp),
            );
        }

        let n = expected_items as f64;
        let num_bits = (-n * fpp.ln() / (LN_2 * LN_2)).ceil();
        // k comes from the unrounded bit count; the word alignment below
        // must not feed back into it.
        let num_hashes = (LN_2 * num_bits / n).ceil() as u32;

        let num_bits = (num_bits as u64).min(u64::from(MAX_NUM_BITS)) as u32;
        Ok((num_bits.div_ceil(WORD_BITS) * WORD_BITS, num_hashes))
    }

    /// Inserts an item into the filter.
    ///
    /// After insertion, `contains(item)` will always return `true`.
    /// Idempotent: re-inserting an item sets no new bits.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::BloomFilter;
    /// let mut filter = BloomFilter::new(1000, 4);
    /// filter.insert(b"Bess");
    /// assert!(filter.contains(b"Bess"));
    /// ```
    pub fn insert(&mut self, item: &[u8]) {
        if self.buckets.is_empty() || self.num_hashes == 0 {
            return;
        }

        let (base, step) = self.compute_hash(item);
        self.set_bits(base, step);
    }

    /// Inserts a 32-bit integer, encoded as its 4 big-endian two's
    /// complement bytes.
    pub fn insert_i32(&mut self, item: i32) {
        self.insert(&item.to_be_bytes());
    }

    /// Tests whether an item is possibly in the set.
    ///
    /// Returns:
    /// - `true`: the item was **possibly** inserted (or is a false positive)
    /// - `false`: the item was **definitely not** inserted
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::BloomFilter;
    /// let mut filter = BloomFilter::new(1000, 4);
    /// filter.insert(b"Bess");
    ///
    /// assert!(filter.contains(b"Bess"));
    /// assert!(!filter.contains(b"Jane"));
    /// ```
    pub fn contains(&self, item: &[u8]) -> bool {
        if self.buckets.is_empty() || self.num_hashes == 0 {
            return false;
        }

        let (base, step) = self.compute_hash(item);
        self.check_bits(base, step)
    }

    /// Tests a 32-bit integer, encoded as its 4 big-endian two's complement
    /// bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::BloomFilter;
    /// let mut filter = BloomFilter::new(1000, 4);
    /// filter.insert_i32(1);
    ///
    /// assert!(filter.contains_i32(1));
    /// assert!(!filter.contains_i32(2));
    /// ```
    pub fn contains_i32(&self, item: i32) -> bool {
        self.contains(&item.to_be_bytes())
    }

    /// Merges another filter into this one via bitwise OR (union).
    ///
    /// After merging, this filter will recognize items inserted into either
    /// filter (plus any false positives from either).
    ///
    /// # Panics
    ///
    /// Panics if the filters are not compatible (different capacity or hash
    /// count). Use [`is_compatible()`](Self::is_compatible) to check first.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::BloomFilter;
    /// let mut f1 = BloomFilter::new(1000, 4);
    /// let mut f2 = BloomFilter::new(1000, 4);
    ///
    /// f1.insert(b"a");
    /// f2.insert(b"b");
    ///
    /// f1.union(&f2);
    /// assert!(f1.contains(b"a"));
    /// assert!(f1.contains(b"b"));
    /// ```
    pub fn union(&mut self, other: &BloomFilter) {
        assert!(
            self.is_compatible(other),
            "Cannot union incompatible Bloom filters"
        );

        for (word, other_word) in self.buckets.iter_mut().zip(&other.buckets) {
            *word |= *other_word;
        }
    }

    /// Checks if two filters are compatible for merging: same capacity and
    /// same number of hash functions.
    pub fn is_compatible(&self, other: &BloomFilter) -> bool {
        self.num_bits == other.num_bits && self.num_hashes == other.num_hashes
    }

    /// Returns whether no bits are set.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|&word| word == 0)
    }

    /// Returns the total number of bits in the filter (capacity).
    pub fn capacity(&self) -> u32 {
        self.num_bits
    }

    /// Returns the number of hash functions used.
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Returns the number of bits set to 1.
    ///
    /// Computed by a popcount over the bucket words; the wire format has no
    /// room for a cached count.
    pub fn bits_set(&self) -> u32 {
        self.buckets.iter().map(|word| word.count_ones()).sum()
    }

    /// Returns the current load factor (fraction of bits set).
    ///
    /// Values above 0.5 indicate degraded false positive rates.
    pub fn load_factor(&self) -> f64 {
        if self.num_bits == 0 {
            return 0.0;
        }
        f64::from(self.bits_set()) / f64::from(self.num_bits)
    }

    /// Estimates the current false positive probability as
    /// `load_factor ^ k`, assuming uniform bit distribution.
    pub fn estimated_fpp(&self) -> f64 {
        self.load_factor().powf(f64::from(self.num_hashes))
    }

    /// Serializes the filter to the canonical byte layout: each bucket word
    /// as 4 big-endian bytes, in order, nothing else.
    ///
    /// The result's length is always a multiple of 4. Record `m` and `k`
    /// out-of-band; the bytes alone cannot reconstruct them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::BloomFilter;
    /// let mut filter = BloomFilter::new(32, 21);
    /// filter.insert(b"abc");
    /// assert_eq!(filter.to_bytes(), [0x9e, 0x78, 0xf3, 0xcf]);
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.buckets.len() * 4];
        BE::write_u32_into(&self.buckets, &mut bytes);
        bytes
    }

    /// Returns a read-only view of the bucket words backing the filter.
    ///
    /// The slice borrows the filter's own storage; the shared borrow makes
    /// mutation through this view impossible.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::BloomFilter;
    /// let mut filter = BloomFilter::new(64, 21);
    /// filter.insert(b"abc");
    /// assert_eq!(filter.as_words(), [0x1e00f00f, 0x807803c0]);
    /// ```
    pub fn as_words(&self) -> &[u32] {
        &self.buckets
    }

    /// Computes the two base digests for an item: the position of the first
    /// bit and the stride between successive bits.
    fn compute_hash(&self, item: &[u8]) -> (u32, u32) {
        (fnv1a(item, BASE_SEED), fnv1a(item, STEP_SEED))
    }

    /// Checks whether all k derived bits are set.
    ///
    /// The stride addition wraps at 32 bits before the modulo, matching the
    /// unsigned overflow behavior the wire-compatible scheme is defined
    /// with.
    fn check_bits(&self, base: u32, step: u32) -> bool {
        let mut x = base % self.num_bits;
        for _ in 0..self.num_hashes {
            if !self.get_bit(x) {
                return false;
            }
            x = x.wrapping_add(step) % self.num_bits;
        }
        true
    }

    /// Sets all k derived bits.
    fn set_bits(&mut self, base: u32, step: u32) {
        let mut x = base % self.num_bits;
        for _ in 0..self.num_hashes {
            self.set_bit(x);
            x = x.wrapping_add(step) % self.num_bits;
        }
    }

    fn get_bit(&self, bit_index: u32) -> bool {
        let word = (bit_index / WORD_BITS) as usize;
        let mask = 1u32 << (bit_index % WORD_BITS);
        (self.buckets[word] & mask) != 0
    }

    fn set_bit(&mut self, bit_index: u32) {
        let word = (bit_index / WORD_BITS) as usize;
        let mask = 1u32 << (bit_index % WORD_BITS);
        self.buckets[word] |= mask;
    }
}
