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

//! # Wire-compatible Bloom filter
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to
//! test whether an element is a member of a set. A query returns either
//! "possibly in set" or "definitely not in set": false positives occur at a
//! tunable rate, false negatives never.
//!
//! This crate is not just "a Bloom filter" in the loose sense. The two-hash
//! double-hashing scheme over seeded 32-bit FNV-1a and the serialized byte
//! layout reproduce, bit for bit, the scheme shared by companion
//! implementations in other ecosystems. Filters serialized by any of them can
//! be deserialized and queried here, and vice versa.
//!
//! # Wire format
//!
//! [`BloomFilter::to_bytes`] emits each 32-bit bucket word as 4 big-endian
//! bytes, in word order, and nothing else: **no header, no length prefix, no
//! checksum**. In particular the bit capacity `m` and the hash count `k` are
//! *not* part of the encoding and must be communicated out-of-band. Decoding
//! the same bytes with a different `k` silently produces a filter that
//! answers differently. This is a deliberate minimalism that keeps stored
//! filters compact, and a common integration pitfall.
//!
//! # Usage
//!
//! ```rust
//! use bloomfilter::BloomFilter;
//!
//! // Size the filter for 10,000 items at a 1% false-positive rate.
//! let (num_bits, num_hashes) = BloomFilter::estimate_parameters(10_000, 0.01)?;
//! let mut filter = BloomFilter::new(num_bits, num_hashes);
//!
//! filter.insert(b"apple");
//! filter.insert(b"banana");
//!
//! assert!(filter.contains(b"apple")); // definitely inserted
//! assert!(!filter.contains(b"grape")); // never inserted (probably)
//!
//! // Ship the bits; m and k travel out-of-band.
//! let bytes = filter.to_bytes();
//! let restored = BloomFilter::from_bytes(&bytes, num_hashes)?;
//! assert!(restored.contains(b"apple"));
//! # Ok::<(), bloomfilter::error::Error>(())
//! ```
//!
//! # Concurrency
//!
//! Every operation is synchronous and CPU-bound. Queries borrow the filter
//! shared and may run concurrently; insertion takes `&mut self`, so the
//! borrow checker enforces the external synchronization that concurrent
//! writers would need.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod error;

mod filter;
mod hash;

pub use self::filter::BloomFilter;
pub use self::filter::MAX_NUM_BITS;
