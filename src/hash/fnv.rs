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

/// The standard 32-bit FNV-1a offset basis.
const OFFSET_BASIS: u32 = 2166136261;

/// Seeded 32-bit Fowler/Noll/Vo 1a hash with a final avalanche mix.
///
/// Nonstandard variation: the seed is XORed into the offset basis, producing
/// a family of independent hashes from one function. The trailing mix forces
/// the low-order bits to avalanche, which matters because the filter reduces
/// the digest modulo small bit capacities.
///
/// Every step must match the companion implementations bit for bit; the
/// digest feeds directly into the shared wire format.
pub(crate) fn fnv1a(bytes: &[u8], seed: u32) -> u32 {
    let mut a = OFFSET_BASIS ^ seed;
    for &byte in bytes {
        a = fnv_multiply(a ^ u32::from(byte));
    }
    fnv_mix(a)
}

/// `a * 16777619 mod 2^32`, the FNV prime multiply realized as shifts and
/// adds.
#[inline]
fn fnv_multiply(a: u32) -> u32 {
    a.wrapping_add(a << 1)
        .wrapping_add(a << 4)
        .wrapping_add(a << 7)
        .wrapping_add(a << 8)
        .wrapping_add(a << 24)
}

/// Finalization mix: force all bits of the accumulator to avalanche.
#[inline]
fn fnv_mix(mut a: u32) -> u32 {
    a = a.wrapping_add(a << 13);
    a ^= a >> 7;
    a = a.wrapping_add(a << 3);
    a ^= a >> 17;
    a.wrapping_add(a << 5)
}
