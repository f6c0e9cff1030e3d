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

mod fnv;

pub(crate) use self::fnv::fnv1a;

/// Seed of the base hash `a`, from which the first bit position is derived.
///
/// A seed of zero leaves the FNV-1a offset basis untouched, so the base hash
/// is plain FNV-1a with a final avalanche mix.
pub(crate) const BASE_SEED: u32 = 0;

/// Seed of the step hash `b`, the stride added between successive bit
/// positions during double hashing.
///
/// The value is an arbitrary non-zero constant chosen by the original
/// implementation of this scheme. Per the FNV authors, almost any non-zero
/// offset basis serves equally well, so there is nothing special about this
/// one beyond history. What matters is that every implementation of the
/// shared wire format uses the same pair of seeds: a filter hashed with
/// different seeds maps items to different bit positions, which silently
/// breaks the 1:1 relationship between stored filters and the items they
/// were built from. Once filters are stored, the seeds are fixed forever.
pub(crate) const STEP_SEED: u32 = 1576284489;
