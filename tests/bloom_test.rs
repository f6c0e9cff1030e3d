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

use bloomfilter::BloomFilter;
use googletest::assert_that;
use googletest::prelude::le;
use googletest::prelude::near;

const JABBERWOCKY: &str = "`Twas brillig, and the slithy toves\n  Did gyre and gimble in the wabe:\nAll mimsy were the borogoves,\n  And the mome raths outgrabe.\n\n\"Beware the Jabberwock, my son!\n  The jaws that bite, the claws that catch!\nBeware the Jubjub bird, and shun\n  The frumious Bandersnatch!\"\n\nHe took his vorpal sword in hand:\n  Long time the manxome foe he sought --\nSo rested he by the Tumtum tree,\n  And stood awhile in thought.\n\nAnd, as in uffish thought he stood,\n  The Jabberwock, with eyes of flame,\nCame whiffling through the tulgey wood,\n  And burbled as it came!\n\nOne, two! One, two! And through and through\n  The vorpal blade went snicker-snack!\nHe left it dead, and with its head\n  He went galumphing back.\n\n\"And, has thou slain the Jabberwock?\n  Come to my arms, my beamish boy!\nO frabjous day! Callooh! Callay!'\n  He chortled in his joy.\n\n`Twas brillig, and the slithy toves\n  Did gyre and gimble in the wabe;\nAll mimsy were the borogoves,\n  And the mome raths outgrabe.";

#[test]
fn test_basic_insert_and_contains() {
    let mut filter = BloomFilter::new(1000, 4);
    filter.insert(b"Bess");

    assert!(filter.contains(b"Bess"));
    assert!(!filter.contains(b"Jane"));
}

#[test]
fn test_never_inserted_items_are_absent() {
    let mut filter = BloomFilter::new(1000, 4);
    filter.insert(b"abc");

    assert!(!filter.contains(b"wtf"));
    assert!(!filter.contains(b"ghi"));
}

#[test]
fn test_distinguishes_long_similar_inputs() {
    let mut filter = BloomFilter::new(1000, 4);
    let with_newline = format!("{JABBERWOCKY}\n");

    filter.insert(JABBERWOCKY.as_bytes());

    assert!(filter.contains(JABBERWOCKY.as_bytes()));
    assert!(!filter.contains(with_newline.as_bytes()));
}

#[test]
fn test_multibyte_utf8_items() {
    let mut filter = BloomFilter::new(1000, 4);
    filter.insert("\u{100}".as_bytes());

    assert!(filter.contains("\u{100}".as_bytes()));
    assert!(!filter.contains("\u{101}".as_bytes()));
    assert!(!filter.contains("\u{103}".as_bytes()));
}

#[test]
fn test_integer_items() {
    let mut filter = BloomFilter::new(1000, 4);
    filter.insert_i32(1);

    assert!(filter.contains_i32(1));
    assert!(!filter.contains_i32(2));
}

#[test]
fn test_no_false_negatives_bulk() {
    let (num_bits, num_hashes) = BloomFilter::estimate_parameters(1000, 0.01).unwrap();
    let mut filter = BloomFilter::new(num_bits, num_hashes);

    let items: Vec<u64> = (0..1000).map(|_| rand::random_range(0..u64::MAX)).collect();
    for item in &items {
        filter.insert(&item.to_be_bytes());
    }

    for item in &items {
        assert!(
            filter.contains(&item.to_be_bytes()),
            "false negative for {item}"
        );
    }
}

#[test]
fn test_identical_insertions_yield_identical_filters() {
    let mut left = BloomFilter::new(2048, 5);
    let mut right = BloomFilter::new(2048, 5);

    for i in 0..500u32 {
        let item = format!("item_{i}");
        left.insert(item.as_bytes());
        right.insert(item.as_bytes());
    }

    assert_eq!(left, right);
    assert_eq!(left.as_words(), right.as_words());
}

#[test]
fn test_union_recognizes_both_operands() {
    let mut left = BloomFilter::new(1000, 4);
    let mut right = BloomFilter::new(1000, 4);

    left.insert(b"left_a");
    left.insert(b"left_b");
    right.insert(b"right_a");
    right.insert(b"right_b");

    left.union(&right);

    assert!(left.contains(b"left_a"));
    assert!(left.contains(b"left_b"));
    assert!(left.contains(b"right_a"));
    assert!(left.contains(b"right_b"));
}

#[test]
fn test_observed_false_positive_rate_is_bounded() {
    let target_fpp = 0.01;
    let (num_bits, num_hashes) = BloomFilter::estimate_parameters(1000, target_fpp).unwrap();
    let mut filter = BloomFilter::new(num_bits, num_hashes);

    for i in 0..1000 {
        filter.insert(format!("inserted_{i}").as_bytes());
    }

    let probes = 100_000;
    let mut false_positives = 0;
    for i in 0..probes {
        if filter.contains(format!("not_inserted_{i}").as_bytes()) {
            false_positives += 1;
        }
    }

    // Statistical tolerance: the estimator sizes for the target on average.
    let observed = f64::from(false_positives) / f64::from(probes);
    assert_that!(observed, le(target_fpp * 1.5));
}

#[test]
fn test_estimated_fpp_tracks_theory() {
    let (num_bits, num_hashes) = BloomFilter::estimate_parameters(1000, 0.01).unwrap();
    let mut filter = BloomFilter::new(num_bits, num_hashes);

    for i in 0..1000 {
        filter.insert(format!("item_{i}").as_bytes());
    }

    // (1 - e^(-kn/m))^k for m=9600, k=7, n=1000.
    let m = f64::from(num_bits);
    let k = f64::from(num_hashes);
    let expected = (1.0 - (-k * 1000.0 / m).exp()).powf(k);
    assert_that!(filter.estimated_fpp(), near(expected, 0.005));
}
