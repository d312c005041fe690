use bf_core::hashers::{Blake3Hash, Crc64, Fnv1a};
use bf_core::{xxh3_set, BoxedHashFn, Filter};
use proptest::prelude::*;
use rand::RngCore;
use std::sync::Arc;

fn random_items(n: usize, len: usize) -> Vec<Vec<u8>> {
    let mut rng = rand::rng();
    (0..n)
        .map(|_| {
            let mut v = vec![0u8; len];
            rng.fill_bytes(&mut v);
            v
        })
        .collect()
}

#[test]
fn positives_and_bounded_negatives() {
    let bl = Filter::new_default(100_000);
    let poss = random_items(500, 64);
    let negs = random_items(500, 64);
    for pos in &poss {
        bl.insert(pos);
    }
    for pos in &poss {
        assert!(bl.search(pos), "inserted item tested negative");
    }
    let false_pos = negs.iter().filter(|n| bl.search(n)).count();
    assert!(false_pos <= 50, "{false_pos} of 500 negatives tested positive");
}

#[test]
fn binary_roundtrip_after_random_inserts() {
    let bl = Filter::new_default(10_000);
    for item in random_items(500, 64) {
        bl.insert(&item);
    }
    let before = bl.to_string();
    let data = bl.marshal_binary();
    assert_eq!(data.len(), 10_000 / 8);

    let fresh = Filter::new_default(0);
    fresh.unmarshal_binary(&data);
    assert_eq!(fresh.to_string(), before);

    bl.unmarshal_binary(&data);
    assert_eq!(bl.to_string(), before);
}

#[test]
fn custom_hasher_sets() {
    let sets: Vec<Vec<BoxedHashFn>> = vec![
        xxh3_set(7),
        vec![Box::new(Blake3Hash) as BoxedHashFn],
        vec![Box::new(Fnv1a::default()) as BoxedHashFn, Box::new(Crc64::iso()), Box::new(Blake3Hash)],
    ];
    for hashers in sets {
        let k = hashers.len();
        let bl = Filter::new_custom(4096, hashers);
        assert_eq!(bl.hasher_count(), k);
        let items = random_items(100, 16);
        for it in &items {
            bl.insert(it);
        }
        assert!(items.iter().all(|it| bl.search(it)));
        assert!(bl.stats().bits_set <= 100 * k);
    }
}

#[test]
fn concurrent_insert_and_search() {
    let bl = Arc::new(Filter::new_default(1 << 16));
    let per_thread: Vec<Vec<Vec<u8>>> = (0..8).map(|_| random_items(200, 32)).collect();

    std::thread::scope(|s| {
        for items in &per_thread {
            let bl = Arc::clone(&bl);
            s.spawn(move || {
                for it in items {
                    bl.insert(it);
                    assert!(bl.search(it));
                }
            });
        }
        let bl = Arc::clone(&bl);
        s.spawn(move || {
            for _ in 0..200 {
                let _ = bl.marshal_binary();
                let _ = bl.to_string();
            }
        });
    });

    // Same items inserted serially must yield the same bits.
    let serial = Filter::new_default(1 << 16);
    for items in &per_thread {
        for it in items {
            serial.insert(it);
        }
    }
    assert_eq!(bl.marshal_binary(), serial.marshal_binary());
    assert!(per_thread.iter().flatten().all(|it| bl.search(it)));
}

proptest! {
    #[test]
    fn no_false_negatives(
        items in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..48), 1..40),
        size in 8usize..2048,
        xxh in any::<bool>(),
    ) {
        let bl = if xxh { Filter::new_custom(size, xxh3_set(5)) } else { Filter::new_default(size) };
        prop_assert_eq!(bl.len() % 8, 0);
        prop_assert!(bl.len() >= size && bl.len() < size + 8);
        for it in &items {
            bl.insert(it);
        }
        for it in &items {
            prop_assert!(bl.search(it));
        }
    }

    #[test]
    fn unmarshal_reproduces_any_bytes(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let bl = Filter::new_default(8);
        bl.unmarshal_binary(&data);
        prop_assert_eq!(bl.len(), data.len() * 8);
        prop_assert_eq!(bl.marshal_binary(), data);
    }
}
