use rand::{Rng, SeedableRng, XorShiftRng};
use splay_collections::{Error, SplayMap};
use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 100_000;

#[test]
fn int_test_splay_map() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = SplayMap::new();
    let mut expected = BTreeMap::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 1_000u32);
        let val = rng.gen::<u32>();

        match rng.gen_range(0, 6) {
            0 => {
                assert_eq!(map.insert(key, val), expected.insert(key, val));
                assert_eq!(map.root_key(), Some(&key));
            },
            1 => {
                let result = map.add(key, val);
                if expected.contains_key(&key) {
                    assert_eq!(result, Err(Error::DuplicateKey));
                } else {
                    assert_eq!(result, Ok(()));
                    expected.insert(key, val);
                }
                assert_eq!(map.root_key(), Some(&key));
            },
            2 => match expected.get(&key) {
                Some(value) => {
                    assert_eq!(map.get(&key), Ok(value));
                    assert_eq!(map.root_key(), Some(&key));
                },
                None => assert_eq!(map.get(&key), Err(Error::KeyNotFound)),
            },
            3 => {
                assert_eq!(
                    map.remove(&key),
                    expected.remove(&key).map(|value| (key, value)),
                );
                assert!(!map.contains_key(&key));
            },
            4 => assert_eq!(map.peek(&key), expected.get(&key)),
            _ => {
                if let Some(value) = map.get_mut(&key) {
                    *value = val;
                    expected.insert(key, val);
                }
            },
        }
        assert_eq!(map.len(), expected.len());
    }

    assert_eq!(
        map.iter().collect::<Vec<(&u32, &u32)>>(),
        expected.iter().collect::<Vec<(&u32, &u32)>>(),
    );
    assert_eq!(map.min(), expected.keys().next());
    assert_eq!(map.max(), expected.keys().next_back());
}

#[test]
fn int_test_count_matches_contains_key() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([2, 2, 2, 2]);
    let mut map = SplayMap::new();

    for _ in 0..10 {
        let mut keys = Vec::new();
        for _ in 0..100 {
            let key = rng.gen::<u32>();
            if !map.contains_key(&key) {
                keys.push(key);
            }
            map.insert(key, rng.gen::<u32>());
            map.insert(key, rng.gen::<u32>());
            assert_eq!(map.len(), keys.len());
        }
        assert_eq!(keys.iter().filter(|key| map.contains_key(*key)).count(), map.len());

        for key in &keys {
            assert!(map.remove(key).is_some());
            assert!(map.remove(key).is_none());
        }
        assert!(map.is_empty());
        assert_eq!(map.root_key(), None);
    }
}

#[test]
fn int_test_sequential_access() {
    // Ascending inserts degrade the tree into a spine; accessing the keys again must still work
    // without recursion.
    let mut map = SplayMap::with_capacity(NUM_OF_OPERATIONS);
    for key in 0..NUM_OF_OPERATIONS {
        map.insert(key, key);
    }
    for key in 0..NUM_OF_OPERATIONS {
        assert_eq!(map.get(&key), Ok(&key));
    }
    assert_eq!(map.iter().count(), NUM_OF_OPERATIONS);

    let mut buffer = vec![(0, 0); NUM_OF_OPERATIONS];
    assert_eq!(map.copy_to(&mut buffer, 0), Ok(()));
    assert!(buffer.iter().enumerate().all(|(index, pair)| *pair == (index, index)));

    for key in (0..NUM_OF_OPERATIONS).rev() {
        assert_eq!(map.remove(&key), Some((key, key)));
    }
    assert!(map.is_empty());
}

#[test]
fn int_test_word_map() {
    let words = ["splay", "tree", "zig", "zag", "rotate", "root", "node", "key", "value"];
    let mut map = SplayMap::new();
    for (index, word) in words.iter().enumerate() {
        map.add(word.to_string(), index).unwrap();
    }

    for (index, word) in words.iter().enumerate() {
        assert!(map.contains(*word, &index));
        assert!(!map.contains(*word, &(index + 1)));
        assert_eq!(map.add(word.to_string(), 0), Err(Error::DuplicateKey));
        assert_eq!(map.peek(*word), Some(&index));
    }

    let mut sorted = words.to_vec();
    sorted.sort();
    assert_eq!(map.keys(), sorted.iter().collect::<Vec<_>>());

    assert_eq!(map.remove_entry_if_eq("zig", &0), None);
    assert_eq!(map.remove_entry_if_eq("zig", &2), Some((String::from("zig"), 2)));
    assert_eq!(map.len(), words.len() - 1);
}
