// ProbingTable property tests.
//
// Model: std HashMap<String, String> holding the live entries.
// Operations: put, remove, get, clear over a small key space so that
// collisions, tombstones, growth and compaction all happen often.
// Invariants after every step:
//  - number_of_values() == model.len()
//  - every model entry is readable, every other key is absent
//  - size() == values + deleted <= capacity()
//  - deleted never exceeds half of size()
use std::collections::HashMap;

use booktable::{ProbingTable, TableError, key, util};
use proptest::prelude::*;

fn book_code(n: u16) -> String {
    // the hashed suffix is the last two digits of the middle group plus the check digit
    format!("9-87-6543{:02}-{}", n / 10 % 100, n % 10)
}

proptest! {
    #[test]
    fn prop_matches_hashmap_model(
        capacity in 1usize..20,
        load_factor in 0.05f64..0.99,
        ops in proptest::collection::vec((0u8..=3u8, 0u16..300u16, 0u8..4u8), 1..200),
    ) {
        let mut t = ProbingTable::new(capacity, load_factor).unwrap();
        let mut model: HashMap<String, String> = HashMap::new();

        for (op, n, v) in ops {
            let k = book_code(n);
            let value = format!("v{v}");
            match op {
                0 => {
                    let old = t.put(&k, &value).unwrap();
                    prop_assert_eq!(old, model.insert(k.clone(), value));
                }
                1 => {
                    let res = t.remove(&k);
                    match model.remove(&k) {
                        Some(expected) => prop_assert_eq!(res, Ok(expected)),
                        None => prop_assert_eq!(res, Err(TableError::NoSuchKey { key: k.clone() })),
                    }
                }
                2 => {
                    prop_assert_eq!(t.contains_key(&k), Ok(model.contains_key(&k)));
                }
                3 => {
                    // clearing is rare enough to let the table fill up in between
                    if v == 0 && n % 10 == 0 {
                        t.clear();
                        model.clear();
                    }
                }
                _ => unreachable!(),
            }

            prop_assert_eq!(t.number_of_values(), model.len());
            prop_assert_eq!(t.size(), t.number_of_values() + t.number_of_deleted());
            prop_assert!(t.size() <= t.capacity());
            prop_assert!(t.number_of_deleted() * 2 <= t.size());
            prop_assert!(t.capacity() == capacity || util::is_prime(t.capacity()));
        }

        for (k, v) in &model {
            prop_assert_eq!(t.get_value(k), Ok(v.as_str()));
        }
        prop_assert_eq!(t.iter().count(), model.len());
    }

    #[test]
    fn prop_malformed_keys_never_mutate(junk in "[0-9a-z-]{0,16}") {
        prop_assume!(!key::is_valid(&junk));

        let mut t = ProbingTable::default();
        t.put("1-23-456789-3", "Dune").unwrap();

        let err = TableError::InvalidKey { key: junk.clone() };
        prop_assert_eq!(t.put(&junk, "x"), Err(err.clone()));
        prop_assert_eq!(t.remove(&junk), Err(err.clone()));
        prop_assert_eq!(t.contains_key(&junk), Err(err));
        prop_assert_eq!(t.size(), 1);
        prop_assert_eq!(t.get_value("1-23-456789-3"), Ok("Dune"));
    }

    #[test]
    fn prop_growth_capacity_is_prime_and_at_least_double(capacity in 1usize..50, extra in 1usize..40) {
        let mut t = ProbingTable::with_capacity(capacity).unwrap();
        let mut last = t.capacity();

        for n in 0..(capacity + extra) as u16 {
            t.put(&book_code(n), "x").unwrap();
            if t.capacity() != last {
                prop_assert!(t.capacity() >= last * 2);
                prop_assert!(util::is_prime(t.capacity()));
                last = t.capacity();
            }
        }
    }
}
