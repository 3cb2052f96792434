//! Sorting and merging of canonical forms.

use super::strategies::{phonetic_strategy, written_strategy};
use jiten::index::canonical::compare_key;
use jiten::util::kana::fold;
use jiten::{CanonicalForms, ExampleLink};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

const CAPACITY: usize = 3;

#[derive(Debug, Clone)]
enum Seed {
    Level(usize, u8),
    Link(usize, u32),
}

fn seeds_strategy() -> impl Strategy<Value = (Vec<(String, String)>, Vec<Seed>)> {
    prop::collection::vec((written_strategy(), phonetic_strategy()), 1..6).prop_flat_map(|pairs| {
        let n = pairs.len();
        let seed = prop_oneof![
            (0..n, 0u8..6).prop_map(|(i, level)| Seed::Level(i, level)),
            (0..n, any::<u32>()).prop_map(|(i, block)| Seed::Link(i, block)),
        ];
        (Just(pairs), prop::collection::vec(seed, 0..24))
    })
}

fn load(pairs: &[(String, String)], seeds: &[Seed]) -> (CanonicalForms, Vec<Option<usize>>) {
    let mut forms = CanonicalForms::new(CAPACITY, 4);
    let mut added = Vec::new();
    for seed in seeds {
        match *seed {
            Seed::Level(i, level) => {
                forms.add_proficiency_level(&pairs[i].0, &pairs[i].1, level, false);
            }
            Seed::Link(i, block) => {
                let link = ExampleLink { block, line: 0, word: 0 };
                added.push(forms.add_example_link(&pairs[i].0, &pairs[i].1, link));
            }
        }
    }
    (forms, added)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// A second sort-and-merge finds nothing left to do.
    #[test]
    fn prop_rebuild_is_idempotent((pairs, seeds) in seeds_strategy()) {
        let (mut forms, _) = load(&pairs, &seeds);
        forms.rebuild(true, &mut jiten::keep_going).unwrap();
        let once = forms.entries().to_vec();
        forms.rebuild(true, &mut jiten::keep_going).unwrap();
        prop_assert_eq!(forms.entries(), once.as_slice());
    }

    /// After a rebuild entries are strictly increasing and each pair is found.
    #[test]
    fn prop_rebuild_sorts_and_merges((pairs, seeds) in seeds_strategy()) {
        let (mut forms, _) = load(&pairs, &seeds);
        forms.rebuild(true, &mut jiten::keep_going).unwrap();

        for w in forms.entries().windows(2) {
            let next = &w[1];
            prop_assert_eq!(
                compare_key(&w[0], next.written(), &fold(next.phonetic()), next.phonetic()),
                Ordering::Less
            );
        }
        for (index, entry) in forms.entries().iter().enumerate() {
            prop_assert_eq!(forms.find(entry.written(), entry.phonetic()), Some(index));
        }
    }

    /// Merging keeps the first non-zero level and every link up to capacity.
    #[test]
    fn prop_merge_keeps_levels_and_links((pairs, seeds) in seeds_strategy()) {
        let (mut forms, added) = load(&pairs, &seeds);
        forms.rebuild(true, &mut jiten::keep_going).unwrap();

        let mut level: HashMap<(&str, &str), u8> = HashMap::new();
        let mut links: HashMap<(&str, &str), usize> = HashMap::new();
        for seed in &seeds {
            let key = match *seed {
                Seed::Level(i, _) | Seed::Link(i, _) => (pairs[i].0.as_str(), pairs[i].1.as_str()),
            };
            match *seed {
                Seed::Level(_, l) => {
                    let slot = level.entry(key).or_insert(0);
                    if *slot == 0 {
                        *slot = l;
                    }
                }
                Seed::Link(..) => *links.entry(key).or_insert(0) += 1,
            }
        }

        for (&(written, phonetic), &expected) in &level {
            prop_assert_eq!(forms.level_of(written, phonetic), expected);
        }
        for (&(written, phonetic), &count) in &links {
            let index = forms.find(written, phonetic).unwrap();
            prop_assert_eq!(forms.get(index).unwrap().examples().len(), count.min(CAPACITY));
        }
        let rejected = added.iter().filter(|a| a.is_none()).count();
        let expected_rejected: usize = links.values().map(|&c| c.saturating_sub(CAPACITY)).sum();
        prop_assert_eq!(rejected, expected_rejected);
    }
}
