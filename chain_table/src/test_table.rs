#![allow(missing_docs)]
use crate::ChainTable;
use hashbrown::HashMap;
use rand::prelude::*;
use std::fmt::{Debug, Display};
use std::hash::Hash;

struct CheckedTable<K, V> {
    dut: ChainTable<K, V>,
    reference: HashMap<K, V>,
}

impl<K, V> CheckedTable<K, V>
where
    K: Display + Hash + Eq + Clone + Debug,
    V: Eq + Clone + Debug,
{
    fn with_buckets(buckets: usize) -> Self {
        CheckedTable {
            dut: ChainTable::with_buckets(buckets),
            reference: HashMap::new(),
        }
    }
    fn len(&self) -> usize {
        self.reference.len()
    }
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        let ref_result = self.reference.insert(key.clone(), value.clone());
        let dut_result = self.dut.insert(key, value);
        assert_eq!(ref_result, dut_result);
        ref_result
    }
    fn get(&self, key: &K) -> Option<&V> {
        let ref_result = self.reference.get(key);
        let dut_result = self.dut.get(key);
        assert_eq!(ref_result, dut_result);
        ref_result
    }
    fn remove(&mut self, key: &K) -> Option<V> {
        let ref_result = self.reference.remove(key);
        let dut_result = self.dut.remove(key);
        assert_eq!(ref_result, dut_result);
        ref_result
    }
    fn clear(&mut self) {
        let buckets = self.dut.bucket_count();
        self.reference.clear();
        self.dut.clear();
        assert_eq!(self.dut.bucket_count(), buckets);
    }
    fn check(&self) {
        assert_eq!(self.reference.len(), self.dut.len());
        assert_eq!(self.reference.is_empty(), self.dut.is_empty());
        for (key, value) in self.reference.iter() {
            assert_eq!(self.dut.get(key), Some(value));
            assert!(self.dut.contains_key(key));
        }
        for (key, value) in self.dut.iter() {
            assert_eq!(self.reference.get(key), Some(value));
        }
        // the projections walk in the same deterministic order as iter()
        assert!(self.dut.keys().eq(self.dut.iter().map(|(k, _)| k)));
        assert!(self.dut.values().eq(self.dut.iter().map(|(_, v)| v)));
        // repeated traversal of an unchanged table yields the identical sequence
        assert!(self.dut.iter().eq(self.dut.iter()));
    }
    /// NB: `random_likelihood` is **not** a probability: `random_likelihood == 2.0` is 2:1 odds
    /// random:present, i.e. 2/3 probability of a random key.
    fn present_or_random_key<R: Rng>(
        &self,
        random_likelihood: f64,
        rng: &mut R,
        mut rand_k: impl FnMut(&mut R) -> K,
    ) -> K {
        if self.len() == 0 || rng.gen_range(0.0..1.0 + random_likelihood) >= 1.0 {
            rand_k(rng)
        } else {
            self.reference.keys().choose(rng).unwrap().clone()
        }
    }
}

fn test_suite<K, V>(
    buckets: usize,
    mut rand_k: impl FnMut(&mut rand_pcg::Pcg64) -> K,
    mut rand_v: impl FnMut(&mut rand_pcg::Pcg64) -> V,
) where
    K: Display + Hash + Eq + Clone + Debug,
    V: Eq + Clone + Debug,
{
    let mut table: CheckedTable<K, V> = CheckedTable::with_buckets(buckets);
    let mut rng = rand_pcg::Pcg64::seed_from_u64(39);
    for step in 0..5000 {
        match rng.gen_range(0..100) {
            0..=49 => {
                let k = table.present_or_random_key(6.0, &mut rng, &mut rand_k);
                let v = rand_v(&mut rng);
                table.insert(k, v);
            }
            50..=74 => {
                let k = table.present_or_random_key(1.0, &mut rng, &mut rand_k);
                table.get(&k);
            }
            75..=97 => {
                let k = table.present_or_random_key(1.0, &mut rng, &mut rand_k);
                table.remove(&k);
            }
            _ => table.clear(),
        }
        if step % 64 == 0 {
            table.check();
        }
    }
    table.check();
}

fn rand_string(rng: &mut rand_pcg::Pcg64) -> String {
    let len = rng.gen_range(1..12);
    String::from_iter((0..len).map(|_| rng.gen_range('!'..'~')))
}

#[test]
fn test_suite_string_keys() {
    test_suite::<String, u64>(193, rand_string, |rng| rng.gen());
}

#[test]
fn test_suite_integer_keys() {
    test_suite::<u32, String>(193, |rng| rng.gen_range(0..5000), rand_string);
}

#[test]
fn test_suite_single_bucket() {
    // one bucket degenerates to a pure chain and exercises every collision path
    test_suite::<u32, u64>(1, |rng| rng.gen_range(0..200), |rng| rng.gen());
}

#[test]
fn test_suite_tiny_table() {
    test_suite::<String, u64>(3, rand_string, |rng| rng.gen());
}

#[test]
fn test_basic() {
    let mut table: ChainTable<String, usize> = ChainTable::new();
    assert_eq!(table.bucket_count(), crate::DEFAULT_BUCKET_COUNT);
    assert!(table.is_empty());
    assert_eq!(table.insert("adam".into(), 10), None);
    assert_eq!(table.insert("eve".into(), 23), None);
    assert_eq!(table.insert("mallory".into(), 40), None);
    assert_eq!(table.insert("jim".into(), 5), None);
    assert_eq!(table.len(), 4);
    assert_eq!(table.get("adam").copied(), Some(10));
    assert_eq!(table.insert("jim".into(), 15), Some(5));
    assert_eq!(table.len(), 4);
    assert_eq!(table.remove("eve"), Some(23));
    assert_eq!(table.get("eve"), None);
    assert_eq!(table.remove("eve"), None);
    assert_eq!(table.len(), 3);
    let mut keys: Vec<_> = table.keys().collect();
    keys.sort();
    assert_eq!(keys, ["adam", "jim", "mallory"]);
    let mut values: Vec<_> = table.values().copied().collect();
    values.sort();
    assert_eq!(values, [10, 15, 40]);
}

#[test]
fn test_get_mut_updates_in_place() {
    let mut table: ChainTable<String, Vec<u32>> = ChainTable::new();
    table.insert("shelf".into(), vec![1, 2]);
    table.get_mut("shelf").unwrap().push(3);
    assert_eq!(table.get("shelf"), Some(&vec![1, 2, 3]));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_values_mut_and_iter_mut() {
    let mut table: ChainTable<u32, u64> = ChainTable::with_buckets(7);
    for i in 0..50 {
        table.insert(i, u64::from(i));
    }
    for value in table.values_mut() {
        *value += 1;
    }
    for (key, value) in table.iter_mut() {
        *value += u64::from(*key);
    }
    for i in 0..50u32 {
        assert_eq!(table.get(&i), Some(&(u64::from(i) * 2 + 1)));
    }
}

#[test]
fn test_into_iter_yields_every_entry_once() {
    let mut table: ChainTable<u32, u32> = ChainTable::with_buckets(11);
    for i in 0..100 {
        table.insert(i, i * i);
    }
    let mut entries: Vec<_> = table.into_iter().collect();
    entries.sort();
    assert_eq!(entries, (0..100).map(|i| (i, i * i)).collect::<Vec<_>>());
}

#[test]
fn test_from_iterator_applies_insert_semantics() {
    let table: ChainTable<String, u32> = [
        ("a".to_string(), 1),
        ("b".to_string(), 2),
        ("a".to_string(), 3),
    ]
    .into_iter()
    .collect();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("a"), Some(&3));
    assert_eq!(table.get("b"), Some(&2));
}

#[test]
fn test_clone_is_independent() {
    let mut table: ChainTable<u32, u32> = ChainTable::with_buckets(2);
    for i in 0..10 {
        table.insert(i, i);
    }
    let mut copy = table.clone();
    copy.remove(&3);
    copy.insert(4, 400);
    assert_eq!(table.get(&3), Some(&3));
    assert_eq!(table.get(&4), Some(&4));
    assert_eq!(copy.get(&3), None);
    assert_eq!(copy.get(&4), Some(&400));
    assert!(table.iter().eq(table.clone().iter()));

    // entries clone for non-Copy key and value types as well
    let mut owned: ChainTable<String, Vec<u32>> = ChainTable::with_buckets(2);
    owned.insert("BK-1".into(), vec![1]);
    let mut owned_copy = owned.clone();
    owned_copy.get_mut("BK-1").unwrap().push(2);
    assert_eq!(owned.get("BK-1"), Some(&vec![1]));
    assert_eq!(owned_copy.get("BK-1"), Some(&vec![1, 2]));
}

#[test]
fn test_debug_output() {
    let mut table: ChainTable<u32, u32> = ChainTable::with_buckets(1);
    table.insert(1, 10);
    table.insert(2, 20);
    assert_eq!(format!("{table:?}"), "{1: 10, 2: 20}");
}

#[test]
#[should_panic(expected = "at least one bucket")]
fn test_zero_buckets_panics() {
    let _ = ChainTable::<u32, u32>::with_buckets(0);
}
