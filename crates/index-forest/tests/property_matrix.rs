use index_forest::{IndexedList, SortedList};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, u16),
    Remove(usize),
    Set(usize, u16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<usize>(), any::<u16>()).prop_map(|(i, v)| Op::Insert(i, v)),
        any::<usize>().prop_map(Op::Remove),
        (any::<usize>(), any::<u16>()).prop_map(|(i, v)| Op::Set(i, v)),
    ]
}

proptest! {
    #[test]
    fn indexed_list_matches_vec(ops in prop::collection::vec(op(), 0..200)) {
        let mut list = IndexedList::new();
        let mut reference = Vec::new();
        for op in ops {
            match op {
                Op::Insert(i, v) => {
                    let i = i % (reference.len() + 1);
                    list.insert(i, v).unwrap();
                    reference.insert(i, v);
                }
                Op::Remove(i) if !reference.is_empty() => {
                    let i = i % reference.len();
                    prop_assert_eq!(list.remove(i).unwrap(), reference.remove(i));
                }
                Op::Set(i, v) if !reference.is_empty() => {
                    let i = i % reference.len();
                    let old = std::mem::replace(&mut reference[i], v);
                    prop_assert_eq!(list.set(i, v).unwrap(), old);
                }
                _ => {}
            }
            prop_assert!(list.assert_valid().is_ok());
        }
        prop_assert_eq!(list.to_vec(), reference);
    }

    #[test]
    fn sorted_list_stays_sorted(
        inserts in prop::collection::vec(any::<i16>(), 0..300),
        removes in prop::collection::vec(any::<i16>(), 0..100),
    ) {
        let mut list = SortedList::new();
        let mut reference = std::collections::BTreeSet::new();
        for v in inserts {
            prop_assert_eq!(list.add(v), reference.insert(v));
        }
        for v in removes {
            prop_assert_eq!(list.remove(&v).is_some(), reference.remove(&v));
        }
        prop_assert!(list.assert_valid().is_ok());
        prop_assert!(list.iter().eq(reference.iter()));
        for (i, v) in reference.iter().enumerate() {
            prop_assert_eq!(list.index_of(v), Some(i));
            prop_assert_eq!(list.get_at(i), Some(v));
        }
    }

    #[test]
    fn build_from_reproduces_input(mut values in prop::collection::vec(any::<u32>(), 0..500)) {
        values.sort_unstable();
        values.dedup();
        let list = SortedList::from_sorted(values.clone()).unwrap();
        prop_assert!(list.assert_valid().is_ok());
        prop_assert_eq!(list.tree().to_vec(), values);
    }
}
