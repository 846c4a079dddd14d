use index_forest::{Comparator, OrderedTree, SortedList, SortedSet, TreeError};

#[test]
fn sorted_set_ascending_0_to_999_matrix() {
    let mut set = SortedSet::<i32>::new();
    for k in 0..1000 {
        assert!(set.add(k));
        if let Err(err) = set.assert_valid() {
            panic!("invalid tree after add({k}): {err}");
        }
        assert_eq!(set.len(), (k + 1) as usize);
        assert!(set.iter().copied().eq(0..=k));
    }
    assert!(set.iter().copied().eq(0..1000));
    // A red-black tree of n nodes is at most 2 * log2(n + 1) high.
    assert!(set.tree().height() <= 20);
}

#[test]
fn sorted_set_descending_then_delete_matrix() {
    let mut set = SortedSet::<i32>::new();
    for k in (11..=100).rev() {
        assert!(set.add(k));
        set.assert_valid().unwrap();
    }
    assert_eq!(set.first(), Some(&11));
    assert_eq!(set.last(), Some(&100));

    for k in (11..=100).rev() {
        assert_eq!(set.remove(&k), Some(k));
        set.assert_valid().unwrap();
    }
    assert!(set.is_empty());
}

#[test]
fn sorted_set_rejects_duplicates_matrix() {
    let mut set = SortedSet::<&str>::new();
    assert!(set.add("b"));
    assert!(set.add("a"));
    assert!(!set.add("b"));
    assert_eq!(set.insert("a"), Err("a"));
    assert_eq!(set.len(), 2);
    assert!(set.contains(&"a"));
    assert!(!set.contains(&"c"));
    assert_eq!(set.remove(&"c"), None);
}

#[test]
fn sorted_set_ladder_insert_delete_matrix() {
    let mut set = SortedSet::<i32>::new();
    for i in 0..200 {
        set.add(i);
    }
    for i in (0..200).step_by(2) {
        assert_eq!(set.remove(&i), Some(i));
        set.assert_valid().unwrap();
    }
    assert_eq!(set.len(), 100);
    for i in 0..200 {
        assert_eq!(set.contains(&i), i % 2 == 1);
    }
}

#[test]
fn sorted_set_bounds_matrix() {
    let set = SortedSet::<i32>::from_sorted([10, 20, 30]).unwrap();
    let value = |n| set.get(n).copied().ok();

    assert_eq!(set.lower_bound(&20).and_then(value), Some(20));
    assert_eq!(set.lower_bound(&21).and_then(value), Some(30));
    assert_eq!(set.lower_bound(&5).and_then(value), Some(10));
    assert_eq!(set.lower_bound(&31), None);

    assert_eq!(set.upper_bound(&20).and_then(value), Some(30));
    assert_eq!(set.upper_bound(&9).and_then(value), Some(10));
    assert_eq!(set.upper_bound(&30), None);

    assert_eq!(set.floor(&20).and_then(value), Some(20));
    assert_eq!(set.floor(&29).and_then(value), Some(20));
    assert_eq!(set.floor(&100).and_then(value), Some(30));
    assert_eq!(set.floor(&9), None);
}

#[test]
fn sorted_set_pop_matrix() {
    let mut set = SortedSet::<i32>::from_sorted(1..=5).unwrap();
    assert_eq!(set.pop_first(), Some(1));
    assert_eq!(set.pop_last(), Some(5));
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    set.assert_valid().unwrap();
}

#[test]
fn sorted_set_custom_comparator_matrix() {
    let mut set = OrderedTree::<i32, _>::with_comparator(|a: &i32, b: &i32| b.cmp(a) as i32);
    for v in [3, 1, 4, 1, 5, 9, 2, 6] {
        set.add(v);
    }
    assert_eq!(
        set.iter().copied().collect::<Vec<_>>(),
        vec![9, 6, 5, 4, 3, 2, 1]
    );
    set.assert_valid().unwrap();

    let boxed: Box<Comparator<String>> = Box::new(|a, b| a.len().cmp(&b.len()) as i32);
    let mut by_len = OrderedTree::<String, _>::with_comparator(boxed);
    assert!(by_len.add("ccc".to_string()));
    assert!(by_len.add("a".to_string()));
    assert!(!by_len.add("b".to_string()));
    assert_eq!(by_len.first().map(String::as_str), Some("a"));
}

#[test]
fn sorted_add_all_sorted_matrix() {
    let mut set = SortedSet::<i32>::new();
    assert_eq!(set.add_all_sorted([1, 3, 5, 7]), Ok(4));
    set.assert_valid().unwrap();

    // Non-empty: hinted insertion, with searches for values that do not fit.
    assert_eq!(set.add_all_sorted([2, 4, 6, 8, 9, 0, 3]), Ok(6));
    assert!(set.iter().copied().eq(0..10));
    set.assert_valid().unwrap();

    let mut empty = SortedSet::<i32>::new();
    assert_eq!(empty.add_all_sorted([1, 1]), Err(TreeError::OrderViolated));
    assert_eq!(empty.add_all_sorted([2, 1]), Err(TreeError::OrderViolated));
    assert!(empty.is_empty());
    assert!(SortedSet::<i32>::from_sorted([5, 4]).is_err());
}

#[test]
fn sorted_insert_at_matrix() {
    let mut set = SortedSet::<i32>::from_sorted([10, 30]).unwrap();
    let ten = set.find(&10).unwrap();
    set.insert_at(Some(ten), true, 20).unwrap();
    set.insert_at(None, false, 0).unwrap();
    set.insert_at(None, true, 40).unwrap();
    assert_eq!(
        set.iter().copied().collect::<Vec<_>>(),
        vec![0, 10, 20, 30, 40]
    );
    set.assert_valid().unwrap();
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "order violated")]
fn sorted_insert_at_out_of_order_panics_matrix() {
    let mut set = SortedSet::<i32>::from_sorted([10, 30]).unwrap();
    let ten = set.find(&10).unwrap();
    let _ = set.insert_at(Some(ten), true, 50);
}

#[test]
fn sorted_list_positional_matrix() {
    let mut list = SortedList::<i32>::new();
    for v in [50, 10, 40, 20, 30, 60] {
        list.add(v);
    }
    for (i, v) in [10, 20, 30, 40, 50, 60].into_iter().enumerate() {
        assert_eq!(list.get_at(i), Some(&v));
        assert_eq!(list.index_of(&v), Some(i));
        let node = list.node_at(i).unwrap();
        assert_eq!(list.index_of_node(node), Ok(i));
    }
    assert_eq!(list.get_at(6), None);

    assert_eq!(list.remove_at(2), Ok(30));
    assert_eq!(
        list.remove_at(5),
        Err(TreeError::IndexOutOfBounds { index: 5, len: 5 })
    );
    assert_eq!(list.rank(&30), 2);
    assert_eq!(list.tree().root_aggregate().map(|c| c.0), Some(5));
    list.assert_valid().unwrap();
}

#[test]
fn sorted_list_remove_node_matrix() {
    let mut list = SortedList::<i32>::from_sorted(0..8).unwrap();
    let node = list.find(&3).unwrap();
    assert_eq!(list.remove_node(node), Ok(3));
    assert_eq!(list.remove_node(node), Err(TreeError::UseAfterFree));
    assert_eq!(format!("{list:?}"), "[0, 1, 2, 4, 5, 6, 7]");
}

#[test]
fn sorted_list_positional_set_insert_matrix() {
    let mut list = SortedList::<i32>::from_sorted([10, 20, 30, 40]).unwrap();

    assert_eq!(list.set_at(1, 25), Ok(20));
    assert_eq!(list.set_at(3, 45), Ok(40));
    assert_eq!(
        list.set_at(4, 50),
        Err(TreeError::IndexOutOfBounds { index: 4, len: 4 })
    );

    list.insert_at_index(0, 5).unwrap();
    let node = list.insert_at_index(2, 15).unwrap();
    list.insert_at_index(list.len(), 50).unwrap();
    assert_eq!(list.index_of_node(node), Ok(2));
    assert_eq!(
        list.insert_at_index(99, 60),
        Err(TreeError::IndexOutOfBounds { index: 99, len: 7 })
    );

    assert_eq!(
        list.iter().copied().collect::<Vec<_>>(),
        vec![5, 10, 15, 25, 30, 45, 50]
    );
    assert_eq!(list.rank(&30), 4);
    list.assert_valid().unwrap();
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "order violated")]
fn sorted_list_set_at_out_of_order_panics_matrix() {
    let mut list = SortedList::<i32>::from_sorted([10, 20, 30]).unwrap();
    let _ = list.set_at(0, 25);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "order violated")]
fn sorted_list_insert_at_index_out_of_order_panics_matrix() {
    let mut list = SortedList::<i32>::from_sorted([10, 20, 30]).unwrap();
    let _ = list.insert_at_index(1, 35);
}
