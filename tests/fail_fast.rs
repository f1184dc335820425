// Cross-container checks of the enumerator invalidation protocol, driven
// through the capability traits only.

use base_collections::{
    ArrayList, Collection, CollectionError, Enumerator, HashMap, LinkedList, List, Map,
    MapEnumerator, MultiHashMap, MultiMap, Queue, Stack,
};

fn assert_list_fail_fast<L>(mut list: L)
where
    L: List<Item = i32> + std::fmt::Debug,
{
    for i in 0..4 {
        list.add(i).unwrap();
    }
    let mut e = list.enumerator();
    assert!(e.current(&list).unwrap_err().is_invalid_operation());
    e.move_next(&list).unwrap();
    assert_eq!(*e.current(&list).unwrap(), 0);

    // Even a write that leaves the contents identical counts.
    list.set_at(0, 0).unwrap();
    assert!(e.current(&list).unwrap_err().is_invalid_operation());
    assert!(e.move_next(&list).unwrap_err().is_invalid_operation());
    assert!(e.reset(&list).unwrap_err().is_invalid_operation());

    // A fresh enumerator walks everything and then reports the end.
    let mut e = list.enumerator();
    let mut walked = Vec::new();
    while e.try_advance(&list).unwrap() {
        walked.push(*e.current(&list).unwrap());
    }
    assert_eq!(walked, vec![0, 1, 2, 3]);
    assert!(e.move_next(&list).unwrap_err().is_out_of_range());
    assert!(e.current(&list).unwrap_err().is_invalid_operation());
    e.reset(&list).unwrap();
    e.move_next(&list).unwrap();
    assert_eq!(*e.current(&list).unwrap(), 0);

    // Copying a range out is a read: the source enumerator survives it.
    let middle = list.get_items_n(1, 2).unwrap();
    let copied: Vec<i32> = middle.iter().copied().collect();
    assert_eq!(copied, vec![1, 2]);
    assert!(list.get_items_n(3, 2).unwrap_err().is_out_of_range());
    e.move_next(&list).unwrap();
    assert_eq!(*e.current(&list).unwrap(), 1);

    // Sorting invalidates even when nothing moves.
    list.sort(&base_collections::DefaultComparer).unwrap();
    assert!(e.move_next(&list).unwrap_err().is_invalid_operation());
}

#[test]
fn lists_fail_fast() {
    assert_list_fail_fast(ArrayList::<i32>::new());
    assert_list_fail_fast(LinkedList::<i32>::new());
    assert_list_fail_fast(ArrayList::<i32, base_collections::Chunked>::new());
}

#[test]
fn enumerator_rejects_foreign_collection() {
    let a: ArrayList<i32> = (0..3).collect();
    let b = a.clone();
    let mut e = a.enumerator();
    assert!(matches!(
        e.move_next(&b),
        Err(CollectionError::InvalidArgument { .. })
    ));
    assert!(e.move_next(&a).is_ok());
}

#[test]
fn queue_and_stack_fail_fast() {
    let mut q: Queue<i32> = Queue::new();
    q.enqueue(1).unwrap();
    let mut qe = Collection::enumerator(&q);
    q.enqueue(2).unwrap();
    assert!(qe.move_next(&q).unwrap_err().is_invalid_operation());

    let mut s: Stack<i32> = Stack::new();
    s.push(1).unwrap();
    let mut se = Collection::enumerator(&s);
    s.remove_all();
    assert!(se.move_next(&s).unwrap_err().is_invalid_operation());
}

fn assert_map_fail_fast<M>(mut map: M)
where
    M: Map<Key = i32, Value = i32>,
{
    for k in 0..10 {
        map.add(k, k).unwrap();
    }
    let mut e = map.map_enumerator();
    e.move_next(&map).unwrap();
    let (k, _) = e.current(&map).unwrap();
    let k = *k;
    map.get_value(&k).unwrap();
    assert!(map.contains_key(&k).unwrap());
    // Reads do not invalidate.
    assert!(e.key(&map).is_ok());
    map.remove(&k).unwrap();
    assert!(e.key(&map).unwrap_err().is_invalid_operation());
    assert!(e.value(&map).unwrap_err().is_invalid_operation());
}

#[test]
fn maps_fail_fast() {
    assert_map_fail_fast(HashMap::<i32, i32>::new());
}

fn assert_multi_map_fail_fast<M>(mut map: M)
where
    M: MultiMap<Key = i32, Value = i32>,
{
    map.add(1, 10).unwrap();
    map.add(1, 11).unwrap();
    map.add(2, 20).unwrap();
    let mut all = map.map_enumerator();
    let mut ones = map.get_values_n(&1).unwrap();

    // A change under another key fails the map enumerator only.
    map.add(2, 21).unwrap();
    assert!(all.move_next(&map).unwrap_err().is_invalid_operation());
    ones.move_next(&map).unwrap();
    assert_eq!(*ones.current(&map).unwrap(), 10);

    // A change under the same key fails the value enumerator too.
    map.remove_value(&1, &11).unwrap();
    assert!(ones.move_next(&map).unwrap_err().is_invalid_operation());
    assert_eq!(map.count(), 3);
    assert_eq!(map.count_of(&1).unwrap(), 1);

    // Key and value snapshots cover every pair and leave enumerators valid.
    let mut fresh = map.map_enumerator();
    let mut keys: Vec<i32> = map.get_keys_n().unwrap().iter().copied().collect();
    keys.sort();
    assert_eq!(keys, vec![1, 2]);
    let mut values: Vec<i32> = map.get_values_n_all().unwrap().iter().copied().collect();
    values.sort();
    assert_eq!(values, vec![10, 20, 21]);
    assert!(fresh.move_next(&map).is_ok());
}

#[test]
fn multi_maps_fail_fast() {
    assert_multi_map_fail_fast(MultiHashMap::<i32, i32>::new());
}
