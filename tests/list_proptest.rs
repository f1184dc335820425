use base_collections::{ArrayList, Chunked, Collection, DefaultComparer, LinkedList, List};
use proptest::prelude::*;

// Drive any List through random ops and compare against a Vec model.
fn run_list_model<L>(list: &mut L, ops: &[(u8, usize, i32)]) -> Result<(), TestCaseError>
where
    L: List<Item = i32>,
{
    let mut model: Vec<i32> = Vec::new();
    for &(op, raw_i, v) in ops {
        match op {
            // Append
            0 => {
                list.add(v).unwrap();
                model.push(v);
            }
            // Insert anywhere, including one past the end
            1 => {
                let i = raw_i % (model.len() + 1);
                list.insert_at(v, i).unwrap();
                model.insert(i, v);
            }
            // Remove at index, or check the out-of-range failure
            2 => {
                if model.is_empty() {
                    prop_assert!(list.remove_at(raw_i).unwrap_err().is_out_of_range());
                } else {
                    let i = raw_i % model.len();
                    prop_assert_eq!(list.remove_at(i).unwrap(), model.remove(i));
                }
            }
            // Replace at index
            3 => {
                if !model.is_empty() {
                    let i = raw_i % model.len();
                    let old = list.set_at(v, i).unwrap();
                    prop_assert_eq!(old, std::mem::replace(&mut model[i], v));
                }
            }
            // Remove a range
            4 => {
                if !model.is_empty() {
                    let start = raw_i % model.len();
                    let count = (v.unsigned_abs() as usize) % (model.len() - start + 1);
                    list.remove_items(start, count).unwrap();
                    model.drain(start..start + count);
                }
            }
            // Search both directions
            5 => {
                prop_assert_eq!(list.index_of(&v).ok(), model.iter().position(|x| *x == v));
                prop_assert_eq!(list.last_index_of(&v).ok(), model.iter().rposition(|x| *x == v));
            }
            // Sort
            6 => {
                list.sort(&DefaultComparer).unwrap();
                model.sort();
            }
            _ => unreachable!(),
        }

        // Invariants after each step
        prop_assert_eq!(list.count(), model.len());
        let seen: Vec<i32> = list.iter().copied().collect();
        prop_assert_eq!(&seen, &model);
    }
    for (i, v) in model.iter().enumerate() {
        prop_assert_eq!(list.get_at(i).unwrap(), v);
    }
    prop_assert!(list.get_at(model.len()).unwrap_err().is_out_of_range());
    Ok(())
}

proptest! {
    #[test]
    fn prop_array_list_matches_vec(ops in proptest::collection::vec((0u8..=6u8, 0usize..64, -20i32..20), 1..200)) {
        let mut list: ArrayList<i32> = ArrayList::new();
        run_list_model(&mut list, &ops)?;
    }

    #[test]
    fn prop_chunked_array_list_matches_vec(ops in proptest::collection::vec((0u8..=6u8, 0usize..64, -20i32..20), 1..200)) {
        let mut list: ArrayList<i32, Chunked> = ArrayList::new();
        run_list_model(&mut list, &ops)?;
        // Auto-trim never drops capacity below the count
        prop_assert!(list.capacity() >= list.count());
    }

    #[test]
    fn prop_linked_list_matches_vec(ops in proptest::collection::vec((0u8..=6u8, 0usize..64, -20i32..20), 1..200)) {
        let mut list: LinkedList<i32> = LinkedList::new();
        run_list_model(&mut list, &ops)?;
    }

    #[test]
    fn prop_chunked_linked_list_matches_vec(ops in proptest::collection::vec((0u8..=6u8, 0usize..64, -20i32..20), 1..200)) {
        let mut list: LinkedList<i32, Chunked> = LinkedList::new();
        run_list_model(&mut list, &ops)?;
    }

    // Sorting twice is the same as sorting once, and both list kinds agree.
    #[test]
    fn prop_sort_idempotent_across_lists(values in proptest::collection::vec(-1000i32..1000, 0..300)) {
        let mut a: ArrayList<i32> = values.iter().copied().collect();
        let mut l: LinkedList<i32> = values.iter().copied().collect();
        a.sort(&DefaultComparer).unwrap();
        l.sort(&DefaultComparer).unwrap();
        let once: Vec<i32> = a.iter().copied().collect();
        a.sort(&DefaultComparer).unwrap();
        let twice: Vec<i32> = a.iter().copied().collect();
        prop_assert_eq!(&once, &twice);
        let linked: Vec<i32> = l.iter().copied().collect();
        prop_assert_eq!(&once, &linked);
    }
}
