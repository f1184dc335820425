use base_collections::{CollectionError, Exact, Queue, Stack};
use proptest::prelude::*;
use std::collections::VecDeque;

proptest! {
    // Ring wrap-around and growth must never reorder the queue.
    #[test]
    fn prop_queue_matches_vecdeque(cap in 0usize..6, ops in proptest::collection::vec((any::<bool>(), any::<u16>()), 1..300)) {
        let mut q: Queue<u16> = Queue::with_capacity(cap).unwrap();
        let mut model: VecDeque<u16> = VecDeque::new();
        for (push, v) in ops {
            if push {
                q.enqueue(v).unwrap();
                model.push_back(v);
            } else {
                match model.pop_front() {
                    Some(front) => {
                        prop_assert_eq!(q.dequeue().unwrap(), front);
                    }
                    None => {
                        prop_assert_eq!(q.dequeue(), Err(CollectionError::Underflow));
                    }
                }
            }
            prop_assert_eq!(q.count(), model.len());
            prop_assert_eq!(q.peek().ok(), model.front());
            prop_assert!(q.capacity() >= q.count());
        }
        let order: Vec<u16> = q.iter().copied().collect();
        prop_assert_eq!(order, Vec::from(model));
    }

    #[test]
    fn prop_stack_matches_vec(ops in proptest::collection::vec((any::<bool>(), any::<u16>()), 1..300)) {
        let mut s: Stack<u16, Exact> = Stack::with_capacity(0).unwrap();
        let mut model: Vec<u16> = Vec::new();
        for (push, v) in ops {
            if push {
                s.push(v).unwrap();
                model.push(v);
            } else {
                prop_assert_eq!(s.pop().ok(), model.pop());
            }
            prop_assert_eq!(s.peek().ok(), model.last());
        }
        prop_assert_eq!(s.to_vec(), model);
    }
}
