#![cfg(test)]

use super::*;
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

#[test]
fn test_push_pop_order() {
    let mut list = SinglyLinkedList::new();
    list.push_back(2);
    list.push_back(3);
    list.push_front(1);
    list.push_back(4);
    list.push_front(0);

    assert_eq!(
        list.iter().copied().collect::<Vec<_>>(),
        [0, 1, 2, 3, 4],
        "Items should iterate in list order regardless of which end they entered from."
    );
    assert_eq!(list.len(), 5);
    assert_eq!(list.front(), Some(&0));
    assert_eq!(list.back(), Some(&4));

    assert_eq!(list.pop_front(), Some(0));
    assert_eq!(list.pop_back(), Some(4));
    assert_eq!(list.pop_back(), Some(3));
    assert_eq!(
        list.iter().copied().collect::<Vec<_>>(),
        [1, 2],
        "Popping should remove from the chosen end only."
    );

    assert_eq!(list.pop_front(), Some(1));
    assert_eq!(list.pop_front(), Some(2));
    assert_eq!(list.pop_front(), None, "An emptied list should pop None.");
    assert_eq!(list.pop_back(), None);
    assert!(list.is_empty());
}

#[test]
fn test_matches_vec_model() {
    // Mirror a scripted op sequence against Vec and compare after every step.
    let mut list = SinglyLinkedList::new();
    let mut model: Vec<i32> = Vec::new();

    for step in 0..64 {
        match step % 7 {
            0 | 3 => {
                list.push_back(step);
                model.push(step);
            },
            1 => {
                list.push_front(step);
                model.insert(0, step);
            },
            2 => {
                assert_eq!(list.pop_front(), Some(model.remove(0)));
            },
            4 => {
                let index = model.len() / 2;
                list.insert(index, step);
                model.insert(index, step);
            },
            5 => {
                let index = model.len() - 1;
                assert_eq!(list.remove(index), model.remove(index));
            },
            _ => {
                let index = model.len() / 3;
                assert_eq!(list.replace(index, step), std::mem::replace(&mut model[index], step));
            },
        }
        assert_eq!(
            list.iter().copied().collect::<Vec<_>>(),
            model,
            "List should match the Vec model after step {step}."
        );
        assert_eq!(list.len(), model.len());
    }
}

#[test]
fn test_insert_remove() {
    let mut list: SinglyLinkedList<_> = [1, 2, 4].into_iter().collect();
    list.insert(2, 3);
    list.insert(0, 0);
    list.insert(5, 5);

    assert_eq!(
        list.iter().copied().collect::<Vec<_>>(),
        [0, 1, 2, 3, 4, 5],
        "Insert should support the front, the back and the middle."
    );

    assert_eq!(list.remove(3), 3, "Remove should return the removed value.");
    assert_eq!(list.remove(0), 0);
    assert_eq!(list.remove(3), 5, "Removing the last index should pop the back.");
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 4]);
    assert_eq!(list.back(), Some(&4), "Tail should follow a back removal.");

    list.push_back(9);
    assert_eq!(
        list.iter().copied().collect::<Vec<_>>(),
        [1, 2, 4, 9],
        "The chain should still be appendable after interior removals."
    );
}

#[test]
fn test_out_of_bounds_panics() {
    assert_panics!({
        let list: SinglyLinkedList<u8> = SinglyLinkedList::new();
        let _ = list.get(0);
    }, "Indexing an empty list should panic.");
    assert_panics!({
        let mut list: SinglyLinkedList<_> = [1, 2, 3].into_iter().collect();
        list.insert(4, 10)
    }, "Inserting past the length should panic.");
    assert_panics!({
        let mut list: SinglyLinkedList<_> = [1, 2, 3].into_iter().collect();
        list.remove(3)
    }, "Removing at the length should panic.");

    let list: SinglyLinkedList<_> = [1, 2, 3].into_iter().collect();
    assert_eq!(list.try_get(3), None, "try_get should return None instead of panicking.");
    assert_eq!(list.try_get(2), Some(&3));
}

#[test]
fn test_cow_clone_isolation() {
    let mut original: SinglyLinkedList<_> = [1, 2, 3].into_iter().collect();
    let mut copy = original.clone();
    assert!(
        original.shares_storage_with(&copy),
        "A fresh clone should share the original's chain."
    );

    copy.push_back(4);
    assert!(
        !original.shares_storage_with(&copy),
        "The first mutation should unshare the chain."
    );
    assert_eq!(
        original.iter().copied().collect::<Vec<_>>(),
        [1, 2, 3],
        "Mutating a clone should never be observable through the original."
    );
    assert_eq!(copy.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);

    // And in the other direction, with every mutating operation.
    let mut copy = original.clone();
    original.push_front(0);
    original.remove(1);
    original.insert(1, 7);
    *original.get_mut(0) += 10;
    assert_eq!(copy.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(original.iter().copied().collect::<Vec<_>>(), [10, 7, 2, 3]);

    copy.clear();
    assert_eq!(copy.len(), 0);
    assert_eq!(
        original.len(),
        4,
        "Clearing one value should leave other owners untouched."
    );
}

#[test]
fn test_mutation_without_sharing_keeps_storage() {
    let mut list: SinglyLinkedList<_> = [1, 2, 3].into_iter().collect();
    let before = list.buf.contents().map(|c| c.head.as_ptr());
    list.push_back(4);
    let after = list.buf.contents().map(|c| c.head.as_ptr());
    assert_eq!(
        before, after,
        "A uniquely owned list should mutate in place, not copy."
    );
}

#[test]
fn test_deep_copy_shares_no_nodes() {
    let original: SinglyLinkedList<_> = (0..10).collect();
    let mut copy = original.clone();
    copy.push_back(10); // Force the deep copy.

    let original_nodes: Vec<_> = {
        let mut nodes = Vec::new();
        let mut curr = original.buf.contents().map(|c| c.head);
        while let Some(ptr) = curr {
            nodes.push(ptr.as_ptr());
            curr = *ptr.next();
        }
        nodes
    };

    let mut curr = copy.buf.contents().map(|c| c.head);
    while let Some(ptr) = curr {
        assert!(
            !original_nodes.contains(&ptr.as_ptr()),
            "A deep copy should not share any node with the original chain."
        );
        curr = *ptr.next();
    }

    assert_eq!(original.len(), 10);
    assert_eq!(copy.len(), 11);
    assert!(original.iter().eq(copy.iter().take(10)), "Copied values should be equal.");
}

#[test]
fn test_drop_accounting() {
    let counter = CountedDrop::new(0);

    let list: SinglyLinkedList<_> = (0..5).map(|_| counter.clone()).collect();
    assert_eq!(*counter.borrow(), 0, "Nothing should drop while the list is alive.");
    drop(list);
    assert_eq!(*counter.borrow(), 5, "Every node's value should drop exactly once.");

    counter.replace(0);
    let original: SinglyLinkedList<_> = (0..3).map(|_| counter.clone()).collect();
    let mut copy = original.clone();
    copy.push_back(counter.clone());
    drop(copy);
    assert_eq!(
        *counter.borrow(),
        4,
        "Dropping the mutated clone should drop its own chain only (3 copied + 1 pushed)."
    );
    drop(original);
    assert_eq!(*counter.borrow(), 7, "The original chain should drop independently.");
}

#[test]
fn test_long_list_drop_does_not_overflow_stack() {
    // Node teardown is iterative; a recursive version would overflow well below this.
    let list: SinglyLinkedList<_> = (0..100_000).collect();
    assert_eq!(list.len(), 100_000);
    drop(list);
}

#[test]
fn test_iter_mut_unshares() {
    let original: SinglyLinkedList<_> = [1, 2, 3].into_iter().collect();
    let mut copy = original.clone();
    for item in copy.iter_mut() {
        *item *= 2;
    }
    assert_eq!(original.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(copy.iter().copied().collect::<Vec<_>>(), [2, 4, 6]);
}

#[test]
fn test_equality_and_display() {
    let a: SinglyLinkedList<_> = [1, 2, 3].into_iter().collect();
    let b = a.clone();
    let c: SinglyLinkedList<_> = [1, 2, 3].into_iter().collect();
    let d: SinglyLinkedList<_> = [1, 2].into_iter().collect();

    assert_eq!(a, b, "Clones sharing storage should be equal without a walk.");
    assert_eq!(a, c, "Structurally equal lists should be equal.");
    assert_ne!(a, d);

    assert_eq!(format!("{a}"), "(1) -> (2) -> (3)");
    assert_eq!(format!("{}", SinglyLinkedList::<u8>::new()), "()");
}

#[test]
fn test_end_to_end_scenario() {
    // Append 1, 2, 3; copy; append 4 to the copy; the original must be unaffected.
    let mut list = SinglyLinkedList::new();
    list.push_back(1);
    list.push_back(2);
    list.push_back(3);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(list.len(), 3);

    let mut copy = list.clone();
    copy.push_back(4);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(copy.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
}
