#![cfg(test)]

use super::*;
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

fn collect<T: Clone>(list: &LinkedList<T>) -> Vec<T> {
    list.iter().cloned().collect()
}

#[test]
fn test_push_pop_order() {
    let mut list = LinkedList::new();
    list.push_back(2);
    list.push_back(3);
    list.push_front(1);
    list.push_back(4);
    list.push_front(0);

    assert_eq!(
        collect(&list),
        [0, 1, 2, 3, 4],
        "Items should iterate in list order regardless of which end they entered from."
    );
    list.buf.verify_double_links();

    assert_eq!(list.pop_back(), Some(4), "pop_back should be O(1) and correct.");
    assert_eq!(list.pop_front(), Some(0));
    assert_eq!(collect(&list), [1, 2, 3]);
    list.buf.verify_double_links();

    assert_eq!(list.pop_back(), Some(3));
    assert_eq!(list.pop_back(), Some(2));
    assert_eq!(list.pop_back(), Some(1));
    assert_eq!(list.pop_back(), None, "An emptied list should pop None.");
    assert!(list.is_empty());
}

#[test]
fn test_matches_vec_model() {
    let mut list = LinkedList::new();
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
                assert_eq!(list.pop_back(), model.pop());
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
        assert_eq!(collect(&list), model, "List should match the Vec model after step {step}.");
        list.buf.verify_double_links();
    }
}

#[test]
fn test_seek_from_both_ends() {
    let list: LinkedList<_> = (0..10).collect();
    // Indices in the front half walk forward, the rest walk backwards from the tail.
    for i in 0..10 {
        assert_eq!(*list.get(i), i, "Seeking should find index {i} from either end.");
    }
    assert_panics!({
        let list: LinkedList<_> = (0..10).collect();
        let _ = list.get(10);
    }, "Indexing at the length should panic.");
}

#[test]
fn test_insert_remove_relinking() {
    let mut list: LinkedList<_> = [1, 2, 4].into_iter().collect();
    list.insert(2, 3);
    list.insert(0, 0);
    list.insert(5, 5);
    assert_eq!(collect(&list), [0, 1, 2, 3, 4, 5]);
    list.buf.verify_double_links();

    assert_eq!(list.remove(3), 3);
    assert_eq!(list.remove(0), 0);
    assert_eq!(list.remove(3), 5);
    assert_eq!(collect(&list), [1, 2, 4]);
    assert_eq!(list.back(), Some(&4));
    list.buf.verify_double_links();
}

#[test]
fn test_append_splices() {
    let mut front: LinkedList<_> = [1, 2].into_iter().collect();
    let back: LinkedList<_> = [3, 4].into_iter().collect();
    front.append(back);
    assert_eq!(collect(&front), [1, 2, 3, 4]);
    front.buf.verify_double_links();

    // Appending a shared list must not disturb the other owner.
    let other: LinkedList<_> = [9, 9].into_iter().collect();
    let watcher = other.clone();
    front.append(other);
    assert_eq!(collect(&front), [1, 2, 3, 4, 9, 9]);
    assert_eq!(collect(&watcher), [9, 9], "The watcher's chain should be untouched.");

    let mut empty = LinkedList::new();
    empty.append(front);
    assert_eq!(collect(&empty), [1, 2, 3, 4, 9, 9], "Appending onto empty should adopt the chain.");
    empty.buf.verify_double_links();
}

#[test]
fn test_cow_clone_isolation() {
    let mut original: LinkedList<_> = [1, 2, 3].into_iter().collect();
    let mut copy = original.clone();
    assert!(original.shares_storage_with(&copy));

    copy.push_back(4);
    assert!(!original.shares_storage_with(&copy));
    assert_eq!(collect(&original), [1, 2, 3]);
    assert_eq!(collect(&copy), [1, 2, 3, 4]);

    let copy2 = original.clone();
    original.push_front(0);
    *original.get_mut(1) += 10;
    original.remove(2);
    assert_eq!(collect(&copy2), [1, 2, 3]);
    assert_eq!(collect(&original), [0, 11, 3]);
    original.buf.verify_double_links();
    copy2.buf.verify_double_links();
}

#[test]
fn test_deep_copy_shares_no_nodes() {
    let original: LinkedList<_> = (0..8).collect();
    let mut copy = original.clone();
    copy.push_front(-1); // Force the deep copy.

    let mut original_nodes = Vec::new();
    let mut curr = original.buf.contents().map(|c| c.head);
    while let Some(ptr) = curr {
        original_nodes.push(ptr.as_ptr());
        curr = *ptr.next();
    }

    let mut curr = copy.buf.contents().map(|c| c.head);
    while let Some(ptr) = curr {
        assert!(
            !original_nodes.contains(&ptr.as_ptr()),
            "A deep copy should not share any node with the original chain."
        );
        curr = *ptr.next();
    }
    copy.buf.verify_double_links();
}

#[test]
fn test_drop_accounting() {
    let counter = CountedDrop::new(0);

    let list: LinkedList<_> = (0..5).map(|_| counter.clone()).collect();
    assert_eq!(*counter.borrow(), 0);
    drop(list);
    assert_eq!(*counter.borrow(), 5, "Every node's value should drop exactly once.");

    counter.replace(0);
    let original: LinkedList<_> = (0..3).map(|_| counter.clone()).collect();
    let mut copy = original.clone();
    copy.pop_back();
    drop(copy);
    assert_eq!(
        *counter.borrow(),
        3,
        "The clone's chain should drop independently (3 copied, one of them popped)."
    );
    drop(original);
    assert_eq!(*counter.borrow(), 6);
}

#[test]
fn test_long_list_drop_does_not_overflow_stack() {
    let list: LinkedList<_> = (0..100_000).collect();
    assert_eq!(list.len(), 100_000);
    drop(list);
}

#[test]
fn test_double_ended_iteration() {
    let list: LinkedList<_> = (0..5).collect();
    assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), [4, 3, 2, 1, 0]);

    let mut iter = list.iter();
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&4));
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&3));
    assert_eq!(iter.next(), Some(&2));
    assert_eq!(iter.next(), None, "Meeting iterator ends should terminate.");
    assert_eq!(iter.next_back(), None);
}

#[test]
fn test_cursor_traversal() {
    let list: LinkedList<_> = [10, 20, 30].into_iter().collect();
    let mut cursor = list.cursor_front();

    assert_eq!(cursor.index(), Some(0));
    assert_eq!(cursor.read(), Some(&10));
    assert!(cursor.move_next());
    assert_eq!(cursor.read(), Some(&20));
    assert!(cursor.move_next());
    assert_eq!(cursor.read(), Some(&30));
    assert!(!cursor.move_next(), "Stepping past the tail should park in the end gap.");
    assert_eq!(cursor.read(), None);
    assert_eq!(cursor.index(), None);

    assert!(cursor.move_prev());
    assert_eq!(cursor.read(), Some(&30));
    assert_eq!(cursor.index(), Some(2));

    *cursor.read_mut().unwrap() += 1;
    let list = cursor.into_list();
    assert_eq!(collect(&list), [10, 20, 31]);
}

#[test]
fn test_cursor_back_and_empty() {
    let list: LinkedList<_> = [1, 2, 3].into_iter().collect();
    let mut cursor = list.cursor_back();
    assert_eq!(cursor.read(), Some(&3));
    assert_eq!(cursor.index(), Some(2));
    assert!(cursor.move_prev());
    assert_eq!(cursor.read(), Some(&2));

    let empty: LinkedList<u8> = LinkedList::new();
    let mut cursor = empty.cursor_front();
    assert_eq!(cursor.read(), None);
    assert!(!cursor.move_next());
    assert!(!cursor.move_prev());
    assert_eq!(cursor.remove(), None);
    cursor.insert_after(7);
    assert_eq!(cursor.read(), Some(&7), "Inserting into empty should park on the element.");
    assert_eq!(collect(&cursor.into_list()), [7]);
}

#[test]
fn test_cursor_splicing() {
    let list: LinkedList<_> = [1, 4].into_iter().collect();
    let mut cursor = list.cursor_front();

    cursor.insert_after(2);
    assert_eq!(cursor.read(), Some(&1), "insert_after should not move the cursor.");
    cursor.move_next();
    cursor.insert_after(3);
    assert_eq!(collect(&cursor.into_list()), [1, 2, 3, 4]);

    let list: LinkedList<_> = [2, 3].into_iter().collect();
    let mut cursor = list.cursor_front();
    cursor.insert_before(1);
    assert_eq!(
        cursor.index(),
        Some(1),
        "insert_before should keep the cursor on its element, one index later."
    );
    cursor.insert_before(0);
    let rebuilt = cursor.into_list();
    assert_eq!(collect(&rebuilt), [1, 0, 2, 3]);
    rebuilt.buf.verify_double_links();
}

#[test]
fn test_cursor_remove() {
    let list: LinkedList<_> = [1, 2, 3, 4].into_iter().collect();
    let mut cursor = list.cursor_front();
    cursor.move_next();

    assert_eq!(cursor.remove(), Some(2));
    assert_eq!(cursor.read(), Some(&3), "Removal should park on the following element.");
    assert_eq!(cursor.index(), Some(1));

    cursor.move_next();
    assert_eq!(cursor.remove(), Some(4), "Removing the tail should park in the end gap.");
    assert_eq!(cursor.read(), None);

    let list = cursor.into_list();
    assert_eq!(collect(&list), [1, 3]);
    list.buf.verify_double_links();
}

#[test]
fn test_cursor_consumes_shared_storage_safely() {
    let original: LinkedList<_> = [1, 2, 3].into_iter().collect();
    let shared = original.clone();

    let mut cursor = shared.cursor_front();
    assert_eq!(cursor.remove(), Some(1));
    let modified = cursor.into_list();

    assert_eq!(collect(&original), [1, 2, 3], "Cursor mutation must not leak into other owners.");
    assert_eq!(collect(&modified), [2, 3]);
}

#[test]
fn test_cursor_drop_does_not_leak() {
    let counter = CountedDrop::new(0);
    let list: LinkedList<_> = (0..4).map(|_| counter.clone()).collect();
    let mut cursor = list.cursor_front();
    cursor.move_next();
    drop(cursor);
    assert_eq!(*counter.borrow(), 4, "Dropping a cursor should drop the whole chain.");
}

#[test]
fn test_end_to_end_scenario() {
    let mut list = LinkedList::new();
    list.push_back(1);
    list.push_back(2);
    list.push_back(3);
    assert_eq!(collect(&list), [1, 2, 3]);
    assert_eq!(list.len(), 3);

    let mut copy = list.clone();
    copy.push_back(4);
    assert_eq!(collect(&list), [1, 2, 3]);
    assert_eq!(collect(&copy), [1, 2, 3, 4]);
}

#[test]
fn test_display() {
    let list: LinkedList<_> = [1, 2, 3].into_iter().collect();
    assert_eq!(format!("{list}"), "(1) <-> (2) <-> (3)");
    assert_eq!(format!("{}", LinkedList::<u8>::new()), "()");
}
