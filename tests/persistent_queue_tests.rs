//! Unit tests for PersistentQueue.

use persistent_runtime::persistent::PersistentQueue;
use rstest::rstest;

fn contents(queue: &PersistentQueue<i64>) -> Vec<i64> {
    queue.iter().copied().collect()
}

#[rstest]
fn test_first_conj_lands_in_front() {
    let queue = PersistentQueue::new().conj(1_i64);
    assert_eq!(queue.front().len(), 1);
    assert!(queue.rear().is_empty());
    assert_eq!(queue.peek(), Some(&1));
}

#[rstest]
fn test_later_conj_lands_in_rear() {
    let queue = PersistentQueue::new().conj(1_i64).conj(2).conj(3);
    assert_eq!(queue.front().len(), 1);
    assert_eq!(queue.rear().len(), 2);
    assert_eq!(contents(&queue), vec![1, 2, 3]);
}

#[rstest]
fn test_pop_is_fifo() {
    let queue: PersistentQueue<i64> = (1..=4).collect();
    let mut drained = Vec::new();
    let mut current = queue.clone();
    while let Some(head) = current.peek() {
        drained.push(*head);
        current = current.pop();
    }
    assert_eq!(drained, vec![1, 2, 3, 4]);
    assert_eq!(queue.len(), 4);
}

#[rstest]
fn test_pop_of_single_front_moves_rear_forward() {
    let queue = PersistentQueue::new().conj(1_i64).conj(2).conj(3);
    let popped = queue.pop();
    assert_eq!(popped.front().len(), 2);
    assert!(popped.rear().is_empty());
    assert_eq!(popped.peek(), Some(&2));
}

#[rstest]
fn test_pop_of_empty_queue_is_empty_queue() {
    let queue: PersistentQueue<i64> = PersistentQueue::new();
    assert!(queue.pop().is_empty());
    assert_eq!(queue.peek(), None);
}

#[rstest]
fn test_interleaved_operations_keep_order() {
    let queue = PersistentQueue::new().conj(1_i64).conj(2).pop().conj(3).conj(4).pop();
    assert_eq!(contents(&queue), vec![3, 4]);
    assert_eq!(queue.len(), 2);
}
