//! Integration tests for seqs, lazy seqs and the sequence library.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use persistent_runtime::prelude::*;
use rstest::{fixture, rstest};

#[fixture]
fn runtime() -> Runtime {
    Runtime::new()
}

fn counting(calls: &Arc<AtomicUsize>) -> Value {
    let calls = Arc::clone(calls);
    Value::function("inc", move |_, args| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::from(args[0].as_integer().unwrap_or_default() + 1))
    })
}

// =============================================================================
// Seq construction
// =============================================================================

#[rstest]
#[case(Value::Nil)]
#[case(Value::empty_list())]
#[case(Value::empty_vector())]
#[case(Value::empty_map())]
#[case(Value::empty_hash_map())]
#[case(Value::empty_set())]
#[case(Value::empty_queue())]
#[case(Value::string(""))]
#[case(Value::bytes(&[]))]
fn test_seq_of_empty_is_nil(runtime: Runtime, #[case] coll: Value) {
    assert!(runtime.seq(&coll).unwrap().is_nil());
    assert!(runtime.first(&coll).unwrap().is_nil());
    assert_eq!(runtime.rest(&coll).unwrap(), Value::empty_list());
}

#[rstest]
fn test_map_seqs_into_entries(runtime: Runtime) {
    let map = Value::map([(Value::keyword("a"), Value::from(1))]);
    let entry = runtime.first(&map).unwrap();
    assert_eq!(entry, Value::vector([Value::keyword("a"), Value::from(1)]));
    assert_eq!(runtime.keys(&map).unwrap(), Value::list([Value::keyword("a")]));
    assert_eq!(runtime.vals(&map).unwrap(), Value::list([Value::from(1)]));
    assert!(runtime.keys(&Value::empty_map()).unwrap().is_nil());
}

#[rstest]
fn test_next_is_seq_of_rest(runtime: Runtime) {
    let vector = Value::vector([1, 2].map(Value::from));
    assert_eq!(runtime.next(&vector).unwrap(), Value::list([Value::from(2)]));
    assert!(runtime.next(&runtime.next(&vector).unwrap()).unwrap().is_nil());
}

#[rstest]
fn test_cons_never_touches_its_tail(runtime: Runtime) {
    let vector = Value::vector([1, 2].map(Value::from));
    let consed = runtime.cons(Value::from(0), &vector);
    assert!(matches!(consed, Value::Cons(_)));
    assert_eq!(consed, Value::list([0, 1, 2].map(Value::from)));
    assert_eq!(vector, Value::vector([1, 2].map(Value::from)));
    assert!(matches!(runtime.cons(Value::from(0), &Value::empty_list()), Value::List(_)));
}

// =============================================================================
// Laziness
// =============================================================================

#[rstest]
fn test_map_is_lazy_and_memoized(runtime: Runtime) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mapped = runtime.map(&counting(&calls), &Value::range(0, 100, 1).unwrap());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let head = runtime.take(3, &mapped);
    assert_eq!(runtime.to_vec(&head).unwrap(), vec![1, 2, 3].into_iter().map(Value::from).collect::<Vec<_>>());
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    runtime.to_vec(&head).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[rstest]
fn test_filter_over_infinite_seq(runtime: Runtime) {
    let calls = Arc::new(AtomicUsize::new(0));
    let naturals = runtime.iterate(&counting(&calls), Value::from(0));
    let even = Value::function("even?", |_, args| {
        Ok(Value::from(args[0].as_integer().is_some_and(|n| n % 2 == 0)))
    });
    let evens = runtime.take(4, &runtime.filter(&even, &naturals));
    assert_eq!(evens, Value::list([0, 2, 4, 6].map(Value::from)));
}

#[rstest]
fn test_failed_producer_error_is_cached(runtime: Runtime) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let failing = Value::lazy_seq(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(RuntimeError::invalid_argument("producer", "exhausted"))
    });
    let first = runtime.first(&failing).unwrap_err();
    let second = runtime.count(&failing).unwrap_err();
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_concurrent_observers_share_one_realization() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let lazy = Value::lazy_seq(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(5));
        Ok(Value::list([Value::from(1)]))
    });
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let lazy = lazy.clone();
            std::thread::spawn(move || Runtime::new().first(&lazy).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Value::from(1));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_long_lazy_chain_walks_and_drops(runtime: Runtime) {
    let mapped = runtime.map(
        &Value::function("identity", |_, args| Ok(args[0].clone())),
        &Value::range(0, 100_000, 1).unwrap(),
    );
    assert_eq!(runtime.count(&mapped).unwrap(), 100_000);
    drop(mapped);
}

// =============================================================================
// Eager library
// =============================================================================

#[rstest]
fn test_into_and_reverse(runtime: Runtime) {
    let source = Value::list([1, 2, 3].map(Value::from));
    let vector = Runtime::into(&runtime, &Value::empty_vector(), &source).unwrap();
    assert_eq!(vector, Value::vector([1, 2, 3].map(Value::from)));
    assert!(matches!(vector, Value::Vector(_)));
    let list = Runtime::into(&runtime, &Value::empty_list(), &source).unwrap();
    assert_eq!(list, Value::list([3, 2, 1].map(Value::from)));
    assert_eq!(runtime.reverse(&vector).unwrap(), list);
}

#[rstest]
fn test_concat_and_drop(runtime: Runtime) {
    let joined = runtime.concat(&[Value::string("ab"), Value::vector([Value::from(1)])]);
    assert_eq!(
        runtime.to_vec(&joined).unwrap(),
        vec![Value::string("a"), Value::string("b"), Value::from(1)]
    );
    assert_eq!(runtime.drop(2, &joined), Value::list([Value::from(1)]));
}

#[rstest]
fn test_reduce_semantics(runtime: Runtime) {
    let plus = Value::function("+", |_, args| {
        Ok(Value::from(args.iter().filter_map(Value::as_integer).sum::<i64>()))
    });
    assert_eq!(runtime.reduce(&Value::empty_vector(), &plus).unwrap(), Value::from(0));
    assert_eq!(runtime.reduce(&Value::vector([Value::from(7)]), &plus).unwrap(), Value::from(7));
    assert_eq!(
        runtime.reduce_with(&Value::string("abc"), &Value::function("count", |_, args| {
            Ok(Value::from(args[0].as_integer().unwrap_or_default() + 1))
        }), Value::from(0)).unwrap(),
        Value::from(3)
    );
    assert_eq!(runtime.reduce_with(&Value::Nil, &plus, Value::from(5)).unwrap(), Value::from(5));
}
