//! Integration tests for Atom.

use std::sync::{Arc, Mutex};

use persistent_runtime::prelude::*;
use rstest::{fixture, rstest};

#[fixture]
fn runtime() -> Runtime {
    Runtime::new()
}

fn plus() -> Value {
    Value::function("+", |_, args| {
        Ok(Value::from(args.iter().filter_map(Value::as_integer).sum::<i64>()))
    })
}

fn non_negative() -> Value {
    Value::function("non-negative?", |_, args| {
        Ok(Value::from(args[0].as_integer().is_some_and(|n| n >= 0)))
    })
}

#[rstest]
fn test_swap_passes_extra_arguments(runtime: Runtime) {
    let atom = Value::atom(Value::from(1));
    let result = runtime.swap(&atom, &plus(), &[Value::from(10), Value::from(100)]).unwrap();
    assert_eq!(result, Value::from(111));
    assert_eq!(runtime.deref(&atom).unwrap(), Value::from(111));
}

#[rstest]
fn test_reset_returns_new_value(runtime: Runtime) {
    let atom = Value::atom(Value::Nil);
    assert_eq!(runtime.reset(&atom, Value::from("x")).unwrap(), Value::from("x"));
    assert_eq!(runtime.deref(&atom).unwrap(), Value::from("x"));
}

#[rstest]
fn test_reset_on_non_atom_fails(runtime: Runtime) {
    assert!(matches!(
        runtime.reset(&Value::from(1), Value::Nil),
        Err(RuntimeError::InvalidArgument { operation: "reset", .. })
    ));
}

#[rstest]
fn test_validator_rejection_keeps_state(runtime: Runtime) {
    let atom = Value::atom(Value::from(0));
    atom.as_atom().unwrap().set_validator(&runtime, non_negative()).unwrap();
    let error = runtime.swap(&atom, &plus(), &[Value::from(-1)]).unwrap_err();
    assert_eq!(error, RuntimeError::ValidationRejected { value: "-1".to_string() });
    assert_eq!(error.to_string(), "Validator rejected reference state -1");
    assert_eq!(runtime.deref(&atom).unwrap(), Value::from(0));

    atom.as_atom().unwrap().clear_validator();
    assert_eq!(runtime.reset(&atom, Value::from(-1)).unwrap(), Value::from(-1));
}

#[rstest]
fn test_watches_see_old_and_new(runtime: Runtime) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let watch = Value::function("log", move |_, args| {
        log.lock().unwrap().push((args[0].clone(), args[2].clone(), args[3].clone()));
        Ok(Value::Nil)
    });
    let atom = Value::atom(Value::from(1));
    let cell = atom.as_atom().unwrap();
    cell.add_watch(Value::keyword("log"), watch);

    runtime.reset(&atom, Value::from(2)).unwrap();
    runtime.swap(&atom, &plus(), &[Value::from(3)]).unwrap();
    cell.remove_watch(&Value::keyword("log"));
    runtime.reset(&atom, Value::from(0)).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (Value::keyword("log"), Value::from(1), Value::from(2)),
            (Value::keyword("log"), Value::from(2), Value::from(5)),
        ]
    );
}

#[rstest]
fn test_watch_receives_the_atom_itself(runtime: Runtime) {
    let atom = Value::atom(Value::from(0));
    let observed = Arc::new(Mutex::new(Value::Nil));
    let slot = Arc::clone(&observed);
    atom.as_atom().unwrap().add_watch(
        Value::from("k"),
        Value::function("capture", move |_, args| {
            *slot.lock().unwrap() = args[1].clone();
            Ok(Value::Nil)
        }),
    );
    runtime.reset(&atom, Value::from(1)).unwrap();
    assert_eq!(*observed.lock().unwrap(), atom);
}

#[rstest]
fn test_compare_and_set(runtime: Runtime) {
    let atom = Value::atom(Value::from(1));
    let cell = atom.as_atom().unwrap();
    assert!(!cell.compare_and_set(&runtime, &Value::from(2), Value::from(3)).unwrap());
    assert!(cell.compare_and_set(&runtime, &Value::from(1.0), Value::from(3)).unwrap());
    assert_eq!(cell.deref(), Value::from(3));
}

#[rstest]
fn test_concurrent_swaps_lose_no_updates() {
    let atom = Value::atom(Value::from(0));
    let threads = 8;
    let increments = 250;
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let atom = atom.clone();
            std::thread::spawn(move || {
                let runtime = Runtime::new();
                for _ in 0..increments {
                    runtime.swap(&atom, &plus(), &[Value::from(1)]).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(Runtime::new().deref(&atom).unwrap(), Value::from(threads * increments));
}

#[rstest]
fn test_pr_str_of_atom(runtime: Runtime) {
    let atom = Value::atom(Value::vector([Value::from(1)]));
    assert_eq!(runtime.pr_str(&atom).unwrap(), "#<Atom: [1]>");
}
