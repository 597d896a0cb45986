use std::cell::RefCell;
use std::rc::Rc;

use strand::{Handle, Runtime, Task, sequence, time};

type Log = Rc<RefCell<Vec<String>>>;
type StepFn = Box<dyn FnOnce() -> Task<String, String>>;

/// Builds a step that narrates its start and settles after `ticks`.
fn step(handle: &Handle, log: &Log, n: u32, ticks: u64, succeed: bool) -> StepFn {
    let handle = handle.clone();
    let log = log.clone();

    Box::new(move || {
        log.borrow_mut().push(format!("start-{n}"));
        let outcome = if succeed {
            Ok(format!("Task {n} completed"))
        } else {
            Err(format!("Task {n} failed"))
        };

        time::delay(&handle, ticks, outcome).inspect(move |outcome| {
            let line = match outcome {
                Ok(_) => format!("complete-{n}"),
                Err(_) => format!("fail-{n}"),
            };
            log.borrow_mut().push(line);
        })
    })
}

#[test]
fn test_serial_order_is_deterministic() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let log: Log = Rc::default();

    let chain = sequence(
        &handle,
        vec![step(&handle, &log, 1, 3, true), step(&handle, &log, 2, 1, true)],
    );

    let done = log.clone();
    chain.subscribe(
        move |_| done.borrow_mut().push("both-complete".into()),
        |_| {},
    );

    runtime.run().unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["start-1", "complete-1", "start-2", "complete-2", "both-complete"]
    );
    assert_eq!(runtime.now(), 4);
}

#[test]
fn test_result_is_last_value() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let log: Log = Rc::default();

    let chain = sequence(
        &handle,
        vec![step(&handle, &log, 1, 3, true), step(&handle, &log, 2, 1, true)],
    );

    assert_eq!(
        runtime.block_on(chain),
        Ok(Ok(Some("Task 2 completed".to_string())))
    );
}

#[test]
fn test_second_step_failure_rejects_chain() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let log: Log = Rc::default();

    let chain = sequence(
        &handle,
        vec![step(&handle, &log, 1, 3, true), step(&handle, &log, 2, 1, false)],
    );

    assert_eq!(
        runtime.block_on(chain),
        Ok(Err("Task 2 failed".to_string()))
    );
    assert_eq!(
        *log.borrow(),
        vec!["start-1", "complete-1", "start-2", "fail-2"]
    );
}

#[test]
fn test_first_step_failure_never_starts_second() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let log: Log = Rc::default();

    let chain = sequence(
        &handle,
        vec![step(&handle, &log, 1, 3, false), step(&handle, &log, 2, 1, true)],
    );

    assert_eq!(
        runtime.block_on(chain),
        Ok(Err("Task 1 failed".to_string()))
    );
    runtime.run().unwrap();

    assert_eq!(*log.borrow(), vec!["start-1", "fail-1"]);
    assert_eq!(runtime.now(), 3);
}

#[test]
fn test_empty_sequence_fulfills_with_none() {
    let runtime = Runtime::new();
    let handle = runtime.handle();

    let chain = sequence(&handle, Vec::<StepFn>::new());

    assert_eq!(runtime.block_on(chain), Ok(Ok(None)));
    assert_eq!(runtime.now(), 0);
}

#[test]
fn test_long_sequence_does_not_overflow() {
    let runtime = Runtime::new();
    let handle = runtime.handle();

    let source = handle.clone();
    let steps = (0..50_000u32).map(move |n| {
        let handle = source.clone();
        move || Task::<u32, ()>::fulfilled(&handle, n)
    });

    assert_eq!(runtime.block_on(sequence(&handle, steps)), Ok(Ok(Some(49_999))));
}
