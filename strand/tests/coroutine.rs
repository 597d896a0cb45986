use std::cell::RefCell;
use std::rc::Rc;

use strand::coroutine::{self, Coroutine, DriverState, Resume, Step};
use strand::{Handle, Runtime, Task, join_all, time};

type Log = Rc<RefCell<Vec<String>>>;

/// Suspension points of a two-task serial computation wrapped in a
/// failure-handling scope.
#[derive(Clone, Copy)]
enum Point {
    Start,
    AfterFirst,
    AfterSecond,
    Done,
}

/// Awaits two tasks in turn inside a "try" scope; any error injected at
/// either suspension point is caught, logged, and the computation
/// carries on after the scope.
struct GuardedSerial {
    handle: Handle,
    log: Log,
    point: Point,
    first: Result<(), String>,
    second: Result<(), String>,
}

impl GuardedSerial {
    fn after_scope(&mut self) -> Step<(), &'static str, String> {
        self.point = Point::Done;
        self.log.borrow_mut().push("after scope".into());
        Step::Return("finished")
    }
}

impl Coroutine for GuardedSerial {
    type Yield = ();
    type Output = &'static str;
    type Error = String;

    fn resume(&mut self, input: Resume<(), String>) -> Step<(), &'static str, String> {
        if let Resume::Error(error) = input {
            self.log.borrow_mut().push(format!("caught: {error}"));
            return self.after_scope();
        }

        match self.point {
            Point::Start => {
                self.point = Point::AfterFirst;
                Step::Await(time::delay(&self.handle, 3, self.first.clone()))
            }
            Point::AfterFirst => {
                self.log.borrow_mut().push("Task 1 completed".into());
                self.point = Point::AfterSecond;
                Step::Await(time::delay(&self.handle, 1, self.second.clone()))
            }
            Point::AfterSecond => {
                self.log.borrow_mut().push("Task 2 completed".into());
                self.after_scope()
            }
            Point::Done => Step::Throw("resumed after completion".into()),
        }
    }
}

fn guarded(
    runtime: &Runtime,
    first: Result<(), String>,
    second: Result<(), String>,
) -> (Task<&'static str, String>, Log) {
    let handle = runtime.handle();
    let log: Log = Rc::default();

    let task = coroutine::spawn(&handle, || GuardedSerial {
        handle: handle.clone(),
        log: log.clone(),
        point: Point::Start,
        first,
        second,
    });

    (task, log)
}

#[test]
fn test_values_resume_in_order() {
    let runtime = Runtime::new();
    let (task, log) = guarded(&runtime, Ok(()), Ok(()));

    assert_eq!(runtime.block_on(task), Ok(Ok("finished")));
    assert_eq!(
        *log.borrow(),
        vec!["Task 1 completed", "Task 2 completed", "after scope"]
    );
    assert_eq!(runtime.now(), 4);
}

#[test]
fn test_error_is_caught_at_suspension_point() {
    let runtime = Runtime::new();
    let (task, log) = guarded(&runtime, Ok(()), Err("Task 2 failed".into()));

    assert_eq!(runtime.block_on(task), Ok(Ok("finished")));
    assert_eq!(
        *log.borrow(),
        vec!["Task 1 completed", "caught: Task 2 failed", "after scope"]
    );
}

#[test]
fn test_first_failure_skips_rest_of_scope() {
    let runtime = Runtime::new();
    let (task, log) = guarded(&runtime, Err("Task 1 failed".into()), Ok(()));

    assert_eq!(runtime.block_on(task), Ok(Ok("finished")));
    runtime.run().unwrap();

    assert_eq!(*log.borrow(), vec!["caught: Task 1 failed", "after scope"]);
    assert_eq!(runtime.now(), 3);
}

#[test]
fn test_unhandled_error_rejects_once() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let failures = Rc::new(RefCell::new(Vec::new()));

    let driven = coroutine::drive(&handle, || {
        let handle = handle.clone();
        coroutine::from_fn(move |input: Resume<u32, String>| match input.into_result() {
            Ok(None) => Step::Await(time::delay(&handle, 2, Err("Task 1 failed".into()))),
            Ok(Some(n)) => Step::Return(n),
            Err(error) => Step::Throw(error),
        })
    });

    let sink = failures.clone();
    driven
        .task()
        .subscribe(|_| panic!("should fail"), move |e| sink.borrow_mut().push(e));

    runtime.run().unwrap();

    assert_eq!(*failures.borrow(), vec!["Task 1 failed".to_string()]);
    assert_eq!(driven.state(), DriverState::Failed);
}

#[test]
fn test_awaits_parallel_join() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let log: Log = Rc::default();

    let task = coroutine::spawn(&handle, || {
        let handle = handle.clone();
        let log = log.clone();
        coroutine::from_fn(move |input: Resume<Vec<String>, String>| match input {
            Resume::Start => {
                let a = time::delay(&handle, 7, Ok("Task 1 completed".to_string()));
                let b = time::delay(&handle, 5, Ok("Task 2 completed".to_string()));
                Step::Await(join_all(&handle, [a, b]))
            }
            Resume::Value(messages) => {
                log.borrow_mut().extend(messages);
                log.borrow_mut().push("All tasks completed".into());
                Step::Return(())
            }
            Resume::Error(error) => Step::Throw(error),
        })
    });

    assert_eq!(runtime.block_on(task), Ok(Ok(())));
    assert_eq!(
        *log.borrow(),
        vec!["Task 1 completed", "Task 2 completed", "All tasks completed"]
    );
    assert_eq!(runtime.now(), 7);
}

#[test]
fn test_only_one_task_awaited_at_a_time() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let started = Rc::new(RefCell::new(Vec::new()));

    let task = coroutine::spawn(&handle, || {
        let handle = handle.clone();
        let started = started.clone();
        let mut index = 0u64;
        coroutine::from_fn(move |input: Resume<(), ()>| {
            if let Resume::Error(()) = input {
                return Step::Throw(());
            }

            index += 1;
            if index > 3 {
                return Step::Return(index - 1);
            }

            started.borrow_mut().push((index, handle.now()));
            Step::Await(time::sleep(&handle, index))
        })
    });

    assert_eq!(runtime.block_on(task), Ok(Ok(3)));
    assert_eq!(*started.borrow(), vec![(1, 0), (2, 1), (3, 3)]);
}
