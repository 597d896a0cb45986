use std::cell::RefCell;
use std::rc::Rc;

use strand::{Runtime, Task, join_all, time};

#[test]
fn test_values_keep_input_order() {
    let runtime = Runtime::new();
    let handle = runtime.handle();

    let a = time::delay::<_, String>(&handle, 6, Ok("Task 1 completed"));
    let b = time::delay::<_, String>(&handle, 1, Ok("Task 2 completed"));

    assert_eq!(
        runtime.block_on(join_all(&handle, [a, b])),
        Ok(Ok(vec!["Task 1 completed", "Task 2 completed"]))
    );
    assert_eq!(runtime.now(), 6);
}

#[test]
fn test_fails_fast_without_cancelling() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let finished = Rc::new(RefCell::new(false));

    let flag = finished.clone();
    let a = time::delay::<&str, &str>(&handle, 5, Ok("Task 1 completed"))
        .inspect(move |_| *flag.borrow_mut() = true);
    let b = time::delay::<&str, &str>(&handle, 2, Err("Task 2 failed"));

    let all = join_all(&handle, [a.clone(), b]);

    assert_eq!(runtime.block_on(all.clone()), Ok(Err("Task 2 failed")));
    assert_eq!(runtime.now(), 2);
    assert!(!*finished.borrow());

    runtime.run().unwrap();
    assert!(*finished.borrow());
    assert_eq!(a.peek(), Some(Ok("Task 1 completed")));
    assert_eq!(all.peek(), Some(Err("Task 2 failed")));
}

#[test]
fn test_only_first_rejection_surfaces() {
    let runtime = Runtime::new();
    let handle = runtime.handle();

    let a = time::delay::<(), &str>(&handle, 4, Err("Task 1 failed"));
    let b = time::delay::<(), &str>(&handle, 1, Err("Task 2 failed"));

    let all = join_all(&handle, [a, b]);
    runtime.run().unwrap();

    assert_eq!(all.peek(), Some(Err("Task 2 failed")));
    assert!(runtime.unhandled_rejections().is_empty());
}

#[test]
fn test_already_settled_inputs() {
    let runtime = Runtime::new();
    let handle = runtime.handle();

    let inputs = (1..=3).map(|n| Task::<i32, ()>::fulfilled(&handle, n));

    assert_eq!(
        runtime.block_on(join_all(&handle, inputs)),
        Ok(Ok(vec![1, 2, 3]))
    );
}

#[test]
fn test_empty_list_fulfills_with_empty_vec() {
    let runtime = Runtime::new();
    let handle = runtime.handle();

    let all = join_all(&handle, Vec::<Task<u8, ()>>::new());

    assert_eq!(runtime.block_on(all), Ok(Ok(Vec::new())));
}
