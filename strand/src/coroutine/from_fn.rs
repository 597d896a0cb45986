use super::{Coroutine, Resume, Step};

use std::marker::PhantomData;

/// Creates a coroutine from a closure.
///
/// The closure is called once per advance. Its suspension point lives in
/// captured state, typically an index or a small enum.
///
/// # Examples
///
/// ```rust
/// use strand::coroutine::{self, Resume, Step};
/// use strand::{Runtime, time};
///
/// let runtime = Runtime::new();
/// let handle = runtime.handle();
///
/// let task = coroutine::spawn(&handle, || {
///     let handle = handle.clone();
///     let mut total = 0;
///     coroutine::from_fn(move |input: Resume<u32, String>| match input {
///         Resume::Start => Step::Await(time::delay(&handle, 2, Ok(40))),
///         Resume::Value(n) if total == 0 => {
///             total = n;
///             Step::Await(time::delay(&handle, 1, Ok(2)))
///         }
///         Resume::Value(n) => Step::Return(total + n),
///         Resume::Error(error) => Step::Throw(error),
///     })
/// });
///
/// assert_eq!(runtime.block_on(task), Ok(Ok(42)));
/// ```
pub fn from_fn<Y, T, E, F>(f: F) -> FromFn<F, Y, T, E>
where
    F: FnMut(Resume<Y, E>) -> Step<Y, T, E>,
{
    FromFn {
        f,
        _marker: PhantomData,
    }
}

/// A coroutine backed by a closure. See [`from_fn`].
pub struct FromFn<F, Y, T, E> {
    f: F,
    _marker: PhantomData<fn(Resume<Y, E>) -> Step<Y, T, E>>,
}

impl<F, Y, T, E> Coroutine for FromFn<F, Y, T, E>
where
    F: FnMut(Resume<Y, E>) -> Step<Y, T, E>,
{
    type Yield = Y;
    type Output = T;
    type Error = E;

    fn resume(&mut self, input: Resume<Y, E>) -> Step<Y, T, E> {
        (self.f)(input)
    }
}
