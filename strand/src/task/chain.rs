use super::Task;

impl<T, E> Task<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Returns a task fulfilled with `f(value)` once this task fulfills.
    ///
    /// A rejection passes through unchanged.
    pub fn map<U, F>(&self, f: F) -> Task<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> U + 'static,
    {
        let derived = Task::pending(self.handle());
        let settler = derived.settler();

        self.react(move |outcome| {
            settler.settle(outcome.map(f));
        });

        derived
    }

    /// Returns a task rejected with `f(error)` if this task rejects.
    pub fn map_err<E2, F>(&self, f: F) -> Task<T, E2>
    where
        E2: Clone + 'static,
        F: FnOnce(E) -> E2 + 'static,
    {
        let derived = Task::pending(self.handle());
        let settler = derived.settler();

        self.react(move |outcome| {
            settler.settle(outcome.map_err(f));
        });

        derived
    }

    /// Starts the task produced by `f` once this task fulfills, and
    /// settles with its outcome.
    ///
    /// If this task rejects, `f` is never called and the error is
    /// propagated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strand::{Runtime, Task, time};
    ///
    /// let runtime = Runtime::new();
    /// let handle = runtime.handle();
    ///
    /// let chained = time::delay::<u32, String>(&handle, 3, Ok(1))
    ///     .and_then(move |n| time::delay(&handle, 1, Ok(n + 1)));
    ///
    /// assert_eq!(runtime.block_on(chained), Ok(Ok(2)));
    /// assert_eq!(runtime.now(), 4);
    /// ```
    pub fn and_then<U, F>(&self, f: F) -> Task<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> Task<U, E> + 'static,
    {
        let derived = Task::pending(self.handle());
        let settler = derived.settler();

        self.react(move |outcome| match outcome {
            Ok(value) => f(value).react(move |next| {
                settler.settle(next);
            }),
            Err(error) => {
                settler.reject(error);
            }
        });

        derived
    }

    /// Recovers from a rejection with the task produced by `f`.
    ///
    /// A fulfillment passes through unchanged and `f` is never called.
    pub fn or_else<E2, F>(&self, f: F) -> Task<T, E2>
    where
        E2: Clone + 'static,
        F: FnOnce(E) -> Task<T, E2> + 'static,
    {
        let derived = Task::pending(self.handle());
        let settler = derived.settler();

        self.react(move |outcome| match outcome {
            Ok(value) => {
                settler.resolve(value);
            }
            Err(error) => f(error).react(move |next| {
                settler.settle(next);
            }),
        });

        derived
    }

    /// Runs `f` with a reference to the outcome, then settles with the
    /// same outcome.
    pub fn inspect<F>(&self, f: F) -> Task<T, E>
    where
        F: FnOnce(&Result<T, E>) + 'static,
    {
        let derived = Task::pending(self.handle());
        let settler = derived.settler();

        self.react(move |outcome| {
            f(&outcome);
            settler.settle(outcome);
        });

        derived
    }
}
