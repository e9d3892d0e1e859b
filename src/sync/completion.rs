use std::mem;
use std::sync::{Arc, Condvar, Mutex, PoisonError};

/// A one-shot channel bridging an asynchronous unit of work back to a blocking caller.
///
/// Hand the [`Completer`] to the work and keep the [`Waiter`]; [`Waiter::wait`] blocks until
/// [`Completer::complete`] runs. There is no timeout and no cancellation. Dropping the
/// completer without completing marks the channel abandoned, and the waiter panics rather than
/// block forever - losing the completer is a programming error, not a recoverable state.
pub fn completion<T>() -> (Completer<T>, Waiter<T>) {
    let shared = Arc::new(Shared {
        state: Mutex::new(State::Pending),
        ready: Condvar::new(),
    });
    (
        Completer {
            shared: Arc::clone(&shared),
            completed: false,
        },
        Waiter { shared },
    )
}

enum State<T> {
    Pending,
    Done(T),
    Abandoned,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    ready: Condvar,
}

/// The producing half of [`completion`].
pub struct Completer<T> {
    shared: Arc<Shared<T>>,
    completed: bool,
}

impl<T> Completer<T> {
    /// Delivers the value and wakes the waiter.
    pub fn complete(mut self, value: T) {
        let mut state = self.shared.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = State::Done(value);
        self.completed = true;
        drop(state);
        self.shared.ready.notify_one();
    }
}

impl<T> Drop for Completer<T> {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        let mut state = self.shared.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = State::Abandoned;
        drop(state);
        self.shared.ready.notify_one();
    }
}

/// The consuming half of [`completion`].
pub struct Waiter<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Waiter<T> {
    /// Blocks until the completer delivers a value, then returns it.
    ///
    /// # Panics
    /// Panics if the completer was dropped without completing.
    pub fn wait(self) -> T {
        let mut state = self.shared.state.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            match mem::replace(&mut *state, State::Pending) {
                State::Pending => {
                    state = self
                        .shared
                        .ready
                        .wait(state)
                        .unwrap_or_else(PoisonError::into_inner);
                },
                State::Done(value) => return value,
                State::Abandoned => panic!("Completion abandoned without a value!"),
            }
        }
    }

    /// Returns the value if it has already been delivered, without blocking.
    ///
    /// # Panics
    /// Panics if the completer was dropped without completing.
    pub fn try_take(self) -> Result<T, Waiter<T>> {
        let mut state = self.shared.state.lock().unwrap_or_else(PoisonError::into_inner);
        match mem::replace(&mut *state, State::Pending) {
            State::Pending => {
                drop(state);
                Err(self)
            },
            State::Done(value) => Ok(value),
            State::Abandoned => panic!("Completion abandoned without a value!"),
        }
    }
}
