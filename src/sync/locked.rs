use std::cell::UnsafeCell;
use std::fmt::{self, Debug, Formatter};
use std::hint;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError, TryLockError};

use derive_more::IsVariant;

/// The lock flavor backing a [`Locked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IsVariant)]
pub enum LockKind {
    /// The platform mutex. The right default: the thread sleeps under contention.
    #[default]
    Mutex,
    /// A raw spin lock. Only worth it when critical sections are tiny and contention is rare.
    Spin,
}

/// A mutual-exclusion wrapper serializing access to one value.
///
/// The flavor is chosen at construction via [`LockKind`] and can't change afterwards. Access
/// goes through closures ([`with_lock`](Locked::with_lock)) rather than guards, so the lock is
/// always released when the closure returns. Mutex poisoning is ignored: a panic in another
/// thread's closure doesn't make the value unreachable, because this wrapper promises
/// serialized access and nothing more.
pub struct Locked<T> {
    inner: Inner<T>,
}

enum Inner<T> {
    Mutex(Mutex<T>),
    Spin(SpinLock<T>),
}

impl<T> Locked<T> {
    pub fn new(value: T, kind: LockKind) -> Locked<T> {
        Locked {
            inner: match kind {
                LockKind::Mutex => Inner::Mutex(Mutex::new(value)),
                LockKind::Spin => Inner::Spin(SpinLock::new(value)),
            },
        }
    }

    pub fn kind(&self) -> LockKind {
        match self.inner {
            Inner::Mutex(_) => LockKind::Mutex,
            Inner::Spin(_) => LockKind::Spin,
        }
    }

    /// Locks, runs `f` on the value, unlocks, and returns `f`'s result. Blocks while another
    /// thread holds the lock.
    pub fn with_lock<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        match &self.inner {
            Inner::Mutex(mutex) => {
                let mut guard = mutex.lock().unwrap_or_else(PoisonError::into_inner);
                f(&mut guard)
            },
            Inner::Spin(spin) => {
                let mut guard = spin.lock();
                f(guard.value_mut())
            },
        }
    }

    /// Like [`with_lock`](Locked::with_lock), but returns `None` instead of blocking when the
    /// lock is contended.
    pub fn try_with_lock<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        match &self.inner {
            Inner::Mutex(mutex) => match mutex.try_lock() {
                Ok(mut guard) => Some(f(&mut guard)),
                Err(TryLockError::Poisoned(poisoned)) => Some(f(&mut poisoned.into_inner())),
                Err(TryLockError::WouldBlock) => None,
            },
            Inner::Spin(spin) => {
                let mut guard = spin.try_lock()?;
                Some(f(guard.value_mut()))
            },
        }
    }

    /// Direct access without locking; exclusive borrowing makes contention impossible.
    pub fn get_mut(&mut self) -> &mut T {
        match &mut self.inner {
            Inner::Mutex(mutex) => mutex.get_mut().unwrap_or_else(PoisonError::into_inner),
            Inner::Spin(spin) => spin.value.get_mut(),
        }
    }

    pub fn into_inner(self) -> T {
        match self.inner {
            Inner::Mutex(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Inner::Spin(spin) => spin.value.into_inner(),
        }
    }
}

impl<T: Default> Default for Locked<T> {
    fn default() -> Self {
        Locked::new(T::default(), LockKind::default())
    }
}

impl<T: Debug> Debug for Locked<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut state = f.debug_struct("Locked");
        state.field("kind", &self.kind());
        match self.try_with_lock(|value| format!("{value:?}")) {
            Some(value) => state.field("value", &crate::util::fmt::DebugRaw(value)),
            None => state.field("value", &crate::util::fmt::DebugRaw("<locked>".to_string())),
        };
        state.finish()
    }
}

struct SpinLock<T> {
    locked: AtomicBool,
    value: UnsafeCell<T>,
}

// SAFETY: The atomic flag guarantees at most one thread observes the value at a time, so the
// cell is safe to share exactly when T itself can move between threads.
unsafe impl<T: Send> Send for SpinLock<T> {}
// SAFETY: As above; &SpinLock only yields the value through the flag.
unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    fn new(value: T) -> SpinLock<T> {
        SpinLock {
            locked: AtomicBool::new(false),
            value: UnsafeCell::new(value),
        }
    }

    fn lock(&self) -> SpinGuard<'_, T> {
        loop {
            if let Some(guard) = self.try_lock() {
                return guard;
            }
            // Spin on a plain load to stay out of the cache line's way until it looks free.
            while self.locked.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
        }
    }

    fn try_lock(&self) -> Option<SpinGuard<'_, T>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
            .then_some(SpinGuard { lock: self })
    }
}

/// Releases on drop, so a panicking closure can't wedge the lock.
struct SpinGuard<'a, T> {
    lock: &'a SpinLock<T>,
}

impl<T> SpinGuard<'_, T> {
    fn value_mut(&mut self) -> &mut T {
        // SAFETY: The guard holds the flag, so no other thread can reach the cell, and the
        // borrow of self prevents a second reference through this guard.
        unsafe { &mut *self.lock.value.get() }
    }
}

impl<T> Drop for SpinGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}
