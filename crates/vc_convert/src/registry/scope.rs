use core::cell::Cell;
use core::ptr::NonNull;

use crate::registry::ConversionRegistry;

// -----------------------------------------------------------------------------
// Current registry

thread_local! {
    /// The registry running the innermost conversion on this thread.
    static CURRENT: Cell<Option<NonNull<ConversionRegistry>>> = const { Cell::new(None) };
}

/// Restores the previous current registry, also when unwinding.
struct Restore(Option<NonNull<ConversionRegistry>>);

impl Drop for Restore {
    #[inline]
    fn drop(&mut self) {
        CURRENT.set(self.0);
    }
}

impl ConversionRegistry {
    /// Runs `f` with `self` as the registry of nested conversions on this thread.
    pub(crate) fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
        let _restore = Restore(CURRENT.replace(Some(NonNull::from(self))));
        f()
    }
}

/// Calls `f` with the registry of the enclosing conversion, or the
/// [global](ConversionRegistry::global) one outside of any conversion.
#[expect(unsafe_code, reason = "dereference of the scoped registry pointer")]
pub(crate) fn with_current<R>(f: impl FnOnce(&ConversionRegistry) -> R) -> R {
    match CURRENT.get() {
        // SAFETY: Only `enter` stores a pointer, and it borrows that registry
        // for the whole call to its closure and restores the previous value
        // before returning or unwinding. Every read here happens inside such
        // a call, so the registry is alive and only shared-borrowed.
        Some(current) => f(unsafe { current.as_ref() }),
        None => f(ConversionRegistry::global()),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{CURRENT, with_current};
    use crate::registry::ConversionRegistry;

    #[test]
    fn enter_nests_and_restores() {
        let outer = ConversionRegistry::empty();
        let inner = ConversionRegistry::empty();
        assert!(CURRENT.get().is_none());

        outer.enter(|| {
            with_current(|current| assert!(core::ptr::eq(current, &outer)));
            inner.enter(|| {
                with_current(|current| assert!(core::ptr::eq(current, &inner)));
            });
            with_current(|current| assert!(core::ptr::eq(current, &outer)));
        });

        assert!(CURRENT.get().is_none());
    }

    #[test]
    fn restores_after_panic() {
        let registry = ConversionRegistry::empty();
        let result = std::panic::catch_unwind(core::panic::AssertUnwindSafe(|| {
            registry.enter(|| panic!("hook failed"));
        }));
        assert!(result.is_err());
        assert!(CURRENT.get().is_none());
    }

    #[test]
    fn falls_back_to_global() {
        with_current(|current| {
            assert!(core::ptr::eq(current, ConversionRegistry::global()));
        });
    }
}
