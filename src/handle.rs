//! Owned resolver state.

use crate::error::Result;
use crate::provider::ResolverStateProvider;
use crate::state::ResState;

/// A [`ResState`] initialized on construction and closed on drop.
///
/// The state is boxed so its address stays fixed: the libc keeps pointers
/// into the structure (`dnsrch` into `defdname`), and native providers may
/// hold sockets keyed to it.
///
/// # Example
///
/// ```rust,ignore
/// use resolv_compat::{ResolverState, system};
///
/// let state = ResolverState::init(system())?;
/// call_res_nsearch(state.as_mut_ptr());
/// // `res_nclose` runs when `state` is dropped.
/// ```
pub struct ResolverState<P: ResolverStateProvider> {
    state: Box<ResState>,
    provider: P,
}

impl<P: ResolverStateProvider> ResolverState<P> {
    /// Allocates a zeroed state and initializes it with `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolvError::Init`](crate::ResolvError::Init) if the
    /// provider's initializer fails. The state is then dropped without
    /// `nclose`: the legacy adapter has nothing to release, and glibc's
    /// `res_nclose` on a handle whose init failed may close descriptor 0
    /// (`_vcsock` is still zero) or detach config it never attached.
    pub fn init(provider: P) -> Result<Self> {
        let mut state = Box::new(ResState::zeroed());
        // Only a successfully initialized state is ever closed.
        provider.init(&mut state)?;
        tracing::debug!(provider = %provider.kind(), "Initialized resolver state");
        Ok(Self { state, provider })
    }

    /// Pointer for read-only resolver calls.
    #[must_use]
    pub fn as_ptr(&self) -> *const ResState {
        &raw const *self.state
    }

    /// Pointer for `res_nsearch` and friends, which take a mutable
    /// `res_state`.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut ResState {
        &raw mut *self.state
    }

    /// The provider that initialized this state.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: ResolverStateProvider> AsRef<ResState> for ResolverState<P> {
    fn as_ref(&self) -> &ResState {
        &self.state
    }
}

impl<P: ResolverStateProvider> Drop for ResolverState<P> {
    fn drop(&mut self) {
        if let Err(e) = self.provider.close(&mut self.state) {
            tracing::warn!(error = %e, "Failed to close resolver state");
        }
    }
}

impl<P: ResolverStateProvider> std::fmt::Debug for ResolverState<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverState")
            .field("provider", &self.provider.kind())
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolvError;
    use crate::legacy::tests::FakeLegacy;
    use crate::config::ProviderKind;
    use crate::legacy::{LegacyAdapter, LegacyResolver};
    use libc::c_int;
    use std::cell::Cell;

    #[test]
    fn init_snapshots_global() {
        let adapter = LegacyAdapter::new(FakeLegacy::new(0x42));
        let state = ResolverState::init(&adapter).unwrap();

        assert_eq!(state.as_ref(), &adapter.legacy().snapshot());
        assert!(!std::ptr::eq(
            state.as_ptr(),
            adapter.legacy().global_state().as_ptr()
        ));
    }

    #[test]
    fn init_failure_returns_code() {
        let adapter = LegacyAdapter::new(FakeLegacy::failing(0x42, -2));
        let err = ResolverState::init(&adapter).unwrap_err();
        assert_eq!(err, ResolvError::Init { code: -2 });
    }

    /// Legacy adapter that counts close calls.
    struct CountingClose<'a> {
        inner: LegacyAdapter<FakeLegacy>,
        closes: &'a Cell<usize>,
    }

    impl ResolverStateProvider for CountingClose<'_> {
        unsafe fn ninit(&self, statp: *mut ResState) -> c_int {
            unsafe { self.inner.ninit(statp) }
        }

        unsafe fn nclose(&self, statp: *mut ResState) -> c_int {
            self.closes.set(self.closes.get() + 1);
            unsafe { self.inner.nclose(statp) }
        }

        fn kind(&self) -> ProviderKind {
            self.inner.kind()
        }
    }

    #[test]
    fn failed_init_is_never_closed() {
        let closes = Cell::new(0);
        let provider = CountingClose {
            inner: LegacyAdapter::new(FakeLegacy::failing(0x42, -1)),
            closes: &closes,
        };

        assert!(ResolverState::init(provider).is_err());
        assert_eq!(closes.get(), 0);
    }

    #[test]
    fn successful_init_is_closed_once_on_drop() {
        let closes = Cell::new(0);
        let provider = CountingClose {
            inner: LegacyAdapter::new(FakeLegacy::new(0x42)),
            closes: &closes,
        };

        drop(ResolverState::init(provider).unwrap());
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn drop_zeroes_private_copy() {
        let adapter = LegacyAdapter::new(FakeLegacy::new(0x42));
        let mut state = ResolverState::init(&adapter).unwrap();
        let ptr = state.as_mut_ptr();

        // Run the same close `Drop` does and check the bytes in place.
        assert_eq!(unsafe { adapter.nclose(ptr) }, 0);
        assert!(state.as_ref().is_zeroed());
        drop(state);
        assert!(!adapter.legacy().snapshot().is_zeroed());
    }
}
