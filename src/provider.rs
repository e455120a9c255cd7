//! The reentrant resolver-state capability.
//!
//! Code written against [`ResolverStateProvider`] compiles and behaves the same
//! whether the libc implements `res_ninit` itself or only offers the legacy
//! global `_res` API. See [`crate::sys::system`] for the provider selected at
//! build time.

use crate::config::ProviderKind;
use crate::error::{ResolvError, Result};
use crate::state::ResState;
use libc::c_int;

/// A source of `res_ninit` / `res_nclose` semantics.
pub trait ResolverStateProvider {
    /// Initializes `statp` from the system resolver configuration.
    ///
    /// Returns the initializer's status: non-negative on success.
    ///
    /// # Safety
    ///
    /// `statp` must be null or point to a writable, aligned [`ResState`].
    unsafe fn ninit(&self, statp: *mut ResState) -> c_int;

    /// Releases `statp`.
    ///
    /// Returns `-1` for a null handle and `0` otherwise.
    ///
    /// # Safety
    ///
    /// `statp` must be null or point to a writable, aligned [`ResState`].
    unsafe fn nclose(&self, statp: *mut ResState) -> c_int;

    /// Which kind of provider this is.
    fn kind(&self) -> ProviderKind;

    /// Safe form of [`ninit`](Self::ninit).
    ///
    /// On failure the handle still holds whatever the initializer produced;
    /// nothing is rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`ResolvError::Init`] with the verbatim status if it is
    /// negative.
    fn init(&self, state: &mut ResState) -> Result<c_int> {
        // SAFETY: a `&mut ResState` is non-null, aligned and writable.
        let code = unsafe { self.ninit(state) };
        if code < 0 {
            tracing::debug!(code, provider = %self.kind(), "Resolver state init failed");
            return Err(ResolvError::Init { code });
        }
        Ok(code)
    }

    /// Safe form of [`nclose`](Self::nclose).
    ///
    /// # Errors
    ///
    /// Returns the error matching a negative close status.
    fn close(&self, state: &mut ResState) -> Result<()> {
        // SAFETY: a `&mut ResState` is non-null, aligned and writable.
        let status = unsafe { self.nclose(state) };
        ResolvError::from_close_status(status).map_or(Ok(()), Err)
    }
}

impl<P: ResolverStateProvider + ?Sized> ResolverStateProvider for &P {
    unsafe fn ninit(&self, statp: *mut ResState) -> c_int {
        // SAFETY: forwarded caller contract.
        unsafe { (**self).ninit(statp) }
    }

    unsafe fn nclose(&self, statp: *mut ResState) -> c_int {
        // SAFETY: forwarded caller contract.
        unsafe { (**self).nclose(statp) }
    }

    fn kind(&self) -> ProviderKind {
        (**self).kind()
    }
}
