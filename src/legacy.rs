//! `res_ninit` / `res_nclose` on top of the legacy global `_res` API.
//!
//! The legacy API keeps exactly one resolver state per process. The adapter
//! hands each caller a snapshot of it:
//!
//! - [`LegacyAdapter::ninit`] runs the global initializer, then copies the
//!   global state into the caller's handle.
//! - [`LegacyAdapter::nclose`] zeroes the caller's handle.
//!
//! A handle that *is* the global state is never copied onto itself and never
//! zeroed.
//!
//! # Shared state
//!
//! Every `ninit` re-reads system configuration into the global state, which
//! is shared with all code in the process, including code that never uses
//! this crate. The adapter takes no lock. Callers that initialize from several
//! threads can serialize on [`global_lock`].

use crate::config::ProviderKind;
use crate::error::NULL_HANDLE_STATUS;
use crate::provider::ResolverStateProvider;
use crate::state::{self, ResState};
use libc::c_int;
use std::ptr::NonNull;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The legacy, non-reentrant resolver API of a libc.
///
/// # Safety
///
/// [`global_state`](Self::global_state) must return a pointer that is valid
/// for reads and writes of a whole [`ResState`] for as long as the backend is
/// in use, and [`res_init`](Self::res_init) may only write through that same
/// pointer.
pub unsafe trait LegacyResolver {
    /// Reads system resolver configuration into the global state.
    fn res_init(&self) -> c_int;

    /// Address of the process-wide global state (`&_res`).
    fn global_state(&self) -> NonNull<ResState>;
}

/// Adapts a [`LegacyResolver`] to the reentrant resolver-state API.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyAdapter<L> {
    legacy: L,
}

impl<L: LegacyResolver> LegacyAdapter<L> {
    /// Wraps a legacy backend.
    #[must_use]
    pub const fn new(legacy: L) -> Self {
        Self { legacy }
    }

    /// Returns the wrapped backend.
    #[must_use]
    pub const fn legacy(&self) -> &L {
        &self.legacy
    }

    /// Returns `true` if `statp` is the global state itself.
    #[must_use]
    pub fn is_global(&self, statp: *const ResState) -> bool {
        std::ptr::eq(statp, self.legacy.global_state().as_ptr())
    }

    /// `res_ninit`: initializes the global state and copies it into `statp`.
    ///
    /// The initializer always runs. The copy is skipped when `statp` is null
    /// or is the global state. The initializer's status is returned
    /// unchanged, and the copy happens even when it is negative.
    ///
    /// # Safety
    ///
    /// `statp` must be null, the global state, or a writable, aligned
    /// [`ResState`] that does not overlap the global state.
    pub unsafe fn ninit(&self, statp: *mut ResState) -> c_int {
        let code = self.legacy.res_init();
        let global = self.legacy.global_state();

        if statp.is_null() {
            tracing::trace!(code, "res_init ran for null handle, nothing copied");
        } else if std::ptr::eq(statp, global.as_ptr()) {
            tracing::trace!(code, aliased = true, "Handle is the global state, nothing copied");
        } else {
            // SAFETY: `global` is valid per the `LegacyResolver` contract;
            // `statp` is valid and disjoint per this function's contract.
            unsafe { state::copy(global.as_ptr(), statp) };
            tracing::trace!(code, aliased = false, "Copied global resolver state into handle");
        }
        code
    }

    /// `res_nclose`: zeroes `statp`.
    ///
    /// Returns `-1` for a null handle. The global state is left untouched.
    /// No descriptors are closed and no memory is freed.
    ///
    /// # Safety
    ///
    /// `statp` must be null, the global state, or a writable, aligned
    /// [`ResState`].
    pub unsafe fn nclose(&self, statp: *mut ResState) -> c_int {
        if statp.is_null() {
            return NULL_HANDLE_STATUS;
        }
        if self.is_global(statp) {
            tracing::trace!(aliased = true, "Refusing to zero the global resolver state");
        } else {
            // SAFETY: non-null and valid per this function's contract.
            unsafe { state::zero(statp) };
        }
        0
    }
}

impl<L: LegacyResolver> ResolverStateProvider for LegacyAdapter<L> {
    unsafe fn ninit(&self, statp: *mut ResState) -> c_int {
        // SAFETY: forwarded caller contract.
        unsafe { LegacyAdapter::ninit(self, statp) }
    }

    unsafe fn nclose(&self, statp: *mut ResState) -> c_int {
        // SAFETY: forwarded caller contract.
        unsafe { LegacyAdapter::nclose(self, statp) }
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::LegacyAdapter
    }
}

static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

/// Locks the process-wide mutex for cooperating callers of `ninit`.
///
/// The adapter never takes this lock itself; it only helps callers that agree
/// to hold it around initialization. A poisoned lock is recovered, since the
/// guarded data is `()`.
pub fn global_lock() -> MutexGuard<'static, ()> {
    GLOBAL_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}
