//! Bindings to the system libc.
//!
//! | target            | [`SystemProvider`]               |
//! |-------------------|----------------------------------|
//! | Linux, glibc      | [`NativeReentrant`]              |
//! | Linux, other libc | [`LegacyAdapter`]`<`[`SystemLegacy`]`>` |
//!
//! musl exports `res_init`, glibc only `__res_init`; both export
//! `__res_state()`, so [`SystemLegacy`] is available on either. Only glibc
//! exports `__res_ninit` / `__res_nclose`.

#![cfg(target_os = "linux")]

use crate::config::ProviderKind;
#[cfg(target_env = "gnu")]
use crate::error::NULL_HANDLE_STATUS;
#[cfg(not(target_env = "gnu"))]
use crate::legacy::LegacyAdapter;
use crate::legacy::LegacyResolver;
#[cfg(target_env = "gnu")]
use crate::provider::ResolverStateProvider;
use crate::state::ResState;
use libc::c_int;
use std::ptr::NonNull;

unsafe extern "C" {
    // glibc's `<resolv.h>` renames `res_init` to `__res_init`, the only
    // symbol its libc exports.
    #[cfg_attr(target_env = "gnu", link_name = "__res_init")]
    fn res_init() -> c_int;

    // `_res` expands to `(*__res_state())` on glibc and musl.
    fn __res_state() -> *mut ResState;
}

#[cfg(target_env = "gnu")]
unsafe extern "C" {
    fn __res_ninit(statp: *mut ResState) -> c_int;
    fn __res_nclose(statp: *mut ResState);
}

/// The libc's own `res_init` and `_res`.
///
/// On glibc `_res` is per-thread; on musl it is a single static.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLegacy;

// SAFETY: `__res_state()` returns the address of libc-owned storage that
// lives for the thread (glibc) or the process (musl), and `res_init` only
// writes to that storage.
unsafe impl LegacyResolver for SystemLegacy {
    fn res_init(&self) -> c_int {
        // SAFETY: no preconditions; reads /etc/resolv.conf into `_res`.
        unsafe { res_init() }
    }

    fn global_state(&self) -> NonNull<ResState> {
        // SAFETY: `__res_state()` never returns null.
        unsafe { NonNull::new_unchecked(__res_state()) }
    }
}

/// glibc's native `res_ninit` / `res_nclose`.
///
/// Handles are independent of `_res`. `res_nclose` closes the handle's
/// sockets and frees its extension data but does not zero it.
#[cfg(target_env = "gnu")]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeReentrant;

#[cfg(target_env = "gnu")]
impl ResolverStateProvider for NativeReentrant {
    unsafe fn ninit(&self, statp: *mut ResState) -> c_int {
        if statp.is_null() {
            // glibc dereferences the handle unconditionally.
            return NULL_HANDLE_STATUS;
        }
        // SAFETY: non-null and valid per the caller contract.
        unsafe { __res_ninit(statp) }
    }

    unsafe fn nclose(&self, statp: *mut ResState) -> c_int {
        if statp.is_null() {
            return NULL_HANDLE_STATUS;
        }
        // SAFETY: non-null and valid per the caller contract.
        unsafe { __res_nclose(statp) };
        0
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::NativeReentrant
    }
}

/// The provider this target was built for.
#[cfg(target_env = "gnu")]
pub type SystemProvider = NativeReentrant;

/// The provider this target was built for.
#[cfg(not(target_env = "gnu"))]
pub type SystemProvider = LegacyAdapter<SystemLegacy>;

/// Returns the provider this target was built for.
///
/// Its [`kind`](crate::ResolverStateProvider::kind) always equals
/// [`ProviderKind::detect`].
#[must_use]
pub fn system() -> SystemProvider {
    let provider = SystemProvider::default();
    tracing::debug!(provider = %ProviderKind::detect(), "Selected resolver state provider");
    provider
}

/// `res_ninit` / `res_nclose` for C code on libcs that lack them.
///
/// Only built for non-glibc targets; its tests run with:
///
/// ```bash
/// cargo test --features c-abi --target x86_64-unknown-linux-musl
/// ```
#[cfg(all(feature = "c-abi", not(target_env = "gnu")))]
mod c_abi {
    use super::SystemLegacy;
    use crate::legacy::LegacyAdapter;
    use crate::state::ResState;
    use libc::c_int;

    /// # Safety
    ///
    /// `statp` must be null, `&_res`, or a writable `struct __res_state`.
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn res_ninit(statp: *mut ResState) -> c_int {
        // SAFETY: forwarded caller contract.
        unsafe { LegacyAdapter::new(SystemLegacy).ninit(statp) }
    }

    /// # Safety
    ///
    /// `statp` must be null, `&_res`, or a writable `struct __res_state`.
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn res_nclose(statp: *mut ResState) -> c_int {
        // SAFETY: forwarded caller contract.
        unsafe { LegacyAdapter::new(SystemLegacy).nclose(statp) }
    }

}
