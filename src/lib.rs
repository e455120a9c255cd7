//! # resolv-compat
//!
//! The reentrant `res_ninit` / `res_nclose` resolver-state API on every libc.
//!
//! glibc ships `res_ninit` and `res_nclose`, which initialize and release a
//! caller-owned `res_state`. musl and other libcs only offer `res_init`,
//! which fills one process-wide `_res`. This crate gives both a single
//! interface, [`ResolverStateProvider`], with two implementations:
//!
//! - `NativeReentrant` (`sys` module, glibc only) calls the libc directly;
//! - [`LegacyAdapter`] runs `res_init` and copies `_res` into the caller's
//!   handle, then zeroes the handle on close.
//!
//! [`ProviderKind::detect`] reports which one the target was built for, and
//! `sys::system()` returns it.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use resolv_compat::{ResolverState, system};
//!
//! let mut state = ResolverState::init(system())?;
//! let rc = unsafe { res_nsearch(state.as_mut_ptr(), name, class, ty, buf, len) };
//! // `res_nclose` runs on drop.
//! ```
//!
//! ## Shared global state
//!
//! On the legacy path every initialization rewrites the global `_res` that
//! the whole process shares. Handles are snapshots of it, not views. No lock
//! is taken; callers initializing from several threads should hold
//! [`legacy::global_lock`] around the call.
//!
//! ## C callers
//!
//! With the `c-abi` feature on non-glibc Linux, the crate exports
//! `res_ninit` and `res_nclose` symbols for C code linked into the same
//! binary.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handle;
pub mod legacy;
pub mod provider;
pub mod state;
pub mod sys;

pub use config::{ParseProviderKindError, ProviderKind};
pub use error::{ResolvError, Result};
pub use handle::ResolverState;
pub use legacy::{LegacyAdapter, LegacyResolver};
pub use provider::ResolverStateProvider;
pub use state::{RES_STATE_SIZE, ResState};
#[cfg(all(target_os = "linux", target_env = "gnu"))]
pub use sys::NativeReentrant;
#[cfg(target_os = "linux")]
pub use sys::{SystemLegacy, SystemProvider, system};
