//! Opaque resolver-state structure.

use libc::c_ulong;
use std::mem::size_of;

/// Size in bytes of the libc's `struct __res_state`.
///
/// glibc and musl share the same layout: 568 bytes on LP64 targets and 512
/// bytes on ILP32 targets.
#[cfg(target_pointer_width = "64")]
pub const RES_STATE_SIZE: usize = 568;

/// Size in bytes of the libc's `struct __res_state`.
///
/// glibc and musl share the same layout: 568 bytes on LP64 targets and 512
/// bytes on ILP32 targets.
#[cfg(not(target_pointer_width = "64"))]
pub const RES_STATE_SIZE: usize = 512;

const WORDS: usize = RES_STATE_SIZE / size_of::<c_ulong>();

/// Caller-owned resolver state (`res_state` in C).
///
/// The contents are opaque: nameservers, search domains and option flags as
/// laid out by the libc. Only whole-structure operations are provided.
///
/// A copy taken from the global `_res` still carries `dnsrch` pointers into
/// the global's `defdname` buffer. Treat such a copy as a snapshot to hand
/// back to the libc, not as an independent value to move around freely.
#[repr(C)]
#[derive(Clone)]
pub struct ResState {
    // `unsigned long` words give the structure the libc's alignment.
    words: [c_ulong; WORDS],
}

const _: () = assert!(size_of::<ResState>() == RES_STATE_SIZE);

impl ResState {
    /// Returns an all-zero state, the same as a `memset(0)` C buffer.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self { words: [0; WORDS] }
    }

    /// Returns the raw bytes of the structure.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RES_STATE_SIZE] {
        // SAFETY: `ResState` is `repr(C)`, exactly `RES_STATE_SIZE` bytes,
        // has no padding, and `u8` has no alignment requirement.
        unsafe { &*std::ptr::from_ref(self).cast::<[u8; RES_STATE_SIZE]>() }
    }

    /// Returns the raw bytes of the structure for writing.
    ///
    /// Every bit pattern is a valid `ResState`, but the libc may not accept
    /// arbitrary contents.
    pub const fn as_bytes_mut(&mut self) -> &mut [u8; RES_STATE_SIZE] {
        // SAFETY: see `as_bytes`; the exclusive borrow is carried over.
        unsafe { &mut *std::ptr::from_mut(self).cast::<[u8; RES_STATE_SIZE]>() }
    }

    /// Returns `true` if every byte is zero.
    #[must_use]
    pub fn is_zeroed(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }
}

impl Default for ResState {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl PartialEq for ResState {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl Eq for ResState {}

impl std::fmt::Debug for ResState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResState")
            .field("size", &RES_STATE_SIZE)
            .field("zeroed", &self.is_zeroed())
            .finish_non_exhaustive()
    }
}

/// Zeroes the whole structure behind `statp`.
///
/// # Safety
///
/// `statp` must be non-null, aligned, and valid for writes of
/// [`RES_STATE_SIZE`] bytes.
pub(crate) unsafe fn zero(statp: *mut ResState) {
    // SAFETY: guaranteed by the caller.
    unsafe { std::ptr::write_bytes(statp, 0, 1) };
}

/// Copies the whole structure from `src` to `dst`.
///
/// # Safety
///
/// Both pointers must be non-null, aligned, valid for [`RES_STATE_SIZE`]
/// bytes, and the two regions must not overlap.
pub(crate) unsafe fn copy(src: *const ResState, dst: *mut ResState) {
    // SAFETY: guaranteed by the caller.
    unsafe { std::ptr::copy_nonoverlapping(src, dst, 1) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_matches_libc_layout() {
        assert_eq!(size_of::<ResState>(), RES_STATE_SIZE);
        assert_eq!(ResState::zeroed().as_bytes().len(), RES_STATE_SIZE);
    }

    #[test]
    fn zeroed_and_default_agree() {
        let s = ResState::default();
        assert!(s.is_zeroed());
        assert_eq!(s, ResState::zeroed());
    }

    #[test]
    fn byte_view_reflects_writes() {
        let mut s = ResState::zeroed();
        s.as_bytes_mut()[RES_STATE_SIZE - 1] = 0xAB;
        assert!(!s.is_zeroed());
        assert_eq!(s.as_bytes()[RES_STATE_SIZE - 1], 0xAB);
    }

    #[test]
    fn zero_and_copy_cover_whole_structure() {
        let mut src = ResState::zeroed();
        src.as_bytes_mut().fill(0x5A);
        let mut dst = ResState::zeroed();

        unsafe { copy(&src, &mut dst) };
        assert_eq!(dst.as_bytes(), &[0x5A; RES_STATE_SIZE]);

        unsafe { zero(&mut dst) };
        assert!(dst.is_zeroed());
    }
}
