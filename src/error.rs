//! Error types.

use libc::c_int;
use thiserror::Error;

/// Status returned by `res_nclose` for a null handle.
pub const NULL_HANDLE_STATUS: c_int = -1;

/// Result alias for resolver-state operations.
pub type Result<T> = std::result::Result<T, ResolvError>;

/// Errors returned by the safe resolver-state API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolvError {
    /// The resolver initializer returned a negative status.
    ///
    /// The code is passed through verbatim; its meaning belongs to the libc.
    #[error("resolver initialization failed with status {code}")]
    Init {
        /// Status returned by `res_init` / `res_ninit`.
        code: c_int,
    },

    /// A null resolver-state handle was passed to close.
    #[error("null resolver state handle")]
    NullHandle,
}

impl ResolvError {
    /// Maps a negative status from a close call back to an error.
    ///
    /// Returns `None` for non-negative statuses.
    #[must_use]
    pub const fn from_close_status(status: c_int) -> Option<Self> {
        if status >= 0 {
            None
        } else if status == NULL_HANDLE_STATUS {
            Some(Self::NullHandle)
        } else {
            Some(Self::Init { code: status })
        }
    }

    /// Converts the error back to the integer status of the C API.
    #[must_use]
    pub const fn status(&self) -> c_int {
        match self {
            Self::Init { code } => *code,
            Self::NullHandle => NULL_HANDLE_STATUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_through_close_mapping() {
        assert_eq!(ResolvError::NullHandle.status(), -1);
        assert_eq!(
            ResolvError::from_close_status(-1),
            Some(ResolvError::NullHandle)
        );
        assert_eq!(ResolvError::from_close_status(0), None);
        assert_eq!(ResolvError::from_close_status(3), None);
    }

    #[test]
    fn init_keeps_code_verbatim() {
        let err = ResolvError::Init { code: -7 };
        assert_eq!(err.status(), -7);
        assert_eq!(
            err.to_string(),
            "resolver initialization failed with status -7"
        );
    }
}
