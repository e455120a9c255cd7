//! Provider selection.

use std::fmt;
use std::str::FromStr;

/// Which resolver-state provider backs the reentrant API.
///
/// # Example
///
/// ```
/// use resolv_compat::ProviderKind;
///
/// let kind: ProviderKind = "legacy".parse().unwrap();
/// assert_eq!(kind, ProviderKind::LegacyAdapter);
/// assert!(!kind.is_reentrant());
/// assert_eq!(kind.to_string(), "legacy");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// The libc implements `res_ninit` / `res_nclose` itself (glibc).
    NativeReentrant,

    /// `res_init` plus the global `_res`, adapted to the reentrant shape.
    LegacyAdapter,
}

impl ProviderKind {
    /// Returns the provider the current target was built for.
    ///
    /// glibc ships the reentrant API; every other libc gets the adapter.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(all(target_os = "linux", target_env = "gnu")) {
            Self::NativeReentrant
        } else {
            Self::LegacyAdapter
        }
    }

    /// Returns `true` if handles are independent of the global `_res`.
    #[must_use]
    pub const fn is_reentrant(self) -> bool {
        matches!(self, Self::NativeReentrant)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::NativeReentrant => "native",
            Self::LegacyAdapter => "legacy",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown provider name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resolver provider: {0:?} (expected \"native\" or \"legacy\")")]
pub struct ParseProviderKindError(String);

impl FromStr for ProviderKind {
    type Err = ParseProviderKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "native-reentrant" => Ok(Self::NativeReentrant),
            "legacy" | "legacy-adapter" => Ok(Self::LegacyAdapter),
            _ => Err(ParseProviderKindError(s.to_string())),
        }
    }
}
