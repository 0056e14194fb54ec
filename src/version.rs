//! GLX version numbers, and the capability level they map to.

use std::fmt::{self, Display, Formatter};

/// A GLX version as reported by `glXQueryVersion()`.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlxVersion {
    #[allow(missing_docs)]
    pub major: i32,
    #[allow(missing_docs)]
    pub minor: i32,
}

/// FBConfigs, GLX windows and pbuffers appeared in GLX 1.3.
pub const EXTENDED_GLX_VERSION: GlxVersion = GlxVersion { major: 1, minor: 3 };

impl GlxVersion {
    /// Creates a version from major and minor numbers.
    pub fn new(major: i32, minor: i32) -> Self {
        Self { major, minor }
    }
}

impl Display for GlxVersion {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Which set of GLX entry points a `Session` drives.
///
/// Decided once from the server's GLX version, never changed afterwards.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Capability {
    /// GLX 1.2 and below: `glXChooseVisual()`, `glXCreateContext()`, `glXMakeCurrent()`.
    /// No off-screen buffer.
    Legacy,
    /// GLX 1.3 and above: FBConfigs, GLX windows, pbuffers and `glXMakeContextCurrent()`.
    Extended,
}

impl Capability {
    /// Picks the capability level for a given GLX version.
    ///
    /// Anything with a major number of zero or less is legacy, as is 1.0 to 1.2.
    pub fn from_version(version: GlxVersion) -> Self {
        if version.major <= 0 || version < EXTENDED_GLX_VERSION {
            Capability::Legacy
        } else {
            Capability::Extended
        }
    }
    #[allow(missing_docs)]
    pub fn is_extended(&self) -> bool { *self == Capability::Extended }
    /// The API name used in log messages.
    pub fn api_name(&self) -> &'static str {
        match *self {
            Capability::Legacy => "GLX 1.2",
            Capability::Extended => "GLX 1.3",
        }
    }
}
