//! `Error` and `Result` types for this crate.
use std::fmt::{self, Display, Formatter};

pub(crate) type CowStr = ::std::borrow::Cow<'static, str>;

/// The reason why a `Session` could not be initialized.
///
/// Every kind is fatal to initialization; there is no retry policy.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum ErrorKind {
    /// The X display could not be opened.
    Connection,
    /// The GLX extension is missing, or its version could not be queried.
    Capability,
    /// No visual or framebuffer configuration matched the requested pixel format.
    Config,
    /// The GLX window wrapping the X window could not be created.
    Drawable,
    /// A rendering context could not be created.
    Context,
    /// The off-screen pixel buffer could not be created.
    Buffer,
}

/// An `ErrorKind` packed with an optional `reason` string.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Error {
    /// The error kind.
    pub kind: ErrorKind,
    /// A hopefully useful reason string, or `None` if unknown or not meaningful.
    pub reason: Option<CowStr>,
}

/// Alias to `Result<T, Error>`.
pub type Result<T> = ::std::result::Result<T, Error>;

impl ErrorKind {
    pub(crate) fn describe_quick(&self) -> &'static str {
        match *self {
            ErrorKind::Connection => "Cannot open display",
            ErrorKind::Capability => "GLX extension or version unavailable",
            ErrorKind::Config => "No matching pixel configuration",
            ErrorKind::Drawable => "Cannot create GLX drawable",
            ErrorKind::Context => "Cannot create OpenGL context",
            ErrorKind::Buffer => "Cannot create off-screen buffer",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.describe_quick())
    }
}

impl ::std::error::Error for ErrorKind {}


impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.describe_quick())?;
        match self.reason {
            None => write!(f, " (no reason given)"),
            Some(ref s) => write!(f, ": {}", s),
        }
    }
}

impl ::std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, reason: None, }
    }
}

#[allow(unused_imports)]
pub(crate) use self::utils::*;

mod utils {
    #![allow(dead_code)]
    use super::*;

    impl Error {
        pub(crate) fn new<S: Into<CowStr>>(kind: ErrorKind, s: S) -> Self {
            Self { kind, reason: Some(s.into()), }
        }
        pub(crate) fn connection<S: Into<CowStr>>(s: S) -> Self { Self::new(ErrorKind::Connection, s) }
        pub(crate) fn capability<S: Into<CowStr>>(s: S) -> Self { Self::new(ErrorKind::Capability, s) }
        pub(crate) fn config<S: Into<CowStr>>(s: S) -> Self { Self::new(ErrorKind::Config, s) }
        pub(crate) fn drawable<S: Into<CowStr>>(s: S) -> Self { Self::new(ErrorKind::Drawable, s) }
        pub(crate) fn context<S: Into<CowStr>>(s: S) -> Self { Self::new(ErrorKind::Context, s) }
        pub(crate) fn buffer<S: Into<CowStr>>(s: S) -> Self { Self::new(ErrorKind::Buffer, s) }
    }

    pub(crate) fn failed<T, S: Into<CowStr>>(kind: ErrorKind, s: S) -> self::Result<T> {
        Err(Error::new(kind, s))
    }
}
