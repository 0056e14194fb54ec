//! The Xlib/GLX backend.

extern crate x11;

pub mod display;
pub use self::display::XlibBackend;
pub mod glx;
pub mod window;
pub mod atoms;
pub mod prop;
pub mod xlib_error;
