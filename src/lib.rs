//! GLXSurface - An OpenGL rendering surface on X11, for visualization plugins.
//!
//! A `Session` owns one X window and, when the server speaks GLX 1.3 or
//! above, an off-screen pixel buffer whose context shares objects (textures,
//! display lists) with the window's context. Render to the pbuffer, then
//! to the window, then `swap()`:
//!
//! ```no_run
//! extern crate glxsurface;
//!
//! use glxsurface::{XlibSession, SurfaceSettings};
//!
//! # fn main() {
//! let mut session = XlibSession::initialize(&SurfaceSettings::new(640, 480, false)).unwrap();
//! while !session.pump_events() {
//!     if session.has_offscreen() {
//!         session.activate_offscreen();
//!         // Render to texture...
//!     }
//!     session.activate_window();
//!     // Render the frame...
//!     session.swap();
//! }
//! session.shutdown();
//! # }
//! ```
//!
//! Native calls go through the `Backend` trait; `XlibBackend` is the one
//! provided on X11 targets.

#![doc(html_root_url = "https://docs.rs/glxsurface/0.1.0")]
#![warn(missing_docs)]

#[macro_use]
extern crate log;
extern crate vek;

pub mod error;
pub use error::{Error, ErrorKind, Result};
pub mod version;
pub use version::{GlxVersion, Capability, EXTENDED_GLX_VERSION};
pub mod settings;
pub use settings::{SurfaceSettings, PixelFormat, OffscreenSettings, OFFSCREEN_SIZE};
pub mod wm;
pub mod backend;
pub use backend::Backend;
mod cleanup;
pub mod session;
pub use session::{Session, SessionState, SurfaceWindow, Targets};

#[cfg(x11)]
#[allow(missing_docs)]
pub mod x11;
#[cfg(x11)]
pub use x11::XlibBackend;

/// A `Session` over Xlib and GLX.
#[cfg(x11)]
pub type XlibSession = Session<XlibBackend>;

#[cfg(test)]
mod mock;
