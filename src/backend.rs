//! The native services a `Session` is built on.
//!
//! `XlibBackend` is the one real implementation. Methods mirror Xlib and GLX
//! calls one-to-one; they don't make decisions, the `Session` does.
//! Creation methods return `None` where the native call returns `NULL`/`None`
//! (or raises an X error).

use std::fmt::Debug;
use vek::{Extent2, Vec2};
use settings::PixelFormat;
use version::GlxVersion;
use wm;

/// An event taken off the window-system queue, reduced to what the event
/// pump looks at.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Event<A> {
    /// A `ClientMessage`, with its data format (8, 16 or 32) and the first
    /// element of its data interpreted as an atom.
    ClientMessage {
        #[allow(missing_docs)]
        format: i32,
        #[allow(missing_docs)]
        first_word: A,
    },
    /// Anything else; the event type is kept for `trace!` logging.
    Other(i32),
}

/// Attributes of a pbuffer to create.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct PbufferAttribs {
    #[allow(missing_docs)]
    pub extent: Extent2<u32>,
    #[allow(missing_docs)]
    pub preserved_contents: bool,
}

/// Which kind of drawable a framebuffer configuration must support.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum DrawableKind {
    #[allow(missing_docs)]
    Window,
    #[allow(missing_docs)]
    Pbuffer,
}

/// Connection-level and GLX services.
///
/// Dropping the backend closes the connection; this is always the very last
/// step of a teardown.
pub trait Backend: Debug {
    /// An X window.
    type Window: Copy + PartialEq + Debug;
    /// A colormap allocated for a window.
    type Colormap: Copy + PartialEq + Debug;
    /// An interned atom.
    type Atom: Copy + PartialEq + Debug;
    /// A visual descriptor, which must be released with `free_visual()`.
    type Visual: Copy + PartialEq + Debug;
    /// A GLX framebuffer configuration (GLX 1.3+).
    type Config: Copy + PartialEq + Debug;
    /// A GLX rendering context.
    type Context: Copy + PartialEq + Debug;
    /// A GLX window wrapping an X window (GLX 1.3+).
    type GlxWindow: Copy + PartialEq + Debug;
    /// A GLX off-screen pixel buffer (GLX 1.3+).
    type Pbuffer: Copy + PartialEq + Debug;

    /// Whether both the X server and the client library support GLX.
    fn has_glx(&mut self) -> bool;
    /// `glXQueryVersion()`.
    fn glx_version(&mut self) -> Option<GlxVersion>;
    /// Logs vendor and version strings. Purely informative.
    fn log_glx_info(&mut self) {}

    /// `glXChooseVisual()` on the default screen, for a RGBA visual.
    fn choose_visual(&mut self, format: &PixelFormat) -> Option<Self::Visual>;
    /// `glXChooseFBConfig()`; the returned list may be empty.
    fn choose_fb_configs(&mut self, format: &PixelFormat, drawable: DrawableKind) -> Vec<Self::Config>;
    /// `glXGetVisualFromFBConfig()`.
    fn visual_from_config(&mut self, config: Self::Config) -> Option<Self::Visual>;
    /// `XFree()` on a visual descriptor.
    fn free_visual(&mut self, visual: Self::Visual);

    /// `XCreateColormap()` on the visual's screen root, allocating nothing.
    fn create_colormap(&mut self, visual: Self::Visual) -> Self::Colormap;
    /// `XFreeColormap()`.
    fn free_colormap(&mut self, colormap: Self::Colormap);
    /// `XCreateWindow()` at the origin, borderless, with a black background.
    fn create_window(&mut self, visual: Self::Visual, colormap: Self::Colormap, extent: Extent2<u32>) -> Option<Self::Window>;
    /// `XDestroyWindow()`.
    fn destroy_window(&mut self, window: Self::Window);

    /// `XInternAtom()`, creating the atom if needed.
    fn intern_atom(&mut self, name: &str) -> Self::Atom;
    /// `XSetWMProtocols()`.
    fn set_wm_protocols(&mut self, window: Self::Window, protocols: &[Self::Atom]);
    /// Writes the `_MOTIF_WM_HINTS` property.
    fn set_motif_hints(&mut self, window: Self::Window, hints: &wm::motif::Hints);
    /// `XSetWMNormalHints()` with minimum and maximum size.
    fn set_size_hints(&mut self, window: Self::Window, hints: &wm::SizeHints);
    /// Sets `WM_NAME` and `_NET_WM_NAME`.
    fn set_title(&mut self, window: Self::Window, title: &str);
    /// Sets `_NET_WM_PID` to the current process ID.
    fn set_pid(&mut self, _window: Self::Window) {}
    /// `XSelectInput()` with `KeyPressMask`.
    fn select_key_press_input(&mut self, window: Self::Window);
    /// `XMapWindow()`.
    fn map_window(&mut self, window: Self::Window);
    /// `XMoveWindow()`.
    fn move_window(&mut self, window: Self::Window, position: Vec2<i32>);
    /// `XFlush()`.
    fn flush(&mut self);

    /// `glXCreateContext()` with direct rendering.
    fn create_legacy_context(&mut self, visual: Self::Visual) -> Option<Self::Context>;
    /// `glXCreateNewContext()` with `GLX_RGBA_TYPE` and direct rendering,
    /// optionally sharing display lists and textures with `share`.
    fn create_context(&mut self, config: Self::Config, share: Option<Self::Context>) -> Option<Self::Context>;
    /// `glXDestroyContext()`.
    fn destroy_context(&mut self, context: Self::Context);
    /// `glXCreateWindow()`.
    fn create_glx_window(&mut self, config: Self::Config, window: Self::Window) -> Option<Self::GlxWindow>;
    /// `glXDestroyWindow()`.
    fn destroy_glx_window(&mut self, glx_window: Self::GlxWindow);
    /// `glXCreatePbuffer()`.
    fn create_pbuffer(&mut self, config: Self::Config, attribs: &PbufferAttribs) -> Option<Self::Pbuffer>;
    /// `glXDestroyPbuffer()`.
    fn destroy_pbuffer(&mut self, pbuffer: Self::Pbuffer);

    /// `glXMakeCurrent()` on an X window.
    fn make_window_current(&mut self, window: Self::Window, context: Self::Context) -> bool;
    /// `glXMakeContextCurrent()` on a GLX window, for both drawing and reading.
    fn make_glx_window_current(&mut self, glx_window: Self::GlxWindow, context: Self::Context) -> bool;
    /// `glXMakeContextCurrent()` on a pbuffer, for both drawing and reading.
    fn make_pbuffer_current(&mut self, pbuffer: Self::Pbuffer, context: Self::Context) -> bool;
    /// `glXSwapBuffers()` on an X window.
    fn swap_window(&mut self, window: Self::Window);
    /// `glXSwapBuffers()` on a GLX window.
    fn swap_glx_window(&mut self, glx_window: Self::GlxWindow);

    /// `XPending()`.
    fn pending_events(&mut self) -> usize;
    /// `XNextEvent()`. Only called when `pending_events()` said there was one.
    fn next_event(&mut self) -> Event<Self::Atom>;
}
