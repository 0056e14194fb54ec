//! Settings for creating a `Session`.
//!
//! Pixel format tiers and the off-screen buffer size are policy, not
//! configuration negotiated with the server; they are exposed here so that
//! a host can override them, but the defaults are what visualization plugins
//! have always used.

use std::ffi::CString;
use vek::Extent2;

/// Size of the off-screen buffer when none is specified.
pub const OFFSCREEN_SIZE: Extent2<u32> = Extent2 { w: 512, h: 512 };

/// Minimum color depths and buffering requested for a surface.
///
/// These are lower bounds: GLX is free to hand out deeper configurations.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct PixelFormat {
    /// Minimum number of bits for the red channel.
    pub red_bits: u8,
    /// Minimum number of bits for the green channel.
    pub green_bits: u8,
    /// Minimum number of bits for the blue channel.
    pub blue_bits: u8,
    /// Whether the surface has a back buffer to swap with.
    pub double_buffer: bool,
}

impl PixelFormat {
    /// RGB 5-5-5, double-buffered. Used for the window.
    pub const WINDOW_DEFAULT: PixelFormat = PixelFormat {
        red_bits: 5, green_bits: 5, blue_bits: 5, double_buffer: true,
    };
    /// RGB 8-8-8, single-buffered. Used for the off-screen buffer.
    pub const OFFSCREEN_DEFAULT: PixelFormat = PixelFormat {
        red_bits: 8, green_bits: 8, blue_bits: 8, double_buffer: false,
    };
}

/// Settings for the off-screen pixel buffer (GLX 1.3 and above only).
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct OffscreenSettings {
    /// Pixel format of the buffer. Defaults to `PixelFormat::OFFSCREEN_DEFAULT`.
    pub format: PixelFormat,
    /// Size of the buffer in pixels. Defaults to `OFFSCREEN_SIZE`.
    pub extent: Extent2<u32>,
    /// If `true` (the default), the contents survive resource conflicts
    /// instead of being discarded by the server.
    pub preserved_contents: bool,
}

impl Default for OffscreenSettings {
    fn default() -> Self {
        Self {
            format: PixelFormat::OFFSCREEN_DEFAULT,
            extent: OFFSCREEN_SIZE,
            preserved_contents: true,
        }
    }
}

/// Everything a `Session` needs to know at initialization time.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct SurfaceSettings {
    /// Name given to `XOpenDisplay()`. `None` (the default) means `$DISPLAY`.
    pub display_name: Option<CString>,
    /// Requested window size, in pixels.
    pub extent: Extent2<u32>,
    /// If `true`, the window is undecorated and moved to the screen origin.
    /// Otherwise its size is locked to `extent`.
    ///
    /// The window is NOT resized to the screen's resolution.
    pub fullscreen: bool,
    /// Window title. `None` leaves it to the window manager.
    pub title: Option<String>,
    /// Pixel format of the window. Defaults to `PixelFormat::WINDOW_DEFAULT`.
    pub window_format: PixelFormat,
    /// Off-screen buffer settings, ignored when the GLX version is below 1.3.
    pub offscreen: OffscreenSettings,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            display_name: None,
            extent: Extent2::new(400, 300),
            fullscreen: false,
            title: None,
            window_format: PixelFormat::WINDOW_DEFAULT,
            offscreen: Default::default(),
        }
    }
}

impl<T: Into<Extent2<u32>>> From<T> for SurfaceSettings {
    fn from(size: T) -> Self {
        Self {
            extent: size.into(),
            .. Default::default()
        }
    }
}

impl SurfaceSettings {
    /// Shorthand for the common case of a plugin that only knows its size
    /// and whether it should go fullscreen.
    pub fn new(width: u32, height: u32, fullscreen: bool) -> Self {
        Self {
            extent: Extent2::new(width, height),
            fullscreen,
            .. Default::default()
        }
    }
}
