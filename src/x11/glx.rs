//! GLX queries, attribute lists, contexts and drawables.

use std::ffi::CStr;
use std::os::raw::c_int;
use std::ptr;
use super::x11::xlib as x;
use super::x11::glx::*;
use super::xlib_error;
use backend::{DrawableKind, PbufferAttribs};
use error::ErrorKind;
use settings::PixelFormat;
use version::GlxVersion;

// Functions that generate attrib arrays (i.e 0-terminated arrays of i32).
//
// visual_attribs() and fbconfig_attribs() are two separate functions
// because the format is different: GLX_DOUBLEBUFFER is not followed by a
// boolean in visual_attribs(), its presence _is_ the boolean instead.

/// For `glXChooseVisual()` (GLX below 1.3).
pub fn visual_attribs(format: &PixelFormat) -> [c_int; 9] {
    let &PixelFormat { red_bits, green_bits, blue_bits, double_buffer } = format;
    [
        GLX_RGBA,
        GLX_RED_SIZE, red_bits as c_int,
        GLX_GREEN_SIZE, green_bits as c_int,
        GLX_BLUE_SIZE, blue_bits as c_int,
        if double_buffer { GLX_DOUBLEBUFFER } else { 0 },
        0 // end
    ]
}

/// For `glXChooseFBConfig()` (GLX 1.3 and above).
pub fn fbconfig_attribs(format: &PixelFormat, drawable: DrawableKind) -> [c_int; 11] {
    let &PixelFormat { red_bits, green_bits, blue_bits, double_buffer } = format;
    let drawable_bit = match drawable {
        DrawableKind::Window => GLX_WINDOW_BIT,
        DrawableKind::Pbuffer => GLX_PBUFFER_BIT,
    };
    [
        GLX_RED_SIZE, red_bits as c_int,
        GLX_GREEN_SIZE, green_bits as c_int,
        GLX_BLUE_SIZE, blue_bits as c_int,
        GLX_DOUBLEBUFFER, if double_buffer { x::True } else { x::False },
        GLX_DRAWABLE_TYPE, drawable_bit,
        0 // keep last
    ]
}

/// For `glXCreatePbuffer()`.
pub fn pbuffer_attribs(attribs: &PbufferAttribs) -> [c_int; 7] {
    let &PbufferAttribs { extent, preserved_contents } = attribs;
    [
        GLX_PBUFFER_WIDTH, extent.w as c_int,
        GLX_PBUFFER_HEIGHT, extent.h as c_int,
        GLX_PRESERVED_CONTENTS, if preserved_contents { x::True } else { x::False },
        0
    ]
}

/// Both the X server and the client library must know about GLX.
pub unsafe fn has_glx(x_display: *mut x::Display) -> bool {
    let (mut major_opcode, mut event_base, mut error_base) = (0, 0, 0);
    let server_has_glx = x::XQueryExtension(
        x_display, "GLX\0".as_ptr() as _,
        &mut major_opcode, &mut event_base, &mut error_base
    );
    if server_has_glx == x::False {
        warn!("The X server doesn't have the GLX extension");
        return false;
    }
    trace!("GLX major opcode {}, event base {}, error base {}", major_opcode, event_base, error_base);
    let (mut error_base, mut event_base) = (0, 0);
    glXQueryExtension(x_display, &mut error_base, &mut event_base) != x::False
}

pub unsafe fn query_version(x_display: *mut x::Display) -> Option<GlxVersion> {
    let (mut major, mut minor) = (0, 0);
    match glXQueryVersion(x_display, &mut major, &mut minor) {
        x::False => None,
        _ => Some(GlxVersion::new(major, minor)),
    }
}

pub unsafe fn log_info(x_display: *mut x::Display, screen_num: c_int) {
    let strings = [
        ("client vendor ", glXGetClientString(  x_display, GLX_VENDOR)),
        ("client version", glXGetClientString(  x_display, GLX_VERSION)),
        ("server vendor ", glXQueryServerString(x_display, screen_num, GLX_VENDOR)),
        ("server version", glXQueryServerString(x_display, screen_num, GLX_VERSION)),
    ];
    for &(what, s) in strings.iter() {
        if s.is_null() {
            continue;
        }
        info!("GLX {}: {:?}", what, CStr::from_ptr(s).to_string_lossy());
    }
}

pub unsafe fn choose_visual(x_display: *mut x::Display, screen_num: c_int, format: &PixelFormat) -> Option<*mut x::XVisualInfo> {
    // Not actually mutated, but glXChooseVisual wants *mut...
    let mut attribs = visual_attribs(format);
    let visual_info = glXChooseVisual(x_display, screen_num, attribs.as_mut_ptr());
    if visual_info.is_null() { None } else { Some(visual_info) }
}

pub unsafe fn choose_fb_configs(x_display: *mut x::Display, screen_num: c_int, format: &PixelFormat, drawable: DrawableKind) -> Vec<GLXFBConfig> {
    let attribs = fbconfig_attribs(format, drawable);
    let mut fbcount: c_int = 0;
    let fbcs = glXChooseFBConfig(x_display, screen_num, attribs.as_ptr(), &mut fbcount);
    if fbcs.is_null() {
        return Vec::new();
    }
    let configs = (0..fbcount.max(0) as isize).map(|i| *fbcs.offset(i)).collect::<Vec<_>>();
    x::XFree(fbcs as *mut _);
    trace!("{} matching FBConfigs for a {:?}", configs.len(), drawable);
    configs
}

pub unsafe fn visual_from_config(x_display: *mut x::Display, config: GLXFBConfig) -> Option<*mut x::XVisualInfo> {
    let visual_info = glXGetVisualFromFBConfig(x_display, config);
    if visual_info.is_null() { None } else { Some(visual_info) }
}

// Creation functions report trapped X errors with warn!() and return None,
// which the session turns into the relevant Error.

unsafe fn checked<T, F: FnMut() -> T>(x_display: *mut x::Display, kind: ErrorKind, func: &str, f: F) -> Option<T> {
    xlib_error::sync_catch(x_display, kind, f)
        .map_err(|e| warn!("{}() raised {}", func, e))
        .ok()
}

pub unsafe fn create_legacy_context(x_display: *mut x::Display, visual_info: *mut x::XVisualInfo) -> Option<GLXContext> {
    let ctx = checked(x_display, ErrorKind::Context, "glXCreateContext", || {
        glXCreateContext(x_display, visual_info, ptr::null_mut(), x::True)
    }).filter(|c| !c.is_null())?;
    info!("GLX context is direct: {}", glXIsDirect(x_display, ctx) != x::False);
    Some(ctx)
}

pub unsafe fn create_context(x_display: *mut x::Display, config: GLXFBConfig, share: Option<GLXContext>) -> Option<GLXContext> {
    let share = share.unwrap_or(ptr::null_mut());
    let ctx = checked(x_display, ErrorKind::Context, "glXCreateNewContext", || {
        glXCreateNewContext(x_display, config, GLX_RGBA_TYPE, share, x::True)
    }).filter(|c| !c.is_null())?;
    info!("GLX context is direct: {}", glXIsDirect(x_display, ctx) != x::False);
    Some(ctx)
}

pub unsafe fn create_window(x_display: *mut x::Display, config: GLXFBConfig, x_window: x::Window) -> Option<GLXWindow> {
    checked(x_display, ErrorKind::Drawable, "glXCreateWindow", || {
        glXCreateWindow(x_display, config, x_window, ptr::null())
    }).filter(|w| *w != 0)
}

pub unsafe fn create_pbuffer(x_display: *mut x::Display, config: GLXFBConfig, attribs: &PbufferAttribs) -> Option<GLXPbuffer> {
    let attribs = pbuffer_attribs(attribs);
    checked(x_display, ErrorKind::Buffer, "glXCreatePbuffer", || {
        glXCreatePbuffer(x_display, config, attribs.as_ptr())
    }).filter(|p| *p != 0)
}

/// Runs a destruction request, only logging what goes wrong.
pub unsafe fn release<F: FnMut()>(x_display: *mut x::Display, func: &str, f: F) {
    if let Err(e) = xlib_error::sync_catch(x_display, ErrorKind::Drawable, f) {
        warn!("{}() raised {}", func, e);
    }
}

pub unsafe fn make_current(x_display: *mut x::Display, drawable: GLXDrawable, ctx: GLXContext) -> bool {
    glXMakeCurrent(x_display, drawable, ctx) != x::False
}

pub unsafe fn make_context_current(x_display: *mut x::Display, drawable: GLXDrawable, ctx: GLXContext) -> bool {
    glXMakeContextCurrent(x_display, drawable, drawable, ctx) != x::False
}
