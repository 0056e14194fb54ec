extern crate libc;

use std::cmp;
use std::ffi::CString;
use std::mem;
use std::os::raw::{c_int, c_uchar, c_ulong};
use vek::{Extent2, Vec2};
use super::x11::xlib as x;
use super::atoms::PreloadedAtoms;
use super::prop;
use super::xlib_error;
use error::ErrorKind;
use wm;

/// An `AllocNone` colormap on the root window of the visual's screen.
pub unsafe fn create_colormap(x_display: *mut x::Display, vi: *mut x::XVisualInfo) -> x::Colormap {
    let vi = &*vi;
    let parent = x::XRootWindow(x_display, vi.screen);
    x::XCreateColormap(x_display, parent, vi.visual, x::AllocNone)
}

pub unsafe fn create_window(x_display: *mut x::Display, vi: *mut x::XVisualInfo, colormap: x::Colormap, extent: Extent2<u32>) -> Option<x::Window> {
    let vi = &*vi;
    let parent = x::XRootWindow(x_display, vi.screen);
    let (x, y) = (0, 0);
    let Extent2 { w, h } = extent;
    let border_thickness = 0;
    let class = x::InputOutput;
    let valuemask = x::CWBackPixel | x::CWBorderPixel | x::CWColormap;
    let mut swa: x::XSetWindowAttributes = mem::zeroed();
    swa.colormap = colormap;
    swa.background_pixel = x::XBlackPixel(x_display, vi.screen);
    swa.border_pixel = 0;

    let x_window = xlib_error::sync_catch(x_display, ErrorKind::Drawable, || {
        x::XCreateWindow(
            x_display, parent, x, y, w, h,
            border_thickness, vi.depth, class as _, vi.visual, valuemask, &mut swa
        )
    });
    match x_window {
        Err(e) => {
            warn!("XCreateWindow() raised {}", e);
            None
        },
        Ok(0) => None,
        Ok(x_window) => Some(x_window),
    }
}

pub unsafe fn set_wm_protocols(x_display: *mut x::Display, x_window: x::Window, protocols: &[x::Atom]) {
    let mut protocols = protocols.to_vec();
    let status = x::XSetWMProtocols(x_display, x_window, protocols.as_mut_ptr(), protocols.len() as _);
    if status == 0 {
        warn!("XSetWMProtocols() failed");
    }
}

pub fn set_motif_hints(x_display: *mut x::Display, x_window: x::Window, atoms: &PreloadedAtoms, hints: &wm::motif::Hints) {
    let data = hints.into_array();
    let prop = atoms._MOTIF_WM_HINTS;
    if let Err(e) = prop::replace(x_display, x_window, prop, prop, &data[..]) {
        warn!("Could not set _MOTIF_WM_HINTS: {}", e);
    }
}

// XSizeHints stores sizes as C ints.
fn dimension(v: u32) -> c_int {
    cmp::min(v, c_int::max_value() as u32) as c_int
}

// Xlib strings end at the first NUL, so those are dropped rather than losing the whole title.
fn title_cstring(title: &str) -> CString {
    match CString::new(title) {
        Ok(s) => s,
        Err(e) => {
            warn!("Window title {:?} contains a NUL byte; removing it", title);
            let mut bytes = e.into_vec();
            bytes.retain(|b| *b != 0);
            CString::new(bytes).unwrap_or_default()
        },
    }
}

pub unsafe fn set_size_hints(x_display: *mut x::Display, x_window: x::Window, hints: &wm::SizeHints) {
    let size_hints = x::XAllocSizeHints();
    if size_hints.is_null() {
        warn!("XAllocSizeHints() returned NULL");
        return;
    }
    {
        let sh = &mut *size_hints;
        sh.flags = x::PMinSize | x::PMaxSize;
        sh.min_width = dimension(hints.min.w);
        sh.min_height = dimension(hints.min.h);
        sh.max_width = dimension(hints.max.w);
        sh.max_height = dimension(hints.max.h);
    }
    x::XSetWMNormalHints(x_display, x_window, size_hints);
    x::XFree(size_hints as *mut _);
}

pub unsafe fn set_title(x_display: *mut x::Display, x_window: x::Window, atoms: &PreloadedAtoms, title: &str) {
    let title = title_cstring(title);
    x::XStoreName(x_display, x_window, title.as_ptr());
    let utf8: &[c_uchar] = title.as_bytes();
    if let Err(e) = prop::replace(x_display, x_window, atoms._NET_WM_NAME, atoms.UTF8_STRING, utf8) {
        warn!("Could not set _NET_WM_NAME: {}", e);
    }
}

pub fn set_pid(x_display: *mut x::Display, x_window: x::Window, atoms: &PreloadedAtoms) {
    let pid = unsafe { libc::getpid() };
    if pid <= 0 {
        return;
    }
    let data = [pid as c_ulong];
    if let Err(e) = prop::replace(x_display, x_window, atoms._NET_WM_PID, x::XA_CARDINAL, &data[..]) {
        warn!("Could not set _NET_WM_PID: {}", e);
    }
}

pub unsafe fn select_key_press_input(x_display: *mut x::Display, x_window: x::Window) {
    x::XSelectInput(x_display, x_window, x::KeyPressMask);
}

pub unsafe fn move_window(x_display: *mut x::Display, x_window: x::Window, position: Vec2<i32>) {
    x::XMoveWindow(x_display, x_window, position.x, position.y);
}
