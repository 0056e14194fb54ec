use std::os::raw::{c_ulong, c_long, c_uchar, c_char};
use super::x11::xlib as x;
use super::xlib_error;
use error::{ErrorKind, Result};

/// Types that can be sent as property elements, with the number of bits the
/// server stores for each one.
///
/// NOTE: Format-32 properties are passed to Xlib as arrays of C `long`s,
/// even on 64-bit targets.
pub trait PropElement {
    const SERVER_BITS: usize;
}

impl PropElement for c_ulong  { const SERVER_BITS: usize = 32; }
impl PropElement for c_long   { const SERVER_BITS: usize = 32; }
impl PropElement for c_uchar  { const SERVER_BITS: usize =  8; }
impl PropElement for c_char   { const SERVER_BITS: usize =  8; }

/// `XChangeProperty()` with `PropModeReplace`.
pub fn replace<T: PropElement>(x_display: *mut x::Display, x_window: x::Window, prop: x::Atom, prop_type: x::Atom, data: &[T]) -> Result<()> {
    unsafe {
        xlib_error::sync_catch(x_display, ErrorKind::Drawable, || {
            x::XChangeProperty(x_display, x_window, prop, prop_type, T::SERVER_BITS as _, x::PropModeReplace, data.as_ptr() as *const _, data.len() as _);
        })
    }
}
