// Useful reference: _XPrintDefaultError() in XlibInt.c (X11 sources)

use std::cell::Cell;
use std::os::raw::c_int;
use std::ffi::CStr;
use super::x11::xlib as x;
use error::{ErrorKind, Result, failed};

thread_local! {
    static ERROR_EVENT: Cell<Option<x::XErrorEvent>> = Cell::new(None);
}

fn swapping_error_handlers<T, F: FnMut() -> T>(mut f: F) -> T {
    unsafe {
        let previous_error_handler = x::XSetErrorHandler(Some(our_xlib_error_handler));
        let previous_io_error_handler = x::XSetIOErrorHandler(Some(our_xlib_io_error_handler));
        let out = f();
        x::XSetErrorHandler(previous_error_handler);
        x::XSetIOErrorHandler(previous_io_error_handler);
        out
    }
}

unsafe fn syncing<T, F: FnMut() -> T>(x_display: *mut x::Display, mut f: F) -> T {
    x::XSync(x_display, x::False);
    let out = f();
    x::XSync(x_display, x::False);
    out
}

/// Runs `f` between two `XSync()` calls with our error handler installed.
/// The first X error raised meanwhile is turned into an `Error` of the given kind.
pub unsafe fn sync_catch<T, F: FnMut() -> T>(x_display: *mut x::Display, kind: ErrorKind, mut f: F) -> Result<T> {
    assert!(!x_display.is_null());
    ERROR_EVENT.with(|e| e.set(None));
    let out = swapping_error_handlers(|| syncing(x_display, || f()));
    match ERROR_EVENT.with(Cell::take) {
        None => Ok(out),
        Some(e) => failed(kind, describe(x_display, &e)),
    }
}

unsafe fn describe(x_display: *mut x::Display, e: &x::XErrorEvent) -> String {
    let &x::XErrorEvent {
        resourceid, serial, error_code, request_code, minor_code, ..
    } = e;
    let mut buf = [0_u8; 1024];
    x::XGetErrorText(x_display, error_code as _, buf.as_mut_ptr() as _, buf.len() as _);
    let error_text = CStr::from_ptr(buf.as_ptr() as _).to_string_lossy().into_owned();
    let request_text = if request_code < 128 {
        let number = format!("{}\0", request_code);
        x::XGetErrorDatabaseText(x_display, "XRequest\0".as_ptr() as _, number.as_ptr() as _, "\0".as_ptr() as _, buf.as_mut_ptr() as _, buf.len() as _);
        CStr::from_ptr(buf.as_ptr() as _).to_string_lossy().into_owned()
    } else {
        // Extension requests (GLX among them) only have a major opcode.
        "extension".to_owned()
    };
    format!("X Error {}: {} (resourceid: {}, serial: {}, request_code: {} ({}), minor_code: {})", error_code, error_text, resourceid, serial, request_code, request_text, minor_code)
}

extern fn our_xlib_error_handler(_x_display: *mut x::Display, e: *mut x::XErrorEvent) -> c_int {
    // NOTE: DO NOT make requests to the X server within X error handlers such as this one.
    let e = unsafe { *e };
    ERROR_EVENT.with(|slot| {
        let first = slot.take().or(Some(e));
        slot.set(first);
    });
    0 // The return value is ignored anyway
}
extern fn our_xlib_io_error_handler(_x_display: *mut x::Display) -> c_int {
    // See the man page for XSetIOErrorHandler(). Xlib exits the process after we return.
    error!("An I/O error occured in Xlib; the connection to the X server is lost");
    0
}
