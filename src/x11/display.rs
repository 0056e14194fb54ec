use std::ffi::CStr;
use std::os::raw::c_int;
use std::mem;
use std::ptr;
use vek::{Extent2, Vec2};
use super::x11::xlib as x;
use super::x11::glx::*;
use super::atoms::{self, PreloadedAtoms};
use super::{glx, window};
use backend::{Backend, DrawableKind, Event, PbufferAttribs};
use error::{ErrorKind, Result, failed};
use settings::PixelFormat;
use version::GlxVersion;
use wm;

/// An "owned" Xlib `Display` pointer, which is closed when dropped.
#[derive(Debug)]
struct OwnedDisplay(*mut x::Display);

impl Drop for OwnedDisplay {
    fn drop(&mut self) {
        unsafe {
            close_x_display(self.0)
        }
    }
}

unsafe fn close_x_display(x_display: *mut x::Display) {
    x::XSync(x_display, x::False);
    let name = {
        let p = x::XDisplayString(x_display);
        CStr::from_ptr(p).to_string_lossy().into_owned()
        // ^ into_owned() is critical here to clone the C string
        // before closing the display.
    };
    x::XCloseDisplay(x_display);
    trace!("Closed X Display `{}`", name);
}

/// The Xlib/GLX implementation of `Backend`.
///
/// It **owns** an Xlib `Display` pointer, which is closed when dropped.
/// Being built on a raw pointer, it is neither `Send` nor `Sync`.
#[derive(Debug)]
pub struct XlibBackend {
    x11_owned_display: OwnedDisplay,
    screen_num: c_int,
    atoms: PreloadedAtoms,
}

impl XlibBackend {
    /// Opens the display named `x_display_name`, or `$DISPLAY` if `None`.
    pub fn open(x_display_name: Option<&CStr>) -> Result<Self> {
        let x_display_name_ptr = match x_display_name {
            Some(s) => s.as_ptr(),
            None => ptr::null(),
        };
        let x_display = unsafe {
            x::XOpenDisplay(x_display_name_ptr)
        };
        let actual_name = unsafe {
            // NOTE: Still works if x_display is NULL. That's the point.
            CStr::from_ptr(x::XDisplayString(x_display)).to_string_lossy()
        };
        if x_display.is_null() {
            return failed(ErrorKind::Connection, format!("Failed to open X display `{}`", actual_name));
        }
        trace!("Opened X Display `{}`", actual_name);
        unsafe {
            Ok(Self::from_xlib_display(x_display))
        }
    }

    /// **Transfers ownership** of an existing, valid Xlib `Display` pointer.
    ///
    /// This function is unsafe because there's no guarantee that the pointer is valid.
    pub unsafe fn from_xlib_display(x_display: *mut x::Display) -> Self {
        assert!(!x_display.is_null());
        let protocol_version  = x::XProtocolVersion(x_display);
        let protocol_revision = x::XProtocolRevision(x_display);
        let server_vendor     = CStr::from_ptr(x::XServerVendor(x_display)).to_string_lossy();
        trace!("X protocol version {}, revision {}", protocol_version, protocol_revision);
        trace!("X server vendor: `{}`, release {}", server_vendor, x::XVendorRelease(x_display));
        Self {
            screen_num: x::XDefaultScreen(x_display),
            atoms: PreloadedAtoms::load(x_display),
            x11_owned_display: OwnedDisplay(x_display),
        }
    }

    /// Gets the `Display` pointer.
    ///
    /// Be careful: It is closed when the `XlibBackend` is dropped.
    pub fn xlib_display(&self) -> *mut x::Display {
        self.x11_owned_display.0
    }

    /// Calls `XSynchronize` to enable or disable synchronous behaviour.
    ///
    /// This should be avoided but is useful for debugging.
    pub fn xlib_xsynchronize(&self, enable: bool) {
        unsafe {
            x::XSynchronize(self.xlib_display(), enable as _);
        }
    }
}

impl Backend for XlibBackend {
    type Window = x::Window;
    type Colormap = x::Colormap;
    type Atom = x::Atom;
    type Visual = *mut x::XVisualInfo;
    type Config = GLXFBConfig;
    type Context = GLXContext;
    type GlxWindow = GLXWindow;
    type Pbuffer = GLXPbuffer;

    fn has_glx(&mut self) -> bool {
        unsafe { glx::has_glx(self.xlib_display()) }
    }
    fn glx_version(&mut self) -> Option<GlxVersion> {
        unsafe { glx::query_version(self.xlib_display()) }
    }
    fn log_glx_info(&mut self) {
        unsafe { glx::log_info(self.xlib_display(), self.screen_num) }
    }

    fn choose_visual(&mut self, format: &PixelFormat) -> Option<Self::Visual> {
        unsafe { glx::choose_visual(self.xlib_display(), self.screen_num, format) }
    }
    fn choose_fb_configs(&mut self, format: &PixelFormat, drawable: DrawableKind) -> Vec<Self::Config> {
        unsafe { glx::choose_fb_configs(self.xlib_display(), self.screen_num, format, drawable) }
    }
    fn visual_from_config(&mut self, config: Self::Config) -> Option<Self::Visual> {
        unsafe { glx::visual_from_config(self.xlib_display(), config) }
    }
    fn free_visual(&mut self, visual: Self::Visual) {
        unsafe { x::XFree(visual as *mut _); }
    }

    fn create_colormap(&mut self, visual: Self::Visual) -> Self::Colormap {
        unsafe { window::create_colormap(self.xlib_display(), visual) }
    }
    fn free_colormap(&mut self, colormap: Self::Colormap) {
        let x_display = self.xlib_display();
        unsafe { glx::release(x_display, "XFreeColormap", || { x::XFreeColormap(x_display, colormap); }) }
    }
    fn create_window(&mut self, visual: Self::Visual, colormap: Self::Colormap, extent: Extent2<u32>) -> Option<Self::Window> {
        unsafe { window::create_window(self.xlib_display(), visual, colormap, extent) }
    }
    fn destroy_window(&mut self, x_window: Self::Window) {
        let x_display = self.xlib_display();
        unsafe { glx::release(x_display, "XDestroyWindow", || { x::XDestroyWindow(x_display, x_window); }) }
    }

    fn intern_atom(&mut self, name: &str) -> Self::Atom {
        match name {
            "WM_DELETE_WINDOW" => self.atoms.WM_DELETE_WINDOW,
            _ => atoms::intern(self.xlib_display(), name),
        }
    }
    fn set_wm_protocols(&mut self, x_window: Self::Window, protocols: &[Self::Atom]) {
        unsafe { window::set_wm_protocols(self.xlib_display(), x_window, protocols) }
    }
    fn set_motif_hints(&mut self, x_window: Self::Window, hints: &wm::motif::Hints) {
        window::set_motif_hints(self.xlib_display(), x_window, &self.atoms, hints)
    }
    fn set_size_hints(&mut self, x_window: Self::Window, hints: &wm::SizeHints) {
        unsafe { window::set_size_hints(self.xlib_display(), x_window, hints) }
    }
    fn set_title(&mut self, x_window: Self::Window, title: &str) {
        unsafe { window::set_title(self.xlib_display(), x_window, &self.atoms, title) }
    }
    fn set_pid(&mut self, x_window: Self::Window) {
        window::set_pid(self.xlib_display(), x_window, &self.atoms)
    }
    fn select_key_press_input(&mut self, x_window: Self::Window) {
        unsafe { window::select_key_press_input(self.xlib_display(), x_window) }
    }
    fn map_window(&mut self, x_window: Self::Window) {
        unsafe { x::XMapWindow(self.xlib_display(), x_window); }
    }
    fn move_window(&mut self, x_window: Self::Window, position: Vec2<i32>) {
        unsafe { window::move_window(self.xlib_display(), x_window, position) }
    }
    /// XFlush() flushes the output buffer.
    fn flush(&mut self) {
        unsafe { x::XFlush(self.xlib_display()); }
    }

    fn create_legacy_context(&mut self, visual: Self::Visual) -> Option<Self::Context> {
        unsafe { glx::create_legacy_context(self.xlib_display(), visual) }
    }
    fn create_context(&mut self, config: Self::Config, share: Option<Self::Context>) -> Option<Self::Context> {
        unsafe { glx::create_context(self.xlib_display(), config, share) }
    }
    fn destroy_context(&mut self, ctx: Self::Context) {
        let x_display = self.xlib_display();
        unsafe { glx::release(x_display, "glXDestroyContext", || glXDestroyContext(x_display, ctx)) }
    }
    fn create_glx_window(&mut self, config: Self::Config, x_window: Self::Window) -> Option<Self::GlxWindow> {
        unsafe { glx::create_window(self.xlib_display(), config, x_window) }
    }
    fn destroy_glx_window(&mut self, glx_window: Self::GlxWindow) {
        let x_display = self.xlib_display();
        unsafe { glx::release(x_display, "glXDestroyWindow", || glXDestroyWindow(x_display, glx_window)) }
    }
    fn create_pbuffer(&mut self, config: Self::Config, attribs: &PbufferAttribs) -> Option<Self::Pbuffer> {
        unsafe { glx::create_pbuffer(self.xlib_display(), config, attribs) }
    }
    fn destroy_pbuffer(&mut self, pbuffer: Self::Pbuffer) {
        let x_display = self.xlib_display();
        unsafe { glx::release(x_display, "glXDestroyPbuffer", || glXDestroyPbuffer(x_display, pbuffer)) }
    }

    fn make_window_current(&mut self, x_window: Self::Window, ctx: Self::Context) -> bool {
        unsafe { glx::make_current(self.xlib_display(), x_window, ctx) }
    }
    fn make_glx_window_current(&mut self, glx_window: Self::GlxWindow, ctx: Self::Context) -> bool {
        unsafe { glx::make_context_current(self.xlib_display(), glx_window, ctx) }
    }
    fn make_pbuffer_current(&mut self, pbuffer: Self::Pbuffer, ctx: Self::Context) -> bool {
        unsafe { glx::make_context_current(self.xlib_display(), pbuffer, ctx) }
    }
    fn swap_window(&mut self, x_window: Self::Window) {
        unsafe { glXSwapBuffers(self.xlib_display(), x_window) }
    }
    fn swap_glx_window(&mut self, glx_window: Self::GlxWindow) {
        unsafe { glXSwapBuffers(self.xlib_display(), glx_window) }
    }

    fn pending_events(&mut self) -> usize {
        unsafe { x::XPending(self.xlib_display()).max(0) as usize }
    }
    fn next_event(&mut self) -> Event<Self::Atom> {
        unsafe {
            let mut e: x::XEvent = mem::zeroed();
            x::XNextEvent(self.xlib_display(), &mut e);
            match e.get_type() {
                x::ClientMessage => {
                    let xclient = x::XClientMessageEvent::from(e);
                    Event::ClientMessage {
                        format: xclient.format,
                        first_word: xclient.data.get_long(0) as x::Atom,
                    }
                },
                other => Event::Other(other),
            }
        }
    }
}
