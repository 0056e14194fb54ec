//! The `Session` structure, which owns every native resource of a surface.
//!
//! A `Session` only exists in the ready state: `initialize()` either returns
//! a fully set-up session, or releases whatever it acquired and returns an
//! `Error`. Dropping the session (or calling `shutdown()`) tears everything
//! down in the reverse order of creation.

use vek::{Extent2, Vec2};
use backend::{Backend, DrawableKind, Event, PbufferAttribs};
use cleanup::{CleanupStack, Resource};
use error::{Error, ErrorKind, Result, failed};
use settings::SurfaceSettings;
use version::{Capability, GlxVersion};
use wm::Layout;

/// Lifecycle of a surface, as reported in logs.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum SessionState {
    #[allow(missing_docs)]
    Uninitialized,
    #[allow(missing_docs)]
    Initializing,
    /// The only state in which a `Session` value exists.
    Ready,
    #[allow(missing_docs)]
    Closing,
    #[allow(missing_docs)]
    Closed,
}

/// The X window of a surface, and what is needed to tear it down and to
/// recognize close requests.
#[derive(Debug)]
pub struct SurfaceWindow<B: Backend> {
    #[allow(missing_docs)]
    pub window: B::Window,
    #[allow(missing_docs)]
    pub colormap: B::Colormap,
    /// The `WM_DELETE_WINDOW` atom, registered in `WM_PROTOCOLS`.
    pub wm_delete_window: B::Atom,
}

/// Rendering targets, depending on the GLX version.
///
/// The extended-only handles can only ever exist together.
#[derive(Debug)]
pub enum Targets<B: Backend> {
    /// GLX 1.2 and below.
    Legacy {
        /// Context bound to the window's visual.
        context: B::Context,
    },
    /// GLX 1.3 and above.
    Extended {
        /// GLX window wrapping the X window.
        glx_window: B::GlxWindow,
        /// Context used to render to the window.
        context: B::Context,
        /// Off-screen pixel buffer.
        pbuffer: B::Pbuffer,
        /// Context used to render to `pbuffer`. Shares textures and display
        /// lists with `context`.
        pbuffer_context: B::Context,
    },
}

impl<B: Backend> Targets<B> {
    /// The capability level these targets were created for.
    pub fn capability(&self) -> Capability {
        match *self {
            Targets::Legacy { .. } => Capability::Legacy,
            Targets::Extended { .. } => Capability::Extended,
        }
    }
    /// The context used to render to the window.
    pub fn window_context(&self) -> B::Context {
        match *self {
            Targets::Legacy { context } => context,
            Targets::Extended { context, .. } => context,
        }
    }
}

/// An OpenGL rendering surface: one window, and for GLX 1.3 and above, an
/// off-screen buffer with a second context sharing the window context's
/// objects.
///
/// Meant to be driven from a single thread by a render loop:
/// `pump_events()`, `activate_*()` and `swap()` every frame, then
/// `shutdown()` once.
#[derive(Debug)]
pub struct Session<B: Backend> {
    version: GlxVersion,
    extent: Extent2<u32>,
    fullscreen: bool,
    offscreen_extent: Option<Extent2<u32>>,
    window: SurfaceWindow<B>,
    targets: Targets<B>,
    // Must stay last: dropping it closes the connection.
    backend: B,
}

#[cfg(x11)]
impl Session<::x11::XlibBackend> {
    /// Opens the X display named in `settings` and initializes a session on it.
    pub fn initialize(settings: &SurfaceSettings) -> Result<Self> {
        trace!("Session state: {:?}", SessionState::Uninitialized);
        let display_name = settings.display_name.as_ref().map(|s| s.as_c_str());
        let backend = ::x11::XlibBackend::open(display_name).map_err(|e| {
            error!("{}", e);
            trace!("Session state: {:?}", SessionState::Closed);
            e
        })?;
        Self::with_backend(backend, settings)
    }
}

impl<B: Backend> Session<B> {
    /// Initializes a session on an already opened connection.
    ///
    /// On failure, every resource created so far is released and the
    /// connection is closed.
    pub fn with_backend(backend: B, settings: &SurfaceSettings) -> Result<Self> {
        trace!("Session state: {:?}", SessionState::Initializing);
        let mut stack = CleanupStack::new(backend);
        match Self::acquire(&mut stack, settings) {
            Err(e) => {
                error!("{}", e);
                drop(stack);
                trace!("Session state: {:?}", SessionState::Closed);
                Err(e)
            },
            Ok((version, window, targets)) => {
                let backend = stack.commit();
                let offscreen_extent = match targets {
                    Targets::Extended { .. } => Some(settings.offscreen.extent),
                    Targets::Legacy { .. } => None,
                };
                trace!("Session state: {:?}", SessionState::Ready);
                Ok(Self {
                    version,
                    extent: settings.extent,
                    fullscreen: settings.fullscreen,
                    offscreen_extent,
                    window,
                    targets,
                    backend,
                })
            },
        }
    }

    fn acquire(stack: &mut CleanupStack<B>, settings: &SurfaceSettings)
        -> Result<(GlxVersion, SurfaceWindow<B>, Targets<B>)>
    {
        if !stack.backend().has_glx() {
            return failed(ErrorKind::Capability, "GLX extension not supported");
        }
        let version = stack.backend().glx_version()
            .ok_or_else(|| Error::capability("glXQueryVersion() failed"))?;
        info!("GLX extension version {}", version);
        stack.backend().log_glx_info();

        let capability = Capability::from_version(version);
        info!("Using {} API", capability.api_name());

        let (window, targets) = match capability {
            Capability::Legacy => Self::acquire_legacy(stack, settings)?,
            Capability::Extended => Self::acquire_extended(stack, settings)?,
        };

        let backend = stack.backend();
        backend.map_window(window.window);
        if settings.fullscreen {
            // FIXME: This only moves the window to the origin; it is not
            // resized to the screen and the WM is not told it is fullscreen.
            backend.move_window(window.window, Vec2::zero());
        }
        backend.flush();

        Ok((version, window, targets))
    }

    fn acquire_legacy(stack: &mut CleanupStack<B>, settings: &SurfaceSettings)
        -> Result<(SurfaceWindow<B>, Targets<B>)>
    {
        let visual = stack.backend().choose_visual(&settings.window_format)
            .ok_or_else(|| Error::config("Cannot get GLX 1.2 visual"))?;
        stack.keep_visual(visual);

        let window = Self::create_surface_window(stack, visual, settings)?;

        let context = stack.backend().create_legacy_context(visual)
            .ok_or_else(|| Error::context("Cannot create OpenGL context"))?;
        stack.push(Resource::Context(context));
        stack.free_visual(visual);

        Ok((window, Targets::Legacy { context }))
    }

    fn acquire_extended(stack: &mut CleanupStack<B>, settings: &SurfaceSettings)
        -> Result<(SurfaceWindow<B>, Targets<B>)>
    {
        let config = stack.backend()
            .choose_fb_configs(&settings.window_format, DrawableKind::Window)
            .first().cloned()
            .ok_or_else(|| Error::config("Cannot get FB configurations"))?;

        let visual = stack.backend().visual_from_config(config)
            .ok_or_else(|| Error::config("Cannot get X11 visual"))?;
        stack.keep_visual(visual);

        let window = Self::create_surface_window(stack, visual, settings)?;
        stack.free_visual(visual);

        let glx_window = stack.backend().create_glx_window(config, window.window)
            .ok_or_else(|| Error::drawable("Cannot create GLX window"))?;
        stack.push(Resource::GlxWindow(glx_window));

        let context = stack.backend().create_context(config, None)
            .ok_or_else(|| Error::context("Cannot create OpenGL context"))?;
        stack.push(Resource::Context(context));

        let offscreen = &settings.offscreen;
        let pbuffer_config = stack.backend()
            .choose_fb_configs(&offscreen.format, DrawableKind::Pbuffer)
            .first().cloned()
            .ok_or_else(|| Error::config("Cannot get FB configurations for pbuffer"))?;

        let attribs = PbufferAttribs {
            extent: offscreen.extent,
            preserved_contents: offscreen.preserved_contents,
        };
        let pbuffer = stack.backend().create_pbuffer(pbuffer_config, &attribs)
            .ok_or_else(|| Error::buffer("Failed to create GLX pbuffer"))?;
        stack.push(Resource::Pbuffer(pbuffer));

        let pbuffer_context = stack.backend().create_context(pbuffer_config, Some(context))
            .ok_or_else(|| Error::context("Failed to create pbuffer context"))?;
        stack.push(Resource::Context(pbuffer_context));

        Ok((window, Targets::Extended { glx_window, context, pbuffer, pbuffer_context }))
    }

    // Shared by both paths. The colormap and window are pushed on the stack.
    fn create_surface_window(stack: &mut CleanupStack<B>, visual: B::Visual, settings: &SurfaceSettings)
        -> Result<SurfaceWindow<B>>
    {
        let colormap = stack.backend().create_colormap(visual);
        stack.push(Resource::Colormap(colormap));

        let window = stack.backend().create_window(visual, colormap, settings.extent)
            .ok_or_else(|| Error::drawable("XCreateWindow() failed"))?;
        stack.push(Resource::Window(window));

        let backend = stack.backend();
        let wm_delete_window = backend.intern_atom("WM_DELETE_WINDOW");
        backend.set_wm_protocols(window, &[wm_delete_window]);

        match Layout::for_surface(settings.fullscreen, settings.extent) {
            Layout::Undecorated(hints) => backend.set_motif_hints(window, &hints),
            Layout::FixedSize(hints) => backend.set_size_hints(window, &hints),
        }
        if let Some(ref title) = settings.title {
            backend.set_title(window, title);
        }
        backend.set_pid(window);
        backend.select_key_press_input(window);

        Ok(SurfaceWindow { window, colormap, wm_delete_window })
    }

    /// Handles every event that is queued at the time of the call, without
    /// waiting for more.
    ///
    /// Returns `true` as soon as the window manager asks for the window to be
    /// closed; events queued after that one are left for the next call.
    /// Every other event is discarded.
    pub fn pump_events(&mut self) -> bool {
        let queued = self.backend.pending_events();
        for _ in 0..queued {
            match self.backend.next_event() {
                Event::ClientMessage { format: 32, first_word } if first_word == self.window.wm_delete_window => {
                    info!("The window manager asked to close the window");
                    return true;
                },
                Event::ClientMessage { format, first_word } => {
                    trace!("Discarded ClientMessage (format {}, first word {:?})", format, first_word);
                },
                Event::Other(type_) => trace!("Discarded event of type {}", type_),
            }
        }
        false
    }

    /// Makes the off-screen buffer current, with its own context.
    ///
    /// # Panics
    /// Panics if the session uses GLX 1.2 or below, which has no off-screen
    /// buffer. Check `has_offscreen()` first if unsure.
    pub fn activate_offscreen(&mut self) {
        match self.targets {
            Targets::Extended { pbuffer, pbuffer_context, .. } => {
                if !self.backend.make_pbuffer_current(pbuffer, pbuffer_context) {
                    warn!("glXMakeContextCurrent() failed for the pbuffer");
                }
            },
            Targets::Legacy { .. } => panic!(
                "activate_offscreen() called on a session using the {} API, which has no off-screen buffer",
                Capability::Legacy.api_name()
            ),
        }
    }

    /// Makes the window current, with the window's context.
    pub fn activate_window(&mut self) {
        let is_ok = match self.targets {
            Targets::Extended { glx_window, context, .. } =>
                self.backend.make_glx_window_current(glx_window, context),
            Targets::Legacy { context } =>
                self.backend.make_window_current(self.window.window, context),
        };
        if !is_ok {
            warn!("Failed to make the window current");
        }
    }

    /// Presents the window's back buffer.
    pub fn swap(&mut self) {
        match self.targets {
            Targets::Extended { glx_window, .. } => self.backend.swap_glx_window(glx_window),
            Targets::Legacy { .. } => self.backend.swap_window(self.window.window),
        }
    }

    /// Releases every resource and closes the connection.
    ///
    /// This is the same as dropping the session; it exists to make the end of
    /// a render loop explicit. It never fails.
    pub fn shutdown(self) {
        drop(self)
    }

    /// The GLX version reported by the server.
    pub fn glx_version(&self) -> GlxVersion { self.version }
    /// Which set of GLX entry points this session uses.
    pub fn capability(&self) -> Capability { self.targets.capability() }
    /// Whether `activate_offscreen()` may be called.
    pub fn has_offscreen(&self) -> bool { self.capability().is_extended() }
    /// The window size requested at initialization.
    pub fn extent(&self) -> Extent2<u32> { self.extent }
    /// Size of the off-screen buffer, if any.
    pub fn offscreen_extent(&self) -> Option<Extent2<u32>> { self.offscreen_extent }
    #[allow(missing_docs)]
    pub fn is_fullscreen(&self) -> bool { self.fullscreen }
    #[allow(missing_docs)]
    pub fn window(&self) -> &SurfaceWindow<B> { &self.window }
    #[allow(missing_docs)]
    pub fn targets(&self) -> &Targets<B> { &self.targets }
    /// The underlying backend, e.g for getting the raw Xlib `Display`.
    pub fn backend(&self) -> &B { &self.backend }
}

impl<B: Backend> Drop for Session<B> {
    fn drop(&mut self) {
        trace!("Session state: {:?}", SessionState::Closing);
        let backend = &mut self.backend;
        match self.targets {
            Targets::Extended { glx_window, context, pbuffer, pbuffer_context } => {
                backend.destroy_context(pbuffer_context);
                backend.destroy_pbuffer(pbuffer);
                backend.destroy_context(context);
                backend.destroy_glx_window(glx_window);
            },
            Targets::Legacy { context } => {
                backend.destroy_context(context);
            },
        }
        backend.destroy_window(self.window.window);
        backend.free_colormap(self.window.colormap);
        // `backend` is dropped right after this, closing the connection.
        trace!("Session state: {:?}", SessionState::Closed);
    }
}
