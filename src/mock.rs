//! A `Backend` that records every native call instead of making it.
//!
//! Handles are plain `u32`s handed out sequentially. `Script` decides what
//! the fake server supports and which creation calls fail.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use vek::{Extent2, Vec2};
use backend::{Backend, DrawableKind, Event, PbufferAttribs};
use settings::PixelFormat;
use version::GlxVersion;
use wm;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    HasGlx,
    GlxVersion,
    ChooseVisual(PixelFormat),
    ChooseFbConfigs(PixelFormat, DrawableKind),
    VisualFromConfig(u32),
    FreeVisual(u32),
    CreateColormap(u32),
    FreeColormap(u32),
    CreateWindow { visual: u32, colormap: u32, extent: Extent2<u32> },
    DestroyWindow(u32),
    InternAtom(String),
    SetWmProtocols(u32, Vec<u32>),
    SetMotifHints(u32, wm::motif::Hints),
    SetSizeHints(u32, wm::SizeHints),
    SetTitle(u32, String),
    SetPid(u32),
    SelectKeyPressInput(u32),
    MapWindow(u32),
    MoveWindow(u32, Vec2<i32>),
    Flush,
    CreateLegacyContext(u32),
    CreateContext { config: u32, share: Option<u32> },
    DestroyContext(u32),
    CreateGlxWindow { config: u32, window: u32 },
    DestroyGlxWindow(u32),
    CreatePbuffer { config: u32, attribs: PbufferAttribs },
    DestroyPbuffer(u32),
    MakeWindowCurrent(u32, u32),
    MakeGlxWindowCurrent(u32, u32),
    MakePbufferCurrent(u32, u32),
    SwapWindow(u32),
    SwapGlxWindow(u32),
    PendingEvents,
    NextEvent,
    Close,
}

/// What the fake server supports.
#[derive(Debug, Clone)]
pub struct Script {
    pub has_glx: bool,
    pub version: Option<GlxVersion>,
    pub visual_available: bool,
    pub window_configs: usize,
    pub pbuffer_configs: usize,
    pub visual_from_config: bool,
    pub fail_window: bool,
    pub fail_glx_window: bool,
    pub fail_pbuffer: bool,
    /// Zero-based index of the context creation that fails.
    pub fail_context: Option<usize>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            has_glx: true,
            version: Some(GlxVersion::new(1, 4)),
            visual_available: true,
            window_configs: 3,
            pbuffer_configs: 2,
            visual_from_config: true,
            fail_window: false,
            fail_glx_window: false,
            fail_pbuffer: false,
            fail_context: None,
        }
    }
}

impl Script {
    pub fn with_version(major: i32, minor: i32) -> Self {
        Self { version: Some(GlxVersion::new(major, minor)), .. Default::default() }
    }
}

#[derive(Debug, Default)]
pub struct MockState {
    pub calls: Vec<Call>,
    pub events: VecDeque<Event<u32>>,
    /// Contexts mapped to the ID of their object namespace.
    pub namespaces: HashMap<u32, u32>,
    /// Every list returned by `choose_fb_configs()`, in call order.
    pub fb_configs: Vec<Vec<u32>>,
    pub closed: bool,
    atoms: HashMap<String, u32>,
    next_id: u32,
    contexts_created: usize,
}

impl MockState {
    fn alloc(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
    pub fn atom(&self, name: &str) -> Option<u32> {
        self.atoms.get(name).cloned()
    }
    pub fn count(&self, f: fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| f(c)).count()
    }
    pub fn position(&self, call: &Call) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }
    /// Calls made after the first `Call::Flush`, i.e after initialization.
    pub fn calls_after_init(&self) -> Vec<Call> {
        let start = self.calls.iter().position(|c| *c == Call::Flush).map(|i| i + 1).unwrap_or(0);
        self.calls[start..].to_vec()
    }
}

#[derive(Debug)]
pub struct MockBackend {
    script: Script,
    state: Rc<RefCell<MockState>>,
}

impl MockBackend {
    pub fn new(script: Script) -> (Self, Rc<RefCell<MockState>>) {
        let state = Rc::new(RefCell::new(MockState::default()));
        (Self { script, state: Rc::clone(&state) }, state)
    }
    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
    fn alloc(&self) -> u32 {
        self.state.borrow_mut().alloc()
    }
    fn new_context(&self, share: Option<u32>) -> Option<u32> {
        let mut state = self.state.borrow_mut();
        let nth = state.contexts_created;
        state.contexts_created += 1;
        if self.script.fail_context == Some(nth) {
            return None;
        }
        let id = state.alloc();
        let namespace = match share {
            Some(share) => state.namespaces.get(&share).cloned().unwrap_or(share),
            None => id,
        };
        state.namespaces.insert(id, namespace);
        Some(id)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.record(Call::Close);
        self.state.borrow_mut().closed = true;
    }
}

impl Backend for MockBackend {
    type Window = u32;
    type Colormap = u32;
    type Atom = u32;
    type Visual = u32;
    type Config = u32;
    type Context = u32;
    type GlxWindow = u32;
    type Pbuffer = u32;

    fn has_glx(&mut self) -> bool {
        self.record(Call::HasGlx);
        self.script.has_glx
    }
    fn glx_version(&mut self) -> Option<GlxVersion> {
        self.record(Call::GlxVersion);
        self.script.version
    }
    fn choose_visual(&mut self, format: &PixelFormat) -> Option<u32> {
        self.record(Call::ChooseVisual(*format));
        if self.script.visual_available { Some(self.alloc()) } else { None }
    }
    fn choose_fb_configs(&mut self, format: &PixelFormat, drawable: DrawableKind) -> Vec<u32> {
        self.record(Call::ChooseFbConfigs(*format, drawable));
        let n = match drawable {
            DrawableKind::Window => self.script.window_configs,
            DrawableKind::Pbuffer => self.script.pbuffer_configs,
        };
        let configs = (0..n).map(|_| self.alloc()).collect::<Vec<_>>();
        self.state.borrow_mut().fb_configs.push(configs.clone());
        configs
    }
    fn visual_from_config(&mut self, config: u32) -> Option<u32> {
        self.record(Call::VisualFromConfig(config));
        if self.script.visual_from_config { Some(self.alloc()) } else { None }
    }
    fn free_visual(&mut self, visual: u32) {
        self.record(Call::FreeVisual(visual));
    }
    fn create_colormap(&mut self, visual: u32) -> u32 {
        self.record(Call::CreateColormap(visual));
        self.alloc()
    }
    fn free_colormap(&mut self, colormap: u32) {
        self.record(Call::FreeColormap(colormap));
    }
    fn create_window(&mut self, visual: u32, colormap: u32, extent: Extent2<u32>) -> Option<u32> {
        self.record(Call::CreateWindow { visual, colormap, extent });
        if self.script.fail_window { None } else { Some(self.alloc()) }
    }
    fn destroy_window(&mut self, window: u32) {
        self.record(Call::DestroyWindow(window));
    }
    fn intern_atom(&mut self, name: &str) -> u32 {
        self.record(Call::InternAtom(name.to_owned()));
        let existing = self.state.borrow().atoms.get(name).cloned();
        existing.unwrap_or_else(|| {
            let id = self.alloc();
            self.state.borrow_mut().atoms.insert(name.to_owned(), id);
            id
        })
    }
    fn set_wm_protocols(&mut self, window: u32, protocols: &[u32]) {
        self.record(Call::SetWmProtocols(window, protocols.to_vec()));
    }
    fn set_motif_hints(&mut self, window: u32, hints: &wm::motif::Hints) {
        self.record(Call::SetMotifHints(window, *hints));
    }
    fn set_size_hints(&mut self, window: u32, hints: &wm::SizeHints) {
        self.record(Call::SetSizeHints(window, *hints));
    }
    fn set_title(&mut self, window: u32, title: &str) {
        self.record(Call::SetTitle(window, title.to_owned()));
    }
    fn set_pid(&mut self, window: u32) {
        self.record(Call::SetPid(window));
    }
    fn select_key_press_input(&mut self, window: u32) {
        self.record(Call::SelectKeyPressInput(window));
    }
    fn map_window(&mut self, window: u32) {
        self.record(Call::MapWindow(window));
    }
    fn move_window(&mut self, window: u32, position: Vec2<i32>) {
        self.record(Call::MoveWindow(window, position));
    }
    fn flush(&mut self) {
        self.record(Call::Flush);
    }
    fn create_legacy_context(&mut self, visual: u32) -> Option<u32> {
        self.record(Call::CreateLegacyContext(visual));
        self.new_context(None)
    }
    fn create_context(&mut self, config: u32, share: Option<u32>) -> Option<u32> {
        self.record(Call::CreateContext { config, share });
        self.new_context(share)
    }
    fn destroy_context(&mut self, context: u32) {
        self.record(Call::DestroyContext(context));
    }
    fn create_glx_window(&mut self, config: u32, window: u32) -> Option<u32> {
        self.record(Call::CreateGlxWindow { config, window });
        if self.script.fail_glx_window { None } else { Some(self.alloc()) }
    }
    fn destroy_glx_window(&mut self, glx_window: u32) {
        self.record(Call::DestroyGlxWindow(glx_window));
    }
    fn create_pbuffer(&mut self, config: u32, attribs: &PbufferAttribs) -> Option<u32> {
        self.record(Call::CreatePbuffer { config, attribs: *attribs });
        if self.script.fail_pbuffer { None } else { Some(self.alloc()) }
    }
    fn destroy_pbuffer(&mut self, pbuffer: u32) {
        self.record(Call::DestroyPbuffer(pbuffer));
    }
    fn make_window_current(&mut self, window: u32, context: u32) -> bool {
        self.record(Call::MakeWindowCurrent(window, context));
        true
    }
    fn make_glx_window_current(&mut self, glx_window: u32, context: u32) -> bool {
        self.record(Call::MakeGlxWindowCurrent(glx_window, context));
        true
    }
    fn make_pbuffer_current(&mut self, pbuffer: u32, context: u32) -> bool {
        self.record(Call::MakePbufferCurrent(pbuffer, context));
        true
    }
    fn swap_window(&mut self, window: u32) {
        self.record(Call::SwapWindow(window));
    }
    fn swap_glx_window(&mut self, glx_window: u32) {
        self.record(Call::SwapGlxWindow(glx_window));
    }
    fn pending_events(&mut self) -> usize {
        self.record(Call::PendingEvents);
        self.state.borrow().events.len()
    }
    fn next_event(&mut self) -> Event<u32> {
        self.record(Call::NextEvent);
        self.state.borrow_mut().events.pop_front().unwrap_or(Event::Other(0))
    }
}
