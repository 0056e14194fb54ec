//! Scoped acquisition of native resources during initialization.
//!
//! Every resource created while setting up a `Session` is pushed on a
//! `CleanupStack`. If initialization bails out (early return or panic), the
//! stack is dropped and releases everything in reverse order, then closes the
//! connection. On success, `commit()` hands the resources over to the session.

use backend::Backend;

/// A native resource that must be released if initialization fails.
#[derive(Debug)]
pub enum Resource<B: Backend> {
    Colormap(B::Colormap),
    Window(B::Window),
    Context(B::Context),
    GlxWindow(B::GlxWindow),
    Pbuffer(B::Pbuffer),
}

impl<B: Backend> Resource<B> {
    fn release(self, backend: &mut B) {
        trace!("Releasing {:?}", self);
        match self {
            Resource::Colormap(c) => backend.free_colormap(c),
            Resource::Window(w) => backend.destroy_window(w),
            Resource::Context(c) => backend.destroy_context(c),
            Resource::GlxWindow(w) => backend.destroy_glx_window(w),
            Resource::Pbuffer(p) => backend.destroy_pbuffer(p),
        }
    }
}

/// Owns the backend while a `Session` is being initialized.
#[derive(Debug)]
pub struct CleanupStack<B: Backend> {
    // Only `None` while being committed or dropped.
    backend: Option<B>,
    acquired: Vec<Resource<B>>,
    // Visuals are only needed during initialization, and always freed.
    visuals: Vec<B::Visual>,
}

impl<B: Backend> CleanupStack<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Some(backend),
            acquired: Vec::with_capacity(6),
            visuals: Vec::with_capacity(1),
        }
    }
    pub fn backend(&mut self) -> &mut B {
        self.backend.as_mut().expect("CleanupStack used after commit")
    }
    pub fn push(&mut self, resource: Resource<B>) {
        trace!("Acquired {:?}", resource);
        self.acquired.push(resource);
    }
    /// Tracks a visual until `free_visual()`, `commit()` or drop.
    pub fn keep_visual(&mut self, visual: B::Visual) {
        self.visuals.push(visual);
    }
    pub fn free_visual(&mut self, visual: B::Visual) {
        if let Some(i) = self.visuals.iter().position(|v| *v == visual) {
            self.visuals.remove(i);
            self.backend().free_visual(visual);
        }
    }
    fn free_all_visuals(&mut self) {
        while let Some(visual) = self.visuals.pop() {
            self.backend().free_visual(visual);
        }
    }
    /// Keeps every acquired resource alive and returns the backend.
    pub fn commit(mut self) -> B {
        self.free_all_visuals();
        self.acquired.clear();
        self.backend.take().expect("CleanupStack committed twice")
    }
}

impl<B: Backend> Drop for CleanupStack<B> {
    fn drop(&mut self) {
        let mut backend = match self.backend.take() {
            Some(backend) => backend,
            None => return, // Committed
        };
        while let Some(visual) = self.visuals.pop() {
            backend.free_visual(visual);
        }
        while let Some(resource) = self.acquired.pop() {
            resource.release(&mut backend);
        }
        // Closes the connection.
        drop(backend);
    }
}
