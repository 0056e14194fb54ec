//! Window-manager hints written on the surface window.
//!
//! Only the subset needed to make a window undecorated (`_MOTIF_WM_HINTS`)
//! or non-resizable (`WM_NORMAL_HINTS`) lives here.

use std::os::raw::{c_long, c_ulong};
use vek::Extent2;

/// `_MOTIF_WM_HINTS` bits.
pub mod motif {
    use super::*;

    #[allow(missing_docs)]
    pub mod flags {
        use super::*;
        pub const DECORATIONS : c_ulong = 1 << 1;
    }
    #[allow(missing_docs)]
    pub mod decorations {
        use super::*;
        pub const NONE        : c_ulong = 0;
    }

    /// Number of 32-bit elements in the `_MOTIF_WM_HINTS` property.
    pub const ELEMENT_COUNT: usize = 5;

    /// The `_MOTIF_WM_HINTS` property, laid out as the window manager reads it.
    #[allow(missing_docs)]
    #[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
    #[repr(C)]
    pub struct Hints {
        pub flags      : c_ulong,
        pub functions  : c_ulong,
        pub decorations: c_ulong,
        pub input_mode : c_long,
        pub state      : c_ulong,
    }

    impl Hints {
        /// Asks the window manager not to draw any decoration (title bar, borders).
        pub fn undecorated() -> Self {
            Self {
                flags: flags::DECORATIONS,
                decorations: decorations::NONE,
                .. Default::default()
            }
        }
        #[allow(missing_docs)]
        pub fn is_undecorated(&self) -> bool {
            self.flags & flags::DECORATIONS != 0 && self.decorations == decorations::NONE
        }
        #[allow(missing_docs)]
        pub fn into_array(self) -> [c_ulong; ELEMENT_COUNT] {
            let Self { flags, functions, decorations, input_mode, state } = self;
            [flags, functions, decorations, input_mode as _, state]
        }
    }
}

/// The subset of `XSizeHints` we set: minimum and maximum size.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct SizeHints {
    #[allow(missing_docs)]
    pub min: Extent2<u32>,
    #[allow(missing_docs)]
    pub max: Extent2<u32>,
}

impl SizeHints {
    /// Locks the window to a single size, so that it can't be resized.
    pub fn fixed(extent: Extent2<u32>) -> Self {
        Self { min: extent, max: extent }
    }
    #[allow(missing_docs)]
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }
}

/// How the window is laid out by the window manager. Exactly one applies.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Layout {
    /// Borderless, no size constraint.
    Undecorated(motif::Hints),
    /// Decorated, but non-resizable.
    FixedSize(SizeHints),
}

impl Layout {
    /// The layout policy for a fullscreen or windowed surface of the given size.
    pub fn for_surface(fullscreen: bool, extent: Extent2<u32>) -> Self {
        if fullscreen {
            Layout::Undecorated(motif::Hints::undecorated())
        } else {
            Layout::FixedSize(SizeHints::fixed(extent))
        }
    }
}
