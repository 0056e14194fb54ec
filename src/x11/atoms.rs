use std::ffi::CString;
use super::x11::xlib as x;

/// Interns `name`, creating the atom if it doesn't exist yet.
pub fn intern(x_display: *mut x::Display, name: &str) -> x::Atom {
    let name = match CString::new(name) {
        Ok(name) => name,
        Err(_) => {
            warn!("Atom name {:?} contains a NUL byte", name);
            return 0;
        },
    };
    unsafe {
        x::XInternAtom(x_display, name.as_ptr(), x::False)
    }
}

/// Generate this module's `PreloadedAtoms` struct, where all atoms are
/// interned once when opening a display.
macro_rules! atoms {
    ($($atom:ident)+) => {
        #[allow(non_snake_case)]
        #[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
        pub struct PreloadedAtoms {
            $(pub $atom: x::Atom,)+
        }
        impl PreloadedAtoms {
            pub fn load(x_display: *mut x::Display) -> Self {
                Self { $(
                    $atom: {
                        let atom = intern(x_display, stringify!($atom));
                        trace!("Interned atom {} = {}", stringify!($atom), atom);
                        atom
                    },
                )+ }
            }
        }
    }
}

atoms!(
    UTF8_STRING
    WM_DELETE_WINDOW
    _MOTIF_WM_HINTS
    _NET_WM_NAME
    _NET_WM_PID
);
