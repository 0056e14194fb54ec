extern crate env_logger;
extern crate glxsurface;
#[macro_use]
extern crate log;

use std::time::{Duration, Instant};
use std::thread::sleep;

use glxsurface::{XlibSession, SurfaceSettings};

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "trace");
    }
    env_logger::init();

    let fullscreen = std::env::args().any(|arg| arg == "--fullscreen");
    let settings = SurfaceSettings {
        title: Some("GLX surface".to_owned()),
        .. SurfaceSettings::new(400, 300, fullscreen)
    };
    let mut session = XlibSession::initialize(&settings).expect("Couldn't initialize the surface!");
    info!("Using {} (offscreen: {:?})", session.capability().api_name(), session.offscreen_extent());

    let start = Instant::now();
    let mut frames = 0_u64;
    while start.elapsed() < Duration::from_secs(5) {
        if session.pump_events() {
            info!("Close requested");
            break;
        }
        if session.has_offscreen() {
            session.activate_offscreen();
        }
        session.activate_window();
        session.swap();
        frames += 1;
        sleep(Duration::from_millis(16));
    }
    info!("Swapped {} frames", frames);
    session.shutdown();
}
