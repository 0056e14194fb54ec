extern crate rustc_version;
use rustc_version::{version, version_meta, Channel};

fn main() {
    let version = version().unwrap();
    assert!(version.major >= 1);
    assert!(version.minor >= 31);

    println!("cargo:rustc-check-cfg=cfg(x11)");
    println!("cargo:rustc-check-cfg=cfg(stable)");
    println!("cargo:rustc-check-cfg=cfg(beta)");
    println!("cargo:rustc-check-cfg=cfg(nightly)");
    println!("cargo:rustc-check-cfg=cfg(dev)");

    match version_meta().unwrap().channel {
        Channel::Stable => {
            println!("cargo:rustc-cfg=stable");
        }
        Channel::Beta => {
            println!("cargo:rustc-cfg=beta");
        }
        Channel::Nightly => {
            println!("cargo:rustc-cfg=nightly");
        }
        Channel::Dev => {
            println!("cargo:rustc-cfg=dev");
        }
    }

    // `cfg!(target_os)` here would describe the host, not the target.
    let target_os = ::std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    match target_os.as_str() {
        "linux" | "freebsd" | "dragonfly" | "openbsd" | "netbsd" => println!("cargo:rustc-cfg=x11"),
        _ => (),
    }
}
