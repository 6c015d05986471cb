fn main() {
    // Accessibility and event tap APIs require a reasonably recent macOS.
    println!("cargo:rustc-env=MACOSX_DEPLOYMENT_TARGET=12.0");
}
