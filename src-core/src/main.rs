#[cfg(not(target_arch = "wasm32"))]
fn main() {
    std::process::exit(folio_core::cli::run());
}

#[cfg(target_arch = "wasm32")]
fn main() {}
