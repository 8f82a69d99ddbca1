#![allow(warnings)]
//! Folio Frontend Entry Point

mod context;
mod store;
mod storage;
mod files;
mod delay;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
