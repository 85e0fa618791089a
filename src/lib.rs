mod api;
mod app;
mod components;
mod error;
mod router;
mod session;
mod types;

use wasm_bindgen::prelude::*;

use crate::app::App;

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("health survey client starting");

    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect_throw("document not available");
    let root = document
        .get_element_by_id("root")
        .expect_throw("missing #root element");
    yew::Renderer::<App>::with_root(root).render();
}
