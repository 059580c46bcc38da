mod app;
mod cache;
mod filter;
mod link;
mod models;
mod settings;
mod speech;
mod state;
mod store;
mod voice;

use app::*;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| {
        view! {
            <App/>
        }
    })
}
