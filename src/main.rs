use dioxus::prelude::*;

mod api;
mod components;
mod config;
mod error;
mod lyric;
mod storage;
mod store;
mod utils;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#c20c0c" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Title { "WY Music" }

        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
