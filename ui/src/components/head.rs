use dioxus::prelude::*;
use fabric_core::APP_NAME;

// The asset macro also minifies some assets like CSS and JS to make bundled smaller
const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

#[component]
pub fn Head() -> Element {
    rsx! {
        document::Title { "{APP_NAME}" }
        document::Stylesheet { rel: "stylesheet", href: MAIN_CSS }
    }
}
