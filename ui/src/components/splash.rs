use dioxus::prelude::*;
use fabric_core::APP_NAME;

/// Shown while app state loads, or in place of the app when loading failed.
#[component]
pub fn Splash(
    #[props(default = None)]
    error: Option<String>,
) -> Element {
    rsx! {
        div { class: "splash",
            h1 { "{APP_NAME}" }
            if let Some(err) = error {
                div { class: "form-message form-message--error",
                    div { class: "form-message__title", "Couldn't start" }
                    div { "{err}" }
                }
            } else {
                p { "Loading…" }
            }
        }
    }
}
