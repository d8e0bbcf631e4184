use dioxus::prelude::*;

use crate::{
    components::{Button, ButtonKind},
    Route,
};

#[component]
pub fn Login() -> Element {
    rsx! {
        div { class: "public-page",
            h2 { "Log in" }
            p { class: "public-page__note", "Logging in isn't available from this client yet." }
            Button {
                to: Some(Route::Signup {}),
                kind: ButtonKind::Secondary,
                text: "Create an account",
            }
        }
    }
}
