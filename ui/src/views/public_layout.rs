use dioxus::prelude::*;
use fabric_core::APP_NAME;

use crate::{components::Blob, Route};

/// Chrome shared by all signed-out pages: a fixed header above the content region the router
/// renders into.
#[component]
pub fn PublicLayout() -> Element {
    rsx! {
        header { class: "public-header",
            h1 { "{APP_NAME}" }
        }
        main { class: "public-content",
            Blob {}
            Outlet::<Route> {}
        }
    }
}
