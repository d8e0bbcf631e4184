use dioxus::prelude::*;

use crate::Route;

#[derive(PartialEq, Clone, Copy)]
pub enum ButtonKind {
    Primary,
    Secondary,
}

#[derive(PartialEq, Clone, Props)]
pub struct ButtonProps {
    text: String,
    /// Renders a router link instead of a button.
    to: Option<Route>,
    #[props(default = ButtonKind::Primary)]
    kind: ButtonKind,
    /// Disabled buttons keep their label but ignore clicks and submits.
    #[props(default = false)]
    disabled: bool,
    /// Additional classes appended to the base button classes
    #[props(default = None)]
    class: Option<String>,
}

fn class_for(kind: ButtonKind) -> &'static str {
    match kind {
        ButtonKind::Primary => "button button--primary",
        ButtonKind::Secondary => "button button--secondary",
    }
}

/// A submit button, or a link styled as one when `to` is set.
#[component]
pub fn Button(props: ButtonProps) -> Element {
    let base = class_for(props.kind);
    let class = match props.class.as_deref() {
        Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
        _ => base.to_string(),
    };

    match props.to {
        Some(to) => rsx! {
            Link { to: to, class: "{class}",
                span { "{props.text}" }
            }
        },
        None => rsx! {
            button {
                class: "{class}",
                r#type: "submit",
                disabled: props.disabled,
                span { "{props.text}" }
            }
        },
    }
}
