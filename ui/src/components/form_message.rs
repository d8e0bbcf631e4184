use dioxus::prelude::*;

#[derive(PartialEq, Clone, Copy)]
pub enum MessageKind {
    /// Inline validation feedback the user can fix right away.
    Notice,
    Error,
    Success,
}

fn class_for(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Notice => "form-message",
        MessageKind::Error => "form-message form-message--error",
        MessageKind::Success => "form-message form-message--success",
    }
}

#[derive(PartialEq, Clone, Props)]
pub struct FormMessageProps {
    text: String,
    #[props(default = None)]
    title: Option<String>,
    #[props(default = MessageKind::Notice)]
    kind: MessageKind,
}

#[component]
pub fn FormMessage(props: FormMessageProps) -> Element {
    rsx! {
        div { class: class_for(props.kind), role: "alert",
            if let Some(title) = props.title {
                div { class: "form-message__title", "{title}" }
            }
            div { "{props.text}" }
        }
    }
}
