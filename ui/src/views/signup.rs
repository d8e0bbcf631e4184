use dioxus::prelude::*;
use fabric_core::{Account, Field, SignupEvent, SignupForm, SubmitOutcome};
use tracing::warn;
use uuid::Uuid;

use crate::{
    components::{Button, FormMessage, Input, MessageKind},
    state::AppState,
    Route,
};

/// Progress of handing a validated signup to the registrar.
#[derive(Debug, Clone, PartialEq)]
enum HandOff {
    Idle,
    Pending,
    Sent(Account),
    Failed(String),
}

fn label_for(field: Field) -> &'static str {
    match field {
        Field::FullName => "Full name:",
        Field::Username => "Username:",
        Field::Password => "Password:",
        Field::ConfirmPassword => "Confirm Password:",
    }
}

fn sent_notice(account: &Account) -> String {
    format!("Account request sent for {}", account.username)
}

fn input_type(field: Field) -> &'static str {
    if field.is_secret() {
        "password"
    } else {
        "text"
    }
}

#[component]
pub fn Signup() -> Element {
    let state = consume_context::<AppState>();
    let mut form = use_signal(SignupForm::default);
    let mut hand_off = use_signal(|| HandOff::Idle);
    // Unique per mount so labels stay tied to their own inputs.
    let mount_id = use_hook(|| Uuid::new_v4().simple().to_string());

    let message = form.read().message().map(str::to_owned);
    let pending = hand_off() == HandOff::Pending;
    let fields: Vec<(Field, String, String)> = Field::ALL
        .into_iter()
        .map(|field| {
            let id = format!("{}-{mount_id}", field.id_prefix());
            (field, id, form.read().field(field).to_string())
        })
        .collect();

    let status = match hand_off() {
        HandOff::Sent(account) => rsx! {
            FormMessage {
                kind: MessageKind::Success,
                text: sent_notice(&account),
            }
        },
        HandOff::Failed(err) => rsx! {
            FormMessage {
                kind: MessageKind::Error,
                title: Some("Couldn't sign up".to_string()),
                text: err,
            }
        },
        HandOff::Idle | HandOff::Pending => rsx! {},
    };

    rsx! {
        div { class: "public-page",
            h2 { "Sign up" }
            form {
                class: "signup-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    if hand_off() == HandOff::Pending {
                        return;
                    }
                    hand_off.set(HandOff::Idle);
                    let outcome = form.write().apply(SignupEvent::Submit);
                    let Some(SubmitOutcome::Accepted(submission)) = outcome else {
                        return;
                    };
                    let registrar = state.registrar();
                    hand_off.set(HandOff::Pending);
                    spawn(async move {
                        let next = match registrar.register(submission.registration()).await {
                            Ok(account) => HandOff::Sent(account),
                            Err(err) => {
                                warn!("signup hand-off failed: {err}");
                                HandOff::Failed(err.to_string())
                            }
                        };
                        hand_off.set(next);
                    });
                },
                if let Some(message) = message {
                    FormMessage { text: message }
                }
                for (field, id, value) in fields {
                    Input {
                        key: "{id}",
                        id: Some(id.clone()),
                        label: Some(label_for(field).to_string()),
                        r#type: input_type(field),
                        value: "{value}",
                        required: true,
                        oninput: move |e: FormEvent| {
                            form.write().apply(SignupEvent::input(field, e.value()));
                        },
                    }
                }
                {status}
                Button {
                    text: if pending { "Signing up…".to_string() } else { "Sign up".to_string() },
                    disabled: pending,
                    class: if pending { Some("button--busy".to_string()) } else { None },
                }
                div { class: "signup-form__footer",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Log in" }
                }
            }
        }
    }
}
