use dioxus::prelude::*;
use fabric_core::Repo;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::components::{Head, Splash};
use crate::state::AppState;
use crate::views::{Login, PublicLayout, Signup};

mod components;
mod state;
mod views;

/// Routes of the public (signed-out) part of the client. Every route is rendered inside
/// [`PublicLayout`], which owns the header and the content region.
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(PublicLayout)]
        #[route("/")]
        Login {},
        #[route("/signup")]
        Signup {},
}

fn main() {
    dotenv::dotenv().ok();
    // Keep the guard alive for the lifetime of the app so buffered log lines are flushed.
    let _log_guard = init_tracing();

    #[cfg(feature = "desktop")]
    {
        use dioxus_desktop::{Config, WindowBuilder};

        let window = WindowBuilder::new().with_title(fabric_core::APP_NAME);
        dioxus::LaunchBuilder::new()
            .with_cfg(Config::new().with_window(window))
            .launch(App);
    }

    #[cfg(not(feature = "desktop"))]
    dioxus::launch(App);
}

/// Logs to stderr and, when a log directory is available, to a daily rolling file.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));

    match Repo::default_location() {
        Ok(location) => {
            let appender = tracing_appender::rolling::daily(Repo::log_dir_in(&location), "fabric-ui.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()
                .ok();
            Some(guard)
        }
        Err(err) => {
            registry.try_init().ok();
            error!("file logging disabled: {err}");
            None
        }
    }
}

#[component]
fn App() -> Element {
    let mut app_state_ready = use_signal(|| false);
    let mut load_error = use_signal(|| Option::<String>::None);
    use_future(move || async move {
        match AppState::load().await {
            Ok(state) => {
                info!("app state loaded");
                provide_context(state);
                app_state_ready.set(true);
            }
            Err(err) => {
                error!("failed to load app state: {err:#}");
                load_error.set(Some(err.to_string()));
            }
        }
    });

    if !app_state_ready() {
        return rsx! {
            Head {}
            Splash { error: load_error() }
        };
    }

    rsx! {
        Head {}
        Router::<Route> {}
    }
}
