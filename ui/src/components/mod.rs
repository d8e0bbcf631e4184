//! Shared components for the public pages: page chrome, form controls and the
//! decorative background.

mod blob;
mod button;
mod form_message;
mod head;
mod input;
mod splash;

pub use blob::Blob;
pub use button::{Button, ButtonKind};
pub use form_message::{FormMessage, MessageKind};
pub use head::Head;
pub use input::Input;
pub use splash::Splash;
