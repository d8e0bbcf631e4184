//! Layouts and routed pages. Each variant of [`crate::Route`] renders one of these, and every
//! public page is wrapped in [`PublicLayout`].

mod login;
mod public_layout;
mod signup;

pub use login::Login;
pub use public_layout::PublicLayout;
pub use signup::Signup;
