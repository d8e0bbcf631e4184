pub mod config;
pub mod registrar;
mod repo;
pub mod signup;

pub use config::Config;
pub use registrar::{Account, AccountId, HttpRegistrar, LogRegistrar, RegisterError, Registrar};
pub use repo::Repo;
pub use signup::{
    Field, PasswordMismatch, Registration, SignupEvent, SignupForm, Submission, SubmitOutcome,
    reduce,
};

/// Product name shown in the public header.
pub const APP_NAME: &str = "Fabric Stack";
