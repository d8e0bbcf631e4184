//! Command line arguments.
use clap::{Parser, Subcommand};
use fabric_core::{Field, Repo, SignupEvent, SignupForm, SubmitOutcome};
use n0_error::StdResultExt;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fabric Stack client
#[derive(Parser, Debug)]
struct Args {
    #[clap(short, long, env = "FABRIC_REPO")]
    repo: Option<PathBuf>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a signup and hand it to the configured account service.
    Signup(SignupArgs),

    /// Print the effective configuration.
    Config,
}

#[derive(Parser, Debug)]
pub struct SignupArgs {
    #[clap(long)]
    pub full_name: String,

    #[clap(long)]
    pub username: String,

    #[clap(long, env = "FABRIC_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Must equal --password.
    #[clap(long, env = "FABRIC_CONFIRM_PASSWORD", hide_env_values = true)]
    pub confirm_password: String,
}

impl SignupArgs {
    /// Replays the arguments as the edits a user would make in the form.
    fn into_form(self) -> SignupForm {
        let mut form = SignupForm::default();
        for (field, value) in [
            (Field::FullName, self.full_name),
            (Field::Username, self.username),
            (Field::Password, self.password),
            (Field::ConfirmPassword, self.confirm_password),
        ] {
            form.apply(SignupEvent::input(field, value));
        }
        form
    }
}

#[tokio::main]
async fn main() -> n0_error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    if let Some(path) = dotenv::dotenv().ok() {
        info!("Loaded environment variables from {}", path.display());
    }

    let args = Args::parse();

    let path = match args.repo {
        Some(path) => path,
        None => Repo::default_location()?,
    };
    let repo = Repo::open_or_create(path).await?;
    let config = repo.config().await?;

    match args.command {
        Commands::Config => {
            let data = serde_yml::to_string(&config).anyerr()?;
            print!("{data}");
        }
        Commands::Signup(args) => {
            let mut form = args.into_form();
            let Some(outcome) = form.apply(SignupEvent::Submit) else {
                n0_error::bail_any!("submitting the form produced no outcome");
            };
            match outcome {
                SubmitOutcome::Accepted(submission) => {
                    let registrar = config.registrar()?;
                    let account = registrar.register(submission.registration()).await?;
                    match account.id {
                        Some(id) => println!("created {} ({id})", account.username),
                        None => println!("submitted {}", account.username),
                    }
                }
                // The error reads the same as the form message.
                SubmitOutcome::Rejected(err) => return Err(err.into()),
            }
        }
    }
    Ok(())
}
