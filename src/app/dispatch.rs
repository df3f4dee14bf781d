use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use bookwise::Config;
use bookwise::api::HttpApiClient;
use bookwise::avatar::{AvatarOutcome, AvatarSync, FilePicker};
use bookwise::forms::profile::prefill;
use bookwise::forms::{
    EMAIL, NAME, OLD_PASSWORD, PASSWORD, PASSWORD_CONFIRMATION, ProfileUpdateFlow, SignInFlow,
    SignUpFlow,
};
use bookwise::session::{FileSessionStore, SessionStore};
use bookwise::submission::{Collaborators, FormFlow, SubmissionOrchestrator, SubmitOutcome};
use bookwise::ui::{ConsoleFieldErrors, ConsoleNotifier, style};
use bookwise::validation::FormInput;
use dialoguer::Password;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;

fn prompt_password(prompt: &str) -> Result<String> {
    if !std::io::stdin().is_terminal() {
        bail!("--password is required in non-interactive mode");
    }
    Password::new()
        .with_prompt(format!("{prompt} (input hidden)"))
        .allow_empty_password(true)
        .interact()
        .context("Failed to read password from terminal")
}

fn collaborators(config: &Config) -> Result<Collaborators> {
    let session: Arc<dyn SessionStore> = Arc::new(
        FileSessionStore::open(config.session_path()).context("Failed to open session store")?,
    );
    let api = HttpApiClient::new(&config.api).with_session(Arc::clone(&session));
    Ok(Collaborators {
        api: Arc::new(api),
        session,
        fields: Arc::new(ConsoleFieldErrors),
        notifier: Arc::new(ConsoleNotifier),
    })
}

async fn submit<F: FormFlow>(flow: F, collaborators: Collaborators, input: FormInput) -> Result<()> {
    let orchestrator = SubmissionOrchestrator::new(flow, collaborators);
    match orchestrator.submit(input).await {
        SubmitOutcome::Committed => Ok(()),
        SubmitOutcome::Invalid(errors) => {
            bail!("{} field(s) need attention", errors.len())
        }
        SubmitOutcome::Failed { reason } => bail!("{} failed: {reason}", orchestrator.flow().name()),
        SubmitOutcome::Ignored => bail!("another submission is already in progress"),
    }
}

fn render_whoami(session: &dyn SessionStore) {
    let Some(user) = session.current_user() else {
        println!("{}", style::dim("Not signed in."));
        return;
    };
    println!("{}", style::header("Signed in"));
    println!("  {} {}", style::dim("id:    "), style::value(&user.id));
    println!("  {} {}", style::dim("name:  "), style::value(&user.name));
    println!("  {} {}", style::dim("email: "), style::cyan(&user.email));
    match user.avatar_url.as_deref() {
        Some(url) => println!("  {} {}", style::dim("avatar:"), style::url(url)),
        None => println!("  {} {}", style::dim("avatar:"), style::dim("(none)")),
    }
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let collaborators = collaborators(&config)?;

    match cli.command {
        Commands::Signin { email, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password("Password")?,
            };
            let input = FormInput::new()
                .with(EMAIL, email)
                .with(PASSWORD, password);
            submit(SignInFlow, collaborators, input).await
        }

        Commands::Signup {
            name,
            email,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password("Password")?,
            };
            let input = FormInput::new()
                .with(NAME, name)
                .with(EMAIL, email)
                .with(PASSWORD, password);
            submit(SignUpFlow, collaborators, input).await
        }

        Commands::Profile {
            name,
            email,
            change_password,
        } => {
            let Some(user) = collaborators.session.current_user() else {
                bail!("Not signed in. Run `bookwise signin` first.");
            };
            let mut input = prefill(&user);
            if let Some(name) = name {
                input.set(NAME, name);
            }
            if let Some(email) = email {
                input.set(EMAIL, email);
            }
            if change_password {
                input.set(OLD_PASSWORD, prompt_password("Current password")?);
                input.set(PASSWORD, prompt_password("New password")?);
                input.set(PASSWORD_CONFIRMATION, prompt_password("Confirm new password")?);
            }
            submit(ProfileUpdateFlow, collaborators, input).await
        }

        Commands::Avatar { path } => {
            let picker = FilePicker::new(path, config.avatar.max_bytes);
            let sync = AvatarSync::new(
                Arc::new(picker),
                collaborators.api,
                collaborators.session,
                collaborators.notifier,
            );
            match sync.run().await {
                AvatarOutcome::Updated(_) | AvatarOutcome::Cancelled => Ok(()),
                AvatarOutcome::Failed { reason } => bail!("avatar update failed: {reason}"),
            }
        }

        Commands::Whoami => {
            render_whoami(collaborators.session.as_ref());
            Ok(())
        }

        Commands::Signout => {
            collaborators.session.end()?;
            info!("session ended");
            println!("{}", style::success("✓ Signed out"));
            Ok(())
        }
    }
}
