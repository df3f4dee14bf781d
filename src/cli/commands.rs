use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `bookwise` - Appointment booking client.
#[derive(Parser, Debug)]
#[command(name = "bookwise")]
#[command(version = "0.1.0")]
#[command(about = "Sign in, create an account and manage your booking profile.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session locally
    Signin {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create a new account
    Signup {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Update name, email and optionally the password of the signed-in user
    Profile {
        /// New name (defaults to the current one)
        #[arg(short, long)]
        name: Option<String>,

        /// New email (defaults to the current one)
        #[arg(short, long)]
        email: Option<String>,

        /// Also change the password (prompts for current, new and confirmation)
        #[arg(long)]
        change_password: bool,
    },

    /// Upload a new avatar image
    Avatar {
        /// Image file (prompted when omitted; an empty answer cancels)
        path: Option<PathBuf>,
    },

    /// Show the signed-in user
    Whoami,

    /// Forget the local session
    Signout,
}
