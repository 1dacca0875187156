mod api;
mod commands;
mod session;
mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use api::client::ApiClient;
use commands::admin::UserAction;

#[derive(Parser)]
#[command(
    name = "securevault",
    about = "Client for the SecureVault encrypted file service"
)]
struct Cli {
    /// Backend base URL (overrides SECUREVAULT_API_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register {
        username: String,
    },

    /// Log in and store the session
    Login {
        username: String,
    },

    /// Log out and clear the stored session
    Logout,

    /// Show the current login state
    Status,

    /// Delete the logged-in account
    DeleteAccount {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Encrypt and store one or more files
    Upload {
        /// Files to encrypt (JPEG, PNG, PDF, ZIP, or TXT; max 10MB each)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List the files in your vault
    Files,

    /// Decrypt a stored file and save the original
    Download {
        file_id: String,

        /// Output path (defaults to the original filename)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Download a stored file's ciphertext without decrypting it
    DownloadEncrypted {
        file_id: String,

        /// Output path (defaults to the original filename plus .enc)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print a text file from the vault
    Preview {
        file_id: String,
    },

    /// Decrypt a local .enc file via the backend
    DecryptLocal {
        file: PathBuf,

        /// Output path (defaults to the recovered original filename)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Delete a stored file
    Delete {
        file_id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// User management (admin role required)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// List all user accounts
    Users,

    /// Re-enable a deactivated user
    Activate {
        user_id: String,
        #[arg(long, short)]
        yes: bool,
    },

    /// Disable a user account
    Deactivate {
        user_id: String,
        #[arg(long, short)]
        yes: bool,
    },

    /// Grant the admin role
    Promote {
        user_id: String,
        #[arg(long, short)]
        yes: bool,
    },

    /// Revoke the admin role
    Demote {
        user_id: String,
        #[arg(long, short)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cli = Cli::parse();

    // API base URL: --server > SECUREVAULT_API_URL > localhost default
    let base_url = cli
        .server
        .clone()
        .or_else(|| std::env::var("SECUREVAULT_API_URL").ok())
        .unwrap_or_else(|| "http://localhost:8000".to_string());

    log::debug!("Using backend at {}", base_url);
    let api = ApiClient::new(&base_url);

    let result = match cli.command {
        Commands::Register { username } => commands::auth::run_register(&api, &username).await,
        Commands::Login { username } => commands::auth::run_login(&api, &username).await,
        Commands::Logout => commands::auth::run_logout(&api).await,
        Commands::Status => commands::auth::run_status(),
        Commands::DeleteAccount { yes } => commands::auth::run_delete_account(&api, yes).await,
        Commands::Upload { files } => commands::vault::run_upload(&api, &files).await,
        Commands::Files => commands::vault::run_files(&api).await,
        Commands::Download { file_id, output } => {
            commands::vault::run_download(&api, &file_id, output).await
        }
        Commands::DownloadEncrypted { file_id, output } => {
            commands::vault::run_download_encrypted(&api, &file_id, output).await
        }
        Commands::Preview { file_id } => commands::vault::run_preview(&api, &file_id).await,
        Commands::DecryptLocal { file, output } => {
            commands::vault::run_decrypt_local(&api, &file, output).await
        }
        Commands::Delete { file_id, yes } => {
            commands::vault::run_delete(&api, &file_id, yes).await
        }
        Commands::Admin { command } => match command {
            AdminCommands::Users => commands::admin::run_users(&api).await,
            AdminCommands::Activate { user_id, yes } => {
                commands::admin::run_user_action(&api, &user_id, UserAction::Activate, yes).await
            }
            AdminCommands::Deactivate { user_id, yes } => {
                commands::admin::run_user_action(&api, &user_id, UserAction::Deactivate, yes).await
            }
            AdminCommands::Promote { user_id, yes } => {
                commands::admin::run_user_action(&api, &user_id, UserAction::Promote, yes).await
            }
            AdminCommands::Demote { user_id, yes } => {
                commands::admin::run_user_action(&api, &user_id, UserAction::Demote, yes).await
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
