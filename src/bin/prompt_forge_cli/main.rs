// ABOUTME: Prompt Forge CLI - compose prompts, talk to the local model, manage presets and chats
// ABOUTME: Thin clap front end over PromptStudio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Show the prompt that would be sent, without calling the model
//! prompt-forge compose "a poem about rain" --task writing --tone formal --detail brief
//!
//! # Point at a local Ollama runtime and check it
//! prompt-forge config set-model --model llama3
//! prompt-forge check
//!
//! # Generate into a new chat, then continue it
//! prompt-forge generate "a launch email for our budgeting app" --task marketing
//! prompt-forge generate "make it shorter" --chat <CHAT_ID>
//!
//! # Presets and chats
//! prompt-forge presets create "Blog" --task writing --tone friendly
//! prompt-forge chats list
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use helpers::options::OptionArgs;
use prompt_forge::config::AppConfig;
use prompt_forge::constants::model::{DEFAULT_BASE_URL, DEFAULT_PROVIDER};
use prompt_forge::errors::AppResult;
use prompt_forge::logging::LoggingConfig;
use prompt_forge::studio::PromptStudio;
use std::path::PathBuf;
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "prompt-forge",
    about = "Local-first prompt composer",
    long_about = "Builds structured prompts from short descriptions and sends them to a language model running on this machine."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// User the presets and chats belong to
    #[arg(long, global = true, default_value = "local")]
    user: String,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print the composed prompt without calling the model
    Compose {
        /// What to create
        input: String,

        #[command(flatten)]
        options: OptionArgs,

        /// Recompose even if a cached composition exists
        #[arg(long)]
        no_cache: bool,
    },

    /// Compose, send to the local model and record the exchange
    Generate {
        /// What to create
        input: String,

        /// Chat to continue (a new chat is started otherwise)
        #[arg(long)]
        chat: Option<String>,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Check that the configured local model is reachable
    Check,

    /// Local model configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },

    /// Preset management
    Presets {
        #[command(subcommand)]
        action: PresetCommand,
    },

    /// Chat history
    Chats {
        #[command(subcommand)]
        action: ChatCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ConfigCommand {
    /// Save the local model runtime settings
    SetModel {
        /// Model name as known to the runtime
        #[arg(long)]
        model: String,

        /// Runtime base URL (loopback only)
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Runtime identifier
        #[arg(long, default_value = DEFAULT_PROVIDER)]
        provider: String,

        /// Do not make the local model the default provider
        #[arg(long)]
        not_default: bool,
    },

    /// Show the effective configuration
    Show,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum PresetCommand {
    /// List presets
    List,

    /// Save the given options as a preset
    Create {
        /// Preset name
        name: String,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Copy a preset
    Duplicate {
        /// Preset ID to copy
        preset_id: String,

        /// Name for the copy
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a preset
    Delete {
        /// Preset ID to delete
        preset_id: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ChatCommand {
    /// List chats, most recent first
    List,

    /// Print a chat's messages
    Show {
        /// Chat ID
        chat_id: String,
    },

    /// Start an empty chat
    Create {
        /// Chat title
        #[arg(long)]
        title: Option<String>,
    },

    /// Delete a chat and its messages
    Delete {
        /// Chat ID
        chat_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::from_env().verbose(cli.verbose).init() {
        eprintln!("logging disabled: {e}");
    }

    let config = match cli.data_dir {
        Some(dir) => AppConfig::with_data_dir(dir),
        None => AppConfig::from_env()?,
    };
    debug!(data_dir = %config.data_dir.display(), "configuration loaded");
    let studio = PromptStudio::open(config)?;
    let user = cli.user.as_str();

    match cli.command {
        Command::Compose {
            input,
            options,
            no_cache,
        } => commands::generate::compose(&studio, user, &input, &options, no_cache).await?,
        Command::Generate {
            input,
            chat,
            options,
        } => commands::generate::generate(&studio, user, &input, chat.as_deref(), &options).await?,
        Command::Check => commands::generate::check(&studio).await?,
        Command::Config { action } => match action {
            ConfigCommand::SetModel {
                model,
                base_url,
                provider,
                not_default,
            } => {
                commands::config::set_model(&studio, provider, base_url, model, !not_default)
                    .await?;
            }
            ConfigCommand::Show => commands::config::show(&studio).await?,
        },
        Command::Presets { action } => match action {
            PresetCommand::List => commands::presets::list(&studio, user).await?,
            PresetCommand::Create { name, options } => {
                commands::presets::create(&studio, user, &name, &options).await?;
            }
            PresetCommand::Duplicate { preset_id, name } => {
                commands::presets::duplicate(&studio, user, &preset_id, name.as_deref()).await?;
            }
            PresetCommand::Delete { preset_id } => {
                commands::presets::delete(&studio, user, &preset_id).await?;
            }
        },
        Command::Chats { action } => match action {
            ChatCommand::List => commands::chats::list(&studio, user).await?,
            ChatCommand::Show { chat_id } => commands::chats::show(&studio, user, &chat_id).await?,
            ChatCommand::Create { title } => {
                commands::chats::create(&studio, user, title.as_deref()).await?;
            }
            ChatCommand::Delete { chat_id } => {
                commands::chats::delete(&studio, user, &chat_id).await?;
            }
        },
    }

    Ok(())
}
