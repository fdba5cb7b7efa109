//! Command line demo for reading and writing custom prompt partials.

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mgmt_sdk::Management;
use mgmt_sdk::prompts::{PartialMarkup, PromptPartial};
use mgmt_sdk::transport::{ManagementConfig, RequestOption};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prompt-partials", about = "Manage custom prompt partials")]
struct Cli {
    /// Tenant domain, e.g. `tenant.example.com`.
    #[arg(long, env = "MANAGEMENT_DOMAIN")]
    domain: String,

    /// Management API access token.
    #[arg(long, env = "MANAGEMENT_API_TOKEN", hide_env_values = true)]
    token: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the partial configured for a prompt.
    Read {
        /// Prompt type, e.g. `login-id`.
        prompt: String,
    },
    /// Create the partial for a prompt.
    Create(WriteArgs),
    /// Replace the partial for a prompt.
    Update(WriteArgs),
    /// Clear the partial for a prompt.
    Delete {
        /// Prompt type, e.g. `signup`.
        prompt: String,
    },
}

#[derive(Debug, Args)]
struct WriteArgs {
    /// Prompt type, e.g. `signup`.
    prompt: String,
    #[arg(long)]
    form_content_start: Option<String>,
    #[arg(long)]
    form_content_end: Option<String>,
    #[arg(long)]
    form_footer_start: Option<String>,
    #[arg(long)]
    form_footer_end: Option<String>,
    #[arg(long)]
    secondary_actions_start: Option<String>,
    #[arg(long)]
    secondary_actions_end: Option<String>,
}

impl WriteArgs {
    fn into_partial(self) -> Result<PromptPartial> {
        let mut markup = PartialMarkup::default();
        if let Some(html) = self.form_content_start {
            markup = markup.with_form_content_start(html);
        }
        if let Some(html) = self.form_content_end {
            markup = markup.with_form_content_end(html);
        }
        if let Some(html) = self.form_footer_start {
            markup = markup.with_form_footer_start(html);
        }
        if let Some(html) = self.form_footer_end {
            markup = markup.with_form_footer_end(html);
        }
        if let Some(html) = self.secondary_actions_start {
            markup = markup.with_secondary_actions_start(html);
        }
        if let Some(html) = self.secondary_actions_end {
            markup = markup.with_secondary_actions_end(html);
        }
        Ok(PromptPartial::new(&self.prompt)?.with_markup(markup))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout_secs);
    let config = ManagementConfig::new(cli.domain)
        .with_token(cli.token)
        .with_timeout(timeout);
    let partials = Management::new(config)?.prompt_partials();
    let options = [RequestOption::timeout(timeout)];

    match cli.command {
        Command::Read { prompt } => {
            let partial = partials.read(prompt.as_str(), &options).await?;
            println!("{}", serde_json::to_string_pretty(partial.markup())?);
        }
        Command::Create(args) => {
            let partial = args.into_partial()?;
            partials.create(&partial, &options).await?;
            info!(prompt = %partial.prompt(), "partial created");
        }
        Command::Update(args) => {
            let partial = args.into_partial()?;
            partials.update(&partial, &options).await?;
            info!(prompt = %partial.prompt(), "partial updated");
        }
        Command::Delete { prompt } => {
            let partial = PromptPartial::new(&prompt)?;
            partials.delete(&partial, &options).await?;
            info!(prompt = %partial.prompt(), "partial cleared");
        }
    }

    Ok(())
}
