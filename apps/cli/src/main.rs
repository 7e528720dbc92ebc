use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use morph_client::{
    protocol::{ActionType, StatusColor},
    CardBuilder, Morph, ResponseMode,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "morph", about = "Answer pending Morph requests")]
struct Args {
    #[arg(long, default_value = "morph.toml")]
    config: PathBuf,
    #[arg(long)]
    request_id: String,
    /// Print the document instead of submitting it.
    #[arg(long)]
    inline: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer with a single card.
    Card(CardArgs),
    /// Report the outcome of a request action.
    ActionResult(ActionResultArgs),
}

#[derive(ClapArgs, Debug)]
struct CardArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    link: Option<String>,
    /// LABEL=VALUE
    #[arg(long = "text")]
    texts: Vec<String>,
    /// LABEL=VALUE=COLOR
    #[arg(long = "status")]
    statuses: Vec<String>,
    /// TYPE=LABEL=URL_OR_ID, attached to the card
    #[arg(long = "action")]
    actions: Vec<String>,
    /// TYPE=LABEL=URL_OR_ID, rendered outside the card
    #[arg(long = "root-action")]
    root_actions: Vec<String>,
}

#[derive(ClapArgs, Debug)]
struct ActionResultArgs {
    #[arg(long, conflicts_with = "failed")]
    succeed: bool,
    #[arg(long)]
    failed: bool,
    #[arg(long)]
    message: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
struct ActionSpec {
    action_type: ActionType,
    label: String,
    url: Option<String>,
    id: Option<String>,
}

fn split_pair(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .ok_or_else(|| anyhow!("expected LABEL=VALUE, got '{raw}'"))
}

fn parse_status(raw: &str) -> Result<(&str, &str, StatusColor)> {
    let Some((rest, color)) = raw.rsplit_once('=') else {
        bail!("expected LABEL=VALUE=COLOR, got '{raw}'");
    };
    let (label, value) = split_pair(rest)?;
    Ok((label, value, color.parse()?))
}

fn parse_action(raw: &str) -> Result<ActionSpec> {
    let mut parts = raw.splitn(3, '=');
    let (Some(action_type), Some(label)) = (parts.next(), parts.next()) else {
        bail!("expected TYPE=LABEL=URL_OR_ID, got '{raw}'");
    };
    let action_type: ActionType = action_type.parse()?;
    let target = parts.next().map(str::to_string);
    let (url, id) = if action_type.requires_url() {
        (target, None)
    } else {
        (None, target)
    };
    Ok(ActionSpec {
        action_type,
        label: label.to_string(),
        url,
        id,
    })
}

fn populate_card(builder: &mut CardBuilder, args: &CardArgs) -> Result<()> {
    let card = match &args.link {
        Some(link) => builder.new_card_with_link(&args.title, link),
        None => builder.new_card(&args.title),
    };
    for raw in &args.texts {
        let (label, value) = split_pair(raw)?;
        card.new_text(label, value);
    }
    for raw in &args.statuses {
        let (label, value, color) = parse_status(raw)?;
        card.new_status(label, value, color)?;
    }
    for raw in &args.actions {
        let spec = parse_action(raw)?;
        card.new_action(spec.action_type, spec.label, spec.url, spec.id)?;
    }
    for raw in &args.root_actions {
        let spec = parse_action(raw)?;
        builder.new_root_action(spec.action_type, spec.label, spec.url, spec.id)?;
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let mut settings = load_settings(&args.config);
    if args.inline {
        settings.morph.mode = ResponseMode::Inline;
    }
    let mode = settings.morph.mode;
    let morph = Morph::with_settings(settings.credentials(), settings.morph)?;

    let document = match &args.command {
        Command::Card(card_args) => {
            let mut builder = morph.card_builder(args.request_id.as_str())?;
            populate_card(&mut builder, card_args)?;
            serde_json::to_value(builder.build().await?)?
        }
        Command::ActionResult(result_args) => {
            let builder = morph.action_response_builder(args.request_id.as_str())?;
            let succeed = result_args.succeed || !result_args.failed;
            serde_json::to_value(builder.build(succeed, result_args.message.as_deref()).await?)?
        }
    };

    match mode {
        ResponseMode::Inline => println!("{}", serde_json::to_string_pretty(&document)?),
        ResponseMode::Remote => info!(request_id = %args.request_id, "response delivered"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let request_id = args.request_id.clone();
    run(args).await.map_err(|err| {
        error!(%request_id, error = %err, "failed to answer request");
        err
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
