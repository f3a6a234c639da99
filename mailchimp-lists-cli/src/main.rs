use anyhow::Context;
use clap::{Parser, Subcommand};
use futures_util::{Stream, StreamExt};
use mailchimp_lists::{
    models::MailchimpMember, subscriber_hash, Client, ClientConfig, Error, Lists, Parameters,
};
use serde_json::Value;
use std::{io::Write, time::Duration};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "mailchimp-lists")]
#[command(about = "A CLI to work with Mailchimp lists, members and segments")]
struct Cli {
    #[arg(short, long, env = "MAILCHIMP_API_KEY", hide_env_values = true)]
    api_key: String,
    /// Defaults to the datacenter encoded in the API key
    #[arg(short, long, env = "MAILCHIMP_BASE_URL")]
    base_url: Option<String>,
    /// Request timeout in seconds
    #[arg(short, long, env = "MAILCHIMP_TIMEOUT", default_value_t = 10)]
    timeout: u64,
    /// Extra request parameters as a JSON object
    #[arg(short, long, global = true, value_parser = parse_params)]
    params: Option<Parameters>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand, Clone)]
enum Commands {
    #[command(about = "Lists all the lists of the account")]
    Lists,
    #[command(about = "Shows a list")]
    List { list_id: String },
    #[command(about = "Lists the interest categories of a list")]
    InterestCategories { list_id: String },
    #[command(about = "Lists the merge fields of a list")]
    MergeFields { list_id: String },
    #[command(about = "Lists the members of a list")]
    Members {
        list_id: String,
        /// Walk every page and print the members as CSV
        #[arg(long)]
        all: bool,
    },
    #[command(about = "Shows a member of a list")]
    Member { list_id: String, email: String },
    #[command(about = "Shows the activity of a member")]
    Activity { list_id: String, email: String },
    #[command(about = "Adds a member to a list")]
    AddMember { list_id: String, email: String },
    #[command(about = "Updates a member of a list")]
    UpdateMember { list_id: String, email: String },
    #[command(about = "Lists the segments of a list")]
    Segments { list_id: String },
    #[command(about = "Adds a segment to a list")]
    AddSegment { list_id: String, name: String },
    #[command(about = "Updates a segment of a list")]
    UpdateSegment { list_id: String, segment_id: u64 },
    #[command(about = "Prints the subscriber hash of an email address")]
    Hash { email: String },
}

fn parse_params(s: &str) -> Result<Parameters, String> {
    serde_json::from_str(s).map_err(|e| format!("expected a JSON object: {e}"))
}

/// Quotes a CSV field, doubling embedded quotes.
fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Writes the members as CSV rows and returns how many were written.
///
/// The stream ends at its first error, which is returned after the rows
/// received so far have been written.
async fn print_members_csv<S, W>(stream: S, out: &mut W) -> anyhow::Result<usize>
where
    S: Stream<Item = Result<MailchimpMember, Error>>,
    W: Write,
{
    let mut stream = std::pin::pin!(stream);
    let mut written = 0;
    let mut first_error = None;

    writeln!(out, "id,email_address,full_name,status")?;
    while let Some(res) = stream.next().await {
        match res {
            Ok(member) => {
                writeln!(
                    out,
                    "{},{},{},{}",
                    member.id,
                    member.email_address,
                    csv_quote(&member.full_name),
                    member.status
                )?;
                written += 1;
            }
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(anyhow::Error::new(err).context("Failed to list all members")),
        None => Ok(written),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    if let Commands::Hash { email } = &args.command {
        println!("{}", subscriber_hash(email));
        return Ok(());
    }

    let mut config =
        ClientConfig::new(args.api_key).with_timeout(Duration::from_secs(args.timeout));
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    let lists = Lists::new(Client::from_config(config).context("Invalid client configuration")?);
    debug!(base_url = lists.transport().base_url(), "Client ready");
    let params = args.params;

    let resp = match args.command {
        Commands::Lists => lists.get_lists(params).await?,
        Commands::List { list_id } => lists.get_list(&list_id, params).await?,
        Commands::InterestCategories { list_id } => {
            lists.get_interest_categories(&list_id, params).await?
        }
        Commands::MergeFields { list_id } => lists.get_merge_fields(&list_id, params).await?,
        Commands::Members { list_id, all: true } => {
            let stream = lists.members_stream(&list_id, params);
            print_members_csv(stream, &mut std::io::stdout().lock()).await?;
            return Ok(());
        }
        Commands::Members {
            list_id,
            all: false,
        } => lists.get_members(&list_id, params).await?,
        Commands::Member { list_id, email } => {
            lists.get_member_info(&list_id, &email, params).await?
        }
        Commands::Activity { list_id, email } => {
            lists.get_member_activity(&list_id, &email, params).await?
        }
        Commands::AddMember { list_id, email } => {
            lists.add_member(&list_id, &email, params).await?
        }
        Commands::UpdateMember { list_id, email } => {
            lists.update_member(&list_id, &email, params).await?
        }
        Commands::Segments { list_id } => lists.get_segments(&list_id, params).await?,
        Commands::AddSegment { list_id, name } => {
            lists.add_segment(&list_id, &name, params).await?
        }
        Commands::UpdateSegment {
            list_id,
            segment_id,
        } => lists.update_segment(&list_id, segment_id, params).await?,
        Commands::Hash { .. } => unreachable!("handled before building the client"),
    };

    if resp != Value::Null {
        println!("{}", serde_json::to_string_pretty(&resp)?);
    }

    Ok(())
}
