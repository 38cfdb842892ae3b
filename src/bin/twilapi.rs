//! Twilio API CLI binary.
//!
//! A command-line interface for updating calls through the Twilio API.

use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;
use twilapi::cli::{CallUpdateArgs, Cli, Command, Entity};
use twilapi::{PrettyPrint, Request, Updater};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, twilapi::TwilioError::ConfigMissing(_)) {
                eprintln!(
                    "Hint: Pass --account-sid and --auth-token, or set TWILIO_ACCOUNT_SID and TWILIO_AUTH_TOKEN"
                );
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> twilapi::Result<()> {
    match &cli.command {
        Command::Update {
            entity,
            sid,
            fields,
            dry_run,
        } => handle_update(&cli, entity, sid, fields.clone(), *dry_run).await,
    }
}

async fn handle_update(
    cli: &Cli,
    entity: &Entity,
    sid: &str,
    fields: CallUpdateArgs,
    dry_run: bool,
) -> twilapi::Result<()> {
    match entity {
        Entity::Call => {
            let updater = fields.into_updater(sid);

            if dry_run {
                let request = updater.build_request(cli.dry_run_account_sid());
                output_request(&request, cli.json)?;
                return Ok(());
            }

            let client = cli.client()?;
            let call = updater.execute(&client).await?;
            output_single(&call, cli.json)?;
        }
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> twilapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_request(request: &Request, json: bool) -> twilapi::Result<()> {
    if json {
        let value = serde_json::json!({
            "method": request.method(),
            "path": request.path(),
            "params": request.post_params(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{} {}", request.method(), request.path());
        if request.post_params().is_empty() {
            println!("\n(no parameters)");
        } else {
            let rows: Vec<ParamRow> = request.post_params().iter().map(ParamRow::from).collect();
            println!("{}", Table::new(rows));
        }
    }
    Ok(())
}

// Table row type for dry-run output

#[derive(Tabled)]
struct ParamRow {
    name: String,
    value: String,
}

impl From<(&String, &String)> for ParamRow {
    fn from((name, value): (&String, &String)) -> Self {
        Self {
            name: name.clone(),
            value: value.clone(),
        }
    }
}
