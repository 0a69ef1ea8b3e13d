use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use clap::Args;
use regex::Regex;
use serde_json::{json, Value};
use tracing::debug;

use frankie_core::Settings;

use super::new_manager;
use crate::output;

pub const EXAMPLES: &str = r#"Examples:
  frankie api 'query Me { me { email } }'
  frankie api 'query Version { version }'
  cat query.graphql | frankie api --var '{"date":"2025-01-28"}' -"#;

#[derive(Debug, Args)]
pub struct ApiArgs {
    /// GraphQL document, or '-' (or nothing) to read it from stdin
    query: Option<String>,

    /// Operation name (auto-detected if not specified)
    #[arg(long = "op")]
    operation: Option<String>,

    /// Variables as a JSON object
    #[arg(long = "var")]
    variables: Option<String>,

    /// Print the request JSON before sending
    #[arg(long)]
    debug: bool,
}

/// Name of the first named query or mutation in a document
fn detect_operation_name(query: &str) -> Option<String> {
    let re = Regex::new(r"(?:query|mutation)\s+(\w+)").ok()?;
    re.captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn parse_variables(raw: Option<&str>) -> Result<Option<Value>> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(None);
    };
    let value: Value = serde_json::from_str(raw).context("invalid variables JSON")?;
    if !value.is_object() {
        bail!("invalid variables JSON: expected an object");
    }
    Ok(Some(value))
}

fn read_query(arg: Option<String>) -> Result<String> {
    let query = match arg {
        Some(query) if query != "-" => query,
        _ => {
            let mut data = String::new();
            io::stdin()
                .read_to_string(&mut data)
                .context("failed to read from stdin")?;
            data
        }
    };
    Ok(query.trim().to_string())
}

pub async fn run(settings: &Settings, args: ApiArgs) -> Result<()> {
    let query = read_query(args.query)?;
    if query.is_empty() {
        bail!("query is required");
    }

    let operation = args
        .operation
        .or_else(|| detect_operation_name(&query))
        .unwrap_or_default();
    let variables = parse_variables(args.variables.as_deref())?;

    if args.debug {
        let request = json!({
            "query": query,
            "operationName": operation,
            "variables": variables,
        });
        eprintln!("Request:");
        eprintln!("{}", serde_json::to_string_pretty(&request)?);
        eprintln!();
    }

    // Authenticate when possible; raw queries may also run anonymously
    let mut manager = new_manager(settings)?;
    if let Err(e) = manager.ensure_authenticated().await {
        let reason = format!("{:#}", e);
        debug!(error = %reason, "Proceeding without authentication");
    }
    let client = manager.into_client();

    let body = client
        .execute_raw(&query, &operation, variables)
        .await
        .context("query failed")?;
    output::print_json(&body)
}
