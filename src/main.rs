//! # apidock Main Entry Point
//!
//! Loads the endpoint catalog, builds the engine and runs either a one-shot
//! subcommand or the interactive shell.

use anyhow::{Context, Result};
use apidock::cmd_args::{Command, CommandLineArgs};
use apidock::config::{self, LOG_LEVEL_ENV_VAR};
use apidock::render::{render_card, render_catalog, render_result};
use apidock::repl::Repl;
use apidock::{Catalog, ClipboardService, EndpointEngine};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_subscriber();

    let cmd_args = CommandLineArgs::parse();

    let catalog_path = cmd_args
        .catalog()
        .cloned()
        .unwrap_or_else(config::get_catalog_path);
    let catalog_path = config::expand_path(&catalog_path);
    tracing::debug!("Using catalog '{}'", catalog_path);

    let catalog = Catalog::load(&catalog_path)?;
    let settings = catalog.http_settings().merged_with(&apidock::HttpSettings {
        timeout: cmd_args.timeout(),
    });

    let engine = EndpointEngine::new(catalog.endpoints.clone(), &settings)?;
    let clipboard = ClipboardService::system();

    match cmd_args.command() {
        Command::Shell => {
            if let Some(title) = &catalog.title {
                println!("{title}");
            }
            if let Some(description) = &catalog.description {
                println!("{description}");
            }
            Repl::new(engine, clipboard).run().await
        }
        Command::List => {
            print!("{}", render_catalog(&engine));
            Ok(())
        }
        Command::Show(id) => {
            let descriptor = engine
                .descriptor(id)
                .with_context(|| format!("Unknown endpoint: '{id}'"))?;
            engine.toggle_expansion(id);
            print!("{}", render_card(descriptor, &engine.get_state(id)));
            Ok(())
        }
        Command::Try { ids, json } => try_endpoints(&engine, ids, *json).await,
        Command::Copy(id) => {
            let descriptor = engine
                .descriptor(id)
                .with_context(|| format!("Unknown endpoint: '{id}'"))?;
            clipboard.copy_text(descriptor.target_url());
            println!("{}", descriptor.target_url());
            Ok(())
        }
    }
}

/// Invoke every endpoint concurrently and print the results in argument order
async fn try_endpoints(engine: &EndpointEngine, ids: &[String], json: bool) -> Result<()> {
    let mut handles = Vec::with_capacity(ids.len());
    for id in ids {
        let descriptor = engine
            .descriptor(id)
            .with_context(|| format!("Unknown endpoint: '{id}'"))?;
        handles.push((id, engine.spawn_invoke(id, descriptor.target_url())));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (id, handle) in handles {
        let result = handle
            .await
            .with_context(|| format!("Invocation of '{id}' did not complete"))?;
        results.push((id, result));
    }

    if json {
        let report: Vec<_> = results
            .iter()
            .map(|(id, result)| serde_json::json!({ "id": id, "result": result }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (id, result) in &results {
            println!("[{id}]\n{}", render_result(result));
        }
    }
    Ok(())
}

fn init_tracing_subscriber() {
    let mut filter = EnvFilter::from_env(LOG_LEVEL_ENV_VAR);
    for directive in [
        "reqwest=warn",
        "hyper=warn",
        "hyper_util=warn",
        "tokio=warn",
        "rustls=warn",
        "tokio_rustls=warn",
        "h2=warn",
    ] {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring log directive '{directive}': {e}"),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}
