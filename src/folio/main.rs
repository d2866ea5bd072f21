use clap::Parser;
use folio::api::FolioApi;
use folio::config::FolioConfig;
use folio::error::{FolioError, Result};
use folio::model::{EntryId, Submission};
use folio::query::FeedbackQuery;
use folio::server;
use folio::store::{open_store, FeedbackStore};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;
use args::{Cli, Commands, FilterArgs};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

type Api = FolioApi<Box<dyn FeedbackStore>>;

fn run() -> Result<()> {
    let cli = Cli::parse();
    let serving = matches!(cli.command, Some(Commands::Serve { .. }));
    init_tracing(cli.verbose, serving);

    let mut config = FolioConfig::load(cli.config.as_deref())?;
    if let Some(backend) = &cli.backend {
        config.backend = backend.clone();
    }

    match cli.command {
        Some(Commands::Serve { bind }) => handle_serve(config, bind),
        Some(Commands::Submit {
            name,
            email,
            phone,
            contact_type,
            comment,
        }) => {
            let submission = Submission {
                full_name: name,
                email,
                phone,
                contact_type,
                comment,
            };
            handle_submit(&init_api(&config)?, &submission)
        }
        Some(Commands::List { filter, json }) => handle_list(&init_api(&config)?, &filter, json),
        Some(Commands::Delete { ids }) => handle_delete(&init_api(&config)?, ids),
        Some(Commands::Export { filter, output }) => {
            handle_export(&init_api(&config)?, &filter, output)
        }
        Some(Commands::Init) => handle_init(&config),
        Some(Commands::Config) => handle_config(&config),
        None => handle_list(&init_api(&config)?, &FilterArgs::default(), false),
    }
}

fn init_tracing(verbose: bool, serving: bool) {
    let default_level = match (verbose, serving) {
        (true, _) => "debug",
        (false, true) => "info",
        (false, false) => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn init_api(config: &FolioConfig) -> Result<Api> {
    Ok(FolioApi::new(open_store(config)?))
}

fn to_query(filter: &FilterArgs) -> Result<FeedbackQuery> {
    FeedbackQuery::from_raw(
        filter.search.as_deref(),
        filter.contact_type.as_deref(),
        filter.range.as_deref(),
    )
}

fn handle_serve(config: FolioConfig, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.bind.clone());
    let api = Arc::new(init_api(&config)?);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(api, &bind))
}

fn handle_submit(api: &Api, submission: &Submission) -> Result<()> {
    let result = api.submit(submission)?;
    for entry in &result.affected_entries {
        println!("{}", entry.id);
    }
    cli::print_messages(&result.messages);
    Ok(())
}

fn handle_list(api: &Api, filter: &FilterArgs, json: bool) -> Result<()> {
    let view = api.feedback_view(&to_query(filter)?)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view.entries)?);
    } else {
        cli::print_entries(&view.entries);
    }
    Ok(())
}

fn handle_delete(api: &Api, ids: Vec<String>) -> Result<()> {
    let ids: Vec<EntryId> = ids.into_iter().map(EntryId::new).collect();
    let result = api.delete(&ids)?;
    cli::print_messages(&result.messages);
    Ok(())
}

fn handle_export(api: &Api, filter: &FilterArgs, output: Option<PathBuf>) -> Result<()> {
    let result = api.export_csv(&to_query(filter)?)?;
    let export = result
        .export
        .ok_or_else(|| FolioError::StoreUnavailable("export produced no payload".to_string()))?;

    match output {
        Some(path) if path.as_os_str() == "-" => {
            std::io::stdout().write_all(&export.bytes)?;
        }
        other => {
            let path = other.unwrap_or_else(|| PathBuf::from(&export.filename));
            std::fs::write(&path, &export.bytes)?;
            cli::print_messages(&result.messages);
            println!("Saved to {}", path.display());
        }
    }
    Ok(())
}

fn handle_init(config: &FolioConfig) -> Result<()> {
    let store = open_store(config)?;
    println!("Feedback store ready at {}", store.location());
    Ok(())
}

fn handle_config(config: &FolioConfig) -> Result<()> {
    println!("backend = {}", config.backend()?);
    println!("document_path = {}", config.document_path.display());
    println!("table_path = {}", config.table_path.display());
    println!("bind = {}", config.bind);
    Ok(())
}
