use anyhow::{Context, Result};
use bytes::Bytes;
use callstore_core::Storage;
use callstore_core::domain::{CallId, CallsetId, ExecutorConfig, StorageConfig};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "callstore")]
#[command(about = "Inspect callset objects in S3 / GCS storage", long_about = None)]
struct Cli {
    /// Storage config (JSON: storage_backend, storage_prefix, s3 / google_storage)
    #[arg(short, long, global = true, default_value = "callstore.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the backend, its location and the key prefix
    Info,
    /// Print the keys of a call (or of a callset when --call is omitted)
    Keys(CallArgs),
    /// Upload a file to a key
    Put(PutArgs),
    /// Download a key to a file or stdout
    Get(GetArgs),
    /// List calls that have written a status
    CallsetStatus(CallsetArgs),
    /// Print the status of a call
    CallStatus(CallArgs),
    /// Download the output of a call
    Output(OutputArgs),
    /// Fetch runtime metadata described by an executor config
    RuntimeInfo(RuntimeArgs),
}

#[derive(Debug, Args)]
struct CallsetArgs {
    #[arg(long)]
    callset: String,
}

#[derive(Debug, Args)]
struct CallArgs {
    #[arg(long)]
    callset: String,

    #[arg(long)]
    call: Option<String>,
}

#[derive(Debug, Args)]
struct PutArgs {
    #[arg(short, long)]
    key: String,

    #[arg(short, long)]
    file: PathBuf,
}

#[derive(Debug, Args)]
struct GetArgs {
    #[arg(short, long)]
    key: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct OutputArgs {
    #[arg(long)]
    callset: String,

    #[arg(long)]
    call: String,

    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct RuntimeArgs {
    /// Executor config (JSON with runtime / google_account sections)
    #[arg(short, long)]
    executor_config: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match try_main().await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

async fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let config = StorageConfig::from_path(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let storage = Storage::new(config)?;

    match &cli.command {
        Commands::Info => {
            let info = storage.get_storage_info();
            print_json(&serde_json::json!({
                "service": info.service,
                "location": info.location,
                "prefix": storage.prefix(),
            }))
        }
        Commands::Keys(args) => keys(&storage, args),
        Commands::Put(args) => {
            let data = std::fs::read(&args.file)
                .with_context(|| format!("reading {}", args.file.display()))?;
            storage.put_object(&args.key, data).await?;
            tracing::info!(key = %args.key, "uploaded");
            Ok(())
        }
        Commands::Get(args) => {
            let body = storage.get_object(&args.key).await?;
            write_body(body, args.out.as_ref())
        }
        Commands::CallsetStatus(args) => {
            let call_ids = storage
                .get_callset_status(&CallsetId::from(args.callset.as_str()))
                .await?;
            print_json(&call_ids)
        }
        Commands::CallStatus(args) => {
            let call = args.call.as_deref().context("--call is required")?;
            let status = storage
                .get_call_status(&CallsetId::from(args.callset.as_str()), &CallId::from(call))
                .await?;
            print_json(&status)
        }
        Commands::Output(args) => {
            let body = storage
                .get_call_output(
                    &CallsetId::from(args.callset.as_str()),
                    &CallId::from(args.call.as_str()),
                )
                .await?;
            write_body(body, args.out.as_ref())
        }
        Commands::RuntimeInfo(args) => {
            let executor = ExecutorConfig::from_path(&args.executor_config)
                .with_context(|| format!("loading {}", args.executor_config.display()))?;
            print_json(&storage.get_runtime_info(&executor).await?)
        }
    }
}

fn keys(storage: &Storage, args: &CallArgs) -> Result<()> {
    let callset = CallsetId::from(args.callset.as_str());
    match &args.call {
        Some(call) => print_json(&storage.create_keys(&callset, &CallId::from(call.as_str()))),
        None => print_json(&serde_json::json!({
            "func_key": storage.create_func_key(&callset),
            "agg_data_key": storage.create_agg_data_key(&callset),
        })),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_body(body: Bytes, out: Option<&PathBuf>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, &body).with_context(|| format!("writing {}", path.display()))?
        }
        None => std::io::stdout().write_all(&body)?,
    }
    Ok(())
}
