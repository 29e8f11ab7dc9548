use clap::Parser;
use rate_my_setup::core::FormFields;
use rate_my_setup::utils::logger;
use rate_my_setup::{submit_setup, LocalStorage, LogStore};

/// Runs the submission handler on the given fields and prints the JSON outcome.
#[derive(Parser)]
#[command(name = "check-submission")]
struct Args {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    author: Option<String>,

    #[arg(long)]
    image_url: Option<String>,

    /// Append accepted submissions to <dir>/submissions.jsonl
    #[arg(long)]
    submissions_path: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    // 未提供的欄位視為缺少
    let mut form = FormFields::new();
    for (key, value) in [
        ("title", args.title),
        ("author", args.author),
        ("imageUrl", args.image_url),
    ] {
        if let Some(value) = value {
            form.insert(key, value);
        }
    }

    let outcome = match args.submissions_path {
        Some(path) => submit_setup(&form, &LocalStorage::new(path)).await,
        None => submit_setup(&form, &LogStore).await,
    };

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if !outcome.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
