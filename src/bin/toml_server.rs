use clap::Parser;
use rate_my_setup::core::ConfigProvider;
use rate_my_setup::utils::{logger, validation::Validate};
use rate_my_setup::{get_setups, start_server, AppState, LoadedConfig, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-server")]
#[command(about = "Rate My Setup server with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "rate-my-setup.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,

    /// Show the configuration and query the backend once, without serving
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the server will not be started");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    if let Err(e) = start_server(&config).await {
        tracing::error!("❌ Server failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
        std::process::exit(3);
    }

    Ok(())
}

fn display_config_summary(config: &LoadedConfig) {
    println!("📋 Configuration Summary:");
    println!("  Listen: {}:{}", config.bind_address(), config.port());
    println!("  Environment: {}", config.environment());
    match config.fixture_path() {
        Some(path) => println!("  Setups: fixture {}", path),
        None => println!(
            "  Setups: {} (timeout {:?})",
            config.rpc_endpoint(),
            config.rpc_timeout()
        ),
    }
    match config.submissions_path() {
        Some(path) => println!("  Submissions: {}", path),
        None => println!("  Submissions: log only"),
    }
    println!();
}

async fn perform_dry_run(config: &LoadedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::from_config(config)?;
    let result = get_setups(state.router.as_ref(), &Default::default()).await;

    match (result.data, result.error) {
        (Some(setups), _) => println!("✅ Backend reachable, {} setups available", setups.len()),
        (None, Some(error)) => println!("❌ Backend check failed: {}", error),
        (None, None) => println!("⚠️ Backend returned no data"),
    }

    Ok(())
}
