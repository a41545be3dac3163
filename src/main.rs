use clap::Parser;
use sideko::config::settings;
use sideko::utils::{error::ErrorSeverity, logger, validation::Validate};
use sideko::{Cli, Command, Engine, GeneratePipeline, LocalStorage, SidekoClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting sideko CLI");

    if let Err(e) = settings::load() {
        tracing::warn!("⚠️  Could not load config file: {}", e.user_friendly_message());
    }

    let result = match &cli.command {
        Command::Generate(args) => handle_generate(args, cli.verbose).await,
        Command::Login(args) => handle_login(args),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn handle_generate(args: &sideko::GenerateArgs, verbose: bool) -> sideko::Result<()> {
    if verbose {
        // the API key is deliberately left out of the log line
        tracing::debug!(
            "Generate args: spec={} language={} output={} archive_only={}",
            args.spec,
            args.language,
            args.output,
            args.archive_only
        );
    }

    args.validate()?;

    if args.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let client = SidekoClient::new(args.resolved_base_url(), args.resolved_api_key());
    let storage = LocalStorage::new(args.output.clone());
    let pipeline = GeneratePipeline::new(client, storage, args.clone());

    let engine = Engine::new_with_monitoring(pipeline, args.monitor);
    let dest = engine.run().await?;

    tracing::info!("✅ SDK generated successfully!");
    println!("🚀 SDK generated!");
    println!("💾 Saved to {dest}");

    Ok(())
}

fn handle_login(args: &sideko::LoginArgs) -> sideko::Result<()> {
    args.validate()?;

    let cfg_path = settings::store_api_key(&args.api_key)?;

    tracing::info!("✅ API key stored");
    println!("🔑 API key saved to {}", cfg_path.display());

    Ok(())
}
