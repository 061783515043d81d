use anyhow::Context;
use clap::Parser;
use discussions_migrator::{
    DiscussionsClient, HttpTransport, RetryingExecutor,
    app::{self, RepoSlug},
    cli::Cli,
    config::Config,
    utils::logging::init_tracing,
};
use mimalloc::MiMalloc;
use std::process::ExitCode;
use tracing::{error, info};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut cfg = match Config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Error loading configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut cfg);
    init_tracing(&cfg.basic.loglevel);

    match run(&cli, &cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Run aborted");
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, cfg: &Config) -> anyhow::Result<()> {
    let transport =
        HttpTransport::new(&cfg.github, cli.token.as_str()).context("Error initializing client")?;
    let client = DiscussionsClient::new(RetryingExecutor::new(transport, &cfg.github));

    let Some(repo) = cli.repo.as_deref() else {
        println!("Successfully initialized client. Use --repo to specify a repository.");
        return Ok(());
    };
    let slug: RepoSlug = repo.parse()?;

    let info = app::probe_repository(&client, &slug)
        .await
        .with_context(|| format!("Error accessing repository {slug}"))?;
    println!("Successfully connected to repository: {slug}");
    println!("\nAvailable discussion categories:");
    for category in &info.categories {
        println!("- {}: {}", category.name, category.id);
    }

    if !cli.migrate {
        return Ok(());
    }

    let report = app::migrate(&client, &info, cfg)
        .await
        .with_context(|| format!("Migration into {slug} failed"))?;
    info!(
        discussions = report.discussions_created,
        comments = report.comments_created,
        answers_marked = report.answers_marked,
        skipped = report.posts_skipped,
        resumed = report.posts_resumed,
        rate = ?client.executor().transport().rate_state(),
        "Migration complete"
    );
    Ok(())
}
