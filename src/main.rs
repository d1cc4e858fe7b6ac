use std::{path::PathBuf, sync::Arc, time::Duration};
use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use descgen::{
    api,
    config::AppCfg,
    io::save_description,
    providers::build_provider,
    state::Action,
    GenerationSession, HttpDescriptionClient, Language, Tone,
};

#[derive(Parser, Debug)]
#[command(name = "descgen", version, about = "AI product descriptions with an offline fallback")]
struct Cli {
    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Generate one description
    Generate {
        #[arg(long)]
        name: String,
        /// Key features, comma separated
        #[arg(long, default_value = "")]
        features: String,
        #[arg(long)]
        tone: Option<Tone>,
        #[arg(long, default_value = "en")]
        language: Language,
        /// Description service root URL
        #[arg(long)]
        endpoint: Option<String>,
        /// Also write <name>_description.txt
        #[arg(long)]
        save: bool,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the description service
    Serve {
        #[arg(long)]
        bind: Option<String>,
        /// mock | openai | azure
        #[arg(long)]
        provider: Option<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
    pb.set_message("Generating...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut cfg = AppCfg::load(cli.config.as_deref())?;

    match cli.cmd {
        Cmd::Generate { name, features, tone, language, endpoint, save, out_dir, json } => {
            if let Some(e) = endpoint { cfg.client.endpoint = e; }
            if let Some(d) = out_dir { cfg.out_dir = d; }

            let client = HttpDescriptionClient::new(&cfg.client.endpoint, Duration::from_secs(cfg.client.timeout_secs))?;
            let mut session = GenerationSession::new(Arc::new(client));
            session.apply(Action::EditProductName(name));
            session.apply(Action::EditProductFeatures(features));
            if let Some(t) = tone { session.apply(Action::SelectTone(t)); }
            session.apply(Action::SelectLanguage(language));

            let pb = spinner();
            let outcome = session.generate().await;
            pb.finish_and_clear();
            let res = outcome?;

            if let Some(notice) = res.notice() {
                eprintln!("⚠️  {notice}");
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                println!("{}", res.description);
            }
            if save {
                let path = save_description(&cfg.out_dir, &session.state().form, &res).await?;
                eprintln!("✅ Saved {}", path.display());
            }
        }
        Cmd::Serve { bind, provider } => {
            if let Some(b) = bind { cfg.server.bind = b; }
            if let Some(p) = provider { cfg.server.provider.kind = p; }
            let provider = build_provider(&cfg.server.provider)?;
            api::serve(&cfg.server.bind, provider).await?;
        }
    }
    Ok(())
}
