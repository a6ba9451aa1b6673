use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use contexteq_core::{
    Gateway, GatewayConfig, Provider, Tab, Widget,
    format::format_duration,
    gateway::{DEFAULT_QUERY, Response},
    views::{
        self,
        campaign_explainer::{self, Metric},
        context_match, creative_brief, realtime_bot, safety_radar,
        upload_index::{self, DEFAULT_LIBRARY, DEFAULT_MODEL, IndexForm},
    },
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

mod render;

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliProvider {
    #[default]
    Hosted,
    Local,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Hosted => Provider::Hosted,
            CliProvider::Local => Provider::Local,
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum CliMetric {
    #[default]
    Ctr,
    Retention,
    Roas,
}

impl From<CliMetric> for Metric {
    fn from(cli: CliMetric) -> Self {
        match cli {
            CliMetric::Ctr => Metric::Ctr,
            CliMetric::Retention => Metric::Retention,
            CliMetric::Roas => Metric::Roas,
        }
    }
}

#[derive(Parser)]
#[command(name = "contexteq")]
#[command(about = "Contextual & safe video intelligence for advertising (demo dashboard)")]
struct Cli {
    /// Video intelligence API key. Leave unset to run in demo mode with sample data.
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Backend to forward to in live mode
    #[arg(short, long, global = true, default_value = "hosted")]
    provider: CliProvider,

    /// Override the provider's base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Use sample data even when an API key is available
    #[arg(long, global = true)]
    demo: bool,

    /// Simulated processing time in demo mode
    #[arg(long, global = true, default_value_t = 600)]
    latency_ms: u64,

    /// Print widgets as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload & Index: register a video asset (no real indexing)
    Index {
        /// Video file to upload (mp4, mov, mkv, webm)
        #[arg(long)]
        file: Option<String>,
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,
        #[arg(long, default_value = DEFAULT_LIBRARY)]
        library: String,
    },
    /// Safety Radar: brand safety score, flags and detections
    Safety,
    /// Context Match: find scenes for a contextual query
    Search {
        #[arg(default_value = DEFAULT_QUERY)]
        query: String,
    },
    /// Creative Brief: scene-by-scene table and A/B ideas
    Brief,
    /// Campaign Explainer: KPI table and chart
    Explain {
        #[arg(short, long, default_value = "ctr", ignore_case = true)]
        metric: CliMetric,
    },
    /// Real-Time Bot: analyze a newly dropped asset
    Bot {
        #[arg(long)]
        file: Option<String>,
    },
    /// Embed text into a vector
    Embed {
        #[arg(default_value = "")]
        text: String,
    },
    /// Every tab in order
    Dashboard {
        #[arg(long, default_value = DEFAULT_QUERY)]
        query: String,
        #[arg(short, long, default_value = "ctr", ignore_case = true)]
        metric: CliMetric,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn create_spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")?,
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

struct Session {
    gateway: Gateway,
    json: bool,
}

impl Session {
    /// Runs `work` behind a spinner unless output is JSON.
    async fn with_spinner<F>(&self, msg: &str, work: F) -> Result<Vec<Widget>>
    where
        F: Future<Output = Vec<Widget>>,
    {
        if self.json {
            return Ok(work.await);
        }
        let started = Instant::now();
        let spinner = create_spinner(msg)?;
        let widgets = work.await;
        spinner.finish_and_clear();
        tracing::debug!(elapsed = %format_duration(started.elapsed()), "{msg}");
        Ok(widgets)
    }

    async fn tab(&self, tab: Tab, command: &Command) -> Result<Vec<Widget>> {
        let widgets = match (tab, command) {
            (
                Tab::UploadIndex,
                Command::Index {
                    file,
                    model,
                    library,
                },
            ) => upload_index::submit(&IndexForm {
                file_name: file.clone(),
                model: model.clone(),
                library: library.clone(),
            }),
            (Tab::UploadIndex, _) => upload_index::submit(&IndexForm::default()),
            (Tab::SafetyRadar, _) => {
                self.with_spinner("Running safety analysis...", safety_radar::run(&self.gateway))
                    .await?
            }
            (Tab::ContextMatch, Command::Search { query } | Command::Dashboard { query, .. }) => {
                self.with_spinner(
                    "Searching scenes...",
                    context_match::run(&self.gateway, query),
                )
                .await?
            }
            (Tab::ContextMatch, _) => {
                self.with_spinner(
                    "Searching scenes...",
                    context_match::run(&self.gateway, DEFAULT_QUERY),
                )
                .await?
            }
            (Tab::CreativeBrief, _) => creative_brief::run(),
            (
                Tab::CampaignExplainer,
                Command::Explain { metric } | Command::Dashboard { metric, .. },
            ) => campaign_explainer::run((*metric).into()),
            (Tab::CampaignExplainer, _) => campaign_explainer::run(Metric::default()),
            (Tab::RealTimeBot, command) => {
                let file = match command {
                    Command::Bot { file } => file.as_deref(),
                    _ => None,
                };
                self.with_spinner(
                    "Processing new upload...",
                    realtime_bot::run(&self.gateway, file),
                )
                .await?
            }
        };
        Ok(widgets)
    }

    async fn embed(&self, text: &str) -> Result<Vec<Widget>> {
        let gateway = &self.gateway;
        self.with_spinner("Embedding...", async move {
            match gateway.embed(text).await {
                Ok(embedding) => vec![Widget::json(&Response::Embedding(embedding))],
                Err(e) => vec![views::failure_notice(&e)],
            }
        })
        .await
    }

    fn emit(&self, title: &str, intro: Vec<Widget>, widgets: Vec<Widget>) -> Result<()> {
        if self.json {
            let value = serde_json::json!({ "tab": title, "widgets": widgets });
            println!("{}", serde_json::to_string(&value)?);
        } else {
            print!("{}", render::render_widgets(&intro));
            print!("{}", render::render_widgets(&widgets));
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let provider: Provider = cli.provider.into();
    let credentials = provider.resolve_api_key(cli.api_key.as_deref());
    let mut config = GatewayConfig::new(provider, credentials, cli.demo)
        .with_latency(Duration::from_millis(cli.latency_ms));
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }
    tracing::debug!(provider = provider.name(), ?config, "gateway configured");

    let session = Session {
        gateway: Gateway::new(config),
        json: cli.json,
    };

    if !session.json {
        print!("{}", render::render_widgets(&views::header()));
        print!("{}", render::render_widgets(&views::sidebar(session.gateway.mode())));
        println!("{}", style("─".repeat(60)).dim());
    }

    let total_start = Instant::now();
    let tabs: Vec<Tab> = match &cli.command {
        Command::Index { .. } => vec![Tab::UploadIndex],
        Command::Safety => vec![Tab::SafetyRadar],
        Command::Search { .. } => vec![Tab::ContextMatch],
        Command::Brief => vec![Tab::CreativeBrief],
        Command::Explain { .. } => vec![Tab::CampaignExplainer],
        Command::Bot { .. } => vec![Tab::RealTimeBot],
        Command::Dashboard { .. } => Tab::ALL.to_vec(),
        Command::Embed { text } => {
            let widgets = session.embed(text).await?;
            session.emit("Embed", vec![Widget::heading("Embedding")], widgets)?;
            Vec::new()
        }
    };

    for tab in tabs {
        let widgets = session.tab(tab, &cli.command).await?;
        session.emit(tab.title(), tab.intro(), widgets)?;
    }

    if !session.json {
        println!("{}", style("─".repeat(60)).dim());
        print!("{}", render::render_widgets(&[views::footer()]));
        println!(
            "{} {}",
            style("Total time:").dim(),
            style(format_duration(total_start.elapsed())).cyan().bold()
        );
    }

    Ok(())
}
