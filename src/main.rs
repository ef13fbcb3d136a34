use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use newsreel::server::{self, ServerConfig};
use newsreel::{GenerateRequest, VideoConfig, VideoGenerator};

#[derive(Parser, Debug)]
#[command(name = "newsreel", version, about = "Turn news articles into animated HTML videos")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the generation API and the submission form.
    Serve(ServeArgs),
    /// Render a video document to a file or stdout.
    Render(RenderArgs),
    /// Print the text extracted from an article.
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Article fetch timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Override the User-Agent sent with article requests.
    #[arg(long)]
    user_agent: Option<String>,
}

impl FetchArgs {
    fn video_config(&self) -> VideoConfig {
        let mut config = VideoConfig {
            timeout_ms: self.timeout_ms,
            ..Default::default()
        };
        if let Some(ua) = &self.user_agent {
            config.user_agent = ua.clone();
        }
        config
    }
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(long)]
    workers: Option<usize>,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Literal text to animate.
    #[arg(long, conflicts_with = "url", required_unless_present = "url")]
    text: Option<String>,

    /// Article URL to fetch and animate.
    #[arg(long)]
    url: Option<String>,

    /// Output path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write the base64 data URI instead of raw HTML.
    #[arg(long)]
    data_uri: bool,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Article URL.
    #[arg(long)]
    url: String,

    #[command(flatten)]
    fetch: FetchArgs,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => serve(args),
        Command::Render(args) => render(args),
        Command::Extract(args) => extract(args),
    }
}

fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let generator = VideoGenerator::from_config(args.fetch.video_config())?;
    let mut config = ServerConfig {
        addr: args.addr,
        ..Default::default()
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    server::serve(config, generator).context("server failed")
}

fn render(args: RenderArgs) -> anyhow::Result<()> {
    let generator = VideoGenerator::from_config(args.fetch.video_config())?;
    let request = GenerateRequest {
        news_url: args.url,
        custom_text: args.text,
    };
    let doc = generator.generate(&request)?;
    log::info!(
        "generated {} frames, {}s loop",
        doc.frame_count,
        doc.total_duration
    );

    let output = if args.data_uri {
        doc.to_data_uri()
    } else {
        doc.html
    };

    match args.out {
        Some(path) => std::fs::write(&path, output)
            .with_context(|| format!("write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn extract(args: ExtractArgs) -> anyhow::Result<()> {
    let generator = VideoGenerator::from_config(args.fetch.video_config())?;
    let text = generator.extractor().extract(&args.url)?;
    println!("{}", text);
    Ok(())
}
