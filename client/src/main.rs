/// Reelay terminal front-end.
///
/// Submits a source video URL to the reupload backend and follows the task
/// until it reaches a terminal state, mirroring the web front-end workflow.
use clap::Parser;
use tracing::info;

use reelay_client::api::HttpBackend;
use reelay_client::config::Config;
use reelay_client::controller::{ProcessForm, TaskFlowController};
use reelay_client::render::{ProgressView, ResultsView, UploadBadge};
use reelay_client::validate::{self, PlatformSelection};
use reelay_client::view::{FlowView, Notice, NoticeLevel};

#[derive(Parser, Debug)]
#[command(name = "reelay", about = "Reupload a source video to YouTube Shorts / Instagram Reels")]
struct Args {
    /// Source video URL (TikTok video, share link, or short link).
    url: String,

    /// Only download the source video; skip all uploads.
    #[arg(long)]
    download_only: bool,

    /// Do not publish to YouTube Shorts.
    #[arg(long)]
    no_youtube: bool,

    /// Do not publish to Instagram Reels.
    #[arg(long)]
    no_instagram: bool,

    /// Custom title for the published video.
    #[arg(long, default_value = "")]
    title: String,

    /// Custom description for the published video.
    #[arg(long, default_value = "")]
    description: String,
}

/// Stdout implementation of the workflow view.
struct TerminalView;

impl FlowView for TerminalView {
    fn show_progress(&mut self, progress: &ProgressView) {
        match progress.phase {
            Some(phase) => println!("{} {:>3}% | {}", phase, progress.percent, progress.message),
            None => println!("{:>3}% | {}", progress.percent, progress.message),
        }
    }

    fn show_results(&mut self, results: &ResultsView) {
        if let Some(video) = &results.video {
            println!();
            println!("Video:      {} (by {})", video.title, video.creator);
            println!("Duration:   {}", video.duration);
            println!("Resolution: {}", video.resolution);
            if let Some(description) = &video.description {
                println!("Description: {}", description);
            }
        }
        for card in &results.uploads {
            println!();
            match card.badge {
                UploadBadge::Success => {
                    println!("[ok] {}", card.platform_name);
                    if let Some(url) = &card.url {
                        println!("     URL: {}", url);
                    }
                    if !card.published_at.is_empty() {
                        println!("     Published: {}", card.published_at);
                    }
                    if let Some(title) = &card.title {
                        println!("     Title: {}", title);
                    }
                }
                UploadBadge::Error => {
                    println!("[failed] {}", card.platform_name);
                    if let Some(error) = &card.error {
                        println!("     Error: {}", error);
                    }
                }
            }
        }
    }

    fn hide_progress(&mut self) {}

    fn reset_form(&mut self) {}

    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
            NoticeLevel::Warning => eprintln!("warning: {}", notice.message),
            _ => println!("{}", notice.message),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reelay_client=info".parse().unwrap())
                .add_directive("reelay_shared=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    info!("Using backend at {}", config.api_base);

    // Inline validation indicator, as the web form shows it.
    let indicator = validate::validate_source_url(&args.url).indicator();
    if !indicator.text.is_empty() {
        println!("{}", indicator.text);
    }

    let backend = HttpBackend::new(config.api_base);
    let mut controller = TaskFlowController::new(backend).with_poll_interval(config.poll_interval);
    let mut view = TerminalView;

    let accepted = if args.download_only {
        controller.submit_download(&args.url, &mut view).await
    } else {
        let form = ProcessForm {
            url: args.url.clone(),
            platforms: PlatformSelection {
                youtube: !args.no_youtube,
                instagram: !args.no_instagram,
            },
            title: args.title.clone(),
            description: args.description.clone(),
        };
        controller.submit_process(&form, &mut view).await
    };

    if !accepted {
        anyhow::bail!("submission was not accepted");
    }

    controller.run_to_completion(&mut view).await;
    Ok(())
}
