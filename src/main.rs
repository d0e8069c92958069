use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use barangay_noise_client::core::config::Config;
use barangay_noise_client::core::error::AppError;
use barangay_noise_client::features::admin::{AdminReviewService, SaveOutcome};
use barangay_noise_client::features::dashboard::DashboardService;
use barangay_noise_client::features::history::dtos::history_subtitle;
use barangay_noise_client::features::history::HistoryService;
use barangay_noise_client::features::reports::display::REASON_FILTERS;
use barangay_noise_client::features::reports::dtos::MediaAttachment;
use barangay_noise_client::features::reports::models::{NoiseLevel, ReportLocation, ReportStatus};
use barangay_noise_client::features::reports::{HttpReportBackend, ReportBackend, StatusUpdateService};
use barangay_noise_client::features::submission::dtos::NewReportDto;
use barangay_noise_client::features::submission::{submission_summary, SubmissionService};
use barangay_noise_client::shared::constants::{
    NOTICE_FETCH_FAILED, NOTICE_SUBMIT_FAILED, NOTICE_UPDATE_FAILED, NOTICE_UPDATE_SUCCEEDED,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "barangay-noise-client", version, about = "Community noise report client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every report with its current response (admin)
    Reports {
        /// Reason filter: All, Music, Vehicle, Construction, Party, Animal
        #[arg(long, default_value = "All")]
        filter: String,
    },
    /// Show the responses that may be sent for a report (admin)
    Responses { report_id: String },
    /// Send a response, setting the report's status (admin)
    Respond {
        report_id: String,
        /// monitoring, action_required or resolved
        status: ReportStatus,
    },
    /// List the signed-in user's reports
    History {
        #[arg(long, env = "NOISE_USER_ID")]
        user: Option<String>,
    },
    /// Community totals
    Stats,
    /// Submit a new noise report
    Submit {
        #[arg(long)]
        reason: String,
        /// green, yellow or red
        #[arg(long)]
        level: NoiseLevel,
        #[arg(long, conflicts_with = "video", required_unless_present = "video")]
        audio: Option<PathBuf>,
        #[arg(long)]
        video: Option<PathBuf>,
        #[arg(long)]
        comment: Option<String>,
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::debug!("Using backend at {}", config.backend.base_url);

    let backend: Arc<dyn ReportBackend> = Arc::new(HttpReportBackend::new(&config.backend)?);
    let updates = Arc::new(StatusUpdateService::new(Arc::clone(&backend)));

    let outcome = match cli.command {
        Command::Reports { filter } => {
            list_reports(AdminReviewService::new(backend, updates), &filter).await
        }
        Command::Responses { report_id } => {
            show_responses(AdminReviewService::new(backend, updates), &report_id).await
        }
        Command::Respond { report_id, status } => {
            respond(AdminReviewService::new(backend, updates), &report_id, status).await
        }
        Command::History { user } => {
            let user = user.or(config.session.user_id.clone());
            show_history(HistoryService::new(backend, user)).await
        }
        Command::Stats => {
            let summary = DashboardService::new(backend).get_summary().await;
            println!("Users:   {}", summary.total_users);
            println!("Reports: {}", summary.total_reports);
            Ok(())
        }
        Command::Submit {
            reason,
            level,
            audio,
            video,
            comment,
            lat,
            lon,
        } => {
            let media = match (audio, video) {
                (_, Some(video)) => Some(MediaAttachment::video(video)),
                (Some(audio), None) => Some(MediaAttachment::audio(audio)),
                (None, None) => None,
            };
            let location = lat.zip(lon).map(|(latitude, longitude)| ReportLocation {
                latitude,
                longitude,
                address: None,
                timestamp: Some(chrono::Utc::now()),
            });
            let dto = NewReportDto {
                media,
                reason: Some(reason),
                noise_level: Some(level),
                comment,
                location,
            };
            submit(
                SubmissionService::new(backend, config.session.user_id.clone()),
                dto,
            )
            .await
        }
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(notice) => {
            eprintln!("Error: {}", notice);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Each command resolves to success or a user-facing notice
type Outcome = Result<(), String>;

fn notice(err: AppError, fallback: &str) -> String {
    tracing::debug!("Command failed: {}", err);
    err.user_notice(fallback)
}

async fn list_reports(mut admin: AdminReviewService, filter: &str) -> Outcome {
    admin
        .set_filter(filter)
        .map_err(|_| format!("Filter must be one of: {}", REASON_FILTERS.join(", ")))?;
    admin
        .refresh()
        .await
        .map_err(|e| notice(e, NOTICE_FETCH_FAILED))?;

    let cards = admin.cards(chrono::Utc::now());
    if cards.is_empty() {
        println!("No reports found");
        return Ok(());
    }

    for card in cards {
        println!(
            "{} {} [{}] {}",
            card.icon,
            card.title,
            card.id,
            card.submitted.unwrap_or_default()
        );
        let level = card
            .noise_level
            .map(|b| b.label)
            .unwrap_or_else(|| "Unknown".to_string());
        print!("   Level: {}  Status: {}", level, card.status.label);
        if let Some(days) = card.consecutive_days {
            print!("  ({})", days);
        }
        println!();
        println!("   {}: {}", card.response_heading, card.response_message);
        if let Some(comment) = card.comment {
            println!("   Details: {}", comment);
        }
        if let Some(coordinates) = card.coordinates {
            println!("   {}", coordinates);
        }
        if let Some(url) = card.audio_url.or(card.video_url) {
            println!("   Media: {}", url);
        }
    }
    Ok(())
}

async fn show_responses(mut admin: AdminReviewService, report_id: &str) -> Outcome {
    admin
        .refresh()
        .await
        .map_err(|e| notice(e, NOTICE_FETCH_FAILED))?;
    admin
        .open_picker(report_id)
        .map_err(|e| notice(e, NOTICE_FETCH_FAILED))?;

    let choices = admin.picker_choices();
    if choices.is_empty() {
        println!("No responses are available for this report");
    }
    for choice in choices {
        let marker = if choice.selected { "(x)" } else { "( )" };
        println!("{} {} [{}]", marker, choice.label, choice.status);
        println!("    {}", choice.message);
    }
    Ok(())
}

async fn respond(mut admin: AdminReviewService, report_id: &str, status: ReportStatus) -> Outcome {
    admin
        .refresh()
        .await
        .map_err(|e| notice(e, NOTICE_FETCH_FAILED))?;
    admin
        .open_picker(report_id)
        .map_err(|e| notice(e, NOTICE_UPDATE_FAILED))?;
    admin
        .select_response(status)
        .map_err(|e| notice(e, NOTICE_UPDATE_FAILED))?;
    let outcome = admin
        .save_selection()
        .await
        .map_err(|e| notice(e, NOTICE_UPDATE_FAILED))?;

    println!("{}", NOTICE_UPDATE_SUCCEEDED);
    if let SaveOutcome::RefreshFailed(err) = outcome {
        eprintln!("Warning: {}", notice(err, NOTICE_FETCH_FAILED));
        return Ok(());
    }
    if let Some(card) = admin
        .cards(chrono::Utc::now())
        .into_iter()
        .find(|c| c.id == report_id)
    {
        println!("{}: {}", card.status.label, card.response_message);
    }
    Ok(())
}

async fn show_history(mut history: HistoryService) -> Outcome {
    history
        .refresh()
        .await
        .map_err(|e| notice(e, NOTICE_FETCH_FAILED))?;

    let cards = history.cards();
    println!("{}", history_subtitle(cards.len()));
    for card in cards {
        println!("Noise Report  {}", card.submitted.unwrap_or_default());
        for line in [card.reason, card.location, card.media, card.comment]
            .into_iter()
            .flatten()
        {
            println!("   {}", line);
        }
        println!("   [{}] {}", card.status.label, card.response_message);
    }
    Ok(())
}

async fn submit(service: SubmissionService, dto: NewReportDto) -> Outcome {
    let report = service
        .submit(&dto)
        .await
        .map_err(|e| notice(e, NOTICE_SUBMIT_FAILED))?;

    tracing::debug!("Created report {}", report.id);
    println!("{}", submission_summary(&dto));
    Ok(())
}
