//! LifePlanner CLI
//!
//! Health chat, trip planning, report analysis and weather lookups from the
//! command line.

#![allow(clippy::print_stdout)]

mod context;
mod document;

use std::path::{Path, PathBuf};

use anyhow::Context;
use application::ports::WeatherPort;
use application::services::{AssistantReply, TripRequest};
use clap::{Parser, Subcommand};
use context::AppContext;
use domain::Conversation;
use infrastructure::{AppConfig, init_telemetry};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// LifePlanner CLI
#[derive(Parser)]
#[command(name = "lifeplanner-cli")]
#[command(author, version, about = "LifePlanner health and trip assistant", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "LIFEPLANNER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Talk to the health coach
    ///
    /// Without a message, reads one message per line from stdin until EOF
    /// or "exit".
    Chat {
        /// Message to send
        message: Option<String>,

        /// Medical report (text or image) to analyze first and use as context
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Directory to save spoken replies in
        #[arg(long)]
        audio_dir: Option<PathBuf>,

        /// Skip speech synthesis
        #[arg(long)]
        no_speech: bool,
    },

    /// Plan a day out in a city
    Plan {
        /// City to plan for
        city: String,

        /// What you are looking for (e.g. "family parks")
        #[arg(short, long, default_value = "")]
        needs: String,

        /// Your routine and constraints (e.g. "free after 5pm")
        #[arg(short, long, default_value = "")]
        routine: String,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a medical report and write a diet plan
    Analyze {
        /// Report file (.txt, .md, .csv, .pdf, .jpg, .png, .webp)
        file: PathBuf,

        /// Content type, when the extension is not enough
        #[arg(long)]
        mime: Option<String>,
    },

    /// Show current weather and the forecast for a city
    Weather {
        city: String,

        /// Include the 5-day forecast
        #[arg(short, long)]
        forecast: bool,
    },

    /// List the synthesis voice for each reply language
    Voices,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// File name for the audio of one chat turn
fn audio_file_name(turn: usize, extension: &str) -> String {
    format!("reply-{turn:03}.{extension}")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if cli.verbose > 0 {
        config.telemetry.log_filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_telemetry(&config.telemetry)?;

    let context = AppContext::new(config)?;

    match cli.command {
        Commands::Chat {
            message,
            report,
            audio_dir,
            no_speech,
        } => run_chat(&context, message, report, audio_dir, no_speech).await?,

        Commands::Plan {
            city,
            needs,
            routine,
            json,
        } => {
            let planner = context.trip_planner()?;
            println!("🗺️  Planning for {city}...");
            let plan = planner
                .plan(&TripRequest::new(city, needs, routine))
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("\n🌤️  Weather: {}", plan.weather.summary());
                if let Some(rain) = plan.max_rain_chance() {
                    println!("☔ Highest rain chance: {rain:.0}%");
                }
                println!("🔎 Search: {}", plan.search_query);
                println!("\n📍 Places:\n{}", plan.places);
                println!("\n📝 Plan:\n{}", plan.plan);
            }
        }

        Commands::Analyze { file, mime } => {
            let document = document::load_report(&file, mime.as_deref()).await?;
            println!("🩺 Analyzing {}...", file.display());
            let analysis = context.report_analysis()?.analyze(document).await?;

            println!("\n📄 Extracted text:\n{}", analysis.extracted_text);
            println!("\n🥗 Diet plan:\n{}", analysis.diet_plan);
            if !analysis.is_answered() {
                std::process::exit(1);
            }
        }

        Commands::Weather { city, forecast } => {
            let weather = context.weather()?;
            let current = weather.current_weather(&city).await?;
            println!(
                "🌤️  {}: {} (feels like {}°C, humidity {}%)",
                current.city,
                current.summary(),
                current.feels_like,
                current.humidity
            );

            if forecast {
                println!();
                for slot in weather.forecast(&city).await? {
                    println!(
                        "📅 {}  {:>5.1}°C  rain {:>3.0}%  {}",
                        slot.time.format("%Y-%m-%d %H:%M"),
                        slot.temperature,
                        slot.rain_chance,
                        slot.condition
                    );
                }
            }
        }

        Commands::Voices => {
            let speech = context.speech()?;
            let status = if context.config().speech.enabled {
                "enabled"
            } else {
                "disabled"
            };
            println!("🔊 Speech synthesis {status}");
            for (language, voice) in speech.voices() {
                println!("   {} ({}) → {voice}", language.name(), language.code());
            }
        }
    }

    Ok(())
}

async fn run_chat(
    context: &AppContext,
    message: Option<String>,
    report: Option<PathBuf>,
    audio_dir: Option<PathBuf>,
    no_speech: bool,
) -> anyhow::Result<()> {
    let chat = context.health_chat(!no_speech)?;
    let mut transcript = Conversation::new();
    let mut report_text = None;

    if let Some(path) = report {
        let document = document::load_report(&path, None).await?;
        println!("🩺 Analyzing {}...", path.display());
        let analysis = context.report_analysis()?.analyze(document).await?;
        println!("\n{}\n", analysis.diet_plan);
        report_text = Some(analysis.extracted_text.clone());
        if analysis.is_answered() {
            transcript.add_message(analysis.into_transcript_message());
        }
    }

    if let Some(dir) = &audio_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    if let Some(message) = message {
        let turn = chat.chat(&transcript, &message, report_text.as_deref()).await;
        print_reply(&turn.reply, 1, audio_dir.as_deref()).await?;
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut turn_number = 0;
    loop {
        stdout.write_all("💬 > ".as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        turn_number += 1;
        let turn = chat.chat(&transcript, line, report_text.as_deref()).await;
        print_reply(&turn.reply, turn_number, audio_dir.as_deref()).await?;
        transcript = turn.transcript;
    }

    Ok(())
}

async fn print_reply(
    reply: &AssistantReply,
    turn: usize,
    audio_dir: Option<&Path>,
) -> anyhow::Result<()> {
    println!("\n🤖 {}\n", reply.text());
    println!(
        "   ⏱️  {}ms via {} [{}]",
        reply.latency_ms,
        reply.provider_used,
        reply.language().code()
    );

    if let Some(error) = &reply.synthesis_error {
        println!("   ⚠️  Audio unavailable: {error}");
    }

    if let (Some(audio), Some(dir)) = (&reply.audio, audio_dir) {
        let path = dir.join(audio_file_name(turn, audio.extension()));
        tokio::fs::write(&path, audio.data())
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("   🔊 Saved {}", path.display());
    }

    Ok(())
}
