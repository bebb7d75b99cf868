//! Generates a quiz from a syllabus PDF on the command line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use weekli_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::quiz_question::quiz_to_plain_text,
        dto::request::{DEFAULT_NUM_QUESTIONS, MAX_NUM_QUESTIONS},
    },
};

/// WeekLi quiz generator - turn a course syllabus into a multiple-choice quiz.
#[derive(Parser, Debug)]
#[command(name = "weekli-quiz")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Syllabus PDF to read
    pdf: PathBuf,

    /// Number of questions to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_QUESTIONS,
          value_parser = clap::value_parser!(u32).range(1..=MAX_NUM_QUESTIONS as i64))]
    questions: u32,

    /// Topic to scope the questions to (default: first topic found)
    #[arg(short, long)]
    topic: Option<String>,

    /// Write the structured quiz as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = Config::from_env();
    config.validate()?;

    let document = tokio::fs::read(&cli.pdf).await.map_err(|e| {
        AppError::InvalidInput(format!("Cannot read {}: {}", cli.pdf.display(), e))
    })?;

    let state = AppState::new(config)?;
    let outcome = state
        .orchestrator
        .run_full_workflow(&document, cli.questions, cli.topic.as_deref())
        .await?;

    println!("Found {} topics:", outcome.topics.len());
    for (i, topic) in outcome.topics.iter().enumerate() {
        println!("  {}. {}", i + 1, topic);
    }
    match &outcome.topic {
        Some(topic) => println!("\nQuiz on: {}\n", topic),
        None => println!("\nQuiz on: most recently covered material\n"),
    }
    println!("{}", quiz_to_plain_text(&outcome.questions));

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&outcome.questions)
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        tokio::fs::write(path, json).await?;
        println!("\nQuiz saved to {}", path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            if e.is_transient() {
                eprintln!("The model provider is unavailable right now; try again later.");
            }
            ExitCode::FAILURE
        }
    }
}
