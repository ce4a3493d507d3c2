use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::runtime::Handle;
use tracing::{info, warn};

use prompt_builder::answers::AnswerMap;
use prompt_builder::app::App;
use prompt_builder::assembler::build_prompt;
use prompt_builder::clipboard::{Clipboard, CommandClipboard, UnavailableClipboard};
use prompt_builder::config::{self, Config, RuntimeConfig};
use prompt_builder::questions::{Question, QuestionKey, question, question_set, total_questions};
use prompt_builder::tui;

#[derive(Parser)]
#[command(name = "prompt-builder")]
#[command(about = "Guided questionnaire that assembles a structured prompt", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive interview in the terminal (default)
    Run,
    /// Print the question set
    Questions {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Only this question (objetivo, publico, contexto, ...)
        #[arg(long)]
        key: Option<QuestionKey>,
    },
    /// Assemble a prompt from an answers file (TOML, or JSON by extension)
    Assemble {
        file: PathBuf,
        /// Also copy the prompt to the clipboard
        #[arg(long)]
        copy: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    config::load_env();
    let runtime = RuntimeConfig::load_from_env();
    init_tracing(&runtime);

    let config = Config::load_with(runtime).map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_interactive(&config),
        Commands::Questions { json, key } => print_questions(json, key),
        Commands::Assemble { file, copy } => assemble(&config, &file, copy),
    }
}

fn init_tracing(runtime: &RuntimeConfig) {
    if runtime.no_log {
        return;
    }
    // The TUI owns stdout/stderr, so logs go to a file
    let Some(path) = runtime.log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Logging disabled, cannot open {}: {}", path.display(), e);
            return;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(runtime.log_level.as_str())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

fn resolve_clipboard(config: &Config) -> Arc<dyn Clipboard> {
    match CommandClipboard::resolve(config.clipboard.command.as_deref()) {
        Ok(clip) => {
            info!("Using clipboard command {}", clip.program());
            Arc::new(clip)
        }
        Err(e) => {
            warn!("Clipboard unavailable: {}", e);
            Arc::new(UnavailableClipboard {
                reason: e.to_string(),
            })
        }
    }
}

fn run_interactive(config: &Config) -> Result<()> {
    info!("Starting prompt builder");
    let mut app = App::new(config, resolve_clipboard(config), Handle::current());
    tui::run(&mut app)?;
    info!("Prompt builder closed");
    Ok(())
}

fn print_questions(json: bool, key: Option<QuestionKey>) -> Result<()> {
    if let Some(key) = key {
        let q = question(key);
        if json {
            println!("{}", serde_json::to_string_pretty(q)?);
        } else {
            print_question(key.index() + 1, q);
        }
        return Ok(());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(question_set())?);
        return Ok(());
    }
    for (i, q) in question_set().iter().enumerate() {
        print_question(i + 1, q);
    }
    Ok(())
}

fn print_question(number: usize, q: &Question) {
    println!("{}. {} [{}]", number, q.title, q.key);
    println!("   {}", q.prompt);
    if let Some(helper) = q.helper {
        println!("   {}", helper);
    }
}

fn load_answers(path: &Path) -> Result<AnswerMap> {
    AnswerMap::from_path(path).with_context(|| format!("reading answers from {}", path.display()))
}

fn assemble(config: &Config, path: &Path, copy: bool) -> Result<()> {
    let answers = load_answers(path)?;
    if !answers.is_complete() {
        warn!(
            "{} of {} answers provided; missing sections are omitted",
            answers.answered_count(),
            total_questions()
        );
    }
    let prompt = build_prompt(&answers);
    println!("{prompt}");

    if copy {
        match resolve_clipboard(config).write_text(&prompt) {
            Ok(()) => eprintln!("Copiado!"),
            Err(e) => {
                tracing::error!("Copy failed: {}", e);
                eprintln!("Copy failed: {}", e);
            }
        }
    }
    Ok(())
}
