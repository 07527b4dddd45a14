use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use dispatcher::{
    is_exit_command, ClassifierGateway, ConversationContext, Dispatcher, MovieQueryService,
};
use groq_client::GroqClassifier;
use tmdb_client::TmdbClient;

/// CineChat - interactive movie assistant
#[derive(Parser)]
#[command(name = "cinechat")]
#[command(about = "Interactive movie chatbot backed by Groq and TMDb", long_about = None)]
struct Cli {
    /// Classifier model to use
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut classifier =
        GroqClassifier::from_env().context("Failed to configure the Groq classifier")?;
    if let Some(model) = cli.model {
        classifier = classifier.with_model(model);
    }
    let classifier: Arc<dyn ClassifierGateway> = Arc::new(classifier);
    let movies: Arc<dyn MovieQueryService> =
        Arc::new(TmdbClient::from_env().context("Failed to configure the TMDb client")?);

    let dispatcher = Dispatcher::new(classifier, movies);
    run_session(&dispatcher).await
}

/// The interactive read-print loop.
///
/// One context lives for the whole session; the loop ends on a quit
/// keyword or end of input. Upstream failures print and the session
/// continues.
async fn run_session(dispatcher: &Dispatcher) -> Result<()> {
    println!(
        "{}",
        "Bem-vindo ao CineChat! Pergunte sobre filmes (sair/exit/quit para encerrar)."
            .bold()
            .blue()
    );

    let mut ctx = ConversationContext::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("--------------------------------------");
        print!("{}", "Usuário: ".green());
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let utterance = line.context("Failed to read from stdin")?;
        let utterance = utterance.trim();

        if utterance.is_empty() {
            continue;
        }
        if is_exit_command(utterance) {
            println!("Encerrando o assistente. Até logo!");
            break;
        }

        match dispatcher.handle_turn(&mut ctx, utterance).await {
            Ok(outcome) => {
                println!("{} {}", "ChatBot:".cyan(), outcome.classifier_text);
                if let Some(reply) = outcome.reply {
                    println!("{reply}");
                }
            }
            Err(err) => {
                println!(
                    "{}",
                    format!("Erro ao processar a resposta do classificador: {err}").red()
                );
            }
        }
    }

    Ok(())
}
