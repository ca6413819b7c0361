use anyhow::Result;
use clap::Parser;
use std::future::Future;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use mini_agent::config::Settings;
use mini_agent::services::conversation::{truncate_front, ContextMessage};
use mini_agent::services::{ConversationAgent, GeminiClient};
use mini_agent::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "mini-agent-chat",
    version,
    about = "Mini-Agent - terminal chat with Google Gemini"
)]
struct Args {
    /// Replace the default system prompt for this session
    #[arg(long)]
    persona: Option<String>,
}

const EXIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_cli_telemetry();
    let args = Args::parse();

    println!("{}", "=".repeat(60));
    println!("Mini-Agent Terminal Chat");
    println!("{}", "=".repeat(60));
    println!("Type 'quit', 'exit', or 'q' to end the conversation\n");

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let provider = Arc::new(GeminiClient::new(settings.gemini.clone())?);
    let agent = ConversationAgent::new(provider, settings.persona.clone());
    if let Some(persona) = args.persona {
        agent.set_persona(persona);
    }

    let max_entries = settings.conversation.context_entries();
    let mut context: Vec<ContextMessage> = Vec::with_capacity(max_entries + 2);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"You: ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            println!("\n\nGoodbye!");
            break;
        };

        let input = line.trim();
        if EXIT_WORDS.contains(&input.to_lowercase().as_str()) {
            println!("\nGoodbye!");
            break;
        }
        if input.is_empty() {
            continue;
        }

        let outcome = run_turn(
            &agent,
            input,
            &mut context,
            max_entries,
            tokio::signal::ctrl_c(),
        )
        .await;
        match outcome {
            TurnOutcome::Reply(text) => println!("\nAgent: {}\n", text),
            TurnOutcome::Interrupted => {
                println!("\n\nGoodbye!");
                break;
            }
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq)]
enum TurnOutcome {
    Reply(String),
    Interrupted,
}

/// One exchange; `interrupt` resolving first abandons the in-flight reply.
/// Only successful replies extend the rolling context.
async fn run_turn<I>(
    agent: &ConversationAgent,
    input: &str,
    context: &mut Vec<ContextMessage>,
    max_entries: usize,
    interrupt: I,
) -> TurnOutcome
where
    I: Future,
{
    let result = tokio::select! {
        result = agent.respond(input, &context[..]) => result,
        _ = interrupt => return TurnOutcome::Interrupted,
    };

    match result {
        Ok(reply) => {
            context.push(ContextMessage::user(input));
            context.push(ContextMessage::assistant(reply.clone()));
            truncate_front(context, max_entries);
            TurnOutcome::Reply(reply)
        }
        Err(e) => TurnOutcome::Reply(e.to_reply_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mini_agent::config::PersonaConfig;
    use mini_agent::services::{CompletionProvider, Content, ProviderError};

    struct FixedProvider(Option<&'static str>);

    #[async_trait]
    impl CompletionProvider for FixedProvider {
        async fn complete(&self, _contents: &[Content]) -> Result<String, ProviderError> {
            match self.0 {
                Some(reply) => Ok(reply.to_string()),
                None => std::future::pending().await,
            }
        }

        fn model_name(&self) -> String {
            "fixed".to_string()
        }
    }

    fn agent(reply: Option<&'static str>) -> ConversationAgent {
        ConversationAgent::new(Arc::new(FixedProvider(reply)), PersonaConfig::default())
    }

    #[tokio::test]
    async fn test_interrupt_during_reply_ends_turn() {
        let agent = agent(None);
        let mut context = Vec::new();

        let outcome = run_turn(&agent, "hi", &mut context, 10, std::future::ready(())).await;

        assert_eq!(outcome, TurnOutcome::Interrupted);
        assert!(context.is_empty());
    }

    #[tokio::test]
    async fn test_reply_extends_rolling_context() {
        let agent = agent(Some("hello"));
        let mut context = vec![ContextMessage::user("old"), ContextMessage::assistant("older")];

        let outcome = run_turn(&agent, "hi", &mut context, 2, std::future::pending::<()>()).await;

        assert_eq!(outcome, TurnOutcome::Reply("hello".to_string()));
        assert_eq!(
            context,
            vec![ContextMessage::user("hi"), ContextMessage::assistant("hello")]
        );
    }
}
