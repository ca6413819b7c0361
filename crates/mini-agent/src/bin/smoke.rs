use anyhow::{Context, Result};
use clap::Parser;
use reqwest::{Client, Response};
use serde_json::{json, Value};

/// Manual smoke test against a running Mini-Agent server
#[derive(Parser, Debug)]
#[command(name = "mini-agent-smoke", version)]
struct Args {
    #[arg(long, default_value = "http://localhost:8000")]
    base_url: String,

    #[arg(long, default_value = "default")]
    user_id: String,
}

const MESSAGES: [&str; 3] = [
    "Hello! What can you help me with?",
    "What's the capital of France?",
    "Tell me a short joke",
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let base = args.base_url.trim_end_matches('/');
    let client = Client::new();

    println!("{}", "=".repeat(60));
    println!("Mini-Agent API Test");
    println!("{}\n", "=".repeat(60));

    println!("Testing health check...");
    report(client.get(format!("{}/", base)).send().await).await?;

    for message in MESSAGES {
        println!("Testing chat with message: '{}'...", message);
        let request = client
            .post(format!("{}/chat", base))
            .json(&json!({ "message": message, "user_id": args.user_id }));
        report(request.send().await).await?;
    }

    println!("Testing history for user: {}...", args.user_id);
    let history_url = reqwest::Url::parse_with_params(
        &format!("{}/history", base),
        &[("user_id", args.user_id.as_str())],
    )?;
    report(client.get(history_url).send().await).await?;

    println!("Testing info endpoint...");
    report(client.get(format!("{}/info", base)).send().await).await?;

    println!("All tests completed!");
    Ok(())
}

async fn report(response: reqwest::Result<Response>) -> Result<()> {
    let response = response.context("request failed")?;
    println!("Status: {}", response.status());

    let body = response.text().await.context("failed to read body")?;
    match serde_json::from_str::<Value>(&body) {
        Ok(value) => println!("Response: {}\n", serde_json::to_string_pretty(&value)?),
        Err(_) => println!("Response: {}\n", body),
    }
    Ok(())
}
