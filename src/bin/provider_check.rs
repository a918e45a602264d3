use std::time::Instant;

use anyhow::Result;
use rs_answer_svc::config::Config;
use rs_answer_svc::provider::{AnswerProvider, OllamaProvider};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    println!("🚀 Answer Provider Connectivity Check");
    println!("{}", "=".repeat(50));

    let config = Config::from_env()?;
    let provider = OllamaProvider::new(config.ollama_url.clone(), config.ollama_model.clone())?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let prompt = if args.is_empty() {
        "터널".to_string()
    } else {
        args.join(" ")
    };

    println!("🔧 Endpoint: {}", provider.generate_url());
    println!("🤖 Model: {}", provider.model());
    println!("⏱️  Timeout: {:?}", config.provider_timeout);
    println!("Prompt: {}", prompt);
    println!("{}", "─".repeat(40));

    let started = Instant::now();
    let result = tokio::time::timeout(config.provider_timeout, provider.answer(&prompt)).await;
    let elapsed = started.elapsed();

    match result {
        Ok(Ok(answer)) => {
            println!("✅ Answer received in {:.2?}", elapsed);
            println!("\n📄 Answer:");
            println!("{}", "─".repeat(60));
            println!("{}", answer);
            println!("{}", "─".repeat(60));
        }
        Ok(Err(error)) => {
            println!("❌ Provider failed after {:.2?}: {}", elapsed, error);
            println!("💡 Hint: is `ollama serve` running and the model pulled?");
            println!("   Try: ollama pull {}", provider.model());
        }
        Err(_) => {
            println!("❌ No answer within {:?}", config.provider_timeout);
            println!("💡 Hint: raise PROVIDER_TIMEOUT_MS or use a smaller model");
        }
    }

    println!("\n{}", "=".repeat(50));
    println!("🏁 Check completed!");

    Ok(())
}
