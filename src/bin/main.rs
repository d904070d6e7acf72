use account_plan_agent::{AgentConfig, CompanyResearchAgent};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const EXIT_WORDS: &[&str] = &["exit", "quit", "bye", "goodbye"];

fn print_agent(message: &str) {
    println!("\n{} {}\n", "🤖 Agent:".cyan().bold(), message);
}

fn print_system(message: &str) {
    println!("{}", format!("ℹ️  {}", message).yellow());
}

fn print_error(message: &str) {
    println!("\n{}", format!("❌ Error: {}", message).red());
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv::dotenv().ok();

    // Logs go to stderr so they don't interleave with the conversation
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let banner = "=".repeat(60);
    println!("\n{}", banner.magenta());
    println!("{}", "🏢 COMPANY RESEARCH ASSISTANT".magenta().bold());
    println!("{}\n", banner.magenta());

    print_system("Initializing agent...");

    let mut agent = match AgentConfig::from_env().and_then(|c| CompanyResearchAgent::from_config(&c)) {
        Ok(agent) => agent,
        Err(e) => {
            error!("Startup failed: {}", e);
            println!(
                "\n{}",
                format!("❌ Fatal error during initialization: {}", e).red()
            );
            print_system("Please check your API keys in the .env file (see .env.example)");
            return ExitCode::FAILURE;
        }
    };

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            println!("\n{}", format!("❌ Could not open terminal: {}", e).red());
            return ExitCode::FAILURE;
        }
    };

    print_system("✅ Agent ready!");
    print_agent("Hello! I'm your Company Research Assistant. I can help you:");
    println!("   • Research companies from multiple sources");
    println!("   • Generate comprehensive account plans");
    println!("   • Update specific sections of plans");
    println!("   • Answer questions about companies\n");
    print_agent("What company would you like to research today?");

    let prompt = format!("{} ", "👤 You:".green().bold());

    loop {
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!();
                print_system("Interrupted by user");
                break;
            }
            Err(e) => {
                print_error(&e.to_string());
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if let Err(e) = editor.add_history_entry(input) {
            debug!("Could not record line history: {}", e);
        }

        if EXIT_WORDS.contains(&input.to_lowercase().as_str()) {
            print_agent("Thank you for using the Company Research Assistant. Goodbye!");
            break;
        }

        print_system("Processing...");
        match agent.process_message(input).await {
            Ok(response) => print_agent(&response),
            Err(e) => {
                error!("Turn failed: {}", e);
                print_error(&e.to_string());
                print_system("Please try again");
            }
        }
    }

    info!(messages = agent.history().message_count(), "Session ended");
    ExitCode::SUCCESS
}
