use devscout::config::Config;
use devscout::credentials::{TokenLookup, open_store};
use devscout::evaluation::EvaluationSession;
use devscout::model::Developer;
use devscout::session::Session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "devscout", version, about = "Find developers and run interview evaluations")]
struct Cli {
    /// Override the backend origin from the config file
    #[arg(long, env = "DEVSCOUT_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session token
    Login { username: String, password: String },
    /// Create an account and store the session token
    Register { username: String, password: String },
    /// Forget the stored session token
    Logout,
    /// Show whether a session token is stored
    Status,
    /// Search developers by comma-separated skills (all when omitted)
    Developers {
        #[arg(long, default_value = "")]
        skills: String,
    },
    /// Show one developer and their interview history
    Developer { id: String },
    /// Generate interview questions for the given technologies
    Questions {
        #[arg(required = true)]
        technologies: Vec<String>,
    },
    /// Generate questions, read answers from stdin and submit the evaluation
    Evaluate {
        developer_id: String,
        #[arg(required = true)]
        technologies: Vec<String>,
    },
    /// List every recorded interview
    Interviews,
    /// Print the configuration file location
    ConfigPath,
}

fn print_developer(d: &Developer) {
    println!(
        "[{}] {} - {} ({} yrs, {})",
        d.id,
        d.name,
        d.tech_stack.join(", "),
        d.years_of_experience,
        d.location
    );
}

fn read_answer(prompt: &str) -> Result<String> {
    print!("{}\n> ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Command::ConfigPath = cli.command {
        println!("{}", Config::get_path_string()?);
        return Ok(());
    }

    let mut config = Config::load_or_default();
    if cli.base_url.is_some() {
        config.base_url = cli.base_url;
    }
    let settings = config.resolve();
    let store = open_store(settings.platform.token_backend())?;
    let session = Session::new(&settings, store)?;

    match cli.command {
        Command::Login { username, password } => {
            session.login(&username, &password).await?;
            println!("Logged in.");
        }
        Command::Register { username, password } => {
            session.register(&username, &password).await?;
            println!("Account created, logged in.");
        }
        Command::Logout => {
            session.logout()?;
            println!("Logged out.");
        }
        Command::Status => match session.status() {
            TokenLookup::Present(_) => println!("Logged in ({}).", settings.base_url),
            TokenLookup::Absent => println!("Not logged in."),
            TokenLookup::ReadError(e) => println!("Token storage unreadable: {}", e),
        },
        Command::Developers { skills } => {
            let developers = session.client().find_developers(&skills).await?;
            if developers.is_empty() {
                println!("No developers found.");
            }
            developers.iter().for_each(print_developer);
        }
        Command::Developer { id } => {
            let detail = session.client().get_developer(&id).await?;
            print_developer(&detail.developer);
            if detail.interviews.is_empty() {
                println!("No interview history available.");
            }
            for interview in &detail.interviews {
                println!("  #{} {}: {}", interview.id, interview.client_name, interview.feedback);
            }
        }
        Command::Questions { technologies } => {
            for q in session.client().generate_questions(&technologies).await? {
                println!("{}. {}", q.id, q.question);
            }
        }
        Command::Evaluate {
            developer_id,
            technologies,
        } => {
            let questions = session.client().generate_questions(&technologies).await?;
            let mut evaluation = EvaluationSession::new(developer_id, questions.clone());
            for q in &questions {
                let answer = read_answer(&format!("{}. {}", q.id, q.question))?;
                evaluation.set_answer(&q.id, answer);
            }
            let feedback = session.submit_evaluation(&evaluation).await?;
            println!("\nFeedback:\n{}", feedback);
        }
        Command::Interviews => {
            let interviews = session.client().fetch_all_interviews().await?;
            if interviews.is_empty() {
                println!("No interviews recorded.");
            }
            for entry in interviews {
                println!(
                    "{} (dev {}) - {}: {}",
                    entry.developer_name,
                    entry.developer_id,
                    entry.interview.client_name,
                    entry.interview.feedback
                );
            }
        }
        Command::ConfigPath => {}
    }
    Ok(())
}
