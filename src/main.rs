//! Mindguard CLI
//!
//! Thin command-line shell over the defense engine: analyze an
//! utterance, run the emergency protocol, or drive a short simulated
//! session. All output is pretty-printed JSON; no logic lives here.

use anyhow::Result;
use clap::{Parser, Subcommand};

use mindguard::engine::DefenseEngine;
use mindguard::types::{AgentArchetype, DefenseMode, Difficulty};

#[derive(Parser, Debug)]
#[command(
    name = "mindguard",
    version,
    about = "Manipulation threat scoring and adversary simulation"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a piece of text for manipulative-language patterns
    Analyze {
        /// The utterance to score
        text: String,
        /// Defense mode: aggressive, passive, or auto
        #[arg(long, default_value = "auto")]
        mode: String,
    },
    /// Activate the fixed emergency extraction protocol
    Emergency,
    /// Run a simulated technique-exposure session against a fresh agent
    Simulate {
        /// Agent archetype: susceptible, resistant, or adversarial
        #[arg(long, default_value = "susceptible")]
        archetype: String,
        /// Preset difficulty: easy, medium, hard, or expert
        #[arg(long, default_value = "easy")]
        difficulty: String,
        /// Technique id to apply each round
        #[arg(long, default_value = "embedded_commands")]
        technique: String,
        /// Number of technique applications
        #[arg(long, default_value_t = 5)]
        rounds: u32,
        /// Seed for reproducible phrase selection
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    let engine = DefenseEngine::new();

    match cli.command {
        Command::Analyze { text, mode } => {
            let mode = DefenseMode::from_str_lossy(&mode);
            let analysis = engine.analyze_threat(&text, mode);
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Command::Emergency => {
            let protocol = engine.activate_emergency_protocol();
            println!("{}", serde_json::to_string_pretty(&protocol)?);
        }
        Command::Simulate {
            archetype,
            difficulty,
            technique,
            rounds,
            seed,
        } => {
            let archetype = AgentArchetype::from_str_lossy(&archetype);
            let difficulty = Difficulty::from_str_lossy(&difficulty);
            let agent = match seed {
                Some(seed) => engine.create_agent_seeded(archetype, difficulty, true, seed),
                None => engine.create_agent(archetype, difficulty, true),
            };
            println!("{}", serde_json::to_string_pretty(&agent)?);

            for round in 1..=rounds {
                let response = engine.respond_to_technique(
                    &agent.id,
                    &technique,
                    "simulated exposure",
                )?;
                println!(
                    "round {}: effectiveness {:.1}, {}",
                    round, response.effectiveness, response.verbal_response
                );
            }

            let snapshot = engine.get_agent(&agent.id)?;
            println!("{}", serde_json::to_string_pretty(&snapshot.state)?);
        }
    }

    Ok(())
}
