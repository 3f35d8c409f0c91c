//! Console front end: plays a number of episodes between two agents.
//!
//! Agent 1 plays Black, agent 2 plays White. Human agents type `row col`.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use reversi_env::Game;
use reversi_env::ai::policy::PolicyKind;
use reversi_env::runner::Runner;

#[derive(Parser)]
#[command(name = "reversi")]
#[command(about = "Reversi between humans and simple AI agents")]
struct Cli {
    /// Agent playing Black: human, random, greedy, weighted or liberty
    #[arg(long, default_value_t = PolicyKind::Weighted)]
    agent1: PolicyKind,

    /// Agent playing White: human, random, greedy, weighted or liberty
    #[arg(long, default_value_t = PolicyKind::Weighted)]
    agent2: PolicyKind,

    /// Number of episodes to play back to back
    #[arg(long, default_value = "100")]
    num_episodes: u32,

    /// Seed for the agents' tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final board of every episode
    #[arg(long)]
    show_board: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let black = cli.agent1.build(cli.seed);
    let white = cli.agent2.build(cli.seed.map(|s| s.wrapping_add(1)));
    let mut runner = Runner::new(Game::standard(), black, white);

    tracing::info!(
        "Starting {} episodes: {} (black) vs {} (white)",
        cli.num_episodes,
        cli.agent1,
        cli.agent2
    );

    let summary = if cli.show_board {
        play_verbose(&mut runner, cli.num_episodes)?
    } else {
        runner
            .run(cli.num_episodes)
            .context("match aborted")?
            .to_string()
    };

    println!("{summary}");
    Ok(())
}

/// Like `Runner::run`, printing each final position.
fn play_verbose(runner: &mut Runner, episodes: u32) -> Result<String> {
    let start_tallies = runner.game().tallies();
    for episode in 1..=episodes {
        let report = runner
            .run_episode()
            .with_context(|| format!("episode {episode} aborted"))?;
        let winner = report
            .winner
            .map_or_else(|| "draw".to_string(), |p| format!("{p} wins"));
        println!(
            "episode {episode}: {winner} ({} - {}, {} moves)\n{}",
            report.black_count, report.white_count, report.moves, report.final_board
        );
    }

    let tallies = runner.game().tallies();
    Ok(format!(
        "black wins: {}, white wins: {}, draws: {}",
        tallies.black_wins - start_tallies.black_wins,
        tallies.white_wins - start_tallies.white_wins,
        tallies.draws - start_tallies.draws
    ))
}
