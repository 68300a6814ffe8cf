use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use hinger::ai::{Agent, RandomAgent, SearchAgent, Strategy};
use hinger::config::AppConfig;
use hinger::game::{active_count, hinger_cells, region_count, GridState, Player};
use hinger::play::{play_match, MatchMetrics};
use hinger::search::{search, SearchOutcome};

/// Plan and play Hinger from the command line.
#[derive(Parser)]
#[command(name = "hinger", about = "Hinger counter-grid game")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "hinger.toml")]
    config: PathBuf,

    /// Override the RNG seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a board with its region, active-cell and hinger counts
    Show {
        /// Board as "1,0,2;0,3,0"; random when omitted
        #[arg(long)]
        grid: Option<String>,
    },
    /// Find a move sequence from one board to another
    Path {
        #[arg(long)]
        start: String,
        /// Goal board; the empty board of the same size when omitted
        #[arg(long)]
        goal: Option<String>,
        /// bfs, dfs, iddfs, ucs, astar or astar-goal
        #[arg(long)]
        algorithm: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Select one move for the given board
    Move {
        #[arg(long)]
        grid: Option<String>,
        /// minimax, alpha_beta, monte_carlo or hybrid
        #[arg(long)]
        strategy: Option<String>,
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Play agents against each other
    Play {
        #[arg(long)]
        grid: Option<String>,
        /// Strategy for the first player, or "random"
        #[arg(long, default_value = "alpha_beta")]
        first: String,
        /// Strategy for the second player, or "random"
        #[arg(long, default_value = "random")]
        second: String,
        #[arg(long, default_value_t = 1)]
        games: usize,
    },
    /// Print the default configuration as TOML
    Config,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match cli.command {
        Command::Show { grid } => {
            let state = board(&config, grid.as_deref())?;
            println!("{state}\n");
            println!("Regions: {}", region_count(&state));
            println!("Active cells: {}", active_count(&state));
            let hingers = hinger_cells(&state);
            println!("Hingers: {}", hingers.len());
            for pos in hingers {
                println!("  {pos}");
            }
        }
        Command::Path {
            start,
            goal,
            algorithm,
            json,
        } => {
            let start = start.parse::<GridState>().context("parsing --start")?;
            let goal = match goal {
                Some(goal) => goal.parse::<GridState>().context("parsing --goal")?,
                None => GridState::zeros(start.rows(), start.cols())?,
            };
            let algorithm = match algorithm {
                Some(name) => config.search.resolve(&name)?,
                None => config.search.algorithm()?,
            };
            let report = search(&start, &goal, algorithm)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                match &report.outcome {
                    SearchOutcome::Found(path) => {
                        println!(
                            "{algorithm}: path found in {} moves ({} states expanded)",
                            path.len() - 1,
                            report.nodes_expanded
                        );
                        for (step, state) in path.iter().enumerate() {
                            println!("\nStep {step}:\n{state}");
                        }
                    }
                    SearchOutcome::NotFound => {
                        println!("{algorithm}: no path ({} states expanded)", report.nodes_expanded);
                    }
                }
            }
        }
        Command::Move {
            grid,
            strategy,
            depth,
        } => {
            let state = board(&config, grid.as_deref())?;
            let strategy = strategy.unwrap_or_else(|| config.agent.strategy.clone());
            let depth = depth.unwrap_or(config.agent.depth);
            let mut agent = SearchAgent::from_config(&config.agent, config.rng())?;
            let next = agent.select_move_with(&state, &strategy, depth)?;

            println!("{state}\n");
            match state.move_to(&next) {
                Some(pos) => {
                    let wins = region_count(&next) > region_count(&state);
                    println!("{strategy} takes from {pos}{}", if wins { " and wins" } else { "" });
                    println!("\n{next}");
                }
                None => println!("{strategy} passes"),
            }
        }
        Command::Play {
            grid,
            first,
            second,
            games,
        } => {
            if games == 0 {
                bail!("--games must be at least 1");
            }
            let mut rng = config.rng();
            let mut agent_a = make_agent(&config, &first, rng.random())?;
            let mut agent_b = make_agent(&config, &second, rng.random())?;
            let mut metrics = MatchMetrics::new();

            for game in 1..=games {
                let start = match grid.as_deref() {
                    Some(text) => text.parse::<GridState>().context("parsing --grid")?,
                    None => config.grid.random_state(&mut rng)?,
                };
                let result = play_match(&start, agent_a.as_mut(), agent_b.as_mut())?;
                let outcome = match result.winner {
                    Some(player) => format!("{} wins", player.name()),
                    None => "draw".to_string(),
                };
                println!("Game {game}: {outcome} after {} turns", result.turns());
                metrics.record(&result);
            }

            println!(
                "\n{} vs {}: {} / {} wins, {} draws, {:.1} turns per game",
                agent_a.name(),
                agent_b.name(),
                metrics.wins(Player::A),
                metrics.wins(Player::B),
                metrics.draws(),
                metrics.average_length()
            );
        }
        Command::Config => print!("{}", AppConfig::default_toml()),
    }

    Ok(())
}

/// Parse `text`, or draw a random board from the config.
fn board(config: &AppConfig, text: Option<&str>) -> Result<GridState> {
    match text {
        Some(text) => Ok(text.parse::<GridState>().context("parsing --grid")?),
        None => Ok(config.grid.random_state(&mut config.rng())?),
    }
}

fn make_agent(config: &AppConfig, name: &str, seed: u64) -> Result<Box<dyn Agent>> {
    if name.eq_ignore_ascii_case("random") {
        return Ok(Box::new(RandomAgent::seeded(seed)));
    }
    let strategy = name.parse::<Strategy>()?;
    let agent = SearchAgent::new(strategy, config.agent.clone(), StdRng::seed_from_u64(seed));
    Ok(Box::new(agent))
}
