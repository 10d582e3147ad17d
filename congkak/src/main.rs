//! Congkak driver: terminal play, computer matches and engine diagnostics.

mod display;
mod interactive;
mod logger;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use congkak_agents::{
    search_with_callback, search_with_limits, Agent, Difficulty, SearchLimits, SearchProgress, DEFAULT_DEPTH,
};
use congkak_core::{
    perft, perft_detailed, perft_divide, positions, Engine, GameMode, GameResult, MatchConfig, Player,
    RulesConfig,
};
use display::print_board;
use interactive::InteractiveGame;
use log::info;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "congkak")]
#[command(about = "Congkak rule engine and computer opponents", long_about = None)]
struct Cli {
    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal
    Play {
        /// Opponent strength: easy, medium or hard
        #[arg(long, short = 'd', default_value = "medium")]
        difficulty: Difficulty,

        /// Match mode; casual disables power cards
        #[arg(long, default_value = "ai")]
        mode: GameMode,

        /// Let the computer move first
        #[arg(long)]
        second: bool,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play computer opponents against each other
    Match {
        /// Player 1 strength
        #[arg(long, default_value = "hard")]
        p1: Difficulty,

        /// Player 2 strength
        #[arg(long, default_value = "medium")]
        p2: Difficulty,

        /// Number of games
        #[arg(long, short = 'g', default_value_t = 10)]
        games: u32,

        /// Base seed; game N uses seed + N
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value = "ai")]
        mode: GameMode,

        /// Pits per side
        #[arg(long, default_value_t = 7)]
        pits: usize,

        /// Seeds per pit at the start
        #[arg(long, default_value_t = 7)]
        seeds: u32,

        /// Print each final position as a JSON snapshot
        #[arg(long)]
        json: bool,
    },

    /// Count positions reachable in exactly DEPTH moves
    Perft {
        depth: u8,

        /// Position notation (defaults to the opening)
        position: Option<String>,

        /// Classify leaf moves
        #[arg(long)]
        detailed: bool,
    },

    /// Search a position for the best move
    Search {
        /// Position notation (defaults to the opening)
        position: Option<String>,

        #[arg(long, short = 'd', default_value_t = DEFAULT_DEPTH)]
        depth: u8,

        /// Stop after this many nodes
        #[arg(long)]
        nodes: Option<u64>,
    },

    /// Parse and display a position
    Show {
        position: String,

        /// Print the snapshot as JSON instead of a board
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose).context("installing logger")?;

    match cli.command {
        Commands::Play {
            difficulty,
            mode,
            second,
            seed,
        } => run_play(difficulty, mode, second, seed),
        Commands::Match {
            p1,
            p2,
            games,
            seed,
            mode,
            pits,
            seeds,
            json,
        } => {
            let rules = RulesConfig::default().with_pits(pits).with_seeds_per_pit(seeds);
            run_match(p1, p2, games, seed, mode, rules, json)
        }
        Commands::Perft {
            depth,
            position,
            detailed,
        } => run_perft(depth, position.as_deref(), detailed),
        Commands::Search {
            position,
            depth,
            nodes,
        } => run_search(position.as_deref(), depth, nodes),
        Commands::Show { position, json } => run_show(&position, json),
    }
}

fn load_position(position: Option<&str>) -> Result<Engine> {
    let notation = position.unwrap_or(positions::STARTING);
    Engine::from_notation(MatchConfig::default(), notation)
        .with_context(|| format!("invalid position {notation:?}"))
}

fn run_play(difficulty: Difficulty, mode: GameMode, second: bool, seed: Option<u64>) -> Result<()> {
    let opponent = match seed {
        Some(seed) => difficulty.seeded_agent(seed),
        None => difficulty.agent(),
    };
    let human = if second { Player::Two } else { Player::One };
    let players = match human {
        Player::One => ("player", "ai"),
        Player::Two => ("ai", "player"),
    };

    let engine = Engine::new(MatchConfig::new(players.0, players.1).with_mode(mode))?;
    let mut game = InteractiveGame::new(engine, opponent, human);
    game.run()?;

    Ok(())
}

/// Plays `engine` to the end, each seat driven by its agent.
fn play_game(engine: &mut Engine, agents: &mut [Box<dyn Agent>; 2]) -> Result<()> {
    while !engine.is_game_over() {
        let player = engine.current_player();
        let agent = &mut agents[player.index()];

        if let Some(kind) = agent.choose_power_card(engine) {
            engine.use_power_card(kind)?;
        }
        let Some(pit) = agent.best_move(engine) else {
            bail!("{} ({player}) found no move in a live game", agent.name());
        };
        engine.make_move(pit)?;
    }

    Ok(())
}

fn run_match(
    p1: Difficulty,
    p2: Difficulty,
    games: u32,
    seed: u64,
    mode: GameMode,
    rules: RulesConfig,
    json: bool,
) -> Result<()> {
    let config = MatchConfig::new(format!("p1-{p1}"), format!("p2-{p2}"))
        .with_mode(mode)
        .with_rules(rules);
    config.validate()?;

    println!("{p1} vs {p2}, {games} games ({mode}, {} pits x {})", rules.pits, rules.seeds_per_pit);

    let mut tally = [0u32; 3];
    let mut total_scores = [0u64; 2];
    let start = Instant::now();

    for game in 0..games {
        let game_seed = seed.wrapping_add(u64::from(game));
        let mut agents = [
            p1.seeded_agent(game_seed),
            p2.seeded_agent(game_seed.wrapping_add(1)),
        ];
        let mut engine = Engine::new(config.clone())?;
        play_game(&mut engine, &mut agents)?;

        let result = engine.result();
        match result {
            GameResult::Winner(Player::One) => tally[0] += 1,
            GameResult::Winner(Player::Two) => tally[1] += 1,
            GameResult::Draw | GameResult::InProgress => tally[2] += 1,
        }
        for player in Player::ALL {
            total_scores[player.index()] += u64::from(engine.score(player));
        }

        info!(
            "game {game}: {:?} in {} moves, {} - {}",
            result,
            engine.turn_count(),
            engine.score(Player::One),
            engine.score(Player::Two)
        );
        if json {
            println!("{}", serde_json::to_string(&engine.snapshot())?);
        }
    }

    let games_f = f64::from(games.max(1));
    println!("Player 1 ({p1}) wins: {}", tally[0]);
    println!("Player 2 ({p2}) wins: {}", tally[1]);
    println!("Draws: {}", tally[2]);
    println!(
        "Average score: {:.1} - {:.1}",
        total_scores[0] as f64 / games_f,
        total_scores[1] as f64 / games_f
    );
    println!("Time: {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}

fn run_perft(depth: u8, position: Option<&str>, detailed: bool) -> Result<()> {
    let engine = load_position(position)?;

    println!("Running perft({depth})...");
    println!("Position: {}", engine.to_notation());

    if detailed {
        let results = perft_detailed(&engine, depth);
        println!("Nodes: {}", results.nodes);
        println!("Captures: {}", results.captures);
        println!("Extra turns: {}", results.extra_turns);
        println!("Relays: {}", results.relays);
        println!("Aborted sows: {}", results.aborted);
        println!("Game overs: {}", results.game_overs);
    } else if depth <= 3 {
        // Show move breakdown for shallow depths
        let results = perft_divide(&engine, depth);
        let mut total = 0;

        for (pit, count) in &results {
            println!("pit {pit}: {count}");
            total += count;
        }

        println!("\nTotal: {total}");
    } else {
        let start = Instant::now();
        let nodes = perft(&engine, depth);
        let elapsed = start.elapsed();

        println!("Nodes: {nodes}");
        println!("Time: {:.2}s", elapsed.as_secs_f64());
        println!("NPS: {:.0}", nodes as f64 / elapsed.as_secs_f64());
    }

    Ok(())
}

fn run_search(position: Option<&str>, depth: u8, nodes: Option<u64>) -> Result<()> {
    let engine = load_position(position)?;
    print_board(&engine);

    let mut limits = SearchLimits::depth(depth);
    if let Some(nodes) = nodes {
        limits = limits.with_nodes(nodes);
    }

    println!("\nSearching to depth {depth}...");
    let start = Instant::now();
    let result = if nodes.is_some() {
        search_with_limits(&engine, limits)
    } else {
        search_with_callback(
            &engine,
            limits,
            Box::new(|progress: &SearchProgress| {
                println!(
                    "depth {} score {} nodes {} pv {:?}",
                    progress.depth, progress.score, progress.nodes, progress.pv
                );
            }),
        )
    };
    let elapsed = start.elapsed();

    match result.best_move {
        Some(pit) => {
            println!("\nBest move: pit {pit}");
            println!("Score: {}", result.score);
            println!("Depth: {}", result.depth);
            println!("Nodes: {}", result.nodes);
            println!("PV: {:?}", result.pv);
            println!("Time: {:.2}s", elapsed.as_secs_f64());
            if result.stopped {
                println!("(search stopped by node limit)");
            }
        }
        None => println!("No legal moves available"),
    }

    Ok(())
}

fn run_show(position: &str, json: bool) -> Result<()> {
    let engine = load_position(Some(position))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    } else {
        print_board(&engine);
        println!("Valid moves: {:?}", engine.valid_moves());
        println!("Notation: {}", engine.to_notation());
    }

    Ok(())
}
