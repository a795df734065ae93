use gridpath_rust::board::Board;
use gridpath_rust::config::{Cli, Config};
use gridpath_rust::render;
use gridpath_rust::solver::SearchEngine;
use gridpath_rust::stat::Stats;

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let strategy = config.strategy()?;
    let board = if let Some(spec) = &config.random_board {
        let (width, height) = Config::parse_dimensions(spec)?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        Board::random(width, height, 0.2, &mut rng)?
    } else {
        Board::from_file(&config.board_path)?
    };
    info!(
        "board {}x{}, start {:?}, goal {:?}",
        board.width, board.height, board.start, board.goal
    );

    let engine = SearchEngine::new(&board, strategy);
    let mut stats = Stats::default();
    let solve_start = Instant::now();
    let report = engine
        .run(board.start, board.goal, &mut stats)
        .context("search failed")?;
    stats.time_us = solve_start.elapsed().as_micros() as usize;

    match report.route() {
        Some(route) => {
            stats.cost = route.cost;
            stats.print(strategy);
            info!("route: {:?}", route.steps);
            if let Some(solution_path) = &config.solution_path {
                route
                    .write_yaml(solution_path)
                    .with_context(|| format!("writing solution {solution_path}"))?;
            }
        }
        None => error!("{} found no route", strategy.name()),
    }

    let img = render::draw(&board, &report);
    render::save_png(&img, &config.output_path)?;
    info!("rendered {}", config.output_path);

    Ok(())
}
