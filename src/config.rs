use anyhow::{anyhow, Context};
use clap::Parser;
use serde::Deserialize;

use crate::solver::Strategy;

#[derive(Parser, Debug)]
#[command(
    name = "Grid Pathfinder",
    about = "BFS, Dijkstra and A* route search over terrain boards.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Path to the board file")]
    pub board_path: Option<String>,

    #[arg(long, help = "Search strategy: bfs, dijkstra or astar")]
    pub algorithm: Option<String>,

    #[arg(long, help = "Path for the rendered PNG")]
    pub output_path: Option<String>,

    #[arg(long, help = "Write the found route to this YAML file")]
    pub solution_path: Option<String>,

    #[arg(
        long,
        help = "Generate a random WIDTHxHEIGHT board instead of loading one"
    )]
    pub random_board: Option<String>,

    #[arg(long, help = "Seed for the random board generator")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub board_path: String,
    pub algorithm: String,
    pub output_path: String,
    pub solution_path: Option<String>,
    pub random_board: Option<String>,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            board_path: "boards/board-1.txt".to_string(),
            algorithm: "astar".to_string(),
            output_path: "result/solution.png".to_string(),
            solution_path: None,
            random_board: None,
            seed: 0,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Config> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Config> {
        if let Some(board_path) = &cli.board_path {
            self.board_path = board_path.clone();
        }
        if let Some(algorithm) = &cli.algorithm {
            self.algorithm = algorithm.clone();
        }
        if let Some(output_path) = &cli.output_path {
            self.output_path = output_path.clone();
        }
        if let Some(solution_path) = &cli.solution_path {
            self.solution_path = Some(solution_path.clone());
        }
        if let Some(random_board) = &cli.random_board {
            self.random_board = Some(random_board.clone());
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.strategy()?;
        if let Some(spec) = &self.random_board {
            Self::parse_dimensions(spec)?;
        }
        Ok(())
    }

    pub fn strategy(&self) -> anyhow::Result<Strategy> {
        Strategy::from_name(&self.algorithm).ok_or_else(|| {
            anyhow!(
                "unknown algorithm {:?}, expected bfs, dijkstra or astar",
                self.algorithm
            )
        })
    }

    /// Parse a "WIDTHxHEIGHT" board dimension spec.
    pub fn parse_dimensions(spec: &str) -> anyhow::Result<(usize, usize)> {
        let (width, height) = spec
            .split_once('x')
            .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got {spec:?}"))?;
        let width = width
            .parse::<usize>()
            .with_context(|| format!("bad board width in {spec:?}"))?;
        let height = height
            .parse::<usize>()
            .with_context(|| format!("bad board height in {spec:?}"))?;
        Ok((width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_yaml() {
        let config = Config::from_yaml_str(
            "board_path: boards/board-2.txt\n\
             algorithm: dijkstra\n\
             seed: 42\n",
        )
        .unwrap();

        assert_eq!(config.board_path, "boards/board-2.txt");
        assert_eq!(config.strategy().unwrap(), Strategy::Dijkstra);
        assert_eq!(config.seed, 42);
        // Unset fields keep their defaults.
        assert_eq!(config.output_path, "result/solution.png");
    }

    #[test]
    fn test_reject_unknown_algorithm() {
        let config = Config {
            algorithm: "dfs".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_unknown_yaml_field() {
        assert!(Config::from_yaml_str("algorithm: astar\nboard: oops\n").is_err());
    }

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(Config::parse_dimensions("12x8").unwrap(), (12, 8));
        assert!(Config::parse_dimensions("12").is_err());
        assert!(Config::parse_dimensions("axb").is_err());
    }
}
