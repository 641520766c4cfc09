use docopt::Docopt;
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde_derive::Deserialize;
use mazechase::{
    agents::{Player, Pursuer},
    cells::GridCoordinate,
    config::ChaseConfig,
    grid::Maze,
    grid_displays::{GridDisplay, PathDisplay, StartEndPointsDisplay},
    movement::HeldKeys,
    path_tracker::PathUpdate,
};
use std::{
    io,
    io::prelude::*,
    fs::File,
    rc::Rc
};

const USAGE: &str = "Maze chase

Usage:
    mazechase_driver -h | --help
    mazechase_driver [--config=<path>] [--rows=<n>] [--cols=<n>] [--loop-percent=<n>] [--seed=<n>] [--ticks=<n>] [--show-path] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --config=<path>        JSON file of chase settings. Flags override its values.
    --rows=<n>             Number of maze rows.
    --cols=<n>             Number of maze columns.
    --loop-percent=<n>     Percent chance per carving step of allowing a loop, 0 gives a perfect maze.
    --seed=<n>             Seed for a reproducible maze and player wandering.
    --ticks=<n>            Number of 60Hz ticks to simulate [default: 600].
    --show-path            Mark the pursuer's remaining path on the text rendering.
    --text-out=<path>      Output file path for a textual rendering of the maze, stdout if not given.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";

const TICK_SECONDS: f32 = 1.0 / 60.0;

/// Ticks the wandering player holds the same keys for.
const WANDER_TICKS: usize = 30;

#[derive(Debug, Deserialize)]
struct ChaseArgs {
    flag_config: String,
    flag_rows: Option<usize>,
    flag_cols: Option<usize>,
    flag_loop_percent: Option<u8>,
    flag_seed: Option<u64>,
    flag_ticks: usize,
    flag_show_path: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Chase(::mazechase::errors::Error, ::mazechase::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: ChaseArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let config = chase_config(&args)?;
    debug!("{:?}", config);

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    info!("seed {}", seed);

    let layout = config.layout()?;
    let mut maze = Maze::generate(layout, GridCoordinate::new(0, 0), config.loop_percent, &mut rng)?;
    info!("generated {}x{} maze with {} passages",
          config.cols,
          config.rows,
          maze.links_count());

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    let (player, pursuer) = run_chase(&maze, &config, args.flag_ticks, &mut rng)?;

    let display = chase_display(&maze, &player, &pursuer, args.flag_show_path);
    maze.set_grid_display(Some(display));

    if args.flag_text_out.is_empty() {
        println!("{}", maze);
    } else {
        write_text_to_file(&format!("{}", maze), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn chase_config(args: &ChaseArgs) -> Result<ChaseConfig> {

    let mut config = if args.flag_config.is_empty() {
        ChaseConfig::default()
    } else {
        ChaseConfig::from_json_file(&args.flag_config)?
    };

    if let Some(rows) = args.flag_rows {
        config.rows = rows;
    }
    if let Some(cols) = args.flag_cols {
        config.cols = cols;
    }
    if let Some(loop_percent) = args.flag_loop_percent {
        config.loop_percent = loop_percent;
    }
    if args.flag_seed.is_some() {
        config.seed = args.flag_seed;
    }
    Ok(config)
}

/// Player in the top left cell, pursuer in a random cell away from the top row and left
/// column when the grid has room for it.
fn place_agents<R: Rng>(maze: &Maze, config: &ChaseConfig, rng: &mut R) -> Result<(Player, Pursuer)> {

    let player_cell = GridCoordinate::new(0, 0);
    let pursuer_cell = if config.rows > 1 && config.cols > 1 {
        GridCoordinate::new(rng.gen_range(1..config.cols as u32), rng.gen_range(1..config.rows as u32))
    } else {
        maze.random_cell(rng)
    };

    let centre_of = |coord: GridCoordinate| {
        maze.cell(coord)
            .map(|cell| cell.rect().centre())
            .ok_or_else(|| Error::from(format!("No cell at {:?} to place an agent in", coord)))
    };

    let player = Player::new(centre_of(player_cell)?, config.agent_size, config.player_speed);
    let pursuer = Pursuer::new(centre_of(pursuer_cell)?,
                               config.agent_size,
                               config.pursuer_speed,
                               config.path_edit_limit);
    Ok((player, pursuer))
}

/// Step the chase at a fixed 60Hz until the pursuer catches the player or the ticks run out.
/// The player wanders, holding random keys for a short while at a time.
fn run_chase<R: Rng>(maze: &Maze,
                     config: &ChaseConfig,
                     ticks: usize,
                     rng: &mut R)
                     -> Result<(Player, Pursuer)> {

    let (mut player, mut pursuer) = place_agents(maze, config, rng)?;
    info!("player at {:?}, pursuer at {:?}", player.cell(maze), pursuer.cell(maze));

    let mut keys = HeldKeys::default();
    let mut searches = 0;

    for tick in 0..ticks {

        if tick % WANDER_TICKS == 0 {
            keys = HeldKeys {
                left: rng.gen(),
                right: rng.gen(),
                up: rng.gen(),
                down: rng.gen(),
            };
        }

        let _ = player.update(maze, keys, TICK_SECONDS);
        if pursuer.update(maze, player.rect(), TICK_SECONDS) == PathUpdate::Recomputed {
            searches += 1;
        }

        if pursuer.has_caught(player.rect()) {
            info!("caught after {} ticks ({:.1}s), {} path searches",
                  tick + 1,
                  (tick + 1) as f32 * TICK_SECONDS,
                  searches);
            return Ok((player, pursuer));
        }
    }

    warn!("player still free after {} ticks, {} path searches", ticks, searches);
    Ok((player, pursuer))
}

fn chase_display(maze: &Maze, player: &Player, pursuer: &Pursuer, show_path: bool) -> Rc<dyn GridDisplay> {

    let pursuer_cell = pursuer.cell(maze);
    if show_path {
        let path = pursuer_cell
            .into_iter()
            .chain(pursuer.tracker().waypoints().iter().cloned())
            .collect::<Vec<_>>();
        if path.len() > 1 {
            return Rc::new(PathDisplay::new(&path));
        }
    }

    // S is the pursuer, E the player.
    Rc::new(StartEndPointsDisplay::new(pursuer_cell.into_iter().collect(),
                                       player.cell(maze).into_iter().collect()))
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let graph = maze.link_graph();
    let mut graph_data = format!("{} {}\n", graph.node_count(), graph.edge_count());

    for edge in graph.raw_edges() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;
        graph_data.push_str(&format!("{} {}\n", src_as_1_based_index, dst_as_1_based_index));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    info!("saved {} edges to {}", graph.edge_count(), file_path);
    Ok(())
}
