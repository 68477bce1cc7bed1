use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gridsolve::tapatan::maximizing_for;
use gridsolve::{
    Adjacency, Board, EvalWeights, Evaluator, GameState, Minimax, Move, Player, SearchLimits,
    SearchResult,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeOpt {
    /// Player vs computer
    Pvc,
    /// Player vs player
    Pvp,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MarkOpt {
    X,
    O,
}

impl From<MarkOpt> for Player {
    fn from(m: MarkOpt) -> Self {
        match m {
            MarkOpt::X => Player::X,
            MarkOpt::O => Player::O,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EvalOpt {
    /// Win/draw/loss only; cutoffs score 0
    Utility,
    /// Weighted position estimate at cutoffs
    Heuristic,
}

#[derive(Debug, Parser)]
#[command(name = "tapatan", about = "Tapatan with an alpha-beta minimax opponent")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Args)]
struct EngineOpts {
    /// Search depth in plies
    #[arg(long, default_value_t = SearchLimits::default().max_depth)]
    depth: u8,

    /// Which board lines pieces may slide along: orthogonal or diagonal
    #[arg(long, default_value_t = Adjacency::Orthogonal, value_parser = str::parse::<Adjacency>)]
    adjacency: Adjacency,

    /// Leaf evaluation at the depth cutoff
    #[arg(long, value_enum, default_value_t = EvalOpt::Heuristic)]
    eval: EvalOpt,

    /// JSON file overriding heuristic weights (missing fields keep defaults)
    #[arg(long)]
    weights: Option<PathBuf>,
}

impl EngineOpts {
    fn evaluator(&self) -> gridsolve::Result<Evaluator> {
        Ok(match self.eval {
            EvalOpt::Utility => Evaluator::Utility,
            EvalOpt::Heuristic => {
                let w = match &self.weights {
                    Some(path) => EvalWeights::from_json_file(path)?,
                    None => EvalWeights::default(),
                };
                Evaluator::Heuristic(w)
            }
        })
    }

    fn engine(&self) -> gridsolve::Result<Minimax> {
        Ok(Minimax::new(
            SearchLimits {
                max_depth: self.depth,
            },
            self.evaluator()?,
        ))
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Game mode; asked interactively when omitted
        #[arg(long, value_enum)]
        mode: Option<ModeOpt>,

        /// Your mark against the computer; asked interactively when omitted
        #[arg(long, value_enum)]
        human: Option<MarkOpt>,

        /// Do not clear the screen between turns
        #[arg(long)]
        no_clear: bool,

        #[command(flatten)]
        engine: EngineOpts,
    },
    /// Print the rules
    Rules,
    /// Evaluate one position and print the move the engine would play
    BestMove {
        /// Board as nine cells of X, O or . (row separators / allowed), e.g. XOX/.../OXO
        #[arg(long, default_value = "XOX/.../OXO")]
        position: String,

        /// Side to move
        #[arg(long, value_enum, default_value_t = MarkOpt::X)]
        to_move: MarkOpt,

        /// Print a single JSON object
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        engine: EngineOpts,
    },
}

const RULES: &str = "\
1. Each player starts with 3 pieces already on the board.
2. Players alternate moving one of their pieces to an adjacent empty point.
3. Pieces move only along the lines of the board.
4. The goal is three pieces in a row: horizontal, vertical or diagonal.
5. The first player to line up all three pieces wins.
6. A player with no legal move on their turn ends the game in a draw.

Opening layout:
  X O X
  . . .
  O X O";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Print `msg` and read one trimmed line. `None` means stdin is closed.
fn prompt<R: BufRead>(input: &mut R, msg: &str) -> io::Result<Option<String>> {
    print!("{msg}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Pick an option by number from a menu, re-asking on bad input.
fn choose<R: BufRead>(input: &mut R, msg: &str, options: usize) -> io::Result<Option<usize>> {
    loop {
        let Some(line) = prompt(input, msg)? else { return Ok(None) };
        match line.parse::<usize>() {
            Ok(n) if (1..=options).contains(&n) => return Ok(Some(n - 1)),
            Ok(_) => println!("Invalid option! Choose 1-{options}."),
            Err(_) => println!("Invalid input! Please enter a number."),
        }
    }
}

fn rc(idx: u8) -> String {
    format!("({}, {})", idx / 3, idx % 3)
}

struct Session {
    state: GameState,
    computer: Option<Player>,
    engine: Minimax,
    clear: bool,
    turns: u32,
}

impl Session {
    fn header(&self) {
        if self.clear {
            print!("\x1B[2J\x1B[H");
        }
        println!("\n  TAPATAN\n");
        match self.computer {
            Some(c) if c == self.state.next => println!("Computer's turn (player {c})"),
            Some(_) => println!("Your turn (player {})", self.state.next),
            None => println!("Current player: {}", self.state.next),
        }
        println!();
        print!("{}", self.state.board.render());
    }

    fn computer_move(&mut self, me: Player) -> Option<Move> {
        println!("\nThe computer is thinking...");
        let res = self.engine.search(&self.state, maximizing_for(me));
        res.best_move
    }

    /// One human turn. `Ok(false)` means stdin closed.
    fn human_turn<R: BufRead>(&mut self, input: &mut R) -> io::Result<bool> {
        let player = self.state.next;
        let pieces: Vec<u8> = self.state.board.pieces_of(player).collect();
        println!("\nPieces of player {player}:");
        for (i, &p) in pieces.iter().enumerate() {
            println!("{}. Position {}", i + 1, rc(p));
        }

        let Some(line) = prompt(input, &format!("\nChoose a piece to move (1-{}): ", pieces.len()))? else {
            return Ok(false);
        };
        let origin = match line.parse::<usize>() {
            Ok(n) if (1..=pieces.len()).contains(&n) => pieces[n - 1],
            Ok(_) => {
                println!("Invalid choice! Try again.");
                return Ok(true);
            }
            Err(_) => {
                println!("Invalid input! Please enter a number.");
                return Ok(true);
            }
        };

        let targets = self.state.moves_from(origin);
        if targets.is_empty() {
            println!("That piece has no valid moves. Choose another.");
            return Ok(true);
        }
        println!("\nPossible moves for the piece at {}:", rc(origin));
        for (i, &t) in targets.iter().enumerate() {
            println!("{}. Move to {}", i + 1, rc(t));
        }

        let Some(line) = prompt(input, &format!("\nChoose a move (1-{}): ", targets.len()))? else {
            return Ok(false);
        };
        let dest = match line.parse::<usize>() {
            Ok(n) if (1..=targets.len()).contains(&n) => targets[n - 1],
            Ok(_) => {
                println!("Invalid move! Try again.");
                return Ok(true);
            }
            Err(_) => {
                println!("Invalid input! Please enter a number.");
                return Ok(true);
            }
        };

        match self.state.try_apply(Move::new(origin, dest)) {
            Ok(next) => {
                self.state = next;
                self.turns += 1;
            }
            Err(e) => println!("{e}"),
        }
        Ok(true)
    }

    fn run<R: BufRead>(&mut self, input: &mut R) -> io::Result<()> {
        loop {
            self.header();

            if let Some(w) = self.state.winner() {
                match self.computer {
                    Some(c) if c == w => println!("\nThe computer won!"),
                    Some(_) => println!("\nCongratulations! You won!"),
                    None => println!("\nPlayer {w} won!"),
                }
                break;
            }
            if self.state.legal_moves().is_empty() {
                println!("\nPlayer {} cannot move. The game ends in a draw!", self.state.next);
                break;
            }

            if let Some(me) = self.computer.filter(|c| *c == self.state.next) {
                match self.computer_move(me) {
                    Some(mv) => {
                        println!("The computer moved {mv}");
                        self.state = self.state.apply(mv);
                        self.turns += 1;
                    }
                    None => {
                        eprintln!("[tapatan] Error: search returned no move for a non-terminal position");
                        break;
                    }
                }
                continue;
            }

            if !self.human_turn(input)? {
                println!("\nInput closed, leaving the game.");
                return Ok(());
            }
        }
        println!("Game over after {} turns.", self.turns);
        Ok(())
    }
}

fn play(
    mode: Option<ModeOpt>,
    human: Option<MarkOpt>,
    no_clear: bool,
    engine: &EngineOpts,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mode = match mode {
        Some(m) => m,
        None => {
            println!("\n== GAME MODE ==\n\n1. Player vs Computer\n2. Player vs Player");
            match choose(&mut input, "\nChoose the game mode: ", 2)? {
                Some(0) => ModeOpt::Pvc,
                Some(_) => ModeOpt::Pvp,
                None => return Ok(()),
            }
        }
    };

    let computer = match mode {
        ModeOpt::Pvp => None,
        ModeOpt::Pvc => {
            let human: Player = match human {
                Some(h) => h.into(),
                None => {
                    println!("\n== CHOOSE YOUR MARK ==\n\n1. Play as X (moves first)\n2. Play as O (moves second)");
                    match choose(&mut input, "\nChoose your mark: ", 2)? {
                        Some(0) => Player::X,
                        Some(_) => Player::O,
                        None => return Ok(()),
                    }
                }
            };
            Some(human.other())
        }
    };

    let mut session = Session {
        state: GameState::initial(engine.adjacency),
        computer,
        engine: engine.engine()?,
        clear: !no_clear,
        turns: 0,
    };
    session.run(&mut input)?;
    Ok(())
}

#[derive(Serialize)]
struct BestMoveReport {
    position: String,
    to_move: Player,
    adjacency: Adjacency,
    #[serde(flatten)]
    result: SearchResult,
}

fn best_move(
    position: &str,
    to_move: MarkOpt,
    json: bool,
    engine: &EngineOpts,
) -> Result<(), Box<dyn std::error::Error>> {
    let board: Board = position.parse()?;
    let player: Player = to_move.into();
    let state = GameState::from_board(board, player, engine.adjacency)?;
    let mut search = engine.engine()?;
    let res = search.search(&state, maximizing_for(player));

    if json {
        let report = BestMoveReport {
            position: state.board.to_string(),
            to_move: player,
            adjacency: state.adjacency,
            result: res,
        };
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    print!("{}", state.board.render());
    match res.best_move {
        Some(mv) => println!(
            "Best move for {player}: {mv}  value={:.4} nodes={} depth={}",
            res.value, res.nodes, res.depth
        ),
        None => println!(
            "No move for {player} (terminal position or depth 0)  value={:.4}",
            res.value
        ),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Play {
            mode,
            human,
            no_clear,
            engine,
        } => play(mode, human, no_clear, &engine)?,
        Command::Rules => println!("\n== TAPATAN RULES ==\n\n{RULES}"),
        Command::BestMove {
            position,
            to_move,
            json,
            engine,
        } => best_move(&position, to_move, json, &engine)?,
    }
    Ok(())
}
