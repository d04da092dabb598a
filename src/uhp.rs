use clap::Parser;

use crate::prelude::*;

#[derive(Clone, Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct UhpOptions
{
    #[arg(short, long, default_value = "info")]
    /// lowest log level to show
    pub log_level: String,
}

pub struct Server
{
    #[allow(unused)]
    options: UhpOptions,
    board:   Option<Board>,
}

impl Server
{
    /// Creates a new server with the given capabilities.
    pub fn new(options: UhpOptions) -> Self
    {
        Server { options, board: None }
    }

    /// Starts the server, reading commands from stdin until it closes.
    pub fn run(&mut self) -> Result<()>
    {
        loop
        {
            let mut cmdstr: String = String::new();
            let read = std::io::stdin().read_line(&mut cmdstr)?;

            if read == 0
            {
                log::info!("stdin closed, shutting down.");
                return Ok(());
            }

            let args: Vec<&str> = cmdstr.split_whitespace().filter(|s| !s.is_empty()).collect();
            let cmd = *args.first().unwrap_or(&"");

            self.apply(cmd, &args[1..])?;
        }
    }
}

impl Server
{
    /// Matches the command to the server's functionality.
    fn apply(&mut self, cmd: &str, args: &[&str]) -> Result<()>
    {
        let result = match cmd
        {
            | "" => Ok(()),
            | "bestmove" => self.best_move(args),
            | "info" => self.info(),
            | "newgame" => self.new_game(args),
            | "options" => self.options(args),
            | "pass" => self.play_move(&["pass"]),
            | "play" => self.play_move(args),
            | "undo" => self.undo(args),
            | "validmoves" => self.valid_moves(),
            | _ => Err(Error::new(Kind::UnrecognizedCommand, cmd.into())),
        };

        match result
        {
            | Ok(_) =>
            {
                log::debug!("Command completed successfully: {cmd} {}", args.join(" "));
                self.ok()
            }
            | Err(err) => match err.fatal()
            {
                | true =>
                {
                    let _ = self.err(&err);
                    Err(err)
                }
                | false =>
                {
                    log::warn!("encountered recoverable error:\n{err}");
                    self.err(&err)
                }
            },
        }
    }

    /// Returns a legal move available in this position (for the player to move).
    ///
    /// The search budget in `args` is parsed and validated per the protocol, but this
    /// integration point does not run a weighted search; it returns the first legal move,
    /// or a pass if none exists.
    fn best_move(&mut self, args: &[&str]) -> Result<()>
    {
        let _search_args = SearchArgs::parse(args)?;
        let board = self.ensure_started()?;
        let mv = board.generate_moves(false).into_iter().next().unwrap_or(Move::Pass);

        println!("{}", Into::<MoveString>::into(mv));
        Ok(())
    }

    /// Ensures there is a board loaded on this server.
    fn ensure_started(&self) -> Result<&Board>
    {
        match self.board.as_ref()
        {
            | Some(b) => Ok(b),
            | None => Err(Error::empty(Kind::GameNotStarted)),
        }
    }

    /// Ensures there is a board loaded on this server.
    fn ensure_started_mut(&mut self) -> Result<&mut Board>
    {
        match self.board.as_mut()
        {
            | Some(b) => Ok(b),
            | None => Err(Error::empty(Kind::GameNotStarted)),
        }
    }

    /// Prints an error to the UHP stream.
    fn err(&self, err: &Error) -> Result<()>
    {
        println!("err\n{}", err);
        self.ok()
    }

    /// Prints the server's ID.
    fn info(&self) -> Result<()>
    {
        println!("id {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        println!("{};{};{}", Bug::Ladybug.long(), Bug::Mosquito.long(), Bug::Pillbug.long());
        Ok(())
    }

    /// Creates a new game with the given options string.
    fn new_game(&mut self, args: &[&str]) -> Result<()>
    {
        if !args.is_empty()
        {
            let gamestr: GameString = args.join(" ").parse::<GameString>()?;
            self.board = Some(gamestr.into());
        }
        else
        {
            self.board = Some(Board::default())
        }

        let board = self.ensure_started()?;
        println!("{}", GameString::from(board));
        Ok(())
    }

    /// Prints the ok footer to the UHP stream.
    fn ok(&self) -> Result<()>
    {
        println!("ok");
        Ok(())
    }

    /// Implements the optionsmap interface for this server.
    fn options(&mut self, _args: &[&str]) -> Result<()>
    {
        Ok(())
    }

    /// Plays the given move on the current board, if one exists.
    fn play_move(&mut self, args: &[&str]) -> Result<()>
    {
        if args.is_empty()
        {
            return Err(Error::new(Kind::ParseError, "You must provide a MoveString.".into()));
        }

        let board = self.ensure_started_mut()?;

        let mv = Move::from(&args.join(" ").parse::<MoveString>()?, &*board)?;
        board.play(&mv)?;

        println!("{}", GameString::from(&*board));
        Ok(())
    }

    #[allow(unused)]
    /// Placeholder for unimplemented features.
    fn todo(&self) -> Result<()>
    {
        Err(Error::new(Kind::InternalError, "not implemented".into()))
    }

    /// Undoes the given number of moves on the current board.
    fn undo(&mut self, args: &[&str]) -> Result<()>
    {
        let mut n: u8 = 1;
        match args.len()
        {
            | 0 =>
            {}
            | _ =>
            {
                let try_n = args[0].parse::<u8>();
                if let Ok(num) = try_n
                {
                    n = num;
                }
                else
                {
                    return Err(Error::for_parse::<u8>(args[0].into()));
                }
            }
        };

        let board = self.ensure_started_mut()?;
        board.undo(n)?;

        println!("{}", GameString::from(&*board));
        Ok(())
    }

    /// Gets all of the valid moves in this position.
    fn valid_moves(&self) -> Result<()>
    {
        let board = self.ensure_started()?;
        let moves = board.generate_moves(false);
        let movelist = moves.iter().map(|mv| format!("{}", Into::<MoveString>::into(*mv))).collect::<Vec<_>>().join(";");
        let movelist = if movelist.is_empty() { "pass".into() } else { movelist };

        println!("{}", movelist);
        Ok(())
    }
}
