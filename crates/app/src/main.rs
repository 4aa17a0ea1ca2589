use std::fmt;
use std::io::{self, BufRead, Write as _};
use std::sync::Arc;

use quiz_core::{Catalog, Clock};
use quiz_core::model::Label;
use services::{
    DifficultyFilter, OrderMode, SessionError, SessionService, SessionSnapshot,
};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidOrder { raw: String },
    InvalidDifficulty { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidOrder { raw } => write!(f, "invalid --order value: {raw}"),
            ArgsError::InvalidDifficulty { raw } => {
                write!(f, "invalid --difficulty value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--order shuffle|in-order] [--difficulty all|easy|medium|hard] [--json]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --order shuffle");
    eprintln!("  --difficulty all");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_ORDER, QUIZ_DIFFICULTY");
}

struct Args {
    order: OrderMode,
    difficulty: DifficultyFilter,
    json: bool,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut order = std::env::var("QUIZ_ORDER")
            .ok()
            .and_then(|value| value.parse::<OrderMode>().ok())
            .unwrap_or_default();
        let mut difficulty = std::env::var("QUIZ_DIFFICULTY")
            .ok()
            .and_then(|value| value.parse::<DifficultyFilter>().ok())
            .unwrap_or_default();
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--order" => {
                    let value = require_value(args, "--order")?;
                    order = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidOrder { raw: value.clone() })?;
                }
                "--difficulty" => {
                    let value = require_value(args, "--difficulty")?;
                    difficulty = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDifficulty { raw: value.clone() })?;
                }
                "--json" => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            order,
            difficulty,
            json,
        })
    }
}

fn print_help() {
    println!("Commands:");
    println!("  m | myth      guess that the statement is a myth");
    println!("  f | fact      guess that the statement is a fact");
    println!("  flip          show or hide the explanation face");
    println!("  n | next      advance to the next card");
    println!("  restart       rebuild the deck and start over");
    println!("  practice      replay the cards you missed");
    println!("  q | quit      leave");
}

fn render(snapshot: &SessionSnapshot) {
    if snapshot.is_complete {
        return;
    }

    let Some(card) = &snapshot.card else {
        return;
    };

    println!();
    println!(
        "Card {}/{}  score {}  streak {}",
        snapshot.progress.completed + 1,
        snapshot.progress.total,
        snapshot.score,
        snapshot.streak,
    );
    println!("[{}] {}", card.difficulty, card.statement);

    if snapshot.answered {
        match snapshot.last_guess_correct {
            Some(true) => println!("Correct guess!"),
            Some(false) => println!("Not quite."),
            None => {}
        }
    } else {
        println!("Myth or fact? (m/f)");
    }

    if let Some(back) = &snapshot.back {
        println!();
        println!("  => {}", back.label);
        println!("  {}", back.explanation);
        if !back.discussion.is_empty() {
            println!("  Discussion starters:");
            for prompt in &back.discussion {
                println!("  - {prompt}");
            }
        }
        println!("  (type 'next' to continue)");
    } else if snapshot.answered {
        println!("(type 'flip' to reveal the explanation)");
    }
}

fn render_end_screen(session: &SessionService, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let summary = session.build_summary()?;

    println!();
    println!(
        "Finished! Final score: {}/{}",
        summary.correct(),
        summary.total()
    );
    println!("Best streak: {}", summary.best_streak());

    if !session.history().is_empty() {
        println!();
        println!("Review:");
        for log in session.history() {
            let mark = if log.is_correct { "+" } else { "x" };
            println!(
                "  {mark} {} (was {}, you said {})",
                log.statement, log.label, log.choice
            );
        }
    }

    if !session.missed().is_empty() {
        println!();
        println!(
            "{} card(s) missed. Type 'practice' to replay them.",
            session.missed().len()
        );
    }
    println!("Type 'restart' to play again or 'quit' to leave.");

    if json {
        let report = serde_json::json!({
            "summary": summary,
            "history": session.history(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let clock = Clock::default_clock();
    let catalog = Arc::new(Catalog::builtin());
    let mut session = SessionService::start(catalog, args.order, args.difficulty, clock.now());

    println!("Guess: Myth or Fact? Language edition.");
    println!("Decide myth/fact, then flip the card for the explanation. 'help' lists commands.");

    let mut was_complete = session.is_complete();
    if was_complete {
        render_end_screen(&session, args.json)?;
    } else {
        render(&SessionSnapshot::of(&session));
    }

    print!("> ");
    io::stdout().flush()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let command = line.trim().to_ascii_lowercase();

        let outcome: Result<(), SessionError> = match command.as_str() {
            "" => Ok(()),
            "m" | "myth" => session.submit_guess(Label::Myth, clock.now()).map(|_| ()),
            "f" | "fact" => session.submit_guess(Label::Fact, clock.now()).map(|_| ()),
            "flip" => session.toggle_flip().map(|_| ()),
            "n" | "next" => session.advance(clock.now()),
            "restart" => {
                session.restart(args.order, args.difficulty, clock.now());
                was_complete = false;
                Ok(())
            }
            "practice" => {
                if session.practice_missed(clock.now()) {
                    was_complete = false;
                } else {
                    println!("Nothing to practice: no missed cards in the last pass.");
                }
                Ok(())
            }
            "q" | "quit" | "exit" => break,
            "help" | "?" => {
                print_help();
                Ok(())
            }
            other => {
                println!("Unknown command: {other} (try 'help')");
                Ok(())
            }
        };

        if let Err(err) = outcome {
            println!("{err}");
        }

        if session.is_complete() {
            if !was_complete {
                render_end_screen(&session, args.json)?;
                was_complete = true;
            }
        } else {
            render(&SessionSnapshot::of(&session));
        }

        print!("> ");
        io::stdout().flush()?;
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
