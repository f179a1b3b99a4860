use std::io::{self, Stdout, Write};

use duel_core::game::report::{GameReport, TrickOutcome};
use duel_core::model::score::GameResult;
use duel_core::model::seat::Seat;

/// Receives the public record of a game as it is played.
pub trait GameObserver {
    fn trick_completed(&mut self, outcome: &TrickOutcome) -> io::Result<()>;

    fn game_finished(&mut self, report: &GameReport) -> io::Result<()>;
}

/// Writes one line per trick and a final score line.
pub struct ConsoleObserver<W: Write> {
    out: W,
}

impl ConsoleObserver<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> GameObserver for ConsoleObserver<W> {
    fn trick_completed(&mut self, outcome: &TrickOutcome) -> io::Result<()> {
        writeln!(self.out, "{}", trick_line(outcome))
    }

    fn game_finished(&mut self, report: &GameReport) -> io::Result<()> {
        writeln!(self.out, "{}", final_line(report))?;
        self.out.flush()
    }
}

pub fn trick_line(outcome: &TrickOutcome) -> String {
    format!(
        "Trick {}: {} {} vs {} {} -> {}",
        outcome.number,
        Seat::One,
        outcome.card_of(Seat::One),
        Seat::Two,
        outcome.card_of(Seat::Two),
        outcome.winner
    )
}

pub fn final_line(report: &GameReport) -> String {
    let verdict = match report.result {
        GameResult::Winner(seat) => format!("{seat} wins"),
        GameResult::Draw => "draw".to_string(),
    };
    format!(
        "Final score: {} = {}, {} = {} -> {verdict}",
        Seat::One,
        report.score(Seat::One),
        Seat::Two,
        report.score(Seat::Two)
    )
}
