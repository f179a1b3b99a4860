use std::io;
use std::thread::{self, JoinHandle};

use duel_bot::{AgentSummary, Policy, serve};
use duel_core::model::card::Card;
use duel_core::model::seat::Seat;
use duel_core::protocol::{self, Command, ProtocolError};
use tracing::{Level, event};

use crate::referee::RefereeError;
use crate::transport::{PipeReader, PipeWriter, pipe};

pub type AgentOutcome = Result<AgentSummary, ProtocolError>;

/// The referee's end of one agent: a command stream out, a card stream in,
/// and the thread the agent runs on.
pub struct AgentLink {
    seat: Seat,
    commands: PipeWriter,
    responses: PipeReader,
    handle: JoinHandle<AgentOutcome>,
}

impl AgentLink {
    /// Runs `body` on its own thread with the agent's ends of both pipes.
    pub fn spawn_with<F>(seat: Seat, body: F) -> io::Result<Self>
    where
        F: FnOnce(PipeReader, PipeWriter) -> AgentOutcome + Send + 'static,
    {
        let (commands, agent_commands) = pipe();
        let (agent_responses, responses) = pipe();
        let handle = thread::Builder::new()
            .name(format!("agent-{}", seat.index() + 1))
            .spawn(move || body(agent_commands, agent_responses))?;
        Ok(Self {
            seat,
            commands,
            responses,
            handle,
        })
    }

    pub fn spawn_policy<P>(seat: Seat, policy: P) -> io::Result<Self>
    where
        P: Policy + 'static,
    {
        Self::spawn_with(seat, move |commands, responses| {
            serve(seat, policy, commands, responses)
        })
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn send_hand(&mut self, cards: &[Card]) -> Result<(), ProtocolError> {
        protocol::write_hand(&mut self.commands, cards)
    }

    pub fn send(&mut self, command: Command) -> Result<(), ProtocolError> {
        protocol::write_command(&mut self.commands, command)
    }

    pub fn receive_card(&mut self) -> Result<Card, ProtocolError> {
        protocol::read_card(&mut self.responses)
    }

    /// Closes both streams and waits for the agent thread to exit.
    pub fn finish(self) -> Result<AgentSummary, RefereeError> {
        let AgentLink {
            seat,
            commands,
            responses,
            handle,
        } = self;
        drop(commands);
        drop(responses);
        match handle.join() {
            Ok(Ok(summary)) => Ok(summary),
            Ok(Err(source)) => Err(RefereeError::Agent { seat, source }),
            Err(_) => Err(RefereeError::AgentPanicked { seat }),
        }
    }

    /// Tears the link down after a fatal error, logging whatever the agent reports.
    pub fn abandon(self) {
        let seat = self.seat;
        if let Err(err) = self.finish() {
            event!(
                target: "duel_referee::agent_link",
                Level::DEBUG,
                seat = %seat,
                error = %err,
                "agent exited abnormally during abort"
            );
        }
    }
}
