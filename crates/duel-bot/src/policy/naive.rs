use super::{Policy, PolicyContext};
use tracing::{Level, event};

/// Leads with the first card held; follows with the highest card of the led
/// suit, or throws away the last card when void in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaivePolicy;

impl NaivePolicy {
    pub const fn new() -> Self {
        Self
    }
}

impl Policy for NaivePolicy {
    fn choose_play(&mut self, ctx: &PolicyContext) -> usize {
        let Some(led) = ctx.led else {
            return 0;
        };
        match ctx.hand.highest_of(led.suit) {
            Some(index) => index,
            None => {
                event!(
                    target: "duel_bot::policy",
                    Level::DEBUG,
                    seat = %ctx.seat,
                    led = %led,
                    "void in led suit; discarding last card"
                );
                ctx.hand.last_index().unwrap_or(0)
            }
        }
    }
}
