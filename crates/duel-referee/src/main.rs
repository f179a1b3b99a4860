use std::fs;

use anyhow::Context;
use duel_bot::NaivePolicy;
use duel_core::AppInfo;
use duel_core::model::deck::Deck;
use duel_referee::Referee;
use duel_referee::config::GameConfig;
use duel_referee::logging::init_logging;
use duel_referee::observer::ConsoleObserver;
use tracing::{Level, event};

fn main() -> anyhow::Result<()> {
    let config = GameConfig::from_env().context("reading configuration from the environment")?;
    let _logging_guard = init_logging(&config.logging);

    let seed = config.seed_or_random();
    event!(
        target: "duel",
        Level::INFO,
        app = AppInfo::name(),
        version = AppInfo::version(),
        seed,
        "starting game"
    );

    let referee = Referee::with_policies(NaivePolicy::new(), NaivePolicy::new())?.with_seed(seed);
    let mut observer = ConsoleObserver::stdout();
    let report = referee
        .play(Deck::shuffled_with_seed(seed), &mut observer)
        .with_context(|| format!("game with seed {seed} aborted"))?;

    if let Some(path) = config.report_path.as_ref() {
        let json = report.to_json().context("serializing game report")?;
        fs::write(path, json)
            .with_context(|| format!("writing game report to {}", path.display()))?;
    }

    Ok(())
}
