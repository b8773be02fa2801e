//! VN-Index tray indicator — priceboard scrape variant.
//!
//! Renders the exchange priceboard in a headless browser, extracts the
//! chart-detail text, and shows the parsed index value in the tray title.
//! Refreshes every 60 seconds and on demand from the tray menu; tray menu
//! clicks, the timer, and Ctrl-C all feed one trigger queue consumed by a
//! single scheduler loop.
#![warn(missing_docs)]
mod board;

use index_common::coordinator::RefreshCoordinator;
use index_common::presenter::DisplayPresenter;
use index_common::scheduler::{Trigger, TriggerScheduler, enqueue, trigger_channel};
use index_common::tray::{KsniDisplay, TrayDisplay};
use log::info;

use crate::board::BoardScraper;

fn main() {
    init_logger();

    let (trigger_tx, trigger_rx) = trigger_channel();
    {
        let trigger_tx = trigger_tx.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down...");
            enqueue(&trigger_tx, Trigger::Quit);
        })
        .expect("Error setting Ctrl+C handler");
    }

    let display = KsniDisplay::spawn(trigger_tx.clone());
    display.set_tooltip("Vietnam Stock Indices");

    let coordinator =
        RefreshCoordinator::new(BoardScraper::new(), DisplayPresenter::new(display));
    TriggerScheduler::new(trigger_tx, trigger_rx, TriggerScheduler::REFRESH_INTERVAL)
        .run(coordinator);

    info!("Indicator stopped");
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
