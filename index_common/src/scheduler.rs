//! Single-consumer trigger loop multiplexing timer and menu events.
//!
//! Every refresh origin (the periodic ticker, tray menu clicks, Ctrl-C)
//! enqueues a `Trigger` into one bounded channel, and `run` consumes that
//! channel one trigger at a time in arrival order. That single consumption
//! point is what makes refreshes single-flight: a cycle in progress simply
//! delays consumption of the next trigger; nothing is cancelled mid-flight.
//! Producers never block: they `try_send` and drop on a full queue, with
//! `Quit` as the one trigger that is always delivered.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{debug, info, warn};

use crate::coordinator::RefreshCoordinator;
use crate::source::IndexSource;
use crate::symbols::IndexSymbol;
use crate::tray::TrayDisplay;

/// Pending triggers held before producers start dropping.
pub const TRIGGER_QUEUE_DEPTH: usize = 16;

/// Refresh trigger consumed by the scheduler loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The periodic timer fired.
    Tick,
    /// The user picked a different index from the tray menu.
    Select(IndexSymbol),
    /// The user asked for an immediate re-fetch of the current index.
    Refresh,
    /// Terminate the scheduler loop and shut the indicator down.
    Quit,
}

/// Create the bounded trigger channel shared by all producers and the
/// scheduler.
pub fn trigger_channel() -> (Sender<Trigger>, Receiver<Trigger>) {
    crossbeam_channel::bounded(TRIGGER_QUEUE_DEPTH)
}

/// Enqueue a trigger without blocking the producer thread.
///
/// Menu handlers run on the tray service thread; this handoff must stay
/// non-blocking, so a full queue drops the trigger with a warning. `Quit` is
/// sent blocking instead; shutdown must never be lost.
pub fn enqueue(tx: &Sender<Trigger>, trigger: Trigger) {
    if trigger == Trigger::Quit {
        if tx.send(trigger).is_err() {
            warn!("Trigger queue disconnected; quit ignored");
        }
    } else if let Err(e) = tx.try_send(trigger) {
        warn!("Dropping trigger {:?}: {}", trigger, e);
    }
}

/// Consumes triggers and drives a `RefreshCoordinator`.
pub struct TriggerScheduler {
    triggers: Receiver<Trigger>,
    tick_tx: Sender<Trigger>,
    interval: Duration,
}

impl TriggerScheduler {
    /// Default period of the refresh timer.
    pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

    /// Build a scheduler around the shared trigger channel.
    ///
    /// `tick_tx` must send into the same channel `triggers` receives from;
    /// the ticker thread uses it to enqueue `Trigger::Tick`.
    pub fn new(tick_tx: Sender<Trigger>, triggers: Receiver<Trigger>, interval: Duration) -> Self {
        Self {
            triggers,
            tick_tx,
            interval,
        }
    }

    /// Run the consumer loop until a `Quit` trigger arrives.
    ///
    /// Fires one immediate refresh before the first tick, then consumes
    /// triggers in arrival order. Returns once `Quit` has been processed and
    /// the display collaborator has been asked to shut down.
    pub fn run<S: IndexSource, D: TrayDisplay>(self, mut coordinator: RefreshCoordinator<S, D>) {
        self.spawn_ticker();

        coordinator.refresh();

        for trigger in self.triggers.iter() {
            match trigger {
                Trigger::Tick => {
                    debug!("Timer tick");
                    coordinator.refresh();
                }
                Trigger::Refresh => coordinator.refresh(),
                Trigger::Select(symbol) => coordinator.select_index(symbol),
                Trigger::Quit => {
                    info!("Quit requested; stopping scheduler loop");
                    coordinator.quit();
                    break;
                }
            }
        }
    }

    /// Spawn the timer thread that enqueues `Tick` triggers.
    ///
    /// A tick that finds the queue full is dropped silently; the pending
    /// backlog already guarantees a refresh. The thread exits on its own when
    /// the channel disconnects after `run` returns.
    fn spawn_ticker(&self) {
        let tx = self.tick_tx.clone();
        let interval = self.interval;
        thread::spawn(move || {
            loop {
                thread::sleep(interval);
                match tx.try_send(Trigger::Tick) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        debug!("Trigger queue full; tick dropped");
                    }
                    Err(TrySendError::Disconnected(_)) => break,
                }
            }
            debug!("Ticker thread stopping");
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crossbeam_channel::bounded;

    use crate::coordinator::RefreshCoordinator;
    use crate::presenter::DisplayPresenter;
    use crate::result::Result;
    use crate::source::RawPayload;

    type EventLog = Arc<Mutex<Vec<String>>>;

    #[derive(Clone)]
    struct LoggingDisplay {
        log: EventLog,
    }

    impl TrayDisplay for LoggingDisplay {
        fn set_title(&self, text: &str) {
            self.log.lock().unwrap().push(format!("title {text}"));
        }
        fn set_tooltip(&self, _text: &str) {}
        fn quit(&self) {
            self.log.lock().unwrap().push("quit".to_string());
        }
    }

    /// Source that blocks inside `fetch` until the test releases it, so a
    /// cycle can be held in flight while further triggers queue up.
    struct GatedSource {
        log: EventLog,
        started: Sender<IndexSymbol>,
        release: Receiver<()>,
    }

    impl IndexSource for GatedSource {
        fn fetch(&self, symbol: IndexSymbol) -> Result<RawPayload> {
            self.log.lock().unwrap().push(format!("fetch {symbol}"));
            self.started.send(symbol).unwrap();
            self.release.recv().unwrap();
            Ok(RawPayload::BoardText("1,234.56 🔺0.12 (0.01%)".to_string()))
        }
    }

    struct InstantSource {
        log: EventLog,
    }

    impl IndexSource for InstantSource {
        fn fetch(&self, symbol: IndexSymbol) -> Result<RawPayload> {
            self.log.lock().unwrap().push(format!("fetch {symbol}"));
            Ok(RawPayload::BoardText("1,234.56 🔺0.12 (0.01%)".to_string()))
        }
    }

    fn gated_setup(
        interval: Duration,
    ) -> (
        EventLog,
        Sender<Trigger>,
        Receiver<IndexSymbol>,
        Sender<()>,
        thread::JoinHandle<()>,
    ) {
        let log: EventLog = Arc::default();
        let (started_tx, started_rx) = bounded(16);
        let (release_tx, release_rx) = bounded(16);
        let (trigger_tx, trigger_rx) = trigger_channel();

        let source = GatedSource {
            log: log.clone(),
            started: started_tx,
            release: release_rx,
        };
        let display = LoggingDisplay { log: log.clone() };
        let coordinator = RefreshCoordinator::new(source, DisplayPresenter::new(display));
        let scheduler = TriggerScheduler::new(trigger_tx.clone(), trigger_rx, interval);
        let consumer = thread::spawn(move || scheduler.run(coordinator));

        (log, trigger_tx, started_rx, release_tx, consumer)
    }

    #[test]
    fn test_refreshes_never_overlap() {
        let (log, trigger_tx, started_rx, release_tx, consumer) =
            gated_setup(Duration::from_secs(3600));

        // The initial refresh is now blocked inside fetch; queue two more
        // triggers behind it before releasing anything.
        started_rx.recv().unwrap();
        trigger_tx.send(Trigger::Refresh).unwrap();
        trigger_tx.send(Trigger::Refresh).unwrap();
        release_tx.send(()).unwrap();

        started_rx.recv().unwrap();
        release_tx.send(()).unwrap();
        started_rx.recv().unwrap();
        release_tx.send(()).unwrap();

        trigger_tx.send(Trigger::Quit).unwrap();
        consumer.join().unwrap();

        let log = log.lock().unwrap();
        let title = "title VNINDEX: 1234.56 🔺0.01%";
        // Strict alternation: each fetch starts only after the previous
        // cycle's display push completed.
        assert_eq!(
            log.as_slice(),
            [
                "fetch VNINDEX",
                title,
                "fetch VNINDEX",
                title,
                "fetch VNINDEX",
                title,
                "quit",
            ]
        );
    }

    #[test]
    fn test_mid_flight_selection_keeps_attribution() {
        let (log, trigger_tx, started_rx, release_tx, consumer) =
            gated_setup(Duration::from_secs(3600));

        // Select a different index while the initial cycle is in flight.
        assert_eq!(started_rx.recv().unwrap(), IndexSymbol::VNINDEX);
        trigger_tx.send(Trigger::Select(IndexSymbol::VN30)).unwrap();
        release_tx.send(()).unwrap();

        // The selection triggers its own cycle, now under the new symbol.
        assert_eq!(started_rx.recv().unwrap(), IndexSymbol::VN30);
        release_tx.send(()).unwrap();

        trigger_tx.send(Trigger::Quit).unwrap();
        consumer.join().unwrap();

        let log = log.lock().unwrap();
        // The in-flight cycle kept its original attribution.
        assert_eq!(log[0], "fetch VNINDEX");
        assert_eq!(log[1], "title VNINDEX: 1234.56 🔺0.01%");
        assert_eq!(log[2], "fetch VN30");
        assert_eq!(log[3], "title VN30: 1234.56 🔺0.01%");
    }

    #[test]
    fn test_ticker_enqueues_periodic_refreshes() {
        let log: EventLog = Arc::default();
        let (trigger_tx, trigger_rx) = trigger_channel();
        let source = InstantSource { log: log.clone() };
        let display = LoggingDisplay { log: log.clone() };
        let coordinator = RefreshCoordinator::new(source, DisplayPresenter::new(display));
        let scheduler =
            TriggerScheduler::new(trigger_tx.clone(), trigger_rx, Duration::from_millis(50));
        let consumer = thread::spawn(move || scheduler.run(coordinator));

        thread::sleep(Duration::from_millis(400));
        trigger_tx.send(Trigger::Quit).unwrap();
        consumer.join().unwrap();

        let fetches = log
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.starts_with("fetch"))
            .count();
        // One immediate refresh plus at least a couple of timer ticks.
        assert!(fetches >= 3, "only {fetches} fetches ran");
    }

    #[test]
    fn test_enqueue_drops_when_full_but_keeps_quit() {
        let (tx, rx) = bounded(1);

        enqueue(&tx, Trigger::Refresh);
        enqueue(&tx, Trigger::Tick);
        assert_eq!(rx.len(), 1);
        assert_eq!(rx.try_recv().unwrap(), Trigger::Refresh);

        enqueue(&tx, Trigger::Quit);
        assert_eq!(rx.try_recv().unwrap(), Trigger::Quit);
    }
}
