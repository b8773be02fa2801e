//! Tray display abstraction and the StatusNotifierItem backend.
//!
//! The refresh pipeline only ever talks to the `TrayDisplay` trait; the
//! concrete backend is a `ksni` StatusNotifierItem whose menu click handlers
//! hand triggers off to the scheduler queue. Menu handlers run on the ksni
//! service thread; the handoff must stay a non-blocking enqueue.

use crossbeam_channel::Sender;
use ksni::menu::StandardItem;
use ksni::{Handle, MenuItem, ToolTip, TrayService};
use log::info;

use crate::scheduler::{Trigger, enqueue};
use crate::symbols::IndexSymbol;

/// Title shown before the first refresh completes.
const INITIAL_TITLE: &str = "VN-Index";
/// Freedesktop icon name used for the indicator.
const ICON_NAME: &str = "utilities-system-monitor";

/// Operations the refresh pipeline needs from the tray toolkit.
pub trait TrayDisplay {
    /// Replace the tray icon title.
    fn set_title(&self, text: &str);
    /// Replace the tray icon tooltip.
    fn set_tooltip(&self, text: &str);
    /// Remove the indicator and stop the toolkit service.
    fn quit(&self);
}

/// StatusNotifierItem state: the current texts plus the trigger queue sender
/// the menu items emit into.
struct IndicatorTray {
    title: String,
    tooltip: String,
    triggers: Sender<Trigger>,
}

impl IndicatorTray {
    fn new(triggers: Sender<Trigger>) -> Self {
        Self {
            title: INITIAL_TITLE.to_string(),
            tooltip: String::new(),
            triggers,
        }
    }
}

impl ksni::Tray for IndicatorTray {
    fn id(&self) -> String {
        "vn-index-tray".into()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn icon_name(&self) -> String {
        ICON_NAME.into()
    }

    fn tool_tip(&self) -> ToolTip {
        ToolTip {
            title: self.tooltip.clone(),
            ..Default::default()
        }
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        let mut items: Vec<MenuItem<Self>> = IndexSymbol::ALL
            .iter()
            .map(|&symbol| {
                StandardItem {
                    label: symbol.menu_label().to_string(),
                    activate: Box::new(move |tray: &mut Self| {
                        enqueue(&tray.triggers, Trigger::Select(symbol));
                    }),
                    ..Default::default()
                }
                .into()
            })
            .collect();
        items.push(
            StandardItem {
                label: "Refresh".into(),
                activate: Box::new(|tray: &mut Self| {
                    enqueue(&tray.triggers, Trigger::Refresh);
                }),
                ..Default::default()
            }
            .into(),
        );
        items.push(
            StandardItem {
                label: "Quit".into(),
                activate: Box::new(|tray: &mut Self| {
                    enqueue(&tray.triggers, Trigger::Quit);
                }),
                ..Default::default()
            }
            .into(),
        );
        items
    }
}

/// Tray backend handle implementing `TrayDisplay` over a running ksni
/// service.
pub struct KsniDisplay {
    handle: Handle<IndicatorTray>,
}

impl KsniDisplay {
    /// Spawn the StatusNotifierItem service and return the display handle.
    ///
    /// Menu clicks are delivered into `triggers`; the service runs on its own
    /// thread until `quit` is called.
    pub fn spawn(triggers: Sender<Trigger>) -> Self {
        let service = TrayService::new(IndicatorTray::new(triggers));
        let handle = service.handle();
        service.spawn();
        info!("Tray service started");
        Self { handle }
    }
}

impl TrayDisplay for KsniDisplay {
    fn set_title(&self, text: &str) {
        let text = text.to_string();
        self.handle.update(move |tray| tray.title = text.clone());
    }

    fn set_tooltip(&self, text: &str) {
        let text = text.to_string();
        self.handle.update(move |tray| tray.tooltip = text.clone());
    }

    fn quit(&self) {
        self.handle.shutdown();
    }
}
