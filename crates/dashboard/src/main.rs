//! tele-dashboard — live vehicle telemetry charts in a desktop window.
//!
//! Run with:  `RUST_LOG=info tele-dashboard`
//!
//! Owns the Iced application loop and wires it to the scheduler task:
//! - warm-up + periodic frames arrive through a subscription stream
//! - line colours are rolled at boot and once more after warm-up

use futures::{channel::mpsc::Sender, SinkExt};
use iced::{
    widget::{container, text, Column, Row},
    Element, Length, Size, Subscription, Task,
};
use rand::{rngs::StdRng, SeedableRng};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Duration;
use tele_config::{config_path, load as load_config, TeleConfig};
use tele_core::{event::Message as AppMessage, MetricId, Phase, SeriesSnapshot, TickInfo};
use tele_theme::{Color, Theme};
use tele_widgets::ChartCard;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Charts per row.
const GRID_COLUMNS: usize = 2;

/// Configuration loaded once in `main`, shared by the window and the
/// scheduler task.
static CONFIG: OnceLock<TeleConfig> = OnceLock::new();

static EMPTY_SERIES: SeriesSnapshot = SeriesSnapshot {
    labels: Vec::new(),
    values: Vec::new(),
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("tele-dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    // Fail fast on a broken config before any window opens.
    install_config(load_config(config_path())?)?;

    iced::application(Dashboard::new, Dashboard::update, Dashboard::view)
        .title("Vehicle Telemetry")
        .subscription(Dashboard::subscription)
        .window_size(Size::new(960.0, 640.0))
        .run()
        .map_err(Into::into)
}

// ── Message ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Message {
    /// Propagate a scheduler message.
    App(AppMessage),
}

// ── State ─────────────────────────────────────────────────────────────────────

struct Dashboard {
    config:    TeleConfig,
    theme:     Theme,
    cards:     Vec<ChartCard>,
    series:    BTreeMap<MetricId, SeriesSnapshot>,
    last_tick: Option<TickInfo>,
    stopped:   Option<String>,
    rng:       StdRng,
}

impl Dashboard {
    fn new() -> (Self, Task<Message>) {
        let config = shared_config().clone();
        (Self::from_config(config, StdRng::from_entropy()), Task::none())
    }

    fn from_config(config: TeleConfig, mut rng: StdRng) -> Self {
        let theme = Theme::from_config(&config.theme);
        let cards = config
            .metric_definitions()
            .into_iter()
            .map(|metric| {
                let color = card_color(&config, metric.id, &mut rng);
                ChartCard::new(metric, color)
            })
            .collect();

        Self {
            config,
            theme,
            cards,
            series: BTreeMap::new(),
            last_tick: None,
            stopped: None,
            rng,
        }
    }

    /// Re-roll every colour the config leaves unset.
    fn recolor(&mut self) {
        for card in &mut self.cards {
            let id = card.metric().id;
            card.set_color(card_color(&self.config, id, &mut self.rng));
        }
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::App(msg) => self.handle_app(msg),
        }
        Task::none()
    }

    fn handle_app(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Frame(frame) => {
                for (id, snapshot) in frame.series {
                    self.series.insert(id, snapshot);
                }
                self.last_tick = Some(frame.tick);
            }
            AppMessage::WarmUpComplete => {
                self.recolor();
                info!("Warm-up frames received; chart colours assigned");
            }
            AppMessage::Stopped(reason) => {
                warn!("Telemetry stopped: {reason}");
                self.stopped = Some(reason);
            }
        }
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let gap = self.theme.gap as f32;

        let rows: Vec<Element<'_, Message>> = self
            .cards
            .chunks(GRID_COLUMNS)
            .map(|chunk| {
                Row::with_children(chunk.iter().map(|card| {
                    let series = self.series.get(&card.metric().id).unwrap_or(&EMPTY_SERIES);
                    card.view(series, &self.theme)
                }))
                .spacing(gap)
                .into()
            })
            .collect();

        let status = text(self.status_line())
            .size(self.theme.font_size_offset(-2.0))
            .color(self.theme.foreground.with_alpha(0.7).to_iced());

        let body = Column::with_children(rows)
            .push(status)
            .spacing(gap);

        let bg = self.theme.background.to_iced();
        let fg = self.theme.foreground.to_iced();

        container(body)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(self.theme.padding)
            .style(move |_: &iced::Theme| iced::widget::container::Style {
                background: Some(iced::Background::Color(bg)),
                text_color: Some(fg),
                ..Default::default()
            })
            .into()
    }

    fn status_line(&self) -> String {
        if let Some(reason) = &self.stopped {
            return format!("stopped: {reason}");
        }
        match &self.last_tick {
            None => "waiting for data…".to_string(),
            Some(tick) => {
                let phase = match tick.phase {
                    Phase::WarmUp   => "warm-up",
                    Phase::Periodic => "live",
                };
                format!(
                    "{phase} · tick {} · {} · every {} ms",
                    tick.index + 1,
                    tick.label,
                    self.config.dashboard.interval_ms
                )
            }
        }
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        Subscription::run(telemetry_stream)
    }
}

// ── Subscription stream ───────────────────────────────────────────────────────

/// Runs the scheduler task and forwards its frames.  The function pointer is
/// the subscription's identity, so the task is started once.
fn telemetry_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(16, |mut sender: Sender<Message>| async move {
        match tele_series::spawn_scheduler(shared_config()) {
            Ok(mut rx) => {
                while let Some(msg) = rx.recv().await {
                    if sender.send(Message::App(msg)).await.is_err() {
                        return; // UI gone
                    }
                }
            }
            Err(e) => {
                error!("Cannot start scheduler: {e}");
                if sender
                    .send(Message::App(AppMessage::Stopped(e.to_string())))
                    .await
                    .is_err()
                {
                    return;
                }
            }
        }

        // Scheduler exited; stall rather than restart it.
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn install_config(config: TeleConfig) -> anyhow::Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("configuration already loaded"))
}

/// The configuration installed by `main`; defaults if none was installed.
fn shared_config() -> &'static TeleConfig {
    CONFIG.get_or_init(TeleConfig::default)
}

/// Configured colour for `id`, or a random one when unset or unparsable.
fn card_color(config: &TeleConfig, id: MetricId, rng: &mut StdRng) -> Color {
    config
        .metric_color(id)
        .and_then(Color::from_hex)
        .unwrap_or_else(|| Color::random(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tele_config::MetricConfig;
    use tele_core::Frame;

    fn dashboard(config: TeleConfig) -> Dashboard {
        Dashboard::from_config(config, StdRng::seed_from_u64(3))
    }

    #[test]
    fn one_card_per_metric() {
        let dash = dashboard(TeleConfig::default());
        let ids: Vec<MetricId> = dash.cards.iter().map(|c| c.metric().id).collect();
        assert_eq!(ids, MetricId::ALL.to_vec());
    }

    #[test]
    fn recolor_keeps_configured_colours() {
        let mut config = TeleConfig::default();
        config.metrics.speed = Some(MetricConfig {
            color: Some("#f38ba8".into()),
            ..Default::default()
        });

        let mut dash = dashboard(config);
        let rpm_before = dash.cards[1].color();
        dash.handle_app(AppMessage::WarmUpComplete);

        assert_eq!(dash.cards[0].color().to_hex(), "#f38ba8");
        assert_ne!(dash.cards[1].color(), rpm_before);
    }

    #[test]
    fn frames_replace_series_content() {
        let mut dash = dashboard(TeleConfig::default());
        let snapshot = SeriesSnapshot {
            labels: vec!["10:00:00".into()],
            values: vec![42.0],
        };
        dash.handle_app(AppMessage::Frame(Frame {
            tick: TickInfo { index: 0, phase: Phase::WarmUp, label: "10:00:00".into() },
            series: vec![(MetricId::Speed, snapshot.clone())],
        }));

        assert_eq!(dash.series.get(&MetricId::Speed), Some(&snapshot));
        assert!(dash.status_line().starts_with("warm-up · tick 1"));
    }

    #[test]
    fn window_and_scheduler_share_one_config() {
        let mut config = TeleConfig::default();
        config.dashboard.capacity = 7;
        config.dashboard.interval_ms = 250;
        install_config(config).unwrap();

        let (dash, _) = Dashboard::new();
        assert_eq!(dash.config.dashboard.capacity, 7);
        assert_eq!(shared_config().dashboard.interval_ms, 250);
        assert!(install_config(TeleConfig::default()).is_err());
    }

    #[test]
    fn stop_reason_wins_status_line() {
        let mut dash = dashboard(TeleConfig::default());
        dash.handle_app(AppMessage::Stopped("render sink closed".into()));
        assert_eq!(dash.status_line(), "stopped: render sink closed");
    }
}
