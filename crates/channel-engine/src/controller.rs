//! The long-running polling controller.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use channel_alert::ZoneEvaluator;
use channel_config::{AppConfig, WatchSettings};
use channel_core::error::{DataError, WatchError};
use channel_core::traits::{BarSource, Notifier};
use channel_core::types::{AlertState, Bar, BarSeries};
use channel_indicators::IndicatorSet;
use channel_regression::{RegressionChannel, TrendDirection};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::snapshot::{CycleSnapshot, Presenter};

/// Delay before retrying a tick whose fetch failed outright.
const ERROR_RETRY_SECS: u64 = 5;

/// Command-line overrides that win over the config file on every reload.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverride {
    pub pair: Option<String>,
    pub timeframe: Option<channel_core::types::Timeframe>,
    pub refresh_interval_secs: Option<u64>,
}

impl SettingsOverride {
    fn apply(&self, settings: &mut WatchSettings) {
        if let Some(pair) = &self.pair {
            settings.pair = pair.clone();
        }
        if let Some(timeframe) = self.timeframe {
            settings.timeframe = timeframe;
        }
        if let Some(refresh) = self.refresh_interval_secs {
            settings.refresh_interval_secs = refresh;
        }
    }
}

/// Owns the cross-cycle state (slope history, alert state) and drives the
/// fetch-compute-present pipeline on a fixed interval, forever.
///
/// Single-writer by construction: only `run` touches the mutable state,
/// so no locking is needed.
pub struct PollingController {
    config_path: PathBuf,
    config: AppConfig,
    source: Arc<dyn BarSource>,
    presenter: Arc<dyn Presenter>,
    notifier: Arc<dyn Notifier>,
    overrides: SettingsOverride,
    evaluator: ZoneEvaluator,
    alert_state: AlertState,
}

impl PollingController {
    pub fn new(
        config_path: PathBuf,
        config: AppConfig,
        source: Arc<dyn BarSource>,
        presenter: Arc<dyn Presenter>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config_path,
            config,
            source,
            presenter,
            notifier,
            overrides: SettingsOverride::default(),
            evaluator: ZoneEvaluator::new(),
            alert_state: AlertState::default(),
        }
    }

    /// Apply command-line overrides on top of every config reload.
    pub fn with_overrides(mut self, overrides: SettingsOverride) -> Self {
        overrides.apply(&mut self.config.watch);
        self.overrides = overrides;
        self
    }

    /// Run until the stop signal flips.
    ///
    /// The signal preempts the end-of-cycle sleep and any fetch wait;
    /// compute and present always run to completion so the slope history
    /// and alert state are never left half-updated.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        info!(source = self.source.name(), "polling controller started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            // Configuration is re-read each tick: every setting is
            // hot-reconfigurable between cycles.
            self.reload_config();
            let settings = self.config.watch.clone();

            let fetched = tokio::select! {
                _ = shutdown.changed() => break,
                result = fetch_window(self.source.as_ref(), &settings) => result,
            };

            let delay = match fetched {
                Ok(bars) => {
                    self.finish_cycle(&bars, &settings).await;
                    Duration::from_secs(settings.refresh_interval_secs)
                }
                Err(err) => {
                    self.presenter
                        .present_error(&format!("data source unavailable: {}", err));
                    Duration::from_secs(ERROR_RETRY_SECS)
                }
            };

            tokio::select! {
                _ = shutdown.changed() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        info!("polling controller stopped");
    }

    /// Steps 3-6 of a tick: compute, present, notify. Never preempted.
    async fn finish_cycle(&mut self, bars: &[Bar], settings: &WatchSettings) {
        match self.compute_cycle(bars, settings, Utc::now()) {
            Ok(snapshot) => {
                self.presenter.present(&snapshot);
                if let Some(alert) = &snapshot.alert {
                    info!(side = %alert.side, price = alert.price, "zone alert fired");
                    if self.notifier.is_configured() {
                        if let Err(err) = self.notifier.notify(&alert.message()).await {
                            warn!(sink = self.notifier.name(), error = %err, "alert delivery failed");
                        }
                    }
                }
            }
            Err(err) => {
                // Degenerate window: skip this cycle without advancing
                // the cross-cycle state, retry on the next tick.
                self.presenter.present_error(&format!("cycle skipped: {}", err));
            }
        }
    }

    /// Pure pipeline for one cycle. Cross-cycle state advances only
    /// after the regression fit has succeeded.
    fn compute_cycle(
        &mut self,
        bars: &[Bar],
        settings: &WatchSettings,
        now: DateTime<Utc>,
    ) -> Result<CycleSnapshot, WatchError> {
        let window = BarSeries::from_trailing(
            settings.pair.clone(),
            settings.timeframe,
            bars,
            settings.data_length,
        );

        let closes = window.closes();
        let indicators = IndicatorSet::compute(&closes);

        let regression = RegressionChannel::new(settings.max_dev_multiplier)
            .fit(&window.timestamps_secs(), &closes)?;

        let trend = TrendDirection::classify(&regression.predicted)
            .ok_or_else(|| WatchError::Internal("trend needs two fitted points".to_string()))?;

        // The fit guarantees a last bar exists from here on
        let last = *window
            .last()
            .ok_or_else(|| WatchError::Internal("empty window after fit".to_string()))?;

        let alert = self
            .evaluator
            .evaluate(&settings.pair, &last, &regression, now);
        if let Some(alert) = &alert {
            self.alert_state.trigger(alert.message(), now);
        }
        self.alert_state.expire(now);

        debug!(
            bars = window.len(),
            slope = regression.slope,
            levels = regression.level_count(),
            %trend,
            "cycle computed"
        );

        Ok(CycleSnapshot {
            window,
            indicators,
            regression,
            trend,
            alert,
            alert_state: self.alert_state.clone(),
            generated_at: now,
        })
    }

    fn reload_config(&mut self) {
        match channel_config::load_config(&self.config_path) {
            Ok(mut config) => {
                self.overrides.apply(&mut config.watch);
                self.config = config;
            }
            Err(err) => {
                warn!(error = %err, "config reload failed, keeping last good config");
            }
        }
    }
}

/// Fetch the raw series, refetching once with the extended load strategy
/// when the default page comes back short.
async fn fetch_window(
    source: &dyn BarSource,
    settings: &WatchSettings,
) -> Result<Vec<Bar>, DataError> {
    let bars = source
        .fetch_bars(&settings.pair, settings.timeframe, 0)
        .await?;

    if bars.len() < settings.min_bars {
        debug!(
            fetched = bars.len(),
            min = settings.min_bars,
            "short series, trying extended load"
        );
        match source.fetch_bars(&settings.pair, settings.timeframe, 1).await {
            Ok(more) if more.len() > bars.len() => return Ok(more),
            // The short page is still usable; the extended one was not better
            Ok(_) | Err(_) => return Ok(bars),
        }
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use channel_core::types::Timeframe;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Serves an ascending synthetic series; optionally fails first.
    struct StubSource {
        fail_first: u32,
        calls: AtomicU32,
        bars: usize,
    }

    impl StubSource {
        fn new(bars: usize) -> Self {
            Self {
                fail_first: 0,
                calls: AtomicU32::new(0),
                bars,
            }
        }

        fn failing_first(mut self, n: u32) -> Self {
            self.fail_first = n;
            self
        }

        fn synthetic_bars(&self) -> Vec<Bar> {
            (0..self.bars)
                .map(|i| {
                    let close = 100.0 + 0.01 * i as f64;
                    Bar::new((i as i64) * 30_000, close, close + 0.1, close - 0.1, close)
                })
                .collect()
        }
    }

    #[async_trait]
    impl BarSource for StubSource {
        async fn fetch_bars(
            &self,
            _pair: &str,
            _timeframe: Timeframe,
            _load_count: u32,
        ) -> Result<Vec<Bar>, DataError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                return Err(DataError::EmptyPayload);
            }
            Ok(self.synthetic_bars())
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    #[derive(Default)]
    struct CollectingPresenter {
        snapshots: Mutex<Vec<CycleSnapshot>>,
        errors: Mutex<Vec<String>>,
    }

    impl Presenter for CollectingPresenter {
        fn present(&self, snapshot: &CycleSnapshot) {
            self.snapshots.lock().unwrap().push(snapshot.clone());
        }

        fn present_error(&self, status: &str) {
            self.errors.lock().unwrap().push(status.to_string());
        }
    }

    struct NullNotifier;

    #[async_trait]
    impl Notifier for NullNotifier {
        async fn notify(&self, _text: &str) -> Result<(), channel_core::error::NotifyError> {
            Ok(())
        }

        fn is_configured(&self) -> bool {
            false
        }

        fn name(&self) -> &str {
            "null"
        }
    }

    fn controller(
        source: Arc<dyn BarSource>,
        presenter: Arc<CollectingPresenter>,
    ) -> PollingController {
        let mut config = AppConfig::default();
        config.watch.data_length = 30;
        config.normalize();
        PollingController::new(
            // Path that never resolves: reload keeps the seeded config
            PathBuf::from("/nonexistent/channelwatch.toml"),
            config,
            source,
            presenter,
            Arc::new(NullNotifier),
        )
    }

    #[test]
    fn test_ascending_window_end_to_end() {
        let source = StubSource::new(30);
        let presenter = Arc::new(CollectingPresenter::default());
        let mut ctl = controller(Arc::new(StubSource::new(30)), presenter);

        let bars = source.synthetic_bars();
        let mut config = AppConfig::default();
        config.watch.data_length = 30;
        config.normalize();

        let snapshot = ctl
            .compute_cycle(&bars, &config.watch, Utc::now())
            .unwrap();

        assert_eq!(snapshot.trend, TrendDirection::Bullish);
        assert!(snapshot.regression.slope > 0.0);
        assert_eq!(snapshot.window.len(), 30);

        let closes = snapshot.window.closes();
        for i in 0..30 {
            if i < 19 {
                assert!(snapshot.indicators.sma20[i].is_nan());
            } else {
                let mean: f64 = closes[i - 19..=i].iter().sum::<f64>() / 20.0;
                assert!((snapshot.indicators.sma20[i] - mean).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_insufficient_window_skips_without_state_advance() {
        let presenter = Arc::new(CollectingPresenter::default());
        let mut ctl = controller(Arc::new(StubSource::new(30)), presenter);

        let config = AppConfig::default();
        let one_bar = [Bar::new(0, 100.0, 100.5, 99.5, 100.0)];
        let err = ctl
            .compute_cycle(&one_bar, &config.watch, Utc::now())
            .unwrap_err();

        assert!(matches!(err, WatchError::Regression(_)));
        assert_eq!(ctl.evaluator.history_len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_presents_cycles_and_stops() {
        let presenter = Arc::new(CollectingPresenter::default());
        let mut ctl = controller(Arc::new(StubSource::new(30)), presenter.clone());
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            ctl.run(rx).await;
        });

        // Three refresh intervals of simulated time
        tokio::time::sleep(Duration::from_secs(35)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        let count = presenter.snapshots.lock().unwrap().len();
        assert!(count >= 2, "expected several cycles, got {}", count);
        assert!(presenter.errors.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_reports_and_retries_same_tick() {
        let presenter = Arc::new(CollectingPresenter::default());
        let source = Arc::new(StubSource::new(30).failing_first(1));
        let mut ctl = controller(source, presenter.clone());
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            ctl.run(rx).await;
        });

        tokio::time::sleep(Duration::from_secs(20)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        let errors = presenter.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("data source unavailable"));
        // The retried tick succeeded afterwards
        assert!(!presenter.snapshots.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_signal_preempts_sleep() {
        let presenter = Arc::new(CollectingPresenter::default());
        let mut ctl = controller(Arc::new(StubSource::new(30)), presenter.clone());
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            ctl.run(rx).await;
        });

        // Let the first cycle complete, then stop mid-sleep
        tokio::time::sleep(Duration::from_secs(1)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        assert_eq!(presenter.snapshots.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_short_fetch_triggers_extended_load() {
        struct ShortThenLong {
            calls: AtomicU32,
        }

        #[async_trait]
        impl BarSource for ShortThenLong {
            async fn fetch_bars(
                &self,
                _pair: &str,
                _timeframe: Timeframe,
                load_count: u32,
            ) -> Result<Vec<Bar>, DataError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                let n = if load_count == 0 { 5 } else { 60 };
                Ok((0..n)
                    .map(|i| {
                        let close = 100.0 + i as f64;
                        Bar::new((i as i64) * 30_000, close, close, close, close)
                    })
                    .collect())
            }

            fn name(&self) -> &str {
                "short-then-long"
            }
        }

        let source = ShortThenLong {
            calls: AtomicU32::new(0),
        };
        let mut settings = WatchSettings::default();
        settings.min_bars = 30;

        let bars = fetch_window(&source, &settings).await.unwrap();
        assert_eq!(bars.len(), 60);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
