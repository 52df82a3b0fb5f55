//! Periodic regeneration of the gallery page.
//!
//! The page tells browsers to reload every half hour; `photowall watch`
//! keeps the file behind it fresh without an external scheduler.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::{interval, MissedTickBehavior};

use crate::app::{AppContext, Result};
use crate::cli::commands;

/// Longest accepted interval. Anything larger overflows timer deadlines.
pub const MAX_INTERVAL_SECS: u64 = 365 * 86400;

#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Regeneration interval in seconds (default: 1800 = 30 minutes)
    pub interval_secs: u64,
    /// Whether to generate immediately on start
    pub update_on_start: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: 1800,
            update_on_start: true,
        }
    }
}

impl WatchConfig {
    /// Parse interval string like "90s", "30m", "6h", "1d", or raw seconds.
    pub fn parse_interval(s: &str) -> std::result::Result<u64, String> {
        let s = s.trim().to_lowercase();

        let (digits, unit, name) = if let Some(hours) = s.strip_suffix('h') {
            (hours, 3600u64, "hours")
        } else if let Some(minutes) = s.strip_suffix('m') {
            (minutes, 60, "minutes")
        } else if let Some(days) = s.strip_suffix('d') {
            (days, 86400, "days")
        } else if let Some(secs) = s.strip_suffix('s') {
            (secs, 1, "seconds")
        } else {
            (s.as_str(), 1, "interval")
        };

        let count = digits.parse::<u64>().map_err(|_| match name {
            "interval" => format!("Invalid interval: {}. Use format like '30m', '1h', '1d'", s),
            _ => format!("Invalid {}: {}", name, digits),
        })?;
        let secs = count
            .checked_mul(unit)
            .filter(|secs| *secs <= MAX_INTERVAL_SECS)
            .ok_or_else(|| format!("Interval too large: {} (max 365d)", s))?;

        if secs == 0 {
            return Err("Interval must be greater than zero".to_string());
        }
        Ok(secs)
    }

    /// Format interval for display
    pub fn format_interval(secs: u64) -> String {
        if secs >= 86400 && secs % 86400 == 0 {
            format!("{}d", secs / 86400)
        } else if secs >= 3600 && secs % 3600 == 0 {
            format!("{}h", secs / 3600)
        } else if secs >= 60 && secs % 60 == 0 {
            format!("{}m", secs / 60)
        } else {
            format!("{}s", secs)
        }
    }
}

pub struct Watcher {
    ctx: Arc<AppContext>,
    config: WatchConfig,
}

impl Watcher {
    pub fn new(ctx: Arc<AppContext>, config: WatchConfig) -> Self {
        Self { ctx, config }
    }

    /// Regenerate on every tick until SIGINT or SIGTERM.
    pub async fn run(&self) -> Result<()> {
        tracing::info!(
            "Watching {} sources (interval: {})",
            self.ctx.aggregator.sources().len(),
            WatchConfig::format_interval(self.config.interval_secs)
        );

        let mut timer = interval(Duration::from_secs(self.config.interval_secs));
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        if !self.config.update_on_start {
            timer.tick().await; // Skip the first immediate tick
        }

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                signal = &mut shutdown => {
                    signal?;
                    break;
                }
                _ = timer.tick() => self.run_cycle().await,
            }
        }

        tracing::info!("Watch stopped");
        Ok(())
    }

    /// One generation pass. Failures are logged; the previous page stays in place.
    async fn run_cycle(&self) {
        let start = Instant::now();

        match commands::generate(&self.ctx).await {
            Ok(count) => tracing::info!(
                "Regenerated with {} photos ({:.1}s)",
                count,
                start.elapsed().as_secs_f64()
            ),
            Err(e) => tracing::error!("Regeneration failed: {}", e),
        }
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => {},
        _ = sigint.recv() => {},
    }
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}
