use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, Timelike};
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::{app::Publish, config::ActiveWindow, shutdown::Shutdown};

pub trait Clock: Send + Sync {
    /// Current hour of the day, 0-23.
    fn current_hour(&self) -> u32;
}

pub struct LocalClock;

#[async_trait]
pub trait Ticks: Send {
    /// Waits for the next tick. `false` once the source is exhausted.
    async fn tick(&mut self) -> bool;
}

/// Fixed-period ticks. The first one fires immediately; no alignment to the hour.
pub struct IntervalTicks(Interval);

/// Posts once per tick while the clock is inside the active window.
pub struct Scheduler<C> {
    window: ActiveWindow,
    clock: C,
}

impl Clock for LocalClock {
    fn current_hour(&self) -> u32 {
        Local::now().hour()
    }
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self(interval)
    }
}
#[async_trait]
impl Ticks for IntervalTicks {
    async fn tick(&mut self) -> bool {
        self.0.tick().await;
        true
    }
}

impl<C: Clock> Scheduler<C> {
    pub fn new(window: ActiveWindow, clock: C) -> Self {
        Self { window, clock }
    }

    pub async fn run<T, P>(&self, mut ticks: T, publisher: &P, mut shutdown: Shutdown)
    where
        T: Ticks,
        P: Publish + ?Sized,
    {
        info!(window = %self.window, "Scheduler started");

        loop {
            tokio::select! {
                _ = shutdown.wait() => {
                    info!("Scheduler stopped");
                    return;
                }
                ticked = ticks.tick() => {
                    if !ticked {
                        return;
                    }
                    self.on_tick(publisher).await;
                }
            }
        }
    }

    async fn on_tick<P: Publish + ?Sized>(&self, publisher: &P) {
        let hour = self.clock.current_hour();
        if !self.window.contains(hour) {
            debug!(hour, "Outside active window, skipping");
            return;
        }

        publisher.publish(None).await;
    }
}
