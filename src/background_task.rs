use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use rand::{rngs::StdRng, SeedableRng};
use tokio::{task::JoinHandle, time::{interval_at, Instant, MissedTickBehavior}};

use crate::entities::live_counter::LiveCounter;

/// Handle to the ticking badge counter. Dropping it stops the timer, so the
/// task never outlives the view that started it.
pub struct CounterHandle {
    counter: Arc<Mutex<LiveCounter>>,
    task: JoinHandle<()>,
}

impl CounterHandle {
    pub fn value(&self) -> i64 {
        self.counter.lock().value()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for CounterHandle {
    fn drop(&mut self) {
        self.task.abort();
        tracing::trace!("Live counter stopped");
    }
}

/// Starts a counter at `seed` that moves one step every `tick`.
pub fn start_live_counter(seed: i64, tick: Duration) -> CounterHandle {
    let counter = Arc::new(Mutex::new(LiveCounter::new(seed)));
    let shared = Arc::clone(&counter);

    let task = tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut ticker = interval_at(Instant::now() + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let value = shared.lock().tick(&mut rng);
            tracing::trace!(value, "Live counter ticked");
        }
    });

    CounterHandle { counter, task }
}
