use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;

/// Marks a request kind as running. A second `try_begin` fails until the
/// guard of the first one is dropped.
#[derive(Clone, Debug, Default)]
pub struct InFlight(Rc<Cell<bool>>);

impl InFlight {
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        if self.0.replace(true) {
            None
        } else {
            Some(InFlightGuard(self.0.clone()))
        }
    }

    pub fn is_active(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug)]
pub struct InFlightGuard(Rc<Cell<bool>>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Per request kind counter. Only the response of the newest request is current.
#[derive(Clone, Debug, Default)]
pub struct Generation(Rc<Cell<u64>>);

impl Generation {
    pub fn begin(&self) -> Ticket {
        let id = self.0.get() + 1;
        self.0.set(id);
        Ticket {
            id,
            latest: self.0.clone(),
        }
    }
}

#[derive(Debug)]
pub struct Ticket {
    id: u64,
    latest: Rc<Cell<u64>>,
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.latest.get() == self.id
    }

    /// Hands `value` back only while no newer request of the same kind began.
    pub fn settle<T>(&self, value: T) -> Option<T> {
        self.is_current().then_some(value)
    }
}

pub struct PollHandle {
    interval: Interval,
}

impl PollHandle {
    /// Keep polling for the lifetime of the page.
    pub fn forget(self) {
        let _ = self.interval.forget();
    }

    pub fn cancel(self) {
        let _ = self.interval.cancel();
    }
}

/// Runs `task` right away and then every `period_ms`. Ticks that fire while
/// the previous run is still pending are skipped.
pub fn start<F, Fut>(period_ms: u32, task: F) -> PollHandle
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let task = Rc::new(task);
    let in_flight = InFlight::default();
    let tick = move || match admit_tick(&in_flight, task.as_ref()) {
        Some(run) => spawn_local(run),
        None => web_sys::console::log_1(&"[Poller] previous request still in flight, skipping tick".into()),
    };
    tick.clone()();
    PollHandle {
        interval: Interval::new(period_ms, tick),
    }
}

/// One tick: `None` when the previous run still holds the guard, otherwise
/// the run to spawn. The guard is released when that run completes or is
/// dropped.
fn admit_tick<F, Fut>(in_flight: &InFlight, task: &F) -> Option<impl Future<Output = ()> + 'static>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    let guard = in_flight.try_begin()?;
    let fut = task();
    Some(async move {
        fut.await;
        drop(guard);
    })
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn in_flight_blocks_until_guard_drops() {
        let in_flight = InFlight::default();
        let guard = in_flight.try_begin().expect("first begin");
        assert!(in_flight.is_active());
        assert!(in_flight.try_begin().is_none());
        drop(guard);
        assert!(!in_flight.is_active());
        assert!(in_flight.try_begin().is_some());
    }

    #[test]
    fn clones_share_state() {
        let a = InFlight::default();
        let b = a.clone();
        let _guard = a.try_begin().unwrap();
        assert!(b.try_begin().is_none());
    }

    #[test]
    fn tick_is_skipped_while_previous_run_pending() {
        let in_flight = InFlight::default();
        let runs = Rc::new(Cell::new(0));
        let task = {
            let runs = runs.clone();
            move || {
                runs.set(runs.get() + 1);
                async {}
            }
        };

        let pending = admit_tick(&in_flight, &task).expect("first tick runs");
        assert!(admit_tick(&in_flight, &task).is_none());
        assert_eq!(runs.get(), 1);

        block_on(pending);
        assert!(!in_flight.is_active());
        let next = admit_tick(&in_flight, &task).expect("runs again once finished");
        assert_eq!(runs.get(), 2);
        block_on(next);
    }

    #[test]
    fn dropped_run_releases_the_guard() {
        let in_flight = InFlight::default();
        let task = || async {};
        let pending = admit_tick(&in_flight, &task);
        assert!(in_flight.is_active());
        drop(pending);
        assert!(!in_flight.is_active());
    }

    #[test]
    fn only_newest_ticket_is_current() {
        let generation = Generation::default();
        let first = generation.begin();
        assert!(first.is_current());
        let second = generation.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn superseded_result_is_not_settled() {
        let generation = Generation::default();
        let older = generation.begin();
        let newer = generation.begin();
        assert_eq!(older.settle("old results"), None);
        assert_eq!(newer.settle("new results"), Some("new results"));
    }

    #[test]
    fn generations_are_per_kind() {
        let search = Generation::default();
        let status = Generation::default();
        let s = search.begin();
        let _ = status.begin();
        let _ = status.begin();
        assert_eq!(s.settle(1), Some(1));
    }
}
