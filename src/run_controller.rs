//! The RunController owns one strip's LED vector and decides which run may
//! write into it.  Each run is a spawned task that steps a Scheduler and
//! sleeps through its waits; starting a new run or cancelling the current one
//! locks the old task out before returning.

use crate::common_structs::{Colour, Setting};
use crate::error::EngineError;
use crate::led::{Applied, Frame, LedUpdate, LedVector};
use crate::palette::Palette;
use crate::patterns::resolve;
use crate::random::{RandomSource, SeededRandom};
use crate::scheduler::{Scheduler, Tick};
use crate::timing::{FrameClock, Timing};
use log::{debug, info};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch, Notify};
use tokio::time::Instant;

/// A panicking run task must not take the whole strip down with it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct RunState {
    id: u64,
    setting_id: String,
    pattern: &'static str,

    /// Cleared exactly once, with the LED vector locked
    active: AtomicBool,
    /// Set by the run task on its way out
    finished: AtomicBool,
    cancelled: Notify,
    leds: Arc<Mutex<LedVector>>,
}

/// Token for a started run.  Clones refer to the same run.
#[derive(Clone)]
pub struct RunHandle {
    inner: Arc<RunState>,
}

impl RunHandle {
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn setting_id(&self) -> &str {
        &self.inner.setting_id
    }

    pub fn pattern_name(&self) -> &'static str {
        self.inner.pattern
    }

    /// False once the run has been cancelled or replaced
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// True once the run task has exited
    pub fn is_finished(&self) -> bool {
        self.inner.finished.load(Ordering::SeqCst)
    }

    /// Stop the run.  When this returns the run will not write again.  If it
    /// still held the strip the strip is blanked; a run that was already
    /// replaced leaves its successor alone.  Cancelling twice is harmless.
    pub fn cancel(&self) {
        {
            let mut leds = lock(&self.inner.leds);
            if self.inner.active.swap(false, Ordering::SeqCst) {
                info!("Cancelling run {} ({})", self.inner.id, self.inner.pattern);
            }
            leds.unbind(self.inner.id);
        }
        self.inner.cancelled.notify_waiters();
    }

    /// Deactivate without touching the strip, for a run being replaced.  The
    /// caller holds the LED vector lock.
    fn supersede(&self) {
        if self.inner.active.swap(false, Ordering::SeqCst) {
            info!("Run {} replaced", self.inner.id);
        }
    }

    /// Resolves once the run is no longer active
    async fn cancelled(&self) {
        let notified = self.inner.cancelled.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a cancel in between is not lost
        notified.as_mut().enable();
        if !self.is_active() {
            return;
        }
        notified.await;
    }
}

/// Drives at most one run at a time on one strip
pub struct RunController {
    leds: Arc<Mutex<LedVector>>,
    current: Mutex<Option<RunHandle>>,
    next_id: AtomicU64,
    tick: Option<Duration>,
    runtime: Handle,
}

impl RunController {
    /// A controller with exact waits.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn new() -> Self {
        Self::with_tick(None)
    }

    /// A controller that snaps every wait onto a frame clock of `tick`
    pub fn with_tick(tick: Option<Duration>) -> Self {
        Self {
            leds: Arc::new(Mutex::new(LedVector::new())),
            current: Mutex::new(None),
            next_id: AtomicU64::new(1),
            tick,
            runtime: Handle::current(),
        }
    }

    /// Start a run, replacing whatever was running.  Fails without touching
    /// the current run if the palette is empty or the delay is not positive.
    pub fn start(
        &self,
        setting_id: &str,
        colours: &[Colour],
        delay_ms: i64,
        pattern_id: &str,
    ) -> Result<RunHandle, EngineError> {
        let rng = Box::new(SeededRandom::from_entropy());
        self.start_with_rng(setting_id, colours, delay_ms, pattern_id, rng)
    }

    /// As `start`, with the random draws taken from `rng`
    pub fn start_with_rng(
        &self,
        setting_id: &str,
        colours: &[Colour],
        delay_ms: i64,
        pattern_id: &str,
        rng: Box<dyn RandomSource>,
    ) -> Result<RunHandle, EngineError> {
        let palette = Palette::new(colours.to_vec())?;
        let timing = Timing::from_millis(delay_ms)?;
        let descriptor = resolve(pattern_id);

        let handle = RunHandle {
            inner: Arc::new(RunState {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                setting_id: setting_id.to_string(),
                pattern: descriptor.name,
                active: AtomicBool::new(true),
                finished: AtomicBool::new(false),
                cancelled: Notify::new(),
                leds: self.leds.clone(),
            }),
        };

        // Retiring the old run, blanking the strip and binding the new run
        // all happen under the vector lock
        let previous = {
            let mut leds = lock(&self.leds);
            let mut current = lock(&self.current);
            let previous = current.replace(handle.clone());
            if let Some(previous) = &previous {
                previous.supersede();
            }
            leds.bind(handle.id());
            previous
        };
        if let Some(previous) = previous {
            previous.inner.cancelled.notify_waiters();
        }

        info!(
            "Starting run {} of {} for setting {:?}: {} colours, {}ms delay",
            handle.id(),
            descriptor.name,
            setting_id,
            palette.colour_count(),
            delay_ms
        );
        let scheduler = Scheduler::new(descriptor.build(), palette, timing, rng);
        self.runtime
            .spawn(drive(handle.clone(), scheduler, FrameClock::new(self.tick)));
        Ok(handle)
    }

    /// Validate a whole setting, then start it
    pub fn start_setting(&self, setting: &Setting) -> Result<RunHandle, EngineError> {
        setting.validate()?;
        self.start(
            &setting.name,
            &setting.colors,
            setting.delay_time,
            &setting.flashing_pattern,
        )
    }

    /// Cancel `handle`, and forget it if it is the current run
    pub fn cancel(&self, handle: &RunHandle) {
        handle.cancel();
        let mut current = lock(&self.current);
        if current.as_ref().map(RunHandle::id) == Some(handle.id()) {
            *current = None;
        }
    }

    /// Cancel whatever is running
    pub fn stop(&self) {
        let current = lock(&self.current).take();
        if let Some(handle) = current {
            handle.cancel();
        }
    }

    pub fn current(&self) -> Option<RunHandle> {
        lock(&self.current).clone()
    }

    pub fn snapshot(&self) -> LedUpdate {
        lock(&self.leds).snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<LedUpdate> {
        lock(&self.leds).subscribe()
    }

    pub fn subscribe_frames(&self) -> broadcast::Receiver<Frame> {
        lock(&self.leds).subscribe_frames()
    }
}

impl Drop for RunController {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The body of a run task
async fn drive(handle: RunHandle, mut scheduler: Scheduler, mut clock: FrameClock) {
    let run = &handle.inner;
    let mut deadline = Instant::now();

    loop {
        match scheduler.next_tick() {
            Tick::Frame(mutations) => {
                let mut leds = lock(&run.leds);
                if !run.active.load(Ordering::SeqCst) {
                    break;
                }
                if leds.apply(run.id, &mutations) == Applied::StaleRunIgnored {
                    break;
                }
            }
            Tick::Wait(wait) => {
                // Deadlines are absolute so a late wake-up is caught up on
                // the next wait instead of pushing everything back
                deadline = match deadline.checked_add(clock.quantise(wait)) {
                    Some(deadline) => deadline,
                    None => {
                        handle.cancelled().await;
                        break;
                    }
                };
                tokio::select! {
                    _ = tokio::time::sleep_until(deadline) => {}
                    _ = handle.cancelled() => break,
                }
            }
            Tick::Hold => {
                debug!("Run {} holding after {} cycles", run.id, scheduler.cycles());
                handle.cancelled().await;
                break;
            }
        }
    }

    run.finished.store(true, Ordering::SeqCst);
    debug!("Run {} of {} finished", run.id, scheduler.pattern_name());
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::InvalidInput;
    use crate::patterns::{FALLBACK, PATTERNS};
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::time::sleep;

    const RED: Colour = Colour::new(255, 0, 0);
    const GREEN: Colour = Colour::new(0, 255, 0);
    const BLUE: Colour = Colour::new(0, 0, 255);

    fn drain(frames: &mut broadcast::Receiver<Frame>) -> Vec<Frame> {
        let mut drained = Vec::new();
        while let Ok(frame) = frames.try_recv() {
            drained.push(frame);
        }
        drained
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_input_is_refused() {
        let controller = RunController::new();
        let running = controller.start("a", &[RED], 10, "7").unwrap();

        let err = controller.start("b", &[], 10, "7").err();
        assert_eq!(err, Some(EngineError::InvalidInput(InvalidInput::EmptyPalette)));
        let err = controller.start("b", &[RED], 0, "7").err();
        assert_eq!(
            err,
            Some(EngineError::InvalidInput(InvalidInput::NonPositiveDelay(0)))
        );

        assert!(running.is_active());
        assert_eq!(controller.current().unwrap().id(), running.id());
    }

    #[tokio::test(start_paused = true)]
    async fn test_static_run_paints_once() {
        let controller = RunController::new();
        let mut frames = controller.subscribe_frames();
        let handle = controller.start("a", &[RED, GREEN], 5, "0").unwrap();

        sleep(Duration::from_secs(60)).await;
        let painted = drain(&mut frames);
        assert_eq!(painted.len(), 1);
        assert_eq!(controller.snapshot().leds[1], GREEN);
        assert!(handle.is_active());
        assert!(!handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_frames_after_cancel() {
        for descriptor in PATTERNS.iter().chain(std::iter::once(&FALLBACK)) {
            let controller = RunController::new();
            let mut frames = controller.subscribe_frames();
            let handle = controller
                .start_with_rng(
                    "a",
                    &[RED, GREEN, BLUE],
                    1,
                    descriptor.id,
                    Box::new(SeededRandom::new(5)),
                )
                .unwrap();

            sleep(Duration::from_millis(37)).await;
            controller.cancel(&handle);
            assert!(!handle.is_active());
            assert!(controller.snapshot().is_dark());

            let before = drain(&mut frames);
            assert!(!before.is_empty(), "{} never painted", descriptor.name);
            assert!(before.iter().all(|f| f.run == handle.id()));

            sleep(Duration::from_secs(5)).await;
            assert!(
                matches!(frames.try_recv(), Err(TryRecvError::Empty)),
                "{} wrote after being cancelled",
                descriptor.name
            );
            assert!(controller.snapshot().is_dark());
            assert!(handle.is_finished());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_the_run() {
        let controller = RunController::new();
        let first = controller.start("a", &[RED], 5, "0").unwrap();
        sleep(Duration::from_millis(1)).await;
        assert!(!controller.snapshot().is_dark());

        let mut frames = controller.subscribe_frames();
        let second = controller.start("b", &[BLUE], 5, "7").unwrap();
        // Blanked before the new run writes anything
        assert!(controller.snapshot().is_dark());
        assert!(!first.is_active());
        assert!(second.is_active());
        assert_ne!(first.id(), second.id());

        sleep(Duration::from_millis(100)).await;
        assert!(first.is_finished());
        let written = drain(&mut frames);
        assert!(!written.is_empty());
        assert!(written.iter().all(|f| f.run == second.id()));
        assert!(written
            .iter()
            .flat_map(|f| f.mutations.iter())
            .all(|m| m.colour.is_off() || m.colour == BLUE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_cancel_is_harmless() {
        let controller = RunController::new();
        let first = controller.start("a", &[RED], 5, "2").unwrap();
        let second = controller.start("b", &[GREEN], 5, "6").unwrap();
        sleep(Duration::from_millis(1)).await;
        let painted = controller.snapshot();
        assert_eq!(painted.leds[0], GREEN);

        controller.cancel(&first);
        first.cancel();
        assert_eq!(controller.snapshot(), painted);
        assert!(second.is_active());
        assert_eq!(controller.current().unwrap().id(), second.id());
        assert_eq!(second.pattern_name(), "still");
        assert_eq!(second.setting_id(), "b");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let controller = RunController::new();
        let handle = controller.start("a", &[RED, GREEN], 2, "11").unwrap();
        sleep(Duration::from_millis(10)).await;

        handle.cancel();
        handle.cancel();
        controller.cancel(&handle);
        controller.stop();
        controller.stop();
        assert!(controller.current().is_none());
        assert!(controller.snapshot().is_dark());
        sleep(Duration::from_millis(10)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_clock() {
        let tick = Duration::from_millis(16);
        let controller = RunController::with_tick(Some(tick));
        let mut frames = controller.subscribe_frames();
        controller.start("a", &[RED, GREEN], 5, "7").unwrap();

        sleep(Duration::from_secs(2)).await;
        let written = drain(&mut frames);
        assert!(written.len() > 10);
        let start = written[0].at;
        for frame in &written {
            assert_eq!((frame.at - start).as_nanos() % tick.as_nanos(), 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_strips_are_independent() {
        let left = RunController::new();
        let right = RunController::new();
        let mut right_frames = right.subscribe_frames();
        let l = left.start("a", &[RED], 1, "5").unwrap();
        let r = right.start("a", &[GREEN], 1, "5").unwrap();
        assert_eq!(l.id(), r.id());

        sleep(Duration::from_millis(5)).await;
        left.stop();
        drain(&mut right_frames);
        sleep(Duration::from_millis(20)).await;
        assert!(r.is_active());
        assert!(!drain(&mut right_frames).is_empty());
        assert!(left.snapshot().is_dark());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_setting_checks_channels() {
        let controller = RunController::new();
        let mut setting = Setting {
            name: "Friday".to_string(),
            colors: vec![RED, GREEN],
            white_values: vec![1, 2, 3],
            brightness_values: vec![],
            flashing_pattern: "9".to_string(),
            delay_time: 20,
        };
        assert!(controller.start_setting(&setting).is_err());
        assert!(controller.current().is_none());

        setting.white_values = vec![1, 2];
        let handle = controller.start_setting(&setting).unwrap();
        assert_eq!(handle.pattern_name(), "trace_many");
        sleep(Duration::from_millis(1)).await;
        assert!(controller.snapshot().leds.iter().all(|c| *c == RED));
    }
}
