//! Process-wide log capture: interception, bounded history, fanout.

use std::cell::Cell;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe, PanicHookInfo};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use chrono::Utc;
use futures_util::FutureExt;

use crate::console::{Console, Sink};
use crate::entry::{CLEAR_SENTINEL_ID, LogEntry, LogLevel, extract_details, format_message};
use crate::value::{ConsoleValue, ErrorInfo};

/// Default maximum number of retained entries.
pub const DEFAULT_CAPACITY: usize = 500;

/// Message of the sentinel entry emitted by [`LogCapture::clear`].
const CLEAR_MESSAGE: &str = "--- Console cleared ---";

const UNCAUGHT_PREFIX: &str = "Uncaught: ";
const REJECTION_PREFIX: &str = "Unhandled Rejection: ";

type Listener = Arc<dyn Fn(&LogEntry) + Send + Sync>;
type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static>;

thread_local! {
    // Set while subscriber fanout runs on this thread. Emissions from
    // inside a listener are forwarded but never re-recorded, and a
    // listener panic (caught at the notification site) must not synthesize
    // an uncaught-panic entry.
    static IN_FANOUT: Cell<bool> = const { Cell::new(false) };
}

/// Process-wide log capture.
///
/// Owns the bounded entry ring and the subscriber registry, and installs
/// or removes interception of the four console channels plus the panic
/// hook. Construction never installs anything; lifecycle is driven
/// explicitly through [`install`](LogCapture::install) and
/// [`uninstall`](LogCapture::uninstall), both idempotent.
#[derive(Clone)]
pub struct LogCapture {
    inner: Arc<CaptureInner>,
}

struct CaptureInner {
    console: Arc<Console>,
    capacity: usize,
    next_id: AtomicI64,
    next_token: AtomicU64,
    entries: Mutex<VecDeque<LogEntry>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    install: Mutex<InstallState>,
    // Shared with the panic-hook wrapper so the original hook keeps
    // firing even if the capture is dropped while installed.
    prev_hook: Arc<Mutex<Option<PanicHook>>>,
}

#[derive(Default)]
struct InstallState {
    installed: bool,
    originals: Option<[Sink; 4]>,
}

impl LogCapture {
    /// Creates a capture over `console` with the default capacity.
    pub fn new(console: Arc<Console>) -> Self {
        Self::with_capacity(console, DEFAULT_CAPACITY)
    }

    /// Creates a capture with a custom ring capacity.
    pub fn with_capacity(console: Arc<Console>, capacity: usize) -> Self {
        Self {
            inner: Arc::new(CaptureInner {
                console,
                capacity,
                next_id: AtomicI64::new(1),
                next_token: AtomicU64::new(1),
                entries: Mutex::new(VecDeque::new()),
                listeners: Mutex::new(Vec::new()),
                install: Mutex::new(InstallState::default()),
                prev_hook: Arc::new(Mutex::new(None)),
            }),
        }
    }

    /// Installs console and panic interception. Safe to call repeatedly.
    ///
    /// Each channel sink is swapped for a wrapper that records an entry
    /// and then forwards the unchanged arguments to the exact original
    /// sink, so the underlying side effect still occurs once the entry is
    /// observable. The current panic hook is taken, stored, and replaced
    /// with one that records an error entry before invoking it.
    pub fn install(&self) {
        let mut state = lock(&self.inner.install);
        if state.installed {
            return;
        }
        state.installed = true;

        let originals = LogLevel::ALL.map(|level| {
            let channel = self.inner.console.channel(level);
            let original = channel.current();
            let forward = Arc::clone(&original);
            let weak = Arc::downgrade(&self.inner);
            let wrapper: Sink = Arc::new(move |args| {
                if let Some(inner) = weak.upgrade() {
                    inner.record(level, args);
                }
                forward(args);
            });
            channel.replace(wrapper);
            original
        });
        state.originals = Some(originals);

        *lock(&self.inner.prev_hook) = Some(panic::take_hook());
        let weak = Arc::downgrade(&self.inner);
        let prev_slot = Arc::clone(&self.inner.prev_hook);
        panic::set_hook(Box::new(move |info| {
            if let Some(inner) = weak.upgrade() {
                inner.record_panic(info);
            }
            if let Some(prev) = lock(&prev_slot).as_ref() {
                prev(info);
            }
        }));

        tracing::debug!("log capture installed");
    }

    /// Removes all interception, restoring the exact original sinks and
    /// the original panic hook. Safe to call when not installed.
    pub fn uninstall(&self) {
        let mut state = lock(&self.inner.install);
        if !state.installed {
            return;
        }
        state.installed = false;

        if let Some(originals) = state.originals.take() {
            for (level, original) in LogLevel::ALL.into_iter().zip(originals) {
                self.inner.console.channel(level).replace(original);
            }
        }

        // Putting the stored box itself back means repeated
        // install/uninstall cycles never stack hook wrappers.
        if let Some(prev) = lock(&self.inner.prev_hook).take() {
            panic::set_hook(prev);
        }

        tracing::debug!("log capture uninstalled");
    }

    /// Registers a listener for every future entry and clear sentinel, in
    /// emission order. History is not replayed.
    pub fn subscribe(
        &self,
        listener: impl Fn(&LogEntry) + Send + Sync + 'static,
    ) -> Subscription {
        let token = self.inner.next_token.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.listeners).push((token, Arc::new(listener)));
        Subscription {
            token,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// A snapshot of all retained entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        lock(&self.inner.entries).iter().cloned().collect()
    }

    /// Discards all entries and notifies subscribers with a single clear
    /// sentinel (`id = -1`). Installation state is unaffected.
    pub fn clear(&self) {
        lock(&self.inner.entries).clear();
        let sentinel = LogEntry {
            id: CLEAR_SENTINEL_ID,
            timestamp: Utc::now(),
            level: LogLevel::Info,
            message: CLEAR_MESSAGE.to_owned(),
            details: None,
        };
        self.inner.notify(&sentinel);
    }

    /// Records an unhandled asynchronous rejection.
    ///
    /// Fault entry point for task failures delivered outside the normal
    /// call stack; bypasses the four channel wrappers.
    pub fn handle_rejection(&self, reason: ConsoleValue) {
        self.inner.record_rejection(&reason);
    }
}

impl CaptureInner {
    fn record(&self, level: LogLevel, args: &[ConsoleValue]) {
        if IN_FANOUT.get() {
            return;
        }
        let entry = LogEntry {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            timestamp: Utc::now(),
            level,
            message: format_message(args),
            details: extract_details(args),
        };
        self.push(entry);
    }

    fn record_panic(&self, info: &PanicHookInfo<'_>) {
        if IN_FANOUT.get() {
            return;
        }
        let backtrace = std::backtrace::Backtrace::capture();
        let details = if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            backtrace.to_string()
        } else if let Some(location) = info.location() {
            format!("{}:{}:{}", location.file(), location.line(), location.column())
        } else {
            "unknown location".to_owned()
        };
        let entry = LogEntry {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            timestamp: Utc::now(),
            level: LogLevel::Error,
            message: format!("{UNCAUGHT_PREFIX}{}", payload_text(info)),
            details: Some(details),
        };
        self.push(entry);
    }

    fn record_rejection(&self, reason: &ConsoleValue) {
        if IN_FANOUT.get() {
            return;
        }
        let (message, details) = match reason {
            ConsoleValue::Error(info) => (info.message.clone(), info.trace.clone()),
            ConsoleValue::Text(text) => (text.clone(), None),
            ConsoleValue::Data(value) => (value.to_string(), None),
        };
        let entry = LogEntry {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            timestamp: Utc::now(),
            level: LogLevel::Error,
            message: format!("{REJECTION_PREFIX}{message}"),
            details,
        };
        self.push(entry);
    }

    fn push(&self, entry: LogEntry) {
        {
            let mut entries = lock(&self.entries);
            entries.push_back(entry.clone());
            while entries.len() > self.capacity {
                entries.pop_front();
            }
        }
        self.notify(&entry);
    }

    fn notify(&self, entry: &LogEntry) {
        // Snapshot so listeners may unsubscribe (themselves included)
        // mid-notification; removal takes effect for the next event.
        let snapshot: Vec<Listener> = lock(&self.listeners)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        IN_FANOUT.set(true);
        for listener in snapshot {
            // A broken listener must not break logging or reach the
            // emitter of the intercepted call.
            let _ = panic::catch_unwind(AssertUnwindSafe(|| listener(entry)));
        }
        IN_FANOUT.set(false);
    }
}

/// Handle for removing a registered listener.
///
/// `unsubscribe` is idempotent; dropping the handle also unsubscribes.
#[must_use = "dropping the subscription immediately removes the listener"]
pub struct Subscription {
    token: u64,
    inner: Weak<CaptureInner>,
}

impl Subscription {
    /// Deregisters the listener. Calling more than once has no effect
    /// after the first.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner.listeners).retain(|(token, _)| *token != self.token);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Spawns a fallible future and routes its failure (error return or
/// panic) into the capture's rejection channel.
pub fn spawn_monitored<F, T, E>(
    capture: LogCapture,
    future: F,
) -> tokio::task::JoinHandle<Option<T>>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    tokio::spawn(async move {
        match AssertUnwindSafe(future).catch_unwind().await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(err)) => {
                capture.handle_rejection(ConsoleValue::Error(ErrorInfo::from_error(&err)));
                None
            }
            Err(payload) => {
                let text = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_owned())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "Box<dyn Any>".to_owned());
                capture.handle_rejection(ConsoleValue::Text(text));
                None
            }
        }
    })
}

fn payload_text(info: &PanicHookInfo<'_>) -> String {
    if let Some(text) = info.payload().downcast_ref::<&str>() {
        (*text).to_owned()
    } else if let Some(text) = info.payload().downcast_ref::<String>() {
        text.clone()
    } else {
        "Box<dyn Any>".to_owned()
    }
}

// A panicking listener must not poison shared state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
