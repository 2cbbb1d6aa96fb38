use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use platepilot_dev_log::{LogCapture, LogEntry, LogLevel, Subscription};

/// Level filter for the entry feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleFilter {
    #[default]
    All,
    Level(LogLevel),
}

impl ConsoleFilter {
    fn matches(self, level: LogLevel) -> bool {
        match self {
            ConsoleFilter::All => true,
            ConsoleFilter::Level(wanted) => level == wanted,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConsoleFilter::All => "all",
            ConsoleFilter::Level(level) => level.as_str(),
        }
    }
}

/// Stateful presenter for the live log feed.
///
/// Holds a mirror of the capture history (kept current through a
/// subscription), the active level filter, and the set of entries whose
/// details block is expanded. Filtering is local and non-destructive.
pub struct DevConsole {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    filter: ConsoleFilter,
    expanded: BTreeSet<i64>,
    visible: bool,
    subscription: Option<Subscription>,
}

impl DevConsole {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            filter: ConsoleFilter::All,
            expanded: BTreeSet::new(),
            visible: false,
            subscription: None,
        }
    }

    /// Seeds the mirror from the capture's history and subscribes for
    /// live updates. A second mount without an unmount is a no-op.
    pub fn mount(&mut self, capture: &LogCapture) {
        if self.subscription.is_some() {
            return;
        }
        *lock(&self.entries) = capture.entries();

        let mirror = Arc::clone(&self.entries);
        self.subscription = Some(capture.subscribe(move |entry| {
            let mut entries = lock(&mirror);
            if entry.is_clear_sentinel() {
                entries.clear();
            } else {
                entries.push(entry.clone());
            }
        }));
    }

    /// Drops the live subscription. Unsubscribes exactly once no matter
    /// how many times mount/unmount cycles run.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub fn filter(&self) -> ConsoleFilter {
        self.filter
    }

    /// Changes what is displayed; no entries are discarded.
    pub fn set_filter(&mut self, filter: ConsoleFilter) {
        self.filter = filter;
    }

    /// Snapshot of the full (unfiltered) mirror.
    pub fn entries(&self) -> Vec<LogEntry> {
        lock(&self.entries).clone()
    }

    /// Entries passing the active filter, oldest first.
    pub fn visible_entries(&self) -> Vec<LogEntry> {
        lock(&self.entries)
            .iter()
            .filter(|entry| self.filter.matches(entry.level))
            .cloned()
            .collect()
    }

    /// Warning count over the full mirror, regardless of filter.
    pub fn warn_count(&self) -> usize {
        self.count_level(LogLevel::Warn)
    }

    /// Error count over the full mirror, regardless of filter.
    pub fn error_count(&self) -> usize {
        self.count_level(LogLevel::Error)
    }

    fn count_level(&self, level: LogLevel) -> usize {
        lock(&self.entries)
            .iter()
            .filter(|entry| entry.level == level)
            .count()
    }

    /// Toggles the details block of one entry. Entries without details
    /// are not interactive; returns whether the toggle applied.
    pub fn toggle_expanded(&mut self, id: i64) -> bool {
        let has_details = lock(&self.entries)
            .iter()
            .any(|entry| entry.id == id && entry.details.is_some());
        if !has_details {
            return false;
        }
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
        true
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }

    /// Clears the capture history and resets expansion state. The mirror
    /// empties through the clear sentinel, not locally.
    pub fn clear(&mut self, capture: &LogCapture) {
        capture.clear();
        self.expanded.clear();
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Renders the console as text: toolbar with filter buttons and
    /// warn/error badges, the filtered feed with expansion markers, and a
    /// shown/total status line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Dev Console\n");
        out.push_str(&self.render_toolbar());
        out.push('\n');

        let visible = self.visible_entries();
        if visible.is_empty() {
            match self.filter {
                ConsoleFilter::All => out.push_str("No log entries.\n"),
                filter => {
                    out.push_str(&format!("No log entries for \"{}\".\n", filter.name()));
                }
            }
        } else {
            for entry in &visible {
                out.push_str(&self.render_entry(entry));
            }
        }

        let total = lock(&self.entries).len();
        out.push_str(&format!("{}/{} entries\n", visible.len(), total));
        out
    }

    fn render_toolbar(&self) -> String {
        let mut buttons = vec![self.render_button(ConsoleFilter::All, "All", 0)];
        for level in LogLevel::ALL {
            let badge = match level {
                LogLevel::Warn => self.warn_count(),
                LogLevel::Error => self.error_count(),
                _ => 0,
            };
            buttons.push(self.render_button(ConsoleFilter::Level(level), level_label(level), badge));
        }
        format!("filters: {}\n", buttons.join(" "))
    }

    fn render_button(&self, filter: ConsoleFilter, label: &str, badge: usize) -> String {
        let mut text = label.to_owned();
        if badge > 0 {
            text.push_str(&format!("({badge})"));
        }
        if self.filter == filter {
            format!("[{text}]")
        } else {
            text
        }
    }

    fn render_entry(&self, entry: &LogEntry) -> String {
        let mut line = format!(
            "{} [{:<4}] {}",
            entry.timestamp.format("%H:%M:%S"),
            level_label(entry.level),
            entry.message
        );
        if entry.details.is_some() {
            line.push_str(if self.is_expanded(entry.id) {
                " \u{25bc}"
            } else {
                " \u{25b6}"
            });
        }
        line.push('\n');

        if let (Some(details), true) = (&entry.details, self.is_expanded(entry.id)) {
            for detail_line in details.lines() {
                line.push_str(&format!("    {detail_line}\n"));
            }
        }
        line
    }
}

impl Default for DevConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DevConsole {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn level_label(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Log => "LOG",
        LogLevel::Info => "INFO",
        LogLevel::Warn => "WARN",
        LogLevel::Error => "ERR",
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
