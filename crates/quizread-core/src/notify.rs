//! Transient, self-expiring user notifications.
//!
//! The queue keeps messages in insertion order (which is display order) and
//! gives each one an auto-dismiss task. Ids are assigned from a counter that
//! only ever goes up, so they stay unique for the life of the process even
//! as entries come and go.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Auto-dismiss delay applied by the convenience constructors.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub duration: Duration,
}

struct Inner {
    notifications: Vec<Notification>,
    timers: HashMap<u64, JoinHandle<()>>,
    next_id: u64,
}

/// Ordered queue of transient messages. Clones are cheap handles onto the
/// same queue, so one instance can serve the whole process.
///
/// Locks are held only for short, non-awaited critical sections.
#[derive(Clone)]
pub struct NotificationQueue {
    inner: Arc<Mutex<Inner>>,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                notifications: Vec::new(),
                timers: HashMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Append a notification and schedule its auto-dismiss. Returns the
    /// assigned id immediately; expiry happens in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(
        &self,
        title: &str,
        message: &str,
        kind: NotificationKind,
        duration: Duration,
    ) -> u64 {
        let id = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.notifications.push(Notification {
                id,
                title: title.to_string(),
                message: message.to_string(),
                kind,
                duration,
            });
            id
        };
        debug!(id, title, "Notification shown");

        let shared = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            // Already-removed entries make this a no-op.
            remove_entry(&shared, id);
        });

        let mut inner = self.inner.lock();
        if inner.notifications.iter().any(|n| n.id == id) {
            inner.timers.insert(id, handle);
        }
        // Otherwise the timer won the race and already cleaned up; the
        // finished handle needs no tracking.

        id
    }

    /// Remove by id and cancel its timer. Total and idempotent: unknown ids
    /// are ignored, and a timer that already fired aborts as a no-op.
    pub fn remove(&self, id: u64) {
        if let Some(handle) = remove_entry(&self.inner, id) {
            handle.abort();
        }
    }

    pub fn info(&self, title: &str, message: &str) -> u64 {
        self.show(title, message, NotificationKind::Info, DEFAULT_DURATION)
    }

    pub fn success(&self, title: &str, message: &str) -> u64 {
        self.show(title, message, NotificationKind::Success, DEFAULT_DURATION)
    }

    pub fn error(&self, title: &str, message: &str) -> u64 {
        self.show(title, message, NotificationKind::Error, DEFAULT_DURATION)
    }

    /// Snapshot in display order (oldest first).
    pub fn items(&self) -> Vec<Notification> {
        self.inner.lock().notifications.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().notifications.is_empty()
    }
}

/// Drop the entry and surrender its timer handle, if either exists.
fn remove_entry(inner: &Mutex<Inner>, id: u64) -> Option<JoinHandle<()>> {
    let mut inner = inner.lock();
    if let Some(pos) = inner.notifications.iter().position(|n| n.id == id) {
        inner.notifications.remove(pos);
        debug!(id, "Notification removed");
    }
    inner.timers.remove(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Give spawned timer tasks a chance to run on the paused runtime.
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_strictly_increase_across_removals() {
        let queue = NotificationQueue::new();

        let a = queue.info("A", "first");
        let b = queue.info("B", "second");
        queue.remove(a);
        let c = queue.info("C", "third");

        assert_eq!((a, b, c), (1, 2, 3));
        let ids: Vec<u64> = queue.items().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_display_order_is_insertion_order() {
        let queue = NotificationQueue::new();
        queue.success("one", "");
        queue.error("two", "");
        queue.info("three", "");

        let titles: Vec<String> = queue.items().iter().map(|n| n.title.clone()).collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_twice_is_noop() {
        let queue = NotificationQueue::new();
        let id = queue.info("T", "M");

        queue.remove(id);
        assert!(queue.is_empty());
        queue.remove(id); // second removal must not panic or resurrect anything
        assert!(queue.is_empty());

        // An id that never existed is equally fine
        queue.remove(999);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_no_earlier_than_duration() {
        let queue = NotificationQueue::new();
        queue.show("T", "M", NotificationKind::Info, Duration::from_millis(5000));
        // Let the dismiss task start its clock before advancing time
        settle().await;

        tokio::time::advance(Duration::from_millis(4999)).await;
        settle().await;
        assert_eq!(queue.items().len(), 1, "must survive until the full duration");

        tokio::time::advance(Duration::from_millis(2)).await;
        settle().await;
        assert!(queue.is_empty(), "must be gone once the duration elapsed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_remove_cancels_timer() {
        let queue = NotificationQueue::new();
        let id = queue.show("T", "M", NotificationKind::Error, Duration::from_millis(5000));
        let keeper = queue.show("K", "stays", NotificationKind::Info, Duration::from_secs(60));

        queue.remove(id);
        assert_eq!(queue.items().len(), 1);

        // Long past the cancelled timer's deadline nothing else disappears
        tokio::time::advance(Duration::from_millis(10_000)).await;
        settle().await;
        let items = queue.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, keeper);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fire_after_manual_remove_is_consistent() {
        let queue = NotificationQueue::new();
        let id = queue.show("T", "M", NotificationKind::Info, Duration::from_millis(100));
        let other = queue.show("O", "other", NotificationKind::Info, Duration::from_secs(60));

        queue.remove(id);
        tokio::time::advance(Duration::from_millis(200)).await;
        settle().await;

        // The stale timer fired for an id that is already gone; the
        // surviving entry is untouched.
        let ids: Vec<u64> = queue.items().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![other]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_convenience_kinds_and_default_duration() {
        let queue = NotificationQueue::new();
        queue.success("s", "");
        queue.error("e", "");
        queue.info("i", "");

        let items = queue.items();
        assert_eq!(items[0].kind, NotificationKind::Success);
        assert_eq!(items[1].kind, NotificationKind::Error);
        assert_eq!(items[2].kind, NotificationKind::Info);
        assert!(items.iter().all(|n| n.duration == DEFAULT_DURATION));
    }
}
