//! Log capture for tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    Layer,
};

struct ErrorCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Runs `f` under a thread-local subscriber and returns its output together
/// with the number of `ERROR` events it emitted.
pub(crate) fn count_errors<R>(f: impl FnOnce() -> R) -> (R, usize) {
    let counter = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorCounter(Arc::clone(&counter)));
    let output = tracing::subscriber::with_default(subscriber, f);
    (output, counter.load(Ordering::SeqCst))
}
