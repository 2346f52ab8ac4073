//! Polling controller for the metrics detail screen

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::debug;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::view::{DetailView, FetchMode, Snapshot};
use crate::client::models::DecisionQuery;
use crate::client::{InstanceApi, MetricsApi};
use crate::error::Result;

/// Polling settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Time between background refreshes
    pub interval: Duration,
    pub metrics_limit: usize,
    pub decisions_limit: usize,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            metrics_limit: 50,
            decisions_limit: 20,
        }
    }
}

/// One fetch cycle: metrics, decisions and the instance list are requested
/// concurrently and combined once all three have settled. The first failure,
/// in that order, is the cycle's error.
pub async fn fetch_snapshot<C>(
    client: &C,
    instance_id: &str,
    options: &PollOptions,
) -> Result<Snapshot>
where
    C: InstanceApi + MetricsApi + ?Sized,
{
    let (metrics, decisions, instances) = futures::join!(
        client.get_metrics(instance_id, options.metrics_limit),
        client.get_decisions(instance_id, DecisionQuery::Limit(options.decisions_limit)),
        client.list_instances(),
    );

    let metrics = metrics?;
    let decisions = decisions?.decisions;
    let instance = instances?
        .into_iter()
        .find(|i| i.instance_id == instance_id);

    Ok(Snapshot {
        instance,
        metrics,
        decisions,
    })
}

/// State shared between the controller and its timer task
struct Shared<C> {
    client: Arc<C>,
    options: PollOptions,
    view: watch::Sender<DetailView>,
    /// Source of cycle ids
    cycles: AtomicU64,
    /// Bumped on every subject change; a timer only fetches while its
    /// generation is current
    generation: AtomicU64,
}

impl<C> Shared<C>
where
    C: InstanceApi + MetricsApi + 'static,
{
    async fn fetch(&self, subject: &str, mode: FetchMode) {
        let cycle = self.cycles.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Cycle {} ({:?}) for {}", cycle, mode, subject);

        self.view.send_if_modified(|view| view.begin(cycle, mode));

        let outcome = fetch_snapshot(self.client.as_ref(), subject, &self.options)
            .await
            .map_err(|e| e.to_string());

        self.view
            .send_if_modified(|view| view.apply(cycle, subject, mode, outcome));
    }
}

/// Owns the detail view for one instance at a time and the timer that
/// refreshes it.
///
/// At most one timer is live: switching subject or deactivating aborts the
/// current one before anything else happens, and dropping the controller
/// aborts it too.
pub struct DetailController<C> {
    shared: Arc<Shared<C>>,
    subject: Option<String>,
    timer: Option<JoinHandle<()>>,
}

impl<C> DetailController<C>
where
    C: InstanceApi + MetricsApi + 'static,
{
    pub fn new(client: Arc<C>, options: PollOptions) -> Self {
        let (view, _) = watch::channel(DetailView::default());
        Self {
            shared: Arc::new(Shared {
                client,
                options,
                view,
                cycles: AtomicU64::new(0),
                generation: AtomicU64::new(0),
            }),
            subject: None,
            timer: None,
        }
    }

    /// Receive the view every time it changes
    pub fn subscribe(&self) -> watch::Receiver<DetailView> {
        self.shared.view.subscribe()
    }

    pub fn is_polling(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Show `instance_id`: cancel the current timer, start a new one for
    /// this subject, then run a foreground fetch.
    ///
    /// Activating the subject that is already being polled does nothing.
    pub async fn activate(&mut self, instance_id: &str) {
        if self.subject.as_deref() == Some(instance_id) && self.is_polling() {
            return;
        }

        self.cancel_timer();
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let floor = self.shared.cycles.load(Ordering::SeqCst);
        self.shared
            .view
            .send_replace(DetailView::for_subject(instance_id, floor));
        self.subject = Some(instance_id.to_string());

        self.timer = Some(spawn_timer(
            self.shared.clone(),
            instance_id.to_string(),
            generation,
        ));
        self.shared
            .fetch(instance_id, FetchMode::Foreground)
            .await;
    }

    /// User-triggered foreground fetch for the current subject
    pub async fn refresh(&self) {
        if let Some(subject) = &self.subject {
            self.shared.fetch(subject, FetchMode::Foreground).await;
        }
    }

    /// Tear the screen down: no further fetches for any subject
    pub fn deactivate(&mut self) {
        self.cancel_timer();
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        self.subject = None;
    }
}

impl<C> DetailController<C> {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            debug!("Cancelled poll timer for {:?}", self.subject);
        }
    }
}

impl<C> Drop for DetailController<C> {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

fn spawn_timer<C>(shared: Arc<Shared<C>>, subject: String, generation: u64) -> JoinHandle<()>
where
    C: InstanceApi + MetricsApi + 'static,
{
    tokio::spawn(async move {
        let period = shared.options.interval;
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if shared.generation.load(Ordering::SeqCst) != generation {
                break;
            }
            shared.fetch(&subject, FetchMode::Background).await;
        }
    })
}
