//! Session runtime: connects the controller to the API client
//!
//! The controller is only ever touched from the task that owns the
//! `Session`. Fetches run as spawned tasks and report back over a channel.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use crate::core::api::{VideoApi, run_fetch};
use crate::core::controller::{Command, Controller, Transition};
use crate::types::{FetchOutcome, FetchRequest};

pub struct Session {
    controller: Controller,
    api: Arc<dyn VideoApi>,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    rx: mpsc::UnboundedReceiver<FetchOutcome>,
    in_flight: usize,
}

impl Session {
    pub fn new(api: Arc<dyn VideoApi>, controller: Controller) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller,
            api,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Issue the initial fetch
    pub fn start(&mut self) {
        let request = self.controller.start();
        self.spawn(request);
    }

    /// Feed one command to the controller.
    ///
    /// Returns `false` once the user asked to quit.
    pub fn dispatch(&mut self, command: Command) -> bool {
        match self.controller.handle(command) {
            Transition::Fetch(request) => {
                self.spawn(request);
                true
            }
            Transition::Idle => true,
            Transition::Exit => false,
        }
    }

    /// Wait until the latest request has been applied.
    ///
    /// Stale outcomes that arrive in the meantime are handed to the
    /// controller, which drops them.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            let Some(outcome) = self.rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            self.controller.apply(outcome);

            if !self.controller.is_loading() {
                break;
            }
        }
    }

    fn spawn(&mut self, request: FetchRequest) {
        debug!(seq = request.seq, in_flight = self.in_flight, "spawning fetch");
        self.in_flight += 1;

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = run_fetch(api.as_ref(), request).await;
            // Receiver only goes away when the session is dropped
            let _ = tx.send(outcome);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fake::FakeApi;
    use crate::types::{FetchKind, SortMode};
    use std::time::Duration;

    fn session(api: &Arc<FakeApi>) -> Session {
        Session::new(api.clone(), Controller::new())
    }

    #[tokio::test]
    async fn test_start_issues_one_list_call() {
        let api = Arc::new(FakeApi::new(25));
        let mut s = session(&api);

        s.start();
        assert!(s.controller().is_loading());
        s.settle().await;

        assert_eq!(api.calls(), vec![FetchKind::List { page: 1, page_size: 12 }]);
        assert!(!s.controller().is_loading());
        assert_eq!(s.controller().videos().len(), 12);
        assert_eq!(s.controller().total(), 25);
    }

    #[tokio::test]
    async fn test_search_flow_hits_search_endpoint() {
        let api = Arc::new(FakeApi::new(30));
        let mut s = session(&api);
        s.start();
        s.settle().await;

        s.dispatch(Command::Input("cats".into()));
        s.dispatch(Command::Submit);
        s.settle().await;
        s.dispatch(Command::Next);
        s.settle().await;

        assert_eq!(
            api.calls().last(),
            Some(&FetchKind::Search {
                query: "cats".into(),
                page: 2,
                page_size: 12
            })
        );
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_last_page_is_partial() {
        let api = Arc::new(FakeApi::new(25));
        let mut s = session(&api);
        s.start();
        s.settle().await;

        for _ in 0..5 {
            s.dispatch(Command::Next);
            s.settle().await;
        }

        assert_eq!(s.controller().page(), 3);
        assert_eq!(s.controller().videos().len(), 1);
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_title_sort_reorders_current_page() {
        let api = Arc::new(FakeApi::new(12));
        let mut s = session(&api);
        s.start();
        s.settle().await;
        assert_eq!(s.controller().videos()[0].id, 1);

        s.dispatch(Command::SetSort(SortMode::Title));
        s.settle().await;
        // Fake titles run backwards, so the last id sorts first
        assert_eq!(s.controller().videos()[0].id, 12);
        assert_eq!(s.controller().videos().len(), 12);
    }

    #[tokio::test]
    async fn test_failure_empties_results() {
        let api = Arc::new(FakeApi::new(25));
        let mut s = session(&api);
        s.start();
        s.settle().await;

        api.set_failing(true);
        s.dispatch(Command::Refresh);
        s.settle().await;

        assert!(s.controller().videos().is_empty());
        assert_eq!(s.controller().total(), 0);
        assert!(!s.controller().is_loading());
    }

    #[tokio::test]
    async fn test_slow_earlier_response_does_not_clobber() {
        let api = Arc::new(FakeApi::new(100).with_delay(2, Duration::from_millis(80)));
        let mut s = session(&api);
        s.start();
        s.settle().await;

        // Page 2 is slow, page 3 answers first
        s.dispatch(Command::Next);
        s.dispatch(Command::Next);
        s.settle().await;
        assert_eq!(s.controller().page(), 3);
        assert_eq!(s.controller().videos()[0].id, 25);

        // Let the stale page-2 response land
        tokio::time::sleep(Duration::from_millis(120)).await;
        s.settle().await;
        assert_eq!(s.controller().videos()[0].id, 25);
        assert!(!s.controller().is_loading());
    }

    #[tokio::test]
    async fn test_quit_stops_dispatch() {
        let api = Arc::new(FakeApi::new(0));
        let mut s = session(&api);
        assert!(!s.dispatch(Command::Quit));
        assert!(api.calls().is_empty());
    }
}
