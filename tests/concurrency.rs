//! Concurrent calls must each get an independent call context.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use wraith::{CallContext, Client, Hook, Outcome, Result, Transport};

/// Stub transport that answers 200 after a short pause, so calls overlap.
struct SlowOk;

#[async_trait]
impl Transport for SlowOk {
    async fn execute(&self, _request: reqwest::Request) -> Result<reqwest::Response> {
        tokio::time::sleep(Duration::from_millis(25)).await;
        let response = http::Response::builder()
            .status(200)
            .body(String::from("ok"))
            .expect("canned response");
        Ok(reqwest::Response::from(response))
    }
}

struct CallMarker(u64);

/// Tags each call's context in `before`, reads the tag back in `after`.
///
/// If contexts leaked across calls, a call's after phase could observe
/// another call's marker and the collected set would contain duplicates
/// or gaps.
struct MarkerHook {
    next: AtomicU64,
    seen: Arc<Mutex<Vec<u64>>>,
}

impl Hook for MarkerHook {
    fn before(&self, cx: &mut CallContext, _request: &mut reqwest::Request) -> Result<()> {
        let id = self.next.fetch_add(1, Ordering::SeqCst);
        cx.insert(CallMarker(id));
        Ok(())
    }

    fn after(&self, cx: &mut CallContext, _outcome: &Outcome) -> Result<()> {
        let marker = cx.get::<CallMarker>().expect("marker set in before phase");
        self.seen
            .lock()
            .expect("seen mutex poisoned")
            .push(marker.0);
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_have_independent_contexts() {
    const CALLS: u64 = 16;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let client = Client::builder()
        .transport(SlowOk)
        .hook(MarkerHook {
            next: AtomicU64::new(0),
            seen: seen.clone(),
        })
        .build()
        .expect("client");

    let mut tasks = Vec::new();
    for _ in 0..CALLS {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client.get("http://localhost:9/busy", None, None).await
        }));
    }
    for task in tasks {
        let outcome = task.await.expect("task join");
        assert!(outcome.is_success());
    }

    let mut markers = seen.lock().unwrap().clone();
    markers.sort_unstable();
    let expected: Vec<u64> = (0..CALLS).collect();
    assert_eq!(markers, expected, "each after phase must see its own call's marker");
}
