//! Offline Actions Example
//!
//! This example demonstrates the offline write path of the Plaza SDK:
//! - Enqueueing user actions into the local caches while offline
//! - A failing synchronization pass that leaves everything queued
//! - Connectivity returning and the background scheduler draining the queues
//!
//! Run with: cargo run -p offline_actions

use plaza_cache::{standard_sync_handler, CacheSet};
use plaza_client::{MockTransport, SocialTransport};
use plaza_protocol::{RelationshipOperation, ReportReason};
use plaza_sync::SyncScheduler;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // In a real application this is the REST transport; the mock stands in
    // for a backend we can take offline at will.
    let transport = Arc::new(MockTransport::new());
    transport.set_connected(false);
    let shared: Arc<dyn SocialTransport> = transport.clone();

    let caches = CacheSet::in_memory();
    let handler = Arc::new(standard_sync_handler(&caches, shared));

    // The user keeps using the app while offline.
    caches.posts.enqueue_post("Lost in the hills", "No signal up here.", None)?;
    caches.posts.enqueue_comment("topic-42", "Great route, thanks!")?;
    caches.user_actions.set_like("topic-42", true)?;
    caches.user_actions.set_pin("topic-42", true)?;
    caches
        .user_actions
        .report_content("comment-13", ReportReason::Spam)?;
    caches
        .users
        .enqueue_relationship("user-7", RelationshipOperation::Follow)?;
    caches.activities.mark_read("activity-3")?;
    caches.push.register("device-token-1")?;

    println!("queued {} actions while offline", caches.pending_count());

    // A pass without connectivity fails and leaves everything queued.
    let synced = handler.run();
    println!(
        "offline pass: synced={synced}, still pending {}",
        caches.pending_count()
    );

    // Connectivity returns; the background scheduler picks the queues up.
    transport.set_connected(true);
    let scheduler = SyncScheduler::start(Arc::clone(&handler), None)?;
    scheduler.trigger();

    let deadline = Instant::now() + Duration::from_secs(5);
    while caches.pending_count() > 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    scheduler.shutdown();

    println!("online pass: still pending {}", caches.pending_count());

    let stats = handler.stats();
    println!(
        "passes: {} ok / {} failed, actions: {} synced / {} rejected / {} failed",
        stats.passes_completed,
        stats.passes_failed,
        stats.actions_synced,
        stats.actions_rejected,
        stats.actions_failed
    );

    for submission in transport.submissions() {
        let endpoint = submission.endpoint();
        println!("  {} {}", endpoint.method.as_str(), endpoint.path);
    }

    Ok(())
}
