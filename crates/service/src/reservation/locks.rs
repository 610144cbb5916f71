use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<i32, Arc<Mutex<()>>>;

/// One async mutex per service bay.
///
/// Holding the guard across fetch, decide and write makes admissions on the
/// same bay run one at a time inside this process. Bays never contend with
/// each other. Other processes writing to the same database are not covered.
///
/// Entries live only while some task holds or waits for them, so the map
/// stays bounded by the number of in-flight admissions.
#[derive(Clone, Default)]
pub struct BayLocks {
    inner: Arc<LockMap>,
}

/// Held lock on one bay. Dropping it releases the bay and forgets the entry
/// once nobody else is queued on it.
pub struct BayGuard {
    service_bay_id: i32,
    guard: Option<OwnedMutexGuard<()>>,
    map: Arc<LockMap>,
}

impl BayLocks {
    pub fn new() -> Self { Self::default() }

    pub async fn acquire(&self, service_bay_id: i32) -> BayGuard {
        // clone the Arc out so the shard lock is released before awaiting
        let lock = self
            .inner
            .entry(service_bay_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock_owned().await;
        BayGuard { service_bay_id, guard: Some(guard), map: self.inner.clone() }
    }

    pub fn len(&self) -> usize { self.inner.len() }

    pub fn is_empty(&self) -> bool { self.inner.is_empty() }
}

impl Drop for BayGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // the shard lock taken by remove_if also serializes against acquire's
        // clone, so a waiter that already holds the Arc keeps the entry alive
        self.map.remove_if(&self.service_bay_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_bay_waits_for_release() {
        let locks = BayLocks::new();
        let guard = locks.acquire(1).await;

        let other = locks.clone();
        let waiter = tokio::spawn(async move {
            let _g = other.acquire(1).await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn different_bays_do_not_block() {
        let locks = BayLocks::new();
        let _one = locks.acquire(1).await;
        tokio::time::timeout(Duration::from_millis(100), locks.acquire(2)).await.unwrap();
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn released_bays_are_forgotten() {
        let locks = BayLocks::new();
        for bay in 1..=10_000 {
            let _g = locks.acquire(bay).await;
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn entry_survives_while_a_waiter_is_queued() {
        let locks = BayLocks::new();
        let guard = locks.acquire(7).await;

        let other = locks.clone();
        let waiter = tokio::spawn(async move {
            let _g = other.acquire(7).await;
            other.len()
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(guard);
        assert_eq!(locks.len(), 1);

        let seen_by_waiter = tokio::time::timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap();
        assert_eq!(seen_by_waiter, 1);
        assert!(locks.is_empty());
    }
}
