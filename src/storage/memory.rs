//! In-memory report store with time-boxed retention

use crate::storage::traits::{ReportStore, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct StoredReport {
    bytes: Arc<[u8]>,
    stored_at: Instant,
}

/// Process-local report store
///
/// Reports are dropped once they are older than the retention period, either
/// lazily on lookup or by [`ReportStore::evict_expired`].
#[derive(Debug)]
pub struct MemoryReportStore {
    retention: Duration,
    reports: Mutex<HashMap<String, StoredReport>>,
}

impl MemoryReportStore {
    pub fn new(retention: Duration) -> Self {
        Self {
            retention,
            reports: Mutex::new(HashMap::new()),
        }
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, HashMap<String, StoredReport>>> {
        self.reports.lock().map_err(|_| StorageError::LockPoisoned)
    }

    fn is_expired(&self, report: &StoredReport, now: Instant) -> bool {
        now.duration_since(report.stored_at) >= self.retention
    }
}

impl ReportStore for MemoryReportStore {
    fn put(&self, filename: &str, bytes: Vec<u8>) -> StorageResult<()> {
        let mut reports = self.lock()?;
        reports.insert(
            filename.to_string(),
            StoredReport {
                bytes: Arc::from(bytes),
                stored_at: Instant::now(),
            },
        );
        tracing::debug!("Stored report {} ({} held)", filename, reports.len());
        Ok(())
    }

    fn get(&self, filename: &str) -> StorageResult<Option<Arc<[u8]>>> {
        let mut reports = self.lock()?;
        let now = Instant::now();

        match reports.get(filename) {
            Some(report) if self.is_expired(report, now) => {
                reports.remove(filename);
                tracing::debug!("Report {} expired", filename);
                Ok(None)
            }
            Some(report) => Ok(Some(Arc::clone(&report.bytes))),
            None => Ok(None),
        }
    }

    fn evict(&self, filename: &str) -> StorageResult<bool> {
        Ok(self.lock()?.remove(filename).is_some())
    }

    fn evict_expired(&self) -> StorageResult<usize> {
        let mut reports = self.lock()?;
        let now = Instant::now();
        let before = reports.len();

        reports.retain(|_, report| !self.is_expired(report, now));

        Ok(before - reports.len())
    }

    fn len(&self) -> StorageResult<usize> {
        Ok(self.lock()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let store = MemoryReportStore::new(Duration::from_secs(60));
        store.put("report.xlsx", vec![1, 2, 3]).unwrap();

        let bytes = store.get("report.xlsx").unwrap().unwrap();
        assert_eq!(&bytes[..], &[1, 2, 3]);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_get_unknown() {
        let store = MemoryReportStore::new(Duration::from_secs(60));
        assert!(store.get("missing.xlsx").unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_put_replaces() {
        let store = MemoryReportStore::new(Duration::from_secs(60));
        store.put("r.xlsx", vec![1]).unwrap();
        store.put("r.xlsx", vec![2]).unwrap();

        assert_eq!(&store.get("r.xlsx").unwrap().unwrap()[..], &[2]);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_evict() {
        let store = MemoryReportStore::new(Duration::from_secs(60));
        store.put("r.xlsx", vec![1]).unwrap();

        assert!(store.evict("r.xlsx").unwrap());
        assert!(!store.evict("r.xlsx").unwrap());
        assert!(store.get("r.xlsx").unwrap().is_none());
    }

    #[test]
    fn test_expired_report_is_not_returned() {
        let store = MemoryReportStore::new(Duration::ZERO);
        store.put("old.xlsx", vec![1]).unwrap();

        assert!(store.get("old.xlsx").unwrap().is_none());
        assert_eq!(store.len().unwrap(), 0);
    }

    #[test]
    fn test_evict_expired() {
        let store = MemoryReportStore::new(Duration::ZERO);
        store.put("a.xlsx", vec![1]).unwrap();
        store.put("b.xlsx", vec![2]).unwrap();

        assert_eq!(store.evict_expired().unwrap(), 2);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_evict_expired_keeps_fresh() {
        let store = MemoryReportStore::new(Duration::from_secs(3600));
        store.put("fresh.xlsx", vec![1]).unwrap();

        assert_eq!(store.evict_expired().unwrap(), 0);
        assert_eq!(store.len().unwrap(), 1);
    }
}
