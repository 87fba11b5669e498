use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::{Mutex, MutexGuard};

use crate::models::ActivityRecord;

/// In-memory activity store shared by all request handlers.
///
/// The set of names is fixed once the registry is built, so the outer map is
/// never locked. Each record has its own mutex; callers that check and then
/// mutate a roster must do both under a single [`lock_activity`] guard.
///
/// [`lock_activity`]: ActivityRegistry::lock_activity
#[derive(Clone, Default)]
pub struct ActivityRegistry {
    activities: Arc<IndexMap<String, Mutex<ActivityRecord>>>,
}

impl ActivityRegistry {
    /// Builds a registry keeping the iteration order of `records`.
    /// A repeated name replaces the earlier record but keeps its position.
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, ActivityRecord)>,
    {
        let activities = records
            .into_iter()
            .map(|(name, record)| (name, Mutex::new(record)))
            .collect::<IndexMap<_, _>>();
        Self {
            activities: Arc::new(activities),
        }
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn activity_names(&self) -> impl Iterator<Item = &str> {
        self.activities.keys().map(String::as_str)
    }

    /// Copies every record, in registry order.
    pub async fn list_activities(&self) -> IndexMap<String, ActivityRecord> {
        let mut out = IndexMap::with_capacity(self.activities.len());
        for (name, record) in self.activities.iter() {
            out.insert(name.clone(), record.lock().await.clone());
        }
        out
    }

    pub async fn load_activity(&self, name: &str) -> Option<ActivityRecord> {
        let record = self.activities.get(name)?;
        Some(record.lock().await.clone())
    }

    pub async fn lock_activity(&self, name: &str) -> Option<MutexGuard<'_, ActivityRecord>> {
        let record = self.activities.get(name)?;
        Some(record.lock().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ActivityRegistry {
        ActivityRegistry::new([
            (
                "Zeta".to_string(),
                ActivityRecord::new("z", "Mondays", 3).with_participants(&["a@x.edu"]),
            ),
            ("Alpha".to_string(), ActivityRecord::new("a", "Tuesdays", 4)),
        ])
    }

    #[tokio::test]
    async fn listing_keeps_insertion_order() {
        let listed = registry().list_activities().await;
        let names: Vec<&str> = listed.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn default_registry_is_empty() {
        let reg = ActivityRegistry::default();
        assert!(reg.is_empty());
        assert!(!registry().is_empty());
        assert_eq!(registry().len(), 2);
    }

    #[tokio::test]
    async fn lookups_are_case_sensitive() {
        let reg = registry();
        assert!(reg.load_activity("Zeta").await.is_some());
        assert!(reg.load_activity("zeta").await.is_none());
        assert!(reg.load_activity("alpha").await.is_none());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let reg = registry();
        let other = reg.clone();
        reg.lock_activity("Alpha")
            .await
            .unwrap()
            .participants
            .push("b@x.edu".to_string());

        let seen = other.load_activity("Alpha").await.unwrap();
        assert_eq!(seen.participants, vec!["b@x.edu".to_string()]);
    }

    #[tokio::test]
    async fn listing_is_a_copy() {
        let reg = registry();
        let mut listed = reg.list_activities().await;
        listed["Zeta"].participants.clear();

        assert_eq!(reg.load_activity("Zeta").await.unwrap().participants.len(), 1);
    }
}
