use crate::commands::CmdResult;
use crate::model::{Application, Status};
use crate::store::ApplicationStore;
use crate::view::{most_recent, RECENT_LIMIT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    /// One entry per status, in `Status::ALL` order, zero counts included.
    pub by_status: Vec<(Status, usize)>,
    /// Most recently applied first.
    pub recent: Vec<Application>,
}

impl DashboardStats {
    pub fn count(&self, status: Status) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

pub fn stats(store: &ApplicationStore) -> DashboardStats {
    let snapshot = store.list();
    let by_status = Status::ALL
        .into_iter()
        .map(|status| {
            let count = snapshot
                .iter()
                .filter(|a| a.fields().status == status)
                .count();
            (status, count)
        })
        .collect();

    DashboardStats {
        total: snapshot.len(),
        by_status,
        recent: most_recent(&snapshot, RECENT_LIMIT),
    }
}

pub fn run(store: &ApplicationStore) -> CmdResult {
    CmdResult::default().with_dashboard(stats(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JobType;
    use crate::store::fixtures::StoreFixture;

    #[test]
    fn counts_every_status() {
        let fixture = StoreFixture::new()
            .with_classified("A", JobType::FullTime, Status::Applied, "2024-01-01")
            .with_classified("B", JobType::FullTime, Status::Applied, "2024-01-02")
            .with_classified("C", JobType::FullTime, Status::Rejected, "2024-01-03");
        let stats = stats(&fixture.store);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.count(Status::Applied), 2);
        assert_eq!(stats.count(Status::Rejected), 1);
        assert_eq!(stats.count(Status::Selected), 0);
        assert_eq!(stats.count(Status::InterviewScheduled), 0);
        assert_eq!(stats.by_status.len(), 4);
    }

    #[test]
    fn recent_keeps_insertion_order_on_equal_dates() {
        let fixture = StoreFixture::new()
            .with_application("Old", "X", "2023-01-01")
            .with_application("First", "X", "2024-05-05")
            .with_application("Second", "X", "2024-05-05");
        let stats = stats(&fixture.store);
        let names: Vec<_> = stats
            .recent
            .iter()
            .map(|a| a.fields().company_name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Old"]);
    }

    #[test]
    fn recent_is_capped() {
        let fixture = StoreFixture::new().with_applications(9);
        assert_eq!(stats(&fixture.store).recent.len(), RECENT_LIMIT);
    }

    #[test]
    fn empty_store() {
        let stats = stats(&ApplicationStore::new());
        assert_eq!(stats.total, 0);
        assert!(stats.recent.is_empty());
    }
}
