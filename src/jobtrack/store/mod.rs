//! # Storage Layer
//!
//! [`ApplicationStore`] is the sole owner of the canonical application list.
//! Everything else reads a [`Snapshot`] from it and writes through it.
//!
//! ## Layout
//!
//! Records live in an arena keyed by [`ApplicationId`]; a separate `order` list
//! records insertion order, which is the natural order of every listing and the
//! tie-break for every sort. A version counter increases on every mutation that
//! actually changed something.
//!
//! ## Missing Ids
//!
//! `update` and `delete` on an id that is not (or no longer) present are benign
//! no-ops. Nothing is raised: in a single-threaded session the only way to hit
//! this is a delete that raced an open edit, and the store is already in the
//! state the caller wanted.
//!
//! Storage is in-memory only; nothing survives the process.

use crate::model::{Application, ApplicationFields, ApplicationId};
use std::collections::HashMap;
use std::ops::Deref;

/// An owned copy of the live applications at one store version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    version: u64,
    records: Vec<Application>,
}

impl Snapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn into_vec(self) -> Vec<Application> {
        self.records
    }
}

impl Deref for Snapshot {
    type Target = [Application];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Application;
    type IntoIter = std::slice::Iter<'a, Application>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Default)]
pub struct ApplicationStore {
    records: HashMap<ApplicationId, Application>,
    order: Vec<ApplicationId>,
    version: u64,
}

impl ApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new application built from already-validated fields.
    pub fn add(&mut self, fields: ApplicationFields) -> Application {
        let id = ApplicationId::generate();
        let application = Application::new(id, fields);
        self.records.insert(id, application.clone());
        self.order.push(id);
        self.version += 1;
        tracing::debug!(%id, version = self.version, "application added");
        application
    }

    /// Replaces every editable field of the application at `id`.
    ///
    /// Returns `false` when `id` is unknown; the store is left untouched.
    pub fn update(&mut self, id: ApplicationId, fields: ApplicationFields) -> bool {
        match self.records.get_mut(&id) {
            Some(application) => {
                application.replace_fields(fields);
                self.version += 1;
                tracing::debug!(%id, version = self.version, "application updated");
                true
            }
            None => {
                tracing::warn!(%id, "update ignored, application no longer exists");
                false
            }
        }
    }

    /// Removes the application at `id`, returning it if it was present.
    pub fn delete(&mut self, id: ApplicationId) -> Option<Application> {
        let removed = self.records.remove(&id)?;
        self.order.retain(|other| *other != id);
        self.version += 1;
        tracing::debug!(%id, version = self.version, "application deleted");
        Some(removed)
    }

    pub fn get(&self, id: ApplicationId) -> Option<&Application> {
        self.records.get(&id)
    }

    /// All live applications in insertion order.
    pub fn list(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            records: self
                .order
                .iter()
                .filter_map(|id| self.records.get(id))
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{JobType, Status};
    use chrono::NaiveDate;

    /// Builds complete fields with sensible defaults for everything but the
    /// company, title and date.
    pub fn fields(company: &str, title: &str, date: &str) -> ApplicationFields {
        ApplicationFields {
            company_name: company.to_string(),
            job_title: title.to_string(),
            job_type: JobType::FullTime,
            status: Status::Applied,
            location: "Remote".to_string(),
            applied_date: NaiveDate::parse_from_str(date, crate::model::DATE_FORMAT)
                .expect("fixture dates are YYYY-MM-DD"),
            notes: String::new(),
        }
    }

    pub struct StoreFixture {
        pub store: ApplicationStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: ApplicationStore::new(),
            }
        }

        /// Adds `count` applications named "Company 1".. with consecutive dates.
        pub fn with_applications(mut self, count: usize) -> Self {
            for i in 0..count {
                let date = format!("2024-01-{:02}", (i % 28) + 1);
                self.store.add(fields(
                    &format!("Company {}", i + 1),
                    &format!("Role {}", i + 1),
                    &date,
                ));
            }
            self
        }

        pub fn with_application(mut self, company: &str, title: &str, date: &str) -> Self {
            self.store.add(fields(company, title, date));
            self
        }

        pub fn with_classified(
            mut self,
            company: &str,
            job_type: JobType,
            status: Status,
            date: &str,
        ) -> Self {
            let mut f = fields(company, "Engineer", date);
            f.job_type = job_type;
            f.status = status;
            self.store.add(f);
            self
        }

        pub fn ids(&self) -> Vec<ApplicationId> {
            self.store.list().iter().map(|a| a.id()).collect()
        }
    }
}
