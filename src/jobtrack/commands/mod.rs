use crate::config::TrackerConfig;
use crate::index::DisplayRow;
use crate::model::{Application, ApplicationForm, ApplicationId, JobType, Status};
use crate::validation::FieldErrors;
use crate::view::SortKey;

pub mod add;
pub mod config;
pub mod dashboard;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;

pub use dashboard::DashboardStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One rendered page of the application list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub rows: Vec<DisplayRow>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    /// "Showing X to Y of Z", absent when the page is empty.
    pub showing: Option<(usize, usize, usize)>,
    pub search: String,
    pub job_type: Option<JobType>,
    pub status: Option<Status>,
    pub sort: Option<SortKey>,
    /// Filter choices present in the unfiltered store.
    pub job_type_options: Vec<JobType>,
    pub status_options: Vec<Status>,
}

/// The open inline edit, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftView {
    pub id: ApplicationId,
    pub form: ApplicationForm,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected: Vec<Application>,
    pub listing: Option<Listing>,
    pub dashboard: Option<DashboardStats>,
    pub draft: Option<DraftView>,
    pub field_errors: FieldErrors,
    pub config: Option<TrackerConfig>,
    pub exported: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, applications: Vec<Application>) -> Self {
        self.affected = applications;
        self
    }

    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listing = Some(listing);
        self
    }

    pub fn with_dashboard(mut self, stats: DashboardStats) -> Self {
        self.dashboard = Some(stats);
        self
    }

    pub fn with_draft(mut self, draft: DraftView) -> Self {
        self.draft = Some(draft);
        self
    }

    pub fn with_field_errors(mut self, errors: FieldErrors) -> Self {
        self.field_errors = errors;
        self
    }

    pub fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_exported(mut self, json: String) -> Self {
        self.exported = Some(json);
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty()
            || self
                .messages
                .iter()
                .any(|m| m.level == MessageLevel::Error)
    }
}

/// Short human description used in messages, e.g. `Engineer at Acme`.
pub(crate) fn describe(application: &Application) -> String {
    let fields = application.fields();
    format!("{} at {}", fields.job_title, fields.company_name)
}
