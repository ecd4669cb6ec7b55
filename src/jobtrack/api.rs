//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every client.
//!
//! ## Role and Responsibilities
//!
//! [`TrackerApi`] owns the pieces of one tracking session:
//! - the [`ApplicationStore`], built once by the caller and handed in;
//! - the [`EditSession`] holding the single in-flight inline edit;
//! - the [`ListState`] a list client keeps (search, filters, sort, page).
//!
//! It resolves row selectors against the page currently on screen, dispatches
//! to `commands/*`, and attaches a fresh listing to results that change what
//! the list shows.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs` and the core modules
//! - **Presentation**: Returns `CmdResult`s, never strings for a terminal

use crate::commands;
use crate::error::{JobtrackError, Result};
use crate::index::{self, RowSelector};
use crate::list_state::ListState;
use crate::model::{ApplicationForm, ApplicationId, Field, JobType, Status};
use crate::session::EditSession;
use crate::store::ApplicationStore;
use crate::view::SortKey;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

pub struct TrackerApi {
    store: ApplicationStore,
    session: EditSession,
    list: ListState,
    config_dir: PathBuf,
}

impl TrackerApi {
    pub fn new(store: ApplicationStore, page_size: NonZeroUsize, config_dir: PathBuf) -> Self {
        Self {
            store,
            session: EditSession::new(),
            list: ListState::new(page_size),
            config_dir,
        }
    }

    pub fn store(&self) -> &ApplicationStore {
        &self.store
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn list_state(&self) -> &ListState {
        &self.list
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    fn with_listing(&mut self, mut result: CmdResult) -> CmdResult {
        result.listing = Some(commands::list::listing(&self.store, &mut self.list));
        result
    }

    /// Maps a row number on the current page, or a full id, to an application id.
    pub fn resolve(&mut self, selector: &RowSelector) -> Result<ApplicationId> {
        if let RowSelector::Id(id) = selector {
            if self.store.get(*id).is_some() {
                return Ok(*id);
            }
        }
        let listing = commands::list::listing(&self.store, &mut self.list);
        index::resolve(&listing.rows, selector)
            .map(|row| row.application.id())
            .ok_or_else(|| {
                JobtrackError::Api(format!("Row {} is not on the current page", selector))
            })
    }

    pub fn add_application(&mut self, form: &ApplicationForm) -> CmdResult {
        commands::add::run(&mut self.store, form)
    }

    pub fn list(&mut self) -> CmdResult {
        commands::list::run(&self.store, &mut self.list)
    }

    pub fn search(&mut self, term: &str) -> CmdResult {
        self.list.set_search(term);
        self.list()
    }

    pub fn filter_job_type(&mut self, job_type: Option<JobType>) -> CmdResult {
        self.list.set_job_type(job_type);
        self.list()
    }

    pub fn filter_status(&mut self, status: Option<Status>) -> CmdResult {
        self.list.set_status(status);
        self.list()
    }

    pub fn toggle_sort(&mut self, key: SortKey) -> CmdResult {
        self.list.toggle_sort(key);
        self.list()
    }

    pub fn clear_sort(&mut self) -> CmdResult {
        self.list.clear_sort();
        self.list()
    }

    pub fn go_to_page(&mut self, page: usize) -> CmdResult {
        let total_pages = commands::list::listing(&self.store, &mut self.list).total_pages;
        if self.list.go_to_page(page, total_pages) {
            return self.list();
        }
        let mut result = self.list();
        result.add_message(CmdMessage::warning(format!(
            "Page {} does not exist ({} page(s))",
            page, total_pages
        )));
        result
    }

    pub fn next_page(&mut self) -> CmdResult {
        let page = self.list.page();
        self.go_to_page(page + 1)
    }

    pub fn prev_page(&mut self) -> CmdResult {
        let page = self.list.page();
        if page <= 1 {
            let mut result = self.list();
            result.add_message(CmdMessage::info("Already on the first page"));
            return result;
        }
        self.go_to_page(page - 1)
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.list.set_page_size(page_size);
    }

    pub fn delete(&mut self, selector: &RowSelector) -> Result<CmdResult> {
        let id = self.resolve(selector)?;
        let result = commands::delete::run(&mut self.store, &mut self.list, id);
        Ok(self.with_listing(result))
    }

    pub fn start_edit(&mut self, selector: &RowSelector) -> Result<CmdResult> {
        let id = self.resolve(selector)?;
        commands::edit::start(&self.store, &mut self.session, id)
    }

    pub fn edit_field(&mut self, field: Field, value: &str) -> CmdResult {
        commands::edit::set_field(&mut self.session, field, value)
    }

    pub fn show_edit(&self) -> CmdResult {
        commands::edit::show(&self.session)
    }

    pub fn save_edit(&mut self) -> CmdResult {
        let result = commands::edit::save(&mut self.store, &mut self.session);
        if result.has_errors() {
            return result;
        }
        self.with_listing(result)
    }

    pub fn cancel_edit(&mut self) -> CmdResult {
        commands::edit::cancel(&mut self.session)
    }

    pub fn dashboard(&self) -> CmdResult {
        commands::dashboard::run(&self.store)
    }

    pub fn import(&mut self, path: &Path) -> Result<CmdResult> {
        let result = commands::import::run(&mut self.store, path)?;
        commands::delete::clamp_page(&self.store, &mut self.list);
        Ok(result)
    }

    pub fn export(&self, path: Option<&Path>) -> Result<CmdResult> {
        commands::export::run(&self.store, path)
    }

    /// Shows or changes configuration. A new page size takes effect at once.
    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let is_set = matches!(action, ConfigAction::Set(..));
        let result = commands::config::run(&self.config_dir, action)?;
        if let (true, Some(config)) = (is_set, &result.config) {
            if config.page_size != self.list.query().page_size {
                self.list.set_page_size(config.page_size);
            }
        }
        Ok(result)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{
    CmdMessage, CmdResult, DashboardStats, DraftView, Listing, MessageLevel,
};
