use super::print::{print_error, print_messages, print_result, print_session_help};
use super::setup::{Cli, SessionCommand, SessionLine};
use clap::Parser;
use directories::ProjectDirs;
use jobtrack::api::{CmdMessage, CmdResult, ConfigAction, TrackerApi};
use jobtrack::config::TrackerConfig;
use jobtrack::error::{JobtrackError, Result};
use jobtrack::index::RowSelector;
use jobtrack::logging::init_logging;
use jobtrack::model::{ApplicationForm, Field, JobType, Status};
use jobtrack::store::ApplicationStore;
use jobtrack::view::SortKey;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const PROMPT: &str = "jobtrack> ";
const EDIT_PROMPT: &str = "jobtrack (editing)> ";

struct AppContext {
    api: TrackerApi,
    interactive: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let stdin = io::stdin();
    let mut ctx = init_context(&cli, stdin.is_terminal())?;

    if ctx.interactive {
        println!("Type `help` for commands, `quit` to leave.");
    }
    ctx.run_session(stdin.lock())
}

fn default_config_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "jobtrack", "jobtrack")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| JobtrackError::Config("Could not determine config directory".into()))
}

fn init_context(cli: &Cli, interactive: bool) -> Result<AppContext> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let config = TrackerConfig::load(&config_dir)?;
    init_logging(config.log_level.as_deref(), cli.verbose);

    let page_size = cli.page_size.unwrap_or(config.page_size);
    tracing::debug!(
        config_dir = %config_dir.display(),
        page_size = page_size.get(),
        "starting session"
    );

    let mut api = TrackerApi::new(ApplicationStore::new(), page_size, config_dir);
    if let Some(seed) = &cli.seed {
        let result = api.import(seed)?;
        print_messages(&result.messages);
    }

    Ok(AppContext { api, interactive })
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}

fn parse_selector(s: &str) -> Result<RowSelector> {
    s.parse().map_err(JobtrackError::Api)
}

/// Parses a filter choice where `all` (or nothing) means no filter.
fn parse_choice<T: FromStr<Err = String>>(value: &str) -> Result<Option<T>> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    value.parse().map(Some).map_err(JobtrackError::Api)
}

/// Rejects a job type or status that names no known choice. Empty clears.
fn check_choice(field: Field, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    let parsed = match field {
        Field::JobType => value.parse::<JobType>().map(drop),
        Field::Status => value.parse::<Status>().map(drop),
        _ => Ok(()),
    };
    parsed.map_err(JobtrackError::Api)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl AppContext {
    fn run_session<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        loop {
            if self.interactive {
                self.print_prompt()?;
            }
            let Some(line) = read_line(&mut input)? else {
                break;
            };
            match self.execute_line(&line, &mut input) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => print_error(&e.to_string()),
            }
        }
        Ok(())
    }

    fn print_prompt(&self) -> Result<()> {
        let prompt = if self.api.session().is_editing() {
            EDIT_PROMPT
        } else {
            PROMPT
        };
        print!("{}", prompt);
        io::stdout().flush()?;
        Ok(())
    }

    fn execute_line<R: BufRead>(&mut self, line: &str, input: &mut R) -> Result<Flow> {
        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(e) => {
                print_error(&e.to_string());
                return Ok(Flow::Continue);
            }
        };
        if words.is_empty() || words[0].starts_with('#') {
            return Ok(Flow::Continue);
        }

        let parsed = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                e.print()?;
                return Ok(Flow::Continue);
            }
        };
        tracing::trace!(command = ?parsed.command, "dispatch");

        match parsed.command {
            SessionCommand::Add {
                company,
                title,
                job_type,
                status,
                location,
                date,
                notes,
            } => {
                let values = [
                    (Field::CompanyName, company),
                    (Field::JobTitle, title),
                    (Field::JobType, job_type),
                    (Field::Status, status),
                    (Field::Location, location),
                    (Field::AppliedDate, date),
                    (Field::Notes, notes),
                ];
                self.handle_add(values)
            }
            SessionCommand::List => self.show(|api| api.list()),
            SessionCommand::Search { term } => {
                let term = term.join(" ");
                self.show(|api| api.search(&term))
            }
            SessionCommand::Filter { job_type, status } => self.handle_filter(job_type, status),
            SessionCommand::Sort { key } => self.handle_sort(&key),
            SessionCommand::Page { number } => self.show(|api| api.go_to_page(number)),
            SessionCommand::Next => self.show(|api| api.next_page()),
            SessionCommand::Prev => self.show(|api| api.prev_page()),
            SessionCommand::Delete { row, yes } => self.handle_delete(&row, yes, input),
            SessionCommand::Edit { row } => {
                let selector = parse_selector(&row)?;
                let result = self.api.start_edit(&selector)?;
                print_result(&result);
                Ok(Flow::Continue)
            }
            SessionCommand::Set { field, value } => {
                let field: Field = field.parse().map_err(JobtrackError::Api)?;
                let value = value.join(" ");
                check_choice(field, &value)?;
                self.show(|api| api.edit_field(field, &value))
            }
            SessionCommand::Show => self.show(|api| api.show_edit()),
            SessionCommand::Save => self.show(|api| api.save_edit()),
            SessionCommand::Cancel => self.show(|api| api.cancel_edit()),
            SessionCommand::Dashboard => self.show(|api| api.dashboard()),
            SessionCommand::Import { path } => {
                let result = self.api.import(&path)?;
                print_result(&result);
                Ok(Flow::Continue)
            }
            SessionCommand::Export { path } => self.handle_export(path.as_deref()),
            SessionCommand::Config { key, value } => self.handle_config(key, value),
            SessionCommand::Help => {
                print_session_help();
                Ok(Flow::Continue)
            }
            SessionCommand::Quit => {
                if self.api.session().is_editing() {
                    print_messages(&[CmdMessage::warning(
                        "Unsaved edit discarded",
                    )]);
                }
                Ok(Flow::Quit)
            }
        }
    }

    fn show<F>(&mut self, op: F) -> Result<Flow>
    where
        F: FnOnce(&mut TrackerApi) -> CmdResult,
    {
        let result = op(&mut self.api);
        print_result(&result);
        Ok(Flow::Continue)
    }

    fn handle_add(&mut self, values: [(Field, Option<String>); 7]) -> Result<Flow> {
        for (field, value) in &values {
            if let Some(value) = value {
                check_choice(*field, value)?;
            }
        }
        let mut form = ApplicationForm::default();
        for (field, value) in values {
            if let Some(value) = value {
                form.set_field(field, &value);
            }
        }
        self.show(|api| api.add_application(&form))
    }

    fn handle_filter(&mut self, job_type: Option<String>, status: Option<String>) -> Result<Flow> {
        if job_type.is_none() && status.is_none() {
            self.api.filter_job_type(None);
            return self.show(|api| api.filter_status(None));
        }

        // Both are parsed before either is applied.
        let job_type = job_type
            .as_deref()
            .map(parse_choice::<JobType>)
            .transpose()?;
        let status = status.as_deref().map(parse_choice::<Status>).transpose()?;

        let mut result = None;
        if let Some(choice) = job_type {
            result = Some(self.api.filter_job_type(choice));
        }
        if let Some(choice) = status {
            result = Some(self.api.filter_status(choice));
        }
        if let Some(result) = result {
            print_result(&result);
        }
        Ok(Flow::Continue)
    }

    fn handle_sort(&mut self, key: &str) -> Result<Flow> {
        if matches!(key.trim().to_ascii_lowercase().as_str(), "none" | "off") {
            return self.show(|api| api.clear_sort());
        }
        let key: SortKey = key.parse().map_err(JobtrackError::Api)?;
        self.show(|api| api.toggle_sort(key))
    }

    fn handle_delete<R: BufRead>(&mut self, row: &str, yes: bool, input: &mut R) -> Result<Flow> {
        let selector = parse_selector(row)?;
        let id = self.api.resolve(&selector)?;

        if !yes {
            let description = self
                .api
                .store()
                .get(id)
                .map(|a| format!("{} at {}", a.fields().job_title, a.fields().company_name))
                .unwrap_or_else(|| id.to_string());
            print!("Delete {}? [y/N] ", description);
            io::stdout().flush()?;

            let answer = read_line(input)?.unwrap_or_default();
            if !self.interactive {
                println!();
            }
            if !is_yes(&answer) {
                print_messages(&[CmdMessage::info("Deletion cancelled")]);
                return Ok(Flow::Continue);
            }
        }

        let result = self.api.delete(&RowSelector::Id(id))?;
        print_result(&result);
        Ok(Flow::Continue)
    }

    fn handle_export(&mut self, path: Option<&Path>) -> Result<Flow> {
        let result = self.api.export(path)?;
        print_result(&result);
        Ok(Flow::Continue)
    }

    fn handle_config(&mut self, key: Option<String>, value: Option<String>) -> Result<Flow> {
        let action = match (key, value) {
            (None, _) => ConfigAction::ShowAll,
            (Some(key), None) => ConfigAction::ShowKey(key),
            (Some(key), Some(value)) => ConfigAction::Set(key, value),
        };
        let result = self.api.config(action)?;
        print_result(&result);
        Ok(Flow::Continue)
    }
}
