//! # Display Rows
//!
//! A listing shows numbered rows. Numbers run across the whole derived result,
//! not per page: with a page size of 5, page 2 shows rows 6 to 10. Clients refer
//! to applications either by one of those numbers or by the full id.
//!
//! Row numbers are only meaningful for the page currently on screen; the API
//! resolves them against that page and nothing else.

use crate::model::{Application, ApplicationId};
use crate::view::DerivedView;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub number: usize,
    pub application: Application,
}

/// Numbers the rows of one derived page.
pub fn index_rows(view: &DerivedView) -> Vec<DisplayRow> {
    let start = view.start_index();
    view.rows
        .iter()
        .enumerate()
        .map(|(i, application)| DisplayRow {
            number: start + i + 1,
            application: application.clone(),
        })
        .collect()
}

/// A user reference to one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSelector {
    Row(usize),
    Id(ApplicationId),
}

impl fmt::Display for RowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSelector::Row(n) => write!(f, "{}", n),
            RowSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for RowSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            if n == 0 {
                return Err("Row numbers start at 1".to_string());
            }
            return Ok(RowSelector::Row(n));
        }
        s.parse::<ApplicationId>()
            .map(RowSelector::Id)
            .map_err(|_| format!("Invalid row reference: {}", s))
    }
}

/// Finds the application a selector points at among the visible rows.
pub fn resolve<'a>(rows: &'a [DisplayRow], selector: &RowSelector) -> Option<&'a DisplayRow> {
    rows.iter().find(|row| match selector {
        RowSelector::Row(n) => row.number == *n,
        RowSelector::Id(id) => row.application.id() == *id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::StoreFixture;
    use crate::view::{derive, ViewQuery};

    #[test]
    fn rows_are_numbered_across_pages() {
        let fixture = StoreFixture::new().with_applications(8);
        let view = derive(
            &fixture.store.list(),
            &ViewQuery {
                page: 2,
                ..ViewQuery::default()
            },
        );
        let rows = index_rows(&view);
        assert_eq!(
            rows.iter().map(|r| r.number).collect::<Vec<_>>(),
            vec![6, 7, 8]
        );
        assert_eq!(rows[0].application.fields().company_name, "Company 6");
    }

    #[test]
    fn selectors_parse_numbers_and_ids() {
        assert_eq!("3".parse::<RowSelector>().unwrap(), RowSelector::Row(3));
        assert!("0".parse::<RowSelector>().is_err());
        assert!("abc".parse::<RowSelector>().is_err());

        let fixture = StoreFixture::new().with_applications(1);
        let id = fixture.ids()[0];
        assert_eq!(
            id.to_string().parse::<RowSelector>().unwrap(),
            RowSelector::Id(id)
        );
    }

    #[test]
    fn resolve_only_sees_visible_rows() {
        let fixture = StoreFixture::new().with_applications(7);
        let ids = fixture.ids();
        let rows = index_rows(&derive(&fixture.store.list(), &ViewQuery::default()));

        assert_eq!(
            resolve(&rows, &RowSelector::Row(2)).unwrap().application.id(),
            ids[1]
        );
        assert!(resolve(&rows, &RowSelector::Row(6)).is_none());
        assert!(resolve(&rows, &RowSelector::Id(ids[6])).is_none());
        assert!(resolve(&rows, &RowSelector::Id(ids[0])).is_some());
    }
}
