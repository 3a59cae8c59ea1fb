use std::collections::BTreeSet;

use crate::failure::ApiFailure;
use crate::page::{Page, PageQuery};

pub const PAGE_SIZE_CHOICES: [u32; 4] = [5, 10, 20, 50];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

/// Issued when a load starts; handed back together with its result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub scope: Option<String>,
    pub query: PageQuery,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// The page index was past the end and has been pulled back; the caller
    /// must load again.
    Clamped,
    /// The response belongs to a scope that is no longer displayed.
    Discarded,
    Failed(ApiFailure),
}

/// Ids checked in a bulk-membership table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn toggle(&mut self, id: &str, checked: bool) {
        if checked {
            self.ids.insert(id.to_string());
        } else {
            self.ids.remove(id);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}

/// Local state of one paginated table.
///
/// Every mutator that changes what should be on screen returns `true` when a
/// reload is needed; the owning component issues it with [`begin_load`].
///
/// [`begin_load`]: TableState::begin_load
#[derive(Clone, Debug, PartialEq)]
pub struct TableState<T> {
    page: u32,
    size: u32,
    sort_by: Option<String>,
    scope: Option<String>,
    rows: Vec<T>,
    total_pages: u32,
    total_elements: u64,
    phase: LoadPhase,
    selection: Selection,
    seq: u64,
}

impl<T> TableState<T> {
    pub fn new(size: u32) -> Self {
        Self {
            page: 0,
            size: size.max(1),
            sort_by: None,
            scope: None,
            rows: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            phase: LoadPhase::Idle,
            selection: Selection::default(),
            seq: 0,
        }
    }

    pub fn scoped(size: u32, scope: impl Into<String>) -> Self {
        let mut state = Self::new(size);
        state.scope = Some(scope.into());
        state
    }

    pub fn sorted_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// "Showing page N of M", never "of 0".
    pub fn caption(&self) -> String {
        format!(
            "Showing page {} of {}",
            self.page + 1,
            self.total_pages.max(1)
        )
    }

    /// 1-based range of the rows on screen, `None` when there are none.
    pub fn row_range(&self) -> Option<(u64, u64)> {
        if self.rows.is_empty() || self.total_elements == 0 {
            return None;
        }
        let first = u64::from(self.page) * u64::from(self.size) + 1;
        let last = ((u64::from(self.page) + 1) * u64::from(self.size)).min(self.total_elements);
        Some((first, last))
    }

    /// 1-based number of the row at `index` on the current page.
    pub fn row_number(&self, index: usize) -> u64 {
        u64::from(self.page) * u64::from(self.size) + index as u64 + 1
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.seq += 1;
        self.phase = LoadPhase::Loading;
        LoadTicket {
            seq: self.seq,
            scope: self.scope.clone(),
            query: PageQuery {
                sort_by: self.sort_by.clone(),
                ..PageQuery::new(self.page, self.size)
            },
        }
    }

    /// Applies the result of a load. Responses are applied in the order they
    /// resolve; only a change of scope makes an older response obsolete.
    pub fn apply(&mut self, ticket: &LoadTicket, result: Result<Page<T>, ApiFailure>) -> LoadOutcome {
        if ticket.scope != self.scope {
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(page) => {
                self.rows = page.content;
                self.total_pages = page.total_pages;
                self.total_elements = page.total_elements;
                self.phase = LoadPhase::Loaded;

                if self.page > 0 && self.page >= self.total_pages {
                    self.page = self.total_pages.saturating_sub(1);
                    self.selection.clear();
                    return LoadOutcome::Clamped;
                }
                LoadOutcome::Applied
            }
            Err(failure) => {
                self.rows.clear();
                self.total_pages = 0;
                self.total_elements = 0;
                self.phase = LoadPhase::Errored(failure.message.clone());
                LoadOutcome::Failed(failure)
            }
        }
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        if page == self.page {
            return false;
        }
        self.page = page;
        self.selection.clear();
        true
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.set_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.set_page(self.page - 1)
    }

    /// Changing the page size restarts at the first page and drops the
    /// selection.
    pub fn set_size(&mut self, size: u32) -> bool {
        let size = size.max(1);
        self.selection.clear();
        if size == self.size && self.page == 0 {
            return false;
        }
        self.size = size;
        self.page = 0;
        true
    }

    pub fn set_scope(&mut self, scope: impl Into<String>) -> bool {
        let scope = Some(scope.into());
        if scope == self.scope {
            return false;
        }
        self.scope = scope;
        self.page = 0;
        self.rows.clear();
        self.selection.clear();
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

impl<T> TableState<T> {
    pub fn toggle_row(&mut self, id: &str, checked: bool) {
        self.selection.toggle(id, checked);
    }

    /// Select-all covers exactly the rows of the current page.
    pub fn toggle_all(&mut self, checked: bool, id_of: impl Fn(&T) -> String) {
        self.selection.clear();
        if checked {
            for row in &self.rows {
                self.selection.toggle(&id_of(row), true);
            }
        }
    }

    pub fn all_selected(&self, id_of: impl Fn(&T) -> String) -> bool {
        !self.rows.is_empty()
            && self.selection.len() == self.rows.len()
            && self.rows.iter().all(|r| self.selection.contains(&id_of(r)))
    }
}
