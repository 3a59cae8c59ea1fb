use std::future::Future;
use std::pin::Pin;

use bourse_types::{ApiFailure, LoadOutcome, LoadTicket, Page, TableState, PAGE_SIZE_CHOICES};
use leptos::prelude::*;

use crate::api::failure_of;
use crate::components::toast::ToastContext;
use crate::session::{report, spawn};

type LoadFuture<T> = Pin<Box<dyn Future<Output = Result<Page<T>, ServerFnError<ApiFailure>>>>>;
type Fetcher<T> = Box<dyn Fn(LoadTicket) -> LoadFuture<T>>;

/// Reactive handle over a [`TableState`] and the server function that
/// fills it. Copy it freely into event handlers.
pub struct PagedTable<T: Send + Sync + 'static> {
    state: RwSignal<TableState<T>>,
    fetch: StoredValue<Fetcher<T>, LocalStorage>,
    toasts: Option<ToastContext>,
}

impl<T: Send + Sync + 'static> Clone for PagedTable<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for PagedTable<T> {}

impl<T: Clone + Send + Sync + 'static> PagedTable<T> {
    pub fn new<F, Fut>(initial: TableState<T>, fetch: F) -> Self
    where
        F: Fn(LoadTicket) -> Fut + 'static,
        Fut: Future<Output = Result<Page<T>, ServerFnError<ApiFailure>>> + 'static,
    {
        let fetcher: Fetcher<T> = Box::new(move |ticket| Box::pin(fetch(ticket)));
        Self {
            state: RwSignal::new(initial),
            fetch: StoredValue::new_local(fetcher),
            toasts: use_context::<ToastContext>(),
        }
    }

    pub fn state(&self) -> RwSignal<TableState<T>> {
        self.state
    }

    /// Requests the current page. When the answer pulls the page index back
    /// inside the result, exactly one follow-up load is issued.
    pub fn load(self) {
        let Some(ticket) = self.state.try_update(|s| s.begin_load()) else {
            return;
        };
        let Some(future) = self.fetch.try_with_value(|f| f(ticket.clone())) else {
            return;
        };
        spawn(async move {
            let result = future.await.map_err(failure_of);
            match self.state.try_update(|s| s.apply(&ticket, result)) {
                Some(LoadOutcome::Clamped) => self.load(),
                Some(LoadOutcome::Failed(failure)) => report(self.toasts, &failure),
                _ => {}
            }
        });
    }

    fn change(self, apply: impl FnOnce(&mut TableState<T>) -> bool) {
        if self.state.try_update(apply).unwrap_or(false) {
            self.load();
        }
    }

    pub fn next_page(self) {
        self.change(TableState::next_page);
    }

    pub fn previous_page(self) {
        self.change(TableState::previous_page);
    }

    pub fn set_size(self, size: u32) {
        self.change(|s| s.set_size(size));
    }

    /// Points the table at another parent entity and loads its first page.
    pub fn rescope(self, scope: String) {
        self.state.update(|s| {
            s.set_scope(scope);
        });
        self.load();
    }

    pub fn toggle_row(self, id: String, checked: bool) {
        self.state.update(|s| s.toggle_row(&id, checked));
    }

    pub fn selected_ids(self) -> Vec<String> {
        self.state.with_untracked(|s| s.selection().ids())
    }
}

/// Range summary, page size picker and previous / next controls.
#[component]
pub fn Pager<T>(table: PagedTable<T>) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let state = table.state();

    let range = move || {
        state.with(|s| match s.row_range() {
            Some((first, last)) => {
                format!("Showing {first} to {last} of {}", s.total_elements())
            }
            None => "No results".to_string(),
        })
    };

    view! {
        <div class="pager">
            <span class="pager-range">{range}</span>
            <label class="pager-size">
                "Rows per page"
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        table.set_size(size);
                    }
                }>
                    {PAGE_SIZE_CHOICES
                        .into_iter()
                        .map(|size| {
                            view! {
                                <option
                                    value=size.to_string()
                                    selected=move || state.with(|s| s.size() == size)
                                >
                                    {size.to_string()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            <div class="pager-nav">
                <button
                    class="btn btn-secondary"
                    disabled=move || state.with(|s| !s.has_previous() || s.is_loading())
                    on:click=move |_| table.previous_page()
                >
                    "Previous"
                </button>
                <span class="pager-caption">{move || state.with(|s| s.caption())}</span>
                <button
                    class="btn btn-secondary"
                    disabled=move || state.with(|s| !s.has_next() || s.is_loading())
                    on:click=move |_| table.next_page()
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}

/// Full-width row for the loading and empty states.
pub fn placeholder_row(columns: u32, text: &'static str) -> impl IntoView {
    view! {
        <tr class="placeholder-row">
            <td colspan=columns.to_string()>{text}</td>
        </tr>
    }
}
