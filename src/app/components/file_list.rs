use leptos::prelude::*;

use crate::app::files::open_detail;
use crate::app::render::{DetailView, FileRow, ListView};
use crate::app::state::AppState;

/// Full replace on every change of `list`; selectable rows read and write the
/// batch selection.
#[component]
pub fn FileList(#[prop(into)] list: Signal<ListView>, state: AppState) -> impl IntoView {
    view! {
        <div class="file-list">
            {move || match list.get() {
                ListView::Empty(text) => view! { <div class="list-item empty">{text}</div> }.into_any(),
                ListView::Rows(rows) => rows
                    .into_iter()
                    .map(|row| view! { <FileRowItem row=row state=state/> })
                    .collect_view()
                    .into_any(),
            }}
        </div>
    }
}

#[component]
fn FileRowItem(row: FileRow, state: AppState) -> impl IntoView {
    let id = row.id;
    let heading = view! {
        <h4 class="file-title" title="Show details" on:click=move |_| open_detail(state, id)>
            {row.title.clone()}
        </h4>
    };

    let title_block = if row.selectable {
        view! {
            <div class="checkbox-cell">
                <input
                    type="checkbox"
                    class="batch-checkbox"
                    prop:checked=move || state.selection.with(|s| s.contains(id))
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        state
                            .view_model
                            .with_untracked(|vm| state.selection.update(|s| s.set(id, checked, vm.files())));
                    }
                />
                <div>
                    {heading}
                    <div class="path">{row.path.clone()}</div>
                </div>
            </div>
        }
        .into_any()
    } else {
        heading.into_any()
    };

    view! {
        <div class="list-item">
            <header>
                {title_block}
                <div class="meta">{row.meta.clone()}</div>
            </header>
            <div class="path">{row.path.clone()}</div>
            {row.summary.clone().map(|summary| view! { <div class="summary">{summary}</div> })}
            <div>
                {row.tags.into_iter().map(|tag| view! { <span class="tag">{tag}</span> }).collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn FileDetail(state: AppState) -> impl IntoView {
    move || {
        state.detail.get().map(|detail| {
            let body = match detail {
                DetailView::Loading(_) => view! { <div class="helper-text">"Loading…"</div> }.into_any(),
                DetailView::Missing(message) => {
                    view! { <div class="helper-text error">{message}</div> }.into_any()
                }
                DetailView::File(row) => view! {
                    <div class="detail-body">
                        <h3>{row.title}</h3>
                        <div class="path">{row.path}</div>
                        <div class="meta">{row.meta}</div>
                        {row.summary.map(|summary| view! { <p class="summary">{summary}</p> })}
                        <div>
                            {row.tags.into_iter().map(|tag| view! { <span class="tag">{tag}</span> }).collect_view()}
                        </div>
                    </div>
                }
                .into_any(),
            };
            view! {
                <aside class="detail-pane">
                    <button class="header-btn" title="Close" on:click=move |_| state.detail.set(None)>"×"</button>
                    {body}
                </aside>
            }
        })
    }
}
