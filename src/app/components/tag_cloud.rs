use leptos::prelude::*;

use crate::app::render::TagPanel;

#[component]
pub fn TagCloud(
    #[prop(into)] panel: Signal<TagPanel>,
    on_pick: impl Fn(String) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    move || match panel.get() {
        TagPanel::Placeholder(text) => view! { <div class="helper-text">{text}</div> }.into_any(),
        TagPanel::Chips(chips) => chips
            .into_iter()
            .map(|chip| {
                let name = chip.name.clone();
                let style = chip
                    .color
                    .map(|c| format!("border-color: {}", c))
                    .unwrap_or_default();
                view! {
                    <span class="chip" style=style on:click=move |_| on_pick(name.clone())>
                        {chip.label}
                    </span>
                }
            })
            .collect_view()
            .into_any(),
    }
}
