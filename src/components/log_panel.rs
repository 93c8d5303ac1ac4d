//! Log Panel Component
//!
//! Shows the tail of the in-memory log buffer.

use leptos::prelude::*;

/// Lines shown when expanded
const VISIBLE_LINES: usize = 50;

#[component]
pub fn LogPanel() -> impl IntoView {
    let (open, set_open) = signal(false);
    let (lines, set_lines) = signal(Vec::<String>::new());

    let refresh = move || {
        let recent = rolling_logger::recent_lines();
        let skip = recent.len().saturating_sub(VISIBLE_LINES);
        set_lines.set(recent.into_iter().skip(skip).collect());
    };

    view! {
        <aside class=move || if open.get() { "log-panel open" } else { "log-panel" }>
            <header>
                <button type="button" on:click=move |_| {
                    set_open.update(|o| *o = !*o);
                    refresh();
                }>
                    {move || if open.get() { "Hide log" } else { "Show log" }}
                </button>
                <Show when=move || open.get()>
                    <button type="button" on:click=move |_| refresh()>"Refresh"</button>
                </Show>
            </header>
            <Show when=move || open.get()>
                <pre class="log-lines">{move || lines.get().join("\n")}</pre>
            </Show>
        </aside>
    }
}
