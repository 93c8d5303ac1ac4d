//! Pomodoro Panel Component

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use log::info;

use crate::context::use_app_context;
use crate::pomodoro::{Phase, PomodoroTimer};

/// Advance a running timer by one second; a paused timer is left untouched
/// so its subscribers are not notified
fn tick_running(timer: RwSignal<PomodoroTimer>) -> Option<Phase> {
    if !timer.with_untracked(PomodoroTimer::is_running) {
        return None;
    }
    let mut changed = None;
    timer.update(|t| changed = t.tick());
    changed
}

#[component]
pub fn PomodoroPanel() -> impl IntoView {
    let ctx = use_app_context();
    let timer = RwSignal::new(PomodoroTimer::new(ctx.config().pomodoro));

    let ticker = Interval::new(1_000, move || {
        if let Some(phase) = tick_running(timer) {
            info!("pomodoro switched to {}", phase.label());
        }
    });
    // Interval cancels itself on drop
    let ticker = StoredValue::new_local(Some(ticker));
    on_cleanup(move || ticker.set_value(None));

    let phase_class = move || format!("pomodoro {}", timer.with(|t| match t.phase() {
        Phase::Focus => "focus",
        Phase::ShortBreak | Phase::LongBreak => "break",
    }));

    view! {
        <section class=phase_class>
            <h2>{move || timer.with(|t| t.phase().label())}</h2>
            <div class="pomodoro-clock">{move || timer.with(PomodoroTimer::display)}</div>
            <progress max="1" value=move || timer.with(PomodoroTimer::progress)></progress>
            <div class="pomodoro-controls">
                <button type="button" on:click=move |_| timer.update(PomodoroTimer::toggle)>
                    {move || if timer.with(PomodoroTimer::is_running) { "Pause" } else { "Start" }}
                </button>
                <button type="button" on:click=move |_| timer.update(PomodoroTimer::skip)>"Skip"</button>
                <button type="button" on:click=move |_| timer.update(PomodoroTimer::reset)>"Reset"</button>
            </div>
            <p class="pomodoro-count">
                {move || format!("{} focus sessions", timer.with(PomodoroTimer::completed_focus))}
            </p>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pomodoro::PomodoroSettings;

    #[test]
    fn test_paused_timer_is_not_written() {
        let owner = Owner::new();
        owner.with(|| {
            let timer = RwSignal::new(PomodoroTimer::new(PomodoroSettings::default()));
            assert_eq!(tick_running(timer), None);
            assert_eq!(timer.with_untracked(PomodoroTimer::remaining_secs), 25 * 60);

            timer.update(PomodoroTimer::start);
            assert_eq!(tick_running(timer), None);
            assert_eq!(timer.with_untracked(PomodoroTimer::remaining_secs), 25 * 60 - 1);
        });
    }
}
