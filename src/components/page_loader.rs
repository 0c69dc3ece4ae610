use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Date, Math};
use web_sys::Window;
use yew::prelude::*;
use yew_hooks::use_interval;

use crate::config;
use crate::error::{self, PageError};

/// Simulated progress step; stalls once the cap is reached.
pub fn next_progress(previous: f64, sample: f64) -> f64 {
    if previous >= config::PROGRESS_CAP {
        return previous;
    }
    previous + sample.clamp(0.0, 1.0) * config::PROGRESS_MAX_STEP
}

/// Absolute timestamps (ms) of the loader's exit steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSchedule {
    pub complete_at: f64,
    pub reveal_at: f64,
    pub unmount_at: f64,
}

impl RevealSchedule {
    pub fn new(started_at: f64, loaded_at: f64, min_load_ms: u32) -> Self {
        let complete_at = loaded_at.max(started_at + min_load_ms as f64);
        let reveal_at = complete_at + config::REVEAL_DELAY_MS as f64;
        Self {
            complete_at,
            reveal_at,
            unmount_at: reveal_at + config::EXIT_DELAY_MS as f64,
        }
    }

    /// Delays from `now` until each step, never negative.
    pub fn delays_from(&self, now: f64) -> [u32; 3] {
        let delay = |at: f64| (at - now).max(0.0).ceil() as u32;
        [
            delay(self.complete_at),
            delay(self.reveal_at),
            delay(self.unmount_at),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoaderPhase {
    Loading,
    Complete,
    Exiting,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderState {
    pub progress: f64,
    pub phase: LoaderPhase,
}

impl Default for LoaderState {
    fn default() -> Self {
        Self {
            progress: 0.0,
            phase: LoaderPhase::Loading,
        }
    }
}

pub enum LoaderAction {
    Tick(f64),
    Complete,
    Reveal,
    Finish,
}

impl LoaderState {
    pub fn apply(&mut self, action: LoaderAction) {
        match action {
            LoaderAction::Tick(sample) => {
                if self.phase == LoaderPhase::Loading {
                    self.progress = next_progress(self.progress, sample);
                }
            }
            LoaderAction::Complete => {
                self.progress = 100.0;
                self.phase = self.phase.max(LoaderPhase::Complete);
            }
            LoaderAction::Reveal => self.phase = self.phase.max(LoaderPhase::Exiting),
            LoaderAction::Finish => self.phase = LoaderPhase::Done,
        }
    }

    pub fn content_visible(&self) -> bool {
        self.phase >= LoaderPhase::Exiting
    }

    pub fn display_progress(&self) -> f64 {
        self.progress.min(100.0)
    }
}

impl Reducible for LoaderState {
    type Action = LoaderAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

struct LoadListener {
    window: Window,
    callback: Closure<dyn Fn()>,
}

impl Drop for LoadListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("load", self.callback.as_ref().unchecked_ref());
    }
}

/// Runs `on_loaded` now if the document has finished loading, otherwise on
/// the window `load` event.
fn when_document_loaded(on_loaded: impl Fn() + 'static) -> Result<Option<LoadListener>, PageError> {
    let document = error::document()?;
    if document.ready_state() == "complete" {
        on_loaded();
        return Ok(None);
    }
    let window = error::window()?;
    let callback = Closure::<dyn Fn()>::new(on_loaded);
    window.add_event_listener_with_callback("load", callback.as_ref().unchecked_ref())?;
    Ok(Some(LoadListener { window, callback }))
}

#[derive(Properties, PartialEq)]
pub struct PageLoaderProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or(config::DEFAULT_MIN_LOAD_MS)]
    pub min_load_ms: u32,
    #[prop_or_default]
    pub on_load_complete: Option<Callback<()>>,
}

#[function_component(PageLoader)]
pub fn page_loader(props: &PageLoaderProps) -> Html {
    let state = use_reducer(LoaderState::default);

    {
        let dispatcher = state.dispatcher();
        let ticking = state.phase == LoaderPhase::Loading;
        use_interval(
            move || dispatcher.dispatch(LoaderAction::Tick(Math::random())),
            if ticking { config::PROGRESS_TICK_MS } else { 0 },
        );
    }

    {
        let dispatcher = state.dispatcher();
        let on_load_complete = props.on_load_complete.clone();
        use_effect_with_deps(
            move |min_load_ms| {
                let min_load_ms = *min_load_ms;
                let started_at = Date::now();
                let timers: Rc<RefCell<Vec<Timeout>>> = Rc::default();

                let begin_exit = {
                    let timers = timers.clone();
                    move || {
                        let now = Date::now();
                        let schedule = RevealSchedule::new(started_at, now, min_load_ms);
                        let [complete_in, reveal_in, unmount_in] = schedule.delays_from(now);
                        log::debug!("Page loaded, revealing in {}ms", reveal_in);

                        let mut timers = timers.borrow_mut();
                        timers.push(Timeout::new(complete_in, {
                            let dispatcher = dispatcher.clone();
                            move || dispatcher.dispatch(LoaderAction::Complete)
                        }));
                        timers.push(Timeout::new(reveal_in, {
                            let dispatcher = dispatcher.clone();
                            move || dispatcher.dispatch(LoaderAction::Reveal)
                        }));
                        timers.push(Timeout::new(unmount_in, {
                            let dispatcher = dispatcher.clone();
                            let on_load_complete = on_load_complete.clone();
                            move || {
                                dispatcher.dispatch(LoaderAction::Finish);
                                if let Some(callback) = on_load_complete {
                                    callback.emit(());
                                }
                            }
                        }));
                    }
                };

                let listener = match when_document_loaded(begin_exit) {
                    Ok(listener) => listener,
                    Err(e) => {
                        log::warn!("Page loader could not watch document load: {}", e);
                        None
                    }
                };

                move || {
                    drop(listener);
                    timers.borrow_mut().clear();
                }
            },
            props.min_load_ms,
        );
    }

    let content_style = if state.content_visible() {
        "opacity: 1; visibility: visible;"
    } else {
        "opacity: 0; visibility: hidden; pointer-events: none;"
    };
    let progress = state.display_progress();
    let exiting = state.phase >= LoaderPhase::Exiting;

    html! {
        <>
            <div class="loader-content" style={content_style}>
                { for props.children.iter() }
            </div>
            {
                if state.phase != LoaderPhase::Done {
                    html! {
                        <div class={classes!("page-loader", exiting.then(|| "exiting"))}>
                            <div class="loader-orb orb-one"></div>
                            <div class="loader-orb orb-two"></div>
                            <div class="loader-rings">
                                <div class="ring ring-outer"></div>
                                <div class="ring ring-middle"></div>
                                <div class="ring ring-inner"></div>
                            </div>
                            <div class="loader-crest">
                                <img src={config::CREST_PATH} alt="FC Barcelona" />
                            </div>
                            <div class="loader-status">
                                <h2 class="loader-title">{"FC BARCELONA"}</h2>
                                <div class="loader-bar">
                                    <div class="loader-bar-fill" style={format!("width: {:.1}%;", progress)}></div>
                                </div>
                                <p class="loader-hint">
                                    { if progress < 100.0 { "Press F11 For Better Experience" } else { "Welcome!" } }
                                </p>
                            </div>
                            <div class="loader-particles">
                                { for (0..15).map(|i| html! {
                                    <span
                                        class="particle"
                                        style={format!(
                                            "width: {size}px; height: {size}px; left: {left}%; top: {top}%; background: {color}; opacity: {opacity}; animation-duration: {duration:.1}s; animation-delay: {delay:.2}s;",
                                            size = 4 + (i % 3) * 2,
                                            left = 5 + i * 6,
                                            top = 15 + i * 5,
                                            color = if i % 2 == 0 { "var(--secondary)" } else { "var(--accent)" },
                                            opacity = 0.3 + (i % 3) as f64 * 0.2,
                                            duration = 4.0 + i as f64 * 0.4,
                                            delay = i as f64 * 0.15,
                                        )}
                                    />
                                }) }
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            <style>
                {r#"
                    .loader-content {
                        transition: opacity 0.5s ease;
                    }
                    .page-loader {
                        position: fixed;
                        inset: 0;
                        z-index: 9999;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        background: var(--primary);
                        overflow: hidden;
                        opacity: 1;
                        transform: scale(1);
                        transition: opacity 0.6s ease, transform 0.6s ease;
                    }
                    .page-loader.exiting {
                        opacity: 0;
                        transform: scale(1.1);
                    }
                    .loader-orb {
                        position: absolute;
                        width: 24rem;
                        height: 24rem;
                        border-radius: 50%;
                        filter: blur(64px);
                        animation: pulse 2s ease-in-out infinite;
                    }
                    .orb-one { top: 25%; left: 25%; background: rgba(153, 0, 64, 0.2); }
                    .orb-two { bottom: 25%; right: 25%; background: rgba(252, 197, 43, 0.15); animation-delay: 0.5s; }
                    .loader-rings {
                        position: absolute;
                        width: 16rem;
                        height: 16rem;
                    }
                    .ring {
                        position: absolute;
                        border-radius: 50%;
                        border-style: solid;
                        border-color: rgba(252, 197, 43, 0.2);
                    }
                    .ring-outer {
                        inset: 0;
                        border-width: 4px;
                        border-top-color: var(--secondary);
                        border-right-color: var(--accent);
                        animation: spin 2s linear infinite;
                    }
                    .ring-middle {
                        inset: 0.75rem;
                        border-width: 4px;
                        border-bottom-color: var(--secondary);
                        border-left-color: var(--accent);
                        animation: spin 3s linear infinite reverse;
                    }
                    .ring-inner {
                        inset: 1.5rem;
                        border-width: 2px;
                        border-top-color: var(--accent);
                        animation: spin 1.5s linear infinite;
                    }
                    .loader-crest {
                        position: relative;
                        width: 10rem;
                        height: 10rem;
                        z-index: 1;
                        perspective: 1000px;
                        animation: logo-wobble 3s ease-in-out infinite;
                    }
                    .loader-crest img {
                        width: 100%;
                        height: 100%;
                        object-fit: contain;
                        filter: drop-shadow(0 0 30px rgba(252, 197, 43, 0.6)) drop-shadow(0 0 60px rgba(153, 0, 64, 0.4));
                    }
                    .loader-status {
                        margin-top: 3rem;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        gap: 1rem;
                        z-index: 1;
                    }
                    .loader-title {
                        font-size: 1.875rem;
                        font-weight: 900;
                        letter-spacing: 0.2em;
                        color: transparent;
                        background: linear-gradient(90deg, var(--secondary), var(--accent), var(--secondary));
                        background-size: 200% 100%;
                        -webkit-background-clip: text;
                        background-clip: text;
                        animation: shimmer 2s linear infinite;
                    }
                    .loader-bar {
                        width: 16rem;
                        height: 6px;
                        border-radius: 9999px;
                        background: rgba(252, 197, 43, 0.2);
                        overflow: hidden;
                    }
                    .loader-bar-fill {
                        height: 100%;
                        border-radius: 9999px;
                        background: linear-gradient(90deg, var(--secondary), var(--accent), var(--secondary));
                        box-shadow: 0 0 20px rgba(252, 197, 43, 0.6), 0 0 40px rgba(153, 0, 64, 0.4);
                        transition: width 0.3s ease-out;
                    }
                    .loader-hint {
                        color: rgba(252, 197, 43, 0.6);
                        font-size: 0.875rem;
                        letter-spacing: 0.05em;
                    }
                    .loader-particles {
                        position: absolute;
                        inset: 0;
                        pointer-events: none;
                        overflow: hidden;
                    }
                    .particle {
                        position: absolute;
                        border-radius: 50%;
                        animation-name: float-up;
                        animation-timing-function: ease-in-out;
                        animation-iteration-count: infinite;
                    }
                    @keyframes logo-wobble {
                        0%, 100% { transform: rotateY(0deg) rotateX(0deg) scale(1); }
                        25% { transform: rotateY(20deg) rotateX(10deg) scale(1.08); }
                        50% { transform: rotateY(0deg) rotateX(0deg) scale(1.12); }
                        75% { transform: rotateY(-20deg) rotateX(-10deg) scale(1.08); }
                    }
                    @keyframes float-up {
                        0%, 100% { transform: translateY(0) translateX(0) scale(1); }
                        50% { transform: translateY(-40px) translateX(15px) scale(1.3); }
                    }
                "#}
            </style>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_stalls_at_cap() {
        assert_eq!(next_progress(0.0, 0.5), 6.0);
        assert_eq!(next_progress(89.0, 1.0), 101.0);
        assert_eq!(next_progress(90.0, 1.0), 90.0);
        assert_eq!(next_progress(10.0, 7.0), 22.0);
    }

    #[test]
    fn instant_load_still_waits_minimum() {
        let schedule = RevealSchedule::new(1_000.0, 1_000.0, 2_500);
        assert_eq!(schedule.complete_at, 3_500.0);
        assert_eq!(schedule.reveal_at, 3_800.0);
        assert_eq!(schedule.unmount_at, 4_400.0);
        assert_eq!(schedule.delays_from(1_000.0), [2_500, 2_800, 3_400]);
    }

    #[test]
    fn slow_load_completes_when_loaded() {
        let schedule = RevealSchedule::new(0.0, 5_000.0, 2_000);
        assert_eq!(schedule.complete_at, 5_000.0);
        assert_eq!(schedule.delays_from(5_000.0), [0, 300, 900]);
    }

    #[test]
    fn visible_time_never_below_minimum() {
        for loaded_at in [0.0, 10.0, 1_999.0, 2_000.0, 7_300.0] {
            let schedule = RevealSchedule::new(0.0, loaded_at, 2_000);
            assert!(schedule.complete_at >= 2_000.0);
            assert!(schedule.unmount_at - 0.0 >= 2_000.0);
        }
    }

    #[test]
    fn phases_only_move_forward() {
        let mut state = LoaderState::default();
        state.apply(LoaderAction::Tick(1.0));
        assert_eq!(state.progress, 12.0);

        state.apply(LoaderAction::Reveal);
        state.apply(LoaderAction::Complete);
        assert_eq!(state.phase, LoaderPhase::Exiting);
        assert_eq!(state.progress, 100.0);
        assert!(state.content_visible());

        state.apply(LoaderAction::Tick(1.0));
        assert_eq!(state.progress, 100.0);

        state.apply(LoaderAction::Finish);
        assert_eq!(state.phase, LoaderPhase::Done);
    }

    #[test]
    fn display_progress_is_clamped() {
        let state = LoaderState {
            progress: 101.0,
            phase: LoaderPhase::Loading,
        };
        assert_eq!(state.display_progress(), 100.0);
        assert!(!state.content_visible());
    }
}
