use log::{info, warn};
use yew::prelude::*;
use yew::suspense::Suspense;
use yew_router::prelude::*;

mod config;
mod data;
mod error;
mod frame;
mod motion;
mod observer;
mod components {
    pub mod audio_toggle;
    pub mod footer;
    pub mod gallery;
    pub mod navigation;
    pub mod page_loader;
    pub mod standings;
    pub mod velocity_marquee;
}
mod pages {
    pub mod home;
    pub mod loading;
    pub mod not_found;
}

use observer::ViewportObserver;
use pages::{home::Home, loading::Loading, not_found::NotFound};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    let observer = use_memo(|_| ViewportObserver::new(), ());

    {
        let observer = (*observer).clone();
        use_effect_with_deps(
            move |_| {
                match observer.attach() {
                    // Subscribers registered during the first render get their
                    // initial snapshot here.
                    Ok(()) => observer.refresh(),
                    Err(e) => warn!("Scroll and pointer effects disabled: {}", e),
                }
                move || observer.detach()
            },
            (),
        );
    }

    html! {
        <ContextProvider<ViewportObserver> context={(*observer).clone()}>
            <BrowserRouter>
                <Suspense fallback={html! { <Loading /> }}>
                    <Switch<Route> render={switch} />
                </Suspense>
            </BrowserRouter>
        </ContextProvider<ViewportObserver>>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    if console_log::init_with_level(config::log_level()).is_err() {
        // A logger is already installed; keep using it.
        gloo_console::warn!("console logger was already initialised");
    }

    let rows = data::standings();
    let inconsistent = data::standings_inconsistencies(&rows);
    for row in &inconsistent {
        warn!(
            "Standings row for {} lists goal difference {} but scored {} and conceded {}",
            row.club, row.goal_difference, row.goals_for, row.goals_against
        );
    }

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
