use yew::prelude::*;
use yew_router::prelude::*;

use crate::config;
use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found">
            <img src={config::CREST_PATH} alt="Not Found" width="200" height="200" />
            <div class="not-found-copy">
                <h1>{"404"}</h1>
                <h2>{"Page Not Found"}</h2>
                <Link<Route> to={Route::Home} classes="not-found-home">
                    {"Back to Home"}
                </Link<Route>>
            </div>
            <style>
                {r#"
                    .not-found {
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        gap: 2rem;
                        height: 100vh;
                        background: var(--primary);
                        color: var(--accent);
                        font-size: 1.875rem;
                    }
                    .not-found-copy {
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        gap: 0.5rem;
                    }
                    .not-found-home {
                        color: var(--secondary);
                        font-size: 1.5rem;
                        text-decoration: none;
                        transition: color 0.2s ease;
                    }
                    .not-found-home:hover {
                        color: #f59e0b;
                    }
                "#}
            </style>
        </div>
    }
}
