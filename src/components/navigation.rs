use web_sys::MouseEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::motion;
use crate::observer::use_scroll;
use crate::Route;

pub const TEAM_SECTION: &str = "team";
/// The standings table carries the match results.
pub const MATCHES_SECTION: &str = "matches";
/// The footer holds the club news links.
pub const NEWS_SECTION: &str = "news";
pub const GALLERY_SECTION: &str = "gallery";

/// In-page sections reachable from the bar, as (label, element id).
pub const SECTION_LINKS: [(&str, &str); 4] = [
    ("Team", TEAM_SECTION),
    ("Matches", MATCHES_SECTION),
    ("News", NEWS_SECTION),
    ("Gallery", GALLERY_SECTION),
];

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub show: bool,
}

#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    let compact = use_state(|| false);
    let menu_open = use_state(|| false);

    {
        let compact = compact.clone();
        use_scroll(move |snapshot| {
            let next = motion::nav_is_compact(snapshot.scroll_y);
            if *compact != next {
                compact.set(next);
            }
        });
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    html! {
        <nav class={classes!("top-nav", (!props.show).then(|| "hidden"), (*compact).then(|| "compact"))}>
            <div class="nav-shell">
                <div class="nav-glass">
                    <Link<Route> to={Route::Home} classes="nav-brand">
                        <span class="nav-badge">{"FC"}</span>
                        <span class="nav-brand-name">{"BARÇA"}</span>
                    </Link<Route>>

                    <div class={classes!("nav-links", (*menu_open).then(|| "open"))}>
                        { for SECTION_LINKS.iter().map(|(label, id)| html! {
                            <a href={format!("#{}", id)} class="nav-link" onclick={close_menu.clone()}>
                                {*label}
                                <span class="nav-underline"></span>
                            </a>
                        }) }
                    </div>

                    <div class="nav-actions">
                        <button class="nav-cta">{"Join Fan Club"}</button>
                        <button class="burger-menu" aria-label="Toggle menu" onclick={toggle_menu}>
                            <span></span>
                            <span></span>
                            <span></span>
                        </button>
                    </div>
                </div>
            </div>
            <style>
                {r#"
                    .top-nav {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 50;
                        transform: translateY(0);
                        opacity: 1;
                        transition: transform 0.5s ease, opacity 0.5s ease;
                    }
                    .top-nav.hidden {
                        transform: translateY(-100%);
                        opacity: 0;
                        pointer-events: none;
                    }
                    .nav-shell {
                        max-width: 80rem;
                        margin: 0 auto;
                        padding: 1.25rem 0;
                        transition: padding 0.3s ease;
                    }
                    .top-nav.compact .nav-shell {
                        padding: 0.75rem 0;
                    }
                    .nav-glass {
                        margin: 0 1rem;
                        padding: 1rem 1.5rem;
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        border-radius: 1rem;
                        border: 1px solid var(--secondary);
                        background: rgba(10, 31, 68, 0.3);
                        backdrop-filter: blur(12px);
                        box-shadow: 0 8px 32px 0 rgba(0, 0, 0, 0.37);
                        transition: background 0.3s ease;
                    }
                    .top-nav.compact .nav-glass {
                        background: rgba(10, 31, 68, 0.8);
                    }
                    .nav-brand {
                        display: flex;
                        align-items: center;
                        gap: 0.75rem;
                        text-decoration: none;
                    }
                    .nav-badge {
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        width: 2rem;
                        height: 2rem;
                        border-radius: 50%;
                        background: linear-gradient(135deg, var(--secondary), #eab308);
                        color: var(--primary);
                        font-weight: 700;
                        transition: transform 0.3s ease;
                    }
                    .nav-brand:hover .nav-badge {
                        transform: scale(1.1);
                    }
                    .nav-brand-name {
                        color: #fff;
                        font-weight: 700;
                        font-size: 1.125rem;
                    }
                    .nav-links {
                        display: flex;
                        gap: 2rem;
                    }
                    .nav-link {
                        position: relative;
                        color: rgba(255, 255, 255, 0.9);
                        font-weight: 500;
                        text-decoration: none;
                        transition: color 0.3s ease;
                    }
                    .nav-link:hover {
                        color: var(--secondary);
                    }
                    .nav-underline {
                        position: absolute;
                        left: 0;
                        bottom: -4px;
                        width: 0;
                        height: 2px;
                        background: var(--secondary);
                        transition: width 0.3s ease;
                    }
                    .nav-link:hover .nav-underline {
                        width: 100%;
                    }
                    .nav-actions {
                        display: flex;
                        align-items: center;
                        gap: 1rem;
                    }
                    .nav-cta {
                        padding: 0.25rem 1.5rem;
                        border: none;
                        border-radius: 9999px;
                        background: linear-gradient(90deg, var(--secondary), #fef9c3);
                        color: var(--primary);
                        font-weight: 700;
                        cursor: pointer;
                        transition: transform 0.3s ease, box-shadow 0.3s ease;
                    }
                    .nav-cta:hover {
                        transform: scale(1.05);
                        box-shadow: 0 10px 15px rgba(252, 197, 43, 0.5);
                    }
                    .burger-menu {
                        display: none;
                        flex-direction: column;
                        gap: 4px;
                        padding: 0.5rem;
                        background: none;
                        border: none;
                        cursor: pointer;
                    }
                    .burger-menu span {
                        display: block;
                        width: 1.5rem;
                        height: 2px;
                        background: #fff;
                    }
                    @media (max-width: 768px) {
                        .burger-menu {
                            display: flex;
                        }
                        .nav-cta {
                            display: none;
                        }
                        .nav-links {
                            display: none;
                            position: absolute;
                            top: 100%;
                            left: 1rem;
                            right: 1rem;
                            flex-direction: column;
                            gap: 1rem;
                            padding: 1.5rem;
                            border-radius: 1rem;
                            background: rgba(10, 31, 68, 0.95);
                        }
                        .nav-links.open {
                            display: flex;
                        }
                    }
                "#}
            </style>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_links_point_at_distinct_sections() {
        let mut ids: Vec<&str> = SECTION_LINKS.iter().map(|(_, id)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SECTION_LINKS.len());
        assert!(ids.iter().all(|id| !id.is_empty() && !id.starts_with('#')));
    }

    #[test]
    fn matches_and_news_have_anchors() {
        let ids: Vec<&str> = SECTION_LINKS.iter().map(|(_, id)| *id).collect();
        assert!(ids.contains(&MATCHES_SECTION));
        assert!(ids.contains(&NEWS_SECTION));
    }
}
