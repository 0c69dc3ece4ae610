use chrono::Datelike;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

use crate::components::navigation;
use crate::config;
use crate::motion::{self, Tilt};

const SOCIAL_LINKS: [(&str, &str, &str); 5] = [
    ("Twitter", "https://twitter.com/FCBarcelona", "𝕏"),
    ("Instagram", "https://instagram.com/fcbarcelona", "IG"),
    ("YouTube", "https://youtube.com/fcbarcelona", "▶"),
    ("TikTok", "https://tiktok.com/@fcbarcelona", "♪"),
    ("Facebook", "https://facebook.com/fcbarcelona", "f"),
];

const LINK_COLUMNS: [(&str, [(&str, &str); 4]); 3] = [
    (
        "Club",
        [
            ("About Us", "/about"),
            ("History", "/history"),
            ("Camp Nou", "/stadium"),
            ("Foundation", "/foundation"),
        ],
    ),
    (
        "Team",
        [
            ("First Team", "/first-team"),
            ("La Masía", "/la-masia"),
            ("Women's Team", "/women"),
            ("Coaching Staff", "/coaches"),
        ],
    ),
    (
        "Fans",
        [
            ("Membership", "/membership"),
            ("Tickets", "/tickets"),
            ("Official Store", "/shop"),
            ("Stadium Tours", "/tours"),
        ],
    ),
];

const LEGAL_LINKS: [(&str, &str); 3] = [
    ("Privacy Policy", "/privacy"),
    ("Terms of Service", "/terms"),
    ("Cookie Settings", "/cookies"),
];

fn title_transform(tilt: Tilt, hovering: bool) -> String {
    format!(
        "transform: rotateX({:.2}deg) rotateY({:.2}deg) translateZ({});",
        tilt.rotate_x,
        tilt.rotate_y,
        if hovering { "50px" } else { "0px" }
    )
}

#[function_component(Footer)]
pub fn footer() -> Html {
    let title_ref = use_node_ref();
    let tilt = use_state(Tilt::default);
    let hovering = use_state(|| false);
    let year = use_memo(|_| chrono::Local::now().year(), ());

    let on_move = {
        let title_ref = title_ref.clone();
        let tilt = tilt.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(title) = title_ref.cast::<Element>() else {
                return;
            };
            let rect = title.get_bounding_client_rect();
            tilt.set(motion::tilt(
                e.client_x() as f64,
                e.client_y() as f64,
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height(),
            ));
        })
    };
    let on_enter = {
        let hovering = hovering.clone();
        Callback::from(move |_: MouseEvent| hovering.set(true))
    };
    let on_leave = {
        let hovering = hovering.clone();
        let tilt = tilt.clone();
        Callback::from(move |_: MouseEvent| {
            tilt.set(Tilt::default());
            hovering.set(false);
        })
    };

    html! {
        <footer id={navigation::NEWS_SECTION} class="site-footer">
            <div class="footer-orbs">
                <div class="footer-orb orb-top"></div>
                <div class="footer-orb orb-bottom"></div>
            </div>
            <div class="footer-glow-line"></div>

            <div class="footer-inner">
                <div class="footer-main">
                    <div class="footer-brand">
                        <div class="footer-brand-row">
                            <img class="footer-crest" src={config::CREST_PATH} alt="FC Barcelona" />
                            <div>
                                <h3>{"FC BARCELONA"}</h3>
                                <p class="footer-motto">{"Més que un club"}</p>
                            </div>
                        </div>
                        <p class="footer-blurb">
                            {"Experience the passion, history, and glory of FC Barcelona. Join millions of culés worldwide in celebrating the beautiful game."}
                        </p>
                        <div class="footer-socials">
                            { for SOCIAL_LINKS.iter().map(|(label, href, glyph)| html! {
                                <a class="social-icon" href={*href} target="_blank" rel="noopener noreferrer" aria-label={*label}>
                                    <span>{*glyph}</span>
                                </a>
                            }) }
                        </div>
                    </div>

                    <div class="footer-columns">
                        { for LINK_COLUMNS.iter().map(|(heading, links)| html! {
                            <div class="footer-column">
                                <h4>{*heading}</h4>
                                <nav>
                                    { for links.iter().map(|(label, href)| html! {
                                        <a class="footer-link" href={*href}>{*label}</a>
                                    }) }
                                </nav>
                            </div>
                        }) }
                    </div>
                </div>

                <div class="footer-title-wrap">
                    <h2
                        ref={title_ref}
                        class={classes!("footer-title", (*hovering).then(|| "hovering"))}
                        style={title_transform(*tilt, *hovering)}
                        onmousemove={on_move}
                        onmouseenter={on_enter}
                        onmouseleave={on_leave}
                    >
                        {"FC BARCELONA"}
                    </h2>
                    <div class="footer-divider">
                        <span class="divider-line"></span>
                        <span class="divider-dot"></span>
                        <span class="divider-line"></span>
                    </div>
                </div>

                <div class="footer-bottom">
                    <p>{format!("© {} FC Barcelona. All rights reserved.", *year)}</p>
                    <div class="footer-legal">
                        { for LEGAL_LINKS.iter().map(|(label, href)| html! {
                            <a class="footer-link" href={*href}>{*label}</a>
                        }) }
                    </div>
                </div>
            </div>
            <style>
                {r#"
                    .site-footer {
                        position: relative;
                        overflow: hidden;
                        background: var(--primary);
                    }
                    .footer-orbs {
                        position: absolute;
                        inset: 0;
                        overflow: hidden;
                        pointer-events: none;
                    }
                    .footer-orb {
                        position: absolute;
                        width: 24rem;
                        height: 24rem;
                        border-radius: 50%;
                        filter: blur(64px);
                        animation: pulse 2s ease-in-out infinite;
                    }
                    .orb-top { top: -10rem; right: -10rem; background: rgba(153, 0, 64, 0.2); }
                    .orb-bottom { bottom: -10rem; left: -10rem; background: rgba(252, 197, 43, 0.1); animation-delay: 1s; }
                    .footer-glow-line {
                        position: absolute;
                        top: 0;
                        left: 0;
                        right: 0;
                        height: 1px;
                        background: linear-gradient(90deg, transparent, rgba(252, 197, 43, 0.5), transparent);
                    }
                    .footer-inner {
                        position: relative;
                        z-index: 10;
                        max-width: 80rem;
                        margin: 0 auto;
                        padding: 5rem 2rem 2.5rem;
                    }
                    .footer-main {
                        display: grid;
                        grid-template-columns: 5fr 7fr;
                        gap: 3rem;
                        margin-bottom: 4rem;
                    }
                    .footer-brand-row {
                        display: flex;
                        align-items: center;
                        gap: 1rem;
                    }
                    .footer-crest {
                        width: 4rem;
                        height: 4rem;
                        object-fit: contain;
                        transition: transform 0.5s ease;
                    }
                    .footer-crest:hover {
                        transform: scale(1.1) rotate(12deg);
                    }
                    .footer-brand h3 {
                        color: var(--secondary);
                        font-weight: 700;
                        font-size: 1.25rem;
                        letter-spacing: 0.025em;
                    }
                    .footer-motto {
                        color: rgba(252, 197, 43, 0.5);
                        font-size: 0.875rem;
                    }
                    .footer-blurb {
                        max-width: 28rem;
                        margin: 1.5rem 0;
                        color: rgba(252, 197, 43, 0.6);
                        font-size: 0.875rem;
                        line-height: 1.625;
                    }
                    .footer-socials {
                        display: flex;
                        gap: 0.75rem;
                    }
                    .social-icon {
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        width: 2.5rem;
                        height: 2.5rem;
                        border-radius: 0.75rem;
                        border: 1px solid rgba(252, 197, 43, 0.2);
                        background: rgba(10, 31, 68, 0.5);
                        color: rgba(252, 197, 43, 0.7);
                        text-decoration: none;
                        font-weight: 700;
                        transition: transform 0.3s ease, border-color 0.3s ease, color 0.3s ease;
                    }
                    .social-icon:hover {
                        transform: scale(1.1);
                        border-color: rgba(252, 197, 43, 0.6);
                        color: var(--secondary);
                    }
                    .footer-columns {
                        display: grid;
                        grid-template-columns: repeat(3, 1fr);
                        gap: 2rem;
                    }
                    .footer-column h4 {
                        margin-bottom: 1rem;
                        color: var(--secondary);
                        font-size: 0.875rem;
                        font-weight: 600;
                        text-transform: uppercase;
                        letter-spacing: 0.05em;
                    }
                    .footer-column nav {
                        display: flex;
                        flex-direction: column;
                        gap: 0.75rem;
                    }
                    .footer-link {
                        color: rgba(252, 197, 43, 0.7);
                        font-size: 0.875rem;
                        text-decoration: none;
                        background: linear-gradient(var(--secondary), var(--secondary)) no-repeat left bottom / 0 1px;
                        transition: color 0.3s ease, background-size 0.3s ease;
                    }
                    .footer-link:hover {
                        color: var(--secondary);
                        background-size: 100% 1px;
                    }
                    .footer-title-wrap {
                        position: relative;
                        display: flex;
                        justify-content: center;
                        padding: 3rem 0;
                        border-top: 1px solid rgba(252, 197, 43, 0.1);
                        perspective: 1000px;
                    }
                    .footer-title {
                        font-size: 8rem;
                        font-weight: 900;
                        color: transparent;
                        background: linear-gradient(135deg, var(--secondary), var(--accent), var(--secondary));
                        background-size: 200% 200%;
                        -webkit-background-clip: text;
                        background-clip: text;
                        cursor: pointer;
                        user-select: none;
                        transform-style: preserve-3d;
                        transition: transform 0.2s ease-out, filter 0.2s ease-out;
                        animation: gradient-shift 3s ease infinite;
                    }
                    .footer-title.hovering {
                        filter: drop-shadow(0 0 30px rgba(252, 197, 43, 0.4));
                        text-shadow: 0 0 40px rgba(252, 197, 43, 0.5), 0 0 80px rgba(153, 0, 64, 0.3), 0 20px 60px rgba(0, 0, 0, 0.5);
                    }
                    .footer-divider {
                        position: absolute;
                        bottom: 0;
                        left: 50%;
                        transform: translateX(-50%);
                        display: flex;
                        align-items: center;
                        gap: 0.5rem;
                    }
                    .divider-line {
                        width: 5rem;
                        height: 2px;
                        background: linear-gradient(90deg, transparent, rgba(252, 197, 43, 0.5));
                    }
                    .divider-line:last-child {
                        transform: scaleX(-1);
                    }
                    .divider-dot {
                        width: 0.5rem;
                        height: 0.5rem;
                        border-radius: 50%;
                        background: var(--accent);
                        animation: pulse 2s ease-in-out infinite;
                    }
                    .footer-bottom {
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        gap: 1rem;
                        padding-top: 2rem;
                        border-top: 1px solid rgba(252, 197, 43, 0.1);
                        color: rgba(252, 197, 43, 0.4);
                        font-size: 0.875rem;
                    }
                    .footer-legal {
                        display: flex;
                        gap: 1.5rem;
                    }
                    @keyframes gradient-shift {
                        0%, 100% { background-position: 0% 50%; }
                        50% { background-position: 100% 50%; }
                    }
                    @media (max-width: 1024px) {
                        .footer-main {
                            grid-template-columns: 1fr;
                        }
                        .footer-title {
                            font-size: 4rem;
                        }
                    }
                    @media (max-width: 768px) {
                        .footer-columns {
                            grid-template-columns: repeat(2, 1fr);
                        }
                        .footer-bottom {
                            flex-direction: column;
                        }
                    }
                "#}
            </style>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_lifts_only_while_hovered() {
        let tilt = Tilt {
            rotate_x: 15.0,
            rotate_y: -7.5,
        };
        assert_eq!(
            title_transform(tilt, true),
            "transform: rotateX(15.00deg) rotateY(-7.50deg) translateZ(50px);"
        );
        assert!(title_transform(Tilt::default(), false).ends_with("translateZ(0px);"));
    }
}
