use web_sys::js_sys::Math;
use yew::prelude::*;
use yew_hooks::use_interval;

use crate::config;

const PARTICLES: usize = 12;

/// Next value of the standalone progress bar, saturating at 100.
pub fn advance(previous: f64, sample: f64) -> f64 {
    if previous >= 100.0 {
        return 100.0;
    }
    (previous + sample.clamp(0.0, 1.0) * config::LOADING_MAX_STEP).min(100.0)
}

fn particle_style(index: usize) -> String {
    let colour = if index % 2 == 0 { "var(--secondary)" } else { "var(--accent)" };
    format!(
        "background: {}; left: {}%; top: {}%; animation: float-particle {:.1}s ease-in-out infinite; animation-delay: {:.1}s;",
        colour,
        10 + index * 7,
        20 + index * 5,
        3.0 + index as f64 * 0.3,
        index as f64 * 0.2,
    )
}

/// Full-screen placeholder shown while the router suspends.
#[function_component(Loading)]
pub fn loading() -> Html {
    let progress = use_state(|| 0.0_f64);

    {
        let progress = progress.clone();
        let running = *progress < 100.0;
        use_interval(
            move || progress.set(advance(*progress, Math::random())),
            if running { config::LOADING_TICK_MS } else { 0 },
        );
    }

    html! {
        <div class="loading-view">
            <div class="loading-orbs">
                <div class="loading-orb orb-a"></div>
                <div class="loading-orb orb-b"></div>
                <div class="loading-orb orb-c"></div>
            </div>
            <div class="loading-rings">
                <div class="loading-ring ring-outer"></div>
                <div class="loading-ring ring-middle"></div>
                <div class="loading-ring ring-inner"></div>
            </div>
            <div class="loading-crest">
                <img src={config::CREST_PATH} alt="FC Barcelona" />
            </div>
            <div class="loading-copy">
                <h2>{"FC BARCELONA"}</h2>
                <div class="loading-track">
                    <div class="loading-fill" style={format!("width: {:.1}%;", *progress)}></div>
                </div>
                <p>{"Press F11 For Better Experience"}</p>
            </div>
            <div class="loading-particles">
                { for (0..PARTICLES).map(|i| html! {
                    <div class="loading-particle" style={particle_style(i)}></div>
                }) }
            </div>
            <style>
                {r#"
                    .loading-view {
                        position: fixed;
                        inset: 0;
                        z-index: 9999;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        overflow: hidden;
                        background: var(--primary);
                    }
                    .loading-orbs, .loading-particles {
                        position: absolute;
                        inset: 0;
                        overflow: hidden;
                        pointer-events: none;
                    }
                    .loading-orb {
                        position: absolute;
                        width: 24rem;
                        height: 24rem;
                        border-radius: 50%;
                        filter: blur(64px);
                        animation: pulse 2s ease-in-out infinite;
                    }
                    .orb-a { top: 25%; left: 25%; background: rgba(153, 0, 64, 0.2); }
                    .orb-b { bottom: 25%; right: 25%; background: rgba(252, 197, 43, 0.15); animation-delay: 0.5s; }
                    .orb-c { top: 50%; left: 50%; width: 500px; height: 500px; transform: translate(-50%, -50%); background: rgba(153, 0, 64, 0.1); animation-delay: 1s; }
                    .loading-rings {
                        position: absolute;
                        width: 16rem;
                        height: 16rem;
                    }
                    .loading-ring {
                        position: absolute;
                        border-radius: 50%;
                    }
                    .ring-outer {
                        inset: 0;
                        border: 4px solid rgba(252, 197, 43, 0.2);
                        border-top-color: var(--secondary);
                        border-right-color: var(--accent);
                        animation: spin 2s linear infinite;
                    }
                    .ring-middle {
                        inset: 0.5rem;
                        border: 4px solid rgba(153, 0, 64, 0.2);
                        border-bottom-color: var(--secondary);
                        border-left-color: var(--accent);
                        animation: spin 3s linear infinite reverse;
                    }
                    .ring-inner {
                        inset: 1rem;
                        border: 2px solid rgba(252, 197, 43, 0.3);
                        border-top-color: var(--accent);
                        animation: spin 1.5s linear infinite;
                    }
                    .loading-crest {
                        position: relative;
                        width: 10rem;
                        height: 10rem;
                        perspective: 1000px;
                        transform-style: preserve-3d;
                    }
                    .loading-crest img {
                        width: 100%;
                        height: 100%;
                        object-fit: contain;
                        filter: drop-shadow(0 0 30px rgba(252, 197, 43, 0.6)) drop-shadow(0 0 60px rgba(153, 0, 64, 0.4));
                        animation: logo-3d-rotate 3s ease-in-out infinite;
                    }
                    .loading-copy {
                        z-index: 10;
                        margin-top: 3rem;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        gap: 1rem;
                    }
                    .loading-copy h2 {
                        font-size: 1.875rem;
                        font-weight: 900;
                        letter-spacing: 0.1em;
                        color: transparent;
                        background: linear-gradient(90deg, var(--secondary), var(--accent), var(--secondary));
                        background-size: 200% 100%;
                        -webkit-background-clip: text;
                        background-clip: text;
                        animation: shimmer 2s linear infinite;
                    }
                    .loading-copy p {
                        color: rgba(252, 197, 43, 0.6);
                        font-size: 0.875rem;
                        letter-spacing: 0.05em;
                        animation: pulse 2s ease-in-out infinite;
                    }
                    .loading-track {
                        width: 16rem;
                        height: 0.25rem;
                        overflow: hidden;
                        border-radius: 9999px;
                        background: rgba(252, 197, 43, 0.2);
                    }
                    .loading-fill {
                        height: 100%;
                        border-radius: 9999px;
                        background: linear-gradient(90deg, var(--secondary), var(--accent), var(--secondary));
                        box-shadow: 0 0 20px rgba(252, 197, 43, 0.6);
                        transition: width 0.3s ease-out;
                    }
                    .loading-particle {
                        position: absolute;
                        width: 0.5rem;
                        height: 0.5rem;
                        border-radius: 50%;
                        opacity: 0.4;
                    }
                    @keyframes logo-3d-rotate {
                        0%, 100% { transform: rotateY(0deg) rotateX(0deg) scale(1); }
                        25% { transform: rotateY(15deg) rotateX(10deg) scale(1.05); }
                        50% { transform: rotateY(0deg) rotateX(0deg) scale(1.1); }
                        75% { transform: rotateY(-15deg) rotateX(-10deg) scale(1.05); }
                    }
                    @keyframes float-particle {
                        0%, 100% { transform: translateY(0) translateX(0) scale(1); opacity: 0.4; }
                        50% { transform: translateY(-30px) translateX(10px) scale(1.5); opacity: 0.8; }
                    }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_saturates_at_one_hundred() {
        assert_eq!(advance(95.0, 1.0), 100.0);
        assert_eq!(advance(100.0, 0.5), 100.0);
        assert_eq!(advance(120.0, 0.0), 100.0);
    }

    #[test]
    fn steps_never_exceed_the_maximum() {
        let mut progress = 0.0;
        for _ in 0..3 {
            let next = advance(progress, 1.0);
            assert!(next - progress <= config::LOADING_MAX_STEP);
            progress = next;
        }
        assert_eq!(progress, 45.0);
    }

    #[test]
    fn particles_alternate_colours() {
        assert!(particle_style(0).starts_with("background: var(--secondary);"));
        assert!(particle_style(1).starts_with("background: var(--accent);"));
        assert!(particle_style(2).contains("left: 24%; top: 30%;"));
    }
}
