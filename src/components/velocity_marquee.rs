use web_sys::js_sys::Date;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config;
use crate::frame::FrameLoop;
use crate::motion;
use crate::observer::use_scroll;

const COPIES: usize = 6;
const VELOCITY_SMOOTHING: f64 = 0.3;
const VELOCITY_DECAY: f64 = 0.92;
/// Scroll speed (px/s) at which the marquee runs at six times its base rate.
const FULL_BOOST_SPEED: f64 = 1000.0;
const FULL_BOOST_FACTOR: f64 = 5.0;

/// Smoothed page scroll speed in px/s, signed by direction.
#[derive(Debug, Clone, Default)]
pub struct ScrollVelocity {
    last: Option<(f64, f64)>,
    velocity: f64,
}

impl ScrollVelocity {
    pub fn record(&mut self, scroll_y: f64, now_ms: f64) {
        if let Some((last_y, last_ms)) = self.last {
            let elapsed = now_ms - last_ms;
            if elapsed > 0.0 {
                let instant = (scroll_y - last_y) / elapsed * 1000.0;
                self.velocity += (instant - self.velocity) * VELOCITY_SMOOTHING;
            }
        }
        self.last = Some((scroll_y, now_ms));
    }

    /// Called once per frame so the boost fades once scrolling stops.
    pub fn decay(&mut self) {
        self.velocity *= VELOCITY_DECAY;
        if self.velocity.abs() < 0.01 {
            self.velocity = 0.0;
        }
    }

    pub fn factor(&self) -> f64 {
        self.velocity / FULL_BOOST_SPEED * FULL_BOOST_FACTOR
    }
}

/// One line of text drifting horizontally.
#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeRow {
    base_velocity: f64,
    direction: f64,
    offset: f64,
}

impl MarqueeRow {
    pub fn new(base_velocity: f64) -> Self {
        Self {
            base_velocity,
            direction: 1.0,
            offset: 0.0,
        }
    }

    /// Advance by `delta_ms` and return the wrapped offset for a copy of
    /// `copy_width` pixels. Scrolling up reverses the drift.
    pub fn advance(&mut self, delta_ms: f64, factor: f64, copy_width: f64) -> f64 {
        if factor < 0.0 {
            self.direction = -1.0;
        } else if factor > 0.0 {
            self.direction = 1.0;
        }
        let mut step = self.direction * self.base_velocity * delta_ms / 1000.0;
        step += self.direction * step * factor;
        self.offset += step;
        motion::wrap_offset(self.offset, copy_width)
    }
}

#[derive(Properties, PartialEq)]
pub struct VelocityMarqueeProps {
    pub texts: Vec<AttrValue>,
    #[prop_or(config::MARQUEE_BASE_VELOCITY)]
    pub velocity: f64,
}

#[function_component(VelocityMarquee)]
pub fn velocity_marquee(props: &VelocityMarqueeProps) -> Html {
    let refs = use_memo(
        |texts| {
            texts
                .iter()
                .map(|_| (NodeRef::default(), NodeRef::default()))
                .collect::<Vec<_>>()
        },
        props.texts.clone(),
    );
    let scroll_velocity = use_mut_ref(ScrollVelocity::default);

    {
        let scroll_velocity = scroll_velocity.clone();
        use_scroll(move |snapshot| {
            scroll_velocity
                .borrow_mut()
                .record(snapshot.scroll_y, Date::now());
        });
    }

    {
        let scroll_velocity = scroll_velocity.clone();
        use_effect_with_deps(
            move |(refs, base_velocity)| {
                let refs = refs.clone();
                let mut rows: Vec<MarqueeRow> = (0..refs.len())
                    .map(|i| {
                        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                        MarqueeRow::new(sign * *base_velocity)
                    })
                    .collect();
                let mut last_frame: Option<f64> = None;

                let frame = FrameLoop::start(move |timestamp| {
                    let delta = last_frame.map_or(0.0, |last| timestamp - last);
                    last_frame = Some(timestamp);
                    let factor = {
                        let mut velocity = scroll_velocity.borrow_mut();
                        velocity.decay();
                        velocity.factor()
                    };
                    for (row, (track, copy)) in rows.iter_mut().zip(refs.iter()) {
                        let Some(track) = track.cast::<HtmlElement>() else {
                            continue;
                        };
                        let width = copy
                            .cast::<HtmlElement>()
                            .map(|c| c.offset_width() as f64)
                            .unwrap_or(0.0);
                        let x = row.advance(delta, factor, width);
                        let _ = track.set_attribute(
                            "style",
                            &format!("transform: translate3d({:.2}px, 0, 0);", x),
                        );
                    }
                });
                let frame = match frame {
                    Ok(frame) => Some(frame),
                    Err(e) => {
                        log::error!("Marquee animation could not start: {}", e);
                        None
                    }
                };
                move || drop(frame)
            },
            (refs.clone(), props.velocity),
        );
    }

    html! {
        <section class="velocity-marquee">
            { for props.texts.iter().zip(refs.iter()).map(|(text, (track, copy))| html! {
                <div class="marquee-parallax">
                    <div class="marquee-track" ref={track.clone()}>
                        { for (0..COPIES).map(|i| html! {
                            <span
                                class="marquee-text"
                                ref={if i == 0 { copy.clone() } else { NodeRef::default() }}
                            >
                                {text.clone()}
                            </span>
                        }) }
                    </div>
                </div>
            }) }
            <style>
                {r#"
                    .velocity-marquee {
                        position: relative;
                        width: 100%;
                    }
                    .marquee-parallax {
                        position: relative;
                        overflow: hidden;
                    }
                    .marquee-track {
                        display: flex;
                        white-space: nowrap;
                        will-change: transform;
                    }
                    .marquee-text {
                        flex-shrink: 0;
                        padding-right: 0.5em;
                        color: #fff;
                        font-size: 5rem;
                        font-weight: 900;
                        letter-spacing: -0.02em;
                        text-transform: uppercase;
                        text-shadow: 0 4px 20px rgba(0, 0, 0, 0.5);
                    }
                    .marquee-text::after {
                        content: "•";
                        padding-left: 0.5em;
                        color: var(--secondary);
                    }
                    @media (max-width: 768px) {
                        .marquee-text {
                            font-size: 2.5rem;
                        }
                    }
                "#}
            </style>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_drift_at_base_speed_without_scrolling() {
        let mut row = MarqueeRow::new(70.0);
        // 70 px/s for half a second, wrapped into a 200px copy.
        let x = row.advance(500.0, 0.0, 200.0);
        assert!((x - (35.0 - 200.0)).abs() < 1e-9);
    }

    #[test]
    fn scrolling_down_boosts_and_up_reverses() {
        let mut still = MarqueeRow::new(70.0);
        let mut boosted = MarqueeRow::new(70.0);
        still.advance(100.0, 0.0, 10_000.0);
        boosted.advance(100.0, 1.0, 10_000.0);
        assert!(boosted.offset > still.offset);

        let mut reversed = MarqueeRow::new(70.0);
        reversed.advance(100.0, -1.0, 10_000.0);
        assert!(reversed.offset < 0.0);
    }

    #[test]
    fn velocity_tracks_scroll_and_fades() {
        let mut velocity = ScrollVelocity::default();
        velocity.record(0.0, 0.0);
        velocity.record(100.0, 100.0);
        assert!(velocity.factor() > 0.0);

        for _ in 0..500 {
            velocity.decay();
        }
        assert_eq!(velocity.factor(), 0.0);
    }

    #[test]
    fn zero_width_copy_pins_the_row() {
        let mut row = MarqueeRow::new(-70.0);
        assert_eq!(row.advance(1000.0, 0.0, 0.0), 0.0);
    }
}
