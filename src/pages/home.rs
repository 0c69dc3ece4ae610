use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{AddEventListenerOptions, Blob, Element, EventTarget, HtmlVideoElement, Url};
use yew::prelude::*;

use crate::components::{
    audio_toggle::AudioToggle,
    footer::Footer,
    gallery::{Gallery, PinEvent},
    navigation::{self, Navigation},
    page_loader::PageLoader,
    standings::Standings,
    velocity_marquee::VelocityMarquee,
};
use crate::config;
use crate::error::{self, PageError};
use crate::frame::FrameLoop;
use crate::motion::{self, LogoFlight, RegionEvent, RegionTracker, VideoScrubber};
use crate::observer::{use_scroll, ViewportObserver};

/// `HAVE_METADATA` from the media element ready states.
const HAVE_METADATA: u16 = 1;

/// An event listener that is removed when dropped.
struct DomListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn Fn()>,
}

impl DomListener {
    fn new(target: EventTarget, event: &'static str, once: bool, f: impl Fn() + 'static) -> Result<Self, PageError> {
        let callback = Closure::<dyn Fn()>::new(f);
        let options = AddEventListenerOptions::new();
        options.set_once(once);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target, event, callback })
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// iOS only lets a muted inline video seek after a user gesture, so the
/// first touch anywhere plays and immediately pauses it.
fn unlock_on_first_touch(video: &HtmlVideoElement) -> Result<DomListener, PageError> {
    let root = error::document()?
        .document_element()
        .ok_or(PageError::MissingElement("documentElement"))?;
    let video = video.clone();
    DomListener::new(root.into(), "touchstart", true, move || {
        if let Err(e) = video.play() {
            log::debug!("Touch unlock play failed: {:?}", e);
        }
        let _ = video.pause();
    })
}

async fn fetch_as_object_url(src: &str) -> Result<String, PageError> {
    let response = Request::get(src).send().await?;
    if !response.ok() {
        return Err(PageError::Js(format!("video request returned {}", response.status())));
    }
    // Read the body as a JS Blob so the bytes never enter wasm memory.
    let blob: Blob = JsFuture::from(response.as_raw().blob()?)
        .await?
        .dyn_into()
        .map_err(|_| PageError::Js("video body was not a Blob".to_string()))?;
    Ok(Url::create_object_url_with_blob(&blob)?)
}

/// Handles the hero needs once the video reports its metadata.
#[derive(Clone)]
struct HeroRig {
    video_ref: NodeRef,
    logo_ref: NodeRef,
    target_ref: NodeRef,
    scrubber: Rc<RefCell<VideoScrubber>>,
    flight: Rc<RefCell<Option<LogoFlight>>>,
    frame: Rc<RefCell<Option<FrameLoop>>>,
    video_ready: UseStateHandle<bool>,
    observer: Option<ViewportObserver>,
}

impl HeroRig {
    fn video(&self) -> Result<HtmlVideoElement, PageError> {
        self.video_ref
            .cast::<HtmlVideoElement>()
            .ok_or(PageError::MissingElement("hero video"))
    }

    /// Crest offset from its resting place to the target band, plus the
    /// extra drop that carries it past the fold.
    fn measure_flight(&self) -> Result<LogoFlight, PageError> {
        let logo = self
            .logo_ref
            .cast::<Element>()
            .ok_or(PageError::MissingElement("hero crest"))?;
        let target = self
            .target_ref
            .cast::<Element>()
            .ok_or(PageError::MissingElement("crest target"))?;
        let viewport_height = error::window()?.inner_height()?.as_f64().unwrap_or(0.0);
        let from = logo.get_bounding_client_rect();
        let to = target.get_bounding_client_rect();
        Ok(LogoFlight::new(
            to.left() + to.width() / 2.0 - (from.left() + from.width() / 2.0),
            to.top() + to.height() / 2.0 - (from.top() + from.height() / 2.0) + viewport_height * 0.8,
        ))
    }

    fn arm(&self) -> Result<(), PageError> {
        if self.frame.borrow().is_some() {
            return Ok(());
        }
        let video = self.video()?;
        match self.measure_flight() {
            Ok(flight) => *self.flight.borrow_mut() = Some(flight),
            Err(e) => log::warn!("Crest flight disabled: {}", e),
        }

        let scrubber = self.scrubber.clone();
        let frame = FrameLoop::start(move |_| {
            let seek = scrubber.borrow_mut().tick(video.current_time());
            if let Some(time) = seek {
                video.set_current_time(time);
            }
        })?;
        *self.frame.borrow_mut() = Some(frame);
        self.video_ready.set(true);
        log::debug!("Hero scrub armed");

        if let Some(observer) = &self.observer {
            observer.refresh();
        }
        Ok(())
    }

    /// Re-reads the scroll position once a swapped source knows its
    /// duration, so the scrub target is recomputed without waiting for the
    /// next scroll.
    fn resync(&self) {
        if let Err(e) = self.arm() {
            log::error!("Hero scrub setup failed: {}", e);
        }
        if let Some(observer) = &self.observer {
            observer.refresh();
        }
    }
}

fn nav_visible_after(event: RegionEvent) -> bool {
    matches!(event, RegionEvent::Leave | RegionEvent::LeaveBack)
}

#[function_component(Home)]
pub fn home() -> Html {
    let observer = use_context::<ViewportObserver>();
    let show_nav = use_state(|| true);
    let video_ready = use_state(|| false);

    let region_ref = use_node_ref();
    let video_ref = use_node_ref();
    let title_ref = use_node_ref();
    let logo_ref = use_node_ref();
    let target_ref = use_node_ref();

    let scrubber = use_mut_ref(VideoScrubber::default);
    let tracker = use_mut_ref(RegionTracker::default);
    let flight = use_mut_ref(|| None::<LogoFlight>);
    let frame = use_mut_ref(|| None::<FrameLoop>);

    {
        let region_ref = region_ref.clone();
        let video_ref = video_ref.clone();
        let title_ref = title_ref.clone();
        let logo_ref = logo_ref.clone();
        let scrubber = scrubber.clone();
        let flight = flight.clone();
        let show_nav = show_nav.clone();
        use_scroll(move |snapshot| {
            let Some(region) = region_ref.cast::<Element>() else {
                return;
            };
            let rect = region.get_bounding_client_rect();
            let top = rect.top() + snapshot.scroll_y;
            let bottom = top + rect.height();
            let scrub_end = bottom - snapshot.viewport_height;

            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                let fraction = motion::scroll_fraction(snapshot.scroll_y, top, scrub_end);
                scrubber.borrow_mut().set_progress(fraction, video.duration());
            }

            let event = tracker.borrow_mut().update(snapshot.scroll_y, top, scrub_end);
            if let Some(event) = event {
                log::debug!("Hero region {:?}", event);
                show_nav.set(nav_visible_after(event));
            }

            let region_fraction = motion::scroll_fraction(snapshot.scroll_y, top, bottom);
            if let Some(title) = title_ref.cast::<Element>() {
                let fade = motion::title_fade(region_fraction);
                let _ = title.set_attribute(
                    "style",
                    &format!("transform: scale({:.3}); opacity: {:.3};", fade.scale, fade.opacity),
                );
            }

            let current_flight = *flight.borrow();
            if let (Some(flight), Some(logo)) = (current_flight, logo_ref.cast::<Element>()) {
                let pose = flight.pose(region_fraction);
                let _ = logo.set_attribute(
                    "style",
                    &format!("transform: {}; filter: {};", pose.transform(), pose.filter()),
                );
            }
        });
    }

    {
        let rig = HeroRig {
            video_ref: video_ref.clone(),
            logo_ref: logo_ref.clone(),
            target_ref: target_ref.clone(),
            scrubber: scrubber.clone(),
            flight: flight.clone(),
            frame: frame.clone(),
            video_ready: video_ready.clone(),
            observer: observer.clone(),
        };
        use_effect_with_deps(
            move |_| {
                let listeners: Rc<RefCell<Vec<DomListener>>> = Rc::default();
                let object_url: Rc<RefCell<Option<String>>> = Rc::default();
                let alive = Rc::new(Cell::new(true));
                let mut preload: Option<Timeout> = None;

                match rig.video() {
                    Ok(video) => {
                        video.set_muted(true);
                        let _ = video.set_attribute("playsinline", "");
                        let _ = video.set_attribute("disablepictureinpicture", "");

                        match unlock_on_first_touch(&video) {
                            Ok(listener) => listeners.borrow_mut().push(listener),
                            Err(e) => log::warn!("Touch unlock unavailable: {}", e),
                        }

                        if video.ready_state() >= HAVE_METADATA {
                            if let Err(e) = rig.arm() {
                                log::error!("Hero scrub setup failed: {}", e);
                            }
                        } else {
                            let on_metadata = {
                                let rig = rig.clone();
                                move || {
                                    if let Err(e) = rig.arm() {
                                        log::error!("Hero scrub setup failed: {}", e);
                                    }
                                }
                            };
                            let on_can_play = {
                                let video_ready = rig.video_ready.clone();
                                move || video_ready.set(true)
                            };
                            let target: EventTarget = video.clone().into();
                            let registered = DomListener::new(target.clone(), "loadedmetadata", true, on_metadata)
                                .and_then(|metadata| {
                                    let can_play = DomListener::new(target, "canplaythrough", true, on_can_play)?;
                                    Ok([metadata, can_play])
                                });
                            match registered {
                                Ok(pair) => listeners.borrow_mut().extend(pair),
                                Err(e) => log::error!("Could not wait for video metadata: {}", e),
                            }
                        }

                        let listeners = listeners.clone();
                        let object_url = object_url.clone();
                        let alive = alive.clone();
                        let rig = rig.clone();
                        preload = Some(Timeout::new(config::BLOB_PRELOAD_DELAY_MS, move || {
                            spawn_local(async move {
                                let src = video.current_src();
                                let src = if src.is_empty() { config::HERO_VIDEO_PATH.to_string() } else { src };
                                match fetch_as_object_url(&src).await {
                                    Ok(url) => {
                                        if !alive.get() {
                                            let _ = Url::revoke_object_url(&url);
                                            return;
                                        }
                                        let resume_at = video.current_time();
                                        let on_metadata = {
                                            let rig = rig.clone();
                                            move || rig.resync()
                                        };
                                        match DomListener::new(video.clone().into(), "loadedmetadata", true, on_metadata) {
                                            Ok(listener) => listeners.borrow_mut().push(listener),
                                            Err(e) => log::warn!("Scrub will resync on next scroll: {}", e),
                                        }
                                        video.set_src(&url);
                                        video.set_current_time(resume_at + 0.01);
                                        match unlock_on_first_touch(&video) {
                                            Ok(listener) => listeners.borrow_mut().push(listener),
                                            Err(e) => log::warn!("Touch unlock unavailable: {}", e),
                                        }
                                        log::info!("Hero video now served from memory");
                                        *object_url.borrow_mut() = Some(url);
                                    }
                                    Err(e) => log::error!("Error loading video blob: {}", e),
                                }
                            });
                        }));
                    }
                    Err(e) => log::error!("Hero video missing: {}", e),
                }

                let frame = rig.frame.clone();
                move || {
                    alive.set(false);
                    drop(preload);
                    listeners.borrow_mut().clear();
                    frame.borrow_mut().take();
                    if let Some(url) = object_url.borrow_mut().take() {
                        let _ = Url::revoke_object_url(&url);
                    }
                }
            },
            (),
        );
    }

    let on_pin_change = {
        let show_nav = show_nav.clone();
        Callback::from(move |event: PinEvent| show_nav.set(event == PinEvent::Left))
    };

    let video_style = if *video_ready {
        "opacity: 1; transform: translateZ(0); will-change: transform;"
    } else {
        "opacity: 0.3; transform: translateZ(0); will-change: transform;"
    };

    html! {
        <PageLoader min_load_ms={config::HOME_MIN_LOAD_MS}>
            <Navigation show={*show_nav} />

            <div ref={region_ref} class="hero-region" style={format!("height: {}vh;", config::VIDEO_REGION_VH)}>
                <div class="hero-sticky">
                    {
                        if *video_ready {
                            html! {}
                        } else {
                            html! {
                                <div class="hero-video-wait">
                                    <div class="hero-spinner"></div>
                                    <p>{"Loading video..."}</p>
                                </div>
                            }
                        }
                    }
                    <video
                        ref={video_ref}
                        class="hero-video"
                        src={config::HERO_VIDEO_PATH}
                        preload="auto"
                        webkit-playsinline="true"
                        x5-playsinline="true"
                        controlslist="nodownload noplaybackrate"
                        crossorigin="anonymous"
                        style={video_style}
                    />
                    <div class="hero-shade"></div>
                    <div ref={title_ref} class="hero-title">
                        <h1>{"FC BARCELONA"}</h1>
                    </div>
                    <div class="hero-crest-layer">
                        <div ref={logo_ref} class="hero-crest">
                            <img src={config::CREST_PATH} alt="barca" width="100" height="100" />
                        </div>
                    </div>
                </div>
            </div>

            <div ref={target_ref} id="logo" class="crest-band">
                <div class="crest-band-inner">
                    <div class="logo-flip-3d">
                        <img src={config::CREST_PATH} alt="barca" width="100" height="100" />
                    </div>
                </div>
            </div>

            <section id={navigation::TEAM_SECTION} class="trio-hero">
                <div class="trio-top-shade"></div>
                <img class="trio-image" src={config::HERO_IMAGE_PATH} alt="Barca" />
                <div class="trio-bottom-shade"></div>
                <div class="trio-marquee">
                    <VelocityMarquee texts={vec![AttrValue::from("FC Barcelona"), AttrValue::from("Crazy Season")]} />
                </div>
            </section>

            <Gallery on_pin_change={on_pin_change} />
            <Standings />
            <AudioToggle />
            <Footer />

            <style>
                {r#"
                    .hero-region {
                        position: relative;
                    }
                    .hero-sticky {
                        position: sticky;
                        top: 0;
                        width: 100vw;
                        height: 100vh;
                        overflow: hidden;
                        background: #000;
                    }
                    .hero-video-wait {
                        position: absolute;
                        inset: 0;
                        z-index: 10;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        gap: 1rem;
                        color: rgba(255, 255, 255, 0.8);
                        font-size: 0.875rem;
                    }
                    .hero-spinner {
                        width: 2.5rem;
                        height: 2.5rem;
                        border-radius: 50%;
                        border: 4px solid var(--secondary);
                        border-top-color: transparent;
                        animation: spin 1s linear infinite;
                    }
                    .hero-video {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                        transition: opacity 0.7s ease;
                    }
                    .hero-shade {
                        position: absolute;
                        inset: 0;
                        pointer-events: none;
                        background: linear-gradient(to bottom, rgba(0, 0, 0, 0.2), transparent, var(--primary));
                    }
                    .hero-title {
                        position: absolute;
                        inset: 0;
                        z-index: 20;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        pointer-events: none;
                    }
                    .hero-title h1 {
                        color: #fff;
                        font-size: 8rem;
                        font-weight: 900;
                        letter-spacing: 0.05em;
                        margin-bottom: 9rem;
                    }
                    .hero-crest-layer {
                        position: absolute;
                        inset: 0;
                        z-index: 30;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        padding-top: 6rem;
                        pointer-events: none;
                        perspective: 1000px;
                    }
                    .hero-crest {
                        transform-style: preserve-3d;
                        will-change: transform, filter;
                    }
                    .hero-crest img {
                        display: block;
                        filter: drop-shadow(0 10px 30px rgba(0, 0, 0, 0.5));
                    }
                    .crest-band {
                        position: relative;
                        height: 12.5rem;
                        background: var(--primary);
                        perspective: 1000px;
                    }
                    .crest-band-inner {
                        position: absolute;
                        inset: 0;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        pointer-events: none;
                        perspective: 1000px;
                    }
                    .logo-flip-3d {
                        animation: logo-flip-3d 3s linear infinite;
                        transform-style: preserve-3d;
                    }
                    .trio-hero {
                        position: relative;
                        height: 100vh;
                        overflow: hidden;
                    }
                    .trio-image {
                        position: absolute;
                        inset: 0;
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                    }
                    .trio-top-shade {
                        position: absolute;
                        top: 0;
                        left: 0;
                        right: 0;
                        height: 2.5rem;
                        z-index: 10;
                        background: linear-gradient(to bottom, rgba(10, 31, 68, 0.9), transparent);
                    }
                    .trio-bottom-shade {
                        position: absolute;
                        inset: 0;
                        background: linear-gradient(to bottom, transparent, rgba(0, 0, 0, 0.4), var(--primary));
                    }
                    .trio-marquee {
                        position: relative;
                        z-index: 10;
                        display: flex;
                        align-items: flex-end;
                        justify-content: center;
                        height: 100%;
                        padding-bottom: 6rem;
                    }
                    @media (max-width: 768px) {
                        .hero-title h1 {
                            font-size: 2.25rem;
                            margin-bottom: 7rem;
                        }
                    }
                "#}
            </style>
        </PageLoader>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_hides_inside_the_hero_region() {
        assert!(!nav_visible_after(RegionEvent::Enter));
        assert!(!nav_visible_after(RegionEvent::EnterBack));
        assert!(nav_visible_after(RegionEvent::Leave));
        assert!(nav_visible_after(RegionEvent::LeaveBack));
    }

    #[test]
    fn scrolling_through_the_region_toggles_nav() {
        let mut tracker = RegionTracker::default();
        let visibility: Vec<bool> = [0.0, 100.0, 1600.0, 900.0, 0.0]
            .iter()
            .filter_map(|&y| tracker.update(y, 0.0, 1500.0))
            .map(nav_visible_after)
            .collect();
        assert_eq!(visibility, vec![false, true, false, true]);
    }
}
