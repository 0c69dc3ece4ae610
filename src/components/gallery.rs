use std::rc::Rc;

use web_sys::{Element, MouseEvent};
use yew::prelude::*;

use crate::components::navigation;
use crate::config;
use crate::data::{self, GalleryCard};
use crate::motion::{self, RegionEvent, RegionTracker};
use crate::observer::use_scroll;

const IFRAME_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share; fullscreen";

/// Player URL for the modal.
pub fn embed_url(video_id: &str) -> String {
    format!(
        "{}/{}?autoplay=1",
        config::YOUTUBE_EMBED_BASE,
        urlencoding::encode(video_id)
    )
}

/// Muted, looping, chrome-less URL for the hover preview.
pub fn preview_url(video_id: &str) -> String {
    let id = urlencoding::encode(video_id);
    format!(
        "{}/{}?autoplay=1&mute=1&controls=0&loop=1&playlist={}",
        config::YOUTUBE_EMBED_BASE,
        id,
        id
    )
}

/// Transitions reported while the gallery is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinEvent {
    Entered,
    Left,
}

impl From<RegionEvent> for PinEvent {
    fn from(event: RegionEvent) -> Self {
        match event {
            RegionEvent::Enter | RegionEvent::EnterBack => PinEvent::Entered,
            RegionEvent::Leave | RegionEvent::LeaveBack => PinEvent::Left,
        }
    }
}

/// At most one card is shown in the modal at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    selected: Option<GalleryCard>,
}

pub enum ModalAction {
    Open(GalleryCard),
    Close,
}

impl ModalState {
    pub fn selected(&self) -> Option<&GalleryCard> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn apply(&mut self, action: ModalAction) {
        match action {
            ModalAction::Open(card) => self.selected = Some(card),
            ModalAction::Close => self.selected = None,
        }
    }

    pub fn embed_src(&self) -> Option<String> {
        self.selected.as_ref().map(|card| embed_url(&card.video_id))
    }
}

impl Reducible for ModalState {
    type Action = ModalAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
struct VideoModalProps {
    card: GalleryCard,
    src: String,
    on_close: Callback<()>,
}

#[function_component(VideoModal)]
fn video_modal(props: &VideoModalProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="video-modal-backdrop" onclick={close.clone()}>
            <div class="video-modal" onclick={keep_open}>
                <div class="video-modal-header">
                    <h2>{&props.card.title}</h2>
                    <button class="video-modal-close" aria-label="Close" onclick={close}>{"✕"}</button>
                </div>
                <div class="video-modal-frame">
                    <iframe
                        src={props.src.clone()}
                        title={props.card.title.clone()}
                        frameborder="0"
                        allow={IFRAME_ALLOW}
                        referrerpolicy="strict-origin-when-cross-origin"
                    />
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HoverCardProps {
    card: GalleryCard,
    on_select: Callback<GalleryCard>,
}

#[function_component(HoverCard)]
fn hover_card(props: &HoverCardProps) -> Html {
    let previewing = use_state(|| false);

    let on_enter = {
        let previewing = previewing.clone();
        Callback::from(move |_: MouseEvent| previewing.set(true))
    };
    let on_leave = {
        let previewing = previewing.clone();
        Callback::from(move |_: MouseEvent| previewing.set(false))
    };
    let on_click = {
        let card = props.card.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(card.clone()))
    };

    let background = if *previewing {
        "background-image: none;".to_string()
    } else {
        format!("background-image: url('{}');", props.card.image)
    };

    html! {
        <div class="gallery-card" style={background} onmouseenter={on_enter} onmouseleave={on_leave} onclick={on_click}>
            {
                if *previewing {
                    html! {
                        <div class="gallery-card-preview">
                            <iframe
                                src={preview_url(&props.card.video_id)}
                                title={props.card.title.clone()}
                                frameborder="0"
                                allow={IFRAME_ALLOW}
                                referrerpolicy="strict-origin-when-cross-origin"
                            />
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            <div class="gallery-card-shade"></div>
            <div class="gallery-card-play">
                <svg viewBox="0 0 24 24" fill="currentColor"><path d="M8 5v14l11-7z" /></svg>
            </div>
            <div class="gallery-card-body">
                <h1>{&props.card.title}</h1>
                <p>{&props.card.description}</p>
                <div class="gallery-card-rule"></div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct GalleryProps {
    #[prop_or_default]
    pub on_pin_change: Option<Callback<PinEvent>>,
}

#[function_component(Gallery)]
pub fn gallery(props: &GalleryProps) -> Html {
    let cards = use_memo(|_| data::gallery_cards(), ());
    let modal = use_reducer(ModalState::default);
    let distance = use_state(|| 0.0_f64);
    let section_ref = use_node_ref();
    let strip_ref = use_node_ref();
    let tracker = use_mut_ref(RegionTracker::default);

    {
        let section_ref = section_ref.clone();
        let strip_ref = strip_ref.clone();
        let distance = distance.clone();
        let on_pin_change = props.on_pin_change.clone();
        use_scroll(move |snapshot| {
            let (Some(section), Some(strip)) = (section_ref.cast::<Element>(), strip_ref.cast::<Element>()) else {
                return;
            };
            let travel = motion::pin_distance(strip.scroll_width() as f64, snapshot.viewport_width);
            if (travel - *distance).abs() > 0.5 {
                distance.set(travel);
            }

            let start = section.get_bounding_client_rect().top() + snapshot.scroll_y;
            let end = start + travel;
            let fraction = motion::scroll_fraction(snapshot.scroll_y, start, end);
            let offset = motion::strip_offset(fraction, travel);
            let _ = strip.set_attribute(
                "style",
                &format!("transform: translate3d({:.1}px, 0, 0);", offset),
            );

            let event = tracker.borrow_mut().update(snapshot.scroll_y, start, end);
            if let (Some(event), Some(callback)) = (event, on_pin_change.as_ref()) {
                callback.emit(event.into());
            }
        });
    }

    let on_select = {
        let modal = modal.clone();
        Callback::from(move |card: GalleryCard| {
            log::debug!("Opening highlight {}", card.id);
            modal.dispatch(ModalAction::Open(card));
        })
    };
    let on_close = {
        let modal = modal.clone();
        Callback::from(move |_: ()| modal.dispatch(ModalAction::Close))
    };

    html! {
        <>
            <section id={navigation::GALLERY_SECTION} ref={section_ref} class="gallery-section" style={format!("height: calc(100vh + {:.0}px);", *distance)}>
                <div class={classes!("gallery-pin", modal.is_open().then(|| "modal-open"))}>
                    <div class="gallery-heading">
                        <h2>{"Unforgettable Moments"}</h2>
                        <p>{"Scroll to explore Barcelona's greatest victories"}</p>
                    </div>
                    <div ref={strip_ref} class="gallery-strip">
                        { for cards.iter().map(|card| html! {
                            <div key={card.id} class="gallery-slot">
                                <HoverCard card={card.clone()} on_select={on_select.clone()} />
                            </div>
                        }) }
                        <div class="gallery-spacer"></div>
                    </div>
                    <div class="gallery-scroll-hint">
                        <p>{"Scroll Down"}</p>
                        <svg viewBox="0 0 24 24" fill="none" stroke="currentColor">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 14l-7 7m0 0l-7-7m7 7V3" />
                        </svg>
                    </div>
                </div>
            </section>
            {
                match (modal.selected(), modal.embed_src()) {
                    (Some(card), Some(src)) => html! { <VideoModal card={card.clone()} src={src} on_close={on_close} /> },
                    _ => html! {},
                }
            }
            <style>
                {r#"
                    .gallery-section {
                        position: relative;
                        background: var(--primary);
                    }
                    .gallery-pin {
                        position: sticky;
                        top: 0;
                        height: 100vh;
                        overflow: hidden;
                    }
                    .gallery-heading {
                        position: absolute;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 10;
                        padding: 2rem 1rem;
                        text-align: center;
                        color: #fff;
                        background: linear-gradient(to bottom, rgba(0, 0, 0, 0.5), transparent);
                    }
                    .gallery-heading h2 {
                        font-size: 3rem;
                        font-weight: 700;
                    }
                    .gallery-heading p {
                        margin-top: 0.5rem;
                        color: rgba(255, 255, 255, 0.8);
                    }
                    .gallery-pin.modal-open .gallery-strip {
                        pointer-events: none;
                    }
                    .gallery-strip {
                        position: absolute;
                        top: 0;
                        left: 0;
                        height: 100%;
                        display: flex;
                        align-items: center;
                        gap: 2rem;
                        padding: 0 2rem;
                        will-change: transform;
                    }
                    .gallery-slot {
                        flex-shrink: 0;
                        width: clamp(300px, 80vw, 500px);
                    }
                    .gallery-spacer {
                        flex-shrink: 0;
                        width: 2rem;
                    }
                    .gallery-card {
                        position: relative;
                        height: 500px;
                        display: flex;
                        flex-direction: column;
                        justify-content: flex-end;
                        overflow: hidden;
                        border-radius: 0.75rem;
                        border: 2px solid rgba(10, 31, 68, 0.2);
                        background-size: cover;
                        background-position: center;
                        box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.25);
                        cursor: pointer;
                        transition: transform 0.5s ease, box-shadow 0.5s ease, border-color 0.5s ease;
                    }
                    .gallery-card:hover {
                        transform: scale(1.02);
                        border-color: rgba(165, 42, 42, 0.6);
                        box-shadow: 0 0 40px rgba(165, 42, 42, 0.4);
                    }
                    .gallery-card-preview {
                        position: absolute;
                        inset: 0;
                        z-index: 10;
                        pointer-events: none;
                    }
                    .gallery-card-preview iframe {
                        width: 100%;
                        height: 100%;
                    }
                    .gallery-card-shade {
                        position: absolute;
                        inset: 0;
                        z-index: 20;
                        background: linear-gradient(to top, rgba(0, 0, 0, 0.9), rgba(0, 0, 0, 0.5), transparent);
                        opacity: 0.6;
                        transition: opacity 0.5s ease;
                    }
                    .gallery-card:hover .gallery-card-shade {
                        opacity: 0.4;
                    }
                    .gallery-card-play {
                        position: absolute;
                        inset: 0;
                        z-index: 30;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        opacity: 0;
                        transition: opacity 0.3s ease;
                    }
                    .gallery-card-play svg {
                        width: 3rem;
                        height: 3rem;
                        padding: 1.5rem;
                        box-sizing: content-box;
                        color: #fff;
                        border-radius: 50%;
                        border: 2px solid rgba(153, 0, 64, 0.6);
                        background: rgba(153, 0, 64, 0.3);
                        backdrop-filter: blur(4px);
                    }
                    .gallery-card:hover .gallery-card-play {
                        opacity: 1;
                    }
                    .gallery-card-body {
                        position: relative;
                        z-index: 50;
                        padding: 1.5rem;
                        background: linear-gradient(to top, rgba(0, 0, 0, 0.8), transparent);
                    }
                    .gallery-card-body h1 {
                        font-size: 1.875rem;
                        font-weight: 700;
                        color: #fff;
                    }
                    .gallery-card-body p {
                        margin-top: 0.5rem;
                        color: #e5e7eb;
                        display: -webkit-box;
                        -webkit-line-clamp: 2;
                        -webkit-box-orient: vertical;
                        overflow: hidden;
                    }
                    .gallery-card-rule {
                        margin-top: 1rem;
                        width: 4rem;
                        height: 4px;
                        border-radius: 9999px;
                        background: linear-gradient(90deg, var(--accent), transparent);
                    }
                    .gallery-scroll-hint {
                        position: absolute;
                        bottom: 2rem;
                        left: 50%;
                        transform: translateX(-50%);
                        z-index: 10;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        gap: 0.5rem;
                        color: rgba(255, 255, 255, 0.6);
                        animation: bounce 1s infinite;
                    }
                    .gallery-scroll-hint svg {
                        width: 1.5rem;
                        height: 1.5rem;
                    }
                    .video-modal-backdrop {
                        position: fixed;
                        inset: 0;
                        z-index: 60;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        padding: 1rem;
                        background: rgba(0, 0, 0, 0.75);
                    }
                    .video-modal {
                        position: relative;
                        width: 100%;
                        max-width: 64rem;
                        overflow: hidden;
                        border-radius: 0.5rem;
                        background: #171717;
                        box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.5);
                    }
                    .video-modal-header {
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        padding: 1rem;
                        border-bottom: 1px solid #404040;
                        color: #fff;
                    }
                    .video-modal-close {
                        padding: 0.25rem 0.5rem;
                        border: none;
                        border-radius: 9999px;
                        background: none;
                        color: #9ca3af;
                        font-size: 1.25rem;
                        cursor: pointer;
                    }
                    .video-modal-close:hover {
                        color: #fff;
                        background: #262626;
                    }
                    .video-modal-frame {
                        position: relative;
                        width: 100%;
                        padding-bottom: 56.25%;
                    }
                    .video-modal-frame iframe {
                        position: absolute;
                        top: 0;
                        left: 0;
                        width: 100%;
                        height: 100%;
                    }
                "#}
            </style>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u32, video_id: &str) -> GalleryCard {
        GalleryCard {
            id,
            title: format!("Match {}", id),
            description: String::new(),
            image: format!("/assets/images/{}.webp", id),
            video_id: video_id.to_string(),
        }
    }

    #[test]
    fn embed_urls_carry_the_card_reference() {
        assert_eq!(embed_url("sAhOZLCMR7w"), "https://www.youtube.com/embed/sAhOZLCMR7w?autoplay=1");
        assert_eq!(
            preview_url("oYHdKBfTwbE"),
            "https://www.youtube.com/embed/oYHdKBfTwbE?autoplay=1&mute=1&controls=0&loop=1&playlist=oYHdKBfTwbE"
        );
        assert_eq!(embed_url("a b/c"), "https://www.youtube.com/embed/a%20b%2Fc?autoplay=1");
    }

    #[test]
    fn modal_shows_clicked_card_for_every_card() {
        for gallery_card in data::gallery_cards() {
            let mut modal = ModalState::default();
            modal.apply(ModalAction::Open(gallery_card.clone()));
            assert_eq!(modal.selected(), Some(&gallery_card));
            assert_eq!(modal.embed_src(), Some(embed_url(&gallery_card.video_id)));
        }
    }

    #[test]
    fn closing_clears_and_reopening_matches() {
        let mut modal = ModalState::default();
        let first = card(1, "abc");
        modal.apply(ModalAction::Open(first.clone()));
        let opened_src = modal.embed_src();

        modal.apply(ModalAction::Close);
        assert!(!modal.is_open());
        assert_eq!(modal.embed_src(), None);

        modal.apply(ModalAction::Open(first));
        assert_eq!(modal.embed_src(), opened_src);
    }

    #[test]
    fn only_one_card_is_selected() {
        let mut modal = ModalState::default();
        modal.apply(ModalAction::Open(card(1, "one")));
        modal.apply(ModalAction::Open(card(2, "two")));
        assert_eq!(modal.selected().map(|c| c.id), Some(2));
    }

    #[test]
    fn region_events_map_to_pin_events() {
        assert_eq!(PinEvent::from(RegionEvent::Enter), PinEvent::Entered);
        assert_eq!(PinEvent::from(RegionEvent::EnterBack), PinEvent::Entered);
        assert_eq!(PinEvent::from(RegionEvent::Leave), PinEvent::Left);
        assert_eq!(PinEvent::from(RegionEvent::LeaveBack), PinEvent::Left);
    }
}
