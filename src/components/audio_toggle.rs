use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;
use yew::prelude::*;

use crate::config;

#[function_component(AudioToggle)]
pub fn audio_toggle() -> Html {
    let audio_ref = use_node_ref();
    let playing = use_state(|| false);

    {
        let audio_ref = audio_ref.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(audio) = audio_ref.cast::<HtmlAudioElement>() {
                    audio.set_loop(true);
                }
                || ()
            },
            (),
        );
    }

    let toggle = {
        let audio_ref = audio_ref.clone();
        let playing = playing.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(audio) = audio_ref.cast::<HtmlAudioElement>() else {
                log::warn!("Anthem toggle clicked before the audio element mounted");
                return;
            };
            if *playing {
                let _ = audio.pause();
                playing.set(false);
                return;
            }
            playing.set(true);
            match audio.play() {
                Ok(promise) => {
                    // Autoplay policies can still reject the play request.
                    let playing = playing.clone();
                    spawn_local(async move {
                        if let Err(e) = JsFuture::from(promise).await {
                            log::warn!("Anthem playback was rejected: {:?}", e);
                            playing.set(false);
                        }
                    });
                }
                Err(e) => {
                    log::warn!("Anthem playback failed to start: {:?}", e);
                    playing.set(false);
                }
            }
        })
    };

    html! {
        <>
            <audio ref={audio_ref}>
                <source src={config::ANTHEM_PATH} type="audio/mpeg" />
            </audio>
            <button class="anthem-toggle" onclick={toggle}>
                { if *playing { "Mute Anthem" } else { "Play Anthem" } }
            </button>
            <style>
                {r#"
                    .anthem-toggle {
                        position: fixed;
                        right: 1rem;
                        bottom: 1rem;
                        z-index: 50;
                        padding: 0.5rem 1rem;
                        border: 1px solid var(--secondary);
                        border-radius: 9999px;
                        background: var(--accent);
                        color: var(--secondary);
                        cursor: pointer;
                    }
                "#}
            </style>
        </>
    }
}
