use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct IntroOverlayProps {
    pub show: bool,
    pub start: Callback<()>,
}

#[function_component(IntroOverlay)]
pub fn intro_overlay(props: &IntroOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let start_cb = props.start.clone();
    let start_btn = Callback::from(move |_: MouseEvent| start_cb.emit(()));
    html! {
        <div style="position:absolute; inset:0; display:flex; flex-direction:column; justify-content:center; align-items:center; z-index:20;">
            <div style="text-align:center; color:#fff; padding:32px 40px; background:rgba(0,0,0,0.35); border-radius:14px; box-shadow:0 6px 18px rgba(0,0,0,0.5);">
                <h1 style="margin:0 0 12px 0; font-size:52px; letter-spacing:-1px;">{"Tower Builder"}</h1>
                <p style="margin:0 0 24px 0; font-size:20px;">{"Stack the blocks as high as you can!"}</p>
                <button onclick={start_btn}
                    style="background:#0ea5e9; color:#fff; font-weight:700; padding:14px 32px; border:none; border-radius:10px; font-size:22px; cursor:pointer;">
                    {"Start Game"}
                </button>
                <p style="margin:20px 0 0 0; font-size:13px; opacity:0.8;">{"Click, tap, or press Space to drop a block."}</p>
            </div>
        </div>
    }
}
