use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub show: bool,
    pub score: u32,
    pub high_score: u32,
    pub restart: Callback<()>,
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let restart_cb = props.restart.clone();
    let restart_btn = Callback::from(move |_: MouseEvent| restart_cb.emit(()));
    let new_best = props.score >= props.high_score;
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:24px 32px; border-radius:12px; text-align:center; min-width:300px; color:#fff; z-index:20;">
            <h2 style="margin:0 0 12px 0; color:#f85149;">{"Game Over"}</h2>
            <p style="margin:4px 0; font-size:18px;">{ format!("Height: {}", props.score) }</p>
            <p style="margin:4px 0;">{ format!("High Score: {}", props.high_score) }</p>
            { if new_best {
                html! { <p style="margin:8px 0 0 0; color:#fbbf24; font-weight:700;">{"New best!"}</p> }
            } else { html! {} } }
            <div style="margin-top:16px;">
                <button onclick={restart_btn}
                    style="background:#0ea5e9; color:#fff; font-weight:700; padding:10px 24px; border:none; border-radius:8px; font-size:18px; cursor:pointer;">
                    {"Play Again"}
                </button>
            </div>
        </div>
    }
}
