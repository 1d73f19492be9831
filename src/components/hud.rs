use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HudPanelProps {
    pub score: u32,
    pub high_score: u32,
}

#[function_component]
pub fn HudPanel(props: &HudPanelProps) -> Html {
    let panel_style = "position:absolute; background:rgba(0,0,0,0.25); border-radius:8px; \
                       padding:8px 14px; color:#fff; font-weight:700; z-index:10;";
    html! {
        <>
            <div style={format!("{} top:12px; left:12px; font-size:24px;", panel_style)}>
                { format!("Height: {}", props.score) }
            </div>
            <div style={format!("{} top:12px; right:12px; font-size:20px;", panel_style)}>
                { format!("High Score: {}", props.high_score) }
            </div>
        </>
    }
}
