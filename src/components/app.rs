use super::game_view::GameView;
use crate::model::{GamePhase, Session, SessionAction};
use crate::storage;
use crate::util::clog;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let session = use_reducer(Session::new);

    // Load the persisted best once at startup.
    {
        let session = session.clone();
        use_effect_with((), move |_| {
            session.dispatch(SessionAction::LoadHighScore {
                value: storage::load_high_score(),
            });
            || ()
        });
    }

    // Persist improvements. The reducer only raises high_score at game over,
    // and the write helper skips anything that is not an improvement.
    {
        let high = session.high_score;
        use_effect_with(high, move |_| {
            storage::save_high_score(high);
            || ()
        });
    }

    // Log session transitions.
    {
        let phase = session.phase;
        let score = session.score;
        use_effect_with(phase, move |_| {
            match phase {
                GamePhase::Initial => {}
                GamePhase::Playing => clog("session started"),
                GamePhase::GameOver => clog(&format!("game over at height {}", score)),
            }
            || ()
        });
    }

    html! { <GameView session={session.clone()} /> }
}
