use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, TouchEvent};
use yew::prelude::*;

use super::{
    game_over_overlay::GameOverOverlay, hud::HudPanel, intro_overlay::IntroOverlay,
};
use crate::model::{
    self, Block, GamePhase, Session, SessionAction, DROP_DURATION_MS, FALL_DURATION_MS,
    MOVING_BLOCK_TOP_PX,
};
use crate::state::Fx;
use crate::util::random_direction;

/// Angle the tower keels over to after a miss, in degrees.
const FALL_ANGLE_DEG: f64 = 30.0;

#[derive(Properties, PartialEq, Clone)]
pub struct GameViewProps {
    pub session: UseReducerHandle<Session>,
}

#[function_component(GameView)]
pub fn game_view(props: &GameViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let fx = use_mut_ref(Fx::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let session_ref = use_mut_ref(|| props.session.clone());

    // Refresh the stored handle on every state change, then redraw.
    {
        let session_ref = session_ref.clone();
        let current_handle = props.session.clone();
        let draw_ref_local = draw_ref.clone();
        use_effect_with((*props.session).clone(), move |_| {
            *session_ref.borrow_mut() = current_handle.clone();
            if let Some(f) = &*draw_ref_local.borrow() {
                f();
            }
            || ()
        });
    }

    // When a placement becomes pending, stamp the animation start and schedule
    // the one-shot completion signal. The timer is cleared on unmount; a stale
    // fire is a no-op in the reducer anyway.
    {
        let session = props.session.clone();
        let fx = fx.clone();
        let canvas_ref_timer = canvas_ref.clone();
        let pending_id = props.session.pending.map(|b| b.id);
        use_effect_with(pending_id, move |id| {
            let mut cleanup: Box<dyn FnOnce()> = Box::new(|| {});
            if id.is_some() {
                {
                    let now = js_sys::Date::now();
                    let mut f = fx.borrow_mut();
                    f.drop_started_ms = Some(now);
                    f.shake_started_ms = Some(now);
                }
                if let Some(window) = web_sys::window() {
                    let done = {
                        let session = session.clone();
                        let canvas_ref_timer = canvas_ref_timer.clone();
                        Closure::wrap(Box::new(move || {
                            let width = canvas_ref_timer
                                .cast::<HtmlCanvasElement>()
                                .map(|c| c.width() as f64)
                                .unwrap_or(800.0);
                            session.dispatch(SessionAction::PlacementComplete {
                                screen_width: width,
                                direction: random_direction(),
                            });
                        }) as Box<dyn FnMut()>)
                    };
                    if let Ok(timer) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                        done.as_ref().unchecked_ref(),
                        DROP_DURATION_MS as i32,
                    ) {
                        let window = window.clone();
                        cleanup = Box::new(move || {
                            window.clear_timeout_with_handle(timer);
                            drop(done);
                        });
                    }
                }
            } else {
                fx.borrow_mut().drop_started_ms = None;
            }
            cleanup
        });
    }

    // Stamp the keel-over animation when the session ends.
    {
        let fx = fx.clone();
        let tilt = props.session.tower_tilt;
        use_effect_with(props.session.phase, move |phase| {
            let mut f = fx.borrow_mut();
            if *phase == GamePhase::GameOver {
                f.fall_started_ms = Some(js_sys::Date::now());
                f.fall_from_tilt = tilt;
            } else {
                f.fall_started_ms = None;
            }
            || ()
        });
    }

    // Drop input: pointer, touch, or Space. Registered only while Playing so a
    // click on an overlay button never doubles as a drop.
    {
        let session = props.session.clone();
        use_effect_with(props.session.phase, move |phase| {
            let mut cleanup: Box<dyn FnOnce()> = Box::new(|| {});
            if *phase == GamePhase::Playing {
                if let Some(window) = web_sys::window() {
                    let mouse_cb = {
                        let session = session.clone();
                        Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                            session.dispatch(SessionAction::Drop);
                        }) as Box<dyn FnMut(_)>)
                    };
                    let touch_cb = {
                        let session = session.clone();
                        Closure::wrap(Box::new(move |e: TouchEvent| {
                            e.prevent_default();
                            session.dispatch(SessionAction::Drop);
                        }) as Box<dyn FnMut(_)>)
                    };
                    let key_cb = {
                        let session = session.clone();
                        Closure::wrap(Box::new(move |e: KeyboardEvent| {
                            if e.code() == "Space" {
                                e.prevent_default();
                                session.dispatch(SessionAction::Drop);
                            }
                        }) as Box<dyn FnMut(_)>)
                    };
                    let _ = window.add_event_listener_with_callback(
                        "mousedown",
                        mouse_cb.as_ref().unchecked_ref(),
                    );
                    let _ = window.add_event_listener_with_callback(
                        "touchstart",
                        touch_cb.as_ref().unchecked_ref(),
                    );
                    let _ = window.add_event_listener_with_callback(
                        "keydown",
                        key_cb.as_ref().unchecked_ref(),
                    );
                    cleanup = Box::new(move || {
                        let _ = window.remove_event_listener_with_callback(
                            "mousedown",
                            mouse_cb.as_ref().unchecked_ref(),
                        );
                        let _ = window.remove_event_listener_with_callback(
                            "touchstart",
                            touch_cb.as_ref().unchecked_ref(),
                        );
                        let _ = window.remove_event_listener_with_callback(
                            "keydown",
                            key_cb.as_ref().unchecked_ref(),
                        );
                    });
                }
            }
            cleanup
        });
    }

    // Canvas setup, draw closure, frame loop, resize handling.
    {
        let canvas_ref = canvas_ref.clone();
        let session_ref = session_ref.clone();
        let fx = fx.clone();
        let draw_ref_setup = draw_ref.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let canvas: HtmlCanvasElement = canvas_ref
                .cast::<HtmlCanvasElement>()
                .expect("canvas_ref not attached to a canvas element");

            let compute_and_apply_canvas_size = {
                let canvas = canvas.clone();
                let window = window.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0);
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                }
            };
            compute_and_apply_canvas_size();

            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let session_ref = session_ref.clone();
                let fx = fx.clone();
                Rc::new(move || {
                    let handle = session_ref.borrow();
                    let s = (**handle).clone();
                    draw_scene(&canvas, &s, &fx.borrow());
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());
            (draw_closure)();

            // Frame loop: one motion tick per rendered frame while a block is
            // in flight, then a redraw. The id is kept so unmount can cancel.
            let raf_id = Rc::new(RefCell::new(None));
            {
                let raf_id_clone = raf_id.clone();
                let draw_ref_loop = draw_ref_setup.clone();
                let session_ref_loop = session_ref.clone();
                let canvas_loop = canvas.clone();
                let window_loop = window.clone();
                let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                    Rc::new(RefCell::new(None));
                let closure_cell_clone = closure_cell.clone();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    let handle = session_ref_loop.borrow().clone();
                    if handle.phase == GamePhase::Playing && handle.moving.is_some() {
                        handle.dispatch(SessionAction::Tick {
                            screen_width: canvas_loop.width() as f64,
                        });
                    }
                    if let Some(f) = &*draw_ref_loop.borrow() {
                        f();
                    }
                    if let Ok(id) = window_loop.request_animation_frame(
                        closure_cell_clone
                            .borrow()
                            .as_ref()
                            .unwrap()
                            .as_ref()
                            .unchecked_ref(),
                    ) {
                        *raf_id_clone.borrow_mut() = Some(id);
                    }
                }) as Box<dyn FnMut()>));
                if let Ok(id) = window.request_animation_frame(
                    closure_cell
                        .borrow()
                        .as_ref()
                        .unwrap()
                        .as_ref()
                        .unchecked_ref(),
                ) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }

            let resize_cb = {
                let compute_and_apply_canvas_size = compute_and_apply_canvas_size.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    compute_and_apply_canvas_size();
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .unwrap();

            let window_clone = window.clone();
            move || {
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = *raf_id.borrow() {
                    let _ = window_clone.cancel_animation_frame(id);
                }
            }
        });
    }

    // Serves both start() and restart(); the reducer ignores it mid-session.
    let start_cb: Callback<()> = {
        let session = props.session.clone();
        let canvas_ref = canvas_ref.clone();
        Callback::from(move |()| {
            let width = canvas_ref
                .cast::<HtmlCanvasElement>()
                .map(|c| c.width() as f64)
                .unwrap_or(800.0);
            session.dispatch(SessionAction::Start {
                screen_width: width,
                direction: random_direction(),
            });
        })
    };

    let s = (*props.session).clone();
    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:hidden; user-select:none;">
            <canvas ref={canvas_ref.clone()} id="game-canvas" style="display:block; width:100%; height:100%;"></canvas>
            <HudPanel score={s.score} high_score={s.high_score} />
            <IntroOverlay show={s.phase == GamePhase::Initial} start={start_cb.clone()} />
            <GameOverOverlay show={s.phase == GamePhase::GameOver} score={s.score} high_score={s.high_score} restart={start_cb} />
        </div>
    }
}

fn draw_scene(canvas: &HtmlCanvasElement, s: &Session, fx: &Fx) {
    if !canvas.is_connected() {
        return;
    }
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    let now = js_sys::Date::now();

    // Sky backdrop.
    let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    let _ = sky.add_color_stop(0.0, "#7dd3fc");
    let _ = sky.add_color_stop(1.0, "#e0f2fe");
    ctx.set_fill_style_canvas_gradient(&sky);
    ctx.fill_rect(0.0, 0.0, w, h);

    if s.blocks.is_empty() {
        return;
    }

    // Everything but the sky jitters briefly after a placement.
    let (shake_x, shake_y) = fx.shake_offset(now);
    ctx.save();
    let _ = ctx.translate(shake_x, shake_y);

    let cam = model::camera_offset(s.blocks.len());

    // Tower, rotated about the base block's center by the current tilt, or by
    // the animated keel-over angle after a miss.
    let mut angle = s.tower_tilt;
    if let Some(start) = fx.fall_started_ms {
        let t = ((now - start) / FALL_DURATION_MS).clamp(0.0, 1.0);
        angle = fx.fall_from_tilt + (FALL_ANGLE_DEG - fx.fall_from_tilt) * t * t;
    }
    let base = s.blocks[0];
    let pivot_x = base.x;
    let pivot_y = h + cam - (base.y + base.height / 2.0);
    ctx.save();
    let _ = ctx.translate(pivot_x, pivot_y);
    let _ = ctx.rotate(angle.to_radians());
    let _ = ctx.translate(-pivot_x, -pivot_y);
    for b in &s.blocks {
        let top = h + cam - (b.y + b.height);
        draw_block(&ctx, b, b.x, top);
    }
    ctx.restore();

    // Crane block and its cable at a fixed screen row.
    if s.phase == GamePhase::Playing {
        if let Some(m) = &s.moving {
            ctx.set_stroke_style_str("#475569");
            ctx.set_line_width(3.0);
            ctx.begin_path();
            ctx.move_to(m.x, 0.0);
            ctx.line_to(m.x, MOVING_BLOCK_TOP_PX);
            ctx.stroke();
            draw_block(&ctx, m, m.x, MOVING_BLOCK_TOP_PX);
        }
    }

    // Pending block falling from the crane row into its slot.
    if let Some(p) = &s.pending {
        let target = h + cam - (p.y + p.height);
        let t = fx
            .drop_started_ms
            .map(|start| ((now - start) / DROP_DURATION_MS).clamp(0.0, 1.0))
            .unwrap_or(0.0);
        let top = MOVING_BLOCK_TOP_PX + (target - MOVING_BLOCK_TOP_PX) * t * t;
        draw_block(&ctx, p, p.x, top);
    }

    // The frozen moving block tumbles off screen after a miss.
    if s.phase == GamePhase::GameOver {
        if let (Some(m), Some(start)) = (&s.moving, fx.fall_started_ms) {
            let t = ((now - start) / FALL_DURATION_MS).clamp(0.0, 1.0);
            let cx = m.x;
            let cy = MOVING_BLOCK_TOP_PX + m.height / 2.0 + t * t * h;
            ctx.save();
            let _ = ctx.translate(cx, cy);
            let _ = ctx.rotate((90.0 * t).to_radians());
            let _ = ctx.translate(-cx, -cy);
            draw_block(&ctx, m, cx, cy - m.height / 2.0);
            ctx.restore();
        }
    }

    ctx.restore();
}

fn draw_block(ctx: &CanvasRenderingContext2d, b: &Block, center_x: f64, top_y: f64) {
    let (c0, c1) = b.color.stops();
    let left = center_x - b.width / 2.0;
    let grad = ctx.create_linear_gradient(0.0, top_y, 0.0, top_y + b.height);
    let _ = grad.add_color_stop(0.0, c0);
    let _ = grad.add_color_stop(1.0, c1);
    ctx.set_fill_style_canvas_gradient(&grad);
    ctx.fill_rect(left, top_y, b.width, b.height);
    ctx.set_stroke_style_str("rgba(255,255,255,0.35)");
    ctx.set_line_width(2.0);
    ctx.stroke_rect(left, top_y, b.width, b.height);
}
