pub mod app;
pub mod game_over_overlay;
pub mod game_view;
pub mod hud;
pub mod intro_overlay;
