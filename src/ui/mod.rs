//! Terminal UI: a game view driven by a [`crate::session::Session`].

mod app;
mod game_view;

pub use app::App;
