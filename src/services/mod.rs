// Services: the screen's side effects and its settings.

pub mod bookmarks_middleware;
pub mod settings_engine;
