//! UI Components
//!
//! Reusable Leptos components.

mod artwork;
mod auth_forms;
mod chart_list;
mod chart_selector;
mod contest_banner;
mod delete_confirm_button;
mod error_banner;
mod favourite_button;
mod leaderboard;
mod loading;
mod nav;
mod prediction_form;
mod song_card;
mod timezone_selector;

pub use artwork::{Artwork, PreviewButton};
pub use auth_forms::{LoginForm, RegisterForm};
pub use chart_list::ChartList;
pub use chart_selector::ChartSelector;
pub use contest_banner::ContestBanner;
pub use delete_confirm_button::DeleteConfirmButton;
pub use error_banner::ErrorBanner;
pub use favourite_button::FavouriteButton;
pub use leaderboard::Leaderboard;
pub use loading::Loading;
pub use nav::Nav;
pub use prediction_form::PredictionForm;
pub use song_card::SongCard;
pub use timezone_selector::TimezoneSelector;
