//! Pages
//!
//! One component per route.

mod auth;
mod charts;
mod favourites;
mod predictions;
mod profile;

pub use auth::{LoginPage, RegisterPage};
pub use charts::ChartPage;
pub use favourites::FavouritesPage;
pub use predictions::PredictionsPage;
pub use profile::ProfilePage;
