#![allow(warnings)]
//! Waveger Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod format;
mod models;
mod pages;
mod scoring;
mod storage;
mod store;
mod validation;

use app::App;
use leptos::prelude::*;

use crate::config::AppConfig;
use crate::storage::BrowserStorage;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load(&BrowserStorage::local());
    console_logger::init(console_logger::parse_level(&config.log_level));
    tracing::info!(api = %config.api_base, "starting waveger");

    api::install(api::ApiClient::browser(config));
    mount_to_body(App);
}
