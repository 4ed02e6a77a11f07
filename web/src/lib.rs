use clap::Parser;
use wasm_bindgen::prelude::*;

mod api;
mod creator;
mod crop;
mod game;
mod routes;
mod theme;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a shuffle seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("seed: {:?}", args.seed);

    theme::Theme::init();

    let root = document()
        .get_element_by_id("app")
        .expect("Could not find id=\"app\" element");

    let path = window()
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string());

    log::debug!("App started at {path}");
    match routes::parse_path(&path) {
        routes::Route::Game { id } => {
            let props = game::GameProps {
                store: api::ApiClient::new(),
                id: id.into(),
                seed: args.seed,
            };
            yew::Renderer::<game::GameView<api::ApiClient>>::with_root_and_props(root, props)
                .render();
        }
        routes::Route::Creator => {
            let props = creator::CreatorProps {
                store: api::ApiClient::new(),
            };
            yew::Renderer::<creator::CreatorView<api::ApiClient>>::with_root_and_props(root, props)
                .render();
        }
    }
}
