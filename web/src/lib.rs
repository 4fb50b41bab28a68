use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod notice;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

/// Reads arguments from a location hash such as `#--flip-duration=750&-vv`.
fn parse_args(location_hash: &str) -> Result<Args, clap::Error> {
    Args::try_parse_from(location_hash.split(['#', '&']))
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

    let args = parse_args(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = parse_args("").unwrap();

        assert_eq!(args.game, game::GameProps::default());
        assert_eq!(args.verbose.log_level(), Some(log::Level::Error));
    }

    #[test]
    fn hash_arguments_are_split_on_ampersands() {
        let args = parse_args("#--flip-duration=750&-s&42&-vv").unwrap();

        assert_eq!(args.game.flip_duration.as_deref(), Some("750"));
        assert_eq!(args.game.seed, Some(42));
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn non_numeric_duration_is_left_for_the_game_to_reject() {
        let args = parse_args("#-f&soon").unwrap();

        assert_eq!(args.game.flip_duration.as_deref(), Some("soon"));
    }

    #[test]
    fn bad_seed_is_a_parse_error() {
        assert!(parse_args("#--seed=abc").is_err());
    }
}
