use std::{path::PathBuf, sync::OnceLock};

use clap::Parser;
use regex::Regex;
use url::Url;

use crate::{api::DEFAULT_API_BASE, preferences::Preferences};

/// Commander deck builder client
#[derive(Parser, Debug)]
#[command(name = "mtg-deck-builder")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Deck page URL or path, e.g. http://localhost:5000/deck-builder/42
    #[arg(env = "DECK_BUILDER_DECK")]
    pub deck: Option<String>,

    /// API base URL (defaults to the deck URL's origin + /api)
    #[arg(long, env = "DECK_BUILDER_API")]
    pub api_base: Option<String>,

    /// Preferences file holding the theme choice
    #[arg(long, env = "DECK_BUILDER_PREFERENCES")]
    pub preferences: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    /// `None` when the deck location was missing or malformed.
    pub deck_id: Option<u32>,
    pub preferences: Preferences,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let deck_url = args.deck.as_deref().and_then(|d| Url::parse(d).ok());
        let deck_path = match (&deck_url, args.deck.as_deref()) {
            (Some(url), _) => Some(url.path().to_owned()),
            (None, path) => path.map(str::to_owned),
        };
        let deck_id = deck_path.as_deref().and_then(parse_deck_id);

        let api_base = args
            .api_base
            .or_else(|| deck_url.as_ref().and_then(api_base_from_page))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned());

        let preferences = Preferences::new(
            args.preferences
                .unwrap_or_else(Preferences::default_path),
        );

        Self {
            api_base,
            deck_id,
            preferences,
        }
    }
}

/// Extracts the id from a `/deck-builder/{digits}` path. Zero is not an id.
pub fn parse_deck_id(path: &str) -> Option<u32> {
    static DECK_PATH: OnceLock<Regex> = OnceLock::new();
    let re = DECK_PATH.get_or_init(|| {
        Regex::new(r"/deck-builder/(\d+)").expect("deck path pattern is valid")
    });

    re.captures(path)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
        .filter(|id| *id != 0)
}

fn api_base_from_page(url: &Url) -> Option<String> {
    if !url.has_host() {
        return None;
    }
    Some(format!("{}/api", url.origin().ascii_serialization()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(deck: Option<&str>, api_base: Option<&str>) -> Args {
        Args {
            deck: deck.map(str::to_owned),
            api_base: api_base.map(str::to_owned),
            preferences: Some(PathBuf::from("prefs.json")),
        }
    }

    #[test]
    fn deck_id_from_path() {
        assert_eq!(parse_deck_id("/deck-builder/42"), Some(42));
        assert_eq!(parse_deck_id("/deck-builder/7/extra"), Some(7));
        assert_eq!(parse_deck_id("/deck-builder/abc"), None);
        assert_eq!(parse_deck_id("/decks/42"), None);
        assert_eq!(parse_deck_id("/deck-builder/99999999999"), None);
    }

    #[test]
    fn zero_is_not_a_deck_id() {
        assert_eq!(parse_deck_id("/deck-builder/0"), None);
        assert_eq!(parse_deck_id("/deck-builder/000"), None);

        let config = Config::from_args(args(Some("http://localhost:5000/deck-builder/0"), None));
        assert_eq!(config.deck_id, None);
    }

    #[test]
    fn full_url_sets_deck_and_api_origin() {
        let config = Config::from_args(args(Some("http://localhost:5000/deck-builder/42"), None));

        assert_eq!(config.deck_id, Some(42));
        assert_eq!(config.api_base, "http://localhost:5000/api");
    }

    #[test]
    fn explicit_api_base_wins() {
        let config = Config::from_args(args(
            Some("http://localhost:5000/deck-builder/3"),
            Some("https://decks.example/api"),
        ));

        assert_eq!(config.deck_id, Some(3));
        assert_eq!(config.api_base, "https://decks.example/api");
    }

    #[test]
    fn bare_path_uses_default_api() {
        let config = Config::from_args(args(Some("/deck-builder/12"), None));

        assert_eq!(config.deck_id, Some(12));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn missing_deck_leaves_id_unset() {
        let config = Config::from_args(args(None, None));
        assert_eq!(config.deck_id, None);
        assert_eq!(config.preferences.path(), PathBuf::from("prefs.json"));
    }

    #[test]
    fn cli_parses_flags() {
        let args = Args::try_parse_from([
            "mtg-deck-builder",
            "/deck-builder/5",
            "--api-base",
            "http://api.local/api",
        ])
        .unwrap();

        assert_eq!(args.deck.as_deref(), Some("/deck-builder/5"));
        assert_eq!(args.api_base.as_deref(), Some("http://api.local/api"));
    }
}
