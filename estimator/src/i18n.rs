//! Internationalization (i18n) support for `betterrest-estimator`.
//!
//! This module wires together:
//! - `i18n-embed` (language selection + asset loading)
//! - `fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/betterrest-estimator.ftl   (fallback/reference)
//!   es-ES/betterrest-estimator.ftl
//!   fr-FR/betterrest-estimator.ftl
//! ```
//!
//! Besides message lookups, the requested locale decides the clock
//! convention bedtimes are rendered in (see [`clock_convention`]). That is
//! the locale the user asked for, not the bundle negotiation settled on: a
//! `de-DE` user reads English fallback text but a 24-hour clock.
//!
//! Public API surface:
//! - `init()` – load localization bundles (safe to call multiple times).
//! - `set_language(tag: &str)` – switch language at runtime.
//! - `available_languages()` – discover embedded language tags.
//! - `current_language()` / `requested_language()` / `clock_convention()`.
//! - Helper fns: `tr_app_title`, `tr_error_*`, `tr_sleep_hours`, `tr_coffee_cups`, prompts.
//! - `LOADER` – global `FluentLanguageLoader` consumed by helpers & `fl!` macro.
use std::sync::{Once, PoisonError, RwLock};

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

use crate::core::format::{format_hours, ClockConvention};
use crate::core::inputs::{CoffeeAmount, SleepAmount};
use crate::error::{Error, Result};

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Ergonomic translation macro.
/// Examples:
///     t!("error-title")
///     t!("coffee-cups", count = 2)
///
/// This expands to `fl!(&*LOADER, ...)` so every lookup routes through the
/// shared loader.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent "domain" (matches the crate / the fallback FTL filename).
const DOMAIN: &str = "betterrest-estimator";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Locale the user asked for, before negotiation against embedded bundles.
static REQUESTED: RwLock<Option<LanguageIdentifier>> = RwLock::new(None);

/// Initialize i18n from the OS language list (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = i18n_embed::DesktopLanguageRequester::requested_languages();
        if let Err(err) = select(&requested) {
            log::warn!("Failed selecting languages ({err}); continuing with fallback");
        }
        if let Some(first) = requested.first() {
            remember_requested(first.clone());
        }
    });
}

/// Switch language at runtime.
///
/// `tag` is kept as the requested locale even when only a related bundle (or
/// the fallback) is embedded. A tag that does not parse is a config error.
pub fn set_language(tag: &str) -> Result<()> {
    init();
    let lang: LanguageIdentifier = tag
        .parse()
        .map_err(|e| Error::Config(format!("Invalid language tag {tag:?}: {e}")))?;
    select(std::slice::from_ref(&lang))
        .map_err(|e| Error::Config(format!("Failed to select language {tag}: {e}")))?;
    remember_requested(lang);
    Ok(())
}

// Placeables are spliced into labels, so no bidi isolation marks.
fn select(requested: &[LanguageIdentifier]) -> std::result::Result<(), i18n_embed::I18nEmbedError> {
    i18n_embed::select(&*LOADER, &Localizations, requested)?;
    LOADER.set_use_isolating(false);
    Ok(())
}

fn remember_requested(lang: LanguageIdentifier) {
    *REQUESTED.write().unwrap_or_else(PoisonError::into_inner) = Some(lang);
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

/// Language of the bundle messages are currently rendered from.
pub fn current_language() -> LanguageIdentifier {
    init();
    LOADER.current_language()
}

/// Locale the user asked for, falling back to the active bundle when the OS
/// reported nothing.
pub fn requested_language() -> LanguageIdentifier {
    init();
    REQUESTED
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_else(|| LOADER.current_language())
}

/// Clock convention of the requested locale.
pub fn clock_convention() -> ClockConvention {
    ClockConvention::for_language(&requested_language())
}

pub fn tr_app_title() -> String {
    init();
    crate::t!("app-title")
}

pub fn tr_error_title() -> String {
    init();
    crate::t!("error-title")
}

/// Generic notice shown when no bedtime could be computed.
pub fn tr_error_message() -> String {
    init();
    crate::t!("error-message")
}

pub fn tr_wake_prompt() -> String {
    init();
    crate::t!("wake-prompt")
}

pub fn tr_wake_picker_label() -> String {
    init();
    crate::t!("wake-picker-label")
}

pub fn tr_sleep_prompt() -> String {
    init();
    crate::t!("sleep-prompt")
}

pub fn tr_coffee_prompt() -> String {
    init();
    crate::t!("coffee-prompt")
}

pub fn tr_bedtime_heading() -> String {
    init();
    crate::t!("bedtime-heading")
}

/// `8 hours`, `8.25 hours`
pub fn tr_sleep_hours(amount: SleepAmount) -> String {
    init();
    crate::t!("sleep-hours", hours = format_hours(amount.hours()))
}

/// `1 cup`, `3 cups`
pub fn tr_coffee_cups(amount: CoffeeAmount) -> String {
    init();
    crate::t!("coffee-cups", count = i32::from(amount.cups()))
}

/// Serializes tests that switch the global language.
#[cfg(test)]
pub(crate) static TEST_LANGUAGE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::fl;

    fn with_language<R>(tag: &str, f: impl FnOnce() -> R) -> R {
        let _guard = TEST_LANGUAGE_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        set_language(tag).unwrap();
        let out = f();
        set_language("en-US").unwrap();
        out
    }

    #[test]
    fn fallback_language_is_present() {
        assert!(available_languages().iter().any(|l| l == "en-US"));
        assert!(available_languages().iter().any(|l| l == "fr-FR"));
    }

    #[test]
    fn basic_lookup_works() {
        with_language("en-US", || {
            let s = fl!(&*LOADER, "error-title");
            assert_eq!(s, "Error");
        });
    }

    #[test]
    fn dynamic_language_switch_reverts_on_failure() {
        with_language("en-US", || {
            let before = fl!(&*LOADER, "bedtime-heading");
            let _ = set_language("zz-ZZ");
            let after = fl!(&*LOADER, "bedtime-heading");
            assert_eq!(before, after);
        });
    }

    #[test]
    fn error_notice_matches_alert_copy() {
        with_language("en-US", || {
            assert_eq!(
                tr_error_message(),
                "Sorry, there was a problem calculating your bedtime."
            );
        });
    }

    #[test]
    fn coffee_label_inflects() {
        with_language("en-US", || {
            assert_eq!(tr_coffee_cups(CoffeeAmount::new(1).unwrap()), "1 cup");
            assert_eq!(tr_coffee_cups(CoffeeAmount::new(4).unwrap()), "4 cups");
        });
        with_language("es-ES", || {
            assert_eq!(tr_coffee_cups(CoffeeAmount::new(2).unwrap()), "2 tazas");
        });
    }

    #[test]
    fn sleep_label_drops_trailing_zeros() {
        with_language("en-US", || {
            assert_eq!(tr_sleep_hours(SleepAmount::default()), "8 hours");
            assert_eq!(
                tr_sleep_hours(SleepAmount::new(8.25).unwrap()),
                "8.25 hours"
            );
        });
    }

    #[test]
    fn clock_convention_tracks_language() {
        with_language("fr-FR", || {
            assert_eq!(clock_convention(), ClockConvention::TwentyFourHour);
        });
        with_language("en-US", || {
            assert_eq!(clock_convention(), ClockConvention::TwelveHour);
        });
    }

    #[test]
    fn clock_convention_follows_requested_region_not_bundle() {
        for (tag, bundle, convention) in [
            ("de-DE", "en-US", ClockConvention::TwentyFourHour),
            ("en-GB", "en-US", ClockConvention::TwentyFourHour),
            ("fr-CA", "fr-FR", ClockConvention::TwelveHour),
            ("es-MX", "es-ES", ClockConvention::TwelveHour),
            ("es-ES", "es-ES", ClockConvention::TwentyFourHour),
        ] {
            with_language(tag, || {
                assert_eq!(current_language().to_string(), bundle, "{tag}");
                assert_eq!(requested_language().to_string(), tag);
                assert_eq!(clock_convention(), convention, "{tag}");
            });
        }
    }

    #[test]
    fn unparsable_tag_is_rejected_and_keeps_language() {
        with_language("fr-FR", || {
            let err = set_language("not a tag!!").unwrap_err();
            assert!(matches!(err, Error::Config(_)));
            assert_eq!(requested_language().to_string(), "fr-FR");
            assert_eq!(clock_convention(), ClockConvention::TwentyFourHour);
        });
    }

    #[test]
    fn app_title_is_localized() {
        with_language("en-US", || assert_eq!(tr_app_title(), "BetterRest"));
    }
}
