//! Test helpers shared by the unit test modules.
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use serde_json::json;

use crate::config::FormSettings;
use crate::locker::Submission;
use crate::tree::ValueTree;
use crate::types::LocaleCode;

/// Parses a locale code that is known to be valid.
pub(crate) fn locale(code: &str) -> LocaleCode {
    LocaleCode::parse(code).unwrap()
}

/// Two items rendered in English with a partial French translation.
///
/// - candidate / `en`: `[{title: "Hello", qty: 0}, {title: "World", qty: 5}]`
/// - `fr`: `[{title: "Bonjour"}, {title: "", qty: 0}]`
pub(crate) fn sample_submission() -> Submission {
    let english = ValueTree::from(json!([
        {"title": "Hello", "qty": 0},
        {"title": "World", "qty": 5}
    ]));
    let french = ValueTree::from(json!([
        {"title": "Bonjour"},
        {"title": "", "qty": 0}
    ]));

    Submission::new(locale("en"), english.clone())
        .with_locale_overrides(locale("en"), english)
        .with_locale_overrides(locale("fr"), french)
}

/// Settings with `en` as base and `fr`, `de` as secondary locales.
pub(crate) fn multi_locale_settings() -> FormSettings {
    FormSettings {
        locales: vec!["en".to_string(), "fr".to_string(), "de".to_string()],
        ..FormSettings::default()
    }
}

/// Raw post matching [`sample_submission`] under the default reserved keys.
pub(crate) fn sample_post() -> serde_json::Value {
    json!({
        "Post": {
            "items": [
                {"title": "Hello", "qty": 0},
                {"title": "World", "qty": 5}
            ]
        },
        "RLTranslate": {
            "en": {"mlnf": {"items": [
                {"title": "Hello", "qty": 0},
                {"title": "World", "qty": 5}
            ]}},
            "fr": {"mlnf": {"items": [
                {"title": "Bonjour"},
                {"title": "", "qty": 0}
            ]}}
        }
    })
}
