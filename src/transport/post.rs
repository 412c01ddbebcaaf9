//! Reading a field's locale data out of a raw posted payload.

use serde_json::Value;

use super::error::TransportError;
use crate::config::FormSettings;
use crate::locker::{
    LocaleOverrides,
    Submission,
};
use crate::tree::ValueTree;
use crate::types::{
    FieldPath,
    LocaleCode,
};

/// Identifies one nested field inside a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    /// Array name the form posts its model under (e.g. `Post`).
    model: String,
    /// Path of the field below the model.
    field: FieldPath,
    /// Identity used to key re-rendered markup.
    id: String,
}

impl FieldBinding {
    /// Binds `field_name` (`items`, `content[items]`) of `model`.
    ///
    /// The id defaults to the model and field segments joined by `-`.
    #[must_use]
    pub fn new(model: impl Into<String>, field_name: &str) -> Self {
        let model = model.into();
        let field = FieldPath::parse(field_name);
        let id = std::iter::once(model.as_str())
            .chain(field.segments().iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("-");
        Self { model, field, id }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub const fn field(&self) -> &FieldPath {
        &self.field
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id suffixed for the given element (`Post-items-mlNestedForm`).
    #[must_use]
    pub fn element_id(&self, suffix: &str) -> String {
        format!("{}-{suffix}", self.id)
    }

    /// HTML name of the field's live inputs (`Post[items]`).
    #[must_use]
    pub fn input_name(&self) -> String {
        let mut name = self.model.clone();
        for segment in self.field.segments() {
            name.push('[');
            name.push_str(segment);
            name.push(']');
        }
        name
    }
}

/// Follows `path` through objects and arrays.
pub(crate) fn lookup<'v, S: AsRef<str>>(value: &'v Value, path: &[S]) -> Option<&'v Value> {
    path.iter().try_fold(value, |current, segment| {
        let segment = segment.as_ref();
        match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
            _ => None,
        }
    })
}

/// Reads a string at `path` and parses it as a locale, treating `""` as absent.
pub(crate) fn locale_at<S: AsRef<str>>(
    post: &Value,
    path: &[S],
) -> Result<Option<LocaleCode>, TransportError> {
    let Some(raw) = lookup(post, path).and_then(Value::as_str).filter(|raw| !raw.is_empty())
    else {
        return Ok(None);
    };

    LocaleCode::parse(raw).map(Some).map_err(|source| TransportError::InvalidLocale {
        key: path.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("."),
        source,
    })
}

/// Builds the typed [`Submission`] of one field from a raw post.
///
/// - candidate: `post[model][field...]`, empty when absent
/// - overrides: `post[overridesKey][locale][overridesSegment][field...]`; a
///   locale without an entry for the field gets an empty tree, a string entry
///   is decoded as JSON
/// - active locale: `post[activeLocaleKey][field...]`
///
/// # Errors
/// - [`TransportError::NotAnObject`] for a non-object payload
/// - [`TransportError::InvalidLocale`] for a bad locale key or marker
/// - [`TransportError::MalformedOverride`] for an undecodable string entry
pub fn read_submission(
    post: &Value,
    binding: &FieldBinding,
    settings: &FormSettings,
) -> Result<Submission, TransportError> {
    if !post.is_object() {
        return Err(TransportError::NotAnObject);
    }

    let base_locale = settings.base_locale_code().map_err(|source| {
        TransportError::InvalidLocale { key: "baseLocale".to_string(), source }
    })?;
    let field = binding.field().segments();

    let model_path: Vec<&str> =
        std::iter::once(binding.model()).chain(field.iter().map(String::as_str)).collect();
    let candidate = lookup(post, &model_path).map_or_else(ValueTree::empty, ValueTree::from);

    let mut submission = Submission::new(base_locale, candidate);

    if let Some(section) = post.get(&settings.overrides_key).and_then(Value::as_object) {
        let entry_path: Vec<&str> = std::iter::once(settings.overrides_segment.as_str())
            .chain(field.iter().map(String::as_str))
            .collect();

        let mut overrides = LocaleOverrides::new();
        for (raw_locale, entry) in section {
            let locale = LocaleCode::parse(raw_locale).map_err(|source| {
                TransportError::InvalidLocale {
                    key: format!("{}.{raw_locale}", settings.overrides_key),
                    source,
                }
            })?;
            let tree = match lookup(entry, &entry_path) {
                Some(value) => decode_override(&locale, value)?,
                None => {
                    tracing::debug!(locale = %locale, field = %binding.field(), "No overrides posted for field");
                    ValueTree::empty()
                }
            };
            overrides.insert(locale, tree);
        }
        submission = submission.with_overrides(overrides);
    }

    let marker_path: Vec<&str> = std::iter::once(settings.active_locale_key.as_str())
        .chain(field.iter().map(String::as_str))
        .collect();
    let active_locale = locale_at(post, &marker_path)?;

    tracing::debug!(
        field = %binding.field(),
        locales = submission.overrides().map_or(0, |overrides| overrides.len()),
        active = ?active_locale,
        "Read submission"
    );

    Ok(submission.with_active_locale(active_locale))
}

/// Override entries cached by the client come back as JSON strings.
fn decode_override(locale: &LocaleCode, value: &Value) -> Result<ValueTree, TransportError> {
    match value {
        Value::String(text) if text.trim().is_empty() => Ok(ValueTree::empty()),
        Value::String(text) => serde_json::from_str::<Value>(text)
            .map(ValueTree::from)
            .map_err(|source| TransportError::MalformedOverride { locale: locale.clone(), source }),
        other => Ok(ValueTree::from(other)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{
        locale,
        sample_post,
        sample_submission,
    };

    fn binding() -> FieldBinding {
        FieldBinding::new("Post", "items")
    }

    #[googletest::test]
    fn binding_names() {
        let binding = FieldBinding::new("Post", "content[items]");

        expect_that!(binding.id(), eq("Post-content-items"));
        expect_that!(binding.element_id("mlNestedForm"), eq("Post-content-items-mlNestedForm"));
        expect_that!(binding.input_name(), eq("Post[content][items]"));
        expect_that!(binding.with_id("custom").id(), eq("custom"));
    }

    #[googletest::test]
    fn lookup_walks_objects_and_arrays() {
        let value = json!({"a": [{"b": "x"}]});

        expect_that!(lookup(&value, &["a", "0", "b"]), some(eq(&json!("x"))));
        expect_that!(lookup(&value, &["a", "1"]), none());
        expect_that!(lookup(&value, &["a", "0", "b", "c"]), none());
    }

    #[googletest::test]
    fn reads_sample_post() {
        let submission =
            read_submission(&sample_post(), &binding(), &FormSettings::default()).unwrap();

        expect_that!(submission, eq(&sample_submission()));
    }

    #[googletest::test]
    fn reads_active_locale_marker() {
        let mut post = sample_post();
        post["RLTranslateNestedFormLocale"] = json!({"items": "fr"});

        let submission = read_submission(&post, &binding(), &FormSettings::default()).unwrap();

        expect_that!(submission.active_locale(), some(eq(&locale("fr"))));
    }

    #[googletest::test]
    fn empty_marker_counts_as_absent() {
        let mut post = sample_post();
        post["RLTranslateNestedFormLocale"] = json!({"items": ""});

        let submission = read_submission(&post, &binding(), &FormSettings::default()).unwrap();

        expect_that!(submission.active_locale(), none());
    }

    #[googletest::test]
    fn missing_sections_degrade_to_empty() {
        let post = json!({"Post": {}});

        let submission = read_submission(&post, &binding(), &FormSettings::default()).unwrap();

        expect_that!(submission.candidate(), eq(&ValueTree::empty()));
        expect_that!(submission.overrides(), none());
        expect_that!(submission.active_locale(), none());
    }

    #[googletest::test]
    fn locale_without_field_entry_gets_empty_overrides() {
        let mut post = sample_post();
        post["RLTranslate"]["de"] = json!({"mlnf": {}});

        let submission = read_submission(&post, &binding(), &FormSettings::default()).unwrap();

        expect_that!(
            submission.overrides().unwrap().get(&locale("de")),
            some(eq(&ValueTree::empty()))
        );
    }

    #[googletest::test]
    fn string_overrides_are_decoded() {
        let mut post = sample_post();
        post["RLTranslate"]["fr"]["mlnf"]["items"] = json!(r#"[{"title":"Salut"}]"#);

        let submission = read_submission(&post, &binding(), &FormSettings::default()).unwrap();

        expect_that!(
            submission.overrides().unwrap().get(&locale("fr")).map(ValueTree::to_json),
            some(eq(&json!([{"title": "Salut"}])))
        );
    }

    #[googletest::test]
    fn malformed_string_overrides_are_rejected() {
        let mut post = sample_post();
        post["RLTranslate"]["fr"]["mlnf"]["items"] = json!("[{broken");

        let result = read_submission(&post, &binding(), &FormSettings::default());

        expect_that!(
            result,
            err(matches_pattern!(TransportError::MalformedOverride { locale: eq(&locale("fr")), .. }))
        );
    }

    #[googletest::test]
    fn invalid_locale_key_is_rejected() {
        let mut post = sample_post();
        post["RLTranslate"]["not a locale"] = json!({});

        let result = read_submission(&post, &binding(), &FormSettings::default());

        expect_that!(
            result,
            err(matches_pattern!(TransportError::InvalidLocale {
                key: eq("RLTranslate.not a locale"),
                ..
            }))
        );
    }

    #[googletest::test]
    fn non_object_post_is_rejected() {
        let result = read_submission(&json!([]), &binding(), &FormSettings::default());

        expect_that!(result, err(matches_pattern!(TransportError::NotAnObject)));
    }

    #[googletest::test]
    fn custom_reserved_keys_are_honoured() {
        let settings = FormSettings {
            overrides_key: "Translate".to_string(),
            overrides_segment: "nested".to_string(),
            active_locale_key: "ActiveLocale".to_string(),
            ..FormSettings::default()
        };
        let post = json!({
            "Page": {"blocks": [{"text": "Hi"}]},
            "Translate": {"en": {"nested": {"blocks": [{"text": "Hi"}]}}},
            "ActiveLocale": {"blocks": "en"}
        });

        let submission =
            read_submission(&post, &FieldBinding::new("Page", "blocks"), &settings).unwrap();

        expect_that!(submission.base_overrides(), some(anything()));
        expect_that!(submission.active_locale(), some(eq(&locale("en"))));
        expect_that!(submission.candidate().to_json(), eq(&json!([{"text": "Hi"}])));
    }
}
