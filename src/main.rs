//! Answers one nested form handler request read from stdin.
//!
//! ```text
//! {"handler": "onSwitchItemLocale", "model": "Post", "field": "items", "post": {...}}
//! ```
//!
//! Settings come from the nearest `.ml-nested-form.json` at or above the
//! current directory. The response is written to stdout, logs go to stderr
//! (`RUST_LOG`).

use std::io::{
    self,
    Read,
    Write,
};
use std::process::ExitCode;

use ml_nested_form::config::{
    ConfigError,
    FormSettings,
};
use ml_nested_form::form::FormError;
use ml_nested_form::transport::FieldBinding;
use ml_nested_form::{
    HiddenInputRepeater,
    MlNestedForm,
};
use serde::Deserialize;
use serde_json::{
    Value,
    json,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Widget handler to run.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
enum Handler {
    /// Reconcile a submitted form into the values to store.
    OnSave,
    /// Re-render the field in another locale.
    OnSwitchItemLocale,
    /// Render the field in its base locale.
    OnRender,
    /// Report which leaves each locale leaves untranslated.
    OnCoverage,
}

/// One request read from stdin.
#[derive(Debug, Deserialize)]
struct HandlerRequest {
    /// Handler to run.
    handler: Handler,
    /// Array name of the form model.
    model: String,
    /// Field name below the model.
    field: String,
    /// Element id override.
    #[serde(default)]
    id: Option<String>,
    /// Posted form payload.
    #[serde(default)]
    post: Value,
}

/// Failures of a single run.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid request: {0}")]
    Request(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Form(#[from] FormError),
}

fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "Handler failed");
            ExitCode::FAILURE
        }
    }
}

/// Reads the request, runs the handler and writes its response.
fn run() -> Result<(), CliError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let request: HandlerRequest = serde_json::from_str(&input)?;
    tracing::debug!(handler = ?request.handler, model = %request.model, field = %request.field, "Received request");

    let settings = FormSettings::discover(std::env::current_dir().ok().as_deref())?;

    let mut binding = FieldBinding::new(request.model, &request.field);
    if let Some(id) = request.id {
        binding = binding.with_id(id);
    }
    let repeater = HiddenInputRepeater::new(binding.input_name());
    let mut form = MlNestedForm::new(binding, settings, repeater)?;

    let response = match request.handler {
        Handler::OnSave => serde_json::to_value(form.save(&request.post)?)?,
        Handler::OnSwitchItemLocale => {
            serde_json::to_value(form.on_switch_item_locale(&request.post)?)?
        }
        Handler::OnRender => {
            let submission = form.read(&request.post)?;
            form.init(&submission)?;
            json!({ "markup": form.render() })
        }
        Handler::OnCoverage => serde_json::to_value(form.coverage(&request.post)?)?,
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    Ok(())
}
