// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTML page rendering.
//!
//! Templates are compiled into the binary. Every template name ends in
//! `.html`, so values are HTML-escaped on output.

use axum::response::Html;
use ekip_domain::states;
use minijinja::{Environment, ErrorKind};
use serde::Serialize;
use std::sync::LazyLock;
use tracing::error;

use crate::error::HttpError;

static TEMPLATES: LazyLock<Result<Environment<'static>, minijinja::Error>> =
    LazyLock::new(load_templates);

fn load_templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env: Environment<'static> = Environment::new();
    env.add_template("base.html", include_str!("../templates/base.html"))?;
    env.add_template("error.html", include_str!("../templates/error.html"))?;
    env.add_template("login.html", include_str!("../templates/login.html"))?;
    env.add_template("redeem.html", include_str!("../templates/redeem.html"))?;
    env.add_template("redemption.html", include_str!("../templates/redemption.html"))?;
    env.add_template("sites.html", include_str!("../templates/sites.html"))?;
    env.add_template("statistics.html", include_str!("../templates/statistics.html"))?;
    Ok(env)
}

/// A region as offered in selection controls.
#[derive(Debug, Serialize)]
pub struct StateOption {
    pub code: &'static str,
    pub name: &'static str,
}

/// All regions of the state directory, ordered by code.
pub fn state_options() -> Vec<StateOption> {
    states()
        .iter()
        .map(|&(code, name)| StateOption { code, name })
        .collect()
}

/// Renders a template to a string.
///
/// # Errors
///
/// Returns an error if the template is missing or fails to render.
pub fn render_string<S: Serialize>(name: &str, context: S) -> Result<String, minijinja::Error> {
    let env: &Environment<'static> = match &*TEMPLATES {
        Ok(env) => env,
        Err(e) => {
            return Err(minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("templates failed to load: {e}"),
            ));
        }
    };
    env.get_template(name)?.render(context)
}

/// Renders a template as an HTML response body.
///
/// # Errors
///
/// Returns an internal server error if rendering fails.
pub fn render<S: Serialize>(name: &str, context: S) -> Result<Html<String>, HttpError> {
    render_string(name, context).map(Html).map_err(|e| {
        error!(template = name, error = %e, "Failed to render template");
        HttpError::internal(format!("Failed to render page: {e}"))
    })
}
