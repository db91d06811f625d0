// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request handlers.

use axum::{
    Form,
    extract::{Query, State as AxumState},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use ekip_api::{
    AuthenticationService, DEFAULT_LOGIN_REDIRECT, LOGIN_PATH, SiteListing, StatisticsSummary,
    additional_redemptions_for, export_tickets_csv, redeem_voucher_at_site, safe_next,
    site_listing, statistics_summary,
};
use ekip_domain::{AdditionalRedemption, RedemptionEntry, RedemptionOutcome};
use minijinja::context;
use serde::Deserialize;
use tracing::info;

use crate::AppState;
use crate::error::HttpError;
use crate::pages::{render, state_options};
use crate::session::{
    SessionOperator, cleared_session_cookie, found, session_cookie, session_token,
};

/// Query parameters of the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    next: Option<String>,
}

/// Submitted login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
    #[serde(default)]
    next: Option<String>,
}

/// Query parameters of the redemption form.
#[derive(Debug, Deserialize)]
pub struct RedeemQuery {
    site: Option<String>,
}

/// Submitted redemption form.
#[derive(Debug, Deserialize)]
pub struct RedeemForm {
    record_locator: String,
    site: String,
}

/// Query parameters of the site listing.
#[derive(Debug, Deserialize)]
pub struct SitesQuery {
    state: Option<String>,
}

/// Query parameters of the statistics pages.
#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

pub async fn handle_index() -> Response {
    found(DEFAULT_LOGIN_REDIRECT)
}

pub async fn handle_login_page(
    Query(query): Query<LoginQuery>,
) -> Result<Html<String>, HttpError> {
    render(
        "login.html",
        context! { next => safe_next(query.next.as_deref()) },
    )
}

/// Verifies credentials, sets the session cookie and returns the caller to `next`.
///
/// Failed logins re-render the form with a generic message.
pub async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, HttpError> {
    let next: String = safe_next(form.next.as_deref());

    let result = {
        let mut persistence = app_state.persistence.lock().await;
        AuthenticationService::login(
            &mut persistence,
            &form.username,
            &form.password,
            app_state.session_lifetime,
        )
    };

    match result {
        Ok((token, operator)) => {
            let cookie = session_cookie(&token, app_state.session_lifetime)
                .map_err(|e| HttpError::internal(format!("Invalid session cookie: {e}")))?;
            info!(login_name = %operator.login_name, next = %next, "Signed in");
            let mut response: Response = found(&next);
            response.headers_mut().insert(header::SET_COOKIE, cookie);
            Ok(response)
        }
        Err(e) => {
            info!(error = %e, "Sign-in rejected");
            let page: Html<String> = render(
                "login.html",
                context! {
                    next,
                    username => form.username,
                    error => "Please enter a correct username and password.",
                },
            )?;
            Ok(page.into_response())
        }
    }
}

pub async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    if let Some(token) = session_token(&headers) {
        let mut persistence = app_state.persistence.lock().await;
        AuthenticationService::logout(&mut persistence, &token)?;
    }

    let mut response: Response = found(LOGIN_PATH);
    response
        .headers_mut()
        .insert(header::SET_COOKIE, cleared_session_cookie());
    Ok(response)
}

pub async fn handle_redeem_page(
    SessionOperator(operator): SessionOperator,
    Query(query): Query<RedeemQuery>,
) -> Result<Html<String>, HttpError> {
    render(
        "redeem.html",
        context! {
            operator => operator.login_name,
            states => state_options(),
            site => query.site.unwrap_or_default(),
        },
    )
}

/// Redeems a voucher and shows the outcome.
///
/// An unknown voucher or site renders the 404 page.
pub async fn handle_redeem(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(operator): SessionOperator,
    Form(form): Form<RedeemForm>,
) -> Result<Html<String>, HttpError> {
    let (outcome, history): (RedemptionOutcome, Vec<AdditionalRedemption>) = {
        let mut persistence = app_state.persistence.lock().await;
        let outcome: RedemptionOutcome =
            redeem_voucher_at_site(&mut persistence, &form.record_locator, &form.site)?;
        let history: Vec<AdditionalRedemption> = additional_redemptions_for(
            &mut persistence,
            outcome.ticket().record_locator.value(),
        )?;
        (outcome, history)
    };

    let (ticket, additional) = match &outcome {
        RedemptionOutcome::FirstRedemption(ticket) => (ticket, None),
        RedemptionOutcome::RepeatRedemption { ticket, additional } => (ticket, Some(additional)),
    };
    let entry: &RedemptionEntry = ticket.redemption_entry().ok_or_else(|| {
        HttpError::internal(format!(
            "Ticket {} has no redemption entry after redemption",
            ticket.record_locator
        ))
    })?;

    info!(
        operator = %operator.login_name,
        record_locator = %ticket.record_locator,
        site = %form.site,
        repeat = outcome.is_repeat(),
        "Voucher redeemed"
    );

    let current_id: Option<i64> = additional.map(|a| a.additional_redemption_id);
    let earlier: Vec<&AdditionalRedemption> = history
        .iter()
        .filter(|r| Some(r.additional_redemption_id) != current_id)
        .collect();

    render(
        "redemption.html",
        context! {
            operator => operator.login_name,
            repeat => outcome.is_repeat(),
            ticket,
            entry,
            additional,
            history => earlier,
        },
    )
}

pub async fn handle_sites(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(operator): SessionOperator,
    Query(query): Query<SitesQuery>,
) -> Result<Html<String>, HttpError> {
    let requested: Option<&str> = query
        .state
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty());

    let listing: Option<SiteListing> = match requested {
        Some(code) => {
            let mut persistence = app_state.persistence.lock().await;
            Some(site_listing(&mut persistence, code)?)
        }
        None => None,
    };

    render(
        "sites.html",
        context! {
            operator => operator.login_name,
            states => state_options(),
            listing,
        },
    )
}

pub async fn handle_statistics(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(operator): SessionOperator,
    Query(query): Query<StatisticsQuery>,
) -> Result<Html<String>, HttpError> {
    let summary: StatisticsSummary = {
        let mut persistence = app_state.persistence.lock().await;
        statistics_summary(
            &mut persistence,
            query.start_date.as_deref(),
            query.end_date.as_deref(),
        )?
    };

    let export_url: Option<String> = summary.range.as_ref().map(|range| {
        format!(
            "/redeem/statistics/export/?start_date={}&end_date={}",
            urlencoding::encode(&range.start_date),
            urlencoding::encode(&range.end_date)
        )
    });

    render(
        "statistics.html",
        context! {
            operator => operator.login_name,
            start_date => query.start_date.unwrap_or_default(),
            end_date => query.end_date.unwrap_or_default(),
            export_url,
            summary,
        },
    )
}

/// Downloads the date-range listing as CSV.
pub async fn handle_statistics_export(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(operator): SessionOperator,
    Query(query): Query<StatisticsQuery>,
) -> Result<Response, HttpError> {
    let (Some(start_date), Some(end_date)) = (query.start_date, query.end_date) else {
        return Err(HttpError::new(
            StatusCode::BAD_REQUEST,
            String::from("Both start_date and end_date are required"),
        ));
    };

    let csv: String = {
        let mut persistence = app_state.persistence.lock().await;
        export_tickets_csv(&mut persistence, &start_date, &end_date)?
    };

    info!(
        operator = %operator.login_name,
        start_date = %start_date,
        end_date = %end_date,
        "Exported redemptions"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"redemptions.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
