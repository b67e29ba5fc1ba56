//! Rate limit pairing.
//!
//! `rateLimit` and `rateLimitIntervalSeconds` are co-required and strictly
//! positive. The pair check is shared by routes and subroutes.

use crate::routing::model::Route;
use crate::rules::{Diagnostic, DocPath, RuleId};

/// Check one `rateLimit` / `rateLimitIntervalSeconds` pair.
///
/// `subject` prefixes each message, e.g. `subroute 'admin'`.
pub fn check_rate_limit_pair(
    rule: RuleId,
    subject: &str,
    rate_limit: Option<f64>,
    interval_seconds: Option<f64>,
    path: &DocPath,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    match (rate_limit, interval_seconds) {
        (Some(_), None) => diagnostics.push(Diagnostic::new(
            rule,
            format!("{}: missing rateLimitIntervalSeconds", subject),
            path.join("rateLimitIntervalSeconds"),
        )),
        (None, Some(_)) => diagnostics.push(Diagnostic::new(
            rule,
            format!("{}: missing rateLimit", subject),
            path.join("rateLimit"),
        )),
        _ => {}
    }

    if let Some(limit) = rate_limit {
        if limit <= 0.0 || limit.is_nan() {
            diagnostics.push(Diagnostic::new(
                rule,
                format!("{}: rateLimit must be > 0", subject),
                path.join("rateLimit"),
            ));
        }
    }
    if let Some(interval) = interval_seconds {
        if interval <= 0.0 || interval.is_nan() {
            diagnostics.push(Diagnostic::new(
                rule,
                format!("{}: rateLimitIntervalSeconds must be > 0", subject),
                path.join("rateLimitIntervalSeconds"),
            ));
        }
    }

    diagnostics
}

/// Check the rate limit pair on each route of the table.
pub fn check_route_rate_limit(routes: &[Route]) -> Vec<Diagnostic> {
    routes
        .iter()
        .enumerate()
        .flat_map(|(index, route)| {
            check_rate_limit_pair(
                RuleId::CheckRateLimit,
                &format!("route '{}'", route.label()),
                route.rate_limit,
                route.rate_limit_interval_seconds,
                &DocPath::route(index),
            )
        })
        .collect()
}
