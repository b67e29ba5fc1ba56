//! Subroute validation.
//!
//! Every violation in every subroute is reported; nothing short-circuits.

use crate::config::schema::SubrouteOptions;
use crate::routing::model::{Route, Subroute};
use crate::rules::rate_limit::check_rate_limit_pair;
use crate::rules::{Diagnostic, DocPath, RuleId};

/// How a subroute version tag parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VersionTag {
    Legacy,
    Year(u32),
    Invalid,
}

fn parse_version_tag(tag: &str, options: &SubrouteOptions) -> VersionTag {
    if options.legacy_versions.iter().any(|legacy| legacy == tag) {
        return VersionTag::Legacy;
    }
    match tag.strip_prefix('v') {
        Some(year) if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) => {
            year.parse().map(VersionTag::Year).unwrap_or(VersionTag::Invalid)
        }
        _ => VersionTag::Invalid,
    }
}

/// Check the subroutes of every route in the table.
pub fn check_subroutes(routes: &[Route], options: &SubrouteOptions) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (index, route) in routes.iter().enumerate() {
        let Some(subroutes) = route.subroutes.as_ref().filter(|s| !s.is_empty()) else {
            continue;
        };
        let base = DocPath::route(index).join("subroutes");
        for (name, subroute) in subroutes.iter() {
            let path = base.join(name);
            diagnostics.extend(check_subroute(route, name, subroute, options, &path));
        }
    }

    diagnostics
}

/// Check one subroute of `route`.
pub fn check_subroute(
    route: &Route,
    name: &str,
    subroute: &Subroute,
    options: &SubrouteOptions,
    path: &DocPath,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (i, method) in subroute.methods.iter().flatten().enumerate() {
        if !options.allowed_methods.iter().any(|allowed| allowed == method) {
            diagnostics.push(Diagnostic::new(
                RuleId::CheckSubroutes,
                format!(
                    "subroute '{}' has invalid method '{}'; allowed methods are {}",
                    name,
                    method,
                    options.allowed_methods.join(", ")
                ),
                path.join("methods").join(i),
            ));
        }
    }

    for (i, tag) in subroute.versions.iter().flatten().enumerate() {
        let version_path = path.join("versions").join(i);
        match parse_version_tag(tag, options) {
            VersionTag::Legacy => {
                if !route.declares_additional_version(tag) {
                    diagnostics.push(Diagnostic::new(
                        RuleId::CheckSubroutes,
                        format!(
                            "subroute '{}' uses legacy version '{}' which is not declared in additionalVersions",
                            name, tag
                        ),
                        version_path,
                    ));
                }
            }
            VersionTag::Year(year) => {
                diagnostics.extend(check_year_bounds(route, name, tag, year, &version_path));
            }
            VersionTag::Invalid => diagnostics.push(Diagnostic::new(
                RuleId::CheckSubroutes,
                format!("subroute '{}' has invalid version '{}'", name, tag),
                version_path,
            )),
        }
    }

    if !subroute.has_rights() && subroute.rate_limit.is_none() {
        diagnostics.push(Diagnostic::new(
            RuleId::CheckSubroutes,
            format!("subroute '{}' must define rights or rateLimit", name),
            path.clone(),
        ));
    }

    diagnostics.extend(check_rate_limit_pair(
        RuleId::CheckSubroutes,
        &format!("subroute '{}'", name),
        subroute.rate_limit,
        subroute.rate_limit_interval_seconds,
        path,
    ));

    diagnostics
}

fn check_year_bounds(
    route: &Route,
    name: &str,
    tag: &str,
    year: u32,
    path: &DocPath,
) -> Vec<Diagnostic> {
    if !route.is_versioned() {
        return Vec::new();
    }
    let year = f64::from(year);
    let start = route.version_start_number();
    let end = route.version_end_number();

    let mut diagnostics = Vec::new();
    if year < start {
        diagnostics.push(Diagnostic::new(
            RuleId::CheckSubroutes,
            format!(
                "subroute '{}' version '{}' is lower than versionStart {}",
                name, tag, start
            ),
            path.clone(),
        ));
    }
    if end > 0.0 && year > end {
        diagnostics.push(Diagnostic::new(
            RuleId::CheckSubroutes,
            format!(
                "subroute '{}' version '{}' is greater than versionEnd {}",
                name, tag, end
            ),
            path.clone(),
        ));
    }
    diagnostics
}
