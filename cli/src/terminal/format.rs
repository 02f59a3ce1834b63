use crate::terminal::colors;
use colored::*;
use readyr_common::network::endpoint::Endpoint;
use std::collections::BTreeSet;

pub type Detail = (String, ColoredString);

pub fn endpoint_to_details(endpoint: &Endpoint) -> Vec<Detail> {
    vec![
        (String::from("Host"), endpoint.host().color(colors::HOST)),
        (
            String::from("Port"),
            endpoint.port().to_string().color(colors::PORT),
        ),
    ]
}

pub fn state_to_detail(endpoint: &Endpoint, unreachable: &BTreeSet<Endpoint>) -> Detail {
    let state: ColoredString = if unreachable.contains(endpoint) {
        "unreachable".color(colors::DOWN).bold()
    } else {
        "ready".color(colors::READY)
    };
    (String::from("State"), state)
}

/// Joins endpoints for a single-line diagnostic, e.g. `127.0.0.1:10300, [::1]:10400`.
pub fn join_endpoints<'a, I>(endpoints: I) -> String
where
    I: IntoIterator<Item = &'a Endpoint>,
{
    endpoints
        .into_iter()
        .map(|endpoint| endpoint.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
