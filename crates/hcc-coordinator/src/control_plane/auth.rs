// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Authorization for the two endpoint classes (spec.md §4.7): public
//! endpoints require a matching `secret` form field; internal endpoints
//! require the caller's source IP to fall in `10.0.0.0/8`.
//!
//! Diagnostics for auth failures log the remote address and path but never
//! the attempted secret (spec.md §5 "Secret handling").

use std::net::{IpAddr, SocketAddr};

use hcc_wire::FormMap;

#[derive(Debug)]
pub struct Unauthorized;

/// `authorize()` in the original: compares the `secret` form field against
/// the configured value.
pub fn authorize_public(configured_secret: &str, form: &FormMap, path: &str, peer: SocketAddr) -> Result<(), Unauthorized> {
    let theirs = form.get("secret").map(String::as_str);
    if theirs == Some(configured_secret) {
        Ok(())
    } else {
        tracing::info!(peer = %peer.ip(), path, "unauthorized request: missing or wrong secret");
        Err(Unauthorized)
    }
}

/// `authorize_internal()` in the original: the request must originate from
/// a `10.*` address (internal snitch pushes).
pub fn authorize_internal(peer: SocketAddr, path: &str) -> Result<(), Unauthorized> {
    if is_internal(peer.ip()) {
        Ok(())
    } else {
        tracing::info!(peer = %peer.ip(), path, "untrusted source for internal endpoint");
        Err(Unauthorized)
    }
}

fn is_internal(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.octets()[0] == 10,
        IpAddr::V6(v6) => v6.to_ipv4_mapped().is_some_and(|v4| v4.octets()[0] == 10),
    }
}
