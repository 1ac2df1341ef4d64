use anyhow::{anyhow, Context, Result};
use std::net::{IpAddr, ToSocketAddrs};

/// Resolves `host` to a single address, preferring IPv4.
///
/// The resolved address, not the hostname, keys the run history.
pub fn resolve_host(host: &str) -> Result<IpAddr> {
    let host = host.trim();
    if host.is_empty() {
        return Err(anyhow!("empty host name"));
    }
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let addrs: Vec<IpAddr> = (host, 0)
        .to_socket_addrs()
        .with_context(|| format!("failed to resolve {host}"))?
        .map(|addr| addr.ip())
        .collect();

    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| anyhow!("no addresses found for {host}"))
}
