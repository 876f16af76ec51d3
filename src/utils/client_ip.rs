//! Client IP extraction for click events.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

/// Resolves the client IP recorded on a click event.
///
/// Proxy headers are only honoured when `behind_proxy` is set; otherwise any
/// client could spoof them. With a proxy, the first valid `X-Forwarded-For`
/// entry wins, then `X-Real-IP`, then the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy
        && let Some(ip) = from_x_forwarded_for(headers).or_else(|| from_x_real_ip(headers))
    {
        return ip.to_string();
    }

    peer.ip().to_string()
}

fn from_x_forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    let xff = headers.get("x-forwarded-for")?.to_str().ok()?;

    xff.split(',')
        .map(str::trim)
        .find_map(|s| s.parse::<IpAddr>().ok())
}

fn from_x_real_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<IpAddr>().ok())
}
