//! Client address for per-IP rate limiting

use std::net::IpAddr;

use axum::http::HeaderMap;

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

/// Address the rate limiter keys anonymous requests on
///
/// Order: the left-most `X-Forwarded-For` entry, then `X-Real-IP`, then the
/// socket peer. Unparseable header values are skipped. The headers are
/// trusted, so the API must sit behind a proxy that overwrites them.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    header_ip(headers, FORWARDED_FOR, |v| v.split(',').next())
        .or_else(|| header_ip(headers, REAL_IP, Some))
        .or(direct_ip)
}

fn header_ip<'a>(
    headers: &'a HeaderMap,
    name: &str,
    pick: impl FnOnce(&'a str) -> Option<&'a str>,
) -> Option<IpAddr> {
    let value = headers.get(name)?.to_str().ok()?;
    pick(value)?.trim().parse().ok()
}
