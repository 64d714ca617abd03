use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::Mutex;

/// String formats a design can require of a string attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// RFC 3339 full-date (`2006-01-02`)
    Date,
    /// RFC 3339 date-time
    DateTime,
    Uuid,
    Email,
    Hostname,
    Ipv4,
    Ipv6,
    /// Either IPv4 or IPv6
    Ip,
    Uri,
    /// IEEE 802 MAC-48 or EUI-64 address
    Mac,
    /// IP address with a prefix length (`10.0.0.0/8`)
    Cidr,
    /// A valid regular expression
    Regexp,
    /// A valid JSON document
    Json,
    /// RFC 1123 HTTP date (`Mon, 02 Jan 2006 15:04:05 GMT`)
    Rfc1123,
}

impl Format {
    pub const ALL: [Format; 14] = [
        Format::Date,
        Format::DateTime,
        Format::Uuid,
        Format::Email,
        Format::Hostname,
        Format::Ipv4,
        Format::Ipv6,
        Format::Ip,
        Format::Uri,
        Format::Mac,
        Format::Cidr,
        Format::Regexp,
        Format::Json,
        Format::Rfc1123,
    ];

    /// Name used in design files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Format::Date => "date",
            Format::DateTime => "date-time",
            Format::Uuid => "uuid",
            Format::Email => "email",
            Format::Hostname => "hostname",
            Format::Ipv4 => "ipv4",
            Format::Ipv6 => "ipv6",
            Format::Ip => "ip",
            Format::Uri => "uri",
            Format::Mac => "mac",
            Format::Cidr => "cidr",
            Format::Regexp => "regexp",
            Format::Json => "json",
            Format::Rfc1123 => "rfc1123",
        }
    }

    /// Rust variant name, used when emitting `Format::<Variant>` paths.
    #[must_use]
    pub fn variant(self) -> &'static str {
        match self {
            Format::Date => "Date",
            Format::DateTime => "DateTime",
            Format::Uuid => "Uuid",
            Format::Email => "Email",
            Format::Hostname => "Hostname",
            Format::Ipv4 => "Ipv4",
            Format::Ipv6 => "Ipv6",
            Format::Ip => "Ip",
            Format::Uri => "Uri",
            Format::Mac => "Mac",
            Format::Cidr => "Cidr",
            Format::Regexp => "Regexp",
            Format::Json => "Json",
            Format::Rfc1123 => "Rfc1123",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`Format::from_str`] for names outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format {0:?}")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

static HOSTNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[[:alnum:]][[:alnum:]\-]{0,61}[[:alnum:]]$|^[[:alpha:]]$")
        .expect("hostname regex should be valid")
});

static IPV4_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$").expect("ipv4 regex should be valid")
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s<>]+@[^@\s<>]+$").expect("email regex should be valid")
});

static MAC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{2}([:-])[0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){4}(?:(?:[:-][0-9A-Fa-f]{2}){2})?$|^[0-9A-Fa-f]{4}\.[0-9A-Fa-f]{4}\.[0-9A-Fa-f]{4}(?:\.[0-9A-Fa-f]{4})?$")
        .expect("mac regex should be valid")
});

/// Check `value` against `format`, returning the reason on failure.
pub fn validate_format(format: Format, value: &str) -> Result<(), String> {
    match format {
        Format::Date => chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Format::DateTime => chrono::DateTime::parse_from_rfc3339(value)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Format::Uuid => uuid::Uuid::parse_str(value)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Format::Email => {
            if EMAIL_REGEX.is_match(value) {
                Ok(())
            } else {
                Err("invalid email address".to_string())
            }
        }
        Format::Hostname => {
            if value.split('.').all(|label| HOSTNAME_REGEX.is_match(label)) {
                Ok(())
            } else {
                Err("hostname value does not match RFC 1035".to_string())
            }
        }
        Format::Ipv4 => {
            if IPV4_REGEX.is_match(value) && value.parse::<Ipv4Addr>().is_ok() {
                Ok(())
            } else {
                Err("invalid IPv4 address".to_string())
            }
        }
        Format::Ipv6 => value
            .parse::<Ipv6Addr>()
            .map(|_| ())
            .map_err(|_| "invalid IPv6 address".to_string()),
        Format::Ip => value
            .parse::<IpAddr>()
            .map(|_| ())
            .map_err(|_| "invalid IP address".to_string()),
        Format::Uri => url::Url::parse(value)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Format::Mac => {
            if MAC_REGEX.is_match(value) {
                Ok(())
            } else {
                Err("invalid MAC address".to_string())
            }
        }
        Format::Cidr => validate_cidr(value),
        Format::Regexp => Regex::new(value).map(|_| ()).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str::<serde_json::Value>(value)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Format::Rfc1123 => chrono::NaiveDateTime::parse_from_str(value, "%a, %d %b %Y %H:%M:%S GMT")
            .map(|_| ())
            .or_else(|_| chrono::DateTime::parse_from_rfc2822(value).map(|_| ()))
            .map_err(|e| e.to_string()),
    }
}

fn validate_cidr(value: &str) -> Result<(), String> {
    let (addr, prefix) = value
        .split_once('/')
        .ok_or_else(|| "missing prefix length".to_string())?;
    let max = match addr.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => 32,
        Ok(IpAddr::V6(_)) => 128,
        Err(_) => return Err("invalid CIDR address".to_string()),
    };
    match prefix.parse::<u8>() {
        Ok(bits) if bits <= max => Ok(()),
        _ => Err(format!("invalid prefix length {prefix:?}")),
    }
}

static PATTERN_CACHE: Lazy<Mutex<HashMap<String, Option<Regex>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Match `value` against `pattern`, compiling each distinct pattern once.
///
/// A pattern that does not compile never matches.
pub fn validate_pattern(pattern: &str, value: &str) -> bool {
    let mut cache = match PATTERN_CACHE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    cache
        .entry(pattern.to_string())
        .or_insert_with(|| Regex::new(pattern).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}
