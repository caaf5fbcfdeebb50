//! Emergency message composition and outbound URI construction.
//!
//! The composer is pure: given a resolved position, a locale table, a
//! channel and the trusted numbers, it produces the outbound URI. Launching
//! the URI (and therefore delivery) is the shell's job and is
//! fire-and-forget; nothing here can observe whether a message was sent.
//!
//! # URI formats
//!
//! - SMS: `sms:{comma-joined-numbers}?body={encoded}` — the recipient
//!   segment is empty when no trusted numbers exist, leaving the target for
//!   manual entry.
//! - WhatsApp: `https://wa.me/?text={encoded}` — never carries a recipient.
//! - Dial: `tel:{number}`.
//! - Map link embedded in bodies: `https://maps.google.com/?q={lat},{lon}`
//!   at full float precision.
//!
//! Bodies are percent-encoded with the ECMAScript `encodeURIComponent`
//! spared set so any standards-compliant handler decodes them unchanged.

use crate::locale::LocaleContent;
use crate::location::{LocationFailure, Position};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;

/// Outbound channel for an emergency alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchChannel {
    /// Native messaging intent (`sms:`).
    Sms,
    /// WhatsApp web intent, opened in a new context.
    WhatsApp,
}

impl DispatchChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchChannel::Sms => "sms",
            DispatchChannel::WhatsApp => "whatsapp",
        }
    }
}

impl fmt::Display for DispatchChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped, matching
/// ECMAScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode `text` for use as a URI query component.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Map link for a resolved position, full float precision (shortest
/// round-trip formatting, no rounding).
pub fn maps_url(position: Position) -> String {
    format!(
        "https://maps.google.com/?q={},{}",
        position.latitude, position.longitude
    )
}

/// Localized alert body: the locale's emergency phrase, a newline, the map
/// link.
pub fn alert_message(content: &LocaleContent, position: Position) -> String {
    format!("{}\n{}", content.sms_body, maps_url(position))
}

/// Strip visual separators (whitespace, dots, dashes, parentheses) from a
/// dial string. Applied at URI-build time only; stored numbers keep the
/// form the user entered.
pub fn sanitize_dial_string(number: &str) -> String {
    number
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '-' | '.'))
        .collect()
}

/// Direct-dial URI for a contact number.
pub fn tel_uri(number: &str) -> String {
    format!("tel:{}", sanitize_dial_string(number))
}

/// A composed outbound dispatch, ready to hand off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub channel: DispatchChannel,
    pub uri: String,
    /// Numbers targeted, already sanitized; empty for open-ended handoffs.
    pub recipients: Vec<String>,
}

/// Build the outbound URI for `channel` from a successfully resolved
/// position. The failure path never reaches this function.
pub fn compose(
    content: &LocaleContent,
    position: Position,
    channel: DispatchChannel,
    trusted: &[String],
) -> Dispatch {
    let encoded = encode_component(&alert_message(content, position));

    match channel {
        DispatchChannel::Sms => {
            let recipients: Vec<String> = trusted
                .iter()
                .map(|n| sanitize_dial_string(n))
                .filter(|n| !n.is_empty())
                .collect();
            let uri = if recipients.is_empty() {
                format!("sms:?body={}", encoded)
            } else {
                format!("sms:{}?body={}", recipients.join(","), encoded)
            };
            Dispatch {
                channel,
                uri,
                recipients,
            }
        }
        DispatchChannel::WhatsApp => Dispatch {
            channel,
            uri: format!("https://wa.me/?text={}", encoded),
            recipients: Vec::new(),
        },
    }
}

/// User-facing notice for a failed resolution.
///
/// The capability-absent case has its own string; every other reason shows
/// the generic request-failed string. The precise reason still reaches the
/// logs through [`LocationFailure`]'s `Display`.
pub fn failure_notice<'a>(content: &'a LocaleContent, failure: &LocationFailure) -> &'a str {
    match failure {
        LocationFailure::ServiceUnavailable => content.location_error,
        _ => content.location_alert,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{content, Locale};
    use percent_encoding::percent_decode_str;

    fn decoded_body(uri: &str, marker: &str) -> String {
        let (_, body) = uri.split_once(marker).expect("body marker present");
        percent_decode_str(body)
            .decode_utf8()
            .expect("valid utf-8")
            .into_owned()
    }

    #[test]
    fn test_sms_dispatch_with_trusted_numbers() {
        let am = content(Locale::Amharic);
        let dispatch = compose(
            am,
            Position::new(25.2048, 55.2708),
            DispatchChannel::Sms,
            &["+971501111111".to_string()],
        );

        assert!(dispatch.uri.starts_with("sms:+971501111111?body="));
        assert_eq!(dispatch.recipients, ["+971501111111"]);

        let body = decoded_body(&dispatch.uri, "?body=");
        assert!(body.contains(am.sms_body));
        assert!(body.contains("https://maps.google.com/?q=25.2048,55.2708"));
    }

    #[test]
    fn test_sms_dispatch_without_trusted_numbers() {
        let dispatch = compose(
            content(Locale::Amharic),
            Position::new(25.2048, 55.2708),
            DispatchChannel::Sms,
            &[],
        );
        assert!(dispatch.uri.starts_with("sms:?body="));
        assert!(dispatch.recipients.is_empty());
    }

    #[test]
    fn test_sms_joins_multiple_recipients_with_commas() {
        let dispatch = compose(
            content(Locale::Oromo),
            Position::new(25.2048, 55.2708),
            DispatchChannel::Sms,
            &["+971 50 111 1111".to_string(), "999".to_string()],
        );
        assert!(dispatch.uri.starts_with("sms:+971501111111,999?body="));
        assert_eq!(dispatch.recipients, ["+971501111111", "999"]);
    }

    #[test]
    fn test_whatsapp_dispatch_ignores_trusted_numbers() {
        let om = content(Locale::Oromo);
        let dispatch = compose(
            om,
            Position::new(25.2048, 55.2708),
            DispatchChannel::WhatsApp,
            &["+971501111111".to_string()],
        );

        assert!(dispatch.uri.starts_with("https://wa.me/?text="));
        assert!(dispatch.recipients.is_empty());

        let body = decoded_body(&dispatch.uri, "?text=");
        assert!(body.contains(om.sms_body));
    }

    #[test]
    fn test_message_layout_is_phrase_newline_link() {
        let am = content(Locale::Amharic);
        let message = alert_message(am, Position::new(1.5, 2.5));
        assert_eq!(
            message,
            format!("{}\nhttps://maps.google.com/?q=1.5,2.5", am.sms_body)
        );
    }

    #[test]
    fn test_maps_url_full_precision() {
        assert_eq!(
            maps_url(Position::new(25.2048, 55.2708)),
            "https://maps.google.com/?q=25.2048,55.2708"
        );
        // Shortest round-trip formatting: integral values lose the point,
        // long fractions keep every digit.
        assert_eq!(
            maps_url(Position::new(25.0, -55.5)),
            "https://maps.google.com/?q=25,-55.5"
        );
        assert_eq!(
            maps_url(Position::new(25.123456789012345, 55.2708)),
            "https://maps.google.com/?q=25.123456789012345,55.2708"
        );
    }

    #[test]
    fn test_encode_component_matches_ecmascript() {
        // Unreserved set passes through untouched.
        assert_eq!(
            encode_component("AZaz09-_.!~*'()"),
            "AZaz09-_.!~*'()"
        );
        // Reserved characters are escaped.
        assert_eq!(encode_component("a b&c=d+e"), "a%20b%26c%3Dd%2Be");
        assert_eq!(encode_component("?/:@#"), "%3F%2F%3A%40%23");
        // Multi-byte UTF-8 is escaped per byte.
        assert_eq!(encode_component("ቦ"), "%E1%89%A6");
        assert_eq!(encode_component("\n"), "%0A");
    }

    #[test]
    fn test_tel_uri_strips_separators() {
        assert_eq!(tel_uri("999"), "tel:999");
        assert_eq!(tel_uri("+971 4 269 9111"), "tel:+97142699111");
        assert_eq!(tel_uri("(050) 123-4567"), "tel:0501234567");
    }

    #[test]
    fn test_sanitize_keeps_plus_and_digits() {
        assert_eq!(sanitize_dial_string(" +971-50.111(1111) "), "+971501111111");
    }

    #[test]
    fn test_failure_notice_selection() {
        for locale in Locale::ALL {
            let table = content(locale);
            assert_eq!(
                failure_notice(table, &LocationFailure::ServiceUnavailable),
                table.location_error
            );
            for reason in [
                LocationFailure::PermissionDenied,
                LocationFailure::TimedOut,
                LocationFailure::Network("x".to_string()),
                LocationFailure::InvalidResponse("y".to_string()),
            ] {
                assert_eq!(failure_notice(table, &reason), table.location_alert);
            }
        }
    }
}
