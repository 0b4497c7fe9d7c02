//! Request/response types for the JSON surface.
//!
//! Wire field names follow the domain API (`nombre`, `puntos_local`, …) so a
//! running instance of this service is itself a valid remote counterpart for
//! another one.

/// Login form and page payloads.
pub mod auth;
/// Game requests, responses and list filters.
pub mod game;
/// Health check payload.
pub mod health;
/// Informational page payloads.
pub mod pages;
/// Pokémon proxy payloads.
pub mod pokemon;
/// Team requests, responses and list filters.
pub mod team;

/// Serde helpers for the API's naive `YYYY-MM-DDThh:mm:ss` timestamps.
pub mod iso_datetime {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

    const FORMAT: &[BorrowedFormatItem<'static>] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

    /// Format a timestamp the way the wire expects it.
    pub fn format(value: PrimitiveDateTime) -> String {
        value
            .format(FORMAT)
            .unwrap_or_else(|_| "invalid-timestamp".into())
    }

    /// Parse a wire timestamp.
    pub fn parse(text: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
        PrimitiveDateTime::parse(text, FORMAT)
    }

    /// Serialize a timestamp as a wire string.
    pub fn serialize<S: Serializer>(
        value: &PrimitiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let text = value.format(FORMAT).map_err(ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    /// Deserialize a timestamp from a wire string.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<PrimitiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(de::Error::custom)
    }

    #[cfg(test)]
    mod tests {
        use time::macros::datetime;

        use super::*;

        #[test]
        fn round_trips_naive_timestamps() {
            let parsed = parse("2025-05-04T18:30:00").unwrap();
            assert_eq!(parsed, datetime!(2025-05-04 18:30:00));
            assert_eq!(format(parsed), "2025-05-04T18:30:00");
        }

        #[test]
        fn rejects_malformed_timestamps() {
            assert!(parse("2025-05-04").is_err());
            assert!(parse("yesterday").is_err());
        }
    }
}

/// Parse a wire `YYYY-MM-DD` calendar date.
pub fn parse_wire_date(text: &str) -> Result<time::Date, time::error::Parse> {
    use time::{format_description::BorrowedFormatItem, macros::format_description};
    const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
    time::Date::parse(text, FORMAT)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn wire_dates_are_plain_calendar_days() {
        assert_eq!(parse_wire_date("2025-05-04").unwrap(), date!(2025 - 05 - 04));
        assert!(parse_wire_date("2025-05-04T18:30:00").is_err());
    }
}
