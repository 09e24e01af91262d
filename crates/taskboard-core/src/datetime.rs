use std::fmt::Write as _;

use chrono::{
  DateTime,
  NaiveDate,
  NaiveDateTime
};
use taskboard_shared::WireDate;

use crate::error::BoardError;

pub const FORM_DATE_FORMAT: &str =
  "%Y-%m-%d";

const TEXT_DATETIME_FORMATS: &[&str] = &[
  "%Y-%m-%d %H:%M:%S",
  "%Y-%m-%dT%H:%M:%S",
  "%Y-%m-%dT%H:%M:%S%.f",
  "%b %d, %Y, %I:%M:%S %p",
  "%b %d, %Y %I:%M:%S %p"
];

/// Offsets written without a colon,
/// which RFC 3339 parsing rejects.
const TEXT_OFFSET_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f%z",
  "%Y-%m-%d %H:%M:%S%.f%z"
];

/// Normalizes whatever the store sent
/// into a calendar date. Epoch
/// milliseconds are read in UTC.
pub fn normalize_wire_date(
  raw: &WireDate
) -> Result<NaiveDate, BoardError> {
  match raw {
    | WireDate::Millis(ms) => {
      date_from_millis(*ms)
    }
    | WireDate::Text(text) => {
      parse_date_text(text)
    }
  }
}

pub fn parse_date_text(
  text: &str
) -> Result<NaiveDate, BoardError> {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return Err(BoardError::decode(
      "empty date"
    ));
  }

  if let Ok(ms) = trimmed.parse::<i64>()
  {
    return date_from_millis(ms);
  }

  if let Ok(date) =
    NaiveDate::parse_from_str(
      trimmed,
      FORM_DATE_FORMAT
    )
  {
    return Ok(date);
  }

  if let Ok(dt) =
    DateTime::parse_from_rfc3339(trimmed)
  {
    return Ok(dt.date_naive());
  }

  if let Some(dt) =
    TEXT_OFFSET_FORMATS.iter().find_map(
      |format| {
        DateTime::parse_from_str(
          trimmed, format
        )
        .ok()
      }
    )
  {
    return Ok(dt.date_naive());
  }

  TEXT_DATETIME_FORMATS
    .iter()
    .find_map(|format| {
      NaiveDateTime::parse_from_str(
        trimmed, format
      )
      .ok()
    })
    .map(|dt| dt.date())
    .ok_or_else(|| {
      BoardError::decode(format!(
        "unrecognized date `{trimmed}`"
      ))
    })
}

fn date_from_millis(
  ms: i64
) -> Result<NaiveDate, BoardError> {
  DateTime::from_timestamp_millis(ms)
    .map(|dt| dt.date_naive())
    .ok_or_else(|| {
      BoardError::decode(format!(
        "epoch millis out of range: {ms}"
      ))
    })
}

/// Value for an `<input type=date>`.
pub fn form_value(
  date: NaiveDate
) -> String {
  date.format(FORM_DATE_FORMAT).to_string()
}

pub fn parse_form_date(
  value: &str
) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(
    value.trim(),
    FORM_DATE_FORMAT
  )
  .ok()
}

/// Formats for display. A broken
/// `format` degrades to the form
/// format instead of panicking.
pub fn format_display(
  date: NaiveDate,
  format: &str
) -> String {
  let mut out = String::new();
  if write!(out, "{}", date.format(format))
    .is_err()
  {
    tracing::warn!(
      format,
      "invalid display date format"
    );
    return form_value(date);
  }
  out
}

#[cfg(test)]
mod tests {
  use rstest::rstest;

  use super::*;

  fn ymd(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[rstest]
  #[case("2024-03-05")]
  #[case("1709596800000")]
  #[case("2024-03-05 18:30:00")]
  #[case("2024-03-05T18:30:00")]
  #[case("2024-03-05T18:30:00.250")]
  #[case("2024-03-05T18:30:00+00:00")]
  #[case("2024-03-05T10:00:00.000+0800")]
  #[case("2024-03-05T10:00:00+0800")]
  #[case("2024-03-05 23:30:00-0500")]
  #[case("Mar 5, 2024, 12:00:00 AM")]
  #[case(" 2024-03-05 ")]
  fn accepted_text_shapes(
    #[case] raw: &str
  ) {
    assert_eq!(
      parse_date_text(raw)
        .expect("date parses"),
      ymd(2024, 3, 5)
    );
  }

  #[rstest]
  #[case("")]
  #[case("tomorrow")]
  #[case("2024/13/45")]
  fn rejected_text_shapes(
    #[case] raw: &str
  ) {
    assert!(
      parse_date_text(raw).is_err()
    );
  }

  #[test]
  fn numeric_wire_dates_are_epoch_millis()
   {
    let date = normalize_wire_date(
      &WireDate::Millis(1_709_596_800_000)
    )
    .expect("millis normalize");
    assert_eq!(date, ymd(2024, 3, 5));
  }

  #[test]
  fn form_value_is_zero_padded() {
    assert_eq!(
      form_value(ymd(2024, 3, 5)),
      "2024-03-05"
    );
    assert_eq!(
      parse_form_date("2024-03-05"),
      Some(ymd(2024, 3, 5))
    );
    assert_eq!(parse_form_date(""), None);
  }

  #[test]
  fn display_uses_configured_format() {
    assert_eq!(
      format_display(
        ymd(2024, 3, 5),
        "%Y/%m/%d"
      ),
      "2024/03/05"
    );
    assert_eq!(
      format_display(
        ymd(2024, 3, 5),
        "%Q"
      ),
      "2024-03-05"
    );
  }
}
