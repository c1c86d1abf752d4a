// Year extraction from the two date layouts the API has been seen to use:
//
//   YYYY-MM-DD...   separator '-' at byte 4, year in bytes 0..4
//   DD.MM.YYYY      separator '.' at byte 5, year in bytes 6..10

use anyhow::{Context, Result};
use tracing::debug;

use super::traits::DateTimeSource;

const YMD_SEP: u8 = b'-';
const YMD_SEP_INDEX: usize = 4;
const DMY_SEP: u8 = b'.';
const DMY_SEP_INDEX: usize = 5;

/// Pull the year out of a `YYYY-MM-DD` or `DD.MM.YYYY` string.
pub fn parse_year(datetime: &str) -> Result<i32> {
    let bytes = datetime.as_bytes();

    let year = if bytes.get(YMD_SEP_INDEX) == Some(&YMD_SEP) {
        datetime.get(..4)
    } else if bytes.get(DMY_SEP_INDEX) == Some(&DMY_SEP) {
        datetime.get(6..10)
    } else {
        anyhow::bail!("Invalid date format: {datetime:?}");
    };

    let year = year.with_context(|| format!("Date is too short: {datetime:?}"))?;
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        anyhow::bail!("Invalid year {year:?} in {datetime:?}");
    }
    year.parse()
        .with_context(|| format!("Invalid year {year:?} in {datetime:?}"))
}

/// Ask `source` for the current date and return its year.
pub async fn what_is_year_now(source: &dyn DateTimeSource) -> Result<i32> {
    let datetime = source.current_datetime().await?;
    let year = parse_year(&datetime)?;
    debug!(datetime = %datetime, year, "Resolved current year");
    Ok(year)
}
