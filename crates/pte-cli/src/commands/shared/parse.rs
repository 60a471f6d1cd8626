use std::str::FromStr;

use pte_core::errors::CoreError;

/// Parse an optional enum flag; `None` stays `None`.
pub fn parse_opt<T>(raw: Option<&str>) -> Result<Option<T>, CoreError>
where
    T: FromStr<Err = CoreError>,
{
    raw.map(str::parse).transpose()
}
