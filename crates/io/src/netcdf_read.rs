//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::{Duration, NaiveDate};

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 3-D `f64` variable by alias list, returning the flattened data,
/// the shape derived from the variable's dimensions, and the matched name.
///
/// If the variable carries a `_FillValue` attribute, samples equal to it
/// are replaced by NaN.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<(Vec<f64>, [usize; 3]), IoError> {
    let var = aliases
        .iter()
        .find_map(|&alias| file.variable(alias))
        .ok_or_else(|| IoError::MissingVariable {
            name: aliases.first().copied().unwrap_or("unknown").to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{} dimensions", var.name()),
            expected: 3,
            got: dims.len(),
        });
    }

    let shape = [dims[0].len(), dims[1].len(), dims[2].len()];
    let mut data = var.get_values::<f64, _>(..)?;

    if let Some(fv) = fill_value(&var) {
        for v in &mut data {
            if *v == fv {
                *v = f64::NAN;
            }
        }
    }

    Ok((data, shape))
}

/// Extract the `_FillValue` attribute of a variable as `f64`, if present.
pub(crate) fn fill_value(var: &netcdf::Variable<'_>) -> Option<f64> {
    let attr = var.attribute_value("_FillValue")?.ok()?;
    attr.try_into().ok()
}

/// Read a CF time axis as calendar dates.
///
/// Parses a `units` attribute of the form `"days since YYYY-MM-DD"` (with
/// an optional trailing clock time) and offsets the base date by each
/// stored value. Fractional day offsets are truncated.
pub(crate) fn read_time_axis(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<Vec<NaiveDate>, IoError> {
    let var = file
        .variable(time_var)
        .ok_or_else(|| IoError::MissingVariable {
            name: time_var.to_string(),
            path: path.to_path_buf(),
        })?;

    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    let base = parse_time_units(&units_str)?;

    let values = var.get_values::<f64, _>(..)?;
    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return Err(IoError::InvalidTime {
                    reason: format!("non-finite time offset {v}"),
                });
            }
            base.checked_add_signed(Duration::days(v as i64))
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("time offset {v} out of range"),
                })
        })
        .collect()
}

/// Parse a CF-convention `"days since YYYY-MM-DD[ HH:MM:SS]"` string into
/// the base date.
pub(crate) fn parse_time_units(units: &str) -> Result<NaiveDate, IoError> {
    let parts: Vec<&str> = units.splitn(3, ' ').collect();
    if parts.len() < 3 || parts[0] != "days" || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units}'"),
        });
    }

    // Take only the date portion; a clock time may follow.
    let date_str = if parts[2].len() >= 10 {
        &parts[2][..10]
    } else {
        parts[2]
    };

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| IoError::InvalidTime {
        reason: format!("cannot parse base date '{date_str}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_units() {
        let base = parse_time_units("days since 2020-01-01").unwrap();
        assert_eq!(base, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn parse_units_with_clock_time() {
        let base = parse_time_units("days since 1970-01-01 00:00:00").unwrap();
        assert_eq!(base, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    }

    #[test]
    fn parse_rejects_non_days() {
        assert!(parse_time_units("hours since 2020-01-01").is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_time_units("whenever").is_err());
        assert!(parse_time_units("days since not-a-date").is_err());
    }
}
