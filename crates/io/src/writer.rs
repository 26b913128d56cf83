//! Water-fraction stack writer.

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::IoError;
use crate::stack::SampleStack;

/// Writes a water-fraction stack to a NetCDF file.
///
/// Produces a `water_fraction` variable in (time, lat, lon) order with
/// `lat`/`lon` coordinate variables and a CF time axis expressed as days
/// since the stack's first date. The output is readable by
/// [`crate::read_water_fraction`].
pub fn write_water_fraction(path: &Path, stack: &SampleStack) -> Result<(), IoError> {
    let mut file = netcdf::create(path)?;

    let (nt, rows, cols) = stack.data().dim();
    file.add_dimension("time", nt)?;
    file.add_dimension("lat", rows)?;
    file.add_dimension("lon", cols)?;

    {
        let mut var = file.add_variable::<f64>("lat", &["lat"])?;
        var.put_values(stack.lat(), ..)?;
        var.put_attribute("units", "degrees_north")?;
    }
    {
        let mut var = file.add_variable::<f64>("lon", &["lon"])?;
        var.put_values(stack.lon(), ..)?;
        var.put_attribute("units", "degrees_east")?;
    }
    {
        let base = stack.dates()[0];
        let offsets: Vec<f64> = stack
            .dates()
            .iter()
            .map(|d| days_since(base, *d))
            .collect();
        let mut var = file.add_variable::<f64>("time", &["time"])?;
        var.put_values(&offsets, ..)?;
        var.put_attribute("units", format!("days since {}", base.format("%Y-%m-%d")))?;
    }
    {
        let data = stack.data().as_standard_layout();
        let slice = data.as_slice().ok_or_else(|| IoError::Validation {
            reason: "stack data is not contiguous".to_string(),
        })?;
        let mut var = file.add_variable::<f64>("water_fraction", &["time", "lat", "lon"])?;
        var.put_values(slice, ..)?;
        var.put_attribute("units", "percent")?;
        var.put_attribute("long_name", "surface water fraction")?;
    }

    debug!(
        path = %path.display(),
        nt, rows, cols,
        "wrote water-fraction stack"
    );
    Ok(())
}

fn days_since(base: NaiveDate, date: NaiveDate) -> f64 {
    (date - base).num_days() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_offsets() {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let later = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap();
        assert_eq!(days_since(base, later), 30.0);
        assert_eq!(days_since(base, base), 0.0);
        assert_eq!(days_since(later, base), -30.0);
    }
}
