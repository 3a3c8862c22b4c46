use std::io::{self, IsTerminal, Write};

use weather_core::{GeocodeResult, WeatherReport};

const RULE_WIDTH: usize = 50;

/// Progress lines shown after geocoding, while the forecast is in flight.
pub fn write_located<W: Write>(out: &mut W, place: &GeocodeResult) -> io::Result<()> {
    writeln!(out, "Location found: {}", place.display_name)?;
    writeln!(out, "Fetching weather data...")?;
    out.flush()
}

pub fn write_report<W: Write>(out: &mut W, report: &WeatherReport, verbose: bool) -> io::Result<()> {
    let rule = "━".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "Weather Report:")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Location:    {}", report.location)?;
    writeln!(out, "Temperature: {}°C", report.temperature_c)?;
    writeln!(out, "Feels like:  {}°C", report.feels_like_c)?;
    writeln!(out, "Humidity:    {}%", report.humidity_pct)?;
    writeln!(out, "Conditions:  {}", report.description)?;

    if verbose {
        writeln!(out)?;
        writeln!(out, "Detailed Information:")?;
        writeln!(
            out,
            "Coordinates:  {}, {}",
            report.coordinates.latitude, report.coordinates.longitude
        )?;
        writeln!(out, "Full Address: {}", report.full_location)?;
        if !report.station_name.is_empty() {
            writeln!(out, "Station:      {}", report.station_name)?;
        }
    }

    writeln!(out, "{rule}")?;
    writeln!(out, "{}", report.summary)?;

    Ok(())
}

/// Print a failure to stderr, in red when stderr is a terminal.
pub fn print_error(err: &anyhow::Error) {
    let stderr = io::stderr();
    let message = format!("Error: {err:#}");

    if stderr.is_terminal() {
        eprintln!("\x1b[31m{message}\x1b[0m");
    } else {
        eprintln!("{message}");
    }
}
