//! Plain-text rendering of an enrichment snapshot.

use std::fmt;

use cityscope_enrich::{CategoryResult, Snapshot};
use cityscope_places::Suggestion;
use cityscope_weather::WeatherSnapshot;

pub struct Report<'a>(pub &'a Snapshot);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = &self.0.state;

        let Some(location) = &state.location else {
            return writeln!(f, "No place selected.");
        };

        writeln!(f, "{}", location.name)?;
        writeln!(
            f,
            "  {} ({:.4}, {:.4})",
            location.formatted_address, location.coordinates.lat, location.coordinates.lng
        )?;
        writeln!(f)?;

        match &state.weather {
            Some(weather) => write_weather(f, weather)?,
            None => writeln!(f, "Weather\n  unavailable")?,
        }

        for (category, result) in state.categories.iter() {
            writeln!(f)?;
            writeln!(f, "{}", category.label())?;
            match result {
                CategoryResult::NotRequested => {}
                CategoryResult::Pending => writeln!(f, "  loading")?,
                CategoryResult::Failed => writeln!(f, "  unavailable")?,
                CategoryResult::Ready(places) if places.is_empty() => {
                    writeln!(f, "  nothing found")?
                }
                CategoryResult::Ready(places) => {
                    for (i, place) in places.iter().enumerate() {
                        if place.formatted_address.is_empty() {
                            writeln!(f, "  {}. {}", i + 1, place.name)?;
                        } else {
                            writeln!(f, "  {}. {}, {}", i + 1, place.name, place.formatted_address)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn write_weather(f: &mut fmt::Formatter<'_>, weather: &WeatherSnapshot) -> fmt::Result {
    writeln!(f, "Weather ({})", weather.observed_label())?;
    if weather.description.is_empty() {
        writeln!(
            f,
            "  {}°C, feels like {}°C",
            weather.temperature_rounded(),
            weather.feels_like_rounded()
        )?;
    } else {
        writeln!(
            f,
            "  {}, {}°C, feels like {}°C",
            weather.description,
            weather.temperature_rounded(),
            weather.feels_like_rounded()
        )?;
    }
    writeln!(
        f,
        "  Wind {} km/h, humidity {}%, pressure {} hPa, visibility {:.1} km",
        weather.wind_kmh_rounded(),
        weather.humidity_pct,
        weather.pressure_hpa,
        weather.visibility_km
    )?;
    writeln!(f, "  Station {}, {}", weather.station_name, weather.country_code)?;
    if let Some(url) = weather.icon_url() {
        writeln!(f, "  Icon {}", url)?;
    }
    Ok(())
}

pub struct Suggestions<'a>(pub &'a [Suggestion]);

impl fmt::Display for Suggestions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No suggestions.");
        }
        for suggestion in self.0 {
            writeln!(f, "{}", suggestion.description)?;
        }
        Ok(())
    }
}
