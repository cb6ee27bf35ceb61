//! Pure extractors over raw API payloads.
//!
//! Each function walks the JSON shape of one endpoint and produces
//! report lines. Missing data never aborts the report: a field that is
//! absent degrades to a sentinel string, and a missing top-level array
//! appends a sentinel line so the output is always a line sequence.

use chrono::Local;
use serde_json::Value;

pub const STATION_NOT_FOUND: &str = "Station not found";
pub const NO_TEMPERATURE_READINGS: &str = "No air temperature readings found";
pub const NO_HUMIDITY_READINGS: &str = "No readings found";
pub const NO_FORECASTS: &str = "No forecasts found";
pub const NO_RECORDS: &str = "No records found";

const MISSING_FIELD: &str = "n/a";
const BLOCK_SEPARATOR: &str = "************************************************";

/// Numeric id of the first station whose name matches, or the
/// "not found" sentinel. Station names are expected unique, so
/// first-match is enough.
pub fn extract_station_id(payload: &Value, station_name: &str) -> String {
    station_id(payload, station_name)
        .map_or_else(|| STATION_NOT_FOUND.to_string(), str::to_string)
}

/// Formatted air-temperature line for one station, or a sentinel.
pub fn extract_air_temperature_for_station(payload: &Value, station_name: &str) -> String {
    let Some(id) = station_id(payload, station_name) else {
        return STATION_NOT_FOUND.to_string();
    };
    let Some(readings) = reading_data(payload) else {
        return NO_TEMPERATURE_READINGS.to_string();
    };

    match reading_value(readings, id) {
        Some(value) => format!("  {station_name} air temperature: {value}°C"),
        None => "Temperature reading not found".to_string(),
    }
}

/// Formatted relative-humidity line for one station, or a sentinel.
pub fn extract_humidity_for_station(payload: &Value, station_name: &str) -> String {
    let Some(id) = station_id(payload, station_name) else {
        return STATION_NOT_FOUND.to_string();
    };
    let Some(readings) = reading_data(payload) else {
        return NO_HUMIDITY_READINGS.to_string();
    };

    match reading_value(readings, id) {
        Some(value) => format!("  {station_name} relative humidity: {value}%"),
        None => "Humidity reading not found".to_string(),
    }
}

/// 2-hour forecast: a timestamped header plus one line per forecast
/// entry matching `area`. Station readings are appended separately by
/// the caller.
pub fn extract_forecast_2h(payload: &Value, area: &str) -> Vec<String> {
    let mut output = Vec::new();
    output.push(format!(
        "2-Hour Weather Forecast {}",
        Local::now().format("%d-%m-%Y %H:%M:%S")
    ));

    let Some(forecasts) = payload["data"]["items"]
        .get(0)
        .and_then(|item| item["forecasts"].as_array())
    else {
        output.push(NO_FORECASTS.to_string());
        return output;
    };

    for forecast in forecasts {
        if forecast["area"].as_str() == Some(area) {
            output.push(format!("    {area} forecast: {}", field(&forecast["forecast"])));
        }
    }

    output
}

/// 24-hour forecast: island-wide ranges, the general outlook, wind,
/// then one banner per validity period with one line per region.
pub fn extract_forecast_24h(payload: &Value) -> Vec<String> {
    let mut output = Vec::new();

    let Some(record) = payload["data"]["records"].get(0) else {
        output.push(NO_RECORDS.to_string());
        return output;
    };

    let general = &record["general"];
    output.push(format!(
        "Temperature - Low: {}°C, High: {}°C",
        field(&general["temperature"]["low"]),
        field(&general["temperature"]["high"]),
    ));
    output.push(format!(
        "Relative Humidity - Low: {}%, High: {}%",
        field(&general["relativeHumidity"]["low"]),
        field(&general["relativeHumidity"]["high"]),
    ));
    output.push(format!("Forecast: {} ", field(&general["forecast"]["text"])));
    output.push(format!(
        "Wind - Direction: {}, Lowest speed: {}km/h, Highest speed: {}km/h\n",
        field(&general["wind"]["direction"]),
        field(&general["wind"]["speed"]["low"]),
        field(&general["wind"]["speed"]["high"]),
    ));

    if let Some(periods) = record["periods"].as_array() {
        for period in periods {
            output.push(format!(
                "************Valid from {}************",
                field(&period["timePeriod"]["text"])
            ));
            if let Some(regions) = period["regions"].as_object() {
                for (area, info) in regions {
                    output.push(format!("{area}: {}", field(&info["text"])));
                }
            }
        }
    }

    output
}

/// 4-day outlook: one separated block per forecast entry, each ending
/// with a blank line.
pub fn extract_forecast_4day(payload: &Value) -> Vec<String> {
    let mut output = Vec::new();

    let Some(forecasts) = payload["data"]["records"]
        .get(0)
        .and_then(|record| record["forecasts"].as_array())
    else {
        output.push(NO_FORECASTS.to_string());
        return output;
    };

    for forecast in forecasts {
        output.push(BLOCK_SEPARATOR.to_string());
        output.push(format!("Day: {}", field(&forecast["day"])));
        output.push(format!(
            "Time stamp: {} (YYYY-MM-DD HH:MM:SS)",
            field(&forecast["timestamp"])
        ));
        output.push(format!("Forecast: {}", field(&forecast["forecast"]["summary"])));
        output.push(format!(
            "Temperature - Low: {}°C, High: {}°C",
            field(&forecast["temperature"]["low"]),
            field(&forecast["temperature"]["high"]),
        ));
        output.push(format!(
            "Relative Humidity - Low: {}%, High: {}%",
            field(&forecast["relativeHumidity"]["low"]),
            field(&forecast["relativeHumidity"]["high"]),
        ));
        output.push(format!(
            "Wind - Direction: {}, Lowest speed: {}km/h, Highest speed: {}km/h",
            field(&forecast["wind"]["direction"]),
            field(&forecast["wind"]["speed"]["low"]),
            field(&forecast["wind"]["speed"]["high"]),
        ));
        output.push(String::new());
    }

    output
}

fn station_id<'a>(payload: &'a Value, station_name: &str) -> Option<&'a str> {
    payload["data"]["stations"]
        .as_array()?
        .iter()
        .find(|station| station["name"].as_str() == Some(station_name))
        .and_then(|station| station["id"].as_str())
}

fn reading_data(payload: &Value) -> Option<&Vec<Value>> {
    payload["data"]["readings"].get(0)?.get("data")?.as_array()
}

fn reading_value(readings: &[Value], station_id: &str) -> Option<String> {
    readings
        .iter()
        .find(|reading| reading["stationId"].as_str() == Some(station_id))
        .and_then(|reading| match &reading["value"] {
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Scalar render of a JSON leaf; anything absent or non-scalar becomes
/// the per-field sentinel so line shapes stay stable.
fn field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => MISSING_FIELD.to_string(),
    }
}
