use weather_core::{Outcome, Units, WeatherRecord};

const STYLE: &str = "body{font-family:sans-serif;max-width:32rem;margin:2rem auto}\
.error{color:#b00020}label{display:block;margin:.5rem 0}";

const FORM_START: &str = "<form action=\"/weather\" method=\"get\">\n";
const ZIP_INPUT: &str =
    "<label>Zip code <input name=\"zip_code\" inputmode=\"numeric\" required></label>\n";
const UNITS_START: &str = "<label>Units <select name=\"units\">\n";
const UNITS_END: &str = "</select></label>\n";
const FORM_END: &str = "<button type=\"submit\">Get weather</button>\n</form>\n";

/// Minimal HTML escaping for text and attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

/// The zip code form, with an inline message when `error` is set.
pub fn index(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Check the weather</h1>\n");

    if let Some(message) = error {
        let message = escape(message);
        body.push_str(&format!("<p class=\"error\">{message}</p>\n"));
    }

    body.push_str(FORM_START);
    body.push_str(ZIP_INPUT);
    body.push_str(UNITS_START);
    for units in Units::known() {
        let option = format!(
            "<option value=\"{value}\">{value} ({symbol})</option>\n",
            value = units.as_str(),
            symbol = units.temperature_symbol(),
        );
        body.push_str(&option);
    }
    body.push_str(UNITS_END);
    body.push_str(FORM_END);

    page("Weather", &body)
}

pub fn weather(record: &WeatherRecord, units: &Units) -> String {
    let symbol = units.temperature_symbol();
    let body = format!(
        "<h1>Weather in {city}, {country}</h1>\n\
         <p class=\"description\">{description}</p>\n\
         <ul>\n\
         <li>Temperature: {temp}{symbol}</li>\n\
         <li>Low: {temp_min}{symbol}</li>\n\
         <li>High: {temp_max}{symbol}</li>\n\
         </ul>\n\
         <p><a href=\"/\">Check another zip code</a></p>\n",
        city = escape(&record.city),
        country = escape(&record.country),
        description = escape(&record.description),
        temp = record.temp,
        temp_min = record.temp_min,
        temp_max = record.temp_max,
    );

    page(&format!("Weather in {}", record.city), &body)
}

pub fn outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Weather { record, units } => weather(record, units),
        Outcome::Form { error } => index(error.as_deref()),
    }
}
