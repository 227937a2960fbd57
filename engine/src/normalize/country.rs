// Maps free-text launch locations to a country name.

/// Launch sites and sea areas whose trailing location segment is not a
/// country name, mapped to the country operating them.
const SITE_ALIASES: &[(&str, &str)] = &[
    ("Russia", "Russian Federation"),
    ("Shahrud Missile Test Site", "Iran"),
    ("Pacific Missile Range Facility", "USA"),
    ("Barents Sea", "Russian Federation"),
    ("Yellow Sea", "China"),
    ("New Mexico", "USA"),
    ("Gran Canaria", "USA"),
];

/// Soviet-era launch countries folded together for the USA vs USSR views.
/// Only those views apply it; everywhere else countries keep their names.
const COLD_WAR_ALIASES: &[(&str, &str)] = &[
    ("Kazakhstan", "Russia"),
    ("Russian Federation", "Russia"),
];

/// Returns the country for a location such as
/// `"LC-39A, Kennedy Space Center, Florida, USA"`: the last comma-separated
/// segment, trimmed, passed through `SITE_ALIASES` (exact, case-sensitive).
pub fn normalize_country(location: &str) -> String {
    let segment = location.rsplit(',').next().unwrap_or(location).trim();
    lookup(SITE_ALIASES, segment).unwrap_or(segment).to_string()
}

/// Cold-War grouping of an already normalized country.
pub fn cold_war_country(country: &str) -> &str {
    lookup(COLD_WAR_ALIASES, country).unwrap_or(country)
}

fn lookup<'a>(table: &'a [(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
}
