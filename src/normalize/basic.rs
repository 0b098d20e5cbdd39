//! Rule-based normalizer for US-style street addresses.
//!
//! Good enough to make the gateway useful without a native address library:
//! lowercases, strips punctuation, expands the usual abbreviations and picks
//! out house number, road, city, state and postcode.

use super::{AddressNormalizer, ParsedComponent};

/// Upper bound on variants produced by one expansion.
pub const MAX_EXPANSIONS: usize = 16;

/// Abbreviation → expansions. Ambiguous abbreviations list every reading.
const ABBREVIATIONS: &[(&str, &[&str])] = &[
    ("ave", &["avenue"]),
    ("av", &["avenue"]),
    ("blvd", &["boulevard"]),
    ("cir", &["circle"]),
    ("ct", &["court"]),
    ("dr", &["drive", "doctor"]),
    ("hwy", &["highway"]),
    ("ln", &["lane"]),
    ("pkwy", &["parkway"]),
    ("pl", &["place"]),
    ("rd", &["road"]),
    ("sq", &["square"]),
    ("st", &["street", "saint"]),
    ("ter", &["terrace"]),
    ("trl", &["trail"]),
    ("n", &["north"]),
    ("s", &["south"]),
    ("e", &["east"]),
    ("w", &["west"]),
    ("ne", &["northeast"]),
    ("nw", &["northwest"]),
    ("se", &["southeast"]),
    ("sw", &["southwest"]),
    ("apt", &["apartment"]),
    ("ste", &["suite"]),
    ("bldg", &["building"]),
];

/// Tokens that end a road name.
const STREET_SUFFIXES: &[&str] = &[
    "alley", "ave", "av", "avenue", "blvd", "boulevard", "cir", "circle", "court", "ct", "dr",
    "drive", "highway", "hwy", "lane", "ln", "parkway", "pkwy", "pl", "place", "rd", "road",
    "sq", "square", "st", "street", "ter", "terrace", "trail", "trl", "way",
];

const DIRECTIONALS: &[&str] = &[
    "n", "s", "e", "w", "ne", "nw", "se", "sw", "north", "south", "east", "west",
];

const US_STATES: &[(&str, &str)] = &[
    ("al", "alabama"),
    ("ak", "alaska"),
    ("az", "arizona"),
    ("ar", "arkansas"),
    ("ca", "california"),
    ("co", "colorado"),
    ("ct", "connecticut"),
    ("de", "delaware"),
    ("dc", "district of columbia"),
    ("fl", "florida"),
    ("ga", "georgia"),
    ("hi", "hawaii"),
    ("id", "idaho"),
    ("il", "illinois"),
    ("in", "indiana"),
    ("ia", "iowa"),
    ("ks", "kansas"),
    ("ky", "kentucky"),
    ("la", "louisiana"),
    ("me", "maine"),
    ("md", "maryland"),
    ("ma", "massachusetts"),
    ("mi", "michigan"),
    ("mn", "minnesota"),
    ("ms", "mississippi"),
    ("mo", "missouri"),
    ("mt", "montana"),
    ("ne", "nebraska"),
    ("nv", "nevada"),
    ("nh", "new hampshire"),
    ("nj", "new jersey"),
    ("nm", "new mexico"),
    ("ny", "new york"),
    ("nc", "north carolina"),
    ("nd", "north dakota"),
    ("oh", "ohio"),
    ("ok", "oklahoma"),
    ("or", "oregon"),
    ("pa", "pennsylvania"),
    ("ri", "rhode island"),
    ("sc", "south carolina"),
    ("sd", "south dakota"),
    ("tn", "tennessee"),
    ("tx", "texas"),
    ("ut", "utah"),
    ("vt", "vermont"),
    ("va", "virginia"),
    ("wa", "washington"),
    ("wv", "west virginia"),
    ("wi", "wisconsin"),
    ("wy", "wyoming"),
];

/// Built-in [`AddressNormalizer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicNormalizer;

impl BasicNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl AddressNormalizer for BasicNormalizer {
    fn expand_address(&self, query: &str) -> Vec<String> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let last = tokens.len() - 1;
        let mut variants = vec![String::new()];
        for (i, token) in tokens.iter().enumerate() {
            let choices = expansions_for(token, i == last || i + 1 == last);
            let mut next = Vec::with_capacity(variants.len() * choices.len());
            'outer: for prefix in &variants {
                for choice in &choices {
                    if next.len() == MAX_EXPANSIONS {
                        break 'outer;
                    }
                    let mut variant = prefix.clone();
                    if !variant.is_empty() {
                        variant.push(' ');
                    }
                    variant.push_str(choice);
                    next.push(variant);
                }
            }
            variants = next;
        }

        let mut seen = std::collections::HashSet::new();
        variants.retain(|v| seen.insert(v.clone()));
        variants
    }

    fn parse_address(&self, query: &str) -> Vec<ParsedComponent> {
        let tokens = tokenize(query);
        let mut rest: &[String] = &tokens;
        let mut components = Vec::new();

        let house_number = match rest.first() {
            Some(first) if first.starts_with(|c: char| c.is_ascii_digit()) => {
                rest = &rest[1..];
                Some(first.clone())
            }
            _ => None,
        };

        let postcode = match rest.last() {
            Some(last) if is_postcode(last) => {
                rest = &rest[..rest.len() - 1];
                Some(last.clone())
            }
            _ => None,
        };

        let state = match rest.last() {
            Some(last) if rest.len() > 1 && state_name(last).is_some() => {
                rest = &rest[..rest.len() - 1];
                Some(last.clone())
            }
            _ => None,
        };

        let road_end = rest
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, token)| STREET_SUFFIXES.contains(&token.as_str()))
            .map(|(i, _)| match rest.get(i + 1) {
                Some(next) if DIRECTIONALS.contains(&next.as_str()) => i + 2,
                _ => i + 1,
            });

        let (road, city) = match road_end {
            Some(end) => (&rest[..end], &rest[end..]),
            None if house_number.is_some() => (rest, &rest[rest.len()..]),
            None => (&rest[..0], rest),
        };

        if let Some(number) = house_number {
            components.push(ParsedComponent::new("house_number", number));
        }
        if !road.is_empty() {
            components.push(ParsedComponent::new("road", road.join(" ")));
        }
        if !city.is_empty() {
            components.push(ParsedComponent::new("city", city.join(" ")));
        }
        if let Some(state) = state {
            components.push(ParsedComponent::new("state", state));
        }
        if let Some(postcode) = postcode {
            components.push(ParsedComponent::new("postcode", postcode));
        }

        components
    }
}

/// Lowercase and split on anything that is not part of a word or number.
fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '/'))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Possible readings of `token`. State codes are only expanded near the end
/// of the address, where they actually appear.
fn expansions_for(token: &str, near_end: bool) -> Vec<&str> {
    if near_end {
        if let Some(name) = state_name(token) {
            return vec![name];
        }
    }
    ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == token)
        .map(|(_, expansions)| expansions.to_vec())
        .unwrap_or_else(|| vec![token])
}

fn state_name(code: &str) -> Option<&'static str> {
    US_STATES
        .iter()
        .find(|(abbr, _)| *abbr == code)
        .map(|(_, name)| *name)
}

/// `12345` or `12345-6789`.
fn is_postcode(token: &str) -> bool {
    let (zip, plus4) = match token.split_once('-') {
        Some((zip, plus4)) => (zip, Some(plus4)),
        None => (token, None),
    };
    let digits = |s: &str, n: usize| s.len() == n && s.bytes().all(|b| b.is_ascii_digit());
    digits(zip, 5) && plus4.map_or(true, |p| digits(p, 4))
}
