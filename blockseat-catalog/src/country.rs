use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One row of the country reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub iso2: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub airports: Vec<String>,
}

/// A route's airports split by country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountryGrouping {
    pub by_country: BTreeMap<String, Vec<String>>,
    pub unknown: Vec<String>,
}

/// Lookup over the country reference table: airport code to country, and
/// free-text country names (including aliases) to their ISO code.
#[derive(Debug, Clone, Default)]
pub struct CountryDirectory {
    entries: Vec<CountryEntry>,
    by_airport: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl CountryDirectory {
    pub fn new(entries: Vec<CountryEntry>) -> Self {
        let mut by_airport = HashMap::new();
        let mut by_name = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            for airport in &entry.airports {
                by_airport.insert(airport.trim().to_uppercase(), index);
            }
            let names = std::iter::once(&entry.name)
                .chain(std::iter::once(&entry.iso2))
                .chain(entry.aliases.iter());
            for name in names {
                by_name.insert(name.trim().to_lowercase(), index);
            }
        }

        Self {
            entries,
            by_airport,
            by_name,
        }
    }

    pub fn entries(&self) -> &[CountryEntry] {
        &self.entries
    }

    pub fn by_airport(&self, code: &str) -> Option<&CountryEntry> {
        self.by_airport
            .get(&code.trim().to_uppercase())
            .and_then(|index| self.entries.get(*index))
    }

    /// Case-insensitive match on name, ISO code or alias.
    pub fn find(&self, name_or_code: &str) -> Option<&CountryEntry> {
        self.by_name
            .get(&name_or_code.trim().to_lowercase())
            .and_then(|index| self.entries.get(*index))
    }

    /// Group airport codes by country ISO code. Codes missing from the table
    /// land in `unknown`.
    pub fn group_airports(&self, airports: &[String]) -> CountryGrouping {
        let mut grouping = CountryGrouping::default();
        for airport in airports {
            let code = airport.trim().to_uppercase();
            match self.by_airport(&code) {
                Some(country) => grouping.by_country.entry(country.iso2.clone()).or_default().push(code),
                None => grouping.unknown.push(code),
            }
        }
        grouping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> CountryDirectory {
        CountryDirectory::new(vec![
            CountryEntry {
                iso2: "AE".to_string(),
                name: "United Arab Emirates".to_string(),
                aliases: vec!["UAE".to_string(), "Emirates".to_string()],
                airports: vec!["DXB".to_string(), "SHJ".to_string(), "AUH".to_string()],
            },
            CountryEntry {
                iso2: "GB".to_string(),
                name: "United Kingdom".to_string(),
                aliases: vec!["UK".to_string(), "Great Britain".to_string()],
                airports: vec!["LHR".to_string(), "LGW".to_string()],
            },
        ])
    }

    #[test]
    fn test_lookup_by_airport_and_name() {
        let dir = directory();
        assert_eq!(dir.by_airport("shj").map(|c| c.iso2.as_str()), Some("AE"));
        assert_eq!(dir.find("uk").map(|c| c.iso2.as_str()), Some("GB"));
        assert_eq!(dir.find(" united arab emirates ").map(|c| c.iso2.as_str()), Some("AE"));
        assert_eq!(dir.find("gb").map(|c| c.name.as_str()), Some("United Kingdom"));
        assert!(dir.find("Atlantis").is_none());
    }

    #[test]
    fn test_group_airports_reports_unknown() {
        let dir = directory();
        let airports = vec!["DXB".to_string(), "lhr".to_string(), "SHJ".to_string(), "JFK".to_string()];
        let grouping = dir.group_airports(&airports);
        assert_eq!(grouping.by_country["AE"], vec!["DXB", "SHJ"]);
        assert_eq!(grouping.by_country["GB"], vec!["LHR"]);
        assert_eq!(grouping.unknown, vec!["JFK"]);
    }
}
