use std::{collections::HashMap, path::Path};

use crate::{
    errors::{Error, Result},
    types::ResolvedMarket,
};

const BUNDLED_COUNTRIES: &str = include_str!("../../data/countries.csv");

/// One row of the country dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Country {
    pub fn to_market(&self) -> ResolvedMarket {
        ResolvedMarket {
            code: self.code.clone(),
            name: self.name.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// In-memory country table keyed by upper-case ISO 3166-1 alpha-2 code.
///
/// The source format is CSV with the header `country,latitude,longitude,name`.
/// The name is the last column and may itself contain commas.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    rows: HashMap<String, Country>,
}

impl CountryTable {
    /// The dataset compiled into the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled file is malformed, which the test suite
    /// guards against.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_COUNTRIES)
    }

    /// Loads a dataset from disk in the same format as the bundled one.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = async_fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut rows = HashMap::new();

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || (idx == 0 && line.starts_with("country,")) {
                continue;
            }

            let country = parse_row(line)
                .ok_or_else(|| Error::Dataset(format!("line {}: malformed row `{}`", idx + 1, line)))?;
            rows.insert(country.code.clone(), country);
        }

        if rows.is_empty() {
            return Err(Error::Dataset("no countries in dataset".to_string()));
        }

        Ok(Self { rows })
    }

    pub fn get(&self, code: &str) -> Option<&Country> {
        self.rows.get(&code.trim().to_ascii_uppercase())
    }

    /// English display name for a market code.
    pub fn name(&self, code: &str) -> Option<&str> {
        self.get(code).map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Joins market codes against the table, keeping input order.
    ///
    /// Codes without a row are dropped.
    pub fn resolve(&self, codes: &[String]) -> Vec<ResolvedMarket> {
        codes
            .iter()
            .filter_map(|code| self.get(code).map(Country::to_market))
            .collect()
    }
}

fn parse_row(line: &str) -> Option<Country> {
    let mut fields = line.splitn(4, ',');
    let code = fields.next()?.trim();
    let latitude = fields.next()?.trim().parse::<f64>().ok()?;
    let longitude = fields.next()?.trim().parse::<f64>().ok()?;
    let name = fields.next()?.trim().trim_matches('"').trim();

    if code.len() != 2 || name.is_empty() {
        return None;
    }

    Some(Country {
        code: code.to_ascii_uppercase(),
        name: name.to_string(),
        latitude,
        longitude,
    })
}
