//! Static career knowledge table types.
//!
//! The table is grouped by category and serialized into the system
//! instruction. Serialization is deterministic: categories keep their
//! declaration order and record fields keep struct order.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One career path the counselor can ground recommendations in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRecord {
    pub role: String,
    pub keywords: Vec<String>,
    pub exams: String,
    pub degrees: String,
    pub colleges: String,
    /// Salary band, in LPA (Lakhs Per Annum).
    pub salary: String,
    pub description: String,
}

impl CareerRecord {
    /// Case-insensitive match against the role name and keywords.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.role.to_lowercase().contains(&query)
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(&query))
    }
}

/// A named group of career records (e.g. "Technology").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CareerCategory {
    pub name: String,
    pub careers: Vec<CareerRecord>,
}

/// The whole career table.
///
/// Serializes as a JSON object keyed by category name, in category order:
/// `{"Technology": [...], "Medical": [...], ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CareerDatabase {
    pub categories: Vec<CareerCategory>,
}

impl CareerDatabase {
    /// Total number of career records across all categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.careers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All `(category, record)` pairs whose role or keywords match `query`.
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = (&'a str, &'a CareerRecord)> + 'a {
        self.categories.iter().flat_map(move |category| {
            category
                .careers
                .iter()
                .filter(move |record| record.matches(query))
                .map(move |record| (category.name.as_str(), record))
        })
    }
}

impl Serialize for CareerDatabase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.careers)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(role: &str, keywords: &[&str]) -> CareerRecord {
        CareerRecord {
            role: role.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            exams: "EXAM".to_string(),
            degrees: "DEG".to_string(),
            colleges: "COL".to_string(),
            salary: "1-2 LPA".to_string(),
            description: "desc".to_string(),
        }
    }

    fn sample() -> CareerDatabase {
        CareerDatabase {
            categories: vec![
                CareerCategory {
                    name: "Zeta".to_string(),
                    careers: vec![record("Pilot", &["flying"])],
                },
                CareerCategory {
                    name: "Alpha".to_string(),
                    careers: vec![record("Chef", &["cooking", "food"])],
                },
            ],
        }
    }

    #[test]
    fn test_serialization_keeps_category_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        let zeta = json.find("\"Zeta\"").unwrap();
        let alpha = json.find("\"Alpha\"").unwrap();
        assert!(zeta < alpha, "categories must not be sorted: {json}");
    }

    #[test]
    fn test_serialization_keeps_field_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        let role = json.find("\"role\"").unwrap();
        let salary = json.find("\"salary\"").unwrap();
        let description = json.find("\"description\"").unwrap();
        assert!(role < salary && salary < description);
    }

    #[test]
    fn test_len_counts_all_records() {
        assert_eq!(sample().len(), 2);
        assert!(CareerDatabase::default().is_empty());
    }

    #[test]
    fn test_matches_role_and_keywords() {
        let chef = record("Chef", &["cooking", "food"]);
        assert!(chef.matches("chef"));
        assert!(chef.matches("FOOD"));
        assert!(chef.matches(""));
        assert!(!chef.matches("law"));
    }

    #[test]
    fn test_search_reports_category() {
        let db = sample();
        let hits: Vec<_> = db.search("cook").collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "Alpha");
        assert_eq!(hits[0].1.role, "Chef");
    }
}
