use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{DatasetError, Result};
use crate::config::DatasetConfig;

/// One labeled complaint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub text: String,
    pub category: String,
}

/// Labeled training corpus
#[derive(Debug, Clone)]
pub struct Dataset {
    examples: Vec<LabeledExample>,
    /// SHA-256 of the source bytes
    hash: String,
}

impl Dataset {
    /// Parse a CSV with a header row.
    ///
    /// Columns are located by name; every cell is read as a string and a
    /// short row yields empty strings for its missing cells.
    ///
    /// A missing cell is `""`, not the literal `"nan"` a pandas
    /// `read_csv(...).astype(str)` loader would produce, so blank text trains
    /// as an empty document and a blank label is its own `""` class.
    pub fn from_csv(content: &[u8], columns: &DatasetConfig) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content);

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };
        let text_index = column(&columns.text_column)?;
        let label_index = column(&columns.label_column)?;

        let mut examples = Vec::new();
        for record in reader.records() {
            let record = record?;
            examples.push(LabeledExample {
                text: record.get(text_index).unwrap_or("").to_string(),
                category: record.get(label_index).unwrap_or("").to_string(),
            });
        }

        if examples.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self {
            examples,
            hash: sha256::digest(content),
        })
    }

    /// Build from in-memory examples; the hash covers texts and labels
    pub fn from_examples(examples: Vec<LabeledExample>) -> Result<Self> {
        if examples.is_empty() {
            return Err(DatasetError::Empty);
        }
        let mut digest_input = String::new();
        for example in &examples {
            digest_input.push_str(&example.text);
            digest_input.push('\u{1f}');
            digest_input.push_str(&example.category);
            digest_input.push('\u{1e}');
        }
        Ok(Self {
            hash: sha256::digest(digest_input),
            examples,
        })
    }

    pub fn examples(&self) -> &[LabeledExample] {
        &self.examples
    }

    pub fn texts(&self) -> Vec<&str> {
        self.examples.iter().map(|e| e.text.as_str()).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.examples.iter().map(|e| e.category.as_str()).collect()
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Number of examples per category
    pub fn class_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for example in &self.examples {
            *counts.entry(example.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Shuffle with a fixed seed and split into `(train, test)`.
    ///
    /// The test side gets `ceil(len * test_ratio)` examples.
    pub fn split(&self, test_ratio: f64, seed: u64) -> Result<(Dataset, Dataset)> {
        if !(test_ratio > 0.0 && test_ratio < 1.0) {
            return Err(DatasetError::InvalidSplit(format!(
                "test ratio must be between 0 and 1, got {}",
                test_ratio
            )));
        }

        let test_len = (self.len() as f64 * test_ratio).ceil() as usize;
        if test_len >= self.len() {
            return Err(DatasetError::InvalidSplit(format!(
                "{} examples are too few to hold out {} for testing",
                self.len(),
                test_len
            )));
        }

        let mut shuffled = self.examples.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        shuffled.shuffle(&mut rng);

        let train = shuffled.split_off(test_len);
        Ok((Dataset::from_examples(train)?, Dataset::from_examples(shuffled)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "id,text,category\n\
        1,Water pipe burst,Water\n\
        2,\"Power cut, whole street\",Electricity\n\
        3,Garbage not collected,Sanitation\n\
        4,No water since morning,Water\n";

    #[test]
    fn test_from_csv_by_header_name() {
        let dataset = Dataset::from_csv(CSV.as_bytes(), &DatasetConfig::default()).unwrap();

        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.examples()[1].text, "Power cut, whole street");
        assert_eq!(dataset.examples()[1].category, "Electricity");
        assert_eq!(dataset.class_counts()["Water"], 2);
        assert_eq!(dataset.hash(), sha256::digest(CSV.as_bytes()));
    }

    #[test]
    fn test_missing_column() {
        let columns = DatasetConfig {
            label_column: "label".to_string(),
            ..Default::default()
        };
        let result = Dataset::from_csv(CSV.as_bytes(), &columns);
        assert!(matches!(result, Err(DatasetError::MissingColumn(c)) if c == "label"));
    }

    #[test]
    fn test_short_row_yields_empty_cells() {
        let csv = "category,text\nWater,leak\nSanitation\n";
        let dataset = Dataset::from_csv(csv.as_bytes(), &DatasetConfig::default()).unwrap();
        assert_eq!(dataset.examples()[1].text, "");
        assert_eq!(dataset.examples()[1].category, "Sanitation");
    }

    #[test]
    fn test_header_only_is_empty() {
        let result = Dataset::from_csv(b"text,category\n", &DatasetConfig::default());
        assert!(matches!(result, Err(DatasetError::Empty)));
    }

    #[test]
    fn test_split_is_deterministic() {
        let dataset = Dataset::from_csv(CSV.as_bytes(), &DatasetConfig::default()).unwrap();

        let (train_a, test_a) = dataset.split(0.25, 7).unwrap();
        let (train_b, test_b) = dataset.split(0.25, 7).unwrap();

        assert_eq!(train_a.len(), 3);
        assert_eq!(test_a.len(), 1);
        assert_eq!(train_a.examples(), train_b.examples());
        assert_eq!(test_a.examples(), test_b.examples());
    }

    #[test]
    fn test_split_rejects_bad_ratio() {
        let dataset = Dataset::from_csv(CSV.as_bytes(), &DatasetConfig::default()).unwrap();
        assert!(matches!(
            dataset.split(0.0, 1),
            Err(DatasetError::InvalidSplit(_))
        ));
        assert!(matches!(
            dataset.split(0.9, 1),
            Err(DatasetError::InvalidSplit(_))
        ));
    }
}
