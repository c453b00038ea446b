use serde::{Deserialize, Serialize};

/// Placeholder for fields that could not be read from the page
pub const NOT_AVAILABLE: &str = "N/A";

/// One brand registration entry scraped from a results card
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BrandRecord {
    pub brand: String,
    pub owner: String,
    /// Detail-page search key; empty when the card had none
    pub application_number: String,
    pub application_year: String,
    pub status: String,
    pub class_codes: Vec<String>,
    pub class_description: String,
}

impl BrandRecord {
    pub fn is_multi_class(&self) -> bool {
        self.class_codes.len() > 1
    }

    /// Row for a record that is not (or could not be) enriched.
    ///
    /// Codes are flattened to one scalar: the single code, "" when there is none,
    /// or every code joined with ", ".
    pub fn into_flat_row(self) -> ClassRow {
        let class_code = self.class_codes.join(", ");
        ClassRow {
            brand: self.brand,
            owner: self.owner,
            application_number: self.application_number,
            application_year: self.application_year,
            status: self.status,
            class_code,
            class_description: self.class_description,
        }
    }

    /// Row carrying one code/description pair of this record
    pub fn class_row(&self, class_code: &str, class_description: &str) -> ClassRow {
        ClassRow {
            brand: self.brand.clone(),
            owner: self.owner.clone(),
            application_number: self.application_number.clone(),
            application_year: self.application_year.clone(),
            status: self.status.clone(),
            class_code: class_code.to_string(),
            class_description: class_description.to_string(),
        }
    }
}

/// Terminal output row: one class code per row
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClassRow {
    pub brand: String,
    pub owner: String,
    pub application_number: String,
    pub application_year: String,
    pub status: String,
    pub class_code: String,
    pub class_description: String,
}
