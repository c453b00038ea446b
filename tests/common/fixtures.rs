use pdki_scraper::config::FilterSettings;
use pdki_scraper::models::BrandRecord;
use std::path::PathBuf;

pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn load_fixture(relative: &str) -> String {
    std::fs::read_to_string(fixture_path(relative))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", relative))
}

pub fn filters() -> FilterSettings {
    FilterSettings {
        year: "2024".to_string(),
        status: "Didaftar".to_string(),
    }
}

pub fn record(brand: &str, application_number: &str, codes: &[&str], description: &str) -> BrandRecord {
    BrandRecord {
        brand: brand.to_string(),
        owner: format!("PT {}", brand),
        application_number: application_number.to_string(),
        application_year: "2024".to_string(),
        status: "Didaftar".to_string(),
        class_codes: codes.iter().map(|c| c.to_string()).collect(),
        class_description: description.to_string(),
    }
}
