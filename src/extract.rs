//! Parsing of results-page and detail-page snapshots

use crate::config::FilterSettings;
use crate::error::{Result, ScrapeError};
use crate::models::{BrandRecord, NOT_AVAILABLE};
use scraper::{ElementRef, Html, Selector};

const CARD: &str = r#"div[class="flex flex-col border-b pb-4 border-y-50"]"#;
const BRAND: &str = r#"h1[class="text-md md:text-lg cursor-pointer"]"#;
const OWNER: &str = r#"div[class="flex gap-1 text-sm"]"#;
const APPLICATION_NUMBER: &str = r#"p[class="text-gray-400 font-medium text-sm"]"#;
const SMALL_TEXT: &str = "p.text-sm";
const DESCRIPTION: &str =
    r#"p[class="text-gray-400 font-medium text-sm line-clamp-1 text-ellipsis w-full"]"#;

/// List numbering glued onto the owner name by the results UI
pub const OWNER_PREFIX: &str = "Nama Pemilik:1.";
pub const CLASS_CODE_LABEL: &str = "Kode kelas:";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

/// Text of an element with every text node trimmed, then concatenated
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Class codes carried by a small text field, if the field is a class-code list.
///
/// The field must carry the `Kode kelas:` label. What follows is split on commas
/// and every token must be empty or one or two ASCII digits. Accepted fields
/// yield their non-empty tokens in order; a label with no codes is not a match.
pub fn parse_class_codes(text: &str) -> Option<Vec<String>> {
    let (_, list) = text.split_once(CLASS_CODE_LABEL)?;
    let tokens: Vec<&str> = list.split(',').map(str::trim).collect();

    let valid = tokens
        .iter()
        .all(|t| t.is_empty() || (t.len() <= 2 && t.chars().all(|c| c.is_ascii_digit())));
    if !valid {
        return None;
    }

    let codes: Vec<String> = tokens
        .into_iter()
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    (!codes.is_empty()).then_some(codes)
}

/// Strip the owner list artifact
pub fn normalize_owner(text: &str) -> String {
    text.replace(OWNER_PREFIX, "").trim().to_string()
}

struct CardSelectors {
    brand: Selector,
    owner: Selector,
    application_number: Selector,
    small_text: Selector,
    description: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            brand: selector(BRAND)?,
            owner: selector(OWNER)?,
            application_number: selector(APPLICATION_NUMBER)?,
            small_text: selector(SMALL_TEXT)?,
            description: selector(DESCRIPTION)?,
        })
    }

    fn first_text(&self, card: ElementRef<'_>, sel: &Selector) -> Option<String> {
        card.select(sel).next().map(stripped_text)
    }

    fn parse_card(&self, card: ElementRef<'_>, filters: &FilterSettings) -> BrandRecord {
        let brand = self
            .first_text(card, &self.brand)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let owner = self
            .first_text(card, &self.owner)
            .map(|t| normalize_owner(&t))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let application_number = self
            .first_text(card, &self.application_number)
            .unwrap_or_default();

        // First well-formed field wins
        let class_codes = card
            .select(&self.small_text)
            .find_map(|p| parse_class_codes(&stripped_text(p)))
            .unwrap_or_default();

        let class_description = self
            .first_text(card, &self.description)
            .unwrap_or_default();

        BrandRecord {
            brand,
            owner,
            application_number,
            application_year: filters.year.clone(),
            status: filters.status.clone(),
            class_codes,
            class_description,
        }
    }
}

/// Records for every result card on one results page, in document order
pub fn parse_results_page(html: &str, filters: &FilterSettings) -> Result<Vec<BrandRecord>> {
    let document = Html::parse_document(html);
    let card_selector = selector(CARD)?;
    let selectors = CardSelectors::new()?;

    Ok(document
        .select(&card_selector)
        .map(|card| selectors.parse_card(card, filters))
        .collect())
}

/// Second-cell text of every table body row with at least two cells
pub fn parse_detail_descriptions(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let row_selector = selector("tbody tr")?;
    let cell_selector = selector("td")?;

    Ok(document
        .select(&row_selector)
        .filter_map(|row| row.select(&cell_selector).nth(1))
        .map(stripped_text)
        .collect())
}
