//! Разбор свободного текста запроса в структурированные фильтры.
//!
//! Грамматика намеренно снисходительная: каждый фильтр ищется независимо,
//! нераспознанные куски текста молча игнорируются.

use once_cell::sync::Lazy;
use regex::Regex;

// Regex patterns for the query grammar
static BHK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*bhk").expect("Invalid regex"));

static BUDGET_CEILING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:under|below|upto|up to|<)\s*₹?\s*(\d+(?:\.\d+)?)\s*(crores?|cr|lakhs?|lacs?|l)?\b")
        .expect("Invalid regex")
});

static BUDGET_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)between\s*₹?\s*(\d+(?:\.\d+)?)\s*(crores?|cr|lakhs?|lacs?|l)?\s*(?:and|to|-)\s*₹?\s*(\d+(?:\.\d+)?)\s*(crores?|cr|lakhs?|lacs?|l)?",
    )
    .expect("Invalid regex")
});

static BUDGET_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)₹?\s*(\d+(?:\.\d+)?)\s*(crores?|cr|lakhs?|lacs?|l)\b").expect("Invalid regex")
});

static CITY_AFTER_IN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bin\s+([a-zA-Z][a-zA-Z-]*)").expect("Invalid regex"));

static LOCALITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:in|near|around|at)\s+(.+)").expect("Invalid regex"));

/// Ценовой фильтр в рупиях.
#[derive(Debug, Clone, PartialEq)]
pub enum Budget {
    /// "under 1.2 cr" или голая сумма
    Max(f64),
    /// "between 80 lakh and 1.2 cr"
    Range { min: f64, max: f64 },
}

/// Статус готовности объекта.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Possession {
    Ready,
    UnderConstruction,
}

impl Possession {
    /// Подстрока для сравнения со статусом строки каталога.
    pub fn needle(self) -> &'static str {
        match self {
            Possession::Ready => "ready",
            Possession::UnderConstruction => "under construction",
        }
    }
}

/// Всё, что удалось распознать в запросе пользователя.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFilters {
    pub city: Option<String>,
    pub bhk: Option<u32>,
    pub budget: Option<Budget>,
    pub possession: Option<Possession>,
    pub locality: Option<String>,
    pub project_name: Option<String>,
}

impl QueryFilters {
    pub fn extract(query: &str, known_cities: &[String], known_projects: &[String]) -> Self {
        let city = parse_city(query, known_cities);
        let mut locality = parse_locality(query, known_cities);

        // "in Pune" — упоминание города, а не локации внутри него
        if let (Some(city), Some(loc)) = (&city, &locality) {
            if loc.eq_ignore_ascii_case(city) {
                locality = None;
            }
        }

        Self {
            city,
            bhk: parse_bhk(query),
            budget: parse_budget(query),
            possession: parse_possession(query),
            locality,
            project_name: parse_project_name(query, known_projects),
        }
    }

    /// Ни один фильтр не распознан.
    pub fn is_empty(&self) -> bool {
        self.city.is_none()
            && self.bhk.is_none()
            && self.budget.is_none()
            && self.possession.is_none()
            && self.locality.is_none()
            && self.project_name.is_none()
    }
}

pub fn parse_bhk(text: &str) -> Option<u32> {
    BHK_RE
        .captures(text)
        .and_then(|c| c[1].parse::<u32>().ok())
}

pub fn parse_budget(text: &str) -> Option<Budget> {
    if let Some(c) = BUDGET_CEILING_RE.captures(text) {
        let value: f64 = c[1].parse().ok()?;
        return Some(Budget::Max(to_rupees(value, c.get(2).map(|m| m.as_str()))));
    }
    if let Some(c) = BUDGET_RANGE_RE.captures(text) {
        let min: f64 = c[1].parse().ok()?;
        let max: f64 = c[3].parse().ok()?;
        return Some(Budget::Range {
            min: to_rupees(min, c.get(2).map(|m| m.as_str())),
            max: to_rupees(max, c.get(4).map(|m| m.as_str())),
        });
    }
    // Голая сумма распознаётся только вместе с единицей,
    // иначе "3bhk" превратился бы в бюджет в три рупии
    if let Some(c) = BUDGET_AMOUNT_RE.captures(text) {
        let value: f64 = c[1].parse().ok()?;
        return Some(Budget::Max(to_rupees(value, c.get(2).map(|m| m.as_str()))));
    }
    None
}

/// cr → 1e7, lakh/lac/l → 1e5, без единицы — уже рупии.
fn to_rupees(value: f64, unit: Option<&str>) -> f64 {
    match unit {
        Some(u) if u.to_lowercase().starts_with("cr") => value * 1e7,
        Some(u) if u.to_lowercase().starts_with('l') => value * 1e5,
        _ => value,
    }
}

/// Сначала известные города каталога, потом слово после "in".
pub fn parse_city(text: &str, known_cities: &[String]) -> Option<String> {
    let lower = text.to_lowercase();
    for city in known_cities {
        if !city.is_empty() && lower.contains(&city.to_lowercase()) {
            return Some(city.clone());
        }
    }
    CITY_AFTER_IN_RE
        .captures(text)
        .map(|c| capitalize(&c[1]))
}

pub fn parse_possession(text: &str) -> Option<Possession> {
    let t = text.to_lowercase();
    if t.contains("ready to move") || t.contains("ready-to-move") || t.contains("ready") {
        Some(Possession::Ready)
    } else if t.contains("under construction") {
        Some(Possession::UnderConstruction)
    } else {
        None
    }
}

/// До трёх слов после in/near/around/at; служебные слова обрывают фразу.
pub fn parse_locality(text: &str, known_cities: &[String]) -> Option<String> {
    const STOP_WORDS: &[&str] = &[
        "under", "below", "between", "upto", "up", "with", "for", "and", "near", "in", "at",
        "around", "to",
    ];

    let captures = LOCALITY_RE.captures(text)?;
    let mut words = Vec::new();
    for word in captures[1].split_whitespace().take(3) {
        let lower = word.to_lowercase();
        if STOP_WORDS.contains(&lower.as_str()) {
            break;
        }
        if !word.chars().all(|ch| ch.is_alphabetic() || ch == '-') {
            break;
        }
        words.push(word);
    }
    if words.is_empty() {
        return None;
    }

    let locality = words.join(" ");
    if known_cities
        .iter()
        .any(|city| city.eq_ignore_ascii_case(&locality))
    {
        return None;
    }
    Some(locality)
}

/// Первое известное название проекта, встретившееся в тексте.
pub fn parse_project_name(text: &str, known_projects: &[String]) -> Option<String> {
    let lower = text.to_lowercase();
    known_projects
        .iter()
        .find(|name| !name.is_empty() && lower.contains(&name.to_lowercase()))
        .cloned()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> Vec<String> {
        vec!["Pune".to_string(), "Mumbai".to_string()]
    }

    fn projects() -> Vec<String> {
        vec!["Skyline Heights".to_string(), "Lake View".to_string()]
    }

    #[test]
    fn extracts_bhk_with_and_without_space() {
        assert_eq!(parse_bhk("3BHK flat"), Some(3));
        assert_eq!(parse_bhk("2 bhk please"), Some(2));
        assert_eq!(parse_bhk("a nice flat"), None);
    }

    #[test]
    fn budget_under_crore() {
        assert_eq!(
            parse_budget("3BHK flat in Pune under ₹1.2 Cr"),
            Some(Budget::Max(12_000_000.0))
        );
    }

    #[test]
    fn budget_under_lakh_variants() {
        assert_eq!(parse_budget("under 90l"), Some(Budget::Max(9_000_000.0)));
        assert_eq!(
            parse_budget("below 85 lakh"),
            Some(Budget::Max(8_500_000.0))
        );
        assert_eq!(parse_budget("upto 80 lacs"), Some(Budget::Max(8_000_000.0)));
    }

    #[test]
    fn budget_between_range() {
        assert_eq!(
            parse_budget("2 bhk between 80 lakh and 1.2 cr"),
            Some(Budget::Range {
                min: 8_000_000.0,
                max: 12_000_000.0
            })
        );
    }

    #[test]
    fn bare_amount_needs_a_unit() {
        assert_eq!(parse_budget("1.5 cr in mumbai"), Some(Budget::Max(15_000_000.0)));
        // цифра из "3bhk" не должна стать бюджетом
        assert_eq!(parse_budget("3bhk in pune"), None);
    }

    #[test]
    fn unit_letter_l_does_not_swallow_words() {
        // "l" из "luxury" — не единица измерения
        assert_eq!(parse_budget("5 luxury flats"), None);
    }

    #[test]
    fn city_from_catalog_before_fallback() {
        assert_eq!(parse_city("2bhk in pune", &cities()), Some("Pune".into()));
        assert_eq!(
            parse_city("flats in nagpur", &cities()),
            Some("Nagpur".into())
        );
        assert_eq!(parse_city("just flats", &cities()), None);
    }

    #[test]
    fn possession_keywords() {
        assert_eq!(parse_possession("ready to move 3bhk"), Some(Possession::Ready));
        assert_eq!(
            parse_possession("under construction projects"),
            Some(Possession::UnderConstruction)
        );
        assert_eq!(parse_possession("3bhk in pune"), None);
    }

    #[test]
    fn locality_stops_at_keywords_and_digits() {
        assert_eq!(
            parse_locality("flats near Baner under 90l", &cities()),
            Some("Baner".into())
        );
        assert_eq!(
            parse_locality("near Hinjewadi Phase 2", &cities()),
            Some("Hinjewadi Phase".into())
        );
    }

    #[test]
    fn city_mention_is_not_a_locality() {
        let filters = QueryFilters::extract("3BHK in Pune under 1.2 cr", &cities(), &projects());
        assert_eq!(filters.city.as_deref(), Some("Pune"));
        assert_eq!(filters.locality, None);
    }

    #[test]
    fn known_project_title_is_recognized() {
        assert_eq!(
            parse_project_name("price of skyline heights", &projects()),
            Some("Skyline Heights".into())
        );
        assert_eq!(parse_project_name("2bhk in pune", &projects()), None);
    }

    #[test]
    fn full_query_extraction() {
        let filters =
            QueryFilters::extract("3BHK flat in Pune under ₹1.2 Cr", &cities(), &projects());
        assert_eq!(filters.city.as_deref(), Some("Pune"));
        assert_eq!(filters.bhk, Some(3));
        assert_eq!(filters.budget, Some(Budget::Max(12_000_000.0)));
        assert_eq!(filters.possession, None);
        assert_eq!(filters.project_name, None);
    }

    #[test]
    fn unrecognized_query_is_empty() {
        assert!(QueryFilters::extract("hello there", &cities(), &projects()).is_empty());
        assert!(!QueryFilters::extract("2bhk", &cities(), &projects()).is_empty());
        assert!(!QueryFilters::extract("tell me about Lake View", &cities(), &projects())
            .is_empty());
    }
}
