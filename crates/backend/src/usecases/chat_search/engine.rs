//! Поиск по каталогу и сборка ответа чата.

use std::cmp::Ordering;
use std::collections::HashSet;

use contracts::chat::{ChatResponse, Listing};

use crate::domain::catalog::{Catalog, CatalogRow};
use crate::shared::format::format_price_rupee;

use super::parser::{Budget, QueryFilters};

/// Не больше пяти карточек в ответе
pub const MAX_RESULTS: usize = 5;

/// Полный цикл: распарсить запрос, отфильтровать каталог, собрать ответ.
pub fn respond(catalog: &Catalog, query: &str) -> ChatResponse {
    let filters = QueryFilters::extract(
        query,
        &catalog.known_cities(),
        &catalog.known_project_names(),
    );

    if filters.is_empty() {
        return ChatResponse {
            message: Some("Please provide a city, BHK or budget in your query.".to_string()),
            results: None,
        };
    }

    let rows = apply_filters(catalog, &filters);
    if rows.is_empty() {
        return ChatResponse {
            message: Some(no_match_message(&filters)),
            results: None,
        };
    }

    let cards: Vec<Listing> = rows
        .iter()
        .take(MAX_RESULTS)
        .map(|row| make_card(row))
        .collect();
    let message = summary_message(&filters, cards.len());

    ChatResponse {
        message: Some(message),
        results: Some(cards),
    }
}

/// Фильтрация + дедупликация по (проект, конфигурация) + сортировка по цене.
pub fn apply_filters<'a>(catalog: &'a Catalog, filters: &QueryFilters) -> Vec<&'a CatalogRow> {
    let mut rows: Vec<&CatalogRow> = catalog
        .rows
        .iter()
        .filter(|row| row_matches(row, filters))
        .collect();

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    rows.retain(|row| seen.insert((row.project_id.as_str(), row.configuration_id.as_str())));

    rows.sort_by(|a, b| {
        // Строки без цены уходят в конец
        let pa = a.price.unwrap_or(f64::INFINITY);
        let pb = b.price.unwrap_or(f64::INFINITY);
        pa.partial_cmp(&pb).unwrap_or(Ordering::Equal)
    });

    rows
}

fn row_matches(row: &CatalogRow, filters: &QueryFilters) -> bool {
    if let Some(city) = &filters.city {
        if !row.city_name.eq_ignore_ascii_case(city) {
            return false;
        }
    }

    if let Some(name) = &filters.project_name {
        if !row
            .project_name
            .to_lowercase()
            .contains(&name.to_lowercase())
        {
            return false;
        }
    }

    if let Some(bhk) = filters.bhk {
        if !row.bhk.contains(&bhk.to_string()) {
            return false;
        }
    }

    if let Some(locality) = &filters.locality {
        let needle = locality.to_lowercase();
        if !row.landmark.to_lowercase().contains(&needle)
            && !row.project_name.to_lowercase().contains(&needle)
        {
            return false;
        }
    }

    if let Some(possession) = filters.possession {
        if !row.status.to_lowercase().contains(possession.needle()) {
            return false;
        }
    }

    if let Some(budget) = &filters.budget {
        // Отсутствующая цена участвует в сравнении как ноль, как в источнике
        let price = row.price.unwrap_or(0.0);
        match budget {
            Budget::Max(max) => {
                if price > *max {
                    return false;
                }
            }
            Budget::Range { min, max } => {
                if price < *min || price > *max {
                    return false;
                }
            }
        }
    }

    true
}

fn summary_message(filters: &QueryFilters, shown: usize) -> String {
    let mut message = format!("Found {} results", shown);
    if let Some(bhk) = filters.bhk {
        message.push_str(&format!(" for {} BHK", bhk));
    }
    if let Some(city) = &filters.city {
        message.push_str(&format!(" in {}", city));
    }
    push_budget(&mut message, filters);
    message.push('.');
    message
}

fn no_match_message(filters: &QueryFilters) -> String {
    let mut message = String::from("No matching properties found");
    if let Some(city) = &filters.city {
        message.push_str(&format!(" in {}", city));
    }
    if let Some(bhk) = filters.bhk {
        message.push_str(&format!(" for {} BHK", bhk));
    }
    push_budget(&mut message, filters);
    message.push_str(". Try broadening the search.");
    message
}

fn push_budget(message: &mut String, filters: &QueryFilters) {
    match &filters.budget {
        Some(Budget::Max(max)) => {
            message.push_str(&format!(" under {}", format_price_rupee(*max)));
        }
        Some(Budget::Range { min, max }) => {
            message.push_str(&format!(
                " between {} and {}",
                format_price_rupee(*min),
                format_price_rupee(*max)
            ));
        }
        None => {}
    }
}

fn make_card(row: &CatalogRow) -> Listing {
    let amenities: Vec<&str> = [row.lift.as_str(), row.parking_type.as_str()]
        .into_iter()
        .filter(|value| is_meaningful(value))
        .collect();

    Listing {
        project_name: row.project_name.clone(),
        bhk: row.bhk.clone(),
        city: row.city_name.clone(),
        price: row
            .price
            .map(format_price_rupee)
            .unwrap_or_else(|| "N/A".to_string()),
        status: if row.status.is_empty() {
            "N/A".to_string()
        } else {
            row.status.clone()
        },
        amenities: if amenities.is_empty() {
            "N/A".to_string()
        } else {
            amenities.join(", ")
        },
        url: Some(project_url(row)),
    }
}

/// "false"/"0"/"none" в исходных колонках означают отсутствие удобства
fn is_meaningful(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    !v.is_empty() && v != "false" && v != "0" && v != "none" && v != "n/a"
}

fn project_url(row: &CatalogRow) -> String {
    let slug = if row.slug.is_empty() {
        &row.project_name
    } else {
        &row.slug
    };
    format!("/project/{}", slug.to_lowercase().replace(' ', "-"))
}
