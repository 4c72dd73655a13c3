//! CSV-backed каталог жилых проектов.
//!
//! Четыре исходных файла (project, ProjectAddress, ProjectConfiguration,
//! ProjectConfigurationVariant) склеиваются в памяти left-join'ом в плоские
//! строки "проект + конфигурация + вариант". Результат живёт в
//! process-wide синглтоне и после загрузки не меняется.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ─── Ошибки ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read {file}: {source}")]
    File {
        file: &'static str,
        #[source]
        source: csv::Error,
    },
}

// ─── Структуры ───────────────────────────────────────────────────────────────

/// Одна плоская строка каталога: проект с адресом и одним вариантом планировки.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRow {
    pub project_id: String,
    /// Empty when the project has no configuration rows
    pub configuration_id: String,
    pub project_name: String,
    /// Resolved display name; empty when the cityId is not in the city map
    pub city_name: String,
    pub slug: String,
    pub status: String,
    pub about_property: String,
    pub landmark: String,
    /// The raw customBHK value, e.g. "3BHK" or "2,3BHK"
    pub bhk: String,
    /// Price in rupees; None when the source cell is empty or not a number
    pub price: Option<f64>,
    pub lift: String,
    pub parking_type: String,
}

/// In-memory каталог, загруженный из CSV-директории.
#[derive(Debug, Default)]
pub struct Catalog {
    pub rows: Vec<CatalogRow>,
}

// ─── CSV-записи исходных файлов ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ProjectRecord {
    id: String,
    #[serde(rename = "projectName", default)]
    project_name: String,
    #[serde(rename = "cityId", default)]
    city_id: String,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    status: String,
    #[serde(rename = "aboutProperty", default)]
    about_property: String,
}

#[derive(Debug, Deserialize)]
struct AddressRecord {
    #[serde(rename = "projectId")]
    project_id: String,
    #[serde(default)]
    landmark: String,
}

#[derive(Debug, Deserialize)]
struct ConfigurationRecord {
    id: String,
    #[serde(rename = "projectId")]
    project_id: String,
    #[serde(rename = "customBHK", default)]
    custom_bhk: String,
}

#[derive(Debug, Deserialize)]
struct VariantRecord {
    #[serde(rename = "configurationId")]
    configuration_id: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    lift: String,
    #[serde(rename = "parkingType", default)]
    parking_type: String,
}

// ─── Справочник городов ──────────────────────────────────────────────────────

/// cityId → отображаемое имя. Источник данных хранит города только как id.
static CITY_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    maplit::hashmap! {
        "cmf6nu3ru000gvcxspxarll3v" => "Pune",
        "cmf50r5a00000vcj0k1iuocuu" => "Mumbai",
    }
});

// ─── Глобальный синглтон ─────────────────────────────────────────────────────

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    let dir = match crate::shared::config::load_config()
        .and_then(|cfg| crate::shared::config::get_data_dir(&cfg))
    {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!("catalog: cannot load config: {}; using ./data", e);
            PathBuf::from("data")
        }
    };
    match Catalog::load(&dir) {
        Ok(catalog) => {
            tracing::info!(
                "catalog: {} rows loaded from {}",
                catalog.rows.len(),
                dir.display()
            );
            catalog
        }
        Err(e) => {
            tracing::error!("catalog: load failed: {}; serving an empty catalog", e);
            Catalog::default()
        }
    }
});

/// Доступ к каталогу; первая загрузка происходит при первом вызове.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

// ─── Реализация ──────────────────────────────────────────────────────────────

impl Catalog {
    /// Загрузить и склеить четыре CSV-файла из директории `dir`.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let projects: Vec<ProjectRecord> = read_csv(dir, "project.csv")?;
        let addresses: Vec<AddressRecord> = read_csv(dir, "ProjectAddress.csv")?;
        let configurations: Vec<ConfigurationRecord> =
            read_csv(dir, "ProjectConfiguration.csv")?;
        let variants: Vec<VariantRecord> = read_csv(dir, "ProjectConfigurationVariant.csv")?;

        // Первый адрес проекта; дубликаты в источнике игнорируются
        let mut landmark_by_project: HashMap<&str, &str> = HashMap::new();
        for a in &addresses {
            landmark_by_project
                .entry(a.project_id.as_str())
                .or_insert(a.landmark.as_str());
        }

        let mut configs_by_project: HashMap<&str, Vec<&ConfigurationRecord>> = HashMap::new();
        for c in &configurations {
            configs_by_project
                .entry(c.project_id.as_str())
                .or_default()
                .push(c);
        }

        let mut variants_by_config: HashMap<&str, Vec<&VariantRecord>> = HashMap::new();
        for v in &variants {
            variants_by_config
                .entry(v.configuration_id.as_str())
                .or_default()
                .push(v);
        }

        let mut rows = Vec::new();
        for p in &projects {
            let base = CatalogRow {
                project_id: p.id.clone(),
                project_name: p.project_name.clone(),
                city_name: CITY_NAMES
                    .get(p.city_id.as_str())
                    .map(|name| name.to_string())
                    .unwrap_or_default(),
                slug: p.slug.clone(),
                status: p.status.clone(),
                about_property: p.about_property.clone(),
                landmark: landmark_by_project
                    .get(p.id.as_str())
                    .map(|l| l.to_string())
                    .unwrap_or_default(),
                ..Default::default()
            };

            // Left join: проект без конфигураций или без вариантов всё равно
            // даёт строку с пустыми полями
            match configs_by_project.get(p.id.as_str()) {
                None => rows.push(base),
                Some(configs) => {
                    for c in configs {
                        let mut with_config = base.clone();
                        with_config.configuration_id = c.id.clone();
                        with_config.bhk = c.custom_bhk.clone();

                        match variants_by_config.get(c.id.as_str()) {
                            None => rows.push(with_config),
                            Some(vs) => {
                                for v in vs {
                                    let mut row = with_config.clone();
                                    row.price = v.price.trim().parse::<f64>().ok();
                                    row.lift = v.lift.clone();
                                    row.parking_type = v.parking_type.clone();
                                    rows.push(row);
                                }
                            }
                        }
                    }
                }
            }
        }

        Ok(Self { rows })
    }

    /// Уникальные имена городов, встречающиеся в каталоге.
    pub fn known_cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = Vec::new();
        for row in &self.rows {
            if !row.city_name.is_empty() && !cities.contains(&row.city_name) {
                cities.push(row.city_name.clone());
            }
        }
        cities
    }

    /// Уникальные названия проектов, в порядке первого появления.
    pub fn known_project_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for row in &self.rows {
            if !row.project_name.is_empty() && !names.contains(&row.project_name) {
                names.push(row.project_name.clone());
            }
        }
        names
    }
}

fn read_csv<T>(dir: &Path, file: &'static str) -> Result<Vec<T>, CatalogError>
where
    T: for<'de> Deserialize<'de>,
{
    let path = dir.join(file);
    let mut reader =
        csv::Reader::from_path(&path).map_err(|source| CatalogError::File { file, source })?;
    let mut out = Vec::new();
    for record in reader.deserialize() {
        out.push(record.map_err(|source| CatalogError::File { file, source })?);
    }
    Ok(out)
}
