use contracts::domain::common::SubjectKey;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Где лежат документы
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageEngine {
    #[default]
    Sqlite,
    /// Без сохранения между запусками
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub engine: StorageEngine,
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Как выполняются цепочки "прочитать-изменить-записать" над счётчиками,
/// лайками и оценками
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyMode {
    /// Без взаимного исключения, параллельные запросы могут терять обновления
    #[default]
    None,
    /// Мьютекс на ключ внутри одного процесса
    Process,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubjectConfig {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub consistency: ConsistencyMode,
    #[serde(default = "default_subjects")]
    pub subjects: Vec<SubjectConfig>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            consistency: ConsistencyMode::default(),
            subjects: default_subjects(),
        }
    }
}

/// Приложение, для которого строится страница аналитики
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedSubject {
    pub key: SubjectKey,
    pub name: String,
}

impl AnalyticsConfig {
    /// Проверить ключи приложений из конфигурации
    pub fn tracked_subjects(&self) -> anyhow::Result<Vec<TrackedSubject>> {
        let mut tracked: Vec<TrackedSubject> = Vec::with_capacity(self.subjects.len());
        for subject in &self.subjects {
            let key = SubjectKey::parse(subject.id.clone())
                .map_err(|e| anyhow::anyhow!("analytics subject {:?}: {}", subject.id, e))?;
            if tracked.iter().any(|t| t.key == key) {
                anyhow::bail!("analytics subject {:?} listed twice", subject.id);
            }
            tracked.push(TrackedSubject {
                key,
                name: subject.name.clone(),
            });
        }
        Ok(tracked)
    }
}

fn default_subjects() -> Vec<SubjectConfig> {
    [
        ("liverton-learning", "Liverton Learning"),
        ("liverton-quiz", "Liverton Quiz Championship"),
        ("liverton-shoppers", "Liverton Shoppers"),
        ("longtail", "Longtail"),
    ]
    .into_iter()
    .map(|(id, name)| SubjectConfig {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
engine = "sqlite"
path = "target/db/app.db"

[server]
port = 3000

[analytics]
consistency = "none"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    // ключи приложений проверяются до старта сервера
    config.analytics.tracked_subjects()?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(db_path);
        }
    }

    PathBuf::from(&config.database.path)
}
