use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_server_addr")]
    pub server_addr: String,

    pub mongo_uri: Option<String>,
    #[serde(default = "default_mongo_database")]
    pub mongo_database: String,
    #[serde(default = "default_mongo_collection")]
    pub mongo_collection: String,

    #[serde(default)]
    pub store_backend: StoreBackend,

    #[serde(default)]
    pub json_log: bool,
    pub sentry_dsn: Option<String>,
    #[serde(default)]
    pub debug_mode: bool,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Mongo,
    Memory,
}

impl Config {
    pub fn from_envvar() -> Result<Config, envy::Error> {
        envy::from_env()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: default_server_addr(),
            mongo_uri: None,
            mongo_database: default_mongo_database(),
            mongo_collection: default_mongo_collection(),
            store_backend: StoreBackend::default(),
            json_log: false,
            sentry_dsn: None,
            debug_mode: false,
        }
    }
}

fn default_server_addr() -> String {
    "0.0.0.0:3000".to_owned()
}

fn default_mongo_database() -> String {
    "nq_tickets".to_owned()
}

fn default_mongo_collection() -> String {
    "tickets".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config: Config = envy::from_iter(vars(&[])).unwrap();

        assert_eq!(config.server_addr, "0.0.0.0:3000");
        assert_eq!(config.mongo_database, "nq_tickets");
        assert_eq!(config.mongo_collection, "tickets");
        assert_eq!(config.store_backend, StoreBackend::Mongo);
        assert!(config.mongo_uri.is_none());
        assert!(!config.json_log);
    }

    #[test]
    fn test_overrides() {
        let config: Config = envy::from_iter(vars(&[
            ("SERVER_ADDR", "127.0.0.1:8080"),
            ("MONGO_URI", "mongodb://localhost:27017"),
            ("STORE_BACKEND", "memory"),
            ("JSON_LOG", "true"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.mongo_uri.as_deref(), Some("mongodb://localhost:27017"));
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.json_log);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        assert!(envy::from_iter::<_, Config>(vars(&[("STORE_BACKEND", "redis")])).is_err());
    }
}
