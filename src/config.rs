use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "F660A")]
    pub router: RouterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    #[serde(default = "default_hostip")]
    pub hostip: String,
    #[serde(default = "default_username")]
    pub username: String,
    pub password: String,
}

fn default_hostip() -> String {
    "192.168.1.1".to_string()
}

fn default_username() -> String {
    "admin".to_string()
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "f660a.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.router.hostip.is_empty(),
            "F660A.hostip must be non-empty"
        );
        anyhow::ensure!(
            !self.router.username.is_empty(),
            "F660A.username must be non-empty"
        );
        anyhow::ensure!(
            !self.router.password.is_empty(),
            "F660A.password must be non-empty"
        );
        Ok(())
    }
}
