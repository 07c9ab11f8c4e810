#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum CargoEnv {
    Development,
    Production,
}

#[derive(clap::Parser)]
pub struct AppConfig {
    // production or development
    #[clap(long, env, value_enum)]
    pub cargo_env: CargoEnv,

    // port that the app will bind to
    #[clap(long, env, default_value = "5000")]
    pub port: u16,

    // base url of the upstream site, the domain rotates every few months so
    // it has to be swappable without a rebuild
    #[clap(long, env, default_value = "https://www.hdfilmcehennemi.la")]
    pub main_url: String,

    // per-request timeout towards the upstream, timeouts are treated the
    // same as any other transport failure
    #[clap(long, env, default_value = "30")]
    pub request_timeout_secs: u64,

    // this should be either * for allowing everything, or a comma seperated list of domains like
    // example.com,something.com
    #[clap(long, env)]
    pub cors_origin: String,

    // optional sentry integration
    #[clap(long, env)]
    pub sentry_dsn: Option<String>,
}

impl Default for AppConfig {
    // defaults aren't really needed here but it's here as a bad fallback
    fn default() -> Self {
        Self {
            cargo_env: CargoEnv::Development,
            port: 5000,
            main_url: "https://www.hdfilmcehennemi.la".to_string(),
            request_timeout_secs: 30,
            cors_origin: "*".to_string(),
            sentry_dsn: None,
        }
    }
}
