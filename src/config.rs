use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenv().is_ok();

        let port = env::var("PORT")
            .expect("PORT missing, it is required")
            .parse()
            .expect("PORT must be a valid u16 number");

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL missing, it is required");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET missing, it is required");

        Self {
            port,
            database_url,
            jwt_secret,
        }
    }

    pub fn addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}
