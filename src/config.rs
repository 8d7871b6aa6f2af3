
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Argon2 cost parameters.
#[derive(Debug, Clone)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub hashing: HashingConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "irrigation-api".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "irrigation-api-users".into()),
            ttl_minutes: env_or("JWT_TTL_MINUTES", 60 * 24 * 7),
        };

        let defaults = HashingConfig::default();
        let hashing = HashingConfig {
            memory_kib: env_or("PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib),
            iterations: env_or("PASSWORD_HASH_ITERATIONS", defaults.iterations),
            parallelism: env_or("PASSWORD_HASH_PARALLELISM", defaults.parallelism),
        };

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("APP_PORT", 8080),
            jwt,
            hashing,
        })
    }
}

#[cfg(test)]
impl AppConfig {
    /// Cheap hashing so tests don't spend seconds in Argon2.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 60 * 24 * 7,
            },
            hashing: HashingConfig {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_on_missing_or_unparsable() {
        assert_eq!(env_or("IRRIGATION_API_TEST_UNSET_PORT", 8080u16), 8080);

        std::env::set_var("IRRIGATION_API_TEST_BAD_PORT", "not-a-port");
        assert_eq!(env_or("IRRIGATION_API_TEST_BAD_PORT", 8080u16), 8080);

        std::env::set_var("IRRIGATION_API_TEST_GOOD_PORT", "3333");
        assert_eq!(env_or("IRRIGATION_API_TEST_GOOD_PORT", 8080u16), 3333);
    }

    #[test]
    fn hashing_defaults_follow_argon2() {
        let h = HashingConfig::default();
        assert_eq!(h.memory_kib, argon2::Params::DEFAULT_M_COST);
        assert_eq!(h.iterations, argon2::Params::DEFAULT_T_COST);
    }
}
