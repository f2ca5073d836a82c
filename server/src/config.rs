use std::path::PathBuf;

use error_stack::{Report, ResultExt};

use kernel::KernelError;

static LIBRARY_STORAGE: &str = "LIBRARY_STORAGE";
static LIBRARY_PORT: &str = "LIBRARY_PORT";
static LIBRARY_LOG_DIR: &str = "LIBRARY_LOG_DIR";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_DIR: &str = "./logs/";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Storage {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    storage: Storage,
    port: u16,
    log_dir: PathBuf,
}

impl Config {
    /// Reads the process environment, with `.env` loaded first if present.
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        dotenvy::dotenv().ok();
        Self::parse(
            dotenvy::var(LIBRARY_STORAGE).ok(),
            dotenvy::var(LIBRARY_PORT).ok(),
            dotenvy::var(LIBRARY_LOG_DIR).ok(),
        )
    }

    fn parse(
        storage: Option<String>,
        port: Option<String>,
        log_dir: Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let storage = match storage.as_deref() {
            None | Some("postgres") => Storage::Postgres,
            Some("memory") => Storage::Memory,
            Some(other) => {
                return Err(Report::new(KernelError::Internal).attach_printable(format!(
                    "{LIBRARY_STORAGE} must be `postgres` or `memory`, got `{other}`"
                )))
            }
        };
        let port = match port {
            None => DEFAULT_PORT,
            Some(port) => port
                .parse::<u16>()
                .change_context_lazy(|| KernelError::Internal)
                .attach_printable_lazy(|| format!("{LIBRARY_PORT} is not a port: `{port}`"))?,
        };
        let log_dir = PathBuf::from(log_dir.unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()));
        Ok(Self {
            storage,
            port,
            log_dir,
        })
    }

    pub fn storage(&self) -> Storage {
        self.storage
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn log_dir(&self) -> &PathBuf {
        &self.log_dir
    }
}
