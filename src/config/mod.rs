mod env_file;
mod settings;

pub use env_file::{load_env_file, EnvMap};
pub use settings::{
    Credentials, ExecutionContext, Settings, API_HOST, API_PORT, BASIC_AUTH_PASSWORD,
    BASIC_AUTH_USERNAME, CONFIGFILES_PATH,
};
