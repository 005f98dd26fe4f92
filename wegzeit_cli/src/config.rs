use anyhow::Context;
use wegzeit_ors::client::{DEFAULT_ORS_URL, OrsClient, OrsClientParams};

const API_KEY_ENV_VAR: &str = "ORS_API_KEY";
const BASE_URL_ENV_VAR: &str = "ORS_BASE_URL";

pub fn client_from_env() -> anyhow::Result<OrsClient> {
    // A missing .env file is fine; the variables may come from the shell.
    let _ = dotenvy::dotenv();

    let api_key = std::env::var(API_KEY_ENV_VAR)
        .with_context(|| format!("{API_KEY_ENV_VAR} is not set"))?;
    let base_url =
        std::env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_ORS_URL.to_string());

    Ok(OrsClient::new(OrsClientParams { base_url, api_key }))
}
