use super::Config;

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("GOOGLE_API_KEY"))
        {
            self.api_key = Some(key);
        }

        if let Some(model) = non_empty_var("MAILROOM_MODEL") {
            self.completion.model = model;
        }

        if let Some(temp_str) = non_empty_var("MAILROOM_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.completion.temperature = temp;
        }

        if let Some(port_str) =
            non_empty_var("MAILROOM_GATEWAY_PORT").or_else(|| non_empty_var("PORT"))
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Some(host) = non_empty_var("MAILROOM_GATEWAY_HOST").or_else(|| non_empty_var("HOST"))
        {
            self.gateway.host = host;
        }

        if let Some(origins) = non_empty_var("MAILROOM_CORS_ORIGINS") {
            self.gateway.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(ToOwned::to_owned)
                .collect();
        }

        // Render exposes the public hostname of a web service under this name.
        if let Some(url) =
            non_empty_var("MAILROOM_PUBLIC_URL").or_else(|| non_empty_var("RENDER_EXTERNAL_URL"))
        {
            self.liveness.public_url = Some(url);
        }

        if let Some(level) = non_empty_var("MAILROOM_LOG") {
            self.log_level = level;
        }
    }
}
