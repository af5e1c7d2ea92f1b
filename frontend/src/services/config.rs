use shared::ConsoleConfig;

/// Build the console configuration from values baked in at compile time.
///
/// `HOTEL_CONSOLE_API_URL` overrides the backend base URL and
/// `HOTEL_CONSOLE_DEBUG` turns on debug logging.
pub fn load_config() -> ConsoleConfig {
    ConsoleConfig::from_overrides(
        option_env!("HOTEL_CONSOLE_API_URL"),
        option_env!("HOTEL_CONSOLE_DEBUG"),
    )
}
