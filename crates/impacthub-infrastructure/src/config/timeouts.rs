use std::time::Duration;

/// Explicit timeouts for every suspension point of the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Whole HTTP request, connect through body (default: 30 seconds)
    pub http_request: Duration,

    /// TCP/TLS connect (default: 10 seconds)
    pub connect: Duration,

    /// Fetching the payment widget script (default: 15 seconds)
    pub gateway_load: Duration,

    /// How long an open payment widget may wait for the user (default: 15 minutes)
    pub gateway_callback: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            http_request: Duration::from_secs(30),
            connect: Duration::from_secs(10),
            gateway_load: Duration::from_secs(15),
            gateway_callback: Duration::from_secs(15 * 60),
        }
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set HTTP request timeout
    pub fn with_http_request(mut self, duration: Duration) -> Self {
        self.http_request = duration;
        self
    }

    /// Builder pattern: set connect timeout
    pub fn with_connect(mut self, duration: Duration) -> Self {
        self.connect = duration;
        self
    }

    /// Builder pattern: set widget script load timeout
    pub fn with_gateway_load(mut self, duration: Duration) -> Self {
        self.gateway_load = duration;
        self
    }

    /// Builder pattern: set widget callback timeout
    pub fn with_gateway_callback(mut self, duration: Duration) -> Self {
        self.gateway_callback = duration;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TimeoutConfig::default();
        assert_eq!(config.http_request, Duration::from_secs(30));
        assert_eq!(config.connect, Duration::from_secs(10));
        assert_eq!(config.gateway_callback, Duration::from_secs(900));
    }

    #[test]
    fn test_builder_pattern() {
        let config = TimeoutConfig::new()
            .with_http_request(Duration::from_secs(5))
            .with_gateway_callback(Duration::from_secs(60));

        assert_eq!(config.http_request, Duration::from_secs(5));
        assert_eq!(config.gateway_callback, Duration::from_secs(60));
        assert_eq!(config.connect, Duration::from_secs(10));
    }
}
