//! Launch fingerprinting for anti-detection.

use rand::Rng;

/// Launch fingerprint for anti-detection.
///
/// Timezone, locale, and geolocation are not part of the fingerprint;
/// they come from the selected country profile at launch time.
#[derive(Debug, Clone)]
pub struct FingerprintConfig {
    /// User agent string reported by the browser
    pub user_agent: String,
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
}

impl FingerprintConfig {
    /// Generate a randomized fingerprint configuration
    pub fn randomized() -> Self {
        let mut rng = rand::thread_rng();

        // Common desktop user agents
        let user_agents = [
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        ];

        // Common viewport sizes
        let viewports = [(1920, 1080), (1366, 768), (1536, 864), (1280, 800)];

        let ua_idx = rng.gen_range(0..user_agents.len());
        let vp_idx = rng.gen_range(0..viewports.len());
        let (width, height) = viewports[vp_idx];

        Self {
            user_agent: user_agents[ua_idx].to_string(),
            viewport_width: width,
            viewport_height: height,
        }
    }

    /// Fixed fingerprint with an explicit viewport.
    pub fn with_viewport(width: u32, height: u32) -> Self {
        let mut fp = Self::randomized();
        fp.viewport_width = width;
        fp.viewport_height = height;
        fp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randomized_fingerprint() {
        let config = FingerprintConfig::randomized();
        assert!(!config.user_agent.is_empty());
        assert!(config.viewport_width > 0);
        assert!(config.viewport_height > 0);
    }

    #[test]
    fn test_fingerprint_variation() {
        // Configs should be different at least some of the time
        // (This is probabilistic but very unlikely to fail)
        let configs: Vec<_> = (0..10).map(|_| FingerprintConfig::randomized()).collect();

        let first_ua = &configs[0].user_agent;
        let all_same = configs.iter().all(|c| &c.user_agent == first_ua);
        assert!(!all_same, "Expected variation in user agents");
    }

    #[test]
    fn test_with_viewport() {
        let config = FingerprintConfig::with_viewport(1280, 800);
        assert_eq!(config.viewport_width, 1280);
        assert_eq!(config.viewport_height, 800);
    }
}
