// tests/common/mod.rs
use biopass_enroll::{utils::config::Config, Application};
use httpmock::MockServer;

pub const TEST_KEY: &str = "integration-key";

/// A minimal JPEG header; enough for format detection.
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

pub struct TestContext {
    pub server: MockServer,
    pub app: Application,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_enrollment("")
    }

    /// `enrollment` is extra TOML placed under the `[enrollment]` table.
    pub fn with_enrollment(enrollment: &str) -> Self {
        let server = MockServer::start();
        let source = format!(
            "[api]\nbase_url = \"{}\"\nsubscription_key = \"{}\"\n\n[enrollment]\n{}\n",
            server.base_url(),
            TEST_KEY,
            enrollment
        );
        let config = Config::from_toml_str(&source).expect("test config");
        let app = Application::new(config).expect("application");

        Self { server, app }
    }
}
