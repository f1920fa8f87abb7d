// tests/integration/config_tests.rs
use std::io::Write;

use biopass_enroll::{api::request::AbsentFaces, utils::config::Config, Application};

#[test]
fn test_file_then_environment_layering() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[api]\nbase_url = \"https://gateway.example.com/v1\"\nsubscription_key = \"from-file\"\n\n[enrollment]\nabsent_faces = \"null\""
    )
    .unwrap();

    std::env::set_var("BIOPASS_API__SUBSCRIPTION_KEY", "from-env");
    let config = Config::new(Some(file.path()));
    std::env::remove_var("BIOPASS_API__SUBSCRIPTION_KEY");
    let config = config.unwrap();

    assert_eq!(config.api.subscription_key.expose(), "from-env");
    assert_eq!(config.enrollment.absent_faces, AbsentFaces::Null);

    let app = Application::new(config).unwrap();
    let request = biopass_enroll::core::identity::types::EnrollPersonRequest::new("x", None);
    let (url, _) = app.preview(&request).unwrap();
    assert_eq!(url.as_str(), "https://gateway.example.com/v1/multibiometrics/enroll");
}
