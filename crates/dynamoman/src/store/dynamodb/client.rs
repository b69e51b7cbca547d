//! AWS SDK client setup (Imperative Shell).

use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::Client;

use crate::config::AwsConfig;

/// Creates a DynamoDB client with the given configuration.
///
/// Custom endpoints get static placeholder credentials when none are found
/// in the environment, since DynamoDB Local accepts any.
pub async fn create_client(config: &AwsConfig) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);

        if std::env::var_os("AWS_ACCESS_KEY_ID").is_none() && std::env::var_os("AWS_PROFILE").is_none()
        {
            sdk_config_loader = sdk_config_loader.credentials_provider(Credentials::new(
                "local",
                "local",
                None,
                None,
                "dynamoman-local",
            ));
        }
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}
