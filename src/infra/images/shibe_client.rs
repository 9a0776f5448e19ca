use reqwest::Client;
use std::error::Error;

const SHIBE_API_URL: &str = "https://shibe.online/api/shibes?count=1&urls=true";

/// Fetches random shiba pictures for the `doge` command.
pub struct ShibeClient {
    client: Client,
}

impl ShibeClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// URL of one random picture.
    pub async fn random_picture_url(&self) -> Result<String, Box<dyn Error + Send + Sync>> {
        let response = self.client.get(SHIBE_API_URL).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(format!("Shibe API error: {} - {}", status, text).into());
        }

        let urls: Vec<String> = response.json().await?;
        first_url(urls)
    }
}

fn first_url(urls: Vec<String>) -> Result<String, Box<dyn Error + Send + Sync>> {
    urls.into_iter()
        .next()
        .ok_or_else(|| "Shibe API returned no pictures".into())
}

impl Default for ShibeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_the_first_url() {
        let url = first_url(vec!["https://cdn.shibe.online/a.jpg".to_string()]).unwrap();
        assert_eq!(url, "https://cdn.shibe.online/a.jpg");
    }

    #[test]
    fn empty_response_is_an_error() {
        assert!(first_url(Vec::new()).is_err());
    }
}
