use reqwest::Response;
use serde_json::json;

/// Thin client over the song catalog API.
pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
}

impl TestClient {
    pub fn new(base_url: String) -> TestClient {
        TestClient {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub async fn create_song(&self, body: &serde_json::Value) -> Response {
        self.client
            .post(format!("{}/api/songs", self.base_url))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn get_all_songs(&self) -> Response {
        self.client
            .get(format!("{}/api/songs", self.base_url))
            .send()
            .await
            .unwrap()
    }

    pub async fn get_song(&self, name: &str) -> Response {
        self.client
            .get(format!("{}/api/songs/{}", self.base_url, name))
            .send()
            .await
            .unwrap()
    }

    pub async fn update_song(&self, name: &str, body: &serde_json::Value) -> Response {
        self.client
            .put(format!("{}/api/songs/{}", self.base_url, name))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn delete_song(&self, path: &str) -> Response {
        self.client
            .delete(format!(
                "{}/api/songs/{}",
                self.base_url,
                urlencoding::encode(path)
            ))
            .send()
            .await
            .unwrap()
    }

    pub async fn clear_songs(&self) -> Response {
        self.client
            .delete(format!("{}/api/songs", self.base_url))
            .send()
            .await
            .unwrap()
    }

    pub async fn get_duplicates(&self) -> Response {
        self.client
            .get(format!("{}/api/duplicates", self.base_url))
            .send()
            .await
            .unwrap()
    }

    pub async fn ingest(&self, directory: &str, recursive: bool) -> Response {
        self.client
            .post(format!("{}/api/ingest", self.base_url))
            .json(&json!({ "directory": directory, "recursive": recursive }))
            .send()
            .await
            .unwrap()
    }
}
