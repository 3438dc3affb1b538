//! ParaTranz REST client over `reqwest`'s blocking API.

use std::time::Duration;

use gtnh_translation::{Client, Error, ParatranzFile, ParatranzItem, RemoteFile};
use reqwest::blocking::{
    Client as HttpClient, RequestBuilder, Response,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

const TIMEOUT_SECS: u64 = 60;

pub struct ParatranzClient {
    http: HttpClient,
    base_url: String,
    project_id: u64,
    token: String,
}

impl ParatranzClient {
    pub fn new(base_url: &str, project_id: u64, token: &str) -> Result<Self, Error> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::client_error("cannot build HTTP client", Some(Box::new(e))))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id,
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/projects/{}{}", self.base_url, self.project_id, path)
    }

    fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, Error> {
        let response = request
            .header("Authorization", &self.token)
            .send()
            .map_err(|e| Error::client_error(format!("{} failed", what), Some(Box::new(e))))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::client_error(
                format!("{} returned {}: {}", what, status, body.trim()),
                None,
            ));
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T, Error> {
        let text = self
            .send(self.http.get(self.url(path)), what)?
            .text()
            .map_err(|e| Error::client_error(format!("{} body unreadable", what), Some(Box::new(e))))?;
        Ok(serde_json::from_str(&text)?)
    }
}

// ParaTranz stores `a/b/c.lang.json` as file `c.lang.json` in directory `a/b`.
fn split_name(name: &str) -> (&str, &str) {
    match name.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", name),
    }
}

impl Client for ParatranzClient {
    fn files(&self) -> Result<Vec<RemoteFile>, Error> {
        let files: Vec<RemoteFile> = self.get_json("/files", "listing files")?;
        debug!(count = files.len(), "listed remote files");
        Ok(files)
    }

    fn strings(&self, file: &RemoteFile) -> Result<Vec<ParatranzItem>, Error> {
        let what = format!("fetching strings of {}", file.name);
        self.get_json(&format!("/files/{}/translation", file.id), &what)
    }

    fn upload(&self, file: &ParatranzFile, existing: Option<&RemoteFile>) -> Result<(), Error> {
        let (dir, file_name) = split_name(&file.name);
        let part = Part::bytes(file.to_json()?.into_bytes())
            .file_name(file_name.to_string())
            .mime_str("application/json")
            .map_err(|e| Error::client_error("invalid mime type", Some(Box::new(e))))?;

        let request = match existing {
            Some(remote) => {
                let form = Form::new().part("file", part);
                self.http
                    .post(self.url(&format!("/files/{}", remote.id)))
                    .multipart(form)
            }
            None => {
                let form = Form::new().part("file", part).text("path", dir.to_string());
                self.http.post(self.url("/files")).multipart(form)
            }
        };

        self.send(request, &format!("uploading {}", file.name))?;
        info!(name = %file.name, update = existing.is_some(), "upload accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name() {
        assert_eq!(
            split_name("resources/IC2/lang/en_US.lang.json"),
            ("resources/IC2/lang", "en_US.lang.json")
        );
        assert_eq!(split_name("GregTech_US.lang.json"), ("", "GregTech_US.lang.json"));
    }

    #[test]
    fn test_url() {
        let client = ParatranzClient::new("https://paratranz.cn/api/", 4964, "t").unwrap();
        assert_eq!(
            client.url("/files"),
            "https://paratranz.cn/api/projects/4964/files"
        );
    }
}
