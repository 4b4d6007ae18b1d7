//! This module provides a client to connect to the todo REST server

use std::error::Error;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use url::Url;

use crate::item::TodoId;
use crate::storage::LocalStorage;
use crate::todo::{Todo, TodoFields};
use crate::traits::TodoSource;
use crate::wire::{decode_list, decode_value, TodoRecord};


/// A [`TodoSource`] that fetches its data from the REST server.
///
/// Every request carries `Authorization: Bearer <token>`.
/// Without a token, the collection is empty and cannot be modified.
pub struct Client {
    url: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S, token: Option<String>) -> Result<Self, Box<dyn Error>> {
        let url = Url::parse(url.as_ref())?;
        let token = token.filter(|t| t.trim().is_empty() == false);

        Ok(Self {
            url,
            token,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client that uses the token persisted in the local storage (if any)
    pub fn from_storage<S: AsRef<str>>(url: S, storage: &LocalStorage) -> Result<Self, Box<dyn Error>> {
        Self::new(url, storage.auth_token().map(|t| t.to_string()))
    }

    pub fn url(&self) -> &Url { &self.url }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn collection_url(&self) -> Url {
        let mut url = self.url.clone();
        url.set_path(&crate::config::todos_path());
        url
    }

    fn item_url(&self, id: &TodoId) -> Result<Url, Box<dyn Error>> {
        let mut url = self.collection_url();
        url.path_segments_mut()
            .map_err(|_| format!("{} cannot be a base URL", self.url))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, Box<dyn Error>> {
        match &self.token {
            None => Err("Not signed in: no bearer token available".into()),
            Some(token) => Ok(request.header(AUTHORIZATION, format!("Bearer {}", token))),
        }
    }
}

#[async_trait]
impl TodoSource for Client {
    async fn list(&self) -> Result<Vec<Todo>, Box<dyn Error>> {
        if self.is_authenticated() == false {
            log::debug!("No bearer token, the todo list is empty");
            return Ok(Vec::new());
        }

        let url = self.collection_url();
        let request = self.authorized(self.http.get(url.clone()))?;
        let response = request.send().await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} for GET {}", response.status(), url).into());
        }

        let values: Vec<serde_json::Value> = response.json().await?;
        log::debug!("Fetched {} todo records", values.len());
        Ok(decode_list(values))
    }

    async fn create(&mut self, fields: &TodoFields) -> Result<Todo, Box<dyn Error>> {
        let url = self.collection_url();
        let request = self.authorized(self.http.post(url.clone()))?
            .json(&TodoRecord::from(fields));
        let response = request.send().await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} for POST {}", response.status(), url).into());
        }

        let value: serde_json::Value = response.json().await?;
        let todo = decode_value(value)?;
        log::info!("Created todo {} ({})", todo.id(), todo.title());
        Ok(todo)
    }

    async fn replace(&mut self, todo: &Todo) -> Result<(), Box<dyn Error>> {
        let url = self.item_url(todo.id())?;
        let request = self.authorized(self.http.put(url.clone()))?
            .json(&TodoRecord::from(todo));
        let response = request.send().await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} for PUT {}", response.status(), url).into());
        }
        Ok(())
    }

    async fn delete(&mut self, id: &TodoId) -> Result<(), Box<dyn Error>> {
        let url = self.item_url(id)?;
        let request = self.authorized(self.http.delete(url.clone()))?;
        let response = request.send().await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} for DELETE {}", response.status(), url).into());
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_urls_are_escaped() {
        let client = Client::new("https://dashboard.example.com/some/page", Some("t0k".to_string())).unwrap();
        assert_eq!(client.collection_url().as_str(), "https://dashboard.example.com/api/todos");
        let url = client.item_url(&TodoId::from("a b/c")).unwrap();
        assert_eq!(url.as_str(), "https://dashboard.example.com/api/todos/a%20b%2Fc");
    }

    #[test]
    fn blank_tokens_do_not_authenticate() {
        assert!(Client::new("https://dashboard.example.com", Some("  ".to_string())).unwrap().is_authenticated() == false);
        assert!(Client::new("https://dashboard.example.com", None).unwrap().is_authenticated() == false);
        assert!(Client::new("not a url", None).is_err());
    }
}
