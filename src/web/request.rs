use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, ErrorKind, Result};

lazy_static! {
    // RFC 7230 token.
    static ref HEADER_NAME: Regex = Regex::new(r"^[!#$%&'*+\-.^_`|~0-9A-Za-z]+$").unwrap();
}

/// Declarative description of a scrape request, as found in job configs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub url: String,
    pub body: String,
    pub headers: BTreeMap<String, String>,
    pub method: String,
    pub username: String,
    pub password: String,
    pub proxy_username: String,
    pub proxy_password: String,
}

impl RequestConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| {
            Error::from(("request config is not valid YAML", e))
                .kind_of(ErrorKind::InvalidConfiguration)
        })
    }

    /// Builds the outgoing request. Only the URL is mandatory and it has to be
    /// an absolute http or https URL.
    pub fn create_request(&self) -> Result<Request> {
        if self.url.is_empty() {
            return Err(Error::invalid_config("empty URL"));
        }

        let url = Url::parse(&self.url).map_err(|e| {
            Error::from((format!("invalid URL {:?}", self.url), e))
                .kind_of(ErrorKind::InvalidConfiguration)
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::invalid_config(&format!(
                "unsupported scheme {:?}",
                url.scheme()
            )));
        }

        let method = Method::try_from(self.method.as_str())?;

        let mut req = Request {
            method,
            url,
            headers: Vec::new(),
            host: None,
            body: None,
        };

        if !self.body.is_empty() {
            req.body = Some(self.body.clone());
        }

        if !self.username.is_empty() && !self.password.is_empty() {
            req.headers.push((
                "Authorization".to_string(),
                basic_auth(&self.username, &self.password),
            ));
        }

        if !self.proxy_username.is_empty() && !self.proxy_password.is_empty() {
            req.headers.push((
                "Proxy-Authorization".to_string(),
                basic_auth(&self.proxy_username, &self.proxy_password),
            ));
        }

        for (name, value) in &self.headers {
            if !HEADER_NAME.is_match(name) {
                return Err(Error::invalid_config(&format!(
                    "invalid header name {:?}",
                    name
                )));
            }
            if value.contains(|c: char| c == '\r' || c == '\n') {
                return Err(Error::invalid_config(&format!(
                    "header {} has a line break in its value",
                    name
                )));
            }

            req.headers.push((name.clone(), value.clone()));
            if name == "Host" || name == "host" {
                req.host = Some(value.clone());
            }
        }

        debug!(
            "built {} request for {} with {} headers",
            req.method,
            req.url,
            req.headers.len()
        );
        Ok(req)
    }
}

fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Method {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
}

impl TryFrom<&str> for Method {
    type Error = Error;

    fn try_from(method: &str) -> Result<Self> {
        match method {
            "" | "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            _ => Err(Error::invalid_config(&format!(
                "unsupported method {:?}, expected GET or POST",
                method
            ))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A ready to send request. Sending it is up to the scraper.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    url: Url,
    headers: Vec<(String, String)>,
    host: Option<String>,
    body: Option<String>,
}

impl Request {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of the named header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
