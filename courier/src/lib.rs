use failure::{format_err, Error};
use log::{debug, info};
use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;

pub use registrar::proto::http::MessageBody;
pub use registrar::proto::{Activities, ActivityRecord, Error as ServiceError, ErrorBody};

/// Blocking client for the registrar HTTP API.
///
/// Rejections from the service come back as a `failure::Error` wrapping
/// `ServiceError`, so callers can `downcast_ref::<ServiceError>()` them.
pub struct Courier {
    base: Url,
    client: Client,
}

impl Courier {
    pub fn new<A: AsRef<str>>(url: A) -> Result<Self, Error> {
        let url = url.as_ref();
        let base = Url::parse(url).map_err(|e| format_err!("invalid url {:?}: {}", url, e))?;
        if base.cannot_be_a_base() {
            return Err(format_err!("{} cannot be used as a base url", url));
        }

        Ok(Courier {
            base,
            client: Client::new(),
        })
    }

    pub fn activities(&self) -> Result<Activities, Error> {
        let url = self.endpoint(&["activities"]);
        debug!("querying {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| format_err!("failed to GET {}: {}", url, e))?;

        Self::decode(response)
    }

    pub fn signup(&self, activity: &str, email: &str) -> Result<String, Error> {
        self.mutate(activity, "signup", email)
    }

    pub fn unregister(&self, activity: &str, email: &str) -> Result<String, Error> {
        self.mutate(activity, "unregister", email)
    }

    fn mutate(&self, activity: &str, action: &str, email: &str) -> Result<String, Error> {
        let url = self.endpoint(&["activities", activity, action]);
        debug!("posting {} for {}", url, email);
        let response = self
            .client
            .post(url.clone())
            .query(&[("email", email)])
            .send()
            .map_err(|e| format_err!("failed to POST {}: {}", url, e))?;

        let body: MessageBody = Self::decode(response)?;
        info!("{}", body.message);
        Ok(body.message)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .map_err(|e| format_err!("failed to deserialize response: {}", e));
        }

        let body: ErrorBody<ServiceError> = response
            .json()
            .map_err(|e| format_err!("service responded {} with unexpected body: {}", status, e))?;
        debug!("service rejected request: {}", body.detail);
        Err(body.error.into())
    }
}
