//! Account settings resource.

use std::sync::Arc;

use super::ApiResource;
use crate::clients::{Connection, HttpMethod, HttpRequest};

const NAME: &str = "settings";
const ENDPOINT: &str = "api/v2/settings/";

/// Read access to the account settings.
#[derive(Debug)]
pub struct Settings<C> {
    connection: Arc<C>,
}

impl<C: Connection> ApiResource for Settings<C> {
    type Connection = C;

    const NAME: &'static str = NAME;
    const ENDPOINT: &'static str = ENDPOINT;

    fn new(connection: Arc<C>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> &Arc<C> {
        &self.connection
    }
}

impl<C: Connection> Settings<C> {
    /// Returns the account settings: timezone, language, environment and
    /// sender addresses.
    pub fn get(&self) -> C::Output {
        self.connection
            .dispatch(|| Ok(HttpRequest::builder(HttpMethod::Get, ENDPOINT).build()?))
    }
}
