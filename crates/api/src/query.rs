//! Shared query parameter types for API handlers.

use serde::Deserialize;
use sitecms_core::contact::MessageFilter;
use sitecms_core::error::CoreError;
use sitecms_core::pagination::PageRequest;

/// Query parameters for the contact message inbox
/// (`?page=&limit=&filter=`).
#[derive(Debug, Default, Deserialize)]
pub struct InboxParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub filter: Option<String>,
}

impl InboxParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }

    pub fn message_filter(&self) -> Result<MessageFilter, CoreError> {
        MessageFilter::from_query(self.filter.as_deref())
    }
}
