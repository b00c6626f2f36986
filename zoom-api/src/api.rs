//! Zoom REST API resources.
//!
//! Thin wrappers that build an endpoint path and query parameters, then hand
//! off to the generic authenticated call. Responses come back as raw JSON.

use std::fmt;
use std::str::FromStr;

use log::*;
use serde_json::Value;

use crate::client::ZoomClient;
use crate::error::{configuration_error, ConfigurationErrorKind, Error};

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Meeting list types accepted by `users/{userId}/meetings`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MeetingType {
    Scheduled,
    #[default]
    Live,
    Upcoming,
    UpcomingMeetings,
    PreviousMeetings,
}

impl MeetingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingType::Scheduled => "scheduled",
            MeetingType::Live => "live",
            MeetingType::Upcoming => "upcoming",
            MeetingType::UpcomingMeetings => "upcoming_meetings",
            MeetingType::PreviousMeetings => "previous_meetings",
        }
    }
}

impl fmt::Display for MeetingType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct MeetingTypeParseError(String);

impl fmt::Display for MeetingTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown meeting type: {}", self.0)
    }
}

impl std::error::Error for MeetingTypeParseError {}

impl FromStr for MeetingType {
    type Err = MeetingTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(MeetingType::Scheduled),
            "live" => Ok(MeetingType::Live),
            "upcoming" => Ok(MeetingType::Upcoming),
            "upcoming_meetings" => Ok(MeetingType::UpcomingMeetings),
            "previous_meetings" => Ok(MeetingType::PreviousMeetings),
            _ => Err(MeetingTypeParseError(s.to_string())),
        }
    }
}

/// Page selection for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page_size: u32,
    pub page_number: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_number: 1,
        }
    }
}

impl Page {
    pub fn new(page_size: u32, page_number: u32) -> Self {
        Self {
            page_size,
            page_number,
        }
    }

    fn params(&self) -> [(String, String); 2] {
        [
            ("page_size".to_string(), self.page_size.to_string()),
            ("page_number".to_string(), self.page_number.to_string()),
        ]
    }
}

/// Path of a user resource, relative to the API base.
///
/// Dot segments are refused: URL resolution would collapse `users/../meetings`
/// into another endpoint, even when the dots are percent-encoded.
fn user_endpoint(user_id: &str, resource: Option<&str>) -> Result<String, Error> {
    if matches!(user_id.trim(), "" | "." | "..") {
        warn!("Refusing user id {:?}", user_id);
        return Err(configuration_error(
            ConfigurationErrorKind::InvalidUserId,
            "user id must not be empty, '.' or '..'",
        ));
    }

    let user_id = urlencoding::encode(user_id);
    Ok(match resource {
        Some(resource) => format!("users/{}/{}", user_id, resource),
        None => format!("users/{}", user_id),
    })
}

impl ZoomClient {
    /// List a user's meetings.
    ///
    /// Sends `type`, `page_size`, and `page_number` in that order.
    pub async fn user_meetings(
        &self,
        user_id: &str,
        meeting_type: MeetingType,
        page: Page,
    ) -> Result<Value, Error> {
        let mut params = vec![("type".to_string(), meeting_type.to_string())];
        params.extend(page.params());

        self.get(&user_endpoint(user_id, Some("meetings"))?, params)
            .await
    }

    /// List a user's webinars.
    pub async fn user_webinars(&self, user_id: &str, page: Page) -> Result<Value, Error> {
        self.get(
            &user_endpoint(user_id, Some("webinars"))?,
            page.params().to_vec(),
        )
        .await
    }

    /// Fetch a user's profile. Use `"me"` for the token owner.
    pub async fn user(&self, user_id: &str) -> Result<Value, Error> {
        self.get(&user_endpoint(user_id, None)?, Vec::new()).await
    }
}
