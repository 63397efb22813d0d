//! Booking delivery transport.
//!
//! The queue talks to the outside world through this seam so tests can
//! script deliveries. The production implementation POSTs the booking as
//! JSON; any 2xx status counts as delivered.

use async_trait::async_trait;
use serde::Serialize;

use crate::booking::record::BookingRecord;
use crate::error::TransportError;

#[async_trait]
pub trait BookingTransport: Send + Sync {
    /// Attempt to deliver one booking. Exactly one attempt; retries are
    /// the queue's job.
    async fn deliver(&self, record: &BookingRecord) -> Result<(), TransportError>;
}

/// Wire body for `POST /api/bookings`.
///
/// Field names follow the endpoint's JSON contract; the idempotency key is
/// the queued record's id so the server can deduplicate redeliveries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingBody<'a> {
    name: &'a str,
    phone: &'a str,
    date: &'a str,
    time: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coach_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    idempotency_key: &'a str,
}

/// HTTP transport for the booking endpoint.
pub struct HttpBookingTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBookingTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl BookingTransport for HttpBookingTransport {
    async fn deliver(&self, record: &BookingRecord) -> Result<(), TransportError> {
        let body = BookingBody {
            name: &record.request.name,
            phone: &record.request.phone,
            date: &record.request.date,
            time: &record.request.time,
            store_id: record.request.store_id.as_deref(),
            coach_id: record.request.coach_id.as_deref(),
            message: record.request.message.as_deref(),
            idempotency_key: &record.id,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    TransportError::Offline
                } else {
                    TransportError::RequestFailed(e.to_string())
                }
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(TransportError::HttpStatus(response.status().as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::record::BookingRequest;

    #[test]
    fn body_uses_camel_case_and_omits_empty_options() {
        let record = BookingRecord::new(
            BookingRequest {
                name: "Ada".to_string(),
                phone: "+1-555-0100".to_string(),
                date: "2026-09-01".to_string(),
                time: "18:30".to_string(),
                store_id: Some("downtown".to_string()),
                coach_id: None,
                message: None,
            },
            42,
        );
        let body = BookingBody {
            name: &record.request.name,
            phone: &record.request.phone,
            date: &record.request.date,
            time: &record.request.time,
            store_id: record.request.store_id.as_deref(),
            coach_id: record.request.coach_id.as_deref(),
            message: record.request.message.as_deref(),
            idempotency_key: &record.id,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["storeId"], "downtown");
        assert_eq!(json["idempotencyKey"], record.id);
        assert!(json.get("coachId").is_none());
    }
}
