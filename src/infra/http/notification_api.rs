use async_trait::async_trait;
use serde::Serialize;

use crate::domain::ports::NotificationGateway;
use crate::error::BookingError;
use crate::infra::http::backend::RestBackend;

pub struct HttpNotificationGateway {
    backend: RestBackend,
}

impl HttpNotificationGateway {
    pub fn new(backend: RestBackend) -> Self {
        Self { backend }
    }
}

#[derive(Serialize)]
struct NotificationPayload<'a> {
    pupil_id: &'a str,
    booking_id: &'a str,
    kind: &'a str,
    title: &'a str,
    message: &'a str,
}

#[async_trait]
impl NotificationGateway for HttpNotificationGateway {
    async fn notify(
        &self,
        pupil_id: &str,
        booking_id: &str,
        kind: &str,
        title: &str,
        message: &str,
    ) -> Result<(), BookingError> {
        let response = self
            .backend
            .post("/notifications")
            .json(&NotificationPayload {
                pupil_id,
                booking_id,
                kind,
                title,
                message,
            })
            .send()
            .await?;
        self.backend.check(response).await?;
        Ok(())
    }
}
