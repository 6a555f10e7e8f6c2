use async_trait::async_trait;

use crate::domain::models::instructor::Instructor;
use crate::domain::ports::InstructorDirectory;
use crate::error::BookingError;
use crate::infra::http::backend::RestBackend;

pub struct HttpInstructorDirectory {
    backend: RestBackend,
}

impl HttpInstructorDirectory {
    pub fn new(backend: RestBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl InstructorDirectory for HttpInstructorDirectory {
    async fn get_instructor(&self, id: &str) -> Result<Instructor, BookingError> {
        let response = self.backend.get(&format!("/instructors/{id}")).send().await?;
        self.backend.json(response).await
    }

    async fn list_instructors(&self) -> Result<Vec<Instructor>, BookingError> {
        let response = self.backend.get("/instructors").send().await?;
        self.backend.json(response).await
    }
}
