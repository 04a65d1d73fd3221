//! Deny request use case.

use std::sync::Arc;

use clockwork_domain::{Request, RequestId, UserId};

use crate::infrastructure::clock::ClockHandle;
use crate::infrastructure::ports::Notifier;
use crate::stores::RequestStore;

use super::error::RequestError;
use super::fulfill_request::publish;

/// Close a pending request as denied, with a required reason.
pub struct DenyRequest {
    requests: Arc<RequestStore>,
    notifier: Arc<dyn Notifier>,
    clock: ClockHandle,
}

impl DenyRequest {
    pub fn new(
        requests: Arc<RequestStore>,
        notifier: Arc<dyn Notifier>,
        clock: ClockHandle,
    ) -> Self {
        Self {
            requests,
            notifier,
            clock,
        }
    }

    pub async fn execute(
        &self,
        id: RequestId,
        staff_id: UserId,
        reason: &str,
    ) -> Result<Request, RequestError> {
        // Validate before claiming the record, so a bad reason never
        // removes the request from the open set.
        if reason.trim().is_empty() {
            return Err(RequestError::Validation(
                "Denial reason cannot be empty".to_string(),
            ));
        }

        let mut request = self
            .requests
            .remove(id)
            .ok_or(RequestError::NotFound(id))?;

        if let Err(err) = request.deny(staff_id.clone(), reason, self.clock.now()) {
            self.requests.insert(request);
            return Err(err.into());
        }

        publish(self.notifier.as_ref(), &request).await;
        tracing::info!(request_id = %id, staff_id = %staff_id, "Request denied");
        Ok(request)
    }
}
