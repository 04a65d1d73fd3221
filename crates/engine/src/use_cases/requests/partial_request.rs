//! Partial fulfillment use case.

use std::sync::Arc;

use clockwork_domain::{Request, RequestId, UserId};

use crate::infrastructure::clock::ClockHandle;
use crate::infrastructure::ports::Notifier;
use crate::stores::RequestStore;

use super::error::RequestError;
use super::fulfill_request::publish;

/// Close a pending request as partially filled: staff say in free text
/// what was sent and what was not.
pub struct PartialRequest {
    requests: Arc<RequestStore>,
    notifier: Arc<dyn Notifier>,
    clock: ClockHandle,
}

impl PartialRequest {
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
        sent_items: &str,
        unavailable_items: &str,
    ) -> Result<Request, RequestError> {
        // Validate before claiming the record, same as deny.
        if sent_items.trim().is_empty() || unavailable_items.trim().is_empty() {
            return Err(RequestError::Validation(
                "Partial fulfillment needs both sent and unavailable items".to_string(),
            ));
        }

        let mut request = self
            .requests
            .remove(id)
            .ok_or(RequestError::NotFound(id))?;

        if let Err(err) = request.partial(
            staff_id.clone(),
            sent_items,
            unavailable_items,
            self.clock.now(),
        ) {
            self.requests.insert(request);
            return Err(err.into());
        }

        publish(self.notifier.as_ref(), &request).await;
        tracing::info!(request_id = %id, staff_id = %staff_id, "Request partially fulfilled");
        Ok(request)
    }
}
