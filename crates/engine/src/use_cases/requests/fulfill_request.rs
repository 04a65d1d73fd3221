//! Fulfill request use case.

use std::sync::Arc;

use clockwork_domain::{Request, RequestId, UserId};

use crate::infrastructure::clock::ClockHandle;
use crate::infrastructure::ports::Notifier;
use crate::stores::RequestStore;

use super::error::RequestError;

/// Close a pending request as fully sent.
///
/// Removal from the store is the claim: of two concurrent staff actions on
/// one id, exactly one gets the record, the other gets NotFound.
pub struct FulfillRequest {
    requests: Arc<RequestStore>,
    notifier: Arc<dyn Notifier>,
    clock: ClockHandle,
}

impl FulfillRequest {
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
    ) -> Result<Request, RequestError> {
        let mut request = self
            .requests
            .remove(id)
            .ok_or(RequestError::NotFound(id))?;

        if let Err(err) = request.fulfill(staff_id.clone(), self.clock.now()) {
            // Only reachable if a non-pending record slipped into the
            // store; put it back rather than drop it.
            self.requests.insert(request);
            return Err(err.into());
        }

        publish(self.notifier.as_ref(), &request).await;
        tracing::info!(request_id = %id, staff_id = %staff_id, "Request fulfilled");
        Ok(request)
    }
}

/// Best-effort resolution fan-out shared by the terminal use cases.
pub(super) async fn publish(notifier: &dyn Notifier, request: &Request) {
    if let Err(err) = notifier.publish_resolution(request).await {
        tracing::warn!(request_id = %request.id, error = %err, "Resolution post failed");
    }
    if let Err(err) = notifier.notify_requester(request).await {
        tracing::warn!(request_id = %request.id, error = %err, "Requester notification failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use clockwork_domain::{CharacterName, RequestStatus};

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockNotifier;

    fn staff() -> UserId {
        UserId::new("staff-1").unwrap()
    }

    fn fixed_clock() -> ClockHandle {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()))
    }

    fn store_with_pending() -> (Arc<RequestStore>, RequestId) {
        let store = Arc::new(RequestStore::new());
        let id = store.next_id();
        store.insert(Request::new(
            id,
            UserId::new("user-1").unwrap(),
            CharacterName::new("Mychar").unwrap(),
            None,
            Utc::now(),
        ));
        (store, id)
    }

    fn quiet_notifier() -> Arc<MockNotifier> {
        let mut notifier = MockNotifier::new();
        notifier.expect_publish_resolution().returning(|_| Ok(()));
        notifier.expect_notify_requester().returning(|_| Ok(()));
        Arc::new(notifier)
    }

    #[tokio::test]
    async fn fulfill_is_at_most_once() {
        let (store, id) = store_with_pending();
        let use_case = FulfillRequest::new(store.clone(), quiet_notifier(), fixed_clock());

        let resolved = use_case.execute(id, staff()).await.unwrap();
        assert_eq!(resolved.status, RequestStatus::Fulfilled);
        assert_eq!(store.open_count(), 0);

        let second = use_case.execute(id, staff()).await;
        assert!(matches!(second, Err(RequestError::NotFound(_))));
    }

    #[tokio::test]
    async fn resolution_carries_staff_and_time() {
        let (store, id) = store_with_pending();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let use_case = FulfillRequest::new(store, quiet_notifier(), Arc::new(FixedClock(at)));

        let resolved = use_case.execute(id, staff()).await.unwrap();
        let resolution = resolved.resolution.unwrap();
        assert_eq!(resolution.staff_id, staff());
        assert_eq!(resolution.resolved_at, at);
    }

    #[tokio::test]
    async fn notifier_failure_does_not_undo_the_transition() {
        let (store, id) = store_with_pending();
        let mut notifier = MockNotifier::new();
        notifier.expect_publish_resolution().returning(|_| {
            Err(crate::infrastructure::ports::NotifyError::Delivery(
                "channel gone".into(),
            ))
        });
        notifier.expect_notify_requester().returning(|_| Ok(()));

        let use_case = FulfillRequest::new(store.clone(), Arc::new(notifier), fixed_clock());

        let resolved = use_case.execute(id, staff()).await.unwrap();
        assert_eq!(resolved.status, RequestStatus::Fulfilled);
        assert_eq!(store.open_count(), 0);
    }
}
