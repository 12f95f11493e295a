//! Status polling until a terminal state.
//!
//! [`poll_until_terminal`] calls a status fetch repeatedly, sleeping between
//! attempts, until the reported [`PaymentState`] is in a caller-supplied terminal
//! set or the policy deadline passes. Polling is strictly sequential.
//!
//! Dropping the returned future stops polling at its next await point, so callers
//! can bound it further with `tokio::time::timeout` or `tokio::select!`.

use std::time::Duration;

use tokio::time::Instant;

use crate::{
    error::{Result, VektopayError},
    models::{ChargeStatus, Payment, PaymentState, PaymentStatus},
};

/// Terminal states of a payment.
pub const PAYMENT_TERMINAL_STATES: &[PaymentState] =
    &[PaymentState::Paid, PaymentState::Failed, PaymentState::Canceled];

/// Terminal states of a legacy charge.
pub const CHARGE_TERMINAL_STATES: &[PaymentState] = &[PaymentState::Paid, PaymentState::Failed];

/// Pacing and deadline of a polling loop.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use vektopay::poll::PollPolicy;
///
/// let policy = PollPolicy::default();
/// assert_eq!(policy.interval, Duration::from_secs(2));
/// assert_eq!(policy.timeout, Duration::from_secs(60));
///
/// let fast = PollPolicy::new(Duration::from_millis(250), Duration::from_secs(5));
/// assert_eq!(fast.interval, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Sleep between consecutive fetches (default: 2s)
    pub interval: Duration,
    /// Deadline measured from the start of polling (default: 60s)
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self { interval: Duration::from_secs(2), timeout: Duration::from_secs(60) }
    }
}

impl PollPolicy {
    /// Creates a policy with the given interval and timeout.
    #[must_use]
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

/// A fetched record that reports a payment state.
pub trait StatusReport {
    /// Returns the coarse state carried by the record.
    fn state(&self) -> &PaymentState;
}

impl StatusReport for PaymentStatus {
    fn state(&self) -> &PaymentState {
        &self.status
    }
}

impl StatusReport for ChargeStatus {
    fn state(&self) -> &PaymentState {
        &self.status
    }
}

impl StatusReport for Payment {
    fn state(&self) -> &PaymentState {
        &self.status
    }
}

/// Fetches the status of `resource_id` until it is terminal.
///
/// Before every fetch the elapsed time is compared against `policy.timeout`; once
/// it is exceeded the loop stops without fetching again. Between non-terminal
/// results the loop sleeps for `policy.interval`.
///
/// # Examples
///
/// ```
/// use vektopay::{
///     models::{PaymentState, PaymentStatus},
///     poll::{PAYMENT_TERMINAL_STATES, PollPolicy, poll_until_terminal},
/// };
///
/// # async fn example() -> vektopay::error::Result<()> {
/// let status = poll_until_terminal("pay_1", PAYMENT_TERMINAL_STATES, &PollPolicy::default(), |id| async move {
///     Ok(PaymentStatus { id: id.to_owned(), status: PaymentState::Paid, payment_status: None })
/// })
/// .await?;
///
/// assert_eq!(status.status, PaymentState::Paid);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`VektopayError::PollTimeout`] when the deadline passes, or the first
/// error returned by `fetch`, unchanged.
pub async fn poll_until_terminal<'a, S, F, Fut>(
    resource_id: &'a str,
    terminal_states: &[PaymentState],
    policy: &PollPolicy,
    mut fetch: F,
) -> Result<S>
where
    S: StatusReport,
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<S>>,
{
    let started = Instant::now();
    let mut attempt: u32 = 0;

    loop {
        let elapsed = started.elapsed();
        if elapsed > policy.timeout {
            tracing::warn!(
                resource_id,
                attempts = attempt,
                elapsed_ms = elapsed.as_millis(),
                "Polling deadline passed"
            );
            return Err(VektopayError::PollTimeout { resource_id: resource_id.to_owned(), elapsed });
        }

        attempt += 1;
        let report = fetch(resource_id).await?;
        let state = report.state();
        tracing::debug!(resource_id, attempt, status = %state, "Polled status");

        if terminal_states.contains(state) {
            return Ok(report);
        }

        tokio::time::sleep(policy.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn status(state: PaymentState) -> PaymentStatus {
        PaymentStatus { id: "pay_1".to_owned(), status: state, payment_status: None }
    }

    #[test]
    fn test_poll_policy_default() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(2));
        assert_eq!(policy.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_terminal_sets() {
        assert!(PAYMENT_TERMINAL_STATES.contains(&PaymentState::Canceled));
        assert!(!CHARGE_TERMINAL_STATES.contains(&PaymentState::Canceled));
        assert!(!PAYMENT_TERMINAL_STATES.contains(&PaymentState::Processing));
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_on_first_fetch() {
        let calls = AtomicU32::new(0);

        let result = poll_until_terminal("pay_1", PAYMENT_TERMINAL_STATES, &PollPolicy::default(), |_| {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Ok(status(PaymentState::Failed)) }
        })
        .await
        .unwrap();

        assert_eq!(result.status, PaymentState::Failed);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_k_non_terminal_then_terminal() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();
        let policy = PollPolicy::new(Duration::from_secs(1), Duration::from_secs(60));

        let result = poll_until_terminal("pay_1", PAYMENT_TERMINAL_STATES, &policy, |id| {
            let n = calls.fetch_add(1, Ordering::Relaxed);
            assert_eq!(id, "pay_1");
            async move {
                if n < 3 { Ok(status(PaymentState::Processing)) } else { Ok(status(PaymentState::Paid)) }
            }
        })
        .await
        .unwrap();

        assert_eq!(result.status, PaymentState::Paid);
        assert_eq!(calls.load(Ordering::Relaxed), 4);
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_shorter_than_interval_fetches_once() {
        let calls = AtomicU32::new(0);
        let policy = PollPolicy::new(Duration::from_secs(5), Duration::from_secs(1));

        let result = poll_until_terminal("pay_1", PAYMENT_TERMINAL_STATES, &policy, |_| {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Ok(status(PaymentState::Processing)) }
        })
        .await;

        match result {
            Err(VektopayError::PollTimeout { resource_id, elapsed }) => {
                assert_eq!(resource_id, "pay_1");
                assert!(elapsed > Duration::from_secs(1));
            }
            other => panic!("expected poll timeout, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_terminal_times_out() {
        let calls = AtomicU32::new(0);
        let policy = PollPolicy::new(Duration::from_secs(2), Duration::from_secs(10));

        let result = poll_until_terminal("pay_1", PAYMENT_TERMINAL_STATES, &policy, |_| {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Ok(status(PaymentState::Created)) }
        })
        .await;

        assert!(matches!(result, Err(VektopayError::PollTimeout { .. })));
        // fetches at t = 0, 2, 4, 6, 8, 10; the check at t = 12 stops the loop
        assert_eq!(calls.load(Ordering::Relaxed), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_propagates_immediately() {
        let calls = AtomicU32::new(0);

        let result: Result<PaymentStatus> =
            poll_until_terminal("pay_1", PAYMENT_TERMINAL_STATES, &PollPolicy::default(), |_| {
                calls.fetch_add(1, Ordering::Relaxed);
                async { Err(VektopayError::RequestFailed { status: 404, payload: None }) }
            })
            .await;

        assert!(matches!(result, Err(VektopayError::RequestFailed { status: 404, .. })));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_charge_terminal_set_keeps_polling_canceled() {
        let calls = AtomicU32::new(0);
        let policy = PollPolicy::new(Duration::from_secs(1), Duration::from_secs(60));

        let result = poll_until_terminal("ch_1", CHARGE_TERMINAL_STATES, &policy, |_| {
            let n = calls.fetch_add(1, Ordering::Relaxed);
            async move {
                let state = if n == 0 { PaymentState::Canceled } else { PaymentState::Failed };
                Ok(ChargeStatus { id: "ch_1".to_owned(), status: state })
            }
        })
        .await
        .unwrap();

        assert_eq!(result.status, PaymentState::Failed);
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_future_stops_polling() {
        let calls = AtomicU32::new(0);
        let policy = PollPolicy::new(Duration::from_secs(1), Duration::from_secs(60));

        let polling = poll_until_terminal("pay_1", PAYMENT_TERMINAL_STATES, &policy, |_| {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Ok(status(PaymentState::Processing)) }
        });
        let outcome = tokio::time::timeout(Duration::from_millis(2500), polling).await;

        assert!(outcome.is_err());
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }
}
